//! Filter store - process-wide structured filter selection
//!
//! The store is owned by the App and lent to whoever needs it. Every write
//! bumps a revision counter so observers can detect changes without callbacks.

use super::exercise::Difficulty;

/// Currently selected structured filters, at most one value per axis
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterSelection {
    pub muscle_group: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub equipment: Option<String>,
}

impl FilterSelection {
    /// Whether any axis holds a value
    pub fn is_active(&self) -> bool {
        self.muscle_group.is_some() || self.difficulty.is_some() || self.equipment.is_some()
    }

    /// Short human description, e.g. `músculo:Chest dificultad:Advanced`
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if let Some(ref m) = self.muscle_group {
            parts.push(format!("músculo:{}", m));
        }
        if let Some(d) = self.difficulty {
            parts.push(format!("dificultad:{}", d));
        }
        if let Some(ref e) = self.equipment {
            parts.push(format!("equipamiento:{}", e));
        }
        parts.join(" ")
    }
}

/// Application-wide filter state container
#[derive(Debug, Default)]
pub struct FilterStore {
    selection: FilterSelection,
    revision: u64,
}

impl FilterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    /// Monotonic change counter
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_active(&self) -> bool {
        self.selection.is_active()
    }

    pub fn set_muscle_group(&mut self, value: Option<String>) {
        if self.selection.muscle_group != value {
            self.selection.muscle_group = value;
            self.revision += 1;
        }
    }

    pub fn set_difficulty(&mut self, value: Option<Difficulty>) {
        if self.selection.difficulty != value {
            self.selection.difficulty = value;
            self.revision += 1;
        }
    }

    pub fn set_equipment(&mut self, value: Option<String>) {
        if self.selection.equipment != value {
            self.selection.equipment = value;
            self.revision += 1;
        }
    }

    /// Empty every axis
    pub fn clear_all(&mut self) {
        if self.selection.is_active() {
            self.selection = FilterSelection::default();
            self.revision += 1;
        }
    }
}
