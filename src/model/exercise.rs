//! Exercise records as exchanged with the catalog API

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Difficulty level of an exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn all() -> [Difficulty; 3] {
        [
            Difficulty::Beginner,
            Difficulty::Intermediate,
            Difficulty::Advanced,
        ]
    }

    /// Value used on the wire and in query strings
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Principiante",
            Difficulty::Intermediate => "Intermedio",
            Difficulty::Advanced => "Avanzado",
        }
    }

    pub fn stars(&self) -> usize {
        match self {
            Difficulty::Beginner => 1,
            Difficulty::Intermediate => 2,
            Difficulty::Advanced => 3,
        }
    }

    pub fn next(&self) -> Difficulty {
        match self {
            Difficulty::Beginner => Difficulty::Intermediate,
            Difficulty::Intermediate => Difficulty::Advanced,
            Difficulty::Advanced => Difficulty::Beginner,
        }
    }

    pub fn prev(&self) -> Difficulty {
        match self {
            Difficulty::Beginner => Difficulty::Advanced,
            Difficulty::Intermediate => Difficulty::Beginner,
            Difficulty::Advanced => Difficulty::Intermediate,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An exercise as owned by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub muscle_groups: Vec<String>,
    #[serde(default)]
    pub equipments: Vec<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Exercise {
    /// Creation timestamp in local time, `dd/mm/yyyy, HH:MM`
    pub fn formatted_created_at(&self) -> String {
        self.created_at
            .map(|t| t.with_timezone(&Local).format("%d/%m/%Y, %H:%M").to_string())
            .unwrap_or_default()
    }
}

/// Full payload sent when creating an exercise
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExercise {
    pub name: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub muscle_groups: Vec<String>,
    pub equipments: Vec<String>,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
}

/// Partial payload sent when updating an exercise; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExercisePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub muscle_groups: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipments: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
}

impl ExercisePatch {
    pub fn is_empty(&self) -> bool {
        *self == ExercisePatch::default()
    }

    /// Names of the fields carried by this patch, for logging
    pub fn changed_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.name.is_some() {
            fields.push("name");
        }
        if self.description.is_some() {
            fields.push("description");
        }
        if self.difficulty.is_some() {
            fields.push("difficulty");
        }
        if self.muscle_groups.is_some() {
            fields.push("muscleGroups");
        }
        if self.equipments.is_some() {
            fields.push("equipments");
        }
        if self.active.is_some() {
            fields.push("active");
        }
        if self.media_url.is_some() {
            fields.push("mediaUrl");
        }
        fields
    }
}

/// One page of listing results
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExercisePage {
    #[serde(default)]
    pub data: Vec<Exercise>,
    #[serde(default)]
    pub total: usize,
}
