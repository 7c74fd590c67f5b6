//! Modal stack for managing overlays
//!
//! Drawers and dialogs are stacked on top of the exercise table; only the top
//! modal receives input events.

/// Represents a modal overlay that can be displayed on top of the main UI
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    /// Quit confirmation dialog
    QuitConfirm,
    /// Filter drawer
    Filters,
    /// Create/edit exercise drawer
    ExerciseForm,
    /// Delete confirmation on top of the edit drawer
    DeleteConfirm { exercise_name: String },
    /// Help dialog showing all keyboard shortcuts
    Help,
}

/// A stack of modal overlays
///
/// Modals are rendered from bottom to top, with only the top modal
/// receiving input events.
#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn push(&mut self, modal: Modal) {
        self.stack.push(modal);
    }

    pub fn pop(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    pub fn top(&self) -> Option<&Modal> {
        self.stack.last()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Remove `modal` and everything stacked above it
    pub fn close(&mut self, modal: &Modal) {
        if let Some(pos) = self.stack.iter().position(|m| m == modal) {
            self.stack.truncate(pos);
        }
    }

    pub fn clear(&mut self) {
        self.stack.clear();
    }

    /// Bottom-to-top iteration, for rendering
    pub fn iter(&self) -> impl Iterator<Item = &Modal> {
        self.stack.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_stack_push_pop() {
        let mut stack = ModalStack::new();
        assert!(stack.top().is_none());

        stack.push(Modal::ExerciseForm);
        stack.push(Modal::DeleteConfirm {
            exercise_name: "Remo".to_string(),
        });

        assert!(matches!(stack.pop(), Some(Modal::DeleteConfirm { .. })));
        assert_eq!(stack.pop(), Some(Modal::ExerciseForm));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_close_removes_modal_and_everything_above() {
        let mut stack = ModalStack::new();
        stack.push(Modal::Filters);
        stack.push(Modal::ExerciseForm);
        stack.push(Modal::DeleteConfirm {
            exercise_name: "Remo".to_string(),
        });

        stack.close(&Modal::ExerciseForm);
        assert_eq!(stack.top(), Some(&Modal::Filters));
        assert_eq!(stack.iter().count(), 1);
    }

    #[test]
    fn test_clear_empties_stack() {
        let mut stack = ModalStack::new();
        stack.push(Modal::Help);
        stack.push(Modal::QuitConfirm);
        stack.clear();
        assert!(stack.is_empty());
        assert!(stack.top().is_none());
    }
}
