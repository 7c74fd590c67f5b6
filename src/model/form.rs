//! Exercise form data and the create/update payload builders

use super::exercise::{CreateExercise, Difficulty, Exercise, ExercisePatch};
use std::collections::BTreeSet;

/// Values edited in the exercise drawer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseFormData {
    pub id: String,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub muscles: Vec<String>,
    pub equipments: Vec<String>,
    pub active: bool,
    pub media_url: String,
}

impl Default for ExerciseFormData {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            description: String::new(),
            difficulty: Difficulty::Beginner,
            muscles: Vec::new(),
            equipments: Vec::new(),
            active: true,
            media_url: String::new(),
        }
    }
}

impl From<&Exercise> for ExerciseFormData {
    fn from(exercise: &Exercise) -> Self {
        Self {
            id: exercise.id.clone(),
            title: exercise.name.clone(),
            description: exercise.description.clone(),
            difficulty: exercise.difficulty,
            muscles: exercise.muscle_groups.clone(),
            equipments: exercise.equipments.clone(),
            active: exercise.active,
            media_url: exercise.media_url.clone().unwrap_or_default(),
        }
    }
}

impl ExerciseFormData {
    /// Toggle membership of `value` in the muscle list, keeping insertion order
    pub fn toggle_muscle(&mut self, value: &str) {
        toggle(&mut self.muscles, value);
    }

    pub fn toggle_equipment(&mut self, value: &str) {
        toggle(&mut self.equipments, value);
    }
}

fn toggle(list: &mut Vec<String>, value: &str) {
    if let Some(pos) = list.iter().position(|v| v == value) {
        list.remove(pos);
    } else {
        list.push(value.to_string());
    }
}

fn optional(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn same_set(a: &[String], b: &[String]) -> bool {
    a.iter().collect::<BTreeSet<_>>() == b.iter().collect::<BTreeSet<_>>()
}

/// Full record for a create request
pub fn build_exercise_object(values: &ExerciseFormData) -> CreateExercise {
    CreateExercise {
        name: values.title.trim().to_string(),
        description: values.description.trim().to_string(),
        difficulty: values.difficulty,
        muscle_groups: values.muscles.clone(),
        equipments: values.equipments.clone(),
        active: values.active,
        media_url: optional(&values.media_url),
    }
}

/// Field-level diff between the form and the original record.
/// Tag lists are compared as sets.
pub fn build_update_object(values: &ExerciseFormData, original: &Exercise) -> ExercisePatch {
    let mut patch = ExercisePatch::default();

    let name = values.title.trim();
    if name != original.name {
        patch.name = Some(name.to_string());
    }

    let description = values.description.trim();
    if description != original.description {
        patch.description = Some(description.to_string());
    }

    if values.difficulty != original.difficulty {
        patch.difficulty = Some(values.difficulty);
    }

    if !same_set(&values.muscles, &original.muscle_groups) {
        patch.muscle_groups = Some(values.muscles.clone());
    }

    if !same_set(&values.equipments, &original.equipments) {
        patch.equipments = Some(values.equipments.clone());
    }

    if values.active != original.active {
        patch.active = Some(values.active);
    }

    let media_url = optional(&values.media_url);
    if media_url != optional(original.media_url.as_deref().unwrap_or_default()) {
        // An emptied field is sent as an empty string so the server clears it
        patch.media_url = Some(media_url.unwrap_or_default());
    }

    patch
}

#[cfg(test)]
mod tests {
    use super::*;

    fn original() -> Exercise {
        Exercise {
            id: "ex-7".to_string(),
            name: "A".to_string(),
            description: String::new(),
            difficulty: Difficulty::Beginner,
            muscle_groups: vec!["Chest".to_string(), "Triceps".to_string()],
            equipments: vec!["Barbell".to_string()],
            active: true,
            media_url: None,
            created_at: None,
        }
    }

    #[test]
    fn test_diff_contains_only_changed_field() {
        let original = original();
        let mut values = ExerciseFormData::from(&original);
        values.difficulty = Difficulty::Intermediate;

        let patch = build_update_object(&values, &original);
        assert_eq!(
            patch,
            ExercisePatch {
                difficulty: Some(Difficulty::Intermediate),
                ..Default::default()
            }
        );
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            serde_json::json!({ "difficulty": "Intermediate" })
        );
    }

    #[test]
    fn test_unchanged_values_produce_empty_diff() {
        let original = original();
        let values = ExerciseFormData::from(&original);
        assert!(build_update_object(&values, &original).is_empty());
    }

    #[test]
    fn test_blank_media_url_from_server_is_not_a_change() {
        let original: Exercise = serde_json::from_str(
            r#"{"id":"x","name":"A","difficulty":"Beginner","active":true,"mediaUrl":""}"#,
        )
        .unwrap();
        assert_eq!(original.media_url, Some(String::new()));

        let values = ExerciseFormData::from(&original);
        assert!(build_update_object(&values, &original).is_empty());
    }

    #[test]
    fn test_tag_order_does_not_count_as_change() {
        let original = original();
        let mut values = ExerciseFormData::from(&original);
        values.muscles.reverse();
        assert!(build_update_object(&values, &original).is_empty());

        values.toggle_muscle("Shoulders");
        let patch = build_update_object(&values, &original);
        assert_eq!(patch.changed_fields(), vec!["muscleGroups"]);
    }

    #[test]
    fn test_whitespace_only_edit_is_not_a_change() {
        let original = original();
        let mut values = ExerciseFormData::from(&original);
        values.title = "  A ".to_string();
        values.media_url = "   ".to_string();
        assert!(build_update_object(&values, &original).is_empty());
    }

    #[test]
    fn test_clearing_media_url_sends_empty_string() {
        let mut original = original();
        original.media_url = Some("https://cdn.example.com/a.png".to_string());
        let mut values = ExerciseFormData::from(&original);
        values.media_url.clear();

        let patch = build_update_object(&values, &original);
        assert_eq!(patch.media_url, Some(String::new()));
    }

    #[test]
    fn test_build_exercise_object() {
        let mut values = ExerciseFormData {
            title: " Sentadilla ".to_string(),
            description: "Con barra".to_string(),
            difficulty: Difficulty::Advanced,
            ..Default::default()
        };
        values.toggle_muscle("Quadriceps");
        values.toggle_equipment("Barbell");

        let payload = build_exercise_object(&values);
        assert_eq!(payload.name, "Sentadilla");
        assert_eq!(payload.muscle_groups, vec!["Quadriceps"]);
        assert_eq!(payload.equipments, vec!["Barbell"]);
        assert!(payload.active);
        assert_eq!(payload.media_url, None);
    }

    #[test]
    fn test_toggle_removes_existing() {
        let mut values = ExerciseFormData::default();
        values.toggle_equipment("Mat");
        values.toggle_equipment("Mat");
        assert!(values.equipments.is_empty());
    }
}
