//! Fixed option tables for muscle groups and equipment
//!
//! Each table maps the value used by the API to the label shown in the UI.
//! Values missing from a table are displayed verbatim.

/// A `(value, label)` option
pub type LabeledOption = (&'static str, &'static str);

pub const MUSCLES: &[LabeledOption] = &[
    ("Chest", "Pecho"),
    ("Back", "Espalda"),
    ("Shoulders", "Hombros"),
    ("Biceps", "Bíceps"),
    ("Triceps", "Tríceps"),
    ("Forearms", "Antebrazos"),
    ("Abs", "Abdominales"),
    ("Obliques", "Oblicuos"),
    ("LowerBack", "Zona lumbar"),
    ("Glutes", "Glúteos"),
    ("Quadriceps", "Cuádriceps"),
    ("Hamstrings", "Isquiotibiales"),
    ("Adductors", "Aductores"),
    ("Calves", "Gemelos"),
    ("FullBody", "Cuerpo completo"),
];

pub const EQUIPMENTS: &[LabeledOption] = &[
    ("None", "Sin equipamiento"),
    ("Barbell", "Barra"),
    ("Dumbbell", "Mancuernas"),
    ("Kettlebell", "Kettlebell"),
    ("Machine", "Máquina"),
    ("Cable", "Polea"),
    ("Bench", "Banco"),
    ("PullUpBar", "Barra de dominadas"),
    ("ResistanceBand", "Banda elástica"),
    ("Mat", "Esterilla"),
    ("MedicineBall", "Balón medicinal"),
    ("TRX", "TRX"),
];

/// Look up the label for `value`, falling back to the value itself
pub fn label_for<'a>(options: &'a [LabeledOption], value: &'a str) -> &'a str {
    options
        .iter()
        .find(|(v, _)| *v == value)
        .map(|(_, label)| *label)
        .unwrap_or(value)
}

/// Label of the first element of a list-valued field
pub fn first_label<'a>(options: &'a [LabeledOption], values: &'a [String]) -> &'a str {
    values
        .first()
        .map(|v| label_for(options, v))
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_lookup() {
        assert_eq!(label_for(MUSCLES, "Chest"), "Pecho");
        assert_eq!(label_for(EQUIPMENTS, "Cable"), "Polea");
    }

    #[test]
    fn test_unknown_value_renders_verbatim() {
        assert_eq!(label_for(MUSCLES, "Neck"), "Neck");
    }

    #[test]
    fn test_first_label_uses_only_first_element() {
        let values = vec!["Back".to_string(), "Biceps".to_string()];
        assert_eq!(first_label(MUSCLES, &values), "Espalda");
        assert_eq!(first_label(MUSCLES, &[]), "");
    }
}
