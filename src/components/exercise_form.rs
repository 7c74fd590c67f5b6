//! Create/edit drawer
//!
//! Holds the values being edited and, in edit mode, a snapshot of the record
//! taken when the drawer was opened. Submitting turns the form into a
//! mutation request; the App sends it and reports the outcome.

use crate::action::Action;
use crate::component::Component;
use crate::components::drawer_area;
use crate::model::catalog::{LabeledOption, EQUIPMENTS, MUSCLES};
use crate::model::exercise::Exercise;
use crate::model::form::{build_exercise_object, build_update_object, ExerciseFormData};
use crate::services::mutation::{MutationKind, MutationRequest};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Description,
    Difficulty,
    Muscles,
    Equipments,
    Active,
    MediaUrl,
}

impl FormField {
    const ORDER: [FormField; 7] = [
        FormField::Name,
        FormField::Description,
        FormField::Difficulty,
        FormField::Muscles,
        FormField::Equipments,
        FormField::Active,
        FormField::MediaUrl,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> FormField {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> FormField {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    fn label(self) -> &'static str {
        match self {
            FormField::Name => "Nombre",
            FormField::Description => "Descripción",
            FormField::Difficulty => "Dificultad",
            FormField::Muscles => "Grupos musculares",
            FormField::Equipments => "Equipamiento",
            FormField::Active => "Visualización",
            FormField::MediaUrl => "URL de imagen/vídeo",
        }
    }
}

/// What submitting the drawer amounts to
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// Rejected locally, nothing is sent
    Invalid(String),
    /// Edit mode with no field changed
    Unchanged,
    Send(MutationRequest),
}

pub struct ExerciseForm {
    pub values: ExerciseFormData,
    /// Record as it was when the drawer opened; `None` in create mode
    original: Option<Exercise>,
    pub field: FormField,
    muscle_cursor: usize,
    equipment_cursor: usize,
    /// Mutation in flight; disables submit and delete
    pub pending: Option<MutationKind>,
}

impl Default for ExerciseForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ExerciseForm {
    pub fn new() -> Self {
        Self {
            values: ExerciseFormData::default(),
            original: None,
            field: FormField::Name,
            muscle_cursor: 0,
            equipment_cursor: 0,
            pending: None,
        }
    }

    /// Empty form with the create defaults
    pub fn open_create(&mut self) {
        *self = Self::new();
    }

    /// Form populated from `exercise`, which becomes the diff baseline
    pub fn open_edit(&mut self, exercise: &Exercise) {
        *self = Self::new();
        self.values = ExerciseFormData::from(exercise);
        self.original = Some(exercise.clone());
    }

    pub fn is_edit(&self) -> bool {
        self.original.is_some()
    }

    pub fn original(&self) -> Option<&Exercise> {
        self.original.as_ref()
    }

    pub fn submission(&self) -> Submission {
        if self.values.title.trim().is_empty() {
            return Submission::Invalid("El nombre es obligatorio".to_string());
        }

        match self.original {
            None => Submission::Send(MutationRequest::Create(build_exercise_object(&self.values))),
            Some(ref original) => {
                let patch = build_update_object(&self.values, original);
                if patch.is_empty() {
                    Submission::Unchanged
                } else {
                    Submission::Send(MutationRequest::Update {
                        id: original.id.clone(),
                        patch,
                    })
                }
            }
        }
    }

    /// Delete request for the edited record; `None` in create mode
    pub fn delete_request(&self) -> Option<MutationRequest> {
        self.original.as_ref().map(|e| MutationRequest::Delete { id: e.id.clone() })
    }

    fn text_mut(&mut self) -> Option<&mut String> {
        match self.field {
            FormField::Name => Some(&mut self.values.title),
            FormField::Description => Some(&mut self.values.description),
            FormField::MediaUrl => Some(&mut self.values.media_url),
            _ => None,
        }
    }

    fn move_tag_cursor(&mut self, forward: bool) {
        let (cursor, len) = match self.field {
            FormField::Muscles => (&mut self.muscle_cursor, MUSCLES.len()),
            FormField::Equipments => (&mut self.equipment_cursor, EQUIPMENTS.len()),
            _ => return,
        };
        *cursor = if forward {
            (*cursor + 1) % len
        } else {
            (*cursor + len - 1) % len
        };
    }

    /// Space/arrows on the non-text fields
    fn adjust(&mut self, code: KeyCode) {
        match (self.field, code) {
            (FormField::Difficulty, KeyCode::Left) => {
                self.values.difficulty = self.values.difficulty.prev()
            }
            (FormField::Difficulty, KeyCode::Right | KeyCode::Char(' ')) => {
                self.values.difficulty = self.values.difficulty.next()
            }
            (FormField::Muscles | FormField::Equipments, KeyCode::Left) => {
                self.move_tag_cursor(false)
            }
            (FormField::Muscles | FormField::Equipments, KeyCode::Right) => {
                self.move_tag_cursor(true)
            }
            (FormField::Muscles, KeyCode::Char(' ')) => {
                self.values.toggle_muscle(MUSCLES[self.muscle_cursor].0)
            }
            (FormField::Equipments, KeyCode::Char(' ')) => {
                self.values.toggle_equipment(EQUIPMENTS[self.equipment_cursor].0)
            }
            (FormField::Active, KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')) => {
                self.values.active = !self.values.active
            }
            _ => {}
        }
    }

    fn field_line(&self, field: FormField) -> Vec<Line<'static>> {
        let focused = self.field == field;
        let label_style = if focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if focused { "▶ " } else { "  " };
        let mut lines = vec![Line::from(Span::styled(
            format!("{}{}", marker, field.label()),
            label_style,
        ))];

        let value_style = Style::default().fg(Color::White);
        let cursor = if focused { "_" } else { "" };
        match field {
            FormField::Name => lines.push(Line::from(Span::styled(
                format!("    {}{}", self.values.title, cursor),
                value_style,
            ))),
            FormField::Description => lines.push(Line::from(Span::styled(
                format!("    {}{}", self.values.description, cursor),
                value_style,
            ))),
            FormField::MediaUrl => lines.push(Line::from(Span::styled(
                format!("    {}{}", self.values.media_url, cursor),
                value_style,
            ))),
            FormField::Difficulty => {
                let d = self.values.difficulty;
                lines.push(Line::from(vec![
                    Span::raw("    "),
                    Span::styled(
                        format!("◀ {} {} ▶", "★".repeat(d.stars()), d.label()),
                        Style::default().fg(Color::Yellow),
                    ),
                ]));
            }
            FormField::Active => {
                let (text, color) = if self.values.active {
                    ("● Activo", Color::Green)
                } else {
                    ("● Inactivo", Color::Red)
                };
                lines.push(Line::from(vec![
                    Span::raw("    "),
                    Span::styled(text, Style::default().fg(color)),
                ]));
            }
            FormField::Muscles => lines.push(tag_line(
                MUSCLES,
                &self.values.muscles,
                focused.then_some(self.muscle_cursor),
            )),
            FormField::Equipments => lines.push(tag_line(
                EQUIPMENTS,
                &self.values.equipments,
                focused.then_some(self.equipment_cursor),
            )),
        }
        lines.push(Line::from(""));
        lines
    }

    fn submit_label(&self) -> &'static str {
        match self.pending {
            Some(MutationKind::Create | MutationKind::Update) => "Guardando...",
            _ if self.is_edit() => "Guardar cambios",
            _ => "Crear ejercicio",
        }
    }
}

/// Options as `[x] label` chips; the cursor chip is highlighted
fn tag_line(options: &[LabeledOption], selected: &[String], cursor: Option<usize>) -> Line<'static> {
    let mut spans = vec![Span::raw("    ")];
    for (i, (value, label)) in options.iter().enumerate() {
        let checked = selected.iter().any(|s| s == value);
        let mut style = if checked {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        if cursor == Some(i) {
            style = style.bg(Color::Blue).fg(Color::White);
        }
        let mark = if checked { "[x]" } else { "[ ]" };
        spans.push(Span::styled(format!("{} {}", mark, label), style));
        spans.push(Span::raw("  "));
    }
    Line::from(spans)
}

impl Component for ExerciseForm {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            let action = match key.code {
                KeyCode::Char('s') if self.pending.is_none() => Some(Action::SubmitForm),
                KeyCode::Char('d') if self.pending.is_none() && self.is_edit() => {
                    Some(Action::RequestDelete)
                }
                _ => None,
            };
            return Ok(action);
        }

        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Enter => self.pending.is_none().then_some(Action::SubmitForm),
            KeyCode::Tab | KeyCode::Down => {
                self.field = self.field.next();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.field = self.field.prev();
                None
            }
            KeyCode::Backspace => {
                if let Some(text) = self.text_mut() {
                    text.pop();
                }
                None
            }
            KeyCode::Char(c) => {
                if let Some(text) = self.text_mut() {
                    text.push(c);
                } else {
                    self.adjust(key.code);
                }
                None
            }
            KeyCode::Left | KeyCode::Right => {
                self.adjust(key.code);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let drawer = drawer_area(area, 56, 45);
        frame.render_widget(Clear, drawer);

        let title = if self.is_edit() {
            " Editando ejercicio "
        } else {
            " Crear nuevo ejercicio "
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(drawer);
        frame.render_widget(block, drawer);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(inner);

        let lines: Vec<Line> = FormField::ORDER
            .iter()
            .flat_map(|f| self.field_line(*f))
            .collect();
        let fields = Paragraph::new(lines).wrap(Wrap { trim: false });
        frame.render_widget(fields, chunks[0]);

        let enabled = self.pending.is_none();
        let button = |label: &'static str, key: &'static str, color: Color, on: bool| {
            let style = if on {
                Style::default().fg(color).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            vec![
                Span::styled(format!(" {} ", key), style),
                Span::styled(label, style),
                Span::raw("   "),
            ]
        };

        let mut spans = button(self.submit_label(), "Ctrl+s", Color::Green, enabled);
        if self.is_edit() {
            let delete_label = if self.pending == Some(MutationKind::Delete) {
                "Eliminando..."
            } else {
                "Eliminar ejercicio"
            };
            spans.extend(button(delete_label, "Ctrl+d", Color::Red, enabled));
        }
        spans.extend(button("Cerrar", "Esc", Color::Yellow, true));

        let footer = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::TOP));
        frame.render_widget(footer, chunks[1]);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::exercise::{Difficulty, ExercisePatch};
    use crate::services::api::fake::sample;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(form: &mut ExerciseForm, text: &str) {
        for c in text.chars() {
            form.handle_key_event(key(KeyCode::Char(c))).unwrap();
        }
    }

    #[test]
    fn test_create_defaults() {
        let mut form = ExerciseForm::new();
        form.open_create();
        assert!(!form.is_edit());
        assert_eq!(form.values.difficulty, Difficulty::Beginner);
        assert!(form.values.active);
        assert!(form.delete_request().is_none());
    }

    #[test]
    fn test_blank_name_is_invalid() {
        let mut form = ExerciseForm::new();
        type_text(&mut form, "   ");
        assert!(matches!(form.submission(), Submission::Invalid(_)));
    }

    #[test]
    fn test_create_submission_builds_full_record() {
        let mut form = ExerciseForm::new();
        type_text(&mut form, "Sentadilla ");
        form.handle_key_event(key(KeyCode::Tab)).unwrap();
        form.handle_key_event(key(KeyCode::Tab)).unwrap();
        assert_eq!(form.field, FormField::Difficulty);
        form.handle_key_event(key(KeyCode::Right)).unwrap();
        form.handle_key_event(key(KeyCode::Tab)).unwrap();
        form.handle_key_event(key(KeyCode::Char(' '))).unwrap();

        match form.submission() {
            Submission::Send(MutationRequest::Create(payload)) => {
                assert_eq!(payload.name, "Sentadilla");
                assert_eq!(payload.difficulty, Difficulty::Intermediate);
                assert_eq!(payload.muscle_groups, vec![MUSCLES[0].0.to_string()]);
                assert!(payload.active);
                assert_eq!(payload.media_url, None);
            }
            other => panic!("unexpected submission: {:?}", other),
        }
    }

    #[test]
    fn test_unchanged_edit_sends_nothing() {
        let mut form = ExerciseForm::new();
        form.open_edit(&sample("ex-1", "Press banca"));
        assert!(form.is_edit());
        assert_eq!(form.submission(), Submission::Unchanged);
    }

    #[test]
    fn test_edit_sends_only_changed_fields() {
        let mut form = ExerciseForm::new();
        form.open_edit(&sample("ex-1", "Press banca"));
        form.field = FormField::Difficulty;
        form.handle_key_event(key(KeyCode::Right)).unwrap();

        assert_eq!(
            form.submission(),
            Submission::Send(MutationRequest::Update {
                id: "ex-1".to_string(),
                patch: ExercisePatch {
                    difficulty: Some(Difficulty::Intermediate),
                    ..Default::default()
                },
            })
        );
    }

    #[test]
    fn test_snapshot_is_kept_while_editing() {
        let mut form = ExerciseForm::new();
        form.open_edit(&sample("ex-1", "Press banca"));
        type_text(&mut form, " inclinado");
        assert_eq!(form.original().unwrap().name, "Press banca");
        assert_eq!(form.values.title, "Press banca inclinado");
    }

    #[test]
    fn test_pending_disables_submit_and_delete() {
        let mut form = ExerciseForm::new();
        form.open_edit(&sample("ex-1", "Press banca"));
        assert_eq!(form.handle_key_event(ctrl('d')).unwrap(), Some(Action::RequestDelete));

        form.pending = Some(MutationKind::Update);
        assert_eq!(form.handle_key_event(ctrl('s')).unwrap(), None);
        assert_eq!(form.handle_key_event(key(KeyCode::Enter)).unwrap(), None);
        assert_eq!(form.handle_key_event(ctrl('d')).unwrap(), None);
        assert_eq!(form.submit_label(), "Guardando...");
    }

    #[test]
    fn test_delete_only_in_edit_mode() {
        let mut form = ExerciseForm::new();
        assert_eq!(form.handle_key_event(ctrl('d')).unwrap(), None);
        form.open_edit(&sample("ex-9", "Dominadas"));
        assert_eq!(
            form.delete_request(),
            Some(MutationRequest::Delete {
                id: "ex-9".to_string()
            })
        );
    }

    #[test]
    fn test_active_toggle_and_tag_cursor_wraps() {
        let mut form = ExerciseForm::new();
        form.field = FormField::Active;
        form.handle_key_event(key(KeyCode::Char(' '))).unwrap();
        assert!(!form.values.active);

        form.field = FormField::Equipments;
        form.handle_key_event(key(KeyCode::Left)).unwrap();
        form.handle_key_event(key(KeyCode::Char(' '))).unwrap();
        assert_eq!(
            form.values.equipments,
            vec![EQUIPMENTS[EQUIPMENTS.len() - 1].0.to_string()]
        );
    }
}
