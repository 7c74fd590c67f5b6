//! Yes/no confirmation dialog
//!
//! Used for quitting and for deleting an exercise. `y` emits the confirm
//! action of the dialog, `n`/Esc closes it.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub struct ConfirmDialog {
    title: String,
    message: String,
    confirm_label: String,
    on_confirm: Action,
    accent: Color,
}

impl ConfirmDialog {
    pub fn quit() -> Self {
        Self {
            title: " ¿Salir? ".to_string(),
            message: "¿Seguro que quieres salir?".to_string(),
            confirm_label: "Sí, salir".to_string(),
            on_confirm: Action::ForceQuit,
            accent: Color::Yellow,
        }
    }

    pub fn delete(exercise_name: &str) -> Self {
        Self {
            title: " Eliminar ejercicio ".to_string(),
            message: format!(
                "¿Eliminar \"{}\"? Esta acción no se puede deshacer.",
                exercise_name
            ),
            confirm_label: "Sí, eliminar".to_string(),
            on_confirm: Action::ConfirmDelete,
            accent: Color::Red,
        }
    }
}

impl Component for ConfirmDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(self.on_confirm.clone()),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::CloseModal),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_area = centered_popup(area, 50, 8);

        frame.render_widget(Clear, popup_area);

        let content = vec![
            Line::from(""),
            Line::from(Span::styled(
                self.message.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    " y ",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("{}  ", self.confirm_label)),
                Span::styled(
                    " n/Esc ",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::raw("Cancelar"),
            ]),
        ];

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.accent))
                    .title(self.title.clone())
                    .title_style(
                        Style::default()
                            .fg(self.accent)
                            .add_modifier(Modifier::BOLD),
                    ),
            )
            .wrap(Wrap { trim: true })
            .alignment(ratatui::layout::Alignment::Center);

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(dialog: &mut ConfirmDialog, code: KeyCode) -> Option<Action> {
        dialog
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    #[test]
    fn test_quit_dialog_keys() {
        let mut dialog = ConfirmDialog::quit();
        assert_eq!(press(&mut dialog, KeyCode::Char('y')), Some(Action::ForceQuit));
        assert_eq!(press(&mut dialog, KeyCode::Esc), Some(Action::CloseModal));
        assert_eq!(press(&mut dialog, KeyCode::Char('x')), None);
    }

    #[test]
    fn test_delete_dialog_confirms_delete() {
        let mut dialog = ConfirmDialog::delete("Sentadilla");
        assert!(dialog.message.contains("Sentadilla"));
        assert_eq!(
            press(&mut dialog, KeyCode::Char('Y')),
            Some(Action::ConfirmDelete)
        );
    }
}
