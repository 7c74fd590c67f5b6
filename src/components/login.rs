//! Login screen component
//!
//! E-mail and password form shown before the main screen. The e-mail format
//! is checked locally; the credentials are sent by the App.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

/// Login form
pub struct LoginComponent {
    pub email: String,
    pub password: String,
    pub focus: LoginField,
    /// Validation or server error shown under the form
    pub error: Option<String>,
    /// Credentials are on their way to the server
    pub pending: bool,
}

impl Default for LoginComponent {
    fn default() -> Self {
        Self::new(None)
    }
}

impl LoginComponent {
    /// Form prefilled with the last used e-mail, focused on what is missing
    pub fn new(last_email: Option<String>) -> Self {
        let email = last_email.unwrap_or_default();
        let focus = if email.is_empty() {
            LoginField::Email
        } else {
            LoginField::Password
        };
        Self {
            email,
            password: String::new(),
            focus,
            error: None,
            pending: false,
        }
    }

    /// Back to an empty password after logout
    pub fn reset(&mut self) {
        self.password.clear();
        self.error = None;
        self.pending = false;
        self.focus = if self.email.is_empty() {
            LoginField::Email
        } else {
            LoginField::Password
        };
    }

    pub fn set_pending(&mut self) {
        self.pending = true;
        self.error = None;
    }

    pub fn fail(&mut self, message: String) {
        self.pending = false;
        self.password.clear();
        self.focus = LoginField::Password;
        self.error = Some(message);
    }

    fn validate(&mut self) -> bool {
        self.error = None;
        let email = self.email.trim();
        if email.is_empty() {
            self.error = Some("El correo es obligatorio".to_string());
            self.focus = LoginField::Email;
            return false;
        }
        if !is_valid_email(email) {
            self.error = Some("Introduce un correo válido".to_string());
            self.focus = LoginField::Email;
            return false;
        }
        if self.password.is_empty() {
            self.error = Some("La contraseña es obligatoria".to_string());
            self.focus = LoginField::Password;
            return false;
        }
        true
    }

    fn submit(&mut self) -> Option<Action> {
        if self.pending || !self.validate() {
            return None;
        }
        Some(Action::SubmitLogin {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }

    fn input_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
    }
}

impl Component for LoginComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.pending {
            return Ok(None);
        }
        let action = match key.code {
            KeyCode::Esc => Some(Action::ForceQuit),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.toggle_focus();
                None
            }
            KeyCode::Enter => {
                if self.focus == LoginField::Email && self.password.is_empty() {
                    self.focus = LoginField::Password;
                    None
                } else {
                    self.submit()
                }
            }
            KeyCode::Backspace => {
                self.input_mut().pop();
                self.error = None;
                None
            }
            KeyCode::Char(c) => {
                self.input_mut().push(c);
                self.error = None;
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        frame.render_widget(Clear, area);

        let form_area = centered_popup(area, 60, 16);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(8),    // Form
                Constraint::Length(3), // Help
            ])
            .split(form_area);

        let title = Paragraph::new(Line::from(Span::styled(
            " Flexia · Administración ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(ratatui::layout::Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let field = |label: &str, value: String, focused: bool| {
            let style = if focused {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(vec![
                Span::styled(
                    format!("{} {:<12}", if focused { ">" } else { " " }, label),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(
                    if focused { format!("{}_", value) } else { value },
                    style,
                ),
            ])
        };

        let mut lines = vec![
            Line::from(""),
            field(
                "Correo",
                self.email.clone(),
                self.focus == LoginField::Email,
            ),
            Line::from(""),
            field(
                "Contraseña",
                "•".repeat(self.password.chars().count()),
                self.focus == LoginField::Password,
            ),
            Line::from(""),
        ];

        if self.pending {
            lines.push(Line::from(Span::styled(
                "Iniciando sesión...",
                Style::default().fg(Color::Yellow),
            )));
        } else if let Some(ref error) = self.error {
            lines.push(Line::from(Span::styled(
                format!("Error: {}", error),
                Style::default().fg(Color::Red),
            )));
        }

        let form = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Iniciar sesión ")
                .border_style(Style::default().fg(Color::Cyan)),
        );
        frame.render_widget(form, chunks[1]);

        let help = Paragraph::new(Line::from(Span::styled(
            " Enter  Entrar   Tab  Cambiar campo   Esc  Salir",
            Style::default().fg(Color::DarkGray),
        )))
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[2]);

        Ok(())
    }
}
