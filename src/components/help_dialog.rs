//! Help dialog component
//!
//! Displays all keyboard shortcuts available in the application.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

/// Help dialog showing all keyboard shortcuts
#[derive(Default)]
pub struct HelpDialog {
    pub scroll_offset: usize,
}

impl Component for HelpDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Some(Action::CloseModal),
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll_offset = self.scroll_offset.saturating_add(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
                None
            }
            KeyCode::PageDown => {
                self.scroll_offset = self.scroll_offset.saturating_add(10);
                None
            }
            KeyCode::PageUp => {
                self.scroll_offset = self.scroll_offset.saturating_sub(10);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        frame.render_widget(Clear, area);

        let dialog_area = centered_popup(area, 64, area.height.saturating_sub(4));

        let content = build_help_content();
        let total = content.len();
        let visible_height = dialog_area.height.saturating_sub(2) as usize;

        // Clamp scroll offset
        let max_scroll = total.saturating_sub(visible_height);
        if self.scroll_offset > max_scroll {
            self.scroll_offset = max_scroll;
        }

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Atajos de teclado ")
                    .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .scroll((self.scroll_offset as u16, 0));

        frame.render_widget(paragraph, dialog_area);

        // Render scrollbar if content exceeds visible area
        if total > visible_height {
            let mut scrollbar_state =
                ScrollbarState::new(total.saturating_sub(visible_height)).position(self.scroll_offset);

            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("↑"))
                    .end_symbol(Some("↓")),
                dialog_area.inner(ratatui::layout::Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }

        Ok(())
    }
}

/// Shortcut reference, grouped by screen area
fn build_help_content() -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    // Helper to add a section header
    let add_section = |lines: &mut Vec<Line<'static>>, title: &str| {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {} ", title),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            format!("  {}", "─".repeat(title.len() + 2)),
            Style::default().fg(Color::DarkGray),
        )));
    };

    // Helper to add a shortcut line
    let add_shortcut = |lines: &mut Vec<Line<'static>>, key: &str, description: &str| {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:15}", key),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(description.to_string(), Style::default().fg(Color::White)),
        ]));
    };

    add_section(&mut lines, "Tabla");
    add_shortcut(&mut lines, "j / ↓", "Siguiente fila");
    add_shortcut(&mut lines, "k / ↑", "Fila anterior");
    add_shortcut(&mut lines, "g / G", "Primera / última fila");
    add_shortcut(&mut lines, "Enter / e", "Editar ejercicio seleccionado");
    add_shortcut(&mut lines, "n", "Nuevo ejercicio");

    add_section(&mut lines, "Paginación");
    add_shortcut(&mut lines, "→ / l", "Página siguiente");
    add_shortcut(&mut lines, "← / h", "Página anterior");
    add_shortcut(&mut lines, "] / [", "Más / menos filas por página");

    add_section(&mut lines, "Búsqueda y filtros");
    add_shortcut(&mut lines, "/", "Escribir en el buscador");
    add_shortcut(&mut lines, "Esc / Enter", "Salir del buscador");
    add_shortcut(&mut lines, "f", "Abrir filtros");
    add_shortcut(&mut lines, "x", "Limpiar filtros");

    add_section(&mut lines, "Formulario");
    add_shortcut(&mut lines, "Tab", "Campo siguiente");
    add_shortcut(&mut lines, "Shift+Tab", "Campo anterior");
    add_shortcut(&mut lines, "← / →", "Cambiar dificultad / mover en etiquetas");
    add_shortcut(&mut lines, "Espacio", "Marcar etiqueta / cambiar estado");
    add_shortcut(&mut lines, "Enter / Ctrl+s", "Guardar");
    add_shortcut(&mut lines, "Ctrl+d", "Eliminar (solo edición)");
    add_shortcut(&mut lines, "Esc", "Cerrar sin guardar");

    add_section(&mut lines, "General");
    add_shortcut(&mut lines, "R", "Recargar listado");
    add_shortcut(&mut lines, "L", "Cerrar sesión");
    add_shortcut(&mut lines, "?", "Mostrar esta ayuda");
    add_shortcut(&mut lines, "q", "Salir / cerrar diálogo");

    // Footer
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Pulsa q, Esc o ? para cerrar",
        Style::default().fg(Color::DarkGray),
    )));

    lines
}
