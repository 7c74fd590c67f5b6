//! Filter panel component
//!
//! Three option lists side by side (muscle group, difficulty, equipment).
//! Each list starts with "Todos", which unsets that axis. Picking an option
//! is applied right away; the panel stays open until closed.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::catalog::{EQUIPMENTS, MUSCLES};
use crate::model::exercise::Difficulty;
use crate::model::filters::FilterSelection;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

const ALL_LABEL: &str = "Todos";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterAxis {
    Muscle,
    Difficulty,
    Equipment,
}

impl FilterAxis {
    const ORDER: [FilterAxis; 3] = [
        FilterAxis::Muscle,
        FilterAxis::Difficulty,
        FilterAxis::Equipment,
    ];

    fn index(self) -> usize {
        match self {
            FilterAxis::Muscle => 0,
            FilterAxis::Difficulty => 1,
            FilterAxis::Equipment => 2,
        }
    }

    fn title(self) -> &'static str {
        match self {
            FilterAxis::Muscle => " Grupo muscular ",
            FilterAxis::Difficulty => " Dificultad ",
            FilterAxis::Equipment => " Equipamiento ",
        }
    }

    /// Number of options, "Todos" included
    fn len(self) -> usize {
        1 + match self {
            FilterAxis::Muscle => MUSCLES.len(),
            FilterAxis::Difficulty => Difficulty::all().len(),
            FilterAxis::Equipment => EQUIPMENTS.len(),
        }
    }
}

/// Filter panel
pub struct FilterDialog {
    focused: FilterAxis,
    /// Cursor per axis; 0 is "Todos"
    cursors: [usize; 3],
    list_states: [ListState; 3],
    /// Selection currently held by the filter store
    current: FilterSelection,
}

impl Default for FilterDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterDialog {
    pub fn new() -> Self {
        Self {
            focused: FilterAxis::Muscle,
            cursors: [0; 3],
            list_states: Default::default(),
            current: FilterSelection::default(),
        }
    }

    /// Reset the panel to the store's selection when it is opened
    pub fn open(&mut self, selection: &FilterSelection) {
        self.focused = FilterAxis::Muscle;
        self.sync(selection);
        self.cursors = [
            position_in(MUSCLES, selection.muscle_group.as_deref()),
            selection
                .difficulty
                .and_then(|d| Difficulty::all().iter().position(|x| *x == d))
                .map_or(0, |i| i + 1),
            position_in(EQUIPMENTS, selection.equipment.as_deref()),
        ];
    }

    /// Track the store's selection for the active markers
    pub fn sync(&mut self, selection: &FilterSelection) {
        self.current = selection.clone();
    }

    fn cursor(&self) -> usize {
        self.cursors[self.focused.index()]
    }

    fn move_cursor(&mut self, down: bool) {
        let idx = self.focused.index();
        let max = self.focused.len() - 1;
        let cursor = &mut self.cursors[idx];
        if down && *cursor < max {
            *cursor += 1;
        } else if !down && *cursor > 0 {
            *cursor -= 1;
        }
    }

    fn focus_next(&mut self) {
        self.focused = FilterAxis::ORDER[(self.focused.index() + 1) % 3];
    }

    fn focus_prev(&mut self) {
        self.focused = FilterAxis::ORDER[(self.focused.index() + 2) % 3];
    }

    /// Action writing the option under the cursor of the focused axis
    fn pick(&self) -> Action {
        let cursor = self.cursor();
        match self.focused {
            FilterAxis::Muscle => Action::SetMuscleFilter(option_value(MUSCLES, cursor)),
            FilterAxis::Difficulty => Action::SetDifficultyFilter(
                cursor
                    .checked_sub(1)
                    .and_then(|i| Difficulty::all().get(i).copied()),
            ),
            FilterAxis::Equipment => Action::SetEquipmentFilter(option_value(EQUIPMENTS, cursor)),
        }
    }

    fn axis_items(&self, axis: FilterAxis) -> Vec<ListItem<'static>> {
        let (labels, active): (Vec<&'static str>, Option<usize>) = match axis {
            FilterAxis::Muscle => (
                MUSCLES.iter().map(|(_, l)| *l).collect(),
                self.current
                    .muscle_group
                    .as_deref()
                    .and_then(|v| MUSCLES.iter().position(|(o, _)| *o == v)),
            ),
            FilterAxis::Difficulty => (
                Difficulty::all().iter().map(|d| d.label()).collect(),
                self.current
                    .difficulty
                    .and_then(|d| Difficulty::all().iter().position(|x| *x == d)),
            ),
            FilterAxis::Equipment => (
                EQUIPMENTS.iter().map(|(_, l)| *l).collect(),
                self.current
                    .equipment
                    .as_deref()
                    .and_then(|v| EQUIPMENTS.iter().position(|(o, _)| *o == v)),
            ),
        };

        let marker = |is_current: bool| {
            Span::styled(
                if is_current { "● " } else { "  " },
                Style::default().fg(Color::Green),
            )
        };

        let mut items = vec![ListItem::new(Line::from(vec![
            marker(active.is_none()),
            Span::styled(ALL_LABEL, Style::default().fg(Color::DarkGray)),
        ]))];

        for (i, label) in labels.into_iter().enumerate() {
            let is_current = active == Some(i);
            items.push(ListItem::new(Line::from(vec![
                marker(is_current),
                Span::styled(
                    label,
                    if is_current {
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::White)
                    },
                ),
            ])));
        }
        items
    }
}

fn position_in(options: &[(&str, &str)], value: Option<&str>) -> usize {
    value
        .and_then(|v| options.iter().position(|(o, _)| *o == v))
        .map_or(0, |i| i + 1)
}

fn option_value(options: &[(&str, &str)], cursor: usize) -> Option<String> {
    cursor
        .checked_sub(1)
        .and_then(|i| options.get(i))
        .map(|(value, _)| value.to_string())
}

impl Component for FilterDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('f') | KeyCode::Char('q') => Some(Action::CloseModal),
            KeyCode::Enter | KeyCode::Char(' ') => Some(self.pick()),
            KeyCode::Char('c') => Some(Action::ClearFilters),
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_cursor(false);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_cursor(true);
                None
            }
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => {
                self.focus_next();
                None
            }
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
                self.focus_prev();
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_height = (FilterAxis::Muscle.len() as u16 + 8).min(area.height.saturating_sub(2));
        let popup_area = centered_popup(area, 90, popup_height);
        frame.render_widget(Clear, popup_area);

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(3),    // Option lists
                Constraint::Length(3), // Help bar
            ])
            .split(popup_area);

        let header_text = if self.current.is_active() {
            format!("Activos: {}", self.current.describe())
        } else {
            "Sin filtros activos".to_string()
        };
        let header = Paragraph::new(Line::from(Span::styled(
            header_text,
            Style::default().fg(Color::Cyan),
        )))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Filtros ")
                .title_style(
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ),
        );
        frame.render_widget(header, main_chunks[0]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(36),
                Constraint::Percentage(28),
                Constraint::Percentage(36),
            ])
            .split(main_chunks[1]);

        for axis in FilterAxis::ORDER {
            let idx = axis.index();
            let focused = axis == self.focused;
            let border = if focused { Color::Cyan } else { Color::DarkGray };

            let list = List::new(self.axis_items(axis))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(border))
                        .title(axis.title()),
                )
                .highlight_style(if focused {
                    Style::default()
                        .bg(Color::Blue)
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().add_modifier(Modifier::BOLD)
                })
                .highlight_symbol("▶ ");

            self.list_states[idx].select(Some(self.cursors[idx]));
            frame.render_stateful_widget(list, columns[idx], &mut self.list_states[idx]);
        }

        let help = Paragraph::new(Line::from(vec![
            Span::styled(" Enter ", Style::default().fg(Color::Yellow)),
            Span::raw("Aplicar  "),
            Span::styled(" j/k ", Style::default().fg(Color::Cyan)),
            Span::raw("Mover  "),
            Span::styled(" Tab/←/→ ", Style::default().fg(Color::Cyan)),
            Span::raw("Columna  "),
            Span::styled(" c ", Style::default().fg(Color::Yellow)),
            Span::raw("Limpiar  "),
            Span::styled(" Esc ", Style::default().fg(Color::Yellow)),
            Span::raw("Cerrar"),
        ]))
        .alignment(ratatui::layout::Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, main_chunks[2]);

        Ok(())
    }
}
