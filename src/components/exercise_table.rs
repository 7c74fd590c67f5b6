//! Exercise table component
//!
//! Renders one page of the listing with its pagination footer. The table
//! only owns the row cursor; rows, totals and request state are lent by the
//! App on every draw.

use crate::action::Action;
use crate::component::Component;
use crate::model::catalog::{first_label, EQUIPMENTS, MUSCLES};
use crate::model::exercise::{Difficulty, Exercise};
use crate::model::page::PageWindow;
use anyhow::Result;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Column headers, in display order
pub const COLUMNS: [&str; 6] = [
    "Nombre",
    "Músculo principal",
    "Equipamiento principal",
    "Dificultad",
    "Visualización",
    "Fecha de creación",
];

/// Placeholder rows drawn while the first page loads
pub const SKELETON_ROWS: usize = 8;

pub const LOAD_ERROR: &str = "Ocurrió un error cargando los datos.";
pub const EMPTY_MESSAGE: &str = "No se encontraron resultados";

/// What the table body shows
#[derive(Debug, Clone, Copy)]
pub enum TableBody<'a> {
    Loading,
    Error(&'a str),
    Rows(&'a [Exercise]),
}

/// Everything needed to draw the table
pub struct TableView<'a> {
    pub body: TableBody<'a>,
    pub page: &'a PageWindow,
    /// Background refetch of data already on screen
    pub refreshing: bool,
}

/// `★★ Intermedio`
pub fn difficulty_cell(difficulty: Difficulty) -> String {
    format!("{} {}", "★".repeat(difficulty.stars()), difficulty.label())
}

pub fn status_cell(active: bool) -> (&'static str, Color) {
    if active {
        ("● Activo", Color::Green)
    } else {
        ("● Inactivo", Color::Red)
    }
}

fn row_for(exercise: &Exercise) -> Row<'_> {
    let (status, status_color) = status_cell(exercise.active);
    Row::new(vec![
        Cell::from(exercise.name.as_str()),
        Cell::from(first_label(MUSCLES, &exercise.muscle_groups)),
        Cell::from(first_label(EQUIPMENTS, &exercise.equipments)),
        Cell::from(Span::styled(
            difficulty_cell(exercise.difficulty),
            Style::default().fg(Color::Yellow),
        )),
        Cell::from(Span::styled(status, Style::default().fg(status_color))),
        Cell::from(Span::styled(
            exercise.formatted_created_at(),
            Style::default().fg(Color::DarkGray),
        )),
    ])
}

/// Widths sized to the longest name on the page
fn column_widths(rows: &[Exercise]) -> [Constraint; 6] {
    let name_width = rows
        .iter()
        .map(|e| e.name.width())
        .max()
        .unwrap_or(0)
        .clamp(COLUMNS[0].width(), 40) as u16;
    [
        Constraint::Length(name_width),
        Constraint::Min(12),
        Constraint::Min(12),
        Constraint::Length(18),
        Constraint::Length(14),
        Constraint::Length(18),
    ]
}

/// `Mostrar N por página · T ejercicios encontrados`
pub fn page_summary(page: &PageWindow) -> String {
    format!(
        "Mostrar {} por página · {} ejercicios encontrados",
        page.page_size, page.total
    )
}

pub fn page_position(page: &PageWindow) -> String {
    format!("Página {} de {}", page.page, page.total_pages())
}

/// Row cursor over the current page
#[derive(Default)]
pub struct ExerciseTable {
    pub table_state: TableState,
    row_count: usize,
}

impl ExerciseTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.table_state.selected()
    }

    /// Exercise under the cursor
    pub fn selected<'a>(&self, rows: &'a [Exercise]) -> Option<&'a Exercise> {
        self.selected_index().and_then(|i| rows.get(i))
    }

    /// Keep the cursor inside the rows currently shown
    pub fn set_row_count(&mut self, count: usize) {
        self.row_count = count;
        match self.table_state.selected() {
            _ if count == 0 => self.table_state.select(None),
            None => self.table_state.select(Some(0)),
            Some(i) if i >= count => self.table_state.select(Some(count - 1)),
            Some(_) => {}
        }
    }

    /// Back to the first row, e.g. after a page change
    pub fn reset_selection(&mut self) {
        self.table_state
            .select(if self.row_count > 0 { Some(0) } else { None });
    }

    fn select_next(&mut self) {
        if let Some(i) = self.table_state.selected() {
            if i + 1 < self.row_count {
                self.table_state.select(Some(i + 1));
            }
        }
    }

    fn select_prev(&mut self) {
        if let Some(i) = self.table_state.selected() {
            self.table_state.select(Some(i.saturating_sub(1)));
        }
    }

    fn select_last(&mut self) {
        if self.row_count > 0 {
            self.table_state.select(Some(self.row_count - 1));
        }
    }

    pub fn draw_with_view(&mut self, frame: &mut Frame, area: Rect, view: &TableView) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(2)])
            .split(area);

        let mut title = " Ejercicios ".to_string();
        if view.refreshing {
            title.push_str("(actualizando...) ");
        }
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(Color::DarkGray));

        match view.body {
            TableBody::Loading => render_skeleton(frame, chunks[0], block),
            TableBody::Error(message) => {
                let paragraph = Paragraph::new(vec![
                    Line::from(""),
                    Line::from(Span::styled(
                        LOAD_ERROR,
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        message.to_string(),
                        Style::default().fg(Color::DarkGray),
                    )),
                    Line::from(""),
                    Line::from(Span::styled(
                        "Pulsa R para reintentar",
                        Style::default().fg(Color::Yellow),
                    )),
                ])
                .alignment(Alignment::Center)
                .block(block);
                frame.render_widget(paragraph, chunks[0]);
            }
            TableBody::Rows([]) => {
                let paragraph = Paragraph::new(vec![
                    Line::from(""),
                    Line::from(Span::styled(
                        EMPTY_MESSAGE,
                        Style::default().fg(Color::DarkGray),
                    )),
                ])
                .alignment(Alignment::Center)
                .block(block);
                frame.render_widget(paragraph, chunks[0]);
            }
            TableBody::Rows(rows) => {
                let header = Row::new(COLUMNS.iter().map(|h| Cell::from(*h))).style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                );
                let table = Table::new(rows.iter().map(row_for), column_widths(rows))
                    .header(header)
                    .block(block)
                    .highlight_style(
                        Style::default()
                            .bg(Color::Blue)
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    )
                    .highlight_symbol("▶ ");
                frame.render_stateful_widget(table, chunks[0], &mut self.table_state);
            }
        }

        render_footer(frame, chunks[1], view.page);
    }
}

fn render_skeleton(frame: &mut Frame, area: Rect, block: Block) {
    let bar = Style::default().fg(Color::DarkGray);
    let header = Row::new(COLUMNS.iter().map(|_| Cell::from("▒▒▒▒▒▒▒▒"))).style(bar);
    let rows = (0..SKELETON_ROWS)
        .map(|_| Row::new(COLUMNS.iter().map(|_| Cell::from("░░░░░░░░░░"))).style(bar));
    let widths = [Constraint::Ratio(1, COLUMNS.len() as u32); 6];
    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}

fn render_footer(frame: &mut Frame, area: Rect, page: &PageWindow) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let summary = Paragraph::new(vec![
        Line::from(Span::styled(
            format!(" {}", page_summary(page)),
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            " [ / ] cambiar tamaño de página",
            Style::default().fg(Color::DarkGray),
        )),
    ]);
    frame.render_widget(summary, halves[0]);

    let control = |enabled: bool, symbol: &'static str| {
        if enabled {
            Span::styled(
                symbol,
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(symbol, Style::default().fg(Color::DarkGray))
        }
    };
    let position = Paragraph::new(vec![
        Line::from(vec![
            control(page.has_prev(), " ◀ "),
            Span::styled(
                page_position(page),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            control(page.has_next(), " ▶ "),
        ]),
        Line::from(Span::styled(
            "← / → cambiar página ",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Right);
    frame.render_widget(position, halves[1]);
}

impl Component for ExerciseTable {
    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::NextItem => self.select_next(),
            Action::PrevItem => self.select_prev(),
            Action::FirstItem => self.reset_selection(),
            Action::LastItem => self.select_last(),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing needs the listing; see draw_with_view
        Ok(())
    }
}
