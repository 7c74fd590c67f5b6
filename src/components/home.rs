//! Home component - Main application screen
//!
//! Header, search box, active filter chips, the exercise table, the status
//! bar and the help bar. Owns keyboard focus; listing state is lent by the
//! App at draw time.

use crate::action::Action;
use crate::component::Component;
use crate::components::calculate_main_layout;
use crate::components::exercise_table::{ExerciseTable, TableView};
use crate::model::catalog::{label_for, EQUIPMENTS, MUSCLES};
use crate::model::filters::FilterSelection;
use crate::model::notice::Notice;
use crate::model::ui::Focus;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub const WELCOME: &str = "Bienvenid@ a Flexia Experts";
pub const SEARCH_PLACEHOLDER: &str = "Buscar por nombre";

// ═══════════════════════════════════════════════════════════════════════════════
// Home Component
// ═══════════════════════════════════════════════════════════════════════════════

/// Main screen key handling
#[derive(Default)]
pub struct HomeComponent {
    /// Whether typed characters go to the table shortcuts or the search box
    pub focus: Focus,
}

impl HomeComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_searching(&self) -> bool {
        self.focus == Focus::Search
    }

    fn search_key(&self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Tab | KeyCode::Down => {
                Some(Action::BlurSearch)
            }
            KeyCode::Backspace => Some(Action::SearchBackspace),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::SearchInput(c))
            }
            _ => None,
        }
    }

    fn table_key(&self, key: KeyEvent) -> Option<Action> {
        match key.code {
            // Rows
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextItem),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevItem),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::FirstItem),
            KeyCode::Char('G') | KeyCode::End => Some(Action::LastItem),

            // Pages
            KeyCode::Char('l') | KeyCode::Right | KeyCode::PageDown => Some(Action::NextPage),
            KeyCode::Char('h') | KeyCode::Left | KeyCode::PageUp => Some(Action::PrevPage),
            KeyCode::Char(']') => Some(Action::PageSizeUp),
            KeyCode::Char('[') => Some(Action::PageSizeDown),

            // Search and filters
            KeyCode::Char('/') => Some(Action::FocusSearch),
            KeyCode::Char('f') => Some(Action::OpenFilters),
            KeyCode::Char('x') => Some(Action::ClearFilters),

            // Exercises
            KeyCode::Char('n') => Some(Action::NewExercise),
            KeyCode::Enter | KeyCode::Char('e') => Some(Action::EditSelected),

            // Session
            KeyCode::Char('R') => Some(Action::Refresh),
            KeyCode::Char('L') => Some(Action::Logout),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),

            _ => None,
        }
    }
}

impl Component for HomeComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match self.focus {
            Focus::Search => self.search_key(key),
            Focus::Table => self.table_key(key),
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::FocusSearch => self.focus = Focus::Search,
            Action::BlurSearch => self.focus = Focus::Table,
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing is done through draw_home_screen which takes full context
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering Functions
// ═══════════════════════════════════════════════════════════════════════════════

/// Context needed for rendering the home screen
pub struct HomeRenderContext<'a> {
    /// Text in the search box, settled or not
    pub search_input: &'a str,
    /// A search is waiting for the debounce timer
    pub settling: bool,
    pub filters: &'a FilterSelection,
    pub user_email: Option<&'a str>,
    pub notice: Option<&'a Notice>,
    pub table: TableView<'a>,
}

/// Draw the home screen
pub fn draw_home_screen(
    frame: &mut Frame,
    area: Rect,
    home: &HomeComponent,
    table: &mut ExerciseTable,
    ctx: &HomeRenderContext,
) -> Result<()> {
    let layout = calculate_main_layout(area, ctx.notice.is_some());

    render_header(frame, layout.header, ctx.user_email);
    render_search(frame, layout.search, home, ctx);
    render_filter_chips(frame, layout.filters, ctx.filters);
    table.draw_with_view(frame, layout.table, &ctx.table);

    if let (Some(status_area), Some(notice)) = (layout.status, ctx.notice) {
        render_notice(frame, status_area, notice);
    }
    render_help_bar(frame, layout.help, home);

    Ok(())
}

fn render_header(frame: &mut Frame, area: Rect, user_email: Option<&str>) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let title = Paragraph::new(Line::from(Span::styled(
        format!(" {}", WELCOME),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(title, halves[0]);

    if let Some(email) = user_email {
        let user = Paragraph::new(Line::from(Span::styled(
            format!("{} ", email),
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Right);
        frame.render_widget(user, halves[1]);
    }
}

fn render_search(frame: &mut Frame, area: Rect, home: &HomeComponent, ctx: &HomeRenderContext) {
    let focused = home.is_searching();
    let border = if focused { Color::Cyan } else { Color::DarkGray };

    let mut spans = vec![Span::styled(" › ", Style::default().fg(border))];
    if ctx.search_input.is_empty() && !focused {
        spans.push(Span::styled(
            SEARCH_PLACEHOLDER,
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        spans.push(Span::styled(
            ctx.search_input.to_string(),
            Style::default().fg(Color::White),
        ));
        if focused {
            spans.push(Span::styled("_", Style::default().fg(Color::Cyan)));
        }
    }
    if ctx.settling {
        spans.push(Span::styled(" …", Style::default().fg(Color::Yellow)));
    }

    let search = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    frame.render_widget(search, area);
}

fn render_filter_chips(frame: &mut Frame, area: Rect, filters: &FilterSelection) {
    let chip = Style::default().fg(Color::Black).bg(Color::Magenta);
    let mut spans = vec![];

    if filters.is_active() {
        spans.push(Span::styled(" Filtros: ", Style::default().fg(Color::Magenta)));
        if let Some(ref muscle) = filters.muscle_group {
            spans.push(Span::styled(format!(" {} ", label_for(MUSCLES, muscle)), chip));
            spans.push(Span::raw(" "));
        }
        if let Some(difficulty) = filters.difficulty {
            spans.push(Span::styled(format!(" {} ", difficulty.label()), chip));
            spans.push(Span::raw(" "));
        }
        if let Some(ref equipment) = filters.equipment {
            spans.push(Span::styled(
                format!(" {} ", label_for(EQUIPMENTS, equipment)),
                chip,
            ));
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(
            " x limpiar",
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        spans.push(Span::styled(
            " Sin filtros · f para filtrar",
            Style::default().fg(Color::DarkGray),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// One-line notice with its icon, also used by the login screen
pub fn render_notice(frame: &mut Frame, area: Rect, notice: &Notice) {
    let color = notice.kind.color();
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", notice.kind.icon()),
            Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {}", notice.message), Style::default().fg(color)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn key_hint(key: &'static str, label: &'static str, color: Color) -> [Span<'static>; 2] {
    [
        Span::styled(
            format!(" {} ", key),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::raw(label),
    ]
}

fn render_help_bar(frame: &mut Frame, area: Rect, home: &HomeComponent) {
    let hints: Vec<[Span; 2]> = if home.is_searching() {
        vec![
            key_hint("Esc/Enter", "Volver a la tabla  ", Color::Yellow),
            key_hint("Backspace", "Borrar", Color::Cyan),
        ]
    } else {
        vec![
            key_hint("q", "Salir ", Color::Yellow),
            key_hint("n", "Nuevo ", Color::Green),
            key_hint("Enter", "Editar ", Color::Green),
            key_hint("/", "Buscar ", Color::Cyan),
            key_hint("f", "Filtros ", Color::Magenta),
            key_hint("←/→", "Página ", Color::Cyan),
            key_hint("R", "Recargar ", Color::Cyan),
            key_hint("L", "Cerrar sesión ", Color::Red),
            key_hint("?", "Ayuda", Color::White),
        ]
    };

    let spans: Vec<Span> = hints.into_iter().flatten().collect();
    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::TOP))
        .alignment(Alignment::Left);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::exercise_table::TableBody;
    use crate::model::exercise::Difficulty;
    use crate::model::page::PageWindow;
    use crate::services::api::fake::sample;
    use ratatui::{backend::TestBackend, Terminal};

    fn press(home: &mut HomeComponent, code: KeyCode) -> Option<Action> {
        home.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    fn render(home: &HomeComponent, ctx: &HomeRenderContext) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 30)).unwrap();
        let mut table = ExerciseTable::new();
        terminal
            .draw(|frame| draw_home_screen(frame, frame.area(), home, &mut table, ctx).unwrap())
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_table_keys() {
        let mut home = HomeComponent::new();
        assert_eq!(press(&mut home, KeyCode::Char('j')), Some(Action::NextItem));
        assert_eq!(press(&mut home, KeyCode::Right), Some(Action::NextPage));
        assert_eq!(press(&mut home, KeyCode::Char(']')), Some(Action::PageSizeUp));
        assert_eq!(press(&mut home, KeyCode::Char('n')), Some(Action::NewExercise));
        assert_eq!(press(&mut home, KeyCode::Enter), Some(Action::EditSelected));
        assert_eq!(press(&mut home, KeyCode::Char('q')), Some(Action::OpenQuitDialog));
    }

    #[test]
    fn test_search_focus_captures_characters() {
        let mut home = HomeComponent::new();
        let action = press(&mut home, KeyCode::Char('/')).unwrap();
        home.update(action).unwrap();
        assert!(home.is_searching());

        assert_eq!(press(&mut home, KeyCode::Char('q')), Some(Action::SearchInput('q')));
        assert_eq!(press(&mut home, KeyCode::Backspace), Some(Action::SearchBackspace));

        let action = press(&mut home, KeyCode::Esc).unwrap();
        home.update(action).unwrap();
        assert!(!home.is_searching());
    }

    #[test]
    fn test_home_screen_renders_header_placeholder_and_rows() {
        let rows = vec![sample("ex-1", "Press banca")];
        let mut page = PageWindow::new(10);
        page.total = 1;
        let filters = FilterSelection::default();
        let ctx = HomeRenderContext {
            search_input: "",
            settling: false,
            filters: &filters,
            user_email: Some("coach@flexia.app"),
            notice: None,
            table: TableView {
                body: TableBody::Rows(&rows),
                page: &page,
                refreshing: false,
            },
        };

        let text = render(&HomeComponent::new(), &ctx);
        assert!(text.contains(WELCOME));
        assert!(text.contains("coach@flexia.app"));
        assert!(text.contains(SEARCH_PLACEHOLDER));
        assert!(text.contains("Press banca"));
        assert!(text.contains("Sin filtros"));
    }

    #[test]
    fn test_home_screen_shows_filter_chips_and_notice() {
        let page = PageWindow::new(10);
        let filters = FilterSelection {
            muscle_group: Some("Chest".to_string()),
            difficulty: Some(Difficulty::Advanced),
            equipment: None,
        };
        let notice = Notice::success("Ejercicio creado");
        let ctx = HomeRenderContext {
            search_input: "press",
            settling: true,
            filters: &filters,
            user_email: None,
            notice: Some(&notice),
            table: TableView {
                body: TableBody::Loading,
                page: &page,
                refreshing: false,
            },
        };

        let text = render(&HomeComponent::new(), &ctx);
        assert!(text.contains("Pecho"));
        assert!(text.contains("Avanzado"));
        assert!(text.contains("Ejercicio creado"));
        assert!(text.contains("press"));
        assert!(!text.contains(SEARCH_PLACEHOLDER));
    }
}
