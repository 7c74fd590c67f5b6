//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that delegates event handling and rendering to child components.
//! It owns the shared state containers (filter store, orchestrator, session,
//! query cache) and wires component actions to them; the listing itself is
//! always read from the query cache for the current query key.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    draw_home_screen, render_notice, ConfirmDialog, ExerciseForm, ExerciseTable, FilterDialog,
    HelpDialog, HomeComponent, HomeRenderContext, LoginComponent, Submission, TableBody,
    TableView,
};
use crate::config::Config;
use crate::model::domain::DomainState;
use crate::model::modal::{Modal, ModalStack};
use crate::model::notice::Notice;
use crate::model::query::QueryKey;
use crate::model::session::{Session, SessionHandle};
use crate::model::ui::AppMode;
use crate::services::mutation::MutationKind;
use crate::services::{
    ExerciseApi, HttpExerciseApi, MutationClient, QueryClient, RequestRunner,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{layout::Rect, Frame};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    /// Current application mode
    pub mode: AppMode,

    /// Domain state (filters, search, session, notices)
    pub domain: DomainState,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Cached listing queries
    pub query: QueryClient,

    /// Create/update/delete requests
    pub mutations: MutationClient,

    /// Login requests, tagged with the e-mail they were sent for
    auth: RequestRunner<String, String>,

    api: Arc<dyn ExerciseApi>,

    /// Current config (for remembering the last e-mail)
    pub config: Config,

    /// Where the config is written back; `None` keeps it in memory
    config_path: Option<PathBuf>,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub login: LoginComponent,
    pub home: HomeComponent,
    pub table: ExerciseTable,
    pub form: ExerciseForm,
    pub filter_dialog: FilterDialog,
    pub help_dialog: HelpDialog,
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    /// Create the App talking to the configured API
    pub fn new(config: Config) -> Result<App> {
        let session = SessionHandle::new();
        let api = HttpExerciseApi::new(
            &config.api_base_url,
            config.request_timeout(),
            session.clone(),
        )?;
        let api: Arc<dyn ExerciseApi> = Arc::new(api);

        let query = QueryClient::new(Arc::clone(&api));
        let mutations = MutationClient::new(Arc::clone(&api), query.events());
        Ok(Self::assemble(
            config,
            api,
            session,
            Config::config_path(),
            query,
            mutations,
            RequestRunner::new(),
        ))
    }

    /// App whose requests run on the calling thread and whose config stays in memory
    #[cfg(test)]
    pub fn inline(api: Arc<dyn ExerciseApi>) -> App {
        let query = QueryClient::inline(Arc::clone(&api));
        let mutations = MutationClient::inline(Arc::clone(&api), query.events());
        Self::assemble(
            Config::default(),
            api,
            SessionHandle::new(),
            None,
            query,
            mutations,
            RequestRunner::inline(),
        )
    }

    fn assemble(
        config: Config,
        api: Arc<dyn ExerciseApi>,
        session: SessionHandle,
        config_path: Option<PathBuf>,
        query: QueryClient,
        mutations: MutationClient,
        auth: RequestRunner<String, String>,
    ) -> App {
        let page_size = config.page_size();
        let login = LoginComponent::new(config.last_email.clone());
        App {
            mode: AppMode::Login,
            domain: DomainState::new(session, page_size),
            modals: ModalStack::new(),
            query,
            mutations,
            auth,
            api,
            config,
            config_path,
            should_quit: false,
            login,
            home: HomeComponent::new(),
            table: ExerciseTable::new(),
            form: ExerciseForm::new(),
            filter_dialog: FilterDialog::new(),
            help_dialog: HelpDialog::default(),
        }
    }

    /// Key of the listing currently on screen
    pub fn current_key(&self) -> QueryKey {
        self.domain.orchestrator.query_key(&self.domain.filters)
    }

    /// Advance timers and drain background work
    pub fn tick_at(&mut self, now: Instant) {
        self.poll_login();

        if self.mode == AppMode::Running {
            let orchestrator = &mut self.domain.orchestrator;
            let settled = orchestrator.tick(now, &mut self.domain.filters);
            let filters_changed = orchestrator.sync_filters(&self.domain.filters);
            if settled || filters_changed {
                self.table.reset_selection();
                self.filter_dialog.sync(self.domain.filters.selection());
            }

            // Mutations first so their invalidation is applied in the same tick
            self.poll_mutation();
            self.query.poll();
            self.refresh_listing();
        }

        self.domain.expire_notice(now);
    }

    /// Make sure the current key is fetched and keep the page window and the
    /// row cursor in line with what the cache holds
    fn refresh_listing(&mut self) {
        let key = self.current_key();
        self.query.ensure(&key);

        let total = self
            .query
            .entry(&key)
            .and_then(|e| e.data.as_ref())
            .map(|page| page.total);
        if let Some(total) = total {
            if self.domain.orchestrator.apply_total(total) {
                debug!(total, "page clamped to the new total");
                self.table.reset_selection();
                let key = self.current_key();
                self.query.ensure(&key);
            }
        }

        let key = self.current_key();
        let rows = self
            .query
            .entry(&key)
            .and_then(|e| e.data.as_ref())
            .map_or(0, |page| page.data.len());
        self.table.set_row_count(rows);
    }

    fn poll_mutation(&mut self) {
        let Some(outcome) = self.mutations.poll() else {
            return;
        };
        self.form.pending = None;

        match outcome.result {
            Ok(()) => {
                self.modals.close(&Modal::ExerciseForm);
                let message = match outcome.kind {
                    MutationKind::Create => "Ejercicio creado correctamente",
                    MutationKind::Update => "Ejercicio actualizado correctamente",
                    MutationKind::Delete => "Ejercicio eliminado correctamente",
                };
                self.domain.notify(Notice::success(message));
            }
            Err(e) => {
                let action = match outcome.kind {
                    MutationKind::Create => "crear el ejercicio",
                    MutationKind::Update => "guardar los cambios",
                    MutationKind::Delete => "eliminar el ejercicio",
                };
                self.domain
                    .notify(Notice::error(format!("No se pudo {}: {}", action, e)));
            }
        }
    }

    fn poll_login(&mut self) {
        for completed in self.auth.poll() {
            let email = completed.tag;
            match completed.result {
                Ok(token) => {
                    info!(%email, "signed in");
                    self.domain.session.sign_in(Session {
                        token,
                        email: email.clone(),
                    });
                    self.remember_email(email);
                    self.login.reset();
                    self.home = HomeComponent::new();
                    self.mode = AppMode::Running;
                }
                Err(e) => {
                    warn!(%email, error = %e, "login failed");
                    let message = if e.is_unauthorized() {
                        "Credenciales incorrectas".to_string()
                    } else {
                        e.to_string()
                    };
                    self.login.fail(message);
                }
            }
        }
    }

    fn remember_email(&mut self, email: String) {
        if self.config.last_email.as_deref() == Some(email.as_str()) {
            return;
        }
        self.config.last_email = Some(email);
        if let Some(ref path) = self.config_path {
            if let Err(e) = self.config.save_to(path) {
                warn!(error = %e, "could not save config");
            }
        }
    }

    fn submit_login(&mut self, email: String, password: String) {
        info!(%email, "signing in");
        self.login.set_pending();
        let api = Arc::clone(&self.api);
        let tag = email.clone();
        self.auth
            .spawn(tag, move || api.login(&email, &password));
    }

    fn logout(&mut self) {
        info!(in_flight = self.query.in_flight(), "signing out");
        self.domain.session.sign_out();
        self.domain.orchestrator.teardown();
        self.domain.filters.clear_all();
        self.query.clear();
        self.modals.clear();
        self.home = HomeComponent::new();
        self.table = ExerciseTable::new();
        self.form = ExerciseForm::new();
        self.login.reset();
        self.mode = AppMode::Login;
        self.domain.notify(Notice::warning("Has cerrado sesión"));
    }

    /// Open the drawer in edit mode for the row under the cursor
    fn edit_selected(&mut self) {
        let key = self.current_key();
        let selected = self
            .query
            .entry(&key)
            .and_then(|e| e.data.as_ref())
            .and_then(|page| self.table.selected(&page.data))
            .cloned();

        match selected {
            Some(exercise) if !exercise.id.is_empty() => {
                debug!(id = %exercise.id, "editing exercise");
                self.form.open_edit(&exercise);
                self.form.pending = self.mutations.pending();
                self.modals.push(Modal::ExerciseForm);
            }
            Some(_) => {
                warn!("selected row has no id");
                self.domain
                    .notify(Notice::error("Error recuperando el ejercicio"));
            }
            None => {}
        }
    }

    fn submit_form(&mut self) {
        if self.mutations.is_pending() {
            return;
        }
        match self.form.submission() {
            Submission::Invalid(message) => self.domain.notify(Notice::error(message)),
            Submission::Unchanged => {
                debug!("edit has no changes, nothing sent");
                self.domain
                    .notify(Notice::info("No hay cambios que guardar"));
            }
            Submission::Send(request) => {
                if self.mutations.submit(request) {
                    self.form.pending = self.mutations.pending();
                }
            }
        }
    }

    fn request_delete(&mut self) {
        if self.mutations.is_pending() {
            return;
        }
        if let Some(original) = self.form.original() {
            let exercise_name = original.name.clone();
            self.modals.push(Modal::DeleteConfirm { exercise_name });
        }
    }

    fn confirm_delete(&mut self) {
        if let Some(Modal::DeleteConfirm { .. }) = self.modals.top() {
            self.modals.pop();
        }
        if let Some(request) = self.form.delete_request() {
            if self.mutations.submit(request) {
                self.form.pending = self.mutations.pending();
            }
        }
    }

    /// Forward a filter store change to the page window and the panel
    fn filters_changed(&mut self) {
        self.domain.orchestrator.sync_filters(&self.domain.filters);
        self.table.reset_selection();
        self.filter_dialog.sync(self.domain.filters.selection());
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn init(&mut self) -> Result<()> {
        info!(
            page_size = self.domain.orchestrator.page().page_size,
            "app initialised"
        );
        self.login.init()?;
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(Some(Action::ForceQuit));
        }

        match self.mode {
            AppMode::Login => self.login.handle_key_event(key),
            AppMode::Running => {
                if let Some(modal) = self.modals.top().cloned() {
                    self.handle_modal_key_event(&modal, key)
                } else {
                    self.home.handle_key_event(key)
                }
            }
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => self.tick_at(Instant::now()),
            Action::ForceQuit => {
                self.should_quit = true;
            }
            Action::Resize(_, _) => {}

            // ─────────────────────────────────────────────────────────────────
            // Navigation (delegate to ExerciseTable)
            // ─────────────────────────────────────────────────────────────────
            Action::NextItem | Action::PrevItem | Action::FirstItem | Action::LastItem => {
                self.table.update(action)?;
            }

            // ─────────────────────────────────────────────────────────────────
            // Pagination
            // ─────────────────────────────────────────────────────────────────
            Action::NextPage => {
                if self.domain.orchestrator.next_page() {
                    self.table.reset_selection();
                }
            }
            Action::PrevPage => {
                if self.domain.orchestrator.prev_page() {
                    self.table.reset_selection();
                }
            }
            Action::PageSizeUp => {
                self.domain.orchestrator.cycle_page_size_up();
                self.table.reset_selection();
            }
            Action::PageSizeDown => {
                self.domain.orchestrator.cycle_page_size_down();
                self.table.reset_selection();
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => self.modals.push(Modal::QuitConfirm),
            Action::OpenHelp => {
                self.help_dialog = HelpDialog::default();
                self.modals.push(Modal::Help);
            }
            Action::CloseModal => {
                self.modals.pop();
            }

            // ─────────────────────────────────────────────────────────────────
            // Search
            // ─────────────────────────────────────────────────────────────────
            Action::FocusSearch | Action::BlurSearch => {
                self.home.update(action)?;
            }
            Action::SearchInput(c) => {
                self.domain.orchestrator.push_char(c, Instant::now());
            }
            Action::SearchBackspace => {
                self.domain.orchestrator.backspace(Instant::now());
            }

            // ─────────────────────────────────────────────────────────────────
            // Filters
            // ─────────────────────────────────────────────────────────────────
            Action::OpenFilters => {
                self.filter_dialog.open(self.domain.filters.selection());
                self.modals.push(Modal::Filters);
            }
            Action::SetMuscleFilter(value) => {
                self.domain.filters.set_muscle_group(value);
                self.filters_changed();
            }
            Action::SetDifficultyFilter(value) => {
                self.domain.filters.set_difficulty(value);
                self.filters_changed();
            }
            Action::SetEquipmentFilter(value) => {
                self.domain.filters.set_equipment(value);
                self.filters_changed();
            }
            Action::ClearFilters => {
                self.domain
                    .orchestrator
                    .clear_filters(&mut self.domain.filters);
                self.filters_changed();
            }

            // ─────────────────────────────────────────────────────────────────
            // Exercises
            // ─────────────────────────────────────────────────────────────────
            Action::NewExercise => {
                self.form.open_create();
                self.form.pending = self.mutations.pending();
                self.modals.push(Modal::ExerciseForm);
            }
            Action::EditSelected => self.edit_selected(),
            Action::SubmitForm => self.submit_form(),
            Action::RequestDelete => self.request_delete(),
            Action::ConfirmDelete => self.confirm_delete(),

            // ─────────────────────────────────────────────────────────────────
            // Session & Cache
            // ─────────────────────────────────────────────────────────────────
            Action::SubmitLogin { email, password } => self.submit_login(email, password),
            Action::Logout => self.logout(),
            Action::Refresh => {
                let key = self.current_key();
                if self.query.refetch(&key) {
                    info!(key = %key, "listing refresh requested");
                }
            }
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        match self.mode {
            AppMode::Login => {
                self.login.draw(frame, area)?;
                if let Some(ref notice) = self.domain.notice {
                    let bottom = Rect::new(
                        area.x,
                        area.y + area.height.saturating_sub(1),
                        area.width,
                        area.height.min(1),
                    );
                    render_notice(frame, bottom, notice);
                }
            }
            AppMode::Running => {
                let key = self.current_key();
                let email = self.domain.session.email();
                let entry = self.query.entry(&key);

                let body = match entry {
                    Some(e) if e.is_error() => {
                        TableBody::Error(e.error.as_deref().unwrap_or_default())
                    }
                    Some(e) => match e.data {
                        Some(ref page) => TableBody::Rows(&page.data),
                        None => TableBody::Loading,
                    },
                    None => TableBody::Loading,
                };
                let refreshing = entry.is_some_and(|e| e.fetching && !e.is_loading());

                // Build render context
                let ctx = HomeRenderContext {
                    search_input: self.domain.orchestrator.search_input(),
                    settling: self.domain.orchestrator.is_settling(),
                    filters: self.domain.filters.selection(),
                    user_email: email.as_deref(),
                    notice: self.domain.notice.as_ref(),
                    table: TableView {
                        body,
                        page: self.domain.orchestrator.page(),
                        refreshing,
                    },
                };

                draw_home_screen(frame, area, &self.home, &mut self.table, &ctx)?;

                // Overlays bottom to top, so the delete prompt sits on the drawer
                let stack: Vec<Modal> = self.modals.iter().cloned().collect();
                for modal in &stack {
                    self.draw_modal(frame, area, modal)?;
                }
            }
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helper Methods
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => ConfirmDialog::quit().handle_key_event(key),
            Modal::DeleteConfirm { exercise_name } => {
                ConfirmDialog::delete(exercise_name).handle_key_event(key)
            }
            Modal::Filters => self.filter_dialog.handle_key_event(key),
            Modal::ExerciseForm => {
                self.form.pending = self.mutations.pending();
                self.form.handle_key_event(key)
            }
            Modal::Help => self.help_dialog.handle_key_event(key),
        }
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm => ConfirmDialog::quit().draw(frame, area)?,
            Modal::DeleteConfirm { exercise_name } => {
                ConfirmDialog::delete(exercise_name).draw(frame, area)?
            }
            Modal::Filters => self.filter_dialog.draw(frame, area)?,
            Modal::ExerciseForm => {
                self.form.pending = self.mutations.pending();
                self.form.draw(frame, area)?;
            }
            Modal::Help => self.help_dialog.draw(frame, area)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::exercise::{Difficulty, ExercisePatch};
    use crate::model::notice::NoticeKind;
    use crate::model::query::EffectiveQuery;
    use crate::services::api::fake::{sample, FakeApi};
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    /// Signed-in app with `count` exercises on the server, first page loaded
    fn loaded_app(count: usize) -> (Arc<FakeApi>, App) {
        let api = Arc::new(FakeApi::with_exercises(count));
        let mut app = App::inline(api.clone());
        app.domain.session.sign_in(Session {
            token: "tok".to_string(),
            email: "coach@flexia.app".to_string(),
        });
        app.mode = AppMode::Running;
        tick(&mut app);
        tick(&mut app);
        (api, app)
    }

    fn tick(app: &mut App) {
        app.update(Action::Tick).unwrap();
    }

    fn notice_kind(app: &App) -> Option<NoticeKind> {
        app.domain.notice.as_ref().map(|n| n.kind)
    }

    fn screen(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        terminal
            .draw(|frame| app.draw(frame, frame.area()).unwrap())
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
    fn test_first_page_is_fetched_once() {
        let (api, mut app) = loaded_app(15);
        assert_eq!(api.list_calls(), 1);
        assert_eq!(app.table.selected_index(), Some(0));
        assert_eq!(app.domain.orchestrator.page().total, 15);

        tick(&mut app);
        tick(&mut app);
        assert_eq!(api.list_calls(), 1);
    }

    #[test]
    fn test_search_waits_for_debounce() {
        let (api, mut app) = loaded_app(15);
        for c in "Ejercicio 1".chars() {
            app.update(Action::SearchInput(c)).unwrap();
        }

        app.tick_at(Instant::now());
        assert_eq!(api.list_calls(), 1);

        app.tick_at(Instant::now() + Duration::from_millis(600));
        assert_eq!(api.list_calls(), 2);
        assert!(!app.current_key().query.is_filter());
        assert_eq!(
            app.current_key().query,
            EffectiveQuery::Search {
                term: "Ejercicio 1".to_string()
            }
        );
    }

    #[test]
    fn test_filters_switch_query_mode() {
        let (_api, mut app) = loaded_app(5);
        app.update(Action::SetDifficultyFilter(Some(Difficulty::Beginner)))
            .unwrap();
        assert!(app.current_key().query.is_filter());

        app.update(Action::ClearFilters).unwrap();
        assert!(!app.current_key().query.is_filter());
    }

    #[test]
    fn test_pagination_is_clamped() {
        let (api, mut app) = loaded_app(15);
        app.update(Action::PrevPage).unwrap();
        assert_eq!(app.domain.orchestrator.page().page, 1);

        app.update(Action::NextPage).unwrap();
        app.update(Action::NextPage).unwrap();
        assert_eq!(app.domain.orchestrator.page().page, 2);

        tick(&mut app);
        tick(&mut app);
        assert_eq!(api.list_calls(), 2);
        assert_eq!(app.table.selected_index(), Some(0));
    }

    #[test]
    fn test_query_change_keeps_page_in_new_range() {
        let (api, mut app) = loaded_app(30);
        app.update(Action::NextPage).unwrap();
        tick(&mut app);
        tick(&mut app);
        assert_eq!(api.list_calls(), 2);

        // No exercise is Advanced, so the new query has a single empty page
        app.update(Action::SetDifficultyFilter(Some(Difficulty::Advanced)))
            .unwrap();
        tick(&mut app);
        assert_eq!(app.domain.orchestrator.page().page, 1);
        assert_eq!(app.domain.orchestrator.page().total_pages(), 1);

        app.update(Action::NextPage).unwrap();
        tick(&mut app);
        app.update(Action::NextPage).unwrap();
        tick(&mut app);

        assert_eq!(app.current_key().page, 1);
        assert!(app.current_key().query.is_filter());
        assert_eq!(api.list_calls(), 3);
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let (_api, mut app) = loaded_app(30);
        app.update(Action::NextPage).unwrap();
        app.update(Action::PageSizeUp).unwrap();
        let page = app.domain.orchestrator.page();
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 25);
    }

    #[test]
    fn test_unchanged_edit_sends_nothing() {
        let (api, mut app) = loaded_app(3);
        app.update(Action::EditSelected).unwrap();
        assert_eq!(app.modals.top(), Some(&Modal::ExerciseForm));

        app.update(Action::SubmitForm).unwrap();
        assert_eq!(api.mutation_calls(), 0);
        assert_eq!(notice_kind(&app), Some(NoticeKind::Info));
        assert_eq!(app.modals.top(), Some(&Modal::ExerciseForm));
    }

    #[test]
    fn test_update_sends_diff_and_refetches() {
        let (api, mut app) = loaded_app(3);
        app.update(Action::EditSelected).unwrap();
        app.form.values.difficulty = Difficulty::Intermediate;
        app.update(Action::SubmitForm).unwrap();
        assert_eq!(api.mutation_calls(), 1);
        assert_eq!(
            api.last_patch.lock().unwrap().clone(),
            Some(ExercisePatch {
                difficulty: Some(Difficulty::Intermediate),
                ..Default::default()
            })
        );

        tick(&mut app);
        assert!(app.modals.is_empty());
        assert_eq!(notice_kind(&app), Some(NoticeKind::Success));
        assert_eq!(api.list_calls(), 2);
    }

    #[test]
    fn test_failed_mutation_keeps_drawer_open() {
        let (api, mut app) = loaded_app(3);
        app.update(Action::NewExercise).unwrap();
        app.form.values.title = "Plancha".to_string();
        api.set_failing(true);
        app.update(Action::SubmitForm).unwrap();

        tick(&mut app);
        assert_eq!(notice_kind(&app), Some(NoticeKind::Error));
        assert_eq!(app.modals.top(), Some(&Modal::ExerciseForm));
        assert_eq!(app.form.values.title, "Plancha");
        assert!(!app.mutations.is_pending());
    }

    #[test]
    fn test_blank_name_is_not_sent() {
        let (api, mut app) = loaded_app(1);
        app.update(Action::NewExercise).unwrap();
        app.update(Action::SubmitForm).unwrap();
        assert_eq!(api.mutation_calls(), 0);
        assert_eq!(notice_kind(&app), Some(NoticeKind::Error));
    }

    #[test]
    fn test_delete_is_confirmed_then_sent() {
        let (api, mut app) = loaded_app(2);
        app.update(Action::EditSelected).unwrap();
        app.update(Action::RequestDelete).unwrap();
        assert!(matches!(app.modals.top(), Some(Modal::DeleteConfirm { .. })));
        assert_eq!(api.mutation_calls(), 0);

        app.update(Action::ConfirmDelete).unwrap();
        assert_eq!(api.mutation_calls(), 1);

        tick(&mut app);
        tick(&mut app);
        assert!(app.modals.is_empty());
        assert_eq!(app.domain.orchestrator.page().total, 1);
    }

    #[test]
    fn test_row_without_id_reports_error() {
        let api = Arc::new(FakeApi::default());
        api.exercises.lock().unwrap().push(sample("", "Sin id"));
        let mut app = App::inline(api.clone());
        app.mode = AppMode::Running;
        tick(&mut app);
        tick(&mut app);

        app.update(Action::EditSelected).unwrap();
        assert!(app.modals.is_empty());
        assert_eq!(
            app.domain.notice.as_ref().map(|n| n.message.as_str()),
            Some("Error recuperando el ejercicio")
        );
    }

    #[test]
    fn test_login_flow() {
        let api = Arc::new(FakeApi::with_exercises(2));
        let mut app = App::inline(api.clone());
        assert_eq!(app.mode, AppMode::Login);

        app.update(Action::SubmitLogin {
            email: "coach@flexia.app".to_string(),
            password: "wrong".to_string(),
        })
        .unwrap();
        tick(&mut app);
        assert_eq!(app.mode, AppMode::Login);
        assert_eq!(app.login.error.as_deref(), Some("Credenciales incorrectas"));

        app.update(Action::SubmitLogin {
            email: "coach@flexia.app".to_string(),
            password: "secret".to_string(),
        })
        .unwrap();
        tick(&mut app);
        assert_eq!(app.mode, AppMode::Running);
        assert_eq!(app.domain.session.token().as_deref(), Some("fake-token"));
        assert_eq!(app.config.last_email.as_deref(), Some("coach@flexia.app"));
        assert_eq!(api.list_calls(), 1);
    }

    #[test]
    fn test_logout_resets_state() {
        let (_api, mut app) = loaded_app(3);
        app.update(Action::SetMuscleFilter(Some("Chest".to_string())))
            .unwrap();
        app.update(Action::OpenHelp).unwrap();
        app.update(Action::Logout).unwrap();

        assert_eq!(app.mode, AppMode::Login);
        assert!(app.domain.session.token().is_none());
        assert!(!app.domain.filters.is_active());
        assert!(app.modals.is_empty());
        assert!(app.query.entry(&app.current_key()).is_none());
        assert_eq!(notice_kind(&app), Some(NoticeKind::Warning));
    }

    #[test]
    fn test_screen_shows_rows_and_drawer() {
        let (_api, mut app) = loaded_app(3);
        let text = screen(&mut app);
        assert!(text.contains("Bienvenid@ a Flexia Experts"));
        assert!(text.contains("Ejercicio 0"));
        assert!(text.contains("3 ejercicios encontrados"));

        app.update(Action::EditSelected).unwrap();
        let text = screen(&mut app);
        assert!(text.contains("Editando ejercicio"));
    }

    #[test]
    fn test_listing_error_renders_inline() {
        let api = Arc::new(FakeApi::with_exercises(3));
        api.set_failing(true);
        let mut app = App::inline(api.clone());
        app.mode = AppMode::Running;
        tick(&mut app);
        tick(&mut app);

        let text = screen(&mut app);
        assert!(text.contains("Ocurrió un error cargando los datos."));

        api.set_failing(false);
        app.update(Action::Refresh).unwrap();
        tick(&mut app);
        assert!(screen(&mut app).contains("Ejercicio 2"));
    }
}
