//! Domain state - client-side state containers separate from UI concerns

use super::filters::FilterStore;
use super::notice::Notice;
use super::orchestrator::SearchOrchestrator;
use super::session::SessionHandle;
use std::time::Instant;

/// Client-side state shared by the main screen components
#[derive(Debug, Default)]
pub struct DomainState {
    /// Structured filter selection
    pub filters: FilterStore,

    /// Search box, debounce timer and page window
    pub orchestrator: SearchOrchestrator,

    /// Signed-in session, shared with the HTTP client
    pub session: SessionHandle,

    /// Toast currently shown in the status bar
    pub notice: Option<Notice>,
}

impl DomainState {
    pub fn new(session: SessionHandle, page_size: usize) -> Self {
        Self {
            filters: FilterStore::new(),
            orchestrator: SearchOrchestrator::new(page_size),
            session,
            notice: None,
        }
    }

    pub fn notify(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    /// Drop the notice once it has been visible long enough
    pub fn expire_notice(&mut self, now: Instant) {
        if self.notice.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.notice = None;
        }
    }
}
