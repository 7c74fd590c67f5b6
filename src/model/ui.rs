//! UI state - presentation state separate from domain data

/// Main application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Waiting for credentials
    Login,
    /// Signed in, exercise table visible
    Running,
}

/// Which input currently receives typed characters on the main screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Table,
    Search,
}
