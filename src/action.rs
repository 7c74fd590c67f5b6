//! Action enum - All possible application actions
//!
//! Actions are discrete operations that the application can perform.
//! Components emit Actions in response to events, and the App processes
//! them to update state.

use crate::model::exercise::Difficulty;
use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for debounce, polling and notice expiry
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Force quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────
    /// Move to next table row
    NextItem,
    /// Move to previous table row
    PrevItem,
    /// Jump to first row
    FirstItem,
    /// Jump to last row
    LastItem,

    // ─────────────────────────────────────────────────────────────────────────
    // Pagination
    // ─────────────────────────────────────────────────────────────────────────
    NextPage,
    PrevPage,
    /// Next larger page size
    PageSizeUp,
    /// Next smaller page size
    PageSizeDown,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Open quit confirmation dialog
    OpenQuitDialog,
    /// Open help dialog showing all keyboard shortcuts
    OpenHelp,
    /// Close the current modal
    CloseModal,

    // ─────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────
    /// Move keyboard focus to the search box
    FocusSearch,
    /// Return focus to the table
    BlurSearch,
    /// Add character to search text
    SearchInput(char),
    /// Remove last character from search text
    SearchBackspace,

    // ─────────────────────────────────────────────────────────────────────────
    // Filters
    // ─────────────────────────────────────────────────────────────────────────
    /// Open filter panel
    OpenFilters,
    SetMuscleFilter(Option<String>),
    SetDifficultyFilter(Option<Difficulty>),
    SetEquipmentFilter(Option<String>),
    /// Clear every filter axis
    ClearFilters,

    // ─────────────────────────────────────────────────────────────────────────
    // Exercises
    // ─────────────────────────────────────────────────────────────────────────
    /// Open the drawer in create mode
    NewExercise,
    /// Open the drawer in edit mode for the selected row
    EditSelected,
    /// Submit the drawer (create or update)
    SubmitForm,
    /// Ask for confirmation before deleting the edited exercise
    RequestDelete,
    /// Delete confirmed
    ConfirmDelete,

    // ─────────────────────────────────────────────────────────────────────────
    // Session & Cache
    // ─────────────────────────────────────────────────────────────────────────
    /// Send credentials from the login screen
    SubmitLogin { email: String, password: String },
    Logout,
    /// Refetch the current listing, also after an error
    Refresh,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::NextItem => write!(f, "NextItem"),
            Action::PrevItem => write!(f, "PrevItem"),
            Action::FirstItem => write!(f, "FirstItem"),
            Action::LastItem => write!(f, "LastItem"),
            Action::NextPage => write!(f, "NextPage"),
            Action::PrevPage => write!(f, "PrevPage"),
            Action::PageSizeUp => write!(f, "PageSizeUp"),
            Action::PageSizeDown => write!(f, "PageSizeDown"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::FocusSearch => write!(f, "FocusSearch"),
            Action::BlurSearch => write!(f, "BlurSearch"),
            Action::SearchInput(c) => write!(f, "SearchInput('{}')", c),
            Action::SearchBackspace => write!(f, "SearchBackspace"),
            Action::OpenFilters => write!(f, "OpenFilters"),
            Action::SetMuscleFilter(v) => write!(f, "SetMuscleFilter({:?})", v),
            Action::SetDifficultyFilter(v) => write!(f, "SetDifficultyFilter({:?})", v),
            Action::SetEquipmentFilter(v) => write!(f, "SetEquipmentFilter({:?})", v),
            Action::ClearFilters => write!(f, "ClearFilters"),
            Action::NewExercise => write!(f, "NewExercise"),
            Action::EditSelected => write!(f, "EditSelected"),
            Action::SubmitForm => write!(f, "SubmitForm"),
            Action::RequestDelete => write!(f, "RequestDelete"),
            Action::ConfirmDelete => write!(f, "ConfirmDelete"),
            // Never print the password
            Action::SubmitLogin { email, .. } => write!(f, "SubmitLogin({}, ***)", email),
            Action::Logout => write!(f, "Logout"),
            Action::Refresh => write!(f, "Refresh"),
        }
    }
}
