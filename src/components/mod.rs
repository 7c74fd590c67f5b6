//! Screens, panels and dialogs
//!
//! Login and the main screen, the exercise table, and the overlays pushed on
//! the modal stack (filters, the exercise drawer, confirmation and help).
//! Server data reaches them through the App at draw time.

pub mod confirm_dialog;
pub mod exercise_form;
pub mod exercise_table;
pub mod filter_dialog;
pub mod help_dialog;
pub mod home;
pub mod layout;
pub mod login;

pub use confirm_dialog::ConfirmDialog;
pub use exercise_form::{ExerciseForm, Submission};
pub use exercise_table::{ExerciseTable, TableBody, TableView};
pub use filter_dialog::FilterDialog;
pub use help_dialog::HelpDialog;
pub use home::{draw_home_screen, render_notice, HomeComponent, HomeRenderContext};
pub use layout::{calculate_main_layout, centered_popup, drawer_area};
pub use login::LoginComponent;
