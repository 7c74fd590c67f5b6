//! External service interactions
//!
//! This module contains services for talking to the catalog API:
//! - REST client and its in-memory test double
//! - Background request execution
//! - Cached listing queries
//! - Create/update/delete mutations

pub mod api;
pub mod error;
pub mod mutation;
pub mod query_client;
pub mod runner;

pub use api::{ExerciseApi, HttpExerciseApi};
pub use mutation::MutationClient;
pub use query_client::QueryClient;
pub use runner::RequestRunner;
