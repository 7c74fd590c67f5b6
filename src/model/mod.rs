//! Model layer - centralized state management
//!
//! This module contains all state-related types:
//! - `DomainState` - Client-side containers (filters, search, session, notices)
//! - `ModalStack` - Modal overlay management
//! - Catalog records, query keys and the form payload builders

pub mod catalog;
pub mod debounce;
pub mod domain;
pub mod exercise;
pub mod filters;
pub mod form;
pub mod modal;
pub mod notice;
pub mod orchestrator;
pub mod page;
pub mod query;
pub mod session;
pub mod ui;

