//! Effective listing query and the cache key derived from it

use super::filters::FilterSelection;
use std::fmt;

/// Cache scope shared by every listing query
pub const EXERCISES_SCOPE: &str = "exercises";

/// The resolved parameter set sent to the listing endpoint
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EffectiveQuery {
    /// Free-text search by name (empty term lists everything)
    Search { term: String },
    /// Structured filters
    Filter { selection: FilterSelection },
}

impl EffectiveQuery {
    pub fn is_filter(&self) -> bool {
        matches!(self, EffectiveQuery::Filter { .. })
    }
}

/// Key of a query cache entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub scope: &'static str,
    pub query: EffectiveQuery,
    pub page: usize,
    pub page_size: usize,
}

impl QueryKey {
    pub fn exercises(query: EffectiveQuery, page: usize, page_size: usize) -> Self {
        Self {
            scope: EXERCISES_SCOPE,
            query,
            page,
            page_size,
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.query {
            EffectiveQuery::Search { term } => write!(
                f,
                "{}[search '{}' p{} x{}]",
                self.scope, term, self.page, self.page_size
            ),
            EffectiveQuery::Filter { selection } => write!(
                f,
                "{}[filter '{}' p{} x{}]",
                self.scope,
                selection.describe(),
                self.page,
                self.page_size
            ),
        }
    }
}
