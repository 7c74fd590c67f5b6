//! Mutation client - create, update and delete requests
//!
//! At most one mutation is in flight at a time. A successful mutation
//! publishes an invalidation event for the listing scope.

use super::api::ExerciseApi;
use super::error::ApiError;
use super::query_client::CacheEvent;
use super::runner::RequestRunner;
use crate::model::exercise::{CreateExercise, ExercisePatch};
use crate::model::query::EXERCISES_SCOPE;
use std::fmt;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationKind::Create => write!(f, "create"),
            MutationKind::Update => write!(f, "update"),
            MutationKind::Delete => write!(f, "delete"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MutationRequest {
    Create(CreateExercise),
    Update { id: String, patch: ExercisePatch },
    Delete { id: String },
}

impl MutationRequest {
    pub fn kind(&self) -> MutationKind {
        match self {
            MutationRequest::Create(_) => MutationKind::Create,
            MutationRequest::Update { .. } => MutationKind::Update,
            MutationRequest::Delete { .. } => MutationKind::Delete,
        }
    }
}

/// Outcome of a finished mutation
#[derive(Debug)]
pub struct MutationOutcome {
    pub kind: MutationKind,
    pub result: Result<(), ApiError>,
}

pub struct MutationClient {
    api: Arc<dyn ExerciseApi>,
    runner: RequestRunner<MutationKind, ()>,
    events: Sender<CacheEvent>,
    pending: Option<MutationKind>,
}

impl MutationClient {
    pub fn new(api: Arc<dyn ExerciseApi>, events: Sender<CacheEvent>) -> Self {
        Self::with_runner(api, events, RequestRunner::new())
    }

    #[cfg(test)]
    pub fn inline(api: Arc<dyn ExerciseApi>, events: Sender<CacheEvent>) -> Self {
        Self::with_runner(api, events, RequestRunner::inline())
    }

    fn with_runner(
        api: Arc<dyn ExerciseApi>,
        events: Sender<CacheEvent>,
        runner: RequestRunner<MutationKind, ()>,
    ) -> Self {
        Self {
            api,
            runner,
            events,
            pending: None,
        }
    }

    pub fn pending(&self) -> Option<MutationKind> {
        self.pending
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Start a mutation. Returns false, without sending anything, while
    /// another mutation is still pending.
    pub fn submit(&mut self, request: MutationRequest) -> bool {
        if self.pending.is_some() {
            return false;
        }

        let kind = request.kind();
        info!(%kind, "submitting mutation");
        self.pending = Some(kind);

        let api = Arc::clone(&self.api);
        self.runner.spawn(kind, move || match request {
            MutationRequest::Create(payload) => api.create(&payload).map(|_| ()),
            MutationRequest::Update { id, patch } => api.update(&id, &patch).map(|_| ()),
            MutationRequest::Delete { id } => api.delete(&id),
        });
        true
    }

    /// Collect the finished mutation, if any
    pub fn poll(&mut self) -> Option<MutationOutcome> {
        let completed = self.runner.poll().into_iter().next()?;
        self.pending = None;

        match completed.result {
            Ok(()) => {
                info!(kind = %completed.tag, "mutation succeeded");
                if self
                    .events
                    .send(CacheEvent::Invalidate {
                        scope: EXERCISES_SCOPE,
                    })
                    .is_err()
                {
                    warn!("cache event channel closed, listing will not refresh");
                }
                Some(MutationOutcome {
                    kind: completed.tag,
                    result: Ok(()),
                })
            }
            Err(e) => {
                warn!(kind = %completed.tag, error = %e, "mutation failed");
                Some(MutationOutcome {
                    kind: completed.tag,
                    result: Err(e),
                })
            }
        }
    }
}
