//! Catalog REST API client
//!
//! `ExerciseApi` is the seam between the query/mutation machinery and the
//! network. `HttpExerciseApi` is the blocking `reqwest` implementation; it is
//! only ever called from background request threads.

use super::error::ApiError;
use anyhow::Context;
use crate::model::exercise::{CreateExercise, Exercise, ExercisePage, ExercisePatch};
use crate::model::filters::FilterSelection;
use crate::model::query::{EffectiveQuery, QueryKey};
use crate::model::session::SessionHandle;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Operations the catalog API exposes
pub trait ExerciseApi: Send + Sync {
    /// Exchange credentials for a session token
    fn login(&self, email: &str, password: &str) -> Result<String, ApiError>;

    /// Search by name; an empty term lists everything
    fn search(&self, term: &str, limit: usize, page: usize) -> Result<ExercisePage, ApiError>;

    /// List by structured filters; unset axes are omitted
    fn filter(
        &self,
        selection: &FilterSelection,
        limit: usize,
        page: usize,
    ) -> Result<ExercisePage, ApiError>;

    fn create(&self, payload: &CreateExercise) -> Result<Exercise, ApiError>;

    fn update(&self, id: &str, patch: &ExercisePatch) -> Result<Exercise, ApiError>;

    fn delete(&self, id: &str) -> Result<(), ApiError>;
}

/// Issue the listing request a query key describes
pub fn fetch_page(api: &dyn ExerciseApi, key: &QueryKey) -> Result<ExercisePage, ApiError> {
    match &key.query {
        EffectiveQuery::Search { term } => api.search(term, key.page_size, key.page),
        EffectiveQuery::Filter { selection } => api.filter(selection, key.page_size, key.page),
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    #[serde(alias = "accessToken", alias = "access_token")]
    token: String,
}

/// HTTP implementation backed by a blocking `reqwest` client
pub struct HttpExerciseApi {
    client: Client,
    base_url: String,
    session: SessionHandle,
}

impl HttpExerciseApi {
    pub fn new(base_url: &str, timeout: Duration, session: SessionHandle) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().unwrap_or_default();
            Err(ApiError::from_status(status.as_u16(), body))
        }
    }

    fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = Self::check(self.authorized(request).send()?)?;
        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl ExerciseApi for HttpExerciseApi {
    fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        debug!(email, "POST /auth/login");
        let request = self
            .client
            .post(self.url("/auth/login"))
            .json(&LoginRequest { email, password });
        let response = Self::check(request.send()?)?;
        let body: LoginResponse = serde_json::from_str(&response.text()?)?;
        Ok(body.token)
    }

    fn search(&self, term: &str, limit: usize, page: usize) -> Result<ExercisePage, ApiError> {
        debug!(term, limit, page, "GET /exercises/search");
        let request = self.client.get(self.url("/exercises/search")).query(&[
            ("name", term.to_string()),
            ("limit", limit.to_string()),
            ("page", page.to_string()),
        ]);
        self.send_json(request)
    }

    fn filter(
        &self,
        selection: &FilterSelection,
        limit: usize,
        page: usize,
    ) -> Result<ExercisePage, ApiError> {
        debug!(filters = %selection.describe(), limit, page, "GET /exercises/filter");
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(ref muscle) = selection.muscle_group {
            params.push(("muscleGroup", muscle.clone()));
        }
        if let Some(difficulty) = selection.difficulty {
            params.push(("difficulty", difficulty.as_str().to_string()));
        }
        if let Some(ref equipment) = selection.equipment {
            params.push(("equipment", equipment.clone()));
        }
        params.push(("limit", limit.to_string()));
        params.push(("page", page.to_string()));

        let request = self.client.get(self.url("/exercises/filter")).query(&params);
        self.send_json(request)
    }

    fn create(&self, payload: &CreateExercise) -> Result<Exercise, ApiError> {
        debug!(name = %payload.name, "POST /exercises");
        let request = self.client.post(self.url("/exercises")).json(payload);
        self.send_json(request)
    }

    fn update(&self, id: &str, patch: &ExercisePatch) -> Result<Exercise, ApiError> {
        debug!(id, fields = ?patch.changed_fields(), "PATCH /exercises/{{id}}");
        let request = self
            .client
            .patch(self.url(&format!("/exercises/{}", id)))
            .json(patch);
        self.send_json(request)
    }

    fn delete(&self, id: &str) -> Result<(), ApiError> {
        debug!(id, "DELETE /exercises/{{id}}");
        let request = self.client.delete(self.url(&format!("/exercises/{}", id)));
        Self::check(self.authorized(request).send()?)?;
        Ok(())
    }
}

/// In-memory API used by the query, mutation and app tests
#[cfg(test)]
pub mod fake {
    use super::*;
    use crate::model::exercise::Difficulty;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct FakeApi {
        pub exercises: Mutex<Vec<Exercise>>,
        pub list_calls: AtomicUsize,
        pub mutation_calls: AtomicUsize,
        pub fail: AtomicBool,
        pub last_patch: Mutex<Option<ExercisePatch>>,
    }

    impl FakeApi {
        pub fn with_exercises(count: usize) -> Self {
            let api = FakeApi::default();
            if let Ok(mut list) = api.exercises.lock() {
                for i in 0..count {
                    list.push(sample(&format!("ex-{}", i), &format!("Ejercicio {}", i)));
                }
            }
            api
        }

        pub fn list_calls(&self) -> usize {
            self.list_calls.load(Ordering::SeqCst)
        }

        pub fn mutation_calls(&self) -> usize {
            self.mutation_calls.load(Ordering::SeqCst)
        }

        pub fn set_failing(&self, fail: bool) {
            self.fail.store(fail, Ordering::SeqCst);
        }

        fn check_failure(&self) -> Result<(), ApiError> {
            if self.fail.load(Ordering::SeqCst) {
                Err(ApiError::from_status(500, "fake failure".to_string()))
            } else {
                Ok(())
            }
        }

        fn paginate(items: Vec<Exercise>, limit: usize, page: usize) -> ExercisePage {
            let total = items.len();
            let data = items
                .into_iter()
                .skip(limit * page.saturating_sub(1))
                .take(limit)
                .collect();
            ExercisePage { data, total }
        }
    }

    pub fn sample(id: &str, name: &str) -> Exercise {
        Exercise {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            difficulty: Difficulty::Beginner,
            muscle_groups: vec!["Chest".to_string()],
            equipments: vec!["Barbell".to_string()],
            active: true,
            media_url: None,
            created_at: None,
        }
    }

    impl ExerciseApi for FakeApi {
        fn login(&self, _email: &str, password: &str) -> Result<String, ApiError> {
            self.check_failure()?;
            if password == "secret" {
                Ok("fake-token".to_string())
            } else {
                Err(ApiError::Unauthorized(401))
            }
        }

        fn search(&self, term: &str, limit: usize, page: usize) -> Result<ExercisePage, ApiError> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            self.check_failure()?;
            let term = term.to_lowercase();
            let items: Vec<Exercise> = self
                .exercises
                .lock()
                .map(|l| l.clone())
                .unwrap_or_default()
                .into_iter()
                .filter(|e| e.name.to_lowercase().contains(&term))
                .collect();
            Ok(Self::paginate(items, limit, page))
        }

        fn filter(
            &self,
            selection: &FilterSelection,
            limit: usize,
            page: usize,
        ) -> Result<ExercisePage, ApiError> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            self.check_failure()?;
            let items: Vec<Exercise> = self
                .exercises
                .lock()
                .map(|l| l.clone())
                .unwrap_or_default()
                .into_iter()
                .filter(|e| {
                    selection
                        .muscle_group
                        .as_ref()
                        .map_or(true, |m| e.muscle_groups.contains(m))
                        && selection.difficulty.map_or(true, |d| e.difficulty == d)
                        && selection
                            .equipment
                            .as_ref()
                            .map_or(true, |q| e.equipments.contains(q))
                })
                .collect();
            Ok(Self::paginate(items, limit, page))
        }

        fn create(&self, payload: &CreateExercise) -> Result<Exercise, ApiError> {
            self.mutation_calls.fetch_add(1, Ordering::SeqCst);
            self.check_failure()?;
            let mut list = self.exercises.lock().map_err(|_| ApiError::Disconnected)?;
            let exercise = Exercise {
                id: format!("ex-{}", list.len()),
                name: payload.name.clone(),
                description: payload.description.clone(),
                difficulty: payload.difficulty,
                muscle_groups: payload.muscle_groups.clone(),
                equipments: payload.equipments.clone(),
                active: payload.active,
                media_url: payload.media_url.clone(),
                created_at: None,
            };
            list.push(exercise.clone());
            Ok(exercise)
        }

        fn update(&self, id: &str, patch: &ExercisePatch) -> Result<Exercise, ApiError> {
            self.mutation_calls.fetch_add(1, Ordering::SeqCst);
            self.check_failure()?;
            if let Ok(mut last) = self.last_patch.lock() {
                *last = Some(patch.clone());
            }
            let mut list = self.exercises.lock().map_err(|_| ApiError::Disconnected)?;
            let exercise = list
                .iter_mut()
                .find(|e| e.id == id)
                .ok_or_else(|| ApiError::from_status(404, "not found".to_string()))?;
            if let Some(ref name) = patch.name {
                exercise.name = name.clone();
            }
            if let Some(difficulty) = patch.difficulty {
                exercise.difficulty = difficulty;
            }
            if let Some(active) = patch.active {
                exercise.active = active;
            }
            Ok(exercise.clone())
        }

        fn delete(&self, id: &str) -> Result<(), ApiError> {
            self.mutation_calls.fetch_add(1, Ordering::SeqCst);
            self.check_failure()?;
            let mut list = self.exercises.lock().map_err(|_| ApiError::Disconnected)?;
            list.retain(|e| e.id != id);
            Ok(())
        }
    }
}
