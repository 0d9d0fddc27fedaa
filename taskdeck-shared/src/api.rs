//! HTTP gateway to the TaskDeck backend.

use std::sync::{Arc, Mutex};

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::{
    auth::{AuthContext, SubscriptionId},
    models::{
        AuthResponse, ErrorBody, PageQuery, SignInRequest, SignUpRequest, Task, TaskDraft,
        TaskPage,
    },
    notify::ErrorKind,
    segment,
    session::KeyValueStore,
};

/// Backend location used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

#[derive(Debug, Error)]
pub enum ClientError {
    /// The backend answered with a non-success status.
    #[error("request rejected with {status}: {}", .message.as_deref().unwrap_or("no details"))]
    Rejected {
        status: StatusCode,
        message: Option<String>,
    },
    /// The request never produced a usable response.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            Self::Transport(err) => err.status(),
        }
    }

    /// Message supplied by the backend, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => message.as_deref(),
            Self::Transport(_) => None,
        }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    #[must_use]
    pub fn is_forbidden(&self) -> bool {
        self.status() == Some(StatusCode::FORBIDDEN)
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self.status() {
            Some(StatusCode::UNAUTHORIZED) => ErrorKind::Authentication,
            Some(StatusCode::FORBIDDEN) => ErrorKind::Authorization,
            _ => ErrorKind::Server,
        }
    }
}

/// Thin client attaching the bearer token to every request.
#[derive(Clone, Debug)]
pub struct TaskDeckClient {
    base_url: String,
    client: Client,
    token: Arc<Mutex<Option<String>>>,
}

impl Default for TaskDeckClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl TaskDeckClient {
    /// Create a client for the given API root (e.g. `http://host/api`).
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self::with_client(base_url, Client::new())
    }

    #[must_use]
    pub fn with_client(base_url: &str, client: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            token: Arc::new(Mutex::new(None)),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn task_path(id: &str) -> String {
        format!("tasks/{}", segment::encode(id))
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn set_token(&self, token: Option<String>) {
        if let Ok(mut guard) = self.token.lock() {
            *guard = token;
        }
    }

    #[must_use]
    pub fn current_token(&self) -> Option<String> {
        self.token
            .lock()
            .ok()
            .and_then(|guard| guard.as_ref().cloned())
    }

    /// Keep the bearer token in step with an auth context.
    pub fn follow<S: KeyValueStore>(&self, auth: &AuthContext<S>) -> SubscriptionId {
        self.set_token(auth.token());
        let slot = Arc::clone(&self.token);
        auth.subscribe(move |snapshot| {
            if let Ok(mut guard) = slot.lock() {
                guard.clone_from(&snapshot.token);
            }
        })
    }

    fn apply_auth(&self, request: RequestBuilder) -> RequestBuilder {
        if let Some(token) = self.current_token() {
            request.bearer_auth(token)
        } else {
            request
        }
    }

    async fn send<F>(&self, method: Method, path: &str, build: F) -> Result<Response, ClientError>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let request = self.apply_auth(self.client.request(method.clone(), self.api_url(path)));
        let response = build(request).send().await?;
        let status = response.status();
        debug!(%method, path, %status, "response received");
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = ErrorBody::parse(&body).text().map(str::to_string);
        warn!(%method, path, %status, message = message.as_deref(), "request rejected");
        Err(ClientError::Rejected { status, message })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        Ok(response.json::<T>().await?)
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send(method, path, |request| request.json(body))
            .await?;
        Self::decode(response).await
    }

    /// `POST /auth/signin`.
    ///
    /// # Errors
    /// Returns [`ClientError`] when the credentials are rejected or the
    /// backend is unreachable.
    #[instrument(level = "debug", skip_all, fields(email = %payload.email))]
    pub async fn sign_in(&self, payload: &SignInRequest) -> Result<AuthResponse, ClientError> {
        self.send_json(Method::POST, "auth/signin", payload).await
    }

    /// `POST /auth/signup`.
    ///
    /// # Errors
    /// Returns [`ClientError`] on duplicate email, validation or server errors.
    #[instrument(level = "debug", skip_all, fields(email = %payload.email))]
    pub async fn sign_up(&self, payload: &SignUpRequest) -> Result<AuthResponse, ClientError> {
        self.send_json(Method::POST, "auth/signup", payload).await
    }

    /// `GET /tasks?page&limit`.
    ///
    /// # Errors
    /// Returns [`ClientError`] when the listing is rejected or unreachable.
    #[instrument(level = "debug", skip(self))]
    pub async fn list_tasks(&self, query: PageQuery) -> Result<TaskPage, ClientError> {
        let response = self
            .send(Method::GET, "tasks", |request| request.query(&query))
            .await?;
        Self::decode(response).await
    }

    /// `GET /tasks/:id`.
    ///
    /// # Errors
    /// Returns [`ClientError`] when the task is missing or unreachable.
    #[instrument(level = "debug", skip(self))]
    pub async fn get_task(&self, id: &str) -> Result<Task, ClientError> {
        let response = self
            .send(Method::GET, &Self::task_path(id), |request| request)
            .await?;
        Self::decode(response).await
    }

    /// `POST /tasks`.
    ///
    /// # Errors
    /// Returns [`ClientError`] when the backend rejects the draft.
    #[instrument(level = "debug", skip_all, fields(title = %draft.title))]
    pub async fn create_task(&self, draft: &TaskDraft) -> Result<Task, ClientError> {
        self.send_json(Method::POST, "tasks", draft).await
    }

    /// `PUT /tasks/:id`.
    ///
    /// # Errors
    /// Returns [`ClientError`] when the backend rejects the update.
    #[instrument(level = "debug", skip(self, draft))]
    pub async fn update_task(&self, id: &str, draft: &TaskDraft) -> Result<Task, ClientError> {
        self.send_json(Method::PUT, &Self::task_path(id), draft)
            .await
    }

    /// `DELETE /tasks/:id`. Admin-only on the backend.
    ///
    /// # Errors
    /// Returns [`ClientError`]; a non-admin session yields `403`.
    #[instrument(level = "debug", skip(self))]
    pub async fn delete_task(&self, id: &str) -> Result<(), ClientError> {
        self.send(Method::DELETE, &Self::task_path(id), |request| request)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{User, UserRole};
    use crate::session::{MemoryStore, SessionStore};

    #[test]
    fn task_ids_are_escaped_in_urls() {
        let client = TaskDeckClient::new("http://localhost:5000/api");
        assert_eq!(
            client.api_url(&TaskDeckClient::task_path("a/b?c")),
            "http://localhost:5000/api/tasks/a%2Fb%3Fc"
        );
        assert_eq!(TaskDeckClient::task_path("64f0c"), "tasks/64f0c");
    }

    #[test]
    fn api_url_joins_without_double_slashes() {
        let client = TaskDeckClient::new("http://localhost:5000/api/");
        assert_eq!(client.base_url(), "http://localhost:5000/api");
        assert_eq!(
            client.api_url("/tasks/42"),
            "http://localhost:5000/api/tasks/42"
        );
        assert_eq!(
            client.api_url("auth/signin"),
            "http://localhost:5000/api/auth/signin"
        );
    }

    #[test]
    fn default_points_at_local_backend() {
        assert_eq!(TaskDeckClient::default().base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn token_slot_is_shared_between_clones() {
        let client = TaskDeckClient::default();
        let clone = client.clone();
        client.set_token(Some("abc".into()));
        assert_eq!(clone.current_token().as_deref(), Some("abc"));
        clone.set_token(None);
        assert_eq!(client.current_token(), None);
    }

    #[test]
    fn follow_tracks_auth_transitions() {
        let auth = AuthContext::new(SessionStore::new(MemoryStore::new()));
        let client = TaskDeckClient::default();
        client.follow(&auth);
        assert_eq!(client.current_token(), None);

        let user = User {
            id: "1".into(),
            name: "A".into(),
            email: "a@b.com".into(),
            role: UserRole::User,
        };
        auth.sign_in("jwt", user).unwrap();
        assert_eq!(client.current_token().as_deref(), Some("jwt"));

        auth.sign_out().unwrap();
        assert_eq!(client.current_token(), None);
    }

    #[test]
    fn rejected_error_classification() {
        let forbidden = ClientError::Rejected {
            status: StatusCode::FORBIDDEN,
            message: Some("Access denied".into()),
        };
        assert!(forbidden.is_forbidden());
        assert_eq!(forbidden.kind(), ErrorKind::Authorization);
        assert_eq!(forbidden.server_message(), Some("Access denied"));
        assert_eq!(
            forbidden.to_string(),
            "request rejected with 403 Forbidden: Access denied"
        );

        let unauthorized = ClientError::Rejected {
            status: StatusCode::UNAUTHORIZED,
            message: None,
        };
        assert!(unauthorized.is_unauthorized());
        assert_eq!(unauthorized.kind(), ErrorKind::Authentication);
        assert!(unauthorized.to_string().ends_with("no details"));

        let server = ClientError::Rejected {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: None,
        };
        assert_eq!(server.kind(), ErrorKind::Server);
    }
}
