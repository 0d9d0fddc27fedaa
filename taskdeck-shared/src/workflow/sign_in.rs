use reqwest::StatusCode;
use tracing::{instrument, warn};

use super::{MISSING_FIELDS, rejection_message};
use crate::{
    api::TaskDeckClient,
    auth::AuthContext,
    models::SignInRequest,
    notify::{ErrorKind, FlowError, Notification},
    session::KeyValueStore,
};

pub const SIGNED_IN: &str = "Signed in successfully!";
pub const SIGN_IN_FAILED: &str = "Sign in failed. Please try again.";

/// Credentials typed into the sign-in view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

impl SignInForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// # Errors
    /// Fails with a validation error when either field is blank.
    pub fn validate(&self) -> Result<SignInRequest, FlowError> {
        let email = self.email.trim();
        if email.is_empty() || self.password.is_empty() {
            return Err(FlowError::validation(MISSING_FIELDS));
        }
        Ok(SignInRequest {
            email: email.to_string(),
            password: self.password.clone(),
        })
    }

    /// Authenticate and establish the session.
    ///
    /// # Errors
    /// Returns the notification-ready [`FlowError`] for validation failures,
    /// rejected credentials and unreachable backends.
    #[instrument(level = "debug", skip_all, fields(email = %self.email.trim()))]
    pub async fn submit<S: KeyValueStore>(
        &self,
        client: &TaskDeckClient,
        auth: &AuthContext<S>,
    ) -> Result<Notification, FlowError> {
        let request = self.validate()?;
        let response = client.sign_in(&request).await.map_err(|err| {
            let kind = match err.status() {
                Some(StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED) => {
                    ErrorKind::Authentication
                }
                _ => err.kind(),
            };
            FlowError::new(kind, rejection_message(&err, SIGN_IN_FAILED))
        })?;

        if let Err(err) = auth.sign_in(response.token.clone(), response.user) {
            warn!(error = %err, "could not persist session");
            return Err(FlowError::new(ErrorKind::Server, SIGN_IN_FAILED));
        }
        client.set_token(Some(response.token));
        Ok(Notification::success(SIGNED_IN))
    }
}
