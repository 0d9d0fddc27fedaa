use reqwest::StatusCode;
use tracing::{info, instrument};

use super::{MISSING_FIELDS, rejection_message};
use crate::{
    api::{ClientError, TaskDeckClient},
    models::{SignUpRequest, UserRole},
    notify::{ErrorKind, FlowError, Notification},
};

pub const MIN_PASSWORD_LEN: usize = 6;
pub const SIGNED_UP: &str = "Signup successful! Please sign in.";

const PASSWORDS_DIFFER: &str = "Passwords do not match";
const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters long";
const DUPLICATE_EMAIL: &str = "User with this email already exists";
const SERVER_ERROR: &str = "Server error. Please try again later.";
const SIGN_UP_FAILED: &str = "Signup failed. Please check your connection and try again.";

/// Registration fields. New accounts always get the `user` role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignUpForm {
    /// # Errors
    /// Fails on blank fields, mismatched confirmation or a short password,
    /// checked in that order.
    pub fn validate(&self) -> Result<SignUpRequest, FlowError> {
        let name = self.name.trim();
        let email = self.email.trim();
        if name.is_empty()
            || email.is_empty()
            || self.password.is_empty()
            || self.confirm_password.is_empty()
        {
            return Err(FlowError::validation(MISSING_FIELDS));
        }
        if self.password != self.confirm_password {
            return Err(FlowError::validation(PASSWORDS_DIFFER));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(FlowError::validation(PASSWORD_TOO_SHORT));
        }
        Ok(SignUpRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: self.password.clone(),
            role: UserRole::User,
        })
    }

    /// Register the account. No session is established; the visitor signs
    /// in afterwards.
    ///
    /// # Errors
    /// Returns the notification-ready [`FlowError`] for validation failures
    /// and rejected registrations.
    #[instrument(level = "debug", skip_all, fields(email = %self.email.trim()))]
    pub async fn submit(&self, client: &TaskDeckClient) -> Result<Notification, FlowError> {
        let request = self.validate()?;
        let response = client.sign_up(&request).await.map_err(|err| classify(&err))?;
        info!(user = %response.user.email, "account registered");
        Ok(Notification::success(SIGNED_UP))
    }
}

fn classify(error: &ClientError) -> FlowError {
    let (kind, fallback) = match error.status() {
        Some(StatusCode::BAD_REQUEST) => (ErrorKind::Authentication, DUPLICATE_EMAIL),
        Some(StatusCode::INTERNAL_SERVER_ERROR) => (ErrorKind::Server, SERVER_ERROR),
        _ => (error.kind(), SIGN_UP_FAILED),
    };
    FlowError::new(kind, rejection_message(error, fallback))
}
