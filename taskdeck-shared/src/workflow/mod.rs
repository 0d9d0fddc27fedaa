//! # Page workflows
//!
//! The behaviour behind each view, independent of how it is rendered. Every
//! workflow validates locally before touching the network, maps backend
//! rejections onto user-facing [`Notification`]s and keeps the
//! [`AuthContext`] honest when the backend reports a stale token.

mod board;
mod sign_in;
mod sign_up;
mod task_form;

pub use board::{
    ACCESS_DENIED, FETCH_FAILED, LOGIN_AGAIN, TaskBoard, fetch_page, remove_task,
};
pub use sign_in::{SIGN_IN_FAILED, SIGNED_IN, SignInForm};
pub use sign_up::{MIN_PASSWORD_LEN, SIGNED_UP, SignUpForm};
pub use task_form::{TaskForm, load_task};

use tracing::{info, warn};

use crate::{api::ClientError, auth::AuthContext, notify::Notification, session::KeyValueStore};

pub const MISSING_FIELDS: &str = "Please enter all fields";
pub const SIGNED_OUT: &str = "Logged out successfully!";

/// End the session from the navigation bar.
pub fn sign_out<S: KeyValueStore>(auth: &AuthContext<S>) -> Notification {
    if let Err(err) = auth.sign_out() {
        warn!(error = %err, "session removed from memory but not from storage");
    }
    Notification::success(SIGNED_OUT)
}

/// Backend message when it supplied one, `fallback` otherwise.
fn rejection_message(error: &ClientError, fallback: &str) -> String {
    error
        .server_message()
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

/// A `401` on an authenticated call means the token went stale.
fn expire_on_unauthorized<S: KeyValueStore>(auth: &AuthContext<S>, error: &ClientError) -> bool {
    if !error.is_unauthorized() || !auth.is_authenticated() {
        return false;
    }
    info!("backend rejected the session token");
    if let Err(err) = auth.sign_out() {
        warn!(error = %err, "failed to clear stale session");
    }
    true
}
