use shared::{auth::AuthSnapshot, notify::Notification};
use yewdux::{Dispatch, Store};

/// Global UI state mirrored from the auth context.
#[derive(Clone, PartialEq, Store)]
pub struct AppState {
    pub auth: AuthSnapshot,
    /// Most recent notification, cleared by the toast after a delay.
    pub toast: Option<Notification>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            auth: AuthSnapshot::loading(),
            toast: None,
        }
    }
}

/// Show a notification.
pub fn notify(dispatch: &Dispatch<AppState>, note: Notification) {
    dispatch.reduce_mut(|state| state.toast = Some(note));
}

pub fn dismiss(dispatch: &Dispatch<AppState>) {
    dispatch.reduce_mut(|state| state.toast = None);
}
