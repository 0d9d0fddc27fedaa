//! # Auth context
//!
//! Application-level session state: who is signed in, with which token, and
//! whether the persisted session has been read yet. The context is an
//! explicit value owned by the application and shared by cloning the handle;
//! views observe it through [`AuthContext::subscribe`].

use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::Rc,
};

use chrono::{Duration, Utc};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    models::User,
    session::{KeyValueStore, Session, SessionStore, StorageError},
};

/// Default lifetime of a persisted session.
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no active session")]
    NotAuthenticated,
    #[error("failed to persist session: {0}")]
    Storage(#[from] StorageError),
}

/// Immutable view of the auth state handed to guards and subscribers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthSnapshot {
    pub user: Option<User>,
    pub token: Option<String>,
    /// True until the persisted session has been read.
    pub loading: bool,
}

impl AuthSnapshot {
    /// Signed out and hydrated.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// State before hydration.
    #[must_use]
    pub fn loading() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn authenticated(token: impl Into<String>, user: User) -> Self {
        Self {
            user: Some(user),
            token: Some(token.into()),
            loading: false,
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.is_authenticated() && self.user.as_ref().is_some_and(User::is_admin)
    }
}

/// Handle returned by [`AuthContext::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Rc<dyn Fn(&AuthSnapshot)>;

struct Inner<S> {
    store: SessionStore<S>,
    ttl: Duration,
    state: RefCell<AuthSnapshot>,
    hydrated: Cell<bool>,
    listeners: RefCell<Vec<(SubscriptionId, Listener)>>,
    next_id: Cell<u64>,
}

/// Shared handle to the auth state. Clones observe and mutate the same state.
pub struct AuthContext<S> {
    inner: Rc<Inner<S>>,
}

impl<S> Clone for AuthContext<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S> fmt::Debug for AuthContext<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("AuthContext")
            .field("authenticated", &state.is_authenticated())
            .field("loading", &state.loading)
            .field("listeners", &self.inner.listeners.borrow().len())
            .finish_non_exhaustive()
    }
}

impl<S: KeyValueStore> AuthContext<S> {
    /// Create an unhydrated context with the default session lifetime.
    pub fn new(store: SessionStore<S>) -> Self {
        Self::with_ttl(store, Duration::hours(DEFAULT_SESSION_TTL_HOURS))
    }

    pub fn with_ttl(store: SessionStore<S>, ttl: Duration) -> Self {
        Self {
            inner: Rc::new(Inner {
                store,
                ttl,
                state: RefCell::new(AuthSnapshot::loading()),
                hydrated: Cell::new(false),
                listeners: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    /// Read the persisted session. Only the first call has any effect.
    pub fn hydrate(&self) {
        if self.inner.hydrated.replace(true) {
            debug!("auth context already hydrated");
            return;
        }

        let session = self.inner.store.load();
        let snapshot = match session {
            Session {
                token: Some(token),
                user: Some(user),
                ..
            } => {
                info!(user = %user.email, "restored persisted session");
                AuthSnapshot::authenticated(token, user)
            }
            _ => AuthSnapshot::anonymous(),
        };
        self.replace(snapshot);
    }

    /// Establish a session and persist it as a pair.
    ///
    /// # Errors
    /// Returns [`AuthError::Storage`] if the pair cannot be persisted; the
    /// in-memory state is left unchanged in that case.
    pub fn sign_in(&self, token: impl Into<String>, user: User) -> Result<(), AuthError> {
        let token = token.into();
        let session = Session::new(token.clone(), user.clone(), Utc::now() + self.inner.ttl);
        self.inner.store.save(&session)?;
        self.inner.hydrated.set(true);
        info!(user = %user.email, role = %user.role, "signed in");
        self.replace(AuthSnapshot::authenticated(token, user));
        Ok(())
    }

    /// Drop the session from memory and storage.
    ///
    /// # Errors
    /// Returns [`AuthError::Storage`] if the persisted copy cannot be removed.
    /// The in-memory state is cleared regardless.
    pub fn sign_out(&self) -> Result<(), AuthError> {
        self.inner.hydrated.set(true);
        self.replace(AuthSnapshot::anonymous());
        info!("signed out");
        self.inner.store.clear()?;
        Ok(())
    }

    /// Replace the cached user record, keeping the token.
    ///
    /// # Errors
    /// Returns [`AuthError::NotAuthenticated`] without a session, or
    /// [`AuthError::Storage`] if the record cannot be persisted.
    pub fn update_user(&self, user: User) -> Result<(), AuthError> {
        let token = self.token().ok_or(AuthError::NotAuthenticated)?;
        self.inner.store.save_user(&user)?;
        debug!(user = %user.email, "updated cached user");
        self.replace(AuthSnapshot::authenticated(token, user));
        Ok(())
    }

    #[must_use]
    pub fn snapshot(&self) -> AuthSnapshot {
        self.inner.state.borrow().clone()
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.inner.state.borrow().user.clone()
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.inner.state.borrow().token.clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().is_authenticated()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.inner.state.borrow().is_admin()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().loading
    }

    pub fn session_store(&self) -> &SessionStore<S> {
        &self.inner.store
    }

    /// Register a callback run after every state change.
    pub fn subscribe(&self, listener: impl Fn(&AuthSnapshot) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        id
    }

    /// Returns whether a listener was removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.inner.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    fn replace(&self, snapshot: AuthSnapshot) {
        *self.inner.state.borrow_mut() = snapshot.clone();
        // Listeners may re-enter the context, so run them on a copy.
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&snapshot);
        }
    }
}
