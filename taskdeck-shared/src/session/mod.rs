//! # Session persistence
//!
//! A session is the pairing of a bearer token with the user record it
//! authenticates, plus the instant after which it is no longer trusted. The
//! [`SessionStore`] keeps it in a durable [`KeyValueStore`] under the `token`,
//! `user` and `expires_at` keys.

#[cfg(not(target_arch = "wasm32"))]
mod file;
mod store;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
pub use store::{KeyValueStore, MemoryStore, StorageError};

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{debug, warn};

use crate::models::User;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";
pub const EXPIRES_AT_KEY: &str = "expires_at";

const SESSION_KEYS: [&str; 3] = [TOKEN_KEY, USER_KEY, EXPIRES_AT_KEY];

/// Token/user pair with its freshness deadline.
///
/// `token` and `user` are either both present or both absent in any session
/// returned by [`SessionStore::load`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    /// The empty session `{ null, null }`.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn new(token: impl Into<String>, user: User, expires_at: DateTime<Utc>) -> Self {
        Self {
            token: Some(token.into()),
            user: Some(user),
            expires_at: Some(expires_at),
        }
    }

    /// True unless both halves of the pair are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.token.is_none() || self.user.is_none()
    }

    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_none_or(|deadline| deadline <= now)
    }
}

/// Durable session storage over a key/value backend.
#[derive(Debug, Clone)]
pub struct SessionStore<S> {
    backend: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Load the persisted session as of now.
    pub fn load(&self) -> Session {
        self.load_at(Utc::now())
    }

    /// Load the persisted session as of `now`.
    ///
    /// Partial, undecodable, undated or expired entries yield the empty
    /// session and are purged from the backend.
    pub fn load_at(&self, now: DateTime<Utc>) -> Session {
        let token = self.backend.get(TOKEN_KEY);
        let raw_user = self.backend.get(USER_KEY);
        let raw_expiry = self.backend.get(EXPIRES_AT_KEY);

        let (token, raw_user) = match (token, raw_user) {
            (Some(token), Some(raw_user)) => (token, raw_user),
            (None, None) => return Session::empty(),
            _ => {
                debug!("discarding half-persisted session");
                self.purge();
                return Session::empty();
            }
        };

        let user = match serde_json::from_str::<User>(&raw_user) {
            Ok(user) => user,
            Err(err) => {
                warn!(error = %err, "discarding session with unreadable user record");
                self.purge();
                return Session::empty();
            }
        };

        let Some(expires_at) = raw_expiry.as_deref().and_then(parse_timestamp) else {
            debug!("discarding session without a valid expiry");
            self.purge();
            return Session::empty();
        };

        let session = Session::new(token, user, expires_at);
        if session.is_expired_at(now) {
            debug!(expired_at = %expires_at, "discarding expired session");
            self.purge();
            return Session::empty();
        }
        session
    }

    /// Persist a session. A session missing either half clears the store.
    ///
    /// # Errors
    /// Returns [`StorageError`] when the backend cannot persist the entries.
    pub fn save(&self, session: &Session) -> Result<(), StorageError> {
        let (Some(token), Some(user), Some(expires_at)) =
            (&session.token, &session.user, session.expires_at)
        else {
            return self.clear();
        };

        let user = serde_json::to_string(user)?;
        self.backend.set_all(&[
            (TOKEN_KEY, token.clone()),
            (USER_KEY, user),
            (
                EXPIRES_AT_KEY,
                expires_at.to_rfc3339_opts(SecondsFormat::Nanos, true),
            ),
        ])
    }

    /// Replace only the cached user record, keeping token and expiry.
    ///
    /// # Errors
    /// Returns [`StorageError`] when the backend cannot persist the record.
    pub fn save_user(&self, user: &User) -> Result<(), StorageError> {
        let user = serde_json::to_string(user)?;
        self.backend.set(USER_KEY, &user)
    }

    /// Remove every session key.
    ///
    /// # Errors
    /// Returns [`StorageError`] when the backend cannot persist the removal.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.backend.remove_all(&SESSION_KEYS)
    }

    fn purge(&self) {
        if let Err(err) = self.clear() {
            warn!(error = %err, "failed to purge stale session");
        }
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|value| value.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;
    use chrono::Duration;

    fn user() -> User {
        User {
            id: "u-1".into(),
            name: "Ada".into(),
            email: "a@b.com".into(),
            role: UserRole::User,
        }
    }

    fn store() -> SessionStore<MemoryStore> {
        SessionStore::new(MemoryStore::new())
    }

    #[test]
    fn save_then_load_roundtrips() {
        let store = store();
        let now = Utc::now();
        let session = Session::new("tok", user(), now + Duration::hours(1));

        store.save(&session).unwrap();

        assert_eq!(store.load_at(now), session);
    }

    #[test]
    fn clear_yields_empty_session() {
        let store = store();
        let now = Utc::now();
        store
            .save(&Session::new("tok", user(), now + Duration::hours(1)))
            .unwrap();

        store.clear().unwrap();

        assert_eq!(store.load_at(now), Session::empty());
        assert!(store.backend().is_empty());
    }

    #[test]
    fn token_without_user_is_absent() {
        let store = store();
        store.backend().set(TOKEN_KEY, "tok").unwrap();

        let loaded = store.load();

        assert!(loaded.is_empty());
        assert_eq!(loaded, Session::empty());
        assert!(store.backend().is_empty(), "half pair is purged");
    }

    #[test]
    fn user_without_token_is_absent() {
        let store = store();
        store
            .backend()
            .set(USER_KEY, &serde_json::to_string(&user()).unwrap())
            .unwrap();

        assert_eq!(store.load(), Session::empty());
    }

    #[test]
    fn undecodable_user_is_absent() {
        let store = store();
        store.backend().set(TOKEN_KEY, "tok").unwrap();
        store.backend().set(USER_KEY, "{not json").unwrap();
        store
            .backend()
            .set(EXPIRES_AT_KEY, "2999-01-01T00:00:00Z")
            .unwrap();

        assert_eq!(store.load(), Session::empty());
    }

    #[test]
    fn expired_session_is_absent() {
        let store = store();
        let now = Utc::now();
        store
            .save(&Session::new("tok", user(), now - Duration::seconds(1)))
            .unwrap();

        assert_eq!(store.load_at(now), Session::empty());
        assert!(store.backend().is_empty());
    }

    #[test]
    fn session_expiring_exactly_now_is_absent() {
        let store = store();
        let now = Utc::now();
        store.save(&Session::new("tok", user(), now)).unwrap();

        assert!(store.load_at(now).is_empty());
    }

    #[test]
    fn session_without_expiry_is_absent() {
        let store = store();
        store.backend().set(TOKEN_KEY, "tok").unwrap();
        store
            .backend()
            .set(USER_KEY, &serde_json::to_string(&user()).unwrap())
            .unwrap();

        assert_eq!(store.load(), Session::empty());
    }

    #[test]
    fn saving_half_session_clears_store() {
        let store = store();
        let now = Utc::now();
        store
            .save(&Session::new("tok", user(), now + Duration::hours(1)))
            .unwrap();

        let half = Session {
            token: Some("tok".into()),
            user: None,
            expires_at: None,
        };
        store.save(&half).unwrap();

        assert!(store.backend().is_empty());
    }

    #[test]
    fn save_user_keeps_token_and_expiry() {
        let store = store();
        let now = Utc::now();
        let deadline = now + Duration::hours(2);
        store.save(&Session::new("tok", user(), deadline)).unwrap();

        let renamed = User {
            name: "Ada L.".into(),
            ..user()
        };
        store.save_user(&renamed).unwrap();

        let loaded = store.load_at(now);
        assert_eq!(loaded.token.as_deref(), Some("tok"));
        assert_eq!(loaded.user, Some(renamed));
        assert_eq!(loaded.expires_at, Some(deadline));
    }
}
