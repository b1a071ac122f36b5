//! Explicit auth context.
//!
//! [`AuthStore`] owns the current [`AuthState`] and the [`TokenStorage`]
//! backing it. It performs no I/O against the API itself: the caller runs
//! `/auth/login` or `/auth/verify` and reports the outcome.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use stockdesk_core::FieldErrors;

use crate::User;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("session storage failed: {0}")]
    Storage(String),

    #[error("stored session is unreadable: {0}")]
    Corrupt(String),
}

/// What survives a restart: the bearer token and the user it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: String,
    pub user: User,
}

/// Persistence for the session.
pub trait TokenStorage {
    fn load(&self) -> Result<Option<StoredSession>, SessionError>;
    fn save(&self, session: &StoredSession) -> Result<(), SessionError>;
    fn clear(&self) -> Result<(), SessionError>;
}

/// Process-local storage, for tests and short-lived shells.
#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    slot: Mutex<Option<StoredSession>>,
}

impl MemoryTokenStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: StoredSession) -> Self {
        Self { slot: Mutex::new(Some(session)) }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<StoredSession>>, SessionError> {
        self.slot
            .lock()
            .map_err(|_| SessionError::Storage("memory slot poisoned".into()))
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn load(&self) -> Result<Option<StoredSession>, SessionError> {
        Ok(self.lock()?.clone())
    }

    fn save(&self, session: &StoredSession) -> Result<(), SessionError> {
        *self.lock()? = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.lock()? = None;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// A stored token is awaiting `/auth/verify`.
    Loading,
    Anonymous,
    Authenticated { token: String, user: User },
}

#[derive(Debug)]
struct PendingVerification {
    token: String,
    persist: bool,
}

pub struct AuthStore<S> {
    storage: S,
    state: AuthState,
    pending: Option<PendingVerification>,
}

impl<S: TokenStorage> AuthStore<S> {
    /// A store that has not looked at its storage yet.
    pub fn new(storage: S) -> Self {
        Self { storage, state: AuthState::Loading, pending: None }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    /// Read the stored session.
    ///
    /// Returns the token to verify when one was found; the store stays
    /// `Loading` until [`verified`](Self::verified) or
    /// [`verification_failed`](Self::verification_failed) is called.
    pub fn hydrate(&mut self) -> Option<String> {
        match self.storage.load() {
            Ok(Some(session)) if !session.token.trim().is_empty() => {
                debug!(user_id = %session.user.id, "stored session found, awaiting verification");
                Some(self.begin_verification(session.token, true))
            }
            Ok(_) => {
                self.state = AuthState::Anonymous;
                None
            }
            Err(err) => {
                warn!(error = %err, "discarding unreadable session");
                self.clear_storage();
                self.state = AuthState::Anonymous;
                None
            }
        }
    }

    /// Verify a token that did not come from storage (e.g. an environment
    /// override). It is never written back.
    pub fn hydrate_with_token(&mut self, token: impl Into<String>) -> String {
        self.begin_verification(token.into(), false)
    }

    fn begin_verification(&mut self, token: String, persist: bool) -> String {
        self.state = AuthState::Loading;
        self.pending = Some(PendingVerification { token: token.clone(), persist });
        token
    }

    /// `/auth/verify` accepted the token; the server's user replaces the stored one.
    pub fn verified(&mut self, user: User) {
        let Some(pending) = self.pending.take() else {
            debug!("verification result arrived with nothing pending, ignoring");
            return;
        };
        if pending.persist {
            let session = StoredSession { token: pending.token.clone(), user: user.clone() };
            if let Err(err) = self.storage.save(&session) {
                warn!(error = %err, "could not refresh stored user");
            }
        }
        info!(user_id = %user.id, role = %user.role, "session restored");
        self.state = AuthState::Authenticated { token: pending.token, user };
    }

    /// `/auth/verify` rejected the token (or could not be reached).
    pub fn verification_failed(&mut self) {
        if let Some(pending) = self.pending.take() {
            if pending.persist {
                self.clear_storage();
            }
        }
        info!("stored session rejected");
        self.state = AuthState::Anonymous;
    }

    /// Persist a fresh login and authenticate.
    ///
    /// If the session cannot be persisted the store is left unchanged.
    pub fn login(&mut self, token: String, user: User) -> Result<(), SessionError> {
        let session = StoredSession { token, user };
        self.storage.save(&session)?;
        info!(user_id = %session.user.id, role = %session.user.role, "logged in");
        self.pending = None;
        self.state = AuthState::Authenticated { token: session.token, user: session.user };
        Ok(())
    }

    pub fn logout(&mut self) {
        self.clear_storage();
        self.pending = None;
        self.state = AuthState::Anonymous;
    }

    /// The API answered 401: drop the session and force a new login.
    pub fn expire(&mut self) {
        if self.is_authenticated() {
            warn!("session expired");
        }
        self.logout();
    }

    fn clear_storage(&self) {
        if let Err(err) = self.storage.clear() {
            warn!(error = %err, "could not clear stored session");
        }
    }

    /// Token to attach to requests: the authenticated one, or the one being verified.
    pub fn token(&self) -> Option<&str> {
        match &self.state {
            AuthState::Authenticated { token, .. } => Some(token),
            AuthState::Loading => self.pending.as_ref().map(|p| p.token.as_str()),
            AuthState::Anonymous => None,
        }
    }

    pub fn user(&self) -> Option<&User> {
        match &self.state {
            AuthState::Authenticated { user, .. } => Some(user),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, AuthState::Loading)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, AuthState::Authenticated { .. })
    }

    pub fn is_admin(&self) -> bool {
        self.user().is_some_and(User::is_admin)
    }
}

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "contrasenia")]
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        let email = self.email.trim();
        if email.is_empty() {
            errors.insert("correo", "El correo es requerido");
        }
        if self.password.is_empty() {
            errors.insert("contrasenia", "La contraseña es requerida");
        }
        errors.into_result(|| LoginRequest {
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;
    use stockdesk_core::UserId;

    fn user(role: Role) -> User {
        User {
            id: UserId::new(7),
            name: "Ana".into(),
            email: "ana@example.com".into(),
            role,
            created_at: None,
        }
    }

    fn stored() -> StoredSession {
        StoredSession { token: "abc".into(), user: user(Role::Colaborador) }
    }

    struct BrokenStorage;

    impl TokenStorage for BrokenStorage {
        fn load(&self) -> Result<Option<StoredSession>, SessionError> {
            Err(SessionError::Corrupt("not json".into()))
        }
        fn save(&self, _: &StoredSession) -> Result<(), SessionError> {
            Err(SessionError::Storage("read-only".into()))
        }
        fn clear(&self) -> Result<(), SessionError> {
            Ok(())
        }
    }

    #[test]
    fn starts_loading_and_goes_anonymous_without_storage() {
        let mut store = AuthStore::new(MemoryTokenStorage::new());
        assert!(store.is_loading());
        assert_eq!(store.hydrate(), None);
        assert_eq!(store.state(), &AuthState::Anonymous);
        assert_eq!(store.token(), None);
    }

    #[test]
    fn stored_token_waits_for_verification() {
        let mut store = AuthStore::new(MemoryTokenStorage::with_session(stored()));
        assert_eq!(store.hydrate().as_deref(), Some("abc"));
        assert!(store.is_loading());
        assert_eq!(store.token(), Some("abc"));

        let mut fresh = user(Role::Administrador);
        fresh.name = "Ana María".into();
        store.verified(fresh.clone());

        assert!(store.is_admin());
        assert_eq!(store.user(), Some(&fresh));
        assert_eq!(store.storage().load().unwrap().unwrap().user, fresh);
    }

    #[test]
    fn rejected_token_clears_storage() {
        let mut store = AuthStore::new(MemoryTokenStorage::with_session(stored()));
        store.hydrate();
        store.verification_failed();
        assert_eq!(store.state(), &AuthState::Anonymous);
        assert_eq!(store.storage().load().unwrap(), None);
    }

    #[test]
    fn corrupt_storage_means_anonymous() {
        let mut store = AuthStore::new(BrokenStorage);
        assert_eq!(store.hydrate(), None);
        assert_eq!(store.state(), &AuthState::Anonymous);
    }

    #[test]
    fn login_persists_and_logout_clears() {
        let mut store = AuthStore::new(MemoryTokenStorage::new());
        store.hydrate();
        store.login("tok".into(), user(Role::Colaborador)).unwrap();
        assert!(store.is_authenticated());
        assert!(!store.is_admin());
        assert_eq!(store.storage().load().unwrap().unwrap().token, "tok");

        store.logout();
        assert_eq!(store.state(), &AuthState::Anonymous);
        assert_eq!(store.storage().load().unwrap(), None);
    }

    #[test]
    fn failed_persist_leaves_store_unchanged() {
        let mut store = AuthStore::new(BrokenStorage);
        store.hydrate();
        assert!(store.login("tok".into(), user(Role::Administrador)).is_err());
        assert_eq!(store.state(), &AuthState::Anonymous);
    }

    #[test]
    fn expire_clears_the_stored_session() {
        let mut store = AuthStore::new(MemoryTokenStorage::new());
        store.login("tok".into(), user(Role::Administrador)).unwrap();
        store.expire();
        assert!(!store.is_authenticated());
        assert_eq!(store.storage().load().unwrap(), None);
    }

    #[test]
    fn override_token_is_never_persisted() {
        let mut store = AuthStore::new(MemoryTokenStorage::new());
        assert_eq!(store.hydrate_with_token("env-token"), "env-token");
        store.verified(user(Role::Colaborador));
        assert_eq!(store.token(), Some("env-token"));
        assert_eq!(store.storage().load().unwrap(), None);
    }

    #[test]
    fn login_form_requires_both_fields() {
        let errors = LoginForm::default().validate().unwrap_err();
        assert_eq!(errors.len(), 2);

        let request = LoginForm { email: " ana@example.com ".into(), password: "pw".into() }
            .validate()
            .unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({ "correo": "ana@example.com", "contrasenia": "pw" }));
    }
}
