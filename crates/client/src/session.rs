//! The signed-in session: API client plus auth store, kept in step.

use tracing::{info, warn};

use stockdesk_auth::{
    AuthState, AuthStore, AuthzError, LoginForm, Permission, TokenStorage, User, authorize,
};

use crate::api::ApiClient;
use crate::error::{ApiError, SubmitError};
use crate::submit::SubmitGuard;

pub struct Session<S> {
    api: ApiClient,
    store: AuthStore<S>,
    login_guard: SubmitGuard,
}

impl<S: TokenStorage> Session<S> {
    pub fn new(mut api: ApiClient, storage: S) -> Self {
        api.clear_token();
        Self { api, store: AuthStore::new(storage), login_guard: SubmitGuard::new() }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn store(&self) -> &AuthStore<S> {
        &self.store
    }

    pub fn state(&self) -> &AuthState {
        self.store.state()
    }

    pub fn user(&self) -> Option<&User> {
        self.store.user()
    }

    pub fn is_admin(&self) -> bool {
        self.store.is_admin()
    }

    pub fn login_busy(&self) -> bool {
        self.login_guard.is_busy()
    }

    /// Restore the stored session, verifying it with the server.
    pub async fn restore(&mut self) -> &AuthState {
        match self.store.hydrate() {
            Some(token) => self.verify(token).await,
            None => self.api.clear_token(),
        }
        self.store.state()
    }

    /// Authenticate with a token supplied out of band; it is not persisted.
    pub async fn restore_with_token(&mut self, token: &str) -> &AuthState {
        let token = self.store.hydrate_with_token(token);
        self.verify(token).await;
        self.store.state()
    }

    async fn verify(&mut self, token: String) {
        self.api.set_token(token);
        match self.api.verify().await {
            Ok(user) => self.store.verified(user),
            Err(err) => {
                warn!(error = %err, "session verification failed");
                self.store.verification_failed();
                self.api.clear_token();
            }
        }
    }

    pub async fn login(&mut self, form: &LoginForm) -> Result<User, SubmitError> {
        let _permit = self.login_guard.try_acquire().ok_or(SubmitError::Busy)?;
        let request = form.validate().map_err(SubmitError::Invalid)?;
        let response = self.api.login(&request).await?;
        self.store.login(response.token.clone(), response.user.clone())?;
        self.api.set_token(response.token);
        Ok(response.user)
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.store.user() {
            info!(user_id = %user.id, "logging out");
        }
        self.store.logout();
        self.api.clear_token();
    }

    /// Pass an API result through, expiring the session on HTTP 401.
    pub fn observe<T>(&mut self, result: Result<T, ApiError>) -> Result<T, ApiError> {
        if let Err(err) = &result {
            if err.is_unauthorized() {
                self.store.expire();
                self.api.clear_token();
            }
        }
        result
    }

    /// Check the signed-in user's role against a permission.
    pub fn authorize(&self, required: &Permission) -> Result<(), AuthzError> {
        let user = self.store.user().ok_or(AuthzError::Unauthenticated)?;
        authorize(user.role, required)
    }
}

impl From<AuthzError> for SubmitError {
    fn from(err: AuthzError) -> Self {
        SubmitError::Forbidden(err.to_string())
    }
}
