//! `stockdesk-auth`: who is signed in and what they may do.
//!
//! Decoupled from HTTP and from where the token is persisted: callers plug
//! in a [`TokenStorage`] and report the outcome of API calls to the
//! [`AuthStore`].

pub mod authorize;
pub mod permissions;
pub mod roles;
pub mod session;
pub mod user;

pub use authorize::{AuthzError, Route, RouteDecision, authorize, guard};
pub use permissions::{Permission, role_permissions};
pub use roles::Role;
pub use session::{
    AuthState, AuthStore, LoginForm, LoginRequest, MemoryTokenStorage, SessionError,
    StoredSession, TokenStorage,
};
pub use user::{User, UserForm, UserPayload};
