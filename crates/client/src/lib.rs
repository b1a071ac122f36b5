//! `stockdesk-client`
//!
//! **Responsibility:** the inventory front end as a library plus the
//! `stockdesk` command line.
//!
//! This crate provides:
//! - a typed REST client with bearer auth
//! - the persisted, explicitly passed session
//! - latest-wins list queries, submit guards and delete confirmation
//! - page models for every screen and report download
//!
//! The API remains the authority; nothing is cached between runs except the
//! session.

pub mod api;
pub mod config;
pub mod confirm;
pub mod error;
pub mod format;
pub mod pages;
pub mod query;
pub mod reports;
pub mod session;
pub mod storage;
pub mod submit;

pub use api::ApiClient;
pub use config::{ClientConfig, ConfigError};
pub use confirm::{Confirmation, Confirmed};
pub use error::{ApiError, Feedback, Notification, SubmitError};
pub use query::{Applied, ListQuery, Ticket};
pub use reports::{ReportError, ReportFile, ReportFormat, ReportKind, ReportRequest};
pub use session::Session;
pub use storage::FileTokenStorage;
pub use submit::{SubmitGuard, SubmitPermit};

/// Session backed by the configured session file, not yet restored.
pub fn open_session(config: &ClientConfig) -> Result<Session<FileTokenStorage>, ApiError> {
    let api = ApiClient::new(config)?;
    Ok(Session::new(api, FileTokenStorage::new(&config.session_file)))
}
