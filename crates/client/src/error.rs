//! Client-side error model and its mapping to what the user sees.

use serde::Serialize;
use thiserror::Error;

use stockdesk_auth::SessionError;
use stockdesk_core::FieldErrors;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    /// HTTP 401: the token is missing, invalid or expired.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("API error ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("parse error: {0}")]
    Parse(String),
}

/// Server message fragments that identify a form field, checked in order.
const FIELD_HINTS: &[(&str, &str)] = &[
    ("sku", "sku"),
    ("correo", "correo"),
    ("email", "correo"),
    ("nombre", "nombre"),
    ("cantidad", "cantidad"),
    ("stock", "cantidad"),
];

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            ApiError::Unauthorized(_) => Some(401),
            _ => None,
        }
    }

    /// The form field a rejection message refers to, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ApiError::Rejected { message, .. } => field_hint(message),
            _ => None,
        }
    }

    /// Map to a field error or a notification; `fallback` is used when the
    /// server gave no usable message.
    pub fn into_feedback(self, fallback: &str) -> Feedback {
        let message = match self {
            ApiError::Rejected { message, .. } => {
                if let Some(field) = field_hint(&message) {
                    return Feedback::Field(FieldErrors::single(field, message));
                }
                if message.trim().is_empty() { fallback.to_string() } else { message }
            }
            ApiError::Unauthorized(_) => "Tu sesión ha expirado, inicia sesión de nuevo".to_string(),
            ApiError::Network(_) | ApiError::Parse(_) => fallback.to_string(),
        };
        Feedback::Notice(Notification::error(message))
    }
}

fn field_hint(message: &str) -> Option<&'static str> {
    let lowered = message.to_lowercase();
    FIELD_HINTS
        .iter()
        .find(|(hint, _)| lowered.contains(hint))
        .map(|(_, field)| *field)
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Parse(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Info,
    Error,
}

/// A transient message for the user (a toast in a graphical shell).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: Level::Success, message: message.into() }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self { level: Level::Info, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: Level::Error, message: message.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Field(FieldErrors),
    Notice(Notification),
}

/// Why a form submission did not go through.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("invalid input: {0}")]
    Invalid(FieldErrors),

    #[error("a submission is already in flight")]
    Busy,

    #[error("no form is open")]
    NoForm,

    #[error("not allowed: {0}")]
    Forbidden(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl SubmitError {
    /// Field errors to show under the inputs, including mapped server rejections.
    pub fn field_errors(&self) -> Option<FieldErrors> {
        match self {
            SubmitError::Invalid(errors) => Some(errors.clone()),
            SubmitError::Api(err) => match err.clone().into_feedback("") {
                Feedback::Field(errors) => Some(errors),
                Feedback::Notice(_) => None,
            },
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected(message: &str) -> ApiError {
        ApiError::Rejected { status: 400, message: message.into() }
    }

    #[test]
    fn rejection_naming_a_field_maps_to_it() {
        assert_eq!(rejected("El SKU ya existe").field(), Some("sku"));
        assert_eq!(rejected("El correo ya está registrado").field(), Some("correo"));
        assert_eq!(rejected("Email duplicado").field(), Some("correo"));
        assert_eq!(rejected("Stock insuficiente").field(), Some("cantidad"));
        assert_eq!(rejected("Error interno").field(), None);
        assert_eq!(ApiError::Network("refused".into()).field(), None);
    }

    #[test]
    fn feedback_prefers_field_then_server_message_then_fallback() {
        let Feedback::Field(errors) = rejected("El SKU ya existe").into_feedback("x") else {
            panic!("expected field feedback");
        };
        assert_eq!(errors.get("sku"), Some("El SKU ya existe"));

        assert_eq!(
            rejected("No autorizado para esta acción").into_feedback("Error al guardar"),
            Feedback::Notice(Notification::error("No autorizado para esta acción"))
        );
        assert_eq!(
            ApiError::Network("connection refused".into()).into_feedback("Error al guardar"),
            Feedback::Notice(Notification::error("Error al guardar"))
        );
    }

    #[test]
    fn submit_error_exposes_mapped_fields() {
        let err = SubmitError::from(rejected("La cantidad excede el stock"));
        assert!(err.field_errors().unwrap().contains("cantidad"));
        assert_eq!(SubmitError::Busy.field_errors(), None);
    }
}
