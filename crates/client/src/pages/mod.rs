//! Framework-agnostic page models.
//!
//! A page model owns the state a screen renders (lists, open form, field
//! errors, notifications, busy flags) and the flows behind its buttons. It
//! renders nothing; the CLI and any graphical shell read its state.

pub mod admin;
pub mod dashboard;
pub mod movements;
pub mod products;
pub mod stock;

pub use admin::{AdminPage, AdminResource, CategoriesPage, UsersPage, WarehousesPage};
pub use dashboard::DashboardPage;
pub use movements::{MovementRecorder, MovementsPage};
pub use products::ProductsPage;
pub use stock::StockAlertsPage;

use stockdesk_core::FieldErrors;

use crate::error::{ApiError, Feedback, Notification, SubmitError};

/// An open create/edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editor<Id, F> {
    /// `Some` when editing an existing record.
    pub editing: Option<Id>,
    pub form: F,
    pub errors: FieldErrors,
}

impl<Id: Copy, F> Editor<Id, F> {
    pub fn create(form: F) -> Self {
        Self { editing: None, form, errors: FieldErrors::new() }
    }

    pub fn edit(id: Id, form: F) -> Self {
        Self { editing: Some(id), form, errors: FieldErrors::new() }
    }

    pub fn is_edit(&self) -> bool {
        self.editing.is_some()
    }

    /// The user touched `field`; its message goes away.
    pub fn touch(&mut self, field: &str) {
        self.errors.clear_field(field);
    }
}

/// Pending notifications, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notices(Vec<Notification>);

impl Notices {
    pub fn push(&mut self, notice: Notification) {
        self.0.push(notice);
    }

    pub fn success(&mut self, message: &str) {
        self.push(Notification::success(message));
    }

    pub fn error(&mut self, message: &str) {
        self.push(Notification::error(message));
    }

    pub fn last(&self) -> Option<&Notification> {
        self.0.last()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Hand over everything queued so far.
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.0)
    }
}

/// User-facing texts of one kind of record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Messages {
    pub created: &'static str,
    pub updated: &'static str,
    pub deleted: &'static str,
    pub load_failed: &'static str,
    pub save_failed: &'static str,
    pub delete_failed: &'static str,
}

/// Route a failed write to the form (field error) or the notifications.
pub(crate) fn report_failure(
    errors: Option<&mut FieldErrors>,
    notices: &mut Notices,
    err: ApiError,
    fallback: &str,
) -> SubmitError {
    match (err.clone().into_feedback(fallback), errors) {
        (Feedback::Field(fields), Some(errors)) => {
            for (field, message) in fields.iter() {
                errors.insert(field, message);
            }
        }
        (Feedback::Field(fields), None) => {
            for (_, message) in fields.iter() {
                notices.error(message);
            }
        }
        (Feedback::Notice(notice), _) => notices.push(notice),
    }
    SubmitError::Api(err)
}

/// Record a failed list load; rows already shown stay as they are.
pub(crate) fn report_load_failure(notices: &mut Notices, err: &ApiError, fallback: &str) {
    tracing::warn!(error = %err, "list load failed");
    match err.clone().into_feedback(fallback) {
        Feedback::Notice(notice) => notices.push(notice),
        Feedback::Field(_) => notices.error(fallback),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_rejection_lands_in_form() {
        let mut errors = FieldErrors::new();
        let mut notices = Notices::default();
        let err = ApiError::Rejected { status: 409, message: "El SKU ya existe".into() };
        report_failure(Some(&mut errors), &mut notices, err, "Error al guardar el producto");
        assert_eq!(errors.get("sku"), Some("El SKU ya existe"));
        assert!(notices.is_empty());
    }

    #[test]
    fn network_failure_becomes_notice() {
        let mut errors = FieldErrors::new();
        let mut notices = Notices::default();
        let err = ApiError::Network("refused".into());
        report_failure(Some(&mut errors), &mut notices, err, "Error al guardar el producto");
        assert!(errors.is_empty());
        assert_eq!(notices.drain(), vec![Notification::error("Error al guardar el producto")]);
        assert!(notices.is_empty());
    }
}
