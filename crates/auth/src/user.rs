//! User accounts as the API exposes them, and the form that edits them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockdesk_core::{Email, Entity, FieldErrors, UserId};

use crate::Role;

/// Minimum password length accepted by the user form.
pub const MIN_PASSWORD_LEN: usize = 6;

/// A user account. The password never comes back from the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "rol")]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> UserId {
        self.id
    }
}

/// Body of `POST /users` and `PUT /users/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserPayload {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "contrasenia", skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(rename = "rol")]
    pub role: Role,
}

/// User create/edit form.
///
/// `editing` is `Some` when an existing account is being changed; a blank
/// password then keeps the current one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserForm {
    pub editing: Option<UserId>,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl UserForm {
    pub fn for_create() -> Self {
        Self::default()
    }

    pub fn for_edit(user: &User) -> Self {
        Self {
            editing: Some(user.id),
            name: user.name.clone(),
            email: user.email.clone(),
            password: String::new(),
            role: user.role,
        }
    }

    pub fn is_edit(&self) -> bool {
        self.editing.is_some()
    }

    pub fn validate(&self) -> Result<UserPayload, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.insert("nombre", "El nombre es requerido");
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.insert("correo", "El correo es requerido");
        } else if Email::parse(email).is_err() {
            errors.insert("correo", "El correo no es válido");
        }

        let password_blank = self.password.trim().is_empty();
        if !self.is_edit() && password_blank {
            errors.insert("contrasenia", "La contraseña es requerida");
        } else if !password_blank && self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.insert(
                "contrasenia",
                format!("La contraseña debe tener al menos {MIN_PASSWORD_LEN} caracteres"),
            );
        }

        errors.into_result(|| UserPayload {
            name: name.to_string(),
            email: email.to_string(),
            password: (!password_blank).then(|| self.password.clone()),
            role: self.role,
        })
    }
}
