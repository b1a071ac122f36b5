use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::Role;

/// Permission identifier.
///
/// Permissions are opaque strings (e.g. "products.write"). The wildcard
/// `"*"` grants everything.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub const ALL: Permission = Permission::from_static("*");
    pub const DASHBOARD_READ: Permission = Permission::from_static("dashboard.read");
    pub const PRODUCTS_READ: Permission = Permission::from_static("products.read");
    pub const PRODUCTS_WRITE: Permission = Permission::from_static("products.write");
    pub const MOVEMENTS_READ: Permission = Permission::from_static("movements.read");
    pub const MOVEMENTS_CREATE: Permission = Permission::from_static("movements.create");
    pub const STOCK_READ: Permission = Permission::from_static("stock.read");
    pub const REPORTS_READ: Permission = Permission::from_static("reports.read");
    pub const CATEGORIES_WRITE: Permission = Permission::from_static("categories.write");
    pub const WAREHOUSES_WRITE: Permission = Permission::from_static("warehouses.write");
    pub const USERS_WRITE: Permission = Permission::from_static("users.write");

    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_wildcard(&self) -> bool {
        self.as_str() == "*"
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Permissions granted by a role.
pub fn role_permissions(role: Role) -> Vec<Permission> {
    match role {
        Role::Administrador => vec![Permission::ALL],
        Role::Colaborador => vec![
            Permission::DASHBOARD_READ,
            Permission::PRODUCTS_READ,
            Permission::MOVEMENTS_READ,
            Permission::MOVEMENTS_CREATE,
            Permission::STOCK_READ,
            Permission::REPORTS_READ,
        ],
    }
}
