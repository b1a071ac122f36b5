use thiserror::Error;

use crate::{AuthState, Permission, Role, role_permissions};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("not signed in")]
    Unauthenticated,

    #[error("forbidden: missing permission '{0}'")]
    Forbidden(String),
}

/// Authorize a role against a required permission.
///
/// Pure policy check; the API still enforces its own rules.
pub fn authorize(role: Role, required: &Permission) -> Result<(), AuthzError> {
    let granted = role_permissions(role)
        .iter()
        .any(|p| p.is_wildcard() || p == required);

    if granted {
        Ok(())
    } else {
        Err(AuthzError::Forbidden(required.as_str().to_string()))
    }
}

/// Screens of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Dashboard,
    Products,
    Movements,
    StockAlerts,
    Categories,
    Warehouses,
    Users,
}

impl Route {
    pub const ALL: [Route; 8] = [
        Route::Login,
        Route::Dashboard,
        Route::Products,
        Route::Movements,
        Route::StockAlerts,
        Route::Categories,
        Route::Warehouses,
        Route::Users,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Dashboard => "/dashboard",
            Route::Products => "/productos",
            Route::Movements => "/movimientos",
            Route::StockAlerts => "/stock",
            Route::Categories => "/categorias",
            Route::Warehouses => "/almacenes",
            Route::Users => "/usuarios",
        }
    }

    /// Resolve a path; unknown paths land on the dashboard.
    pub fn from_path(path: &str) -> Route {
        let trimmed = path.trim_end_matches('/');
        Route::ALL
            .into_iter()
            .find(|r| r.path() == trimmed)
            .unwrap_or(Route::Dashboard)
    }

    /// Permission needed to open the route, `None` for the public login screen.
    pub fn required_permission(&self) -> Option<Permission> {
        match self {
            Route::Login => None,
            Route::Dashboard => Some(Permission::DASHBOARD_READ),
            Route::Products => Some(Permission::PRODUCTS_READ),
            Route::Movements => Some(Permission::MOVEMENTS_READ),
            Route::StockAlerts => Some(Permission::STOCK_READ),
            Route::Categories => Some(Permission::CATEGORIES_WRITE),
            Route::Warehouses => Some(Permission::WAREHOUSES_WRITE),
            Route::Users => Some(Permission::USERS_WRITE),
        }
    }

    pub fn admin_only(&self) -> bool {
        matches!(self, Route::Categories | Route::Warehouses | Route::Users)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Session still hydrating; show a loading state.
    Pending,
    Allow,
    Redirect(Route),
}

/// Decide whether the current auth state may open `route`.
pub fn guard(state: &AuthState, route: Route) -> RouteDecision {
    match (state, route) {
        (AuthState::Loading, _) => RouteDecision::Pending,
        (AuthState::Anonymous, Route::Login) => RouteDecision::Allow,
        (AuthState::Anonymous, _) => RouteDecision::Redirect(Route::Login),
        (AuthState::Authenticated { .. }, Route::Login) => {
            RouteDecision::Redirect(Route::Dashboard)
        }
        (AuthState::Authenticated { user, .. }, route) => match route.required_permission() {
            Some(perm) if authorize(user.role, &perm).is_err() => {
                RouteDecision::Redirect(Route::Dashboard)
            }
            _ => RouteDecision::Allow,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::User;
    use stockdesk_core::UserId;

    fn signed_in(role: Role) -> AuthState {
        AuthState::Authenticated {
            token: "t".into(),
            user: User {
                id: UserId::new(1),
                name: "Ana".into(),
                email: "ana@example.com".into(),
                role,
                created_at: None,
            },
        }
    }

    #[test]
    fn admin_has_wildcard() {
        for perm in [
            Permission::PRODUCTS_WRITE,
            Permission::USERS_WRITE,
            Permission::new("anything.else"),
        ] {
            assert!(authorize(Role::Administrador, &perm).is_ok());
        }
    }

    #[test]
    fn colaborador_can_record_movements_but_not_manage_catalog() {
        assert!(authorize(Role::Colaborador, &Permission::MOVEMENTS_CREATE).is_ok());
        assert!(authorize(Role::Colaborador, &Permission::PRODUCTS_READ).is_ok());
        assert_eq!(
            authorize(Role::Colaborador, &Permission::PRODUCTS_WRITE),
            Err(AuthzError::Forbidden("products.write".into()))
        );
        assert!(authorize(Role::Colaborador, &Permission::USERS_WRITE).is_err());
    }

    #[test]
    fn loading_state_is_pending_everywhere() {
        for route in Route::ALL {
            assert_eq!(guard(&AuthState::Loading, route), RouteDecision::Pending);
        }
    }

    #[test]
    fn anonymous_is_sent_to_login() {
        assert_eq!(guard(&AuthState::Anonymous, Route::Login), RouteDecision::Allow);
        assert_eq!(
            guard(&AuthState::Anonymous, Route::Products),
            RouteDecision::Redirect(Route::Login)
        );
    }

    #[test]
    fn admin_only_routes_redirect_colaborador() {
        let state = signed_in(Role::Colaborador);
        for route in Route::ALL.into_iter().filter(Route::admin_only) {
            assert_eq!(guard(&state, route), RouteDecision::Redirect(Route::Dashboard));
        }
        assert_eq!(guard(&state, Route::Movements), RouteDecision::Allow);
        assert_eq!(guard(&state, Route::StockAlerts), RouteDecision::Allow);
    }

    #[test]
    fn admin_opens_everything_but_login() {
        let state = signed_in(Role::Administrador);
        assert_eq!(guard(&state, Route::Users), RouteDecision::Allow);
        assert_eq!(guard(&state, Route::Login), RouteDecision::Redirect(Route::Dashboard));
    }

    #[test]
    fn unknown_path_falls_back_to_dashboard() {
        assert_eq!(Route::from_path("/productos/"), Route::Products);
        assert_eq!(Route::from_path("/nope"), Route::Dashboard);
    }
}
