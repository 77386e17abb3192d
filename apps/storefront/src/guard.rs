//! # Route Guards
//!
//! Decides whether a screen may render for the current session.
//!
//! ```text
//! ┌───────────────┬──────────────────┬──────────────────┬─────────────────┐
//! │ guard         │ auth loading     │ signed out       │ signed in       │
//! ├───────────────┼──────────────────┼──────────────────┼─────────────────┤
//! │ Public        │ Allow            │ Allow            │ Allow           │
//! │ Authenticated │ Wait             │ → /login         │ Allow           │
//! │ Admin         │ Wait             │ → /login         │ Allow if admin  │
//! │               │                  │                  │ else → /        │
//! └───────────────┴──────────────────┴──────────────────┴─────────────────┘
//! ```

use crate::state::AuthState;

/// Where a redirect sends the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
}

impl Route {
    pub const fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
        }
    }
}

/// Guard outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    /// Auth is still settling; show a loading indicator.
    Wait,
    Redirect(Route),
}

/// Protection level of a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteGuard {
    Public,
    Authenticated,
    Admin,
}

impl RouteGuard {
    pub fn check(&self, auth: &AuthState) -> Access {
        match self {
            RouteGuard::Public => Access::Allow,
            _ if auth.loading => Access::Wait,
            _ if !auth.is_authenticated() => Access::Redirect(Route::Login),
            RouteGuard::Authenticated => Access::Allow,
            RouteGuard::Admin if auth.is_admin() => Access::Allow,
            RouteGuard::Admin => Access::Redirect(Route::Home),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testing::user;
    use storefront_core::ADMIN_EMAIL;

    fn signed_in(email: &str) -> AuthState {
        AuthState {
            user: Some(user(email)),
            token: Some("jwt".to_string()),
            ..AuthState::default()
        }
    }

    #[test]
    fn test_public_always_allows() {
        assert_eq!(RouteGuard::Public.check(&AuthState::default()), Access::Allow);
    }

    #[test]
    fn test_authenticated_guard() {
        let guard = RouteGuard::Authenticated;
        assert_eq!(
            guard.check(&AuthState::default()),
            Access::Redirect(Route::Login)
        );
        assert_eq!(guard.check(&signed_in("a@example.com")), Access::Allow);

        let loading = AuthState {
            loading: true,
            ..AuthState::default()
        };
        assert_eq!(guard.check(&loading), Access::Wait);
    }

    #[test]
    fn test_admin_guard() {
        let guard = RouteGuard::Admin;
        assert_eq!(
            guard.check(&AuthState::default()),
            Access::Redirect(Route::Login)
        );
        assert_eq!(
            guard.check(&signed_in("a@example.com")),
            Access::Redirect(Route::Home)
        );
        assert_eq!(guard.check(&signed_in(ADMIN_EMAIL)), Access::Allow);
        assert_eq!(Route::Login.path(), "/login");
    }
}
