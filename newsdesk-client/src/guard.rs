//! Route guard: whether a protected view may render for the current session.
//!
//! [`decide`] is pure; the view layer performs whatever redirect it returns.

use shared::models::UserRole;

use crate::session::SessionState;

/// Path of the login view.
pub const LOGIN_PATH: &str = "/login";
/// Path users are sent to when their role does not admit a view.
pub const HOME_PATH: &str = "/";

/// Who may see a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Any authenticated user.
    Any,
    /// Only users holding one of these roles.
    Roles(&'static [UserRole]),
}

impl Access {
    /// Admins only.
    pub const ADMIN: Self = Self::Roles(&[UserRole::Admin]);
    /// Admins and editors.
    pub const ADMIN_OR_EDITOR: Self = Self::Roles(&[UserRole::Admin, UserRole::Editor]);

    /// Whether a user with `role` may see the view.
    pub fn admits(self, role: UserRole) -> bool {
        match self {
            Self::Any => true,
            Self::Roles(roles) => roles.contains(&role),
        }
    }
}

/// Outcome of a guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session restore is still running; render nothing.
    Wait,
    /// Nobody is logged in.
    RedirectToLogin {
        /// Where to return after login.
        from: String,
    },
    /// Logged in, but the role does not admit this view.
    RedirectHome,
    /// The view may render.
    Render,
}

/// Decides what a view guarded by `access` should do for `state`.
///
/// `location` is the path being visited; it becomes the `from` of a login
/// redirect. No I/O happens here.
pub fn decide(state: &SessionState, access: Access, location: &str) -> GuardDecision {
    if state.is_loading() {
        return GuardDecision::Wait;
    }
    match state.user() {
        None => GuardDecision::RedirectToLogin {
            from: location.to_string(),
        },
        Some(user) if !access.admits(user.role) => GuardDecision::RedirectHome,
        Some(_) => GuardDecision::Render,
    }
}

/// Where to go after a successful login, given the captured `from` location.
///
/// Only same-origin absolute paths are honoured; anything else, including a
/// loop back to the login view, falls back to [`HOME_PATH`].
pub fn login_redirect_target(from: Option<&str>) -> String {
    match from.map(str::trim) {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && path != LOGIN_PATH
                && !path.starts_with("/login?") =>
        {
            path.to_string()
        }
        _ => HOME_PATH.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Credentials;
    use shared::models::UserRecord;

    fn signed_in(role: UserRole) -> SessionState {
        SessionState::Authenticated(Credentials::new("t", UserRecord::new(1, role)))
    }

    #[test]
    fn waits_while_loading() {
        let loading = SessionState::Loading {
            pending: Some(Credentials::new("t", UserRecord::new(1, UserRole::Admin))),
        };
        for state in [SessionState::Uninitialized, loading, SessionState::Loading { pending: None }] {
            assert_eq!(decide(&state, Access::Any, "/"), GuardDecision::Wait);
            assert_eq!(decide(&state, Access::ADMIN, "/users"), GuardDecision::Wait);
        }
    }

    #[test]
    fn anonymous_goes_to_login_with_origin() {
        assert_eq!(
            decide(&SessionState::Anonymous, Access::Any, "/news"),
            GuardDecision::RedirectToLogin {
                from: "/news".to_string()
            }
        );
    }

    #[test]
    fn wrong_role_goes_home() {
        assert_eq!(
            decide(&signed_in(UserRole::Author), Access::ADMIN, "/users"),
            GuardDecision::RedirectHome
        );
        assert_eq!(
            decide(&signed_in(UserRole::Author), Access::ADMIN_OR_EDITOR, "/banners"),
            GuardDecision::RedirectHome
        );
    }

    #[test]
    fn admitted_role_renders() {
        assert_eq!(
            decide(&signed_in(UserRole::Admin), Access::ADMIN, "/users"),
            GuardDecision::Render
        );
        assert_eq!(
            decide(&signed_in(UserRole::Editor), Access::ADMIN_OR_EDITOR, "/submissions"),
            GuardDecision::Render
        );
        assert_eq!(
            decide(&signed_in(UserRole::Author), Access::Any, "/news"),
            GuardDecision::Render
        );
    }

    #[test]
    fn redirect_target_sanitizing() {
        assert_eq!(login_redirect_target(Some("/news/4/edit")), "/news/4/edit");
        assert_eq!(login_redirect_target(None), "/");
        assert_eq!(login_redirect_target(Some("https://evil.example")), "/");
        assert_eq!(login_redirect_target(Some("//evil.example")), "/");
        assert_eq!(login_redirect_target(Some("/login")), "/");
    }
}
