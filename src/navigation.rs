//! Role-gated routing for the web client's screens.

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Role;

pub const LANDING_PATH: &str = "/";
pub const SIGN_IN_PATH: &str = "/auth";
pub const FORBIDDEN_PATH: &str = "/forbidden";
pub const CUSTOMER_HOME_PATH: &str = "/customer";
pub const OWNER_HOME_PATH: &str = "/owner/dashboard";
pub const ADMIN_HOME_PATH: &str = "/admin/dashboard";

/// Where a signed-in user lands. Used after login, after sign-up and by `/api/auth/me`.
pub fn home_path(role: Option<Role>) -> &'static str {
    match role {
        Some(Role::Customer) => CUSTOMER_HOME_PATH,
        Some(Role::Owner) => OWNER_HOME_PATH,
        Some(Role::Admin) => ADMIN_HOME_PATH,
        None => LANDING_PATH,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppRoute {
    Landing,
    Auth,
    Login,
    SignUp,
    CustomerHome,
    FieldDetails(String),
    Booking(String),
    OwnerDashboard,
    AdminDashboard,
    Forbidden,
    NotFound,
}

impl AppRoute {
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => AppRoute::Landing,
            ["auth"] => AppRoute::Auth,
            ["login"] => AppRoute::Login,
            ["signup"] => AppRoute::SignUp,
            ["customer"] => AppRoute::CustomerHome,
            ["field", id] => AppRoute::FieldDetails((*id).to_string()),
            ["book", id] => AppRoute::Booking((*id).to_string()),
            ["owner", "dashboard"] => AppRoute::OwnerDashboard,
            ["admin", "dashboard"] => AppRoute::AdminDashboard,
            ["forbidden"] => AppRoute::Forbidden,
            _ => AppRoute::NotFound,
        }
    }

    pub fn required_role(&self) -> Option<Role> {
        match self {
            AppRoute::CustomerHome | AppRoute::Booking(_) => Some(Role::Customer),
            AppRoute::OwnerDashboard => Some(Role::Owner),
            AppRoute::AdminDashboard => Some(Role::Admin),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: Uuid,
    pub role: Role,
}

/// What the guard knows about the current user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Loading,
    Unauthenticated,
    Authenticated(Session),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GuardDecision {
    /// Session still resolving; show a placeholder.
    Wait,
    Render,
    Redirect { location: String },
}

impl GuardDecision {
    fn redirect(location: &str) -> Self {
        GuardDecision::Redirect {
            location: location.to_string(),
        }
    }
}

/// Decide whether a protected screen may render.
///
/// `required` is the route's role, or `None` for any signed-in user. The
/// destination is not remembered across the sign-in redirect.
pub fn guard(state: &SessionState, required: Option<Role>) -> GuardDecision {
    match state {
        SessionState::Loading => GuardDecision::Wait,
        SessionState::Unauthenticated => GuardDecision::redirect(SIGN_IN_PATH),
        SessionState::Authenticated(session) => match required {
            Some(role) if role != session.role => GuardDecision::redirect(FORBIDDEN_PATH),
            _ => GuardDecision::Render,
        },
    }
}

/// Guard a path. Public routes render for everyone.
pub fn resolve(path: &str, state: &SessionState) -> GuardDecision {
    match AppRoute::parse(path).required_role() {
        Some(role) => guard(state, Some(role)),
        None => GuardDecision::Render,
    }
}
