//! Session gate run when an authenticated screen mounts
//!
//! Purely advisory: the backend does not see the decision, it only keeps the
//! console from opening a screen the stored role was not meant to reach.

use gst_types::{Role, Session, SessionProvider};
use std::fmt;

/// Who may open a screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleRequirement {
    AnyAuthenticated,
    Admin,
}

impl RoleRequirement {
    pub fn allows(&self, role: &Role) -> bool {
        match self {
            RoleRequirement::AnyAuthenticated => true,
            RoleRequirement::Admin => role.is_admin(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectReason {
    NotLoggedIn,
    WrongRole { required: RoleRequirement, actual: Role },
}

impl fmt::Display for RedirectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RedirectReason::NotLoggedIn => f.write_str("not logged in"),
            RedirectReason::WrongRole { actual, .. } => {
                write!(f, "role '{}' may not open this screen", actual)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GateDecision {
    Authenticated(Session),
    RedirectToLogin(RedirectReason),
}

/// Decide whether the current session may open a screen
pub fn check<P>(provider: &P, requirement: RoleRequirement) -> GateDecision
where
    P: SessionProvider + ?Sized,
{
    let session = match provider.session() {
        Some(session) if session.has_token() => session,
        _ => return GateDecision::RedirectToLogin(RedirectReason::NotLoggedIn),
    };

    if requirement.allows(&session.role) {
        GateDecision::Authenticated(session)
    } else {
        tracing::info!(role = %session.role, ?requirement, "Role does not satisfy screen");
        GateDecision::RedirectToLogin(RedirectReason::WrongRole {
            required: requirement,
            actual: session.role,
        })
    }
}
