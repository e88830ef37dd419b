//! Login and logout, and where a fresh login lands

use crate::error::ConsoleError;
use crate::screen::Screen;
use crate::session_store::SessionStore;
use gst_client::{ClientError, CompanyApi, Credentials};
use gst_types::Role;

/// Shown when the backend could not be asked at all
pub const LOGIN_UNAVAILABLE: &str = "An error occurred. Please try again later.";

/// Screen a successful login opens.
///
/// Only an admin who asked for the admin login reaches the admin dashboard.
pub fn landing_screen(role: &Role, login_as_admin: bool) -> Screen {
    if role.is_admin() && login_as_admin {
        Screen::Admin
    } else {
        Screen::User
    }
}

/// Authenticate, persist the session and pick the landing screen
pub async fn login<A, S>(
    api: &A,
    store: &S,
    credentials: &Credentials,
) -> Result<Screen, ConsoleError>
where
    A: CompanyApi + ?Sized,
    S: SessionStore + ?Sized,
{
    let session = api.login(credentials).await?;
    store.save(&session)?;

    let screen = landing_screen(&session.role, credentials.login_as_admin);
    tracing::info!(role = %session.role, %screen, "Login succeeded");
    Ok(screen)
}

pub fn logout<S: SessionStore + ?Sized>(store: &S) -> Result<(), ConsoleError> {
    store.clear()?;
    tracing::info!("Logged out");
    Ok(())
}

/// Message to show for a failed [`login`]
pub fn failure_message(err: &ConsoleError) -> String {
    match err {
        ConsoleError::Client(ClientError::LoginRejected(message)) => message.clone(),
        ConsoleError::Client(_) => LOGIN_UNAVAILABLE.to_string(),
        other => other.to_string(),
    }
}
