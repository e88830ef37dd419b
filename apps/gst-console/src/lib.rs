//! Terminal rendition of the GST compliance dashboard
//!
//! Screens (admin, user, GSTIN checker) share one [`Dashboard`] controller
//! configured by a [`ScreenProfile`]. Sessions come from an injected
//! [`SessionStore`]; the binary stores them in a JSON file.

pub mod app;
pub mod browse;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod edit;
pub mod error;
pub mod gate;
pub mod login;
pub mod render;
pub mod screen;
pub mod session_store;

pub use dashboard::{Dashboard, DashboardOptions, LoadTicket};
pub use edit::{EditError, EditState, EditWorkflow};
pub use error::ConsoleError;
pub use gate::{GateDecision, RedirectReason, RoleRequirement};
pub use screen::{EditMode, Screen, ScreenProfile};
pub use session_store::{FileSessionStore, MemorySessionStore, SessionStore};
