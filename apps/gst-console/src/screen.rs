//! The authenticated screens and what distinguishes them

use crate::gate::RoleRequirement;
use gst_summary::ExportLayout;
use std::fmt;
use std::str::FromStr;

/// What the edit form may change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    /// Read-only screen
    Disabled,
    /// Status and annual turnover through the full-record endpoint
    StatusAndTurnover,
    /// Status alone through the status endpoint
    StatusOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Admin,
    User,
    Checker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenProfile {
    pub title: &'static str,
    pub requirement: RoleRequirement,
    pub page_size: usize,
    pub edit_mode: EditMode,
    pub export_layout: ExportLayout,
    /// Whether the search box must hold a well-formed GSTIN
    pub validates_search: bool,
    /// Whether companies can be fetched from the registry from this screen
    pub can_add: bool,
}

impl Screen {
    pub fn profile(self) -> ScreenProfile {
        match self {
            Screen::Admin => ScreenProfile {
                title: "Admin Dashboard",
                requirement: RoleRequirement::Admin,
                page_size: 5,
                edit_mode: EditMode::StatusAndTurnover,
                export_layout: ExportLayout::Single,
                validates_search: false,
                can_add: true,
            },
            Screen::User => ScreenProfile {
                title: "User Dashboard",
                requirement: RoleRequirement::AnyAuthenticated,
                page_size: 10,
                edit_mode: EditMode::Disabled,
                export_layout: ExportLayout::Single,
                validates_search: false,
                can_add: false,
            },
            Screen::Checker => ScreenProfile {
                title: "GSTIN Checker",
                requirement: RoleRequirement::Admin,
                page_size: 5,
                edit_mode: EditMode::StatusOnly,
                export_layout: ExportLayout::Partitioned,
                validates_search: true,
                can_add: false,
            },
        }
    }
}

impl FromStr for Screen {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Screen::Admin),
            "user" => Ok(Screen::User),
            "checker" => Ok(Screen::Checker),
            other => Err(format!(
                "Unknown screen '{}': expected admin, user or checker",
                other
            )),
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Screen::Admin => "admin",
            Screen::User => "user",
            Screen::Checker => "checker",
        })
    }
}
