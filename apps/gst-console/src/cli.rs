//! Command-line surface

use crate::config::Overrides;
use crate::screen::Screen;
use clap::{Parser, Subcommand};
use gst_types::ComplianceStatus;
use gst_view::{SortKey, StatusFilter};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gst-console")]
#[command(version, about = "GST compliance dashboard for the terminal")]
pub struct Cli {
    /// Backend base URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Where the login session is stored
    #[arg(long, global = true)]
    pub session_file: Option<PathBuf>,

    /// Directory summary PDFs are written to
    #[arg(long, global = true)]
    pub export_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            api_url: self.api_url.clone(),
            session_file: self.session_file.clone(),
            export_dir: self.export_dir.clone(),
        }
    }
}

/// Filters, search, sort and page for one listing
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Legal name contains
    #[arg(long)]
    pub name: Option<String>,

    /// GSTIN contains
    #[arg(long)]
    pub gstin: Option<String>,

    /// State contains
    #[arg(long)]
    pub state: Option<String>,

    /// Pass, Fail or all
    #[arg(long)]
    pub status: Option<StatusFilter>,

    /// GSTIN search box
    #[arg(long)]
    pub search: Option<String>,

    /// Column to sort by
    #[arg(long)]
    pub sort: Option<SortKey>,

    /// Sort descending instead of ascending
    #[arg(long, requires = "sort")]
    pub desc: bool,

    #[arg(long, default_value_t = 1)]
    pub page: usize,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and remember the session
    Login {
        #[arg(short, long)]
        username: String,

        #[arg(short, long, env = "GST_PASSWORD", hide_env_values = true)]
        password: String,

        /// Request the admin dashboard
        #[arg(long)]
        admin: bool,
    },

    /// Forget the stored session
    Logout,

    /// Print one page of companies
    List {
        #[arg(long, default_value = "user")]
        screen: Screen,

        #[command(flatten)]
        args: ListArgs,
    },

    /// Fetch a company from the GST registry into the backend
    Add { gstin: String },

    /// Change the status (and on the admin screen, turnover) of a record
    Edit {
        /// Internal record id
        id: i64,

        #[arg(long)]
        status: Option<ComplianceStatus>,

        #[arg(long)]
        turnover: Option<String>,

        #[arg(long, default_value = "admin")]
        screen: Screen,
    },

    /// Write a company's compliance summary PDF
    Export {
        gstin: String,

        #[arg(long, default_value = "user")]
        screen: Screen,
    },

    /// Validate a GSTIN and show its records on the checker screen
    Check { gstin: String },

    /// Interactive dashboard
    Browse {
        #[arg(long, default_value = "user")]
        screen: Screen,
    },
}
