use crate::edit::EditError;
use crate::gate::RedirectReason;
use gst_client::ClientError;
use gst_summary::SummaryError;
use gst_types::GstinError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("Redirecting to login: {0}")]
    Gate(RedirectReason),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session store error: {0}")]
    Session(String),

    #[error("Not available: {0}")]
    Unsupported(String),

    #[error(transparent)]
    Edit(#[from] EditError),

    #[error(transparent)]
    Gstin(#[from] GstinError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Summary(#[from] SummaryError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
