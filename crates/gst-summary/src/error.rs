use thiserror::Error;

#[derive(Error, Debug)]
pub enum SummaryError {
    #[error("No filing records found for GSTIN {0}")]
    EmptyHistory(String),

    #[error("Failed to render PDF: {0}")]
    Render(String),

    #[error("Failed to write summary: {0}")]
    Io(#[from] std::io::Error),
}
