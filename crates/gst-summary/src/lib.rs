//! Per-company compliance summary as a PDF
//!
//! The summary is built from a company's full, non-deduplicated record set:
//! a fixed key/value block from the first record followed by the filing
//! history, newest period first and capped at [`MAX_HISTORY_ROWS`].
//!
//! Layout is done in this crate over `lopdf` content streams; there is no
//! dependency on a rendering engine.

pub mod document;
pub mod error;
pub mod history;
pub mod layout;

pub use document::{SummaryDocument, TITLE};
pub use error::SummaryError;
pub use history::{
    history_sections, recent_periods, summary_rows, ExportLayout, FilingRow, HistorySection,
    HISTORY_COLUMNS, MAX_HISTORY_ROWS, PRIMARY_RETURN_TYPE,
};

use chrono::Utc;
use gst_types::CompanyRecord;

/// Assemble the summary for `gstin` from its full period history.
///
/// Fails with [`SummaryError::EmptyHistory`] when there is nothing to show.
pub fn build_summary(
    gstin: &str,
    records: &[CompanyRecord],
    layout: ExportLayout,
) -> Result<SummaryDocument, SummaryError> {
    let first = records
        .first()
        .ok_or_else(|| SummaryError::EmptyHistory(gstin.to_string()))?;

    Ok(SummaryDocument {
        gstin: gstin.to_string(),
        summary: summary_rows(first),
        sections: history_sections(records, layout),
        generated_at: Utc::now(),
    })
}

/// Build and render in one step, returning the PDF bytes
pub fn render_summary_pdf(
    gstin: &str,
    records: &[CompanyRecord],
    layout: ExportLayout,
) -> Result<Vec<u8>, SummaryError> {
    let document = build_summary(gstin, records, layout)?;
    let bytes = document.render()?;
    tracing::info!(
        gstin,
        periods = records.len(),
        ?layout,
        "Built compliance summary"
    );
    Ok(bytes)
}

/// File name the summary is saved under
pub fn summary_file_name(gstin: &str) -> String {
    format!("{}_summary.pdf", gstin)
}
