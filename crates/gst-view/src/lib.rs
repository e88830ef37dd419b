//! Client-side view pipeline for company compliance records
//!
//! The full record set is held in memory and the displayed page is derived
//! from it by one pure function, [`derive_view`]:
//!
//! 1. text filters (legal name, GSTIN, state), case-insensitive substring
//! 2. status filter, exact match or wildcard
//! 3. free-text search on GSTIN
//! 4. de-duplication by GSTIN, last record wins
//! 5. single-column sort, missing values last
//! 6. page slice
//!
//! [`ViewState`] keeps the pipeline inputs together and resets the page
//! whenever an input that changes the row set is modified.

pub mod dedup;
pub mod filter;
pub mod paginate;
pub mod sort;
pub mod state;

pub use dedup::dedupe_by_gstin;
pub use filter::{FilterField, StatusFilter, ViewFilters};
pub use paginate::{page_slice, total_pages};
pub use sort::{toggle_sort, SortDirection, SortKey, SortSpec};
pub use state::ViewState;

use gst_types::CompanyRecord;

/// One rendered page of the derived view
#[derive(Debug, Clone, PartialEq)]
pub struct View<'a> {
    /// Rows on the requested page
    pub rows: Vec<&'a CompanyRecord>,
    /// Rows across all pages after filtering and de-duplication
    pub total_rows: usize,
    pub total_pages: usize,
    /// The 1-based page these rows belong to
    pub page: usize,
}

/// Derive the displayed page from the full record set.
///
/// `page` is 1-based; a page past the end yields no rows. A `page_size` of
/// zero is treated as one.
pub fn derive_view<'a>(
    all: &'a [CompanyRecord],
    filters: &ViewFilters,
    search: &str,
    sort: Option<SortSpec>,
    page: usize,
    page_size: usize,
) -> View<'a> {
    let rows = derive_rows(all, filters, search, sort);
    let total_rows = rows.len();
    let page = page.max(1);

    View {
        rows: page_slice(&rows, page, page_size).to_vec(),
        total_rows,
        total_pages: total_pages(total_rows, page_size),
        page,
    }
}

/// Steps 1-5 of the pipeline: every row that would be paged
pub fn derive_rows<'a>(
    all: &'a [CompanyRecord],
    filters: &ViewFilters,
    search: &str,
    sort: Option<SortSpec>,
) -> Vec<&'a CompanyRecord> {
    let filtered = all
        .iter()
        .filter(|record| filters.matches(record))
        .filter(|record| filter::matches_search(record, search));

    let mut rows = dedupe_by_gstin(filtered);
    if let Some(spec) = sort {
        sort::sort_records(&mut rows, spec);
    }
    rows
}
