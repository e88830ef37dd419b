//! Pipeline inputs held by a dashboard screen

use crate::filter::{FilterField, StatusFilter, ViewFilters};
use crate::paginate::total_pages;
use crate::sort::{toggle_sort, SortKey, SortSpec};
use crate::{derive_rows, derive_view, View};
use gst_types::CompanyRecord;

/// Full record set plus every input of the view pipeline.
///
/// Any change to the records, a filter, the search value or the sort moves
/// the active page back to 1.
#[derive(Debug, Clone)]
pub struct ViewState {
    records: Vec<CompanyRecord>,
    filters: ViewFilters,
    search: String,
    sort: Option<SortSpec>,
    page: usize,
    page_size: usize,
}

impl ViewState {
    pub fn new(page_size: usize) -> Self {
        Self {
            records: Vec::new(),
            filters: ViewFilters::default(),
            search: String::new(),
            sort: None,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn records(&self) -> &[CompanyRecord] {
        &self.records
    }

    pub fn filters(&self) -> &ViewFilters {
        &self.filters
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> Option<SortSpec> {
        self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Replace the whole record set
    pub fn replace_records(&mut self, records: Vec<CompanyRecord>) {
        self.records = records;
        self.page = 1;
    }

    pub fn set_filter(&mut self, field: FilterField, value: impl Into<String>) {
        self.filters.set_text(field, value);
        self.page = 1;
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.filters.status = status;
        self.page = 1;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: Option<SortSpec>) {
        self.sort = sort;
        self.page = 1;
    }

    /// Column-header click
    pub fn toggle_sort(&mut self, key: SortKey) -> Option<SortSpec> {
        self.set_sort(toggle_sort(self.sort, key));
        self.sort
    }

    /// Pages in the current derived view
    pub fn total_pages(&self) -> usize {
        total_pages(self.row_count(), self.page_size)
    }

    fn row_count(&self) -> usize {
        derive_rows(&self.records, &self.filters, &self.search, self.sort).len()
    }

    /// Jump to `page`, clamped into the pages that exist
    pub fn go_to(&mut self, page: usize) -> usize {
        let last = self.total_pages().max(1);
        self.page = page.clamp(1, last);
        self.page
    }

    pub fn next_page(&mut self) -> usize {
        self.go_to(self.page.saturating_add(1))
    }

    pub fn previous_page(&mut self) -> usize {
        self.go_to(self.page.saturating_sub(1))
    }

    /// Derive the page currently on screen
    pub fn view(&self) -> View<'_> {
        derive_view(
            &self.records,
            &self.filters,
            &self.search,
            self.sort,
            self.page,
            self.page_size,
        )
    }

    /// Loaded record with internal id `id`
    pub fn find_by_id(&self, id: i64) -> Option<&CompanyRecord> {
        self.records.iter().find(|record| record.id == Some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(count: i64) -> Vec<CompanyRecord> {
        (1..=count)
            .map(|i| CompanyRecord {
                id: Some(i),
                gstin: Some(format!("GST{:03}", i)),
                ..CompanyRecord::default()
            })
            .collect()
    }

    #[test]
    fn test_inputs_reset_page() {
        let mut state = ViewState::new(2);
        state.replace_records(numbered(7));

        state.go_to(3);
        state.set_filter(FilterField::State, "");
        assert_eq!(state.page(), 1);

        state.go_to(3);
        state.set_search("GST");
        assert_eq!(state.page(), 1);

        state.go_to(2);
        state.toggle_sort(SortKey::Gstin);
        assert_eq!(state.page(), 1);

        state.go_to(2);
        state.set_status_filter(StatusFilter::All);
        assert_eq!(state.page(), 1);

        state.go_to(2);
        state.replace_records(numbered(3));
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn test_navigation_clamps() {
        let mut state = ViewState::new(5);
        state.replace_records(numbered(12));

        assert_eq!(state.total_pages(), 3);
        assert_eq!(state.previous_page(), 1);
        assert_eq!(state.go_to(99), 3);
        assert_eq!(state.next_page(), 3);
        assert_eq!(state.view().rows.len(), 2);
    }

    #[test]
    fn test_navigation_on_empty_set_stays_on_first_page() {
        let mut state = ViewState::new(5);
        assert_eq!(state.next_page(), 1);
        assert!(state.view().rows.is_empty());
    }

    #[test]
    fn test_find_by_id() {
        let mut state = ViewState::new(5);
        state.replace_records(numbered(3));
        assert_eq!(
            state.find_by_id(2).and_then(|r| r.gstin.as_deref()),
            Some("GST002")
        );
        assert!(state.find_by_id(9).is_none());
    }

    #[test]
    fn test_zero_page_size_is_one() {
        assert_eq!(ViewState::new(0).page_size(), 1);
    }
}
