//! Property-based tests for the view pipeline

use gst_types::CompanyRecord;
use gst_view::{
    dedupe_by_gstin, derive_rows, derive_view, page_slice, toggle_sort, total_pages,
    StatusFilter, SortDirection, SortKey, SortSpec, ViewFilters,
};
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

// ============================================================
// Strategies
// ============================================================

/// Small alphabets so filters and duplicate keys actually collide
fn record() -> impl Strategy<Value = CompanyRecord> {
    (
        any::<u16>(),
        proptest::option::of("27[AB]{2}|29[AB]{2}"),
        proptest::option::of("[a-cA-C ]{0,6}"),
        proptest::option::of("(Delhi|Goa|Kerala)"),
        proptest::option::of("(Pass|Fail)"),
        proptest::option::of(0.0f64..1000.0),
    )
        .prop_map(|(id, gstin, name, state, result, turnover)| CompanyRecord {
            id: Some(id as i64),
            gstin,
            legal_name: name,
            state,
            result,
            annual_turnover: turnover,
            ..CompanyRecord::default()
        })
}

fn records() -> impl Strategy<Value = Vec<CompanyRecord>> {
    proptest::collection::vec(record(), 0..40)
}

fn filters() -> impl Strategy<Value = ViewFilters> {
    (
        "[a-c]{0,2}",
        choice(&["", "27", "2", "a", "B"]),
        choice(&["", "e", "goa", "L"]),
        prop_oneof![
            Just(StatusFilter::All),
            Just(StatusFilter::Only("Pass".into())),
            Just(StatusFilter::Only("Fail".into())),
        ],
    )
        .prop_map(|(legal_name, gstin, state, status)| ViewFilters {
            legal_name,
            gstin,
            state,
            status,
        })
}

fn choice(options: &[&str]) -> impl Strategy<Value = String> {
    let owned: Vec<String> = options.iter().map(|s| s.to_string()).collect();
    proptest::sample::select(owned)
}

fn sort_key() -> impl Strategy<Value = SortKey> {
    proptest::sample::select(SortKey::ALL.to_vec())
}

fn sort_spec() -> impl Strategy<Value = SortSpec> {
    (sort_key(), any::<bool>()).prop_map(|(key, descending)| {
        if descending {
            SortSpec::descending(key)
        } else {
            SortSpec::ascending(key)
        }
    })
}

fn contains_ci(haystack: &Option<String>, needle: &str) -> bool {
    needle.is_empty()
        || haystack
            .as_deref()
            .unwrap_or("")
            .to_lowercase()
            .contains(&needle.to_lowercase())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // ============================================================
    // De-duplication
    // ============================================================

    #[test]
    fn dedupe_keeps_one_per_gstin_and_the_last_one(all in records()) {
        let unique = dedupe_by_gstin(&all);

        let distinct: HashSet<Option<&str>> = all.iter().map(|r| r.gstin.as_deref()).collect();
        prop_assert_eq!(unique.len(), distinct.len());

        let mut last: HashMap<Option<&str>, &CompanyRecord> = HashMap::new();
        for record in &all {
            last.insert(record.gstin.as_deref(), record);
        }
        for kept in &unique {
            prop_assert!(std::ptr::eq(*kept, last[&kept.gstin.as_deref()]));
        }
    }

    // ============================================================
    // Filtering
    // ============================================================

    #[test]
    fn every_row_satisfies_every_active_predicate(
        all in records(),
        filters in filters(),
        search in choice(&["", "27", "a", "9B"]),
    ) {
        for row in derive_rows(&all, &filters, &search, None) {
            prop_assert!(contains_ci(&row.legal_name, &filters.legal_name));
            prop_assert!(contains_ci(&row.gstin, &filters.gstin));
            prop_assert!(contains_ci(&row.state, &filters.state));
            prop_assert!(contains_ci(&row.gstin, &search));
            if let StatusFilter::Only(status) = &filters.status {
                prop_assert_eq!(row.result.as_deref(), Some(status.as_str()));
            }
        }
    }

    #[test]
    fn no_passing_record_is_lost(all in records(), filters in filters()) {
        let rows = derive_rows(&all, &filters, "", None);
        let kept: HashSet<Option<&str>> = rows.iter().map(|r| r.gstin.as_deref()).collect();
        for record in all.iter().filter(|r| filters.matches(r)) {
            prop_assert!(kept.contains(&record.gstin.as_deref()));
        }
    }

    // ============================================================
    // Sorting
    // ============================================================

    #[test]
    fn resorting_is_idempotent(all in records(), spec in sort_spec()) {
        let once = derive_rows(&all, &ViewFilters::default(), "", Some(spec));
        let mut twice = once.clone();
        twice.sort_by(|a, b| spec.compare(a, b));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn missing_sort_values_trail(all in records(), spec in sort_spec()) {
        let rows = derive_rows(&all, &ViewFilters::default(), "", Some(spec));
        let missing = |r: &CompanyRecord| match spec.key {
            SortKey::LegalName => r.legal_name.is_none(),
            SortKey::Gstin => r.gstin.is_none(),
            SortKey::State => r.state.is_none(),
            SortKey::Result => r.result.is_none(),
            SortKey::AnnualTurnover => r.annual_turnover.is_none(),
            SortKey::FetchDate => r.fetch_date.is_none(),
            SortKey::TradeName => r.trade_name.is_none(),
            SortKey::RegistrationDate => r.registration_date.is_none(),
            SortKey::CompanyType => r.company_type.is_none(),
            SortKey::DelayDays => r.delay_days.is_none(),
            SortKey::DelayedFilling => r.delayed_filling.is_none(),
        };
        if let Some(first_missing) = rows.iter().position(|r| missing(r)) {
            prop_assert!(rows[first_missing..].iter().all(|r| missing(r)));
        }
    }

    #[test]
    fn three_clicks_restore_input_order(all in records(), key in sort_key()) {
        let unsorted = derive_rows(&all, &ViewFilters::default(), "", None);

        let mut sort = None;
        for _ in 0..3 {
            sort = toggle_sort(sort, key);
        }
        prop_assert_eq!(sort, None);
        prop_assert_eq!(derive_rows(&all, &ViewFilters::default(), "", sort), unsorted);
    }

    #[test]
    fn sorted_rows_are_ordered_in_either_direction(all in records(), key in sort_key(), descending in any::<bool>()) {
        let direction = if descending { SortDirection::Descending } else { SortDirection::Ascending };
        let spec = SortSpec { key, direction };
        let rows = derive_rows(&all, &ViewFilters::default(), "", Some(spec));
        for pair in rows.windows(2) {
            prop_assert_ne!(spec.compare(pair[0], pair[1]), std::cmp::Ordering::Greater);
        }
    }

    // ============================================================
    // Pagination
    // ============================================================

    #[test]
    fn pages_partition_the_rows(all in records(), page_size in 1usize..8) {
        let rows = derive_rows(&all, &ViewFilters::default(), "", None);
        let pages = total_pages(rows.len(), page_size);

        let mut seen = 0;
        for page in 1..=pages {
            let view = derive_view(&all, &ViewFilters::default(), "", None, page, page_size);
            prop_assert!(view.rows.len() <= page_size);
            if page < pages {
                prop_assert_eq!(view.rows.len(), page_size);
            } else {
                prop_assert_eq!(view.rows.len(), rows.len() - (pages - 1) * page_size);
            }
            seen += view.rows.len();
        }
        prop_assert_eq!(seen, rows.len());
    }

    #[test]
    fn slices_never_exceed_page_size(len in 0usize..100, page in 0usize..30, size in 0usize..12) {
        let rows: Vec<usize> = (0..len).collect();
        prop_assert!(page_slice(&rows, page, size).len() <= size.max(1));
    }
}
