//! Summary block and filing-history rows

use gst_types::{month_name, parse_leading_int, CompanyRecord};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Most recent filing periods kept in a summary
pub const MAX_HISTORY_ROWS: usize = 24;

/// Return type that gets its own table in the partitioned layout
pub const PRIMARY_RETURN_TYPE: &str = "GSTR3B";

pub const HISTORY_COLUMNS: [&str; 6] = [
    "Year",
    "Month",
    "Return Type",
    "Date of Filing",
    "Delayed Filing",
    "Delay Days",
];

const NOT_AVAILABLE: &str = "N/A";

fn or_na(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// How filing history is split into tables
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportLayout {
    /// One table with every period
    #[default]
    Single,
    /// GSTR3B periods first, then an "Other Records" table
    Partitioned,
}

impl FromStr for ExportLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(ExportLayout::Single),
            "partitioned" => Ok(ExportLayout::Partitioned),
            other => Err(format!(
                "Unknown layout '{}': expected single or partitioned",
                other
            )),
        }
    }
}

/// One rendered row of the filing-history table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingRow {
    pub year: String,
    /// Month name, or N/A when the month is missing or out of range
    pub month: String,
    pub return_type: String,
    pub date_of_filing: String,
    pub delayed_filing: String,
    pub delay_days: String,
}

impl FilingRow {
    pub fn from_record(record: &CompanyRecord) -> Self {
        Self {
            year: or_na(record.year.as_deref()),
            month: month_name(record.month.as_deref().unwrap_or("")).to_string(),
            return_type: or_na(record.return_type.as_deref()),
            date_of_filing: or_na(record.date_of_filing.as_deref()),
            delayed_filing: or_na(record.delayed_filling.as_deref()),
            delay_days: or_na(record.delay_days.as_deref()),
        }
    }

    pub fn cells(&self) -> [&str; 6] {
        [
            &self.year,
            &self.month,
            &self.return_type,
            &self.date_of_filing,
            &self.delayed_filing,
            &self.delay_days,
        ]
    }

    pub fn is_primary(&self) -> bool {
        self.return_type == PRIMARY_RETURN_TYPE
    }
}

/// A titled group of filing-history rows rendered as one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistorySection {
    pub heading: Option<String>,
    pub rows: Vec<FilingRow>,
}

/// Numeric sort key for a record's period; unparseable parts sort lowest
fn period_key(record: &CompanyRecord) -> (Option<i64>, Option<i64>) {
    let number = |value: &Option<String>| value.as_deref().and_then(parse_leading_int);
    (number(&record.year), number(&record.month))
}

/// Order records newest period first and keep the most recent
/// [`MAX_HISTORY_ROWS`].
///
/// Year descending, then month descending; equal periods keep input order.
pub fn recent_periods(records: &[CompanyRecord]) -> Vec<&CompanyRecord> {
    let mut periods: Vec<&CompanyRecord> = records.iter().collect();
    periods.sort_by(|a, b| period_key(b).cmp(&period_key(a)));
    periods.truncate(MAX_HISTORY_ROWS);
    periods
}

/// Filing-history rows for the chosen layout
pub fn history_sections(records: &[CompanyRecord], layout: ExportLayout) -> Vec<HistorySection> {
    let rows: Vec<FilingRow> = recent_periods(records)
        .into_iter()
        .map(FilingRow::from_record)
        .collect();

    match layout {
        ExportLayout::Single => vec![HistorySection {
            heading: None,
            rows,
        }],
        ExportLayout::Partitioned => {
            let (primary, other): (Vec<FilingRow>, Vec<FilingRow>) =
                rows.into_iter().partition(FilingRow::is_primary);

            let mut sections = Vec::new();
            if !primary.is_empty() {
                sections.push(HistorySection {
                    heading: None,
                    rows: primary,
                });
            }
            if !other.is_empty() {
                sections.push(HistorySection {
                    heading: Some("Other Records".to_string()),
                    rows: other,
                });
            }
            sections
        }
    }
}

/// The fixed 6-row key/value block describing the company
pub fn summary_rows(company: &CompanyRecord) -> Vec<[String; 4]> {
    let row = |k1: &str, v1: &Option<String>, k2: &str, v2: &Option<String>| {
        [
            k1.to_string(),
            or_na(v1.as_deref()),
            k2.to_string(),
            or_na(v2.as_deref()),
        ]
    };

    vec![
        row("GSTIN", &company.gstin, "STATUS", &company.return_status),
        row(
            "LEGAL NAME",
            &company.legal_name,
            "REG. DATE",
            &company.registration_date,
        ),
        row(
            "TRADE NAME",
            &company.trade_name,
            "LAST UPDATE DATE",
            &company.last_update,
        ),
        row("COMPANY TYPE", &company.company_type, "STATE", &company.state),
        row(
            "% DELAYED FILLING",
            &company.delayed_filling,
            "AVG. DELAY DAYS",
            &company.delay_days,
        ),
        row("Address", &company.address, "Result", &company.result),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn period(year: &str, month: &str, return_type: &str) -> CompanyRecord {
        CompanyRecord {
            gstin: Some("27AAAAA0000A1Z5".into()),
            year: Some(year.into()),
            month: Some(month.into()),
            return_type: Some(return_type.into()),
            ..CompanyRecord::default()
        }
    }

    fn year_month(rows: &[FilingRow]) -> Vec<(String, String)> {
        rows.iter()
            .map(|r| (r.year.clone(), r.month.clone()))
            .collect()
    }

    #[test]
    fn test_periods_sort_newest_first() {
        let records = vec![
            period("2023", "3", "GSTR3B"),
            period("2024", "1", "GSTR3B"),
            period("2023", "12", "GSTR3B"),
        ];
        let sections = history_sections(&records, ExportLayout::Single);

        assert_eq!(
            year_month(&sections[0].rows),
            vec![
                ("2024".to_string(), "January".to_string()),
                ("2023".to_string(), "December".to_string()),
                ("2023".to_string(), "March".to_string()),
            ]
        );
    }

    #[test]
    fn test_months_compare_numerically() {
        let records = vec![period("2023", "9", "GSTR1"), period("2023", "10", "GSTR1")];
        let recent = recent_periods(&records);
        assert_eq!(recent[0].month.as_deref(), Some("10"));
    }

    #[test]
    fn test_truncates_to_most_recent_24() {
        let records: Vec<CompanyRecord> = (0..30)
            .map(|i| period(&(2020 + i / 12).to_string(), &(i % 12 + 1).to_string(), "GSTR3B"))
            .collect();
        let recent = recent_periods(&records);

        assert_eq!(recent.len(), MAX_HISTORY_ROWS);
        assert_eq!(recent[0].year.as_deref(), Some("2022"));
        assert_eq!(recent[0].month.as_deref(), Some("6"));
        assert_eq!(recent[23].year.as_deref(), Some("2020"));
        assert_eq!(recent[23].month.as_deref(), Some("7"));
    }

    #[test]
    fn test_unparseable_periods_sort_last() {
        let records = vec![
            period("N/A", "1", "GSTR3B"),
            period("2021", "x", "GSTR3B"),
            period("2021", "2", "GSTR3B"),
        ];
        let sections = history_sections(&records, ExportLayout::Single);
        assert_eq!(
            year_month(&sections[0].rows),
            vec![
                ("2021".to_string(), "February".to_string()),
                ("2021".to_string(), "N/A".to_string()),
                ("N/A".to_string(), "January".to_string()),
            ]
        );
    }

    #[test]
    fn test_partitioned_layout_splits_other_returns() {
        let records = vec![
            period("2024", "2", "GSTR1"),
            period("2024", "1", "GSTR3B"),
            period("2023", "12", "GSTR3B"),
        ];
        let sections = history_sections(&records, ExportLayout::Partitioned);

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].heading, None);
        assert_eq!(sections[0].rows.len(), 2);
        assert_eq!(sections[1].heading.as_deref(), Some("Other Records"));
        assert_eq!(sections[1].rows[0].return_type, "GSTR1");
    }

    #[test]
    fn test_partitioned_layout_omits_empty_other_table() {
        let records = vec![period("2024", "1", "GSTR3B")];
        let sections = history_sections(&records, ExportLayout::Partitioned);
        assert_eq!(sections.len(), 1);
        assert!(sections[0].heading.is_none());
    }

    #[test]
    fn test_partition_happens_after_truncation() {
        let mut records: Vec<CompanyRecord> = (1..=12)
            .flat_map(|m| {
                vec![
                    period("2024", &m.to_string(), "GSTR3B"),
                    period("2023", &m.to_string(), "GSTR3B"),
                ]
            })
            .collect();
        records.push(period("2019", "1", "GSTR1"));

        let sections = history_sections(&records, ExportLayout::Partitioned);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].rows.len(), MAX_HISTORY_ROWS);
    }

    #[test]
    fn test_summary_rows_fill_missing_with_na() {
        let company = CompanyRecord {
            gstin: Some("27AAAAA0000A1Z5".into()),
            legal_name: Some(String::new()),
            address: Some("1 MG Road".into()),
            result: Some("Pass".into()),
            ..CompanyRecord::default()
        };
        let rows = summary_rows(&company);

        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0][1], "27AAAAA0000A1Z5");
        assert_eq!(rows[0][3], "N/A");
        assert_eq!(rows[1][1], "N/A");
        assert_eq!(rows[5], ["Address", "1 MG Road", "Result", "Pass"].map(String::from));
    }

    #[test]
    fn test_filing_row_defaults() {
        let row = FilingRow::from_record(&CompanyRecord::default());
        assert_eq!(row.cells(), ["N/A"; 6]);
    }

    #[test]
    fn test_layout_parses() {
        assert_eq!("Partitioned".parse::<ExportLayout>(), Ok(ExportLayout::Partitioned));
        assert!("both".parse::<ExportLayout>().is_err());
    }
}
