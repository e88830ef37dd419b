//! Single-column sorting and the header-click toggle cycle

use gst_types::CompanyRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Sortable record columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    LegalName,
    Gstin,
    State,
    FetchDate,
    AnnualTurnover,
    Result,
    TradeName,
    RegistrationDate,
    CompanyType,
    /// Compared as a number when the value parses, so "9" sorts before "10"
    DelayDays,
    /// Compared like [`SortKey::DelayDays`]
    DelayedFilling,
}

impl SortKey {
    pub const ALL: [SortKey; 11] = [
        SortKey::LegalName,
        SortKey::Gstin,
        SortKey::State,
        SortKey::FetchDate,
        SortKey::AnnualTurnover,
        SortKey::Result,
        SortKey::TradeName,
        SortKey::RegistrationDate,
        SortKey::CompanyType,
        SortKey::DelayDays,
        SortKey::DelayedFilling,
    ];

    /// Backend field name of this column
    pub fn field_name(&self) -> &'static str {
        match self {
            SortKey::LegalName => "legal_name",
            SortKey::Gstin => "gstin",
            SortKey::State => "state",
            SortKey::FetchDate => "fetch_date",
            SortKey::AnnualTurnover => "annual_turnover",
            SortKey::Result => "result",
            SortKey::TradeName => "trade_name",
            SortKey::RegistrationDate => "registration_date",
            SortKey::CompanyType => "company_type",
            SortKey::DelayDays => "Delay_days",
            SortKey::DelayedFilling => "delayed_filling",
        }
    }

    fn value<'r>(&self, record: &'r CompanyRecord) -> Option<SortValue<'r>> {
        let text = match self {
            SortKey::AnnualTurnover => return record.annual_turnover.map(SortValue::Number),
            SortKey::DelayDays => return record.delay_days.as_deref().map(SortValue::metric),
            SortKey::DelayedFilling => {
                return record.delayed_filling.as_deref().map(SortValue::metric)
            }
            SortKey::LegalName => &record.legal_name,
            SortKey::Gstin => &record.gstin,
            SortKey::State => &record.state,
            SortKey::FetchDate => &record.fetch_date,
            SortKey::Result => &record.result,
            SortKey::TradeName => &record.trade_name,
            SortKey::RegistrationDate => &record.registration_date,
            SortKey::CompanyType => &record.company_type,
        };
        text.as_deref().map(SortValue::Text)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        let wanted = match wanted.as_str() {
            "name" => "legal_name",
            "turnover" => "annual_turnover",
            "status" => "result",
            "delay" => "delay_days",
            "delayed" => "delayed_filling",
            other => other,
        };
        SortKey::ALL
            .into_iter()
            .find(|key| key.field_name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Unknown sort column '{}'", s.trim()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Descending,
        }
    }

    /// Compare two records under this spec.
    ///
    /// A missing value (absent or null) orders after every present value in
    /// both directions; only present values are reversed for descending.
    pub fn compare(&self, a: &CompanyRecord, b: &CompanyRecord) -> Ordering {
        match (self.key.value(a), self.key.value(b)) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(left), Some(right)) => {
                let ordering = left.cmp(&right);
                match self.direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum SortValue<'r> {
    Text(&'r str),
    Number(f64),
}

impl<'r> SortValue<'r> {
    /// Backend metrics arrive as text or numbers; numeric text compares as a number
    fn metric(text: &'r str) -> Self {
        match text.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => SortValue::Number(n),
            _ => SortValue::Text(text),
        }
    }

    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
            (SortValue::Number(a), SortValue::Number(b)) => a.total_cmp(b),
            (SortValue::Number(_), SortValue::Text(_)) => Ordering::Less,
            (SortValue::Text(_), SortValue::Number(_)) => Ordering::Greater,
        }
    }
}

/// Stable sort of `rows` under `spec`
pub fn sort_records(rows: &mut [&CompanyRecord], spec: SortSpec) {
    rows.sort_by(|a, b| spec.compare(a, b));
}

/// Next sort state after a click on the `key` column header.
///
/// Unsorted or another column → ascending; ascending → descending;
/// descending → unsorted.
pub fn toggle_sort(current: Option<SortSpec>, key: SortKey) -> Option<SortSpec> {
    match current {
        Some(spec) if spec.key == key => match spec.direction {
            SortDirection::Ascending => Some(SortSpec::descending(key)),
            SortDirection::Descending => None,
        },
        _ => Some(SortSpec::ascending(key)),
    }
}
