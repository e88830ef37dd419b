//! Row predicates: text filters, status filter and GSTIN search

use gst_types::CompanyRecord;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Status filter over the record's pass/fail `result`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusFilter {
    /// Wildcard, keeps every record
    #[default]
    All,
    /// Keep records whose `result` equals this value exactly
    Only(String),
}

impl StatusFilter {
    pub fn matches(&self, record: &CompanyRecord) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => record.result.as_deref() == Some(status.as_str()),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            Ok(StatusFilter::All)
        } else {
            Ok(StatusFilter::Only(trimmed.to_string()))
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Only(status) => f.write_str(status),
        }
    }
}

/// Record fields that carry a free-text filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    LegalName,
    Gstin,
    State,
}

impl FilterField {
    fn value(self, record: &CompanyRecord) -> &str {
        let field = match self {
            FilterField::LegalName => &record.legal_name,
            FilterField::Gstin => &record.gstin,
            FilterField::State => &record.state,
        };
        field.as_deref().unwrap_or("")
    }
}

impl FromStr for FilterField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" | "legal_name" => Ok(FilterField::LegalName),
            "gstin" => Ok(FilterField::Gstin),
            "state" => Ok(FilterField::State),
            other => Err(format!("Unknown filter field '{}'", other)),
        }
    }
}

/// Active filters; an empty text filter is inactive
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewFilters {
    pub legal_name: String,
    pub gstin: String,
    pub state: String,
    pub status: StatusFilter,
}

impl ViewFilters {
    pub fn text(&self, field: FilterField) -> &str {
        match field {
            FilterField::LegalName => &self.legal_name,
            FilterField::Gstin => &self.gstin,
            FilterField::State => &self.state,
        }
    }

    pub fn set_text(&mut self, field: FilterField, value: impl Into<String>) {
        let slot = match field {
            FilterField::LegalName => &mut self.legal_name,
            FilterField::Gstin => &mut self.gstin,
            FilterField::State => &mut self.state,
        };
        *slot = value.into();
    }

    /// Whether `record` passes every active text filter and the status filter
    pub fn matches(&self, record: &CompanyRecord) -> bool {
        [FilterField::LegalName, FilterField::Gstin, FilterField::State]
            .into_iter()
            .all(|field| contains_ignore_case(field.value(record), self.text(field)))
            && self.status.matches(record)
    }
}

/// Free-text search: GSTIN substring, inactive when empty
pub fn matches_search(record: &CompanyRecord, search: &str) -> bool {
    contains_ignore_case(record.gstin.as_deref().unwrap_or(""), search)
}

/// Case-insensitive substring test; an empty needle always matches
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}
