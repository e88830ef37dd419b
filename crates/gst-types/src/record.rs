//! Company compliance record
//!
//! One record per (GSTIN, filing period) as the backend returns it. Every
//! field is optional: list endpoints return company-level rows without period
//! fields, and older rows may lack newer columns. The backend is loose about
//! scalar types (years arrive as `2023` or `"2023"`), so text fields accept
//! numbers and the turnover accepts numeric strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub gstin: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub legal_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub trade_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub registration_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub last_update: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub company_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Percentage of filings made late
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub delayed_filling: Option<String>,
    /// Average delay in days
    #[serde(
        rename = "Delay_days",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub delay_days: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub return_status: Option<String>,
    /// Pass/fail compliance result
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    /// Annual turnover in crore
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub annual_turnover: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub fetch_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub date_of_filing: Option<String>,
}

impl CompanyRecord {
    /// Record with only a GSTIN set
    pub fn with_gstin(gstin: impl Into<String>) -> Self {
        Self {
            gstin: Some(gstin.into()),
            ..Self::default()
        }
    }

    /// Whether this record's GSTIN equals `gstin`, ignoring case
    pub fn matches_gstin(&self, gstin: &str) -> bool {
        self.gstin
            .as_deref()
            .is_some_and(|own| own.eq_ignore_ascii_case(gstin))
    }
}

/// Compliance result a user may assign when editing a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplianceStatus {
    Pass,
    Fail,
}

impl ComplianceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplianceStatus::Pass => "Pass",
            ComplianceStatus::Fail => "Fail",
        }
    }
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplianceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pass" => Ok(ComplianceStatus::Pass),
            "fail" => Ok(ComplianceStatus::Fail),
            other => Err(format!("Unknown status '{}': expected Pass or Fail", other)),
        }
    }
}

/// Deserializers tolerant of the backend's mixed scalar types
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::String(s)) => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(Value::Bool(b)) => Some(b.to_string()),
            _ => None,
        })
    }

    pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_deserializes_backend_row() {
        let json = r#"{
            "id": 7,
            "gstin": "27AAAAA0000A1Z5",
            "legal_name": "Acme Traders",
            "state": "Maharashtra",
            "delayed_filling": "12.5",
            "Delay_days": 3,
            "result": "Pass",
            "annual_turnover": 42.5,
            "year": 2024,
            "month": "1",
            "return_type": "GSTR3B"
        }"#;
        let record: CompanyRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.id, Some(7));
        assert_eq!(record.delay_days.as_deref(), Some("3"));
        assert_eq!(record.year.as_deref(), Some("2024"));
        assert_eq!(record.month.as_deref(), Some("1"));
        assert_eq!(record.annual_turnover, Some(42.5));
        assert_eq!(record.trade_name, None);
    }

    #[test]
    fn test_null_and_absent_are_the_same() {
        let with_null: CompanyRecord =
            serde_json::from_str(r#"{"gstin": null, "annual_turnover": null}"#).unwrap();
        let absent: CompanyRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(with_null, absent);
    }

    #[test]
    fn test_turnover_accepts_numeric_string() {
        let record: CompanyRecord =
            serde_json::from_str(r#"{"annual_turnover": " 10.25 "}"#).unwrap();
        assert_eq!(record.annual_turnover, Some(10.25));

        let record: CompanyRecord =
            serde_json::from_str(r#"{"annual_turnover": "unknown"}"#).unwrap();
        assert_eq!(record.annual_turnover, None);
    }

    #[test]
    fn test_serializes_delay_days_with_backend_key() {
        let record = CompanyRecord {
            delay_days: Some("4".into()),
            ..CompanyRecord::default()
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"Delay_days":"4"}"#);
    }

    #[test]
    fn test_matches_gstin_ignores_case() {
        let record = CompanyRecord::with_gstin("27AAAAA0000A1Z5");
        assert!(record.matches_gstin("27aaaaa0000a1z5"));
        assert!(!record.matches_gstin("29AAAAA0000A1Z5"));
        assert!(!CompanyRecord::default().matches_gstin(""));
    }

    #[test]
    fn test_status_parses_case_insensitively() {
        assert_eq!("pass".parse::<ComplianceStatus>(), Ok(ComplianceStatus::Pass));
        assert_eq!(" FAIL ".parse::<ComplianceStatus>(), Ok(ComplianceStatus::Fail));
        assert!("maybe".parse::<ComplianceStatus>().is_err());
        assert_eq!(ComplianceStatus::Fail.to_string(), "Fail");
    }
}
