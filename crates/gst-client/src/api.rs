//! The backend contract and the payloads that cross it

use crate::error::ClientError;
use async_trait::async_trait;
use gst_types::{CompanyRecord, Session};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

pub const LIST_PATH: &str = "/companies/";
pub const FETCH_AND_SAVE_PATH: &str = "/fetch_and_save_gst_record/";
pub const UPDATE_FULL_PATH: &str = "/update_gst_record/";
pub const UPDATE_STATUS_PATH: &str = "/update_status_for_gstin/";
pub const LOGIN_PATH: &str = "/login/";

/// Message shown when a rejected login carries no server explanation
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

pub fn company_path(gstin: &str) -> String {
    format!("/companies/{}/", gstin)
}

/// Remote operations the dashboards depend on
#[async_trait]
pub trait CompanyApi: Send + Sync {
    /// Every record the backend holds, one per (GSTIN, filing period)
    async fn list_companies(&self) -> Result<Vec<CompanyRecord>, ClientError>;

    /// Full period history for one GSTIN
    async fn get_company(&self, gstin: &str) -> Result<Vec<CompanyRecord>, ClientError>;

    /// Ask the backend to fetch a GSTIN from the upstream registry and store it
    async fn create_or_refresh(&self, gstin: &str) -> Result<(), ClientError>;

    async fn update_record(&self, update: &RecordUpdate) -> Result<(), ClientError>;

    async fn login(&self, credentials: &Credentials) -> Result<Session, ClientError>;
}

/// Partial update sent from the edit form
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RecordUpdate {
    /// Status and turnover, sent to the full-record endpoint
    Full {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<i64>,
        gstin: String,
        status: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        annual_turnover: Option<f64>,
    },
    /// Status alone, sent to the status endpoint
    StatusOnly {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<i64>,
        gstin: String,
        status: String,
    },
}

impl RecordUpdate {
    pub fn path(&self) -> &'static str {
        match self {
            RecordUpdate::Full { .. } => UPDATE_FULL_PATH,
            RecordUpdate::StatusOnly { .. } => UPDATE_STATUS_PATH,
        }
    }

    pub fn gstin(&self) -> &str {
        match self {
            RecordUpdate::Full { gstin, .. } | RecordUpdate::StatusOnly { gstin, .. } => gstin,
        }
    }
}

#[derive(Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    #[serde(rename = "loginAsAdmin")]
    pub login_as_admin: bool,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>, login_as_admin: bool) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            login_as_admin,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("login_as_admin", &self.login_as_admin)
            .finish()
    }
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
    role: String,
}

/// Body of `GET /companies/`; anything but an array is treated as empty
pub fn decode_listing(body: Value) -> Result<Vec<CompanyRecord>, ClientError> {
    match body {
        Value::Array(_) => Ok(serde_json::from_value(body)?),
        other => {
            tracing::warn!(kind = value_kind(&other), "Company listing is not an array");
            Ok(Vec::new())
        }
    }
}

/// Body of `GET /companies/{gstin}/`, which may be one record, many, or null
pub fn decode_company(body: Value) -> Result<Vec<CompanyRecord>, ClientError> {
    match body {
        Value::Null => Ok(Vec::new()),
        Value::Object(_) => Ok(vec![serde_json::from_value(body)?]),
        Value::Array(_) => Ok(serde_json::from_value(body)?),
        other => {
            tracing::warn!(kind = value_kind(&other), "Company body is not a record");
            Ok(Vec::new())
        }
    }
}

/// Session from a successful login body
pub fn decode_login(body: Value) -> Result<Session, ClientError> {
    let response: LoginResponse = serde_json::from_value(body)?;
    Ok(Session::new(response.token, response.role))
}

/// Human-readable reason from a rejected login body.
///
/// `non_field_errors` may be a string or a list of strings.
pub fn login_failure_message(body: &Value) -> String {
    let message = match body.get("non_field_errors") {
        Some(Value::String(message)) => message.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(" "),
        _ => String::new(),
    };

    if message.trim().is_empty() {
        INVALID_CREDENTIALS.to_string()
    } else {
        message
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
