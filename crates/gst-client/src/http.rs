//! reqwest-backed implementation of [`CompanyApi`]

use crate::api::{
    company_path, decode_company, decode_listing, decode_login, login_failure_message,
    CompanyApi, Credentials, RecordUpdate, FETCH_AND_SAVE_PATH, LIST_PATH, LOGIN_PATH,
};
use crate::error::ClientError;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use gst_types::{CompanyRecord, Session};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Response, Url};
use serde_json::{json, Value};
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// `Authorization` header value for HTTP basic auth
pub fn basic_auth_header(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", username, password)))
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    /// Client for the backend at `base_url` (`http` or `https`, trailing slash optional)
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let parsed =
            Url::parse(trimmed).map_err(|_| ClientError::InvalidBaseUrl(base_url.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Ok(Self {
            base_url: trimmed.to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json(&self, path: &str) -> Result<Value, ClientError> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let response = check_status(self.http.get(&url).send().await?).await?;
        Ok(response.json::<Value>().await?)
    }

    async fn send_json(
        &self,
        method: reqwest::Method,
        path: &str,
        body: &impl serde::Serialize,
    ) -> Result<(), ClientError> {
        let url = self.url(path);
        tracing::debug!(%url, %method, "Sending");
        check_status(self.http.request(method, &url).json(body).send().await?).await?;
        Ok(())
    }
}

/// Map a non-2xx response to [`ClientError::Status`] with its body text
async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl CompanyApi for ApiClient {
    async fn list_companies(&self) -> Result<Vec<CompanyRecord>, ClientError> {
        let records = decode_listing(self.get_json(LIST_PATH).await?)?;
        tracing::info!(count = records.len(), "Loaded company records");
        Ok(records)
    }

    async fn get_company(&self, gstin: &str) -> Result<Vec<CompanyRecord>, ClientError> {
        decode_company(self.get_json(&company_path(gstin.trim())).await?)
    }

    async fn create_or_refresh(&self, gstin: &str) -> Result<(), ClientError> {
        self.send_json(
            reqwest::Method::POST,
            FETCH_AND_SAVE_PATH,
            &json!({ "gstin": gstin }),
        )
        .await?;
        tracing::info!(gstin, "Requested GST record fetch");
        Ok(())
    }

    async fn update_record(&self, update: &RecordUpdate) -> Result<(), ClientError> {
        self.send_json(reqwest::Method::PUT, update.path(), update)
            .await?;
        tracing::info!(gstin = update.gstin(), path = update.path(), "Updated record");
        Ok(())
    }

    async fn login(&self, credentials: &Credentials) -> Result<Session, ClientError> {
        let url = self.url(LOGIN_PATH);
        tracing::debug!(%url, username = %credentials.username, "Logging in");

        let response = self
            .http
            .post(&url)
            .header(
                AUTHORIZATION,
                basic_auth_header(&credentials.username, &credentials.password),
            )
            .json(credentials)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        let body: Value = serde_json::from_str(&text).unwrap_or(Value::Null);

        if status.is_success() {
            let session = decode_login(body)?;
            tracing::info!(role = %session.role, "Logged in");
            Ok(session)
        } else {
            tracing::warn!(status = status.as_u16(), "Login rejected");
            Err(ClientError::LoginRejected(login_failure_message(&body)))
        }
    }
}
