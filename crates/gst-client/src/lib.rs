//! Async HTTP client for the GST compliance backend
//!
//! [`CompanyApi`] is the seam the dashboards are written against;
//! [`ApiClient`] implements it over reqwest. Errors are returned, never
//! swallowed here. Whether a failure is fatal is the caller's decision.

pub mod api;
pub mod error;
pub mod http;
pub mod refresh;

pub use api::{CompanyApi, Credentials, RecordUpdate, INVALID_CREDENTIALS};
pub use error::ClientError;
pub use http::{basic_auth_header, ApiClient, DEFAULT_TIMEOUT};
pub use refresh::{wait_for_gstin, RefreshPolicy, Settled};
