//! Shared domain types for the GST compliance console
//!
//! - [`record`]: the company compliance record as returned by the backend
//! - [`gstin`]: GSTIN format validation
//! - [`period`]: filing-period helpers (month names, numeric parsing)
//! - [`session`]: authenticated session and the provider seam screens read it from

pub mod gstin;
pub mod period;
pub mod record;
pub mod session;

pub use gstin::{validate_gstin, GstinError};
pub use period::{month_name, parse_leading_int};
pub use record::{CompanyRecord, ComplianceStatus};
pub use session::{Role, Session, SessionProvider};
