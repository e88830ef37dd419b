//! Waiting for a freshly requested GSTIN to show up in the listing
//!
//! The backend stores a fetched company asynchronously, so the listing taken
//! right after `create_or_refresh` may not contain it yet. Polling backs off
//! exponentially instead of sleeping a fixed interval.

use crate::api::CompanyApi;
use crate::error::ClientError;
use gst_types::CompanyRecord;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshPolicy {
    /// Listings fetched at most; zero behaves as one
    pub attempts: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        Self {
            attempts: 5,
            initial_delay_ms: 500,
            max_delay_ms: 4_000,
        }
    }
}

impl RefreshPolicy {
    /// Policy that polls immediately, for tests
    pub fn immediate(attempts: u32) -> Self {
        Self {
            attempts,
            initial_delay_ms: 0,
            max_delay_ms: 0,
        }
    }

    /// Delay before each attempt: initial, doubling, capped at the maximum
    pub fn delays(&self) -> impl Iterator<Item = Duration> {
        let max = self.max_delay_ms;
        let mut next = self.initial_delay_ms.min(max);
        (0..self.attempts.max(1)).map(move |_| {
            let delay = next;
            next = next.saturating_mul(2).min(max);
            Duration::from_millis(delay)
        })
    }
}

/// Outcome of [`wait_for_gstin`]
#[derive(Debug, Clone)]
pub struct Settled {
    /// The most recent successful listing
    pub records: Vec<CompanyRecord>,
    /// Whether the GSTIN appeared before attempts ran out
    pub found: bool,
    pub attempts: u32,
}

/// Poll `list_companies` until a record for `gstin` appears.
///
/// Returns the last listing fetched whether or not the GSTIN showed up.
/// Fails only when every attempt failed.
pub async fn wait_for_gstin<A>(
    api: &A,
    gstin: &str,
    policy: &RefreshPolicy,
) -> Result<Settled, ClientError>
where
    A: CompanyApi + ?Sized,
{
    let mut latest: Option<Vec<CompanyRecord>> = None;
    let mut last_error = None;
    let mut attempts = 0;

    for delay in policy.delays() {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        attempts += 1;

        match api.list_companies().await {
            Ok(records) => {
                if records.iter().any(|r| r.matches_gstin(gstin)) {
                    tracing::debug!(gstin, attempts, "Refreshed GSTIN is listed");
                    return Ok(Settled {
                        records,
                        found: true,
                        attempts,
                    });
                }
                latest = Some(records);
            }
            Err(err) => {
                tracing::warn!(gstin, attempts, error = %err, "Listing failed while waiting for refresh");
                last_error = Some(err);
            }
        }
    }

    match (latest, last_error) {
        (Some(records), _) => {
            tracing::warn!(gstin, attempts, "GSTIN not listed after refresh");
            Ok(Settled {
                records,
                found: false,
                attempts,
            })
        }
        (None, Some(err)) => Err(err),
        (None, None) => Err(ClientError::Transport("no listing attempted".to_string())),
    }
}
