//! Token response body handed back from the mocked `/oauth2/token` endpoint.
//!
//! Field names follow the Salesforce OAuth token response, which is what the
//! SDK under test parses:
//! ```json
//! {
//!   "id": "https://login.salesforce.com/id/<org>/<user>",
//!   "access_token": "222",
//!   "instance_url": "http://localhost:9966/force-mock-oauth-server-app/oauth2",
//!   "issued_at": "1700000000",
//!   "refresh_token": "333",
//!   "signature": "555"
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::GrantConfig;

/// Body of a successful token exchange.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponsePayload {
    pub id: String,
    pub access_token: String,
    pub instance_url: String,
    /// Unix seconds, as a decimal string.
    pub issued_at: String,
    pub refresh_token: String,
    pub signature: String,
}

impl AuthResponsePayload {
    /// Build a fresh payload from the configured grant, stamped with the current time.
    pub fn issue(grant: &GrantConfig) -> Self {
        Self::issue_at(grant, now_unix_seconds())
    }

    fn issue_at(grant: &GrantConfig, issued_at: u64) -> Self {
        Self {
            id: grant.id.clone(),
            access_token: grant.access_token.clone(),
            instance_url: grant.instance_url.clone(),
            issued_at: issued_at.to_string(),
            refresh_token: grant.refresh_token.clone(),
            signature: grant.signature.clone(),
        }
    }
}

/// Seconds since the Unix epoch. A clock set before the epoch reads as 0.
pub fn now_unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
