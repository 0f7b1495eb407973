//! Push event payload extraction

use crate::error::{RelayError, Result};
use serde::Deserialize;

/// The subset of a GitHub push event this server acts on.
/// Unknown fields in the delivery are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct PushEvent {
    /// Full reference of the pushed branch or tag, e.g. "refs/heads/main".
    #[serde(rename = "ref")]
    pub git_ref: String,
    /// Commit sha before the push. The zero hash for a newly created branch.
    pub before: String,
    /// Commit sha after the push.
    pub after: String,
    pub repository: Repository,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    /// "owner/name"
    pub full_name: String,
    pub clone_url: String,
}

impl PushEvent {
    /// Parses the raw request body. Any parse failure, including a missing
    /// or non-string required field, is a malformed-request condition.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body).map_err(|e| RelayError::MalformedPayload(e.to_string()))
    }
}
