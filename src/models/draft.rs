//! Draft request and response envelope models

use serde::{Deserialize, Serialize};

/// Inbound body of `POST /email-draft`
///
/// All three fields are required by the schema; no further validation is
/// applied. Length limits and prompt-injection sanitization are an accepted
/// limitation of this service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftRequest {
    pub note: String,
    pub tone: String,
    pub recipient: String,
}

/// Outbound body of `POST /email-draft`
///
/// Errors travel in the body rather than the HTTP status: the relay answers
/// 200 on every path and callers dispatch on which fields are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DraftEnvelope {
    Success { response: String },
    Failure { error: String, raw: String },
}
