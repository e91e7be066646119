//! Interpretation of the `/upload` reply.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{UploadError, UploadReply};

/// Shown when the server rejects the upload without saying why.
pub const UPLOAD_FAILED_MESSAGE: &str = "Upload failed. Please try again.";
/// Shown when the call itself failed or the reply could not be read.
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred. Please try again.";

/// JSON body returned by `/upload`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    /// `"success"` when the links were accepted.
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    /// Links the server already had for this bot.
    #[serde(default)]
    pub skipped_urls: Option<Vec<String>>,
    /// Number of links newly stored.
    #[serde(default)]
    pub new_count: Option<u64>,
}

impl UploadResponse {
    /// Reads the known fields out of any JSON value. A field that is absent
    /// or of the wrong type counts as missing; a non-object yields the
    /// default (empty status).
    pub fn from_value(value: &Value) -> Self {
        let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);
        Self {
            status: text("status").unwrap_or_default(),
            message: text("message"),
            skipped_urls: value.get("skipped_urls").and_then(Value::as_array).map(|urls| {
                urls.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            }),
            new_count: value.get("new_count").and_then(Value::as_u64),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// What came of one submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// HTTP 2xx with `status == "success"`.
    Accepted {
        message: String,
        skipped_urls: Vec<String>,
        new_count: Option<u64>,
    },
    /// The server answered but did not accept the links.
    Rejected { http_status: u32, message: String },
    /// No usable reply: transport failure or a body that is not JSON.
    Failed { reason: String },
}

impl SubmissionOutcome {
    pub fn from_reply(reply: &UploadReply) -> Self {
        let parsed = match serde_json::from_slice::<Value>(&reply.body) {
            Ok(value) => UploadResponse::from_value(&value),
            Err(e) => {
                return SubmissionOutcome::Failed {
                    reason: format!("HTTP {}: unreadable reply: {}", reply.status, e),
                }
            }
        };

        if reply.is_http_ok() && parsed.is_success() {
            return SubmissionOutcome::Accepted {
                message: parsed.message.unwrap_or_default(),
                skipped_urls: parsed.skipped_urls.unwrap_or_default(),
                new_count: parsed.new_count,
            };
        }

        let message = parsed
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| UPLOAD_FAILED_MESSAGE.to_string());
        SubmissionOutcome::Rejected {
            http_status: reply.status,
            message,
        }
    }

    pub fn from_error(err: &UploadError) -> Self {
        SubmissionOutcome::Failed {
            reason: err.to_string(),
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmissionOutcome::Accepted { .. })
    }

    /// Banner text for the user.
    pub fn user_message(&self) -> &str {
        match self {
            SubmissionOutcome::Accepted { message, .. } => message.as_str(),
            SubmissionOutcome::Rejected { message, .. } => message.as_str(),
            SubmissionOutcome::Failed { .. } => GENERIC_FAILURE_MESSAGE,
        }
    }
}
