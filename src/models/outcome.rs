use serde::{Deserialize, Serialize};

pub const EMPTY_PAYLOAD: &str = "Empty payload received";
pub const CHANGES_PROCESSED: &str = "Changes processed successfully";

/// Result of a single helpdesk operation.
///
/// Serializes as `{"status": "success" | "error", "message": ..., "article_url": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum OperationResult {
    Success {
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        article_url: Option<String>,
    },
    Error {
        message: String,
    },
}

impl OperationResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self::Success {
            message: message.into(),
            article_url: None,
        }
    }

    pub fn success_with_url(message: impl Into<String>, article_url: impl Into<String>) -> Self {
        Self::Success {
            message: message.into(),
            article_url: Some(article_url.into()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Success { message, .. } | Self::Error { message } => message,
        }
    }

    pub fn article_url(&self) -> Option<&str> {
        match self {
            Self::Success { article_url, .. } => article_url.as_deref(),
            Self::Error { .. } => None,
        }
    }
}

/// Top-level answer for one invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ProcessingReport {
    Success {
        message: String,
        results: Vec<OperationResult>,
    },
    Error {
        message: String,
    },
}

impl ProcessingReport {
    pub fn processed(results: Vec<OperationResult>) -> Self {
        Self::Success {
            message: CHANGES_PROCESSED.to_string(),
            results,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}
