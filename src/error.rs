//! Error types shared by the configuration layer and the helpdesk client.

use thiserror::Error;

/// Failures while loading or validating the service configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("missing required setting: {0}")]
    Missing(&'static str),

    #[error("invalid URL for {field}: '{value}'")]
    InvalidUrl { field: &'static str, value: String },

    #[error("invalid value for {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Failures talking to the helpdesk API that happen before a status code is
/// available, or while decoding a response body.
#[derive(Debug, Error)]
pub enum HelpdeskError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode helpdesk response: {0}")]
    Decode(String),
}
