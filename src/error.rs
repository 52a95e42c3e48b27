use thiserror::Error;

use crate::geolocation::FailureReason;

/// A prayer time string that is not `hh:mm` followed by `am`/`pm`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid time '{0}': expected something like 09:00am or 01:30pm")]
    InvalidTime(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}: {detail}")]
pub struct GeolocationError {
    pub reason: FailureReason,
    pub detail: String,
}

impl GeolocationError {
    pub fn new(reason: FailureReason, detail: impl Into<String>) -> Self {
        Self {
            reason,
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("routing engine unavailable: {0}")]
    Unavailable(String),
    #[error("no route found between the given points")]
    NoRoute,
    #[error("routing request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected routing response: {0}")]
    Decode(String),
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("stored location list is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("stored location list failed validation: {0}")]
    Invalid(String),
}

/// A rejected add-form field, carrying the message shown under that field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("no API base URL configured (set [api] base_url in config.toml)")]
    NotConfigured,
    #[error("API request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API returned HTTP {0}")]
    Status(u16),
}
