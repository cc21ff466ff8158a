//! Error types module
//!
//! `MediaInfoError` covers everything that can go wrong while enriching an
//! event. `HandlerError` pairs such an error with the fallback record the
//! handler built, so callers both observe the failure and get usable values.

use crate::models::EnrichedRequest;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata describing how an error should be reported to the orchestrator.
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "VALIDATION_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether retrying the same event could succeed
    fn is_recoverable(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum MediaInfoError {
    #[error("Validation error: required field '{0}' is missing or empty")]
    MissingField(&'static str),

    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MediaInfoError {
    /// True for the missing-field validation failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, MediaInfoError::MissingField(_))
    }
}

impl ErrorMetadata for MediaInfoError {
    fn error_code(&self) -> &'static str {
        match self {
            MediaInfoError::MissingField(_) => "VALIDATION_ERROR",
            MediaInfoError::InvalidEvent(_) => "INVALID_EVENT",
            MediaInfoError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    fn is_recoverable(&self) -> bool {
        // Same event, same result: nothing here is transient.
        false
    }

    fn log_level(&self) -> LogLevel {
        match self {
            MediaInfoError::MissingField(_) | MediaInfoError::InvalidEvent(_) => LogLevel::Warn,
            MediaInfoError::Serialization(_) => LogLevel::Error,
        }
    }
}

/// Log an error at the level its metadata asks for.
pub fn log_error(error: &MediaInfoError) {
    let error_code = error.error_code();
    let recoverable = error.is_recoverable();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_code, recoverable, "Mediainfo step failed");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_code, recoverable, "Mediainfo step failed");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_code, recoverable, "Mediainfo step failed");
        }
    }
}

/// Failure surfaced by the handler, carrying the fallback record it produced.
#[derive(Debug, thiserror::Error)]
#[error("mediainfo step failed: {source}")]
pub struct HandlerError {
    #[source]
    source: MediaInfoError,
    fallback: Box<EnrichedRequest>,
}

impl HandlerError {
    pub fn new(source: MediaInfoError, fallback: EnrichedRequest) -> Self {
        Self {
            source,
            fallback: Box::new(fallback),
        }
    }

    /// The underlying error
    pub fn error(&self) -> &MediaInfoError {
        &self.source
    }

    /// The record filled with fallback values
    pub fn fallback(&self) -> &EnrichedRequest {
        &self.fallback
    }

    /// Consume self and return the fallback record
    pub fn into_fallback(self) -> EnrichedRequest {
        *self.fallback
    }
}

impl ErrorMetadata for HandlerError {
    fn error_code(&self) -> &'static str {
        self.source.error_code()
    }

    fn is_recoverable(&self) -> bool {
        self.source.is_recoverable()
    }

    fn log_level(&self) -> LogLevel {
        self.source.log_level()
    }
}
