//! Error types for the jobpilot pipeline.

use thiserror::Error;

/// Result type alias using jobpilot's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for jobpilot operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Broker protocol error (wraps lapin::Error)
    #[error("Broker error: {0}")]
    Broker(#[from] lapin::Error),

    /// Broker unreachable after exhausting connect retries
    #[error("Broker connection failed after {attempts} attempts: {reason}")]
    ConnectionFailed { attempts: u32, reason: String },

    /// Malformed queue payload; the message is dropped, never retried
    #[error("Decode error: {0}")]
    Decode(String),

    /// Recoverable external failure (network, timeout, upstream rate limit)
    #[error("Transient external error: {0}")]
    Transient(String),

    /// External collaborator says the action can never succeed
    #[error("Permanent external error: {0}")]
    Permanent(String),

    /// Store update failed after an irreversible external side effect
    #[error("Store inconsistency: {0}")]
    StoreInconsistency(String),

    /// Letter generation failed
    #[error("Generation error: {0}")]
    Generation(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Decode(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() || e.is_connect() {
            Error::Transient(e.to_string())
        } else {
            Error::Request(e.to_string())
        }
    }
}

/// Outcome classification for a submission attempt.
///
/// Transient failures leave the item pending for a later re-attempt;
/// permanent failures are logged and dropped.
#[derive(Error, Debug)]
pub enum SubmitError {
    /// Recoverable by retry (network error, timeout, upstream quota)
    #[error("transient submission failure: {0}")]
    Transient(String),

    /// Never recoverable (posting withdrawn, rejected request)
    #[error("permanent submission failure: {0}")]
    Permanent(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_connection_failed() {
        let err = Error::ConnectionFailed {
            attempts: 5,
            reason: "refused".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Broker connection failed after 5 attempts: refused"
        );
    }

    #[test]
    fn test_error_display_decode() {
        let err = Error::Decode("unexpected end of input".to_string());
        assert_eq!(err.to_string(), "Decode error: unexpected end of input");
    }

    #[test]
    fn test_error_display_transient() {
        let err = Error::Transient("timeout".to_string());
        assert_eq!(err.to_string(), "Transient external error: timeout");
    }

    #[test]
    fn test_error_display_permanent() {
        let err = Error::Permanent("vacancy archived".to_string());
        assert_eq!(
            err.to_string(),
            "Permanent external error: vacancy archived"
        );
    }

    #[test]
    fn test_error_display_store_inconsistency() {
        let err = Error::StoreInconsistency("mark_applied failed".to_string());
        assert_eq!(err.to_string(), "Store inconsistency: mark_applied failed");
    }

    #[test]
    fn test_from_serde_json_error_is_decode() {
        let json_err = serde_json::from_str::<i32>("not a number").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_submit_error_display() {
        let t = SubmitError::Transient("429".to_string());
        let p = SubmitError::Permanent("403".to_string());
        assert_eq!(t.to_string(), "transient submission failure: 429");
        assert_eq!(p.to_string(), "permanent submission failure: 403");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
