/// Structured error types for reqstore-core.
///
/// Uses `thiserror` for better API surface and error composition.
/// Binary crates (reqstore-cli) can still use `anyhow` for convenience,
/// but library consumers get the store's error taxonomy directly.
///
/// The taxonomy deliberately mirrors the store's propagation policy:
/// save failures are generic (the driver cause is logged, not attached),
/// lookup failures carry their cause, and a missing document is its own
/// variant so callers can tell it apart from a failed lookup.
use thiserror::Error;

/// Main error type for reqstore-core operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Connection lifecycle failed (strict connect or close)
    #[error("{reason}: {cause}")]
    Connection { reason: String, cause: anyhow::Error },

    /// A write or lookup against the store failed
    #[error("{reason}")]
    Persistence {
        reason: String,
        cause: Option<anyhow::Error>,
    },

    /// No document matches the requested id
    #[error("request body {id} not found")]
    NotFound { id: String },
}

/// Result type alias for reqstore-core operations
pub type Result<T> = std::result::Result<T, StoreError>;

impl StoreError {
    /// Create a connection error with its underlying cause
    pub fn connection(reason: impl Into<String>, cause: anyhow::Error) -> Self {
        Self::Connection {
            reason: reason.into(),
            cause,
        }
    }

    /// Create the generic save error. The cause is withheld on purpose:
    /// callers only learn that the write failed.
    pub fn save_failed() -> Self {
        Self::Persistence {
            reason: "failed to save request body".to_string(),
            cause: None,
        }
    }

    /// Create a lookup error carrying the underlying cause
    pub fn lookup(cause: anyhow::Error) -> Self {
        Self::Persistence {
            reason: format!("request body lookup failed: {cause}"),
            cause: Some(cause),
        }
    }

    /// Create a persistence error for a malformed stored document
    pub fn invalid_document(reason: impl Into<String>) -> Self {
        Self::Persistence {
            reason: reason.into(),
            cause: None,
        }
    }

    /// Create a not-found error for the given public id
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_save_error_hides_cause() {
        let err = StoreError::save_failed();
        assert_eq!(err.to_string(), "failed to save request body");
    }

    #[test]
    fn test_lookup_error_propagates_cause() {
        let err = StoreError::lookup(anyhow!("connection reset"));
        assert!(err.to_string().contains("lookup failed"));
        assert!(err.to_string().contains("connection reset"));
    }

    #[test]
    fn test_not_found_display() {
        let err = StoreError::not_found("abc123");
        assert_eq!(err.to_string(), "request body abc123 not found");
    }

    #[test]
    fn test_connection_error_display() {
        let err = StoreError::connection("failed to close store connection", anyhow!("boom"));
        assert_eq!(err.to_string(), "failed to close store connection: boom");
    }
}
