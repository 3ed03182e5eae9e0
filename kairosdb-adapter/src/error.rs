use thiserror::Error;

/// Errors that can occur when writing to KairosDB.
#[derive(Debug, Error)]
pub enum KairosError {
    /// Network error (connection failed, timeout, etc.).
    #[error("Network error: {message}")]
    Network { message: String },

    /// Serialization error building the request body.
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// KairosDB returned a non-success status.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl KairosError {
    /// Returns true if this error is transient and the upstream delivery
    /// component may retry the batch. The adapter itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            KairosError::Network { .. } => true,
            KairosError::Server { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// Result type for adapter operations.
pub type KairosResult<T> = std::result::Result<T, KairosError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = KairosError::Server {
            status: 400,
            message: "metric name is empty".to_string(),
        };
        assert!(err.to_string().contains("400"));
        assert!(err.to_string().contains("metric name is empty"));
    }

    #[test]
    fn test_is_retryable() {
        assert!(KairosError::Network {
            message: "timeout".to_string()
        }
        .is_retryable());
        assert!(KairosError::Server {
            status: 503,
            message: "unavailable".to_string()
        }
        .is_retryable());
        assert!(!KairosError::Server {
            status: 400,
            message: "bad request".to_string()
        }
        .is_retryable());
        assert!(!KairosError::Serialization {
            message: "bad value".to_string()
        }
        .is_retryable());
    }
}
