//! Fetch error model.

use thiserror::Error;

/// Result type returned by entity sources and fetchers.
pub type FetchResult<T> = Result<T, FetchError>;

/// Failure to read a remote collection.
///
/// The `Display` output is the message routed to the `errors` stream, so it
/// is phrased for the person looking at the catalog.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// A client-side or network error occurred before a response arrived.
    #[error("An error occurred: {0}")]
    Network(String),

    /// The backend answered with an unsuccessful status code.
    #[error("Backend returned code {status}: {message}")]
    Backend { status: u16, message: String },

    /// The response arrived but its body was not a valid collection.
    #[error("An error occurred: failed to decode response: {0}")]
    Decode(String),
}

impl FetchError {
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn backend(status: u16, msg: impl Into<String>) -> Self {
        Self::Backend {
            status,
            message: msg.into(),
        }
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// HTTP status, when the backend produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Backend { status, .. } => Some(*status),
            FetchError::Network(_) | FetchError::Decode(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_errors_render_as_client_side_failures() {
        let err = FetchError::network("connection refused");
        assert_eq!(err.to_string(), "An error occurred: connection refused");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn backend_errors_carry_the_status_code() {
        let err = FetchError::backend(404, "Not Found");
        assert_eq!(err.to_string(), "Backend returned code 404: Not Found");
        assert_eq!(err.status(), Some(404));
    }
}
