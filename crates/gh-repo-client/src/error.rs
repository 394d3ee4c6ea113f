//! Request-failure error surfaced by the client
//!
//! All failure modes collapse into a single kind, matching the one
//! exception type the API contract promises: a message plus an optional
//! numeric code (the HTTP status, when there is one).

use thiserror::Error;

/// The single error kind returned by `gh-repo-client` operations
///
/// Three conditions produce it:
///
/// - transport initialization failure (no code),
/// - transport-level failure during a request (no code, message carries
///   the underlying error text),
/// - HTTP response status >= 400 (code is the status, message is the
///   raw response body).
///
/// A success response whose body is not valid JSON also surfaces here,
/// with no code.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct RequestError {
    /// Human-readable failure detail
    pub message: String,
    /// HTTP status code, when the failure is an error response
    pub code: Option<u16>,
}

impl RequestError {
    /// Transport-level failure (initialization or execution)
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
        }
    }

    /// Error response from the API: status >= 400, body kept verbatim
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        Self {
            message: body.into(),
            code: Some(status),
        }
    }

    /// Success response whose body failed to decode as JSON
    pub fn decode(url: &str, err: serde_json::Error) -> Self {
        Self {
            message: format!("failed to decode response from {}: {}", url, err),
            code: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_message() {
        let err = RequestError::http(404, "{\"message\":\"Not Found\"}");
        assert_eq!(err.to_string(), "{\"message\":\"Not Found\"}");
        assert_eq!(err.code, Some(404));
    }

    #[test]
    fn transport_errors_carry_no_code() {
        let err = RequestError::transport("connection refused");
        assert_eq!(err.code, None);
        assert_eq!(err.message, "connection refused");
    }
}
