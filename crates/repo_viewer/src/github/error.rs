//! Normalized error kinds for every GitHub request.

use thiserror::Error;

use crate::http::HttpError;

/// Every failure of a GitHub request, after classification.
///
/// Nothing above [`crate::github::decode`] sees raw transport or serde errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    #[error("Invalid URL")]
    InvalidUrl,

    #[error("Transport error: {0}")]
    Underlying(String),

    #[error("Invalid response")]
    InvalidResponse,

    #[error("No data")]
    NoData,

    #[error("Decoding error: {0}")]
    Decoding(String),

    #[error("Not found")]
    NotFound,

    #[error("Server error: HTTP {0}")]
    ServerError(u16),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("{0}")]
    Other(String),
}

impl NetworkError {
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }

    /// The single dismissible message shown for this error.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            NetworkError::InvalidUrl | NetworkError::InvalidResponse | NetworkError::NoData => {
                "A network error occurred. Please try again.".to_string()
            }
            NetworkError::Underlying(cause) => cause.clone(),
            NetworkError::Decoding(details) => details.clone(),
            NetworkError::NotFound => "not Found".to_string(),
            NetworkError::Other(message) => message.clone(),
            NetworkError::ServerError(code) => format!("server error with {code} status code."),
            NetworkError::Unauthorized => "unauthorized access to the GitHub API.".to_string(),
            NetworkError::RateLimitExceeded => "rate limit exceeded error.".to_string(),
        }
    }
}

impl From<HttpError> for NetworkError {
    fn from(err: HttpError) -> Self {
        NetworkError::Underlying(err.to_string())
    }
}

impl From<serde_json::Error> for NetworkError {
    fn from(err: serde_json::Error) -> Self {
        NetworkError::Decoding(err.to_string())
    }
}

impl From<url::ParseError> for NetworkError {
    fn from(_: url::ParseError) -> Self {
        NetworkError::InvalidUrl
    }
}

/// Result type alias for GitHub requests.
pub type Result<T> = std::result::Result<T, NetworkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_network_message_for_transport_shaped_errors() {
        for err in [
            NetworkError::InvalidUrl,
            NetworkError::InvalidResponse,
            NetworkError::NoData,
        ] {
            assert_eq!(
                err.user_message(),
                "A network error occurred. Please try again."
            );
        }
    }

    #[test]
    fn test_user_message_embeds_payloads() {
        assert_eq!(NetworkError::NotFound.user_message(), "not Found");
        assert_eq!(
            NetworkError::other("searchTerm is not exist").user_message(),
            "searchTerm is not exist"
        );
        assert_eq!(
            NetworkError::ServerError(502).user_message(),
            "server error with 502 status code."
        );
        assert_eq!(
            NetworkError::Underlying("connection reset".into()).user_message(),
            "connection reset"
        );
        assert_eq!(
            NetworkError::Decoding("missing field `id`".into()).user_message(),
            "missing field `id`"
        );
        assert_eq!(
            NetworkError::Unauthorized.user_message(),
            "unauthorized access to the GitHub API."
        );
        assert_eq!(
            NetworkError::RateLimitExceeded.user_message(),
            "rate limit exceeded error."
        );
    }

    #[test]
    fn test_equality_is_per_kind_and_payload() {
        assert_eq!(NetworkError::other("a"), NetworkError::other("a"));
        assert_ne!(NetworkError::other("a"), NetworkError::other("b"));
        assert_ne!(NetworkError::ServerError(500), NetworkError::ServerError(503));
        assert_ne!(NetworkError::NotFound, NetworkError::InvalidResponse);
    }

    #[test]
    fn test_transport_errors_become_underlying() {
        let err: NetworkError = HttpError::Transport("dns failure".into()).into();
        assert_eq!(
            err,
            NetworkError::Underlying("http transport error: dns failure".into())
        );
    }
}
