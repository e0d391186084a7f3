//! Response classification: the one place raw responses become typed results.

use serde::de::DeserializeOwned;

use super::error::{NetworkError, Result};
use super::types::ErrorEnvelope;
use crate::http::HttpResponse;

/// Message GitHub uses in its error envelope for missing resources.
const NOT_FOUND_MESSAGE: &str = "Not Found";

/// Decode a JSON success payload, or classify the failure.
pub fn classify<T: DeserializeOwned>(response: &HttpResponse) -> Result<T> {
    if response.status != 200 {
        return Err(classify_failure(response));
    }
    serde_json::from_slice(&response.body).map_err(NetworkError::from)
}

/// Decode a raw text payload (README content), or classify the failure.
pub fn classify_text(response: &HttpResponse) -> Result<String> {
    if response.status != 200 {
        return Err(classify_failure(response));
    }
    String::from_utf8(response.body.clone()).map_err(|e| NetworkError::Decoding(e.to_string()))
}

/// Map a non-200 response to an error kind via its `{message}` envelope.
pub fn classify_failure(response: &HttpResponse) -> NetworkError {
    match serde_json::from_slice::<ErrorEnvelope>(&response.body) {
        Ok(envelope) if envelope.message == NOT_FOUND_MESSAGE => NetworkError::NotFound,
        Ok(envelope) => NetworkError::Other(envelope.message),
        Err(e) => {
            tracing::debug!(
                status = response.status,
                error = %e,
                "error response without a message envelope"
            );
            NetworkError::InvalidResponse
        }
    }
}
