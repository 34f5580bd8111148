//! # Error Handling
//!
//! Two error families live here:
//! - `ConfigError`: raised while building a gate. Fatal at startup.
//! - `GateError`: raised while handling a single request. Always terminal for
//!   that request and turned into an HTTP response by `IntoResponse`.
//!
//! ## Error envelope
//! Failures other than a mirrored upstream rejection answer with
//! `Content-Type: application/json` and a body rendered by `axum::Json`:
//! `{"error":"Unauthorized"}` or `{"error":"Internal error"}`. The JSON value
//! is fixed but the bytes are compact (no space after the colon), so clients
//! should parse the body rather than compare it byte for byte.

use axum::{
    body::Bytes,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors raised when constructing a [`RequestGate`](crate::gate::RequestGate)
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The verification endpoint was not provided
    #[error("verification endpoint cannot be empty")]
    EmptyEndpoint,

    /// The verification endpoint is not a syntactically valid absolute URL
    #[error("invalid verification endpoint URL: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    /// The endpoint parsed but carries no host to call
    #[error("verification endpoint has no host: {0}")]
    MissingHost(String),

    /// The outbound HTTP client could not be initialised
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Per-request failures of the verification gate
///
/// Every variant stops the request. The next handler is never invoked once
/// one of these is produced.
#[derive(Error, Debug)]
pub enum GateError {
    /// `x-api-key` or `x-account` missing or empty (401)
    #[error("Unauthorized")]
    Unauthorized,

    /// Connecting to the verification endpoint failed or timed out (500)
    #[error("verification request failed: {0}")]
    UpstreamTransport(#[source] reqwest::Error),

    /// The verification response body could not be read (500)
    #[error("failed to read verification response: {0}")]
    UpstreamBody(#[source] reqwest::Error),

    /// The verification endpoint answered with something other than 200.
    /// Mirrored to the caller as-is.
    #[error("verification endpoint rejected request with status {status}")]
    UpstreamRejected {
        status: StatusCode,
        content_type: Option<HeaderValue>,
        body: Bytes,
    },

    /// The 200 response body was not valid JSON (500)
    #[error("malformed verification response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Anything else that should never reach the caller in detail (500)
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            GateError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized"),
            GateError::UpstreamRejected {
                status,
                content_type,
                body,
            } => {
                // Mirrored verbatim, no envelope
                let mut response = (status, body).into_response();
                response.headers_mut().remove(header::CONTENT_TYPE);
                if let Some(content_type) = content_type {
                    response
                        .headers_mut()
                        .insert(header::CONTENT_TYPE, content_type);
                }
                return response;
            }
            GateError::UpstreamTransport(e) => {
                tracing::error!("Verification request failed: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
            }
            GateError::UpstreamBody(e) => {
                tracing::error!("Verification body read failed: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
            }
            GateError::Decode(e) => {
                tracing::error!("Verification response decode failed: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
            }
            GateError::Internal(msg) => {
                tracing::error!("Gate internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub type GateResult<T> = Result<T, GateError>;
