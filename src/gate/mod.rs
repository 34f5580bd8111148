//! # Request Gate
//!
//! Delegated request verification. For every inbound request the gate:
//! 1. Reads `x-api-key` and `x-account` (401 if either is missing)
//! 2. Calls the verification endpoint with those two headers
//! 3. Mirrors any non-200 answer back to the caller untouched
//! 4. Decodes `{"accessToken": "..."}` from a 200 answer
//! 5. Issues a `token` session cookie and hands the original request to the
//!    next handler
//!
//! ## Submodules
//! - `types`: credentials and the endpoint's response body
//! - `cookie`: session cookie construction
//!
//! The outbound call always uses plain `http://`, whatever scheme the
//! configured endpoint carries. Only its authority and path are kept.

pub mod cookie;
pub mod types;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::Request,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use url::{Position, Url};

use crate::config::GateConfig;
use crate::error::{ConfigError, GateError, GateResult};

pub use self::types::{Credentials, VerificationResponse, ACCOUNT_HEADER, API_KEY_HEADER};

/// Timeout applied when none (or zero) is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Verification gate shared by every request
///
/// Immutable after construction. Cloning only bumps an `Arc`, so the gate
/// can be handed to axum as middleware state.
#[derive(Clone)]
pub struct RequestGate {
    inner: Arc<GateInner>,
}

struct GateInner {
    name: String,
    endpoint_host: String,
    endpoint_path: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl RequestGate {
    /// Validate `config` and build a ready-to-use gate
    ///
    /// No network access happens here.
    ///
    /// # Errors
    /// - `ConfigError::EmptyEndpoint` if the endpoint is empty
    /// - `ConfigError::InvalidEndpoint` if it is not a valid absolute URL
    /// - `ConfigError::MissingHost` if it has no host component
    pub fn new(config: &GateConfig, name: impl Into<String>) -> Result<Self, ConfigError> {
        if config.endpoint.trim().is_empty() {
            return Err(ConfigError::EmptyEndpoint);
        }

        let parsed = Url::parse(&config.endpoint)?;
        if parsed.host_str().map_or(true, str::is_empty) {
            return Err(ConfigError::MissingHost(config.endpoint.clone()));
        }

        // host[:port], without userinfo. The url crate drops a port equal to
        // the scheme default, which would otherwise become :80 under http://
        let endpoint_host = match parsed.port_or_known_default() {
            Some(port)
                if parsed.port().is_none()
                    && parsed.scheme() != "http"
                    && names_explicit_port(&config.endpoint) =>
            {
                format!("{}:{}", &parsed[Position::BeforeHost..Position::AfterHost], port)
            }
            _ => parsed[Position::BeforeHost..Position::AfterPort].to_string(),
        };
        let endpoint_path = parsed.path().to_string();

        let timeout = if config.timeout.is_zero() {
            DEFAULT_TIMEOUT
        } else {
            config.timeout
        };

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(RequestGate {
            inner: Arc::new(GateInner {
                name: name.into(),
                endpoint_host,
                endpoint_path,
                timeout,
                client,
            }),
        })
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn timeout(&self) -> Duration {
        self.inner.timeout
    }

    /// URL the verification call is sent to
    pub fn verification_url(&self) -> String {
        format!(
            "http://{}{}",
            self.inner.endpoint_host, self.inner.endpoint_path
        )
    }

    /// Gate a single request
    ///
    /// On success the `token` cookie is appended to whatever response `next`
    /// produces. On failure `next` is never run.
    pub async fn handle(&self, request: Request, next: Next) -> Response {
        let set_cookie = match self.authorize(request.headers()).await {
            Ok(value) => value,
            Err(e) => return e.into_response(),
        };

        let mut response = next.run(request).await;
        response.headers_mut().append(header::SET_COOKIE, set_cookie);
        response
    }

    /// Run every check up to cookie issuance, returning the `Set-Cookie` value
    async fn authorize(&self, headers: &HeaderMap) -> GateResult<HeaderValue> {
        let credentials = Credentials::from_headers(headers).ok_or_else(|| {
            tracing::warn!(gate = %self.inner.name, "Missing credential headers");
            GateError::Unauthorized
        })?;

        let verified = self.verify(&credentials).await?;
        tracing::debug!(gate = %self.inner.name, account = ?credentials.account, "Request verified");

        cookie::set_cookie_header(&verified.access_token)
    }

    /// Ask the verification endpoint about `credentials`
    ///
    /// Exactly one outbound GET is made, with no retries.
    pub async fn verify(&self, credentials: &Credentials) -> GateResult<VerificationResponse> {
        let url = self.verification_url();
        tracing::debug!(gate = %self.inner.name, %url, "Calling verification endpoint");

        let response = self
            .inner
            .client
            .get(&url)
            .header(API_KEY_HEADER, credentials.api_key.clone())
            .header(ACCOUNT_HEADER, credentials.account.clone())
            .send()
            .await
            .map_err(GateError::UpstreamTransport)?;

        let status = response.status();
        let content_type = response.headers().get(header::CONTENT_TYPE).cloned();
        let body = response.bytes().await.map_err(GateError::UpstreamBody)?;

        if status != StatusCode::OK {
            tracing::warn!(gate = %self.inner.name, %status, "Verification endpoint rejected request");
            return Err(GateError::UpstreamRejected {
                status,
                content_type,
                body,
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

/// Whether the raw endpoint string spells out a port in its authority
fn names_explicit_port(endpoint: &str) -> bool {
    let rest = endpoint.split_once("://").map_or("", |(_, rest)| rest);
    let authority = rest
        .split(|c| matches!(c, '/' | '?' | '#'))
        .next()
        .unwrap_or("");
    let host_port = authority.rsplit('@').next().unwrap_or("");
    // Skip past a bracketed IPv6 literal
    let after_host = match host_port.rfind(']') {
        Some(i) => &host_port[i + 1..],
        None => host_port,
    };
    after_host
        .split_once(':')
        .is_some_and(|(_, port)| !port.is_empty())
}

impl std::fmt::Debug for RequestGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestGate")
            .field("name", &self.inner.name)
            .field("endpoint", &self.verification_url())
            .field("timeout", &self.inner.timeout)
            .finish()
    }
}
