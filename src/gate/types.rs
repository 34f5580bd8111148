//! # Verification Types
//!
//! The two per-request values exchanged with the verification endpoint:
//! the credentials lifted off the inbound request, and the token decoded
//! from the endpoint's answer. Neither outlives the request.

use axum::http::{HeaderMap, HeaderValue};
use serde::Deserialize;

/// Inbound header carrying the caller's API key
pub const API_KEY_HEADER: &str = "x-api-key";

/// Inbound header carrying the caller's account
pub const ACCOUNT_HEADER: &str = "x-account";

/// Credentials forwarded to the verification endpoint
///
/// Both values are kept as raw header bytes, exactly as received. No format
/// validation is applied beyond being present and non-empty, so obs-text
/// (non-ASCII) values are forwarded untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: HeaderValue,
    pub account: HeaderValue,
}

impl Credentials {
    /// Extract the credentials from inbound headers
    ///
    /// Returns `None` when either header is absent or empty.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let api_key = non_empty_header(headers, API_KEY_HEADER)?;
        let account = non_empty_header(headers, ACCOUNT_HEADER)?;

        Some(Credentials { api_key, account })
    }
}

fn non_empty_header(headers: &HeaderMap, name: &str) -> Option<HeaderValue> {
    headers.get(name).filter(|v| !v.is_empty()).cloned()
}

/// Body returned by the verification endpoint on success
///
/// ## Example JSON
/// ```json
/// { "accessToken": "eyJhbGciOi..." }
/// ```
///
/// A missing `accessToken` decodes to an empty string, and unknown fields
/// are ignored. Only syntactically invalid JSON is rejected.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct VerificationResponse {
    #[serde(rename = "accessToken", default)]
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn test_credentials_from_both_headers() {
        let creds = Credentials::from_headers(&headers(&[
            ("x-api-key", "key-123"),
            ("x-account", "acme"),
        ]))
        .unwrap();

        assert_eq!(creds.api_key, "key-123");
        assert_eq!(creds.account, "acme");
    }

    #[test]
    fn test_credentials_missing_either_header() {
        assert!(Credentials::from_headers(&headers(&[("x-api-key", "key")])).is_none());
        assert!(Credentials::from_headers(&headers(&[("x-account", "acme")])).is_none());
        assert!(Credentials::from_headers(&HeaderMap::new()).is_none());
    }

    #[test]
    fn test_credentials_empty_header_counts_as_missing() {
        let creds = Credentials::from_headers(&headers(&[("x-api-key", ""), ("x-account", "acme")]));
        assert!(creds.is_none());
    }

    #[test]
    fn test_non_ascii_value_is_kept_verbatim() {
        let mut map = HeaderMap::new();
        map.insert("x-api-key", HeaderValue::from_static("key"));
        map.insert(
            "x-account",
            HeaderValue::from_bytes("café".as_bytes()).unwrap(),
        );

        let creds = Credentials::from_headers(&map).unwrap();
        assert_eq!(creds.account.as_bytes(), "café".as_bytes());
    }

    #[test]
    fn test_response_decodes_token() {
        let resp: VerificationResponse =
            serde_json::from_str(r#"{"accessToken":"abc","expiresIn":3600}"#).unwrap();
        assert_eq!(resp.access_token, "abc");
    }

    #[test]
    fn test_response_missing_token_is_empty() {
        let resp: VerificationResponse = serde_json::from_str(r#"{"other":true}"#).unwrap();
        assert_eq!(resp.access_token, "");
    }

    #[test]
    fn test_response_rejects_invalid_json() {
        assert!(serde_json::from_str::<VerificationResponse>("not json").is_err());
    }
}
