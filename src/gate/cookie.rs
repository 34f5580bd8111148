//! # Session Cookie
//!
//! Builds the `token` cookie issued after a successful verification.
//! The cookie is a session cookie: `Path=/`, `HttpOnly`, `Secure`, no expiry
//! and no `SameSite` attribute.

use axum::http::HeaderValue;
use axum_extra::extract::cookie::Cookie;

use crate::error::{GateError, GateResult};

/// Name of the issued session cookie
pub const SESSION_COOKIE_NAME: &str = "token";

/// Build the session cookie carrying `access_token`
pub fn session_cookie(access_token: &str) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, sanitize_cookie_value(access_token)))
        .path("/")
        .http_only(true)
        .secure(true)
        .build()
}

/// Render the session cookie as a `Set-Cookie` header value
pub fn set_cookie_header(access_token: &str) -> GateResult<HeaderValue> {
    HeaderValue::from_str(&session_cookie(access_token).to_string())
        .map_err(|e| GateError::Internal(format!("invalid Set-Cookie header: {}", e)))
}

/// Strip bytes that are not valid cookie-octets.
///
/// Values containing a space or comma are wrapped in double quotes.
fn sanitize_cookie_value(value: &str) -> String {
    let cleaned: String = value.chars().filter(|c| is_cookie_octet(*c)).collect();

    if cleaned.contains(' ') || cleaned.contains(',') {
        format!("\"{}\"", cleaned)
    } else {
        cleaned
    }
}

fn is_cookie_octet(c: char) -> bool {
    (' '..='~').contains(&c) && c != '"' && c != ';' && c != '\\'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_attributes() {
        let cookie = session_cookie("abc123");

        assert_eq!(cookie.name(), "token");
        assert_eq!(cookie.value(), "abc123");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), None);
        assert!(cookie.expires().is_none());
        assert!(cookie.max_age().is_none());
    }

    #[test]
    fn test_header_rendering() {
        let header = set_cookie_header("abc123").unwrap();
        let rendered = header.to_str().unwrap();

        assert!(rendered.starts_with("token=abc123"));
        assert!(rendered.contains("HttpOnly"));
        assert!(rendered.contains("Secure"));
        assert!(rendered.contains("Path=/"));
        assert!(!rendered.contains("SameSite"));
    }

    #[test]
    fn test_empty_token_still_issues_cookie() {
        let header = set_cookie_header("").unwrap();
        assert!(header.to_str().unwrap().starts_with("token=;"));
    }

    #[test]
    fn test_attribute_injection_is_stripped() {
        let cookie = session_cookie("abc; Domain=evil.example");
        assert_eq!(cookie.value(), "\"abc Domain=evil.example\"");

        let cookie = session_cookie("a\"b\\c\r\nd");
        assert_eq!(cookie.value(), "abcd");
    }

    #[test]
    fn test_comma_value_is_quoted() {
        assert_eq!(session_cookie("a,b").value(), "\"a,b\"");
    }
}
