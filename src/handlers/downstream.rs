//! # Downstream Handler
//!
//! Stand-in for the service the gate protects. Reached only once the
//! verification endpoint has accepted the request.

/// Replies `OK` to any verified request
///
/// ## Route
/// Fallback for every path except `/health`
pub async fn ok() -> &'static str {
    "OK"
}
