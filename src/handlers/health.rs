//! # Health Check Handler
//!
//! Simple endpoint to check if the server is running. Not behind the gate.

use axum::Json;
use serde_json::{json, Value};

/// Health check endpoint
///
/// ## Route
/// GET /health
///
/// ## Response
/// ```json
/// {
///   "status": "healthy",
///   "service": "auth-cookie-gate"
/// }
/// ```
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "auth-cookie-gate"
    }))
}
