//! # Router Assembly
//!
//! Wires the gate in front of routes. Kept separate from `main` so tests can
//! drive the exact same router.

use axum::{middleware as axum_middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::gate::RequestGate;
use crate::handlers::{downstream::ok, health::health_check};
use crate::middleware::auth::require_verification;
use crate::state::AppState;

/// Put every route of `protected` behind `gate`
pub fn gated<S>(protected: Router<S>, gate: RequestGate) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    protected.layer(axum_middleware::from_fn_with_state(
        gate,
        require_verification,
    ))
}

/// Full application router
///
/// - `GET /health`: ungated liveness probe
/// - everything else: gated, answered with `OK`
pub fn router(state: AppState) -> Router {
    // Routes added after the gate layer are not wrapped by it
    gated(Router::new().fallback(ok), state.gate)
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
}
