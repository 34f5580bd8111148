use crate::gate::RequestGate;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

/// Axum entry point for the gate: hands the request and `next` to
/// [`RequestGate::handle`], which either short-circuits or runs `next`.
pub async fn require_verification(
    State(gate): State<RequestGate>,
    request: Request,
    next: Next,
) -> Response {
    gate.handle(request, next).await
}
