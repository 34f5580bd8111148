//! # Middleware Module
//!
//! Request interceptors mounted in front of route handlers.
//!
//! ## Our Middleware
//! - `auth`: Delegates verification to the remote endpoint via
//!   [`RequestGate`](crate::gate::RequestGate). Mount it with
//!   `axum::middleware::from_fn_with_state(gate, require_verification)`.

pub mod auth;
