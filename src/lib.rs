//! # Auth Cookie Gate
//!
//! HTTP middleware that delegates the authorization decision for each request
//! to a remote verification endpoint. Requests carrying `x-api-key` and
//! `x-account` are checked against the endpoint. On success a `token` session
//! cookie is issued and the request continues to the next handler.
//!
//! ```no_run
//! use auth_cookie_gate::{app, config::GateConfig, gate::RequestGate};
//! use axum::{routing::get, Router};
//!
//! # fn build() -> Result<Router, auth_cookie_gate::error::ConfigError> {
//! let gate = RequestGate::new(&GateConfig::new("http://auth-service/verify"), "auth_cookie")?;
//! let protected = Router::new().route("/", get(|| async { "hello" }));
//! Ok(app::gated(protected, gate))
//! # }
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod gate;
pub mod handlers;
pub mod middleware;
pub mod state;
