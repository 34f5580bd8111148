//! # HTTP Request Handlers
//!
//! ## Submodules
//! - `health`: Health check endpoint (ungated)
//! - `downstream`: Handler reached only after verification succeeds

pub mod downstream;
pub mod health;
