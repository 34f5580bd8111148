//! # Application State
//!
//! Shared state handed to the router. Holds the verification gate, which is
//! immutable and cheap to clone.

use crate::config::Config;
use crate::gate::RequestGate;
use anyhow::Result;

#[derive(Clone, Debug)]
pub struct AppState {
    /// Gate guarding every non-health route
    pub gate: RequestGate,
}

impl AppState {
    /// Build the state from loaded configuration
    ///
    /// # Errors
    /// Fails if the verification endpoint is empty or not a valid URL.
    pub fn new(config: &Config) -> Result<Self> {
        let gate = RequestGate::new(&config.gate, config.gate_name.clone())?;
        Ok(AppState { gate })
    }
}
