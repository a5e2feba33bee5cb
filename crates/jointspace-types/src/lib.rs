//! `jointspace-types` – shared vocabulary for the control abstraction layer.
//!
//! Holds the [`ControlError`] taxonomy returned by every fallible operation in
//! `jointspace-hal` and `jointspace-transmission`, and the [`Quantity`] enum
//! naming the physical quantities a handle or transmission can carry.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A physical quantity bound to a handle or mapped by a transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    Position,
    Velocity,
    Effort,
    /// Write-only command value of a command handle.
    Command,
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Quantity::Position => write!(f, "position"),
            Quantity::Velocity => write!(f, "velocity"),
            Quantity::Effort => write!(f, "effort"),
            Quantity::Command => write!(f, "command"),
        }
    }
}

/// Recoverable errors raised at registration, lookup, claim and construction
/// time.
///
/// None of these are retried internally.  A controller that receives one
/// during activation should fail its own activation only.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ControlError {
    /// A handle was built without a required storage binding, or an accessor
    /// was called for a quantity the handle never bound.
    #[error("Invalid handle '{name}': {reason}")]
    InvalidHandle { name: String, reason: String },

    /// Lookup of an unknown resource name.  `interface` is the concrete
    /// interface type, never a generic base name.
    #[error("Could not find resource '{name}' in '{interface}'")]
    ResourceNotFound { interface: String, name: String },

    /// A different handle is already registered under this name.
    #[error("Resource '{name}' is already registered in '{interface}' with different storage")]
    DuplicateResource { interface: String, name: String },

    /// A live claim already exists for this command resource.
    #[error("Resource '{name}' in '{interface}' is already claimed")]
    ResourceAlreadyClaimed { interface: String, name: String },

    /// Zero reduction ratio or mismatched parameter/handle sizes.
    #[error("Transmission configuration error: {0}")]
    TransmissionConfig(String),

    /// Reading or parsing a configuration file failed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ControlError {
    /// Name of the resource the error refers to, if any.
    pub fn resource(&self) -> Option<&str> {
        match self {
            ControlError::InvalidHandle { name, .. }
            | ControlError::ResourceNotFound { name, .. }
            | ControlError::DuplicateResource { name, .. }
            | ControlError::ResourceAlreadyClaimed { name, .. } => Some(name),
            ControlError::TransmissionConfig(_) | ControlError::Config(_) => None,
        }
    }
}
