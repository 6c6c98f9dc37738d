//! diagbridge-core - Core types for the native diagnostic bridge
//!
//! This crate provides the vocabulary shared by the sink and FFI layers:
//! - [`Severity`] codes handed to the host log callback
//! - [`Source`] and [`Channel`] describing where a diagnostic came from
//! - [`RegistrationState`] for the bridge lifecycle
//! - [`BridgeConfig`] and [`BridgeError`]

mod config;
mod error;
mod lifecycle;
mod source;

pub use config::BridgeConfig;
pub use error::{BridgeError, BridgeResult};
pub use lifecycle::RegistrationState;
pub use source::{Channel, Source};

/// Capacity of the scratch buffer a variadic diagnostic is rendered into,
/// terminator included. Rendered messages are cut at `MESSAGE_CAPACITY - 1`
/// bytes.
pub const MESSAGE_CAPACITY: usize = 1024;

/// Severity codes for the host log callback
///
/// The numeric values are part of the callback ABI.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Info = 2,
    Error = 3,
}

impl Severity {
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "INFO"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        BridgeConfig, BridgeError, BridgeResult, Channel, MESSAGE_CAPACITY, RegistrationState,
        Severity, Source,
    };
}
