//! diagbridge-ffi - ALSA and JACK diagnostics for a host log callback
//!
//! This crate provides the native boundary:
//! - Adapters with the exact handler signatures ALSA and JACK expect
//! - [`NativeHooks`] to install them, resolved at runtime by [`DynamicHooks`]
//! - Registration of the [`DiagnosticSink`] the adapters forward to
//!
//! # FFI Functions
//!
//! The following functions are exported with C linkage:
//!
//! - `set_message_handler` - Register a log callback and hook both libraries
//! - `diagbridge_set_message_handler_with_config` - Same, with JSON configuration
//! - `diagbridge_registration_state` - Whether a callback is registered
//! - `diagbridge_dropped_count` - Diagnostics that never reached a sink
//!
//! # Example
//!
//! ```ignore
//! use diagbridge_ffi::prelude::*;
//! use std::sync::Arc;
//!
//! let report = diagbridge_ffi::register(&BridgeConfig::default(), Arc::new(TracingSink::new()));
//! if !report.is_complete() {
//!     tracing::warn!("some audio diagnostics will not be captured");
//! }
//! ```

pub mod adapters;
mod exports;
mod hooks;
mod panic_guard;
mod registry;

pub use hooks::{AlsaErrorHandler, DynamicHooks, JackMessageHandler, NativeHooks, RecordingHooks};
pub use registry::{InstallReport, register, register_from_json, register_with_hooks};

// Re-export FFI functions for hosts linking the rlib
pub use exports::{
    diagbridge_dropped_count, diagbridge_registration_state,
    diagbridge_set_message_handler_with_config, set_message_handler,
};

// Re-export types needed to register a sink
pub use diagbridge_core::{
    BridgeConfig, BridgeError, BridgeResult, Channel, MESSAGE_CAPACITY, RegistrationState,
    Severity, Source,
};
pub use diagbridge_logging::{
    CallbackSink, DiagnosticSink, MessageCallback, SinkManager, TracingSink,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{DynamicHooks, InstallReport, NativeHooks, RecordingHooks};
    pub use diagbridge_core::prelude::*;
    pub use diagbridge_logging::prelude::*;
}

/// Serializes unit tests that touch the process-wide sink
#[cfg(test)]
pub(crate) static GLOBAL_TEST_LOCK: parking_lot::Mutex<()> = parking_lot::Mutex::new(());
