//! diagbridge-logging - Where forwarded diagnostics end up
//!
//! This crate provides:
//! - [`DiagnosticSink`], the single capability every adapter forwards to
//! - [`CallbackSink`] for a host-supplied C callback ([`MessageCallback`])
//! - [`TracingSink`] for hosts that log through `tracing`
//! - [`SinkManager`], the process-wide cell the adapters read from

mod manager;
mod sink;

pub use diagbridge_core::{Channel, RegistrationState, Severity, Source};
pub use manager::SinkManager;
pub use sink::{CallbackSink, DiagnosticSink, MessageCallback, TracingSink};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        CallbackSink, Channel, DiagnosticSink, MessageCallback, Severity, SinkManager, Source,
        TracingSink,
    };
}
