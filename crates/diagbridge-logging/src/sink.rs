//! Diagnostic sinks

use diagbridge_core::{Channel, Source};
use std::ffi::{CStr, c_char};

/// FFI callback function type for forwarded diagnostics
///
/// # Parameters
/// - `severity`: Severity code (2=Info, 3=Error)
/// - `source_tag`: Originating library, null-terminated C string
/// - `message`: Diagnostic text, null-terminated C string
///
/// # Safety
/// Both strings are only valid for the duration of the call. The callback
/// may be invoked concurrently from any thread the native libraries run.
pub type MessageCallback =
    extern "C" fn(severity: u8, source_tag: *const c_char, message: *const c_char);

/// Receiver of normalized diagnostics
///
/// Implementations run on whatever thread the native library reports from,
/// including real-time audio threads, so `emit` must not block.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, channel: Channel, message: &CStr);
}

impl<F> DiagnosticSink for F
where
    F: Fn(Channel, &CStr) + Send + Sync,
{
    fn emit(&self, channel: Channel, message: &CStr) {
        self(channel, message)
    }
}

/// Sink that hands every diagnostic to a host C callback
#[derive(Debug, Clone, Copy)]
pub struct CallbackSink {
    callback: MessageCallback,
}

impl CallbackSink {
    pub fn new(callback: MessageCallback) -> Self {
        Self { callback }
    }

    pub fn callback(&self) -> MessageCallback {
        self.callback
    }
}

impl DiagnosticSink for CallbackSink {
    fn emit(&self, channel: Channel, message: &CStr) {
        (self.callback)(
            channel.severity().code(),
            channel.source().tag().as_ptr(),
            message.as_ptr(),
        );
    }
}

/// Sink that re-emits diagnostics as `tracing` events
///
/// The event target is the source tag, so hosts can filter with directives
/// such as `diagbridge::jack=off`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

impl DiagnosticSink for TracingSink {
    fn emit(&self, channel: Channel, message: &CStr) {
        let message = message.to_string_lossy();
        match channel {
            Channel::AlsaError => {
                tracing::error!(target: Source::Alsa.tag_str(), "{}", message)
            }
            Channel::JackInfo => tracing::info!(target: Source::Jack.tag_str(), "{}", message),
            Channel::JackError => {
                tracing::error!(target: Source::Jack.tag_str(), "{}", message)
            }
        }
    }
}
