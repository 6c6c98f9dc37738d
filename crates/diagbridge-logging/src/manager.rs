//! Process-wide sink management

use crate::sink::DiagnosticSink;
use diagbridge_core::{Channel, RegistrationState};
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use std::ffi::CStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global sink manager
static SINK_MANAGER: OnceCell<SinkManager> = OnceCell::new();

/// Holder of the sink every adapter forwards to
///
/// Written at registration, read on every diagnostic. Reads take a shared
/// lock just long enough to clone the `Arc`, so a sink that re-registers
/// from inside `emit` cannot deadlock.
///
/// `parking_lot` read locks are fair: a read issued while a registration is
/// waiting for the write lock blocks until that write completes. Writes
/// happen only at registration and hold the lock for a single pointer swap,
/// so an adapter waits at most that long, and only while registering.
pub struct SinkManager {
    sink: RwLock<Option<Arc<dyn DiagnosticSink>>>,
    dropped: AtomicU64,
}

impl SinkManager {
    /// Create a new, unregistered manager
    pub fn new() -> Self {
        Self {
            sink: RwLock::new(None),
            dropped: AtomicU64::new(0),
        }
    }

    /// Get the global sink manager instance
    pub fn global() -> &'static SinkManager {
        SINK_MANAGER.get_or_init(SinkManager::new)
    }

    /// Install the sink, replacing any previous one
    ///
    /// Returns the state before the call.
    pub fn install(&self, sink: Arc<dyn DiagnosticSink>) -> RegistrationState {
        let mut guard = self.sink.write();
        let previous = if guard.is_some() {
            RegistrationState::Registered
        } else {
            RegistrationState::Unregistered
        };
        *guard = Some(sink);
        previous
    }

    pub fn state(&self) -> RegistrationState {
        if self.sink.read().is_some() {
            RegistrationState::Registered
        } else {
            RegistrationState::Unregistered
        }
    }

    /// Forward one diagnostic to the installed sink
    ///
    /// Diagnostics arriving before registration are counted and dropped.
    pub fn forward(&self, channel: Channel, message: &CStr) {
        let sink = self.sink.read().clone();
        match sink {
            Some(sink) => sink.emit(channel, message),
            None => self.record_dropped(),
        }
    }

    /// Count a diagnostic that never reached a sink
    pub fn record_dropped(&self) {
        self.dropped.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of diagnostics dropped so far
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl Default for SinkManager {
    fn default() -> Self {
        Self::new()
    }
}
