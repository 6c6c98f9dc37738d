//! Panic handling for FFI boundaries
//!
//! Panics must never unwind into ALSA, JACK or the host. The adapters use
//! [`contain`], which is silent and allocation-free on the happy path; the
//! host-facing exports use [`catch_panic`], which logs.

use diagbridge_logging::SinkManager;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// Run a forwarding step, dropping the diagnostic if it panics
///
/// A caught panic is counted in [`SinkManager::dropped`]. Returns whether
/// the step completed.
pub fn contain<F>(f: F) -> bool
where
    F: FnOnce(),
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(()) => true,
        Err(_) => {
            SinkManager::global().record_dropped();
            false
        }
    }
}

/// Catch panics from an exported function and log them
///
/// # Returns
/// - `Ok(R)` if the function executed successfully
/// - `Err(String)` with the panic message if a panic was caught
pub fn catch_panic<F, R>(f: F) -> Result<R, String>
where
    F: FnOnce() -> R + panic::UnwindSafe,
{
    panic::catch_unwind(f).map_err(|panic_info| {
        let panic_msg = panic_to_string(&panic_info);
        tracing::error!("FFI panic caught: {}", panic_msg);
        panic_msg
    })
}

/// Convert a panic payload to a human-readable string
fn panic_to_string(panic_info: &Box<dyn Any + Send>) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        format!("diagbridge panicked: {}", s)
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        format!("diagbridge panicked: {}", s)
    } else {
        "diagbridge panicked with unknown payload".to_string()
    }
}
