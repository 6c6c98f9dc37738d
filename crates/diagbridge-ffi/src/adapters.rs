//! Native handler adapters
//!
//! Each adapter has the exact signature its library's handler slot expects
//! and ends in [`SinkManager::forward`] with a fixed [`Channel`]. None of
//! them allocate or block.

use crate::hooks::{AlsaErrorHandler, JackMessageHandler};
use crate::panic_guard;
use diagbridge_core::Channel;
use diagbridge_logging::SinkManager;
use std::ffi::{CStr, c_char, c_int};

unsafe extern "C" {
    /// ALSA error handler, implemented in `native/alsa_shim.c`
    ///
    /// Renders `fmt` and the variadic arguments with `vsnprintf` into a
    /// [`MESSAGE_CAPACITY`](diagbridge_core::MESSAGE_CAPACITY) stack buffer,
    /// truncating silently, then forwards on [`Channel::AlsaError`]. `file`,
    /// `line`, `function` and `err` are ignored.
    pub fn diagbridge_alsa_error_handler(
        file: *const c_char,
        line: c_int,
        function: *const c_char,
        err: c_int,
        fmt: *const c_char,
        ...
    );
}

/// Adapter installed with `snd_lib_error_set_handler`
pub const ALSA_ERROR_HANDLER: AlsaErrorHandler = diagbridge_alsa_error_handler;

/// Adapter installed with `jack_set_info_function`
pub const JACK_INFO_HANDLER: JackMessageHandler = jack_info_handler;

/// Adapter installed with `jack_set_error_function`
pub const JACK_ERROR_HANDLER: JackMessageHandler = jack_error_handler;

/// Receives the rendered ALSA message from the C shim
///
/// Called by `diagbridge_alsa_error_handler` for every diagnostic, before
/// and after registration alike.
///
/// # Safety
/// `message` must be null or a valid null-terminated string for the duration
/// of the call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn diagbridge_alsa_forward(message: *const c_char) {
    // SAFETY: the shim passes its null-terminated stack buffer
    unsafe { forward(Channel::AlsaError, message) }
}

/// JACK info channel adapter
///
/// # Safety
/// `message` must be null or a valid null-terminated string for the duration
/// of the call.
pub unsafe extern "C" fn jack_info_handler(message: *const c_char) {
    // SAFETY: forwarded caller contract
    unsafe { forward(Channel::JackInfo, message) }
}

/// JACK error channel adapter
///
/// # Safety
/// `message` must be null or a valid null-terminated string for the duration
/// of the call.
pub unsafe extern "C" fn jack_error_handler(message: *const c_char) {
    // SAFETY: forwarded caller contract
    unsafe { forward(Channel::JackError, message) }
}

/// Common final step of every adapter
///
/// # Safety
/// `message` must be null or a valid null-terminated string.
unsafe fn forward(channel: Channel, message: *const c_char) {
    let manager = SinkManager::global();
    if message.is_null() {
        manager.record_dropped();
        return;
    }
    // SAFETY: non-null and null-terminated per caller contract
    let message = unsafe { CStr::from_ptr(message) };
    panic_guard::contain(|| manager.forward(channel, message));
}
