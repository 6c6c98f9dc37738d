//! C ABI exported functions
//!
//! These functions are the entry points called by the host application.

use crate::panic_guard::catch_panic;
use crate::registry;
use diagbridge_core::{BridgeConfig, BridgeError};
use diagbridge_logging::{CallbackSink, MessageCallback, SinkManager};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

/// Route ALSA and JACK diagnostics to `callback`
///
/// Installs the ALSA error handler and the JACK info and error handlers with
/// the default configuration. Call once during startup, before the audio
/// libraries are otherwise used; a later call replaces the callback.
///
/// # Parameters
/// - `callback`: `(severity, source_tag, message)`; a null callback is
///   ignored and the bridge stays as it was
///
/// # Safety
/// The callback must remain valid for the rest of the process and tolerate
/// concurrent invocation from any thread.
#[unsafe(no_mangle)]
pub extern "C" fn set_message_handler(callback: Option<MessageCallback>) {
    let _ = catch_panic(AssertUnwindSafe(|| {
        set_message_handler_impl(callback, &BridgeConfig::default())
    }));
}

/// Like [`set_message_handler`], with a JSON configuration
///
/// # Parameters
/// - `callback`: log callback, must not be null
/// - `config_json`: JSON configuration bytes (can be null for defaults)
/// - `config_len`: Length of config_json
///
/// # Returns
/// 0 on success, otherwise a [`BridgeError`] code
///
/// # Safety
/// - `config_json` must be valid for `config_len` bytes if not null
/// - The callback contract of [`set_message_handler`] applies
#[unsafe(no_mangle)]
pub unsafe extern "C" fn diagbridge_set_message_handler_with_config(
    callback: Option<MessageCallback>,
    config_json: *const u8,
    config_len: usize,
) -> u32 {
    let result = catch_panic(AssertUnwindSafe(|| -> Result<(), BridgeError> {
        let config = if config_json.is_null() || config_len == 0 {
            BridgeConfig::default()
        } else {
            // SAFETY: caller guarantees config_json is valid for config_len bytes
            let bytes = unsafe { std::slice::from_raw_parts(config_json, config_len) };
            BridgeConfig::from_json(bytes)?
        };
        set_message_handler_impl(callback, &config)
    }));

    match result {
        Ok(Ok(())) => 0,
        Ok(Err(e)) => {
            tracing::error!("failed to register diagnostic bridge: {}", e);
            e.error_code()
        }
        Err(msg) => BridgeError::Internal(msg).error_code(),
    }
}

/// Current registration state (0 = unregistered, 1 = registered)
#[unsafe(no_mangle)]
pub extern "C" fn diagbridge_registration_state() -> u8 {
    SinkManager::global().state().as_u8()
}

/// Number of diagnostics dropped so far
///
/// Counts messages that arrived before registration, null messages, and
/// messages whose sink panicked.
#[unsafe(no_mangle)]
pub extern "C" fn diagbridge_dropped_count() -> u64 {
    SinkManager::global().dropped()
}

fn set_message_handler_impl(
    callback: Option<MessageCallback>,
    config: &BridgeConfig,
) -> Result<(), BridgeError> {
    let Some(callback) = callback else {
        tracing::warn!("set_message_handler called with a null callback; ignoring");
        return Err(BridgeError::NullCallback);
    };

    registry::register(config, Arc::new(CallbackSink::new(callback)));
    Ok(())
}
