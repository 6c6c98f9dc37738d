//! Native handler slots
//!
//! [`NativeHooks`] is the seam between registration and the libraries'
//! handler-setter functions. [`DynamicHooks`] resolves the real setters with
//! `libloading`; [`RecordingHooks`] keeps the installed handlers in memory.

use dashmap::DashMap;
use diagbridge_core::{BridgeConfig, BridgeError, BridgeResult, Channel, Source};
use libloading::{Library, Symbol};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::ffi::{c_char, c_int};
use std::sync::atomic::{AtomicUsize, Ordering};

/// ALSA's `snd_lib_error_handler_t`
pub type AlsaErrorHandler = unsafe extern "C" fn(
    file: *const c_char,
    line: c_int,
    function: *const c_char,
    err: c_int,
    fmt: *const c_char,
    ...
);

/// Handler shape shared by `jack_set_info_function` and
/// `jack_set_error_function`
pub type JackMessageHandler = unsafe extern "C" fn(message: *const c_char);

// Type signatures for the native setters
type SndLibErrorSetHandlerFn = unsafe extern "C" fn(handler: Option<AlsaErrorHandler>) -> c_int;
type JackSetFunctionFn = unsafe extern "C" fn(func: Option<JackMessageHandler>);

/// Installs adapters into the libraries' handler slots
pub trait NativeHooks: Send + Sync {
    fn install_alsa_error(&self, handler: AlsaErrorHandler) -> BridgeResult<()>;

    fn install_jack_info(&self, handler: JackMessageHandler) -> BridgeResult<()>;

    fn install_jack_error(&self, handler: JackMessageHandler) -> BridgeResult<()>;
}

/// Libraries opened by [`DynamicHooks`], keyed by configured name
///
/// Entries are never unloaded: an installed handler must outlive every
/// thread the library reports from.
static LIBRARIES: Lazy<DashMap<String, &'static Library>> = Lazy::new(DashMap::new);

/// Hooks resolved from `libasound` and `libjack` at runtime
#[derive(Debug, Clone, Default)]
pub struct DynamicHooks {
    config: BridgeConfig,
}

impl DynamicHooks {
    pub fn new(config: BridgeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    fn library(&self, source: Source) -> BridgeResult<&'static Library> {
        if !self.config.is_enabled(source) {
            return Err(BridgeError::HookDisabled(source.to_string()));
        }

        let name = self.config.library(source);
        if let Some(library) = LIBRARIES.get(name) {
            return Ok(*library);
        }

        // SAFETY: loading a system audio library runs its initializers; the
        // configured name is trusted by the host.
        let library = unsafe { Library::new(name) }
            .map_err(|e| BridgeError::LibraryLoad(format!("{}: {}", name, e)))?;
        tracing::debug!(library = name, %source, "opened native library");

        let library: &'static Library = Box::leak(Box::new(library));
        Ok(*LIBRARIES.entry(name.to_string()).or_insert(library))
    }

    fn setter<T: Copy>(&self, channel: Channel) -> BridgeResult<T> {
        let library = self.library(channel.source())?;
        let symbol = channel.setter_symbol();

        // SAFETY: T is the documented signature of the named setter
        let setter: Symbol<T> = unsafe { library.get(symbol.to_bytes_with_nul()) }
            .map_err(|e| {
                BridgeError::SymbolNotFound(format!("{}: {}", symbol.to_string_lossy(), e))
            })?;
        Ok(*setter)
    }
}

impl NativeHooks for DynamicHooks {
    fn install_alsa_error(&self, handler: AlsaErrorHandler) -> BridgeResult<()> {
        let set: SndLibErrorSetHandlerFn = self.setter(Channel::AlsaError)?;
        // SAFETY: set is snd_lib_error_set_handler; handler has the ABI it expects
        let rc = unsafe { set(Some(handler)) };
        if rc < 0 {
            tracing::warn!(rc, "snd_lib_error_set_handler reported failure");
        }
        Ok(())
    }

    fn install_jack_info(&self, handler: JackMessageHandler) -> BridgeResult<()> {
        let set: JackSetFunctionFn = self.setter(Channel::JackInfo)?;
        // SAFETY: set is jack_set_info_function
        unsafe { set(Some(handler)) };
        Ok(())
    }

    fn install_jack_error(&self, handler: JackMessageHandler) -> BridgeResult<()> {
        let set: JackSetFunctionFn = self.setter(Channel::JackError)?;
        // SAFETY: set is jack_set_error_function
        unsafe { set(Some(handler)) };
        Ok(())
    }
}

/// Handler slots held in memory
///
/// Stands in for the native libraries when they are absent, and lets
/// callers fire the installed adapters the way ALSA and JACK would.
#[derive(Default)]
pub struct RecordingHooks {
    alsa_error: Mutex<Option<AlsaErrorHandler>>,
    jack_info: Mutex<Option<JackMessageHandler>>,
    jack_error: Mutex<Option<JackMessageHandler>>,
    installs: AtomicUsize,
}

impl RecordingHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alsa_error_handler(&self) -> Option<AlsaErrorHandler> {
        *self.alsa_error.lock()
    }

    pub fn jack_info_handler(&self) -> Option<JackMessageHandler> {
        *self.jack_info.lock()
    }

    pub fn jack_error_handler(&self) -> Option<JackMessageHandler> {
        *self.jack_error.lock()
    }

    /// Total handler installations, across all slots
    pub fn install_count(&self) -> usize {
        self.installs.load(Ordering::SeqCst)
    }
}

impl NativeHooks for RecordingHooks {
    fn install_alsa_error(&self, handler: AlsaErrorHandler) -> BridgeResult<()> {
        *self.alsa_error.lock() = Some(handler);
        self.installs.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn install_jack_info(&self, handler: JackMessageHandler) -> BridgeResult<()> {
        *self.jack_info.lock() = Some(handler);
        self.installs.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn install_jack_error(&self, handler: JackMessageHandler) -> BridgeResult<()> {
        *self.jack_error.lock() = Some(handler);
        self.installs.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
