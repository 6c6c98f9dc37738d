//! Error types for bridge registration

use thiserror::Error;

/// Result type alias for bridge operations
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Error type for bridge registration
///
/// Nothing on the diagnostic forwarding path produces these; they only
/// surface while configuring and installing handlers.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Configuration could not be parsed
    #[error("configuration error: {0}")]
    InvalidConfig(String),

    /// A native library could not be opened
    #[error("failed to load library: {0}")]
    LibraryLoad(String),

    /// A handler setter was missing from a loaded library
    #[error("symbol not found: {0}")]
    SymbolNotFound(String),

    /// The library was switched off in the configuration
    #[error("hook disabled: {0}")]
    HookDisabled(String),

    /// The host passed a null log callback
    #[error("null log callback")]
    NullCallback,

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl BridgeError {
    /// Returns an error code suitable for FFI
    pub fn error_code(&self) -> u32 {
        match self {
            BridgeError::InvalidConfig(_) => 1,
            BridgeError::LibraryLoad(_) => 2,
            BridgeError::SymbolNotFound(_) => 3,
            BridgeError::HookDisabled(_) => 4,
            BridgeError::NullCallback => 5,
            BridgeError::Internal(_) => 6,
        }
    }
}

impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        BridgeError::InvalidConfig(err.to_string())
    }
}
