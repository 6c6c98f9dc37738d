//! Bridge configuration

use crate::Source;
use serde::{Deserialize, Serialize};

/// Which native libraries to hook, and where to find them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Install the ALSA error handler
    #[serde(default = "default_enabled")]
    pub alsa: bool,

    /// Install the JACK info and error handlers
    #[serde(default = "default_enabled")]
    pub jack: bool,

    /// Shared library name or path for ALSA
    #[serde(default = "default_alsa_library")]
    pub alsa_library: String,

    /// Shared library name or path for the JACK client library
    #[serde(default = "default_jack_library")]
    pub jack_library: String,
}

fn default_enabled() -> bool {
    true
}

fn default_alsa_library() -> String {
    "libasound.so.2".to_string()
}

fn default_jack_library() -> String {
    "libjack.so.0".to_string()
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            alsa: default_enabled(),
            jack: default_enabled(),
            alsa_library: default_alsa_library(),
            jack_library: default_jack_library(),
        }
    }
}

impl BridgeConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration from JSON bytes
    ///
    /// Empty input yields the default configuration.
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        if bytes.is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_slice(bytes)
    }

    pub fn is_enabled(&self, source: Source) -> bool {
        match source {
            Source::Alsa => self.alsa,
            Source::Jack => self.jack,
        }
    }

    pub fn library(&self, source: Source) -> &str {
        match source {
            Source::Alsa => &self.alsa_library,
            Source::Jack => &self.jack_library,
        }
    }
}
