//! Diagnostic origins and their fixed severity mapping

use crate::Severity;
use std::ffi::CStr;

/// Native library a diagnostic originates from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// ALSA (`libasound`)
    Alsa,
    /// JACK client library (`libjack`)
    Jack,
}

impl Source {
    /// Source tag handed to the host callback, null-terminated
    pub const fn tag(self) -> &'static CStr {
        match self {
            Source::Alsa => c"diagbridge::alsa",
            Source::Jack => c"diagbridge::jack",
        }
    }

    /// Source tag as a Rust string, usable as a `tracing` target
    pub const fn tag_str(self) -> &'static str {
        match self {
            Source::Alsa => "diagbridge::alsa",
            Source::Jack => "diagbridge::jack",
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Alsa => write!(f, "ALSA"),
            Source::Jack => write!(f, "JACK"),
        }
    }
}

/// One native handler slot the bridge installs an adapter into
///
/// Each channel carries a fixed severity; the libraries' own notion of
/// severity is never consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// `snd_lib_error_set_handler`
    AlsaError,
    /// `jack_set_info_function`
    JackInfo,
    /// `jack_set_error_function`
    JackError,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::AlsaError, Channel::JackInfo, Channel::JackError];

    pub fn source(self) -> Source {
        match self {
            Channel::AlsaError => Source::Alsa,
            Channel::JackInfo | Channel::JackError => Source::Jack,
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            Channel::AlsaError | Channel::JackError => Severity::Error,
            Channel::JackInfo => Severity::Info,
        }
    }

    /// Name of the native function that installs this channel's handler
    pub fn setter_symbol(self) -> &'static CStr {
        match self {
            Channel::AlsaError => c"snd_lib_error_set_handler",
            Channel::JackInfo => c"jack_set_info_function",
            Channel::JackError => c"jack_set_error_function",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Channel::AlsaError => write!(f, "ALSA error"),
            Channel::JackInfo => write!(f, "JACK info"),
            Channel::JackError => write!(f, "JACK error"),
        }
    }
}
