//! Bridge registration lifecycle

use serde::{Deserialize, Serialize};

/// Registration state of the bridge
///
/// State transitions:
/// ```text
/// Unregistered → Registered ⟲ (re-registration replaces the sink)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationState {
    /// No sink yet; diagnostics are dropped
    #[default]
    Unregistered,
    /// A sink is installed and adapters forward to it
    Registered,
}

impl RegistrationState {
    /// Check if adapters forward diagnostics in this state
    pub fn is_forwarding(&self) -> bool {
        matches!(self, RegistrationState::Registered)
    }

    pub fn as_u8(&self) -> u8 {
        match self {
            RegistrationState::Unregistered => 0,
            RegistrationState::Registered => 1,
        }
    }
}

impl std::fmt::Display for RegistrationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistrationState::Unregistered => write!(f, "Unregistered"),
            RegistrationState::Registered => write!(f, "Registered"),
        }
    }
}
