//! Sink registration and handler installation

use crate::adapters::{ALSA_ERROR_HANDLER, JACK_ERROR_HANDLER, JACK_INFO_HANDLER};
use crate::hooks::{DynamicHooks, NativeHooks};
use diagbridge_core::{BridgeConfig, BridgeError, BridgeResult, Channel};
use diagbridge_logging::{DiagnosticSink, SinkManager};
use parking_lot::Mutex;
use std::sync::Arc;

/// Serializes registrations against each other
static REGISTRATION_LOCK: Mutex<()> = Mutex::new(());

/// Which handler slots a registration filled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InstallReport {
    pub alsa_error: bool,
    pub jack_info: bool,
    pub jack_error: bool,
}

impl InstallReport {
    pub fn is_installed(&self, channel: Channel) -> bool {
        match channel {
            Channel::AlsaError => self.alsa_error,
            Channel::JackInfo => self.jack_info,
            Channel::JackError => self.jack_error,
        }
    }

    pub fn installed_count(&self) -> usize {
        Channel::ALL
            .iter()
            .filter(|channel| self.is_installed(**channel))
            .count()
    }

    pub fn is_complete(&self) -> bool {
        self.installed_count() == Channel::ALL.len()
    }

    fn mark(&mut self, channel: Channel) {
        match channel {
            Channel::AlsaError => self.alsa_error = true,
            Channel::JackInfo => self.jack_info = true,
            Channel::JackError => self.jack_error = true,
        }
    }
}

/// Register `sink` and hook the libraries named in `config`
pub fn register(config: &BridgeConfig, sink: Arc<dyn DiagnosticSink>) -> InstallReport {
    register_with_hooks(&DynamicHooks::new(config.clone()), sink)
}

/// Parse a JSON configuration, then [`register`]
pub fn register_from_json(
    config_json: &[u8],
    sink: Arc<dyn DiagnosticSink>,
) -> BridgeResult<InstallReport> {
    let config = BridgeConfig::from_json(config_json)?;
    Ok(register(&config, sink))
}

/// Register `sink` and install all three adapters through `hooks`
///
/// The sink is published before any adapter is installed, so no adapter can
/// fire into an empty cell because of this call. A slot that cannot be
/// filled is logged and left out of the report; the others still install.
/// Calling again replaces the sink and re-installs the same adapters.
pub fn register_with_hooks(
    hooks: &dyn NativeHooks,
    sink: Arc<dyn DiagnosticSink>,
) -> InstallReport {
    let _guard = REGISTRATION_LOCK.lock();

    let previous = SinkManager::global().install(sink);
    if previous.is_forwarding() {
        tracing::debug!("replacing previously registered diagnostic sink");
    }

    let mut report = InstallReport::default();
    for channel in Channel::ALL {
        let result = match channel {
            Channel::AlsaError => hooks.install_alsa_error(ALSA_ERROR_HANDLER),
            Channel::JackInfo => hooks.install_jack_info(JACK_INFO_HANDLER),
            Channel::JackError => hooks.install_jack_error(JACK_ERROR_HANDLER),
        };
        match result {
            Ok(()) => {
                report.mark(channel);
                tracing::debug!(%channel, "installed diagnostic handler");
            }
            Err(BridgeError::HookDisabled(_)) => {
                tracing::debug!(%channel, "handler disabled by configuration");
            }
            Err(e) => {
                tracing::warn!(%channel, "could not install diagnostic handler: {}", e);
            }
        }
    }

    tracing::info!(
        installed = report.installed_count(),
        "diagnostic bridge registered"
    );
    report
}
