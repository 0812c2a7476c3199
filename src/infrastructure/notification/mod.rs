//! Notification infrastructure module
//!
//! Provides the native center via notify-rust and the legacy daemon
//! bridge via notify-send, plus disabled stand-ins for either.

mod noop;
mod notify_rust;
mod notify_send;
pub mod probe;

pub use noop::{NoOpBridge, NoOpCenter};
pub use notify_rust::NotifyRustCenter;
pub use notify_send::NotifySendBridge;

use crate::application::ports::{EventSender, LegacyBridge, NativeCenter};
use crate::domain::config::AppConfig;

/// Which backends the host may use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendSelection {
    pub native: bool,
    pub legacy: bool,
}

impl Default for BackendSelection {
    fn default() -> Self {
        Self {
            native: true,
            legacy: true,
        }
    }
}

/// Create the backends for the current platform
///
/// Disabled backends are replaced by no-op adapters that report
/// themselves unavailable.
pub fn create_backends(
    config: &AppConfig,
    selection: BackendSelection,
    events: EventSender,
) -> (Box<dyn NativeCenter>, Box<dyn LegacyBridge>) {
    let native: Box<dyn NativeCenter> = if selection.native {
        Box::new(NotifyRustCenter::with_app_name(
            config.app_name_or_default(),
            events.clone(),
        ))
    } else {
        Box::new(NoOpCenter::new())
    };

    let legacy: Box<dyn LegacyBridge> = if selection.legacy {
        Box::new(NotifySendBridge::with_command(
            config.legacy_command_or_default(),
            events,
        ))
    } else {
        Box::new(NoOpBridge::new())
    };

    (native, legacy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::event_channel;

    #[test]
    fn disabled_backends_are_noops() {
        let (events, _rx) = event_channel();
        let selection = BackendSelection {
            native: false,
            legacy: false,
        };

        let (native, legacy) = create_backends(&AppConfig::empty(), selection, events);
        assert!(!native.is_available());
        assert!(!legacy.is_reachable());
    }

    #[test]
    fn legacy_uses_configured_command() {
        let (events, _rx) = event_channel();
        let config = AppConfig {
            legacy: Some(crate::domain::config::LegacyConfig {
                command: Some("notify-router-missing-command-1b2c".to_string()),
            }),
            ..Default::default()
        };
        let selection = BackendSelection {
            native: false,
            legacy: true,
        };

        let (_native, legacy) = create_backends(&config, selection, events);
        assert!(!legacy.is_reachable());
    }
}
