//! Application configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::notification::ShowPolicy;

/// Default application name registered with the legacy daemon
pub const DEFAULT_APP_NAME: &str = "notify-router";

/// Default command used to reach the legacy notification daemon
pub const DEFAULT_LEGACY_COMMAND: &str = "notify-send";

/// Legacy daemon bridge configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LegacyConfig {
    pub command: Option<String>,
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub show_policy: Option<String>,
    pub auto_remove_delivered: Option<bool>,
    pub app_name: Option<String>,
    pub wait: Option<u64>,
    pub legacy: Option<LegacyConfig>,
}

/// Settings the router is constructed with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterConfig {
    pub show_policy: ShowPolicy,
    pub auto_remove_delivered: bool,
    pub app_name: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            show_policy: ShowPolicy::Default,
            auto_remove_delivered: false,
            app_name: DEFAULT_APP_NAME.to_string(),
        }
    }
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            show_policy: Some(ShowPolicy::Default.to_string()),
            auto_remove_delivered: Some(false),
            app_name: Some(DEFAULT_APP_NAME.to_string()),
            wait: Some(0),
            legacy: Some(LegacyConfig {
                command: Some(DEFAULT_LEGACY_COMMAND.to_string()),
            }),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            show_policy: other.show_policy.or(self.show_policy),
            auto_remove_delivered: other.auto_remove_delivered.or(self.auto_remove_delivered),
            app_name: other.app_name.or(self.app_name),
            wait: other.wait.or(self.wait),
            legacy: Self::merge_legacy_config(self.legacy, other.legacy),
        }
    }

    fn merge_legacy_config(
        base: Option<LegacyConfig>,
        other: Option<LegacyConfig>,
    ) -> Option<LegacyConfig> {
        match (base, other) {
            (None, None) => None,
            (Some(b), None) => Some(b),
            (None, Some(o)) => Some(o),
            (Some(b), Some(o)) => Some(LegacyConfig {
                command: o.command.or(b.command),
            }),
        }
    }

    /// Get show_policy as parsed ShowPolicy, or default if not set/invalid
    pub fn show_policy_or_default(&self) -> ShowPolicy {
        self.show_policy
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get auto-remove setting, or false if not set
    pub fn auto_remove_delivered_or_default(&self) -> bool {
        self.auto_remove_delivered.unwrap_or(false)
    }

    /// Get app name, or "notify-router" if not set
    pub fn app_name_or_default(&self) -> &str {
        self.app_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_APP_NAME)
    }

    /// Get wait time in seconds, or 0 if not set
    pub fn wait_or_default(&self) -> u64 {
        self.wait.unwrap_or(0)
    }

    /// Get legacy daemon command, or "notify-send" if not set
    pub fn legacy_command_or_default(&self) -> &str {
        self.legacy
            .as_ref()
            .and_then(|l| l.command.as_deref())
            .unwrap_or(DEFAULT_LEGACY_COMMAND)
    }

    /// Build the router settings from this config
    pub fn router_config(&self) -> RouterConfig {
        RouterConfig {
            show_policy: self.show_policy_or_default(),
            auto_remove_delivered: self.auto_remove_delivered_or_default(),
            app_name: self.app_name_or_default().to_string(),
        }
    }
}
