//! Show policy and backend selection

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::ParseShowPolicyError;

/// All show policies, in declaration order
pub const ALL_POLICIES: &[ShowPolicy] = &[
    ShowPolicy::Default,
    ShowPolicy::AlwaysShowLegacy,
    ShowPolicy::NeverShowLegacy,
];

/// Governs which backend is preferred or excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShowPolicy {
    /// Prefer the native center, fall back to the legacy daemon
    #[default]
    Default,
    /// Prefer the legacy daemon, fall back to the native center
    AlwaysShowLegacy,
    /// Never use the legacy daemon
    NeverShowLegacy,
}

impl ShowPolicy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::AlwaysShowLegacy => "always-show-legacy",
            Self::NeverShowLegacy => "never-show-legacy",
        }
    }
}

impl FromStr for ShowPolicy {
    type Err = ParseShowPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "always-show-legacy" | "always" => Ok(Self::AlwaysShowLegacy),
            "never-show-legacy" | "never" => Ok(Self::NeverShowLegacy),
            _ => Err(ParseShowPolicyError {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ShowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Delivery mechanism that handled a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// The host's own notification center
    NativeCenter,
    /// The third-party notification daemon bridge
    Legacy,
}

impl Backend {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NativeCenter => "native",
            Self::Legacy => "legacy",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Pick the backend for one post.
///
/// Returns `None` when neither backend may accept the request under
/// `policy` given the current host capabilities.
pub fn select_backend(
    policy: ShowPolicy,
    native_available: bool,
    legacy_reachable: bool,
) -> Option<Backend> {
    match policy {
        ShowPolicy::NeverShowLegacy => native_available.then_some(Backend::NativeCenter),
        ShowPolicy::AlwaysShowLegacy => {
            if legacy_reachable {
                Some(Backend::Legacy)
            } else if native_available {
                Some(Backend::NativeCenter)
            } else {
                None
            }
        }
        ShowPolicy::Default => {
            if native_available {
                Some(Backend::NativeCenter)
            } else if legacy_reachable {
                Some(Backend::Legacy)
            } else {
                None
            }
        }
    }
}
