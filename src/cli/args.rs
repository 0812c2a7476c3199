//! CLI argument definitions using Clap

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::domain::notification::{NotificationIcon, ShowPolicy};

/// notify-router - post desktop notifications through the native center
/// or the legacy notification daemon
#[derive(Parser, Debug)]
#[command(name = "notify-router")]
#[command(version)]
#[command(about = "Route desktop notifications to the native notification center or the legacy notification daemon")]
#[command(long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Post a notification and optionally wait for the user to act on it
    Post(PostArgs),
    /// Show host capabilities and the backend each policy would use
    Probe {
        #[command(flatten)]
        backends: BackendArgs,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Backend switches shared by post and probe
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct BackendArgs {
    /// Treat the native notification center as unavailable
    #[arg(long)]
    pub no_native: bool,

    /// Treat the legacy notification daemon as unreachable
    #[arg(long)]
    pub no_legacy: bool,
}

/// Arguments of the post subcommand
#[derive(Args, Debug)]
pub struct PostArgs {
    /// Notification title
    #[arg(short = 't', long)]
    pub title: String,

    /// Notification subtitle
    #[arg(short = 's', long)]
    pub subtitle: Option<String>,

    /// Notification body
    #[arg(short = 'b', long)]
    pub body: Option<String>,

    /// Notification icon
    #[arg(short = 'i', long, value_name = "ICON")]
    pub icon: Option<IconArg>,

    /// JSON payload handed back on activation
    #[arg(long, value_name = "JSON")]
    pub payload: Option<String>,

    /// Show policy
    #[arg(short = 'p', long, value_name = "POLICY")]
    pub policy: Option<PolicyArg>,

    /// Remove the notification from the native center once delivered
    #[arg(long)]
    pub auto_remove: bool,

    /// Seconds to wait for activation or dismissal (0 = do not wait)
    #[arg(short = 'w', long, value_name = "SECS")]
    pub wait: Option<u64>,

    #[command(flatten)]
    pub backends: BackendArgs,
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Show policy argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    Default,
    #[value(alias = "always")]
    AlwaysShowLegacy,
    #[value(alias = "never")]
    NeverShowLegacy,
}

impl From<PolicyArg> for ShowPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Default => ShowPolicy::Default,
            PolicyArg::AlwaysShowLegacy => ShowPolicy::AlwaysShowLegacy,
            PolicyArg::NeverShowLegacy => ShowPolicy::NeverShowLegacy,
        }
    }
}

/// Icon argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum IconArg {
    Info,
    Success,
    Warning,
    Error,
}

impl From<IconArg> for NotificationIcon {
    fn from(arg: IconArg) -> Self {
        match arg {
            IconArg::Info => NotificationIcon::Info,
            IconArg::Success => NotificationIcon::Success,
            IconArg::Warning => NotificationIcon::Warning,
            IconArg::Error => NotificationIcon::Error,
        }
    }
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "show_policy",
    "auto_remove_delivered",
    "app_name",
    "wait",
    "legacy.command",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse_post(args: &[&str]) -> PostArgs {
        let cli = Cli::parse_from(args);
        match cli.command {
            Commands::Post(post) => post,
            other => panic!("Expected post command, got {:?}", other),
        }
    }

    #[test]
    fn post_parses_defaults() {
        let post = parse_post(&["notify-router", "post", "--title", "Hello"]);
        assert_eq!(post.title, "Hello");
        assert!(post.subtitle.is_none());
        assert!(post.body.is_none());
        assert!(post.policy.is_none());
        assert!(post.wait.is_none());
        assert!(!post.auto_remove);
        assert!(!post.backends.no_native);
        assert!(!post.backends.no_legacy);
    }

    #[test]
    fn post_parses_all_flags() {
        let post = parse_post(&[
            "notify-router",
            "post",
            "-t",
            "Hello",
            "-s",
            "Sub",
            "-b",
            "Body",
            "-i",
            "warning",
            "-p",
            "never",
            "-w",
            "10",
            "--auto-remove",
            "--no-legacy",
            "--payload",
            "{\"k\":1}",
        ]);
        assert_eq!(post.subtitle, Some("Sub".to_string()));
        assert_eq!(post.body, Some("Body".to_string()));
        assert_eq!(post.icon, Some(IconArg::Warning));
        assert_eq!(post.policy, Some(PolicyArg::NeverShowLegacy));
        assert_eq!(post.wait, Some(10));
        assert!(post.auto_remove);
        assert!(post.backends.no_legacy);
        assert_eq!(post.payload, Some("{\"k\":1}".to_string()));
    }

    #[test]
    fn post_requires_title() {
        assert!(Cli::try_parse_from(["notify-router", "post"]).is_err());
    }

    #[test]
    fn probe_parses_backend_switches() {
        let cli = Cli::parse_from(["notify-router", "probe", "--no-native"]);
        match cli.command {
            Commands::Probe { backends } => {
                assert!(backends.no_native);
                assert!(!backends.no_legacy);
            }
            other => panic!("Expected probe command, got {:?}", other),
        }
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::parse_from(["notify-router", "probe", "-vv"]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["notify-router", "config", "set", "show_policy", "never"]);
        if let Commands::Config {
            action: ConfigAction::Set { key, value },
        } = cli.command
        {
            assert_eq!(key, "show_policy");
            assert_eq!(value, "never");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn policy_arg_converts_to_show_policy() {
        assert_eq!(ShowPolicy::from(PolicyArg::Default), ShowPolicy::Default);
        assert_eq!(
            ShowPolicy::from(PolicyArg::AlwaysShowLegacy),
            ShowPolicy::AlwaysShowLegacy
        );
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("show_policy"));
        assert!(is_valid_config_key("legacy.command"));
        assert!(!is_valid_config_key("api_key"));
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}
