//! Configuration value objects

mod app_config;

pub use app_config::{
    AppConfig, LegacyConfig, RouterConfig, DEFAULT_APP_NAME, DEFAULT_LEGACY_COMMAND,
};
