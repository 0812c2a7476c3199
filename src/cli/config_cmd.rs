//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::{AppConfig, LegacyConfig};
use crate::domain::error::ConfigError;
use crate::domain::notification::ShowPolicy;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let mut config = store.load().await?;
    apply_value(&mut config, key, value)?;

    store.save(&config).await?;
    presenter.success(&format!(
        "{} = {}",
        key,
        config_value(&config, key).unwrap_or_else(|| value.to_string())
    ));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let config = store.load().await?;
    match config_value(&config, key) {
        Some(v) => presenter.output(&v),
        None => presenter.output(NOT_SET),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        presenter.key_value(
            key,
            &config_value(&config, key).unwrap_or_else(|| NOT_SET.to_string()),
        );
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if !is_valid_config_key(key) {
        return Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        });
    }
    Ok(())
}

/// Validate `value` for `key` and store it in `config`.
///
/// Show policies are stored in their canonical spelling so that aliases
/// such as `never` round-trip through the file.
fn apply_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::ValidationError {
        key: key.to_string(),
        message,
    };

    match key {
        "show_policy" => {
            let policy = value
                .parse::<ShowPolicy>()
                .map_err(|e| invalid(e.to_string()))?;
            config.show_policy = Some(policy.as_str().to_string());
        }
        "auto_remove_delivered" => {
            let flag = parse_bool(value)
                .map_err(|_| invalid("Value must be 'true' or 'false'".to_string()))?;
            config.auto_remove_delivered = Some(flag);
        }
        "app_name" => {
            config.app_name = Some(non_empty(value).map_err(invalid)?);
        }
        "wait" => {
            let secs = value
                .trim()
                .parse::<u64>()
                .map_err(|_| invalid("Value must be a whole number of seconds".to_string()))?;
            config.wait = Some(secs);
        }
        "legacy.command" => {
            let command = non_empty(value).map_err(invalid)?;
            config
                .legacy
                .get_or_insert_with(LegacyConfig::default)
                .command = Some(command);
        }
        _ => return Err(invalid("Unknown key".to_string())),
    }

    Ok(())
}

/// Current value of `key`, formatted for display
fn config_value(config: &AppConfig, key: &str) -> Option<String> {
    match key {
        "show_policy" => config.show_policy.clone(),
        "auto_remove_delivered" => config.auto_remove_delivered.map(|b| b.to_string()),
        "app_name" => config.app_name.clone(),
        "wait" => config.wait.map(|w| w.to_string()),
        "legacy.command" => config.legacy.as_ref().and_then(|l| l.command.clone()),
        _ => None,
    }
}

fn non_empty(value: &str) -> Result<String, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err("Value must not be empty".to_string());
    }
    Ok(value.to_string())
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(()),
    }
}
