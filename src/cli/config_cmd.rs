//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::alert::{is_bundle_id, Sound};
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

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
    set_value(&mut config, key, value)?;

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let config = store.load().await?;
    presenter.output(get_value(&config, key).as_deref().unwrap_or(NOT_SET));

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        presenter.key_value(key, get_value(&config, key).as_deref().unwrap_or(NOT_SET));
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

/// Validate and store a value under a known key
fn set_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::ValidationError {
        key: key.to_string(),
        message,
    };

    match key {
        "alerter_path" => config.alerter_path = Some(value.to_string()),
        "title" => config.title = Some(value.to_string()),
        "sound" => {
            let sound = value
                .parse::<Sound>()
                .map_err(|e| invalid(e.to_string()))?;
            config.sound = Some(sound.to_string());
        }
        "timeout" => {
            let seconds = value
                .parse::<u32>()
                .map_err(|_| invalid("Value must be a whole number of seconds".to_string()))?;
            config.timeout = Some(seconds);
        }
        "sender" => {
            if !is_bundle_id(value) {
                return Err(invalid(
                    "Sender must be an app bundle id starting with 'com.'".to_string(),
                ));
            }
            config.sender = Some(value.to_string());
        }
        "group" => config.group = Some(value.to_string()),
        "app_icon" => config.app_icon = Some(value.to_string()),
        _ => return Err(invalid("Unknown key".to_string())),
    }

    Ok(())
}

fn get_value(config: &AppConfig, key: &str) -> Option<String> {
    match key {
        "alerter_path" => config.alerter_path.clone(),
        "title" => config.title.clone(),
        "sound" => config.sound.clone(),
        "timeout" => config.timeout.map(|t| t.to_string()),
        "sender" => config.sender.clone(),
        "group" => config.group.clone(),
        "app_icon" => config.app_icon.clone(),
        _ => None,
    }
}
