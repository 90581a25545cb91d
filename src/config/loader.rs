//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::RelayConfig;
use crate::config::validation::{validate_config, ValidationError};

pub const ENV_BIND: &str = "QUOTE_RELAY_BIND";
pub const ENV_UPSTREAM_URL: &str = "QUOTE_RELAY_UPSTREAM_URL";
pub const ENV_STORE_URL: &str = "QUOTE_RELAY_STORE_URL";
pub const ENV_RESPONSE_DEADLINE_MS: &str = "QUOTE_RELAY_RESPONSE_DEADLINE_MS";
pub const ENV_PERSIST_DEADLINE_MS: &str = "QUOTE_RELAY_PERSIST_DEADLINE_MS";
pub const ENV_LOG_LEVEL: &str = "QUOTE_RELAY_LOG_LEVEL";

/// Reasons the configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[source] std::io::Error),

    #[error("cannot parse config file: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("invalid configuration: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from an optional TOML file, apply environment
/// overrides and validate the result.
pub fn load_config(path: Option<&Path>) -> Result<RelayConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
            toml::from_str(&content).map_err(ConfigError::Parse)?
        }
        None => RelayConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())
        .map_err(ConfigError::Validation)?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay environment values onto `config`.
///
/// `lookup` resolves a variable name to its value.
pub fn apply_env_overrides<F>(config: &mut RelayConfig, lookup: F) -> Result<(), Vec<ValidationError>>
where
    F: Fn(&str) -> Option<String>,
{
    let mut errors = Vec::new();

    if let Some(bind) = lookup(ENV_BIND) {
        config.listener.bind_address = bind;
    }
    if let Some(url) = lookup(ENV_UPSTREAM_URL) {
        config.upstream.url = url;
    }
    if let Some(url) = lookup(ENV_STORE_URL) {
        config.store.url = url;
    }
    if let Some(level) = lookup(ENV_LOG_LEVEL) {
        config.observability.log_level = level;
    }
    if let Some(ms) = parse_millis(&lookup, ENV_RESPONSE_DEADLINE_MS, &mut errors) {
        config.deadlines.response_ms = ms;
    }
    if let Some(ms) = parse_millis(&lookup, ENV_PERSIST_DEADLINE_MS, &mut errors) {
        config.deadlines.persist_ms = ms;
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn parse_millis<F>(lookup: &F, key: &'static str, errors: &mut Vec<ValidationError>) -> Option<u64>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(ms) => Some(ms),
        Err(_) => {
            errors.push(ValidationError {
                field: key,
                message: format!("'{}' is not a number of milliseconds", raw),
            });
            None
        }
    }
}
