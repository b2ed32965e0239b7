use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use tracing::info;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {key} value '{value}': {reason}")]
    Invalid { key: &'static str, value: String, reason: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub store: PathBuf,
    pub session_ttl_minutes: i64,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
        where F: Fn(&str) -> Option<String> {
        Ok(Self {
            host: try_load(&lookup, "LADYBUG_HOST", "0.0.0.0")?,
            port: try_load(&lookup, "LADYBUG_PORT", "8080")?,
            store: try_load(&lookup, "LADYBUG_STORE", "store")?,
            session_ttl_minutes: try_load(&lookup, "LADYBUG_SESSION_TTL_MINUTES", "43200")?,
        })
    }
}

fn try_load<T, F>(lookup: &F, key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    value.parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        reason: e.to_string(),
        value,
    })
}
