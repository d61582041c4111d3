use std::path::PathBuf;

use crate::error::ConfigError;

pub const APP_NAME: &str = "ferrite-digits";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Remote classifier the normalized digit is posted to.
pub const DEFAULT_ENDPOINT: &str = "http://ec2-54-81-142-28.compute-1.amazonaws.com:8080/predict";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:7878";
pub const DEFAULT_HISTORY_FILE: &str = "history.json";

pub const ENV_ENDPOINT: &str = "FERRITE_DIGITS_ENDPOINT";
pub const ENV_BIND_ADDR: &str = "FERRITE_DIGITS_ADDR";
pub const ENV_HISTORY: &str = "FERRITE_DIGITS_HISTORY";

/// Filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "ferrite_digits=info,studio=info"
}

/// Runtime configuration shared by the CLI and the studio.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub endpoint: String,
    pub bind_addr: String,
    pub history_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            bind_addr: DEFAULT_BIND_ADDR.to_owned(),
            history_path: PathBuf::from(DEFAULT_HISTORY_FILE),
        }
    }
}

impl Config {
    /// Reads overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup; unset or blank keys
    /// fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());
        let defaults = Config::default();

        let endpoint = get(ENV_ENDPOINT).unwrap_or(defaults.endpoint);
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::InvalidEndpoint(endpoint));
        }

        let bind_addr = get(ENV_BIND_ADDR).unwrap_or(defaults.bind_addr);
        let history_path = get(ENV_HISTORY).map(PathBuf::from).unwrap_or(defaults.history_path);

        Ok(Config { endpoint, bind_addr, history_path })
    }
}
