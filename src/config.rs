use crate::errors::ConfigError;
use crate::notifier::DEFAULT_NOTICE_DELAY;
use crate::poller::{CLOCK_INTERVAL, Intervals, REFRESH_INTERVAL};
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub api_url: String,
    pub intervals: Intervals,
    pub notice_delay: Duration,
    pub messages_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(env::vars().collect())
    }

    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |name: &str| vars.get(name).map(|value| value.trim()).filter(|v| !v.is_empty());

        let port = match get("PORT") {
            Some(value) => value.parse::<u16>().map_err(|_| invalid("PORT", "a port number", value))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            port,
            api_url: get("DASHBOARD_API_URL").unwrap_or(DEFAULT_API_URL).to_string(),
            intervals: Intervals {
                refresh: seconds(get("DASHBOARD_REFRESH_SECS"), "DASHBOARD_REFRESH_SECS", REFRESH_INTERVAL)?,
                clock: seconds(get("DASHBOARD_CLOCK_SECS"), "DASHBOARD_CLOCK_SECS", CLOCK_INTERVAL)?,
            },
            notice_delay: seconds(get("DASHBOARD_NOTICE_SECS"), "DASHBOARD_NOTICE_SECS", DEFAULT_NOTICE_DELAY)?,
            messages_path: get("DASHBOARD_MESSAGES_PATH").map(PathBuf::from),
        })
    }
}

fn seconds(value: Option<&str>, name: &'static str, default: Duration) -> Result<Duration, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => match raw.parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
            _ => Err(invalid(name, "a positive number of seconds", raw)),
        },
    }
}

fn invalid(name: &'static str, expected: &'static str, value: &str) -> ConfigError {
    ConfigError::Invalid {
        name,
        expected,
        value: value.to_string(),
    }
}
