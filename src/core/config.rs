// src/core/config.rs
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use log::LevelFilter;
use thiserror::Error;

use crate::models::PasswordRequest;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {key}")]
    InvalidValue { key: &'static str, value: String },

    #[error("Could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TLS error: {0}")]
    Tls(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

// Configuration for the password service
#[derive(Debug, Clone)]
pub struct Config {
    // TLS
    pub cert_file: PathBuf,
    pub key_file: PathBuf,
    pub tls_enabled: bool,

    // Listener
    pub port: u16,
    pub bind_address: String,
    pub grace_period: Duration,

    // Password Generation
    pub limits: RequestLimits,

    // Logging
    pub log_level: LevelFilter,
}

/// Upper bounds on what a single request may ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLimits {
    pub max_amount: usize,
    pub max_password_length: usize,
}

impl Default for RequestLimits {
    fn default() -> Self {
        Self {
            max_amount: 1000,
            max_password_length: 4096,
        }
    }
}

impl RequestLimits {
    /// Describes the first limit the request breaks, if any.
    pub fn violation(&self, request: &PasswordRequest) -> Option<String> {
        if request.amount > self.max_amount {
            return Some(format!(
                "amount {} exceeds the maximum of {}",
                request.amount, self.max_amount
            ));
        }
        match request.config.resulting_length() {
            Some(length) if length <= self.max_password_length => None,
            _ => Some(format!(
                "password length exceeds the maximum of {}",
                self.max_password_length
            )),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // TLS
            cert_file: PathBuf::from("cert.pem"),
            key_file: PathBuf::from("key.unencrypted.pem"),
            tls_enabled: true,

            // Listener
            port: 8443,
            bind_address: "0.0.0.0".to_string(),
            grace_period: Duration::from_secs(5),

            // Password Generation
            limits: RequestLimits::default(),

            // Logging
            log_level: LevelFilter::Info,
        }
    }
}

impl Config {
    // Load configuration from environment variables
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key/value source. Unset keys keep
    /// their defaults; malformed values are rejected.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        // TLS
        if let Some(file) = lookup("CERT_FILE") {
            config.cert_file = PathBuf::from(file);
        }

        if let Some(file) = lookup("KEY_FILE") {
            config.key_file = PathBuf::from(file);
        }

        if let Some(val) = lookup("TLS_ENABLED") {
            config.tls_enabled = parse_bool("TLS_ENABLED", &val)?;
        }

        // Listener
        if let Some(val) = lookup("PORT") {
            config.port = val.trim().parse().map_err(|_| invalid("PORT", &val))?;
        }

        if let Some(address) = lookup("BIND_ADDRESS") {
            config.bind_address = address;
        }

        if let Some(val) = lookup("GRACE_PERIOD") {
            config.grace_period = parse_duration(&val).ok_or_else(|| invalid("GRACE_PERIOD", &val))?;
        }

        // Password Generation
        if let Some(val) = lookup("MAX_AMOUNT") {
            config.limits.max_amount = val.trim().parse().map_err(|_| invalid("MAX_AMOUNT", &val))?;
        }

        if let Some(val) = lookup("MAX_PASSWORD_LENGTH") {
            config.limits.max_password_length = val
                .trim()
                .parse()
                .map_err(|_| invalid("MAX_PASSWORD_LENGTH", &val))?;
        }

        // Logging
        if let Some(level) = lookup("LOG_LEVEL") {
            config.log_level = match level.trim().to_lowercase().as_str() {
                "off" => LevelFilter::Off,
                "error" => LevelFilter::Error,
                "warn" => LevelFilter::Warn,
                "info" => LevelFilter::Info,
                "debug" => LevelFilter::Debug,
                "trace" => LevelFilter::Trace,
                _ => return Err(invalid("LOG_LEVEL", &level)),
            };
        }

        Ok(config)
    }

    pub fn listen_url(&self) -> String {
        let scheme = if self.tls_enabled { "https" } else { "http" };
        format!("{}://{}:{}", scheme, self.bind_address, self.port)
    }
}

fn invalid(key: &'static str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

/// Parses `500ms`, `5s`, `2m`, `1h` or a bare number of seconds.
pub fn parse_duration(value: &str) -> Option<Duration> {
    let value = value.trim();
    let split = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    let (amount, unit) = value.split_at(split);
    let amount: u64 = amount.parse().ok()?;

    match unit {
        "ms" => Some(Duration::from_millis(amount)),
        "" | "s" => Some(Duration::from_secs(amount)),
        "m" => amount.checked_mul(60).map(Duration::from_secs),
        "h" => amount.checked_mul(60 * 60).map(Duration::from_secs),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeneratorConfig;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 8443);
        assert_eq!(config.grace_period, Duration::from_secs(5));
        assert_eq!(config.cert_file, PathBuf::from("cert.pem"));
        assert_eq!(config.key_file, PathBuf::from("key.unencrypted.pem"));
        assert!(config.tls_enabled);
        assert_eq!(config.log_level, LevelFilter::Info);
        assert_eq!(config.limits, RequestLimits::default());
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = load(&[
            ("PORT", "9000"),
            ("CERT_FILE", "/etc/pwgen/cert.pem"),
            ("GRACE_PERIOD", "250ms"),
            ("TLS_ENABLED", "false"),
            ("MAX_AMOUNT", "10"),
            ("LOG_LEVEL", "DEBUG"),
        ])
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.cert_file, PathBuf::from("/etc/pwgen/cert.pem"));
        assert_eq!(config.grace_period, Duration::from_millis(250));
        assert!(!config.tls_enabled);
        assert_eq!(config.limits.max_amount, 10);
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.listen_url(), "http://0.0.0.0:9000");
    }

    #[test]
    fn malformed_grace_period_is_an_error() {
        let err = load(&[("GRACE_PERIOD", "awkljdnalksd")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { key: "GRACE_PERIOD", .. }
        ));
    }

    #[test]
    fn malformed_port_is_an_error() {
        assert!(load(&[("PORT", "70000")]).is_err());
        assert!(load(&[("PORT", "http")]).is_err());
    }

    #[test]
    fn unknown_log_level_is_an_error() {
        assert!(load(&[("LOG_LEVEL", "loud")]).is_err());
    }

    #[test]
    fn durations() {
        assert_eq!(parse_duration("5s"), Some(Duration::from_secs(5)));
        assert_eq!(parse_duration("10"), Some(Duration::from_secs(10)));
        assert_eq!(parse_duration("1500ms"), Some(Duration::from_millis(1500)));
        assert_eq!(parse_duration("2m"), Some(Duration::from_secs(120)));
        assert_eq!(parse_duration("1h"), Some(Duration::from_secs(3600)));
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("s"), None);
        assert_eq!(parse_duration("5 days"), None);
        assert_eq!(parse_duration("-5s"), None);
    }

    #[test]
    fn limits_reject_large_batches() {
        let limits = RequestLimits {
            max_amount: 5,
            max_password_length: 20,
        };
        let mut request = PasswordRequest {
            config: GeneratorConfig {
                min_length: 20,
                ..Default::default()
            },
            amount: 5,
        };
        assert_eq!(limits.violation(&request), None);

        request.amount = 6;
        assert!(limits.violation(&request).is_some());

        request.amount = 1;
        request.config.digit_count = 15;
        request.config.special_count = 6;
        assert!(limits.violation(&request).is_some());

        request.config.digit_count = usize::MAX;
        assert!(limits.violation(&request).is_some());
    }
}
