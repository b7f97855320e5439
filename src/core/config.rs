// src/core/config.rs
use std::env;
use std::str::FromStr;
use std::time::Duration;
use log::LevelFilter;

// Runtime configuration for the generator service
#[derive(Debug, Clone)]
pub struct Config {
    // Database
    pub database_url: String,

    // Session
    pub jwt_secret: Option<String>,
    pub session_duration: Duration,

    // Password Generation
    pub default_password_length: usize,

    // Web Interface
    pub api_address: String,
    pub api_port: u16,

    // Logging
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:./data/pgr.db".to_string(),

            jwt_secret: None, // Generated and persisted on first use
            session_duration: Duration::from_secs(24 * 60 * 60),

            default_password_length: 12,

            api_address: "127.0.0.1".to_string(),
            api_port: 5000,

            log_level: LevelFilter::Info,
        }
    }
}

fn parse_or_keep<T: FromStr>(key: &str, raw: Option<String>, current: &mut T, warnings: &mut Vec<String>) {
    if let Some(val) = raw {
        match val.parse() {
            Ok(parsed) => *current = parsed,
            Err(_) => warnings.push(format!("Ignoring unparseable {}='{}'", key, val)),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Values that fail to parse keep their default. The returned warnings
    /// describe each of them and are meant to be logged once the logger is up.
    pub fn load() -> (Self, Vec<String>) {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> (Self, Vec<String>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        let mut warnings = Vec::new();

        // Database
        if let Some(url) = lookup("DATABASE_URL") {
            config.database_url = url;
        }

        // Session
        config.jwt_secret = lookup("JWT_SECRET").filter(|s| !s.is_empty());

        let mut session_hours = config.session_duration.as_secs() / 3600;
        parse_or_keep("SESSION_HOURS", lookup("SESSION_HOURS"), &mut session_hours, &mut warnings);
        match session_hours.checked_mul(3600) {
            Some(secs) => config.session_duration = Duration::from_secs(secs),
            None => warnings.push(format!(
                "SESSION_HOURS={} is too large, using {} hours",
                session_hours,
                config.session_duration.as_secs() / 3600
            )),
        }

        // Password Generation
        parse_or_keep(
            "DEFAULT_PASSWORD_LENGTH",
            lookup("DEFAULT_PASSWORD_LENGTH"),
            &mut config.default_password_length,
            &mut warnings,
        );

        // Web Interface
        if let Some(address) = lookup("API_ADDRESS") {
            config.api_address = address;
        }
        parse_or_keep("API_PORT", lookup("API_PORT"), &mut config.api_port, &mut warnings);

        // Logging
        if let Some(level) = lookup("LOG_LEVEL") {
            match level.to_lowercase().as_str() {
                "error" => config.log_level = LevelFilter::Error,
                "warn" => config.log_level = LevelFilter::Warn,
                "info" => config.log_level = LevelFilter::Info,
                "debug" => config.log_level = LevelFilter::Debug,
                "trace" => config.log_level = LevelFilter::Trace,
                _ => warnings.push(format!("Unknown log level '{}', using {}", level, config.log_level)),
            }
        }

        (config, warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load_from(pairs: &[(&str, &str)]) -> (Config, Vec<String>) {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        load_from(pairs).0
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = config_from(&[]);
        assert_eq!(config.database_url, "sqlite:./data/pgr.db");
        assert_eq!(config.api_port, 5000);
        assert_eq!(config.default_password_length, 12);
        assert_eq!(config.session_duration, Duration::from_secs(86400));
        assert!(config.jwt_secret.is_none());
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_environment_overrides() {
        let config = config_from(&[
            ("DATABASE_URL", "memory:"),
            ("API_PORT", "8080"),
            ("JWT_SECRET", "s3cret"),
            ("SESSION_HOURS", "2"),
            ("DEFAULT_PASSWORD_LENGTH", "20"),
            ("LOG_LEVEL", "DEBUG"),
        ]);
        assert_eq!(config.database_url, "memory:");
        assert_eq!(config.api_port, 8080);
        assert_eq!(config.jwt_secret.as_deref(), Some("s3cret"));
        assert_eq!(config.session_duration, Duration::from_secs(7200));
        assert_eq!(config.default_password_length, 20);
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_bad_values_keep_defaults() {
        let config = config_from(&[("API_PORT", "not-a-port"), ("JWT_SECRET", ""), ("LOG_LEVEL", "loud")]);
        assert_eq!(config.api_port, 5000);
        assert!(config.jwt_secret.is_none());
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_bad_values_are_reported() {
        let (_, warnings) = load_from(&[
            ("API_PORT", "notaport"),
            ("SESSION_HOURS", "abc"),
            ("LOG_LEVEL", "loud"),
        ]);
        assert_eq!(warnings.len(), 3);
        assert!(warnings.iter().any(|w| w.contains("API_PORT='notaport'")));
        assert!(warnings.iter().any(|w| w.contains("SESSION_HOURS='abc'")));
        assert!(warnings.iter().any(|w| w.contains("'loud'")));

        let (_, warnings) = load_from(&[("API_PORT", "8080")]);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_oversized_session_hours_keep_default() {
        let (config, warnings) = load_from(&[("SESSION_HOURS", "18446744073709551615")]);
        assert_eq!(config.session_duration, Duration::from_secs(86400));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("too large"));
    }
}
