//! Runtime configuration from environment variables.

use std::net::SocketAddr;
use std::time::Duration;

use crate::central::{CentralConfig, DEFAULT_BASE_URL};
use crate::session::SessionConfig;

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Default directory for static assets.
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Error reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var}={value:?} is not a valid {expected}")]
    Invalid {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Everything the server needs at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub central: CentralConfig,
    pub bind_addr: SocketAddr,
    pub static_dir: String,
    pub session: SessionConfig,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, which returns a variable's
    /// value if set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let base_url = get("LOUAJ_CENTRAL_SERVER_URL")
            .or_else(|| get("CENTRAL_SERVER_URL"))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                var: "LOUAJ_CENTRAL_SERVER_URL",
                value: base_url,
                expected: "http(s) URL",
            });
        }

        let timeout_secs = parse_or(
            get("LOUAJ_REQUEST_TIMEOUT_SECS"),
            "LOUAJ_REQUEST_TIMEOUT_SECS",
            30u64,
            "number of seconds",
        )?;
        let bind_addr = parse_or(
            get("LOUAJ_BIND_ADDR"),
            "LOUAJ_BIND_ADDR",
            SocketAddr::from(([127, 0, 0, 1], 3000)),
            "socket address",
        )?;
        let ttl_mins = parse_or(
            get("LOUAJ_SESSION_TTL_MINS"),
            "LOUAJ_SESSION_TTL_MINS",
            120u64,
            "number of minutes",
        )?;
        let secure_cookies = match get("LOUAJ_SECURE_COOKIES") {
            None => false,
            Some(v) => parse_flag(&v).ok_or(ConfigError::Invalid {
                var: "LOUAJ_SECURE_COOKIES",
                value: v,
                expected: "boolean",
            })?,
        };

        Ok(Self {
            central: CentralConfig::new(base_url).with_timeout(timeout_secs),
            bind_addr,
            static_dir: get("LOUAJ_STATIC_DIR")
                .unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()),
            session: SessionConfig {
                idle_ttl: Duration::from_secs(ttl_mins * 60),
                secure_cookies,
                ..SessionConfig::default()
            },
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    value: Option<String>,
    var: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid {
            var,
            value: v,
            expected,
        }),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[]).unwrap();

        assert_eq!(config.central.base_url, "http://localhost:5000");
        assert_eq!(config.central.timeout_secs, 30);
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(config.static_dir, "static");
        assert_eq!(config.session.idle_ttl, Duration::from_secs(7200));
        assert!(!config.session.secure_cookies);
    }

    #[test]
    fn prefixed_url_wins_over_fallback() {
        let config = config(&[
            ("LOUAJ_CENTRAL_SERVER_URL", "https://central.example/"),
            ("CENTRAL_SERVER_URL", "http://other:5000"),
        ])
        .unwrap();
        assert_eq!(config.central.base_url, "https://central.example");
    }

    #[test]
    fn fallback_url_is_used() {
        let config = config(&[("CENTRAL_SERVER_URL", "http://10.0.0.5:5000")]).unwrap();
        assert_eq!(config.central.base_url, "http://10.0.0.5:5000");
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config =
            config(&[("LOUAJ_CENTRAL_SERVER_URL", "  "), ("LOUAJ_BIND_ADDR", "")]).unwrap();
        assert_eq!(config.central.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.bind_addr.port(), 3000);
    }

    #[test]
    fn overrides() {
        let config = config(&[
            ("LOUAJ_BIND_ADDR", "0.0.0.0:8080"),
            ("LOUAJ_STATIC_DIR", "/srv/louaj/static"),
            ("LOUAJ_REQUEST_TIMEOUT_SECS", "5"),
            ("LOUAJ_SESSION_TTL_MINS", "15"),
            ("LOUAJ_SECURE_COOKIES", "true"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.static_dir, "/srv/louaj/static");
        assert_eq!(config.central.timeout_secs, 5);
        assert_eq!(config.session.idle_ttl, Duration::from_secs(900));
        assert!(config.session.secure_cookies);
    }

    #[test]
    fn invalid_values_are_errors() {
        assert!(config(&[("LOUAJ_REQUEST_TIMEOUT_SECS", "soon")]).is_err());
        assert!(config(&[("LOUAJ_BIND_ADDR", "localhost")]).is_err());
        assert!(config(&[("LOUAJ_SECURE_COOKIES", "maybe")]).is_err());
        assert!(config(&[("LOUAJ_CENTRAL_SERVER_URL", "ftp://x")]).is_err());
    }

    #[test]
    fn error_names_the_variable() {
        let err = config(&[("LOUAJ_SESSION_TTL_MINS", "-1")]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "LOUAJ_SESSION_TTL_MINS=\"-1\" is not a valid number of minutes"
        );
    }
}
