//! Client configuration, read once at startup.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },

    #[error("failed to resolve a config directory for the session file; set STOCKDESK_SESSION_FILE")]
    NoSessionDir,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the REST API, without a trailing slash.
    pub api_url: String,
    /// Token that bypasses the stored session (`STOCKDESK_AUTH_TOKEN`).
    pub auth_token: Option<String>,
    pub timeout: Duration,
    pub session_file: PathBuf,
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>, session_file: PathBuf) -> Self {
        Self {
            api_url: normalize_url(&api_url.into()),
            auth_token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            session_file,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_url = get("STOCKDESK_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                var: "STOCKDESK_API_URL",
                reason: format!("'{api_url}' is not an http(s) URL"),
            });
        }

        let timeout_secs = match get("STOCKDESK_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().ok().filter(|s| *s > 0).ok_or_else(|| {
                ConfigError::Invalid {
                    var: "STOCKDESK_TIMEOUT_SECS",
                    reason: format!("'{raw}' is not a positive number of seconds"),
                }
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let session_file = match get("STOCKDESK_SESSION_FILE") {
            Some(path) => PathBuf::from(path),
            None => default_session_file()?,
        };

        Ok(Self {
            api_url: normalize_url(&api_url),
            auth_token: get("STOCKDESK_AUTH_TOKEN").map(|t| t.trim().to_string()),
            timeout: Duration::from_secs(timeout_secs),
            session_file,
        })
    }
}

fn normalize_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// `{config_dir}/stockdesk/session.json`.
fn default_session_file() -> Result<PathBuf, ConfigError> {
    let mut path = dirs::config_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".config");
                h
            })
        })
        .ok_or(ConfigError::NoSessionDir)?;
    path.push("stockdesk");
    path.push("session.json");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = ClientConfig::from_lookup(lookup(&[("STOCKDESK_SESSION_FILE", "/tmp/s.json")]))
            .unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.auth_token, None);
        assert_eq!(config.session_file, PathBuf::from("/tmp/s.json"));
    }

    #[test]
    fn overrides_are_read_and_trailing_slash_dropped() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("STOCKDESK_API_URL", "https://inv.example.com/api/"),
            ("STOCKDESK_AUTH_TOKEN", " tok "),
            ("STOCKDESK_TIMEOUT_SECS", "5"),
            ("STOCKDESK_SESSION_FILE", "/tmp/s.json"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "https://inv.example.com/api");
        assert_eq!(config.auth_token.as_deref(), Some("tok"));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn blank_token_counts_as_unset() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("STOCKDESK_AUTH_TOKEN", "  "),
            ("STOCKDESK_SESSION_FILE", "/tmp/s.json"),
        ]))
        .unwrap();
        assert_eq!(config.auth_token, None);
    }

    #[test]
    fn rejects_bad_values() {
        let err = ClientConfig::from_lookup(lookup(&[("STOCKDESK_API_URL", "localhost:5000")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "STOCKDESK_API_URL", .. }));

        let err = ClientConfig::from_lookup(lookup(&[
            ("STOCKDESK_TIMEOUT_SECS", "0"),
            ("STOCKDESK_SESSION_FILE", "/tmp/s.json"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "STOCKDESK_TIMEOUT_SECS", .. }));
    }
}
