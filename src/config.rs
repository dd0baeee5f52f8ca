//! Configuration loaded from environment variables, with `.env` support.

use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::panel::ToastSlot;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the listing backend
    pub api_url: String,
    /// Where the logged-in user is remembered between runs
    pub session_path: PathBuf,
    /// Usernames that get the admin role
    pub admin_users: Vec<String>,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// How long a toast stays visible
    pub toast_ttl: Duration,
    /// Per-request timeout; none by default
    pub http_timeout: Option<Duration>,
}

impl Config {
    /// Load configuration from the process environment and `.env`.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_url = var("ESTATE_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let session_path = match var("ESTATE_SESSION_PATH") {
            Some(path) => PathBuf::from(path),
            None => default_session_path(),
        };

        let admin_users = var("ESTATE_ADMIN_USERS")
            .unwrap_or_else(|| "admin".to_string())
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();

        let log_level = var("ESTATE_LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        let toast_ttl = match var("ESTATE_TOAST_SECS") {
            Some(secs) => {
                let secs = secs
                    .trim()
                    .parse::<u64>()
                    .with_context(|| format!("Invalid ESTATE_TOAST_SECS '{}'", secs))?;
                if secs == 0 {
                    bail!("ESTATE_TOAST_SECS must be at least 1");
                }
                Duration::from_secs(secs)
            }
            None => ToastSlot::DEFAULT_TTL,
        };

        let http_timeout = var("ESTATE_HTTP_TIMEOUT_SECS")
            .map(|secs| {
                secs.trim()
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .with_context(|| format!("Invalid ESTATE_HTTP_TIMEOUT_SECS '{}'", secs))
            })
            .transpose()?;

        Ok(Self {
            api_url,
            session_path,
            admin_users,
            log_level,
            toast_ttl,
            http_timeout,
        })
    }

    pub fn is_admin(&self, username: &str) -> bool {
        self.admin_users.iter().any(|admin| admin == username)
    }
}

/// `<data dir>/estate-portal/session.json`, or the working directory when the
/// platform has no data dir.
fn default_session_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(env!("CARGO_PKG_NAME")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("session.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_default_config() {
        let config = config(&[]).unwrap();
        assert_eq!(config.api_url, "http://localhost:8000");
        assert!(config.session_path.ends_with("session.json"));
        assert_eq!(config.admin_users, vec!["admin"]);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.toast_ttl, Duration::from_secs(3));
        assert!(config.http_timeout.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("ESTATE_API_URL", "http://backend:9000"),
            ("ESTATE_SESSION_PATH", "/tmp/estate.json"),
            ("ESTATE_ADMIN_USERS", " root, asha ,,"),
            ("ESTATE_TOAST_SECS", "5"),
            ("ESTATE_HTTP_TIMEOUT_SECS", "10"),
        ])
        .unwrap();
        assert_eq!(config.api_url, "http://backend:9000");
        assert_eq!(config.session_path, PathBuf::from("/tmp/estate.json"));
        assert!(config.is_admin("asha"));
        assert!(!config.is_admin("admin"));
        assert_eq!(config.toast_ttl, Duration::from_secs(5));
        assert_eq!(config.http_timeout, Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_bad_number_is_an_error() {
        let err = config(&[("ESTATE_HTTP_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(err.to_string().contains("ESTATE_HTTP_TIMEOUT_SECS"));
    }

    #[test]
    fn test_zero_toast_secs_is_an_error() {
        let err = config(&[("ESTATE_TOAST_SECS", "0")]).unwrap_err();
        assert!(err.to_string().contains("ESTATE_TOAST_SECS"));
        assert!(config(&[("ESTATE_TOAST_SECS", "1")]).is_ok());
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config = config(&[("ESTATE_API_URL", "  "), ("ESTATE_LOG_LEVEL", "")]).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.log_level, "info");
    }
}
