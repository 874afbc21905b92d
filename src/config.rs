//! Runtime configuration from environment variables
//!
//! Read once at process start; there is no reconfiguration at runtime.

use std::path::PathBuf;

pub const API_URL_ENV: &str = "FRAUD_API_URL";
pub const LOG_FILE_ENV: &str = "FRAUD_FORM_LOG_FILE";
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Prediction backend base URL, without trailing slash.
    pub api_base_url: String,
    /// Where the terminal UI writes its logs, if anywhere.
    pub log_file: Option<PathBuf>,
}

impl ClientConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: normalize_base_url(&api_base_url.into()),
            log_file: None,
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let api_base_url = get(API_URL_ENV).unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self {
            api_base_url: normalize_base_url(&api_base_url),
            log_file: get(LOG_FILE_ENV).map(PathBuf::from),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
