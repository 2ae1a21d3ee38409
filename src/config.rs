//! Settings file at ~/.skyscope/config.json.
//!
//! Precedence: command line > `SKYSCOPE_API_URL` > file > built-in default.
//! A missing or unreadable file silently yields the defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub const API_URL_ENV: &str = "SKYSCOPE_API_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the sky object service; `/sky-objects` is appended.
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
        }
    }
}

impl Config {
    /// Load from the default path, then apply the environment override.
    pub fn load() -> Self {
        Self::load_from(&Self::default_path()).with_env_override(std::env::var(API_URL_ENV).ok())
    }

    /// Load from a specific path (for testing).
    pub fn load_from(path: &Path) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|data| serde_json::from_str(&data).ok())
            .unwrap_or_default()
    }

    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".skyscope")
            .join("config.json")
    }

    pub fn with_env_override(self, api_url: Option<String>) -> Self {
        self.with_api_url(api_url.filter(|u| !u.trim().is_empty()))
    }

    pub fn with_api_url(self, api_url: Option<String>) -> Self {
        match api_url {
            Some(api_url) => Self { api_url },
            None => self,
        }
    }
}
