use serde::{Deserialize, Serialize};

use crate::extractor::DEFAULT_MAX_TEXT_CHARS;

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_max_text_chars")]
    pub max_text_chars: usize,
    /// Upper bound on runners fetching/extracting at once. 0 means unbounded.
    #[serde(default)]
    pub max_concurrent_jobs: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_fetch_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_max_text_chars() -> usize {
    DEFAULT_MAX_TEXT_CHARS
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            user_agent: default_user_agent(),
            max_text_chars: default_max_text_chars(),
            max_concurrent_jobs: 0,
        }
    }
}
