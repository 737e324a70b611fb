use std::env;

use crate::merge::AlignmentPolicy;

pub const DEFAULT_BASE_URL: &str = "https://fbref.com/en/comps";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_FETCH_PARALLELISM: usize = 1;

#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Concurrent category fetches; 1 keeps the run strictly sequential.
    pub fetch_parallelism: usize,
    pub alignment: AlignmentPolicy,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            fetch_parallelism: DEFAULT_FETCH_PARALLELISM,
            alignment: AlignmentPolicy::Strict,
        }
    }
}

impl ScrapeConfig {
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let opt = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let base_url = opt("FBREF_BASE_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let user_agent = opt("FBREF_USER_AGENT").unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
        let timeout_secs = opt("FBREF_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
            .clamp(1, 300);
        let fetch_parallelism = opt("FETCH_PARALLELISM")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(DEFAULT_FETCH_PARALLELISM)
            .clamp(1, 16);
        let alignment = match opt("FBREF_ALIGNMENT")
            .map(|v| v.trim().to_ascii_lowercase())
            .as_deref()
        {
            Some("warn") => AlignmentPolicy::Warn,
            _ => AlignmentPolicy::Strict,
        };

        Self {
            base_url,
            user_agent,
            timeout_secs,
            fetch_parallelism,
            alignment,
        }
    }
}
