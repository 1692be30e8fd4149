//! Process configuration, read once from the environment.
//!
//! Credentials are captured at startup and passed by reference into the
//! clients; nothing else in the crate reads the environment.

use std::time::Duration;

use crate::domain::ConfigError;

pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const GITHUB_TOKEN_VAR: &str = "GITHUB_TOKEN";
pub const GEMINI_MODEL_VAR: &str = "GEMINI_MODEL";
pub const GEMINI_API_BASE_VAR: &str = "GEMINI_API_BASE";
pub const GITHUB_API_URL_VAR: &str = "GITHUB_API_URL";
pub const TIMEOUT_SECS_VAR: &str = "LOGLENS_TIMEOUT_SECS";
pub const MAX_LOG_CHARS_VAR: &str = "LOGLENS_MAX_LOG_CHARS";

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Credentials and endpoint settings for one run.
#[derive(Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Gemini API key (`GEMINI_API_KEY`).
    pub gemini_api_key: Option<String>,
    /// GitHub token (`GITHUB_TOKEN`), only needed for commenting.
    pub github_token: Option<String>,
    /// Gemini model id.
    pub model: String,
    /// Base URL of the Gemini API, without trailing slash.
    pub gemini_api_base: String,
    /// Base URL of the GitHub REST API, without trailing slash.
    pub github_api_url: String,
    /// Per-request timeout applied to both HTTP clients.
    pub timeout: Duration,
    /// Log characters embedded in the prompt before the head is truncated.
    /// `None` sends the whole log.
    pub max_log_chars: Option<usize>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        AnalyzerConfig {
            gemini_api_key: None,
            github_token: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_log_chars: None,
        }
    }
}

// Secrets stay out of logs and panic messages.
impl std::fmt::Debug for AnalyzerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyzerConfig")
            .field("gemini_api_key", &self.gemini_api_key.as_ref().map(|_| "***"))
            .field("github_token", &self.github_token.as_ref().map(|_| "***"))
            .field("model", &self.model)
            .field("gemini_api_base", &self.gemini_api_base)
            .field("github_api_url", &self.github_api_url)
            .field("timeout", &self.timeout)
            .field("max_log_chars", &self.max_log_chars)
            .finish()
    }
}

impl AnalyzerConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let defaults = Self::default();
        let timeout_secs = parse_positive(TIMEOUT_SECS_VAR, get(TIMEOUT_SECS_VAR))?
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let max_log_chars = parse_positive(MAX_LOG_CHARS_VAR, get(MAX_LOG_CHARS_VAR))?
            .map(|n| n as usize);

        Ok(AnalyzerConfig {
            gemini_api_key: get(GEMINI_API_KEY_VAR),
            github_token: get(GITHUB_TOKEN_VAR),
            model: get(GEMINI_MODEL_VAR).unwrap_or(defaults.model),
            gemini_api_base: get(GEMINI_API_BASE_VAR)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.gemini_api_base),
            github_api_url: get(GITHUB_API_URL_VAR)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.github_api_url),
            timeout: Duration::from_secs(timeout_secs),
            max_log_chars,
        })
    }

    /// Set the Gemini API key.
    pub fn with_gemini_api_key(mut self, key: &str) -> Self {
        self.gemini_api_key = Some(key.to_string());
        self
    }

    /// Set the GitHub token.
    pub fn with_github_token(mut self, token: &str) -> Self {
        self.github_token = Some(token.to_string());
        self
    }

    /// Point the Gemini client at a different base URL.
    pub fn with_gemini_api_base(mut self, url: &str) -> Self {
        self.gemini_api_base = url.trim_end_matches('/').to_string();
        self
    }

    /// Point the GitHub client at a different base URL.
    pub fn with_github_api_url(mut self, url: &str) -> Self {
        self.github_api_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Keep only the tail of logs longer than `max_log_chars`.
    pub fn with_max_log_chars(mut self, max_log_chars: usize) -> Self {
        self.max_log_chars = Some(max_log_chars);
        self
    }
}

fn parse_positive(var: &'static str, value: Option<String>) -> Result<Option<u64>, ConfigError> {
    match value {
        None => Ok(None),
        Some(raw) => match raw.parse::<u64>() {
            Ok(n) if n > 0 => Ok(Some(n)),
            _ => Err(ConfigError::InvalidNumber { var, value: raw }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var: &str| map.get(var).cloned()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = AnalyzerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AnalyzerConfig::default());
        assert!(config.gemini_api_key.is_none());
        assert_eq!(config.model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.max_log_chars, None);
    }

    #[test]
    fn test_reads_credentials_and_overrides() {
        let config = AnalyzerConfig::from_lookup(lookup(&[
            (GEMINI_API_KEY_VAR, "g-key"),
            (GITHUB_TOKEN_VAR, "gh-token"),
            (GEMINI_MODEL_VAR, "gemini-1.5-pro"),
            (GEMINI_API_BASE_VAR, "http://127.0.0.1:9000/"),
            (GITHUB_API_URL_VAR, "http://127.0.0.1:9001"),
            (TIMEOUT_SECS_VAR, "5"),
            (MAX_LOG_CHARS_VAR, "1000"),
        ]))
        .unwrap();

        assert_eq!(config.gemini_api_key.as_deref(), Some("g-key"));
        assert_eq!(config.github_token.as_deref(), Some("gh-token"));
        assert_eq!(config.model, "gemini-1.5-pro");
        assert_eq!(config.gemini_api_base, "http://127.0.0.1:9000");
        assert_eq!(config.github_api_url, "http://127.0.0.1:9001");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.max_log_chars, Some(1000));
    }

    #[test]
    fn test_blank_credentials_count_as_missing() {
        let config =
            AnalyzerConfig::from_lookup(lookup(&[(GEMINI_API_KEY_VAR, "   ")])).unwrap();
        assert!(config.gemini_api_key.is_none());
    }

    #[test]
    fn test_invalid_timeout_is_rejected() {
        for bad in ["0", "-1", "soon"] {
            let err = AnalyzerConfig::from_lookup(lookup(&[(TIMEOUT_SECS_VAR, bad)])).unwrap_err();
            assert!(err.to_string().contains(TIMEOUT_SECS_VAR));
        }
    }

    #[test]
    fn test_invalid_log_budget_is_rejected() {
        let err = AnalyzerConfig::from_lookup(lookup(&[(MAX_LOG_CHARS_VAR, "0")])).unwrap_err();
        assert!(err.to_string().contains(MAX_LOG_CHARS_VAR));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = AnalyzerConfig::default()
            .with_gemini_api_key("super-secret")
            .with_github_token("ghp_secret");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret"));
        assert!(!rendered.contains("ghp_secret"));
        assert!(rendered.contains("***"));
    }
}
