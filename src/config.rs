// src/config.rs
// =============================================================================
// Configuration: built-in defaults, an optional TOML file, then environment.
//
//   api_base = "https://api.github.com"
//   user_agent = "github-snippet"
//   timeout_secs = 10
//   theme = "InspiredGitHub"
//
// GITHUB_SNIPPET_API overrides api_base and GITHUB_TOKEN sets token.
// =============================================================================

use std::env;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_THEME: &str = "InspiredGitHub";
pub const API_BASE_ENV: &str = "GITHUB_SNIPPET_API";
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub api_base: String,
    pub user_agent: String,
    /// Sent as a bearer token when present. Unauthenticated otherwise.
    pub token: Option<String>,
    /// No timeout unless set.
    pub timeout_secs: Option<u64>,
    pub theme: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            token: None,
            timeout_secs: None,
            theme: DEFAULT_THEME.to_string(),
        }
    }
}

impl Config {
    /// Loads `path` when given, otherwise starts from the defaults, then
    /// applies the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| env::var(key).ok());
        config.api_base_url()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&raw).with_context(|| format!("failed to parse config {}", path.display()))
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Applies overrides from a key lookup; `env::var` in production.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(api_base) = lookup(API_BASE_ENV).filter(|v| !v.trim().is_empty()) {
            self.api_base = api_base.trim().to_string();
        }
        if let Some(token) = lookup(TOKEN_ENV).filter(|v| !v.trim().is_empty()) {
            self.token = Some(token.trim().to_string());
        }
    }

    /// The API base as a URL. Only http(s) bases are accepted.
    pub fn api_base_url(&self) -> Result<Url> {
        let url = Url::parse(&self.api_base)
            .with_context(|| format!("invalid api_base '{}'", self.api_base))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(anyhow!("api_base must be http or https, got '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api_base, "https://api.github.com");
        assert_eq!(config.theme, "InspiredGitHub");
        assert!(config.token.is_none());
        assert!(config.timeout_secs.is_none());
        assert!(config.user_agent.starts_with("github-snippet/"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml("timeout_secs = 10\n").unwrap();
        assert_eq!(config.timeout_secs, Some(10));
        assert_eq!(config.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(Config::from_toml("api_bsae = \"x\"\n").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            (API_BASE_ENV, "http://127.0.0.1:8080"),
            (TOKEN_ENV, " abc "),
        ]
        .into_iter()
        .collect();
        let mut config = Config::default();
        config.apply_env(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.api_base, "http://127.0.0.1:8080");
        assert_eq!(config.token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_empty_env_is_ignored() {
        let mut config = Config::default();
        config.apply_env(|_| Some(String::new()));
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert!(config.token.is_none());
    }

    #[test]
    fn test_api_base_must_be_http() {
        let config = Config {
            api_base: "mailto:someone@example.com".to_string(),
            ..Config::default()
        };
        assert!(config.api_base_url().is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("github-snippet.toml");
        fs::write(&path, "theme = \"base16-ocean.dark\"\n").unwrap();
        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.theme, "base16-ocean.dark");
    }
}
