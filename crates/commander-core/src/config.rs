use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use anyhow::{anyhow, Context, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_MAX_TOKENS: u32 = 150;
pub const DEFAULT_TEMPERATURE: f32 = 0.8;
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// On-disk settings, every field optional
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub presence_penalty: Option<f32>,
    pub frequency_penalty: Option<f32>,
    pub request_timeout_secs: Option<u64>,
}

/// Resolved settings for the completion provider, read once at startup.
///
/// Environment wins over the config file, the config file wins over defaults.
/// Without an API key the commander runs on canned replies only.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub presence_penalty: Option<f32>,
    pub frequency_penalty: Option<f32>,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self::resolve(ConfigFile::default(), |_| None)
    }
}

impl Config {
    /// Resolve settings from the environment and the user config file.
    ///
    /// A missing config directory or an unreadable file is logged and skipped;
    /// the environment still applies.
    pub fn load() -> Self {
        match Self::get_config_path() {
            Ok(config_path) => Self::load_from(&config_path),
            Err(e) => {
                tracing::warn!(error = %e, "No config directory; using environment and defaults");
                Self::from_env()
            }
        }
    }

    pub fn load_from(config_path: &Path) -> Self {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// Environment over defaults, no config file
    pub fn from_env() -> Self {
        Self::resolve(ConfigFile::default(), |key| std::env::var(key).ok())
    }

    fn load_with<F>(config_path: &Path, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = Self::read_file(config_path).unwrap_or_else(|e| {
            tracing::warn!(error = %format!("{e:#}"), "Ignoring unreadable config file");
            ConfigFile::default()
        });
        Self::resolve(file, env)
    }

    /// Merge a config file with an environment lookup
    pub fn resolve<F>(file: ConfigFile, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |key: &str| env(key).filter(|v| !v.trim().is_empty());
        let non_blank = |v: Option<String>| v.filter(|v| !v.trim().is_empty());

        let api_key = env("COMMANDER_API_KEY")
            .or_else(|| env("OPENAI_API_KEY"))
            .or_else(|| non_blank(file.api_key));

        let base_url = env("COMMANDER_BASE_URL")
            .or_else(|| non_blank(file.base_url))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let model = env("COMMANDER_MODEL")
            .or_else(|| non_blank(file.model))
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let timeout_secs = match env("COMMANDER_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) => Some(secs),
                Err(_) => {
                    tracing::warn!(value = %raw, "Ignoring invalid COMMANDER_TIMEOUT_SECS");
                    None
                }
            },
            None => None,
        }
        .or(file.request_timeout_secs)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            max_tokens: file.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            temperature: file.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            presence_penalty: file.presence_penalty,
            frequency_penalty: file.frequency_penalty,
            request_timeout: Duration::from_secs(timeout_secs),
        }
    }

    fn read_file(config_path: &Path) -> Result<ConfigFile> {
        if !config_path.exists() {
            return Ok(ConfigFile::default());
        }

        let config_content = fs::read_to_string(config_path)
            .with_context(|| format!("reading {}", config_path.display()))?;
        let file: ConfigFile = serde_json::from_str(&config_content)
            .with_context(|| format!("parsing {}", config_path.display()))?;
        Ok(file)
    }

    fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("solar-commander").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_any_source() {
        let config = Config::resolve(ConfigFile::default(), |_| None);
        assert_eq!(config.api_key, None);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.max_tokens, 150);
        assert_eq!(config.request_timeout, Duration::from_secs(20));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_env_overrides_file() {
        let file = ConfigFile {
            api_key: Some("file-key".into()),
            model: Some("file-model".into()),
            ..Default::default()
        };
        let config = Config::resolve(
            file,
            env_from(&[("COMMANDER_API_KEY", "env-key"), ("COMMANDER_MODEL", "env-model")]),
        );
        assert_eq!(config.api_key.as_deref(), Some("env-key"));
        assert_eq!(config.model, "env-model");
    }

    #[test]
    fn test_openai_key_is_accepted() {
        let config = Config::resolve(ConfigFile::default(), env_from(&[("OPENAI_API_KEY", "sk-1")]));
        assert_eq!(config.api_key.as_deref(), Some("sk-1"));
    }

    #[test]
    fn test_blank_values_count_as_absent() {
        let file = ConfigFile {
            api_key: Some("  ".into()),
            ..Default::default()
        };
        let config = Config::resolve(file, env_from(&[("COMMANDER_API_KEY", ""), ("COMMANDER_BASE_URL", " ")]));
        assert_eq!(config.api_key, None);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = Config::resolve(
            ConfigFile::default(),
            env_from(&[("COMMANDER_BASE_URL", "http://localhost:8080/v1/")]),
        );
        assert_eq!(config.base_url, "http://localhost:8080/v1");
    }

    #[test]
    fn test_invalid_timeout_falls_back() {
        let file = ConfigFile {
            request_timeout_secs: Some(5),
            ..Default::default()
        };
        let config = Config::resolve(file, env_from(&[("COMMANDER_TIMEOUT_SECS", "soon")]));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let file = Config::read_file(&dir.path().join("config.json")).unwrap();
        assert_eq!(file, ConfigFile::default());
    }

    #[test]
    fn test_read_file_parses_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"base_url":"http://127.0.0.1:9000/v1","temperature":0.5,"presence_penalty":0.6}"#,
        )
        .unwrap();

        let config = Config::resolve(Config::read_file(&path).unwrap(), |_| None);
        assert_eq!(config.base_url, "http://127.0.0.1:9000/v1");
        assert_eq!(config.temperature, 0.5);
        assert_eq!(config.presence_penalty, Some(0.6));
        assert_eq!(config.frequency_penalty, None);
    }

    #[test]
    fn test_read_file_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        assert!(Config::read_file(&path).is_err());
    }

    #[test]
    fn test_garbage_file_keeps_environment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let config = Config::load_with(
            &path,
            env_from(&[("COMMANDER_API_KEY", "sk-env"), ("COMMANDER_MODEL", "env-model")]),
        );
        assert_eq!(config.api_key.as_deref(), Some("sk-env"));
        assert_eq!(config.model, "env-model");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_file_is_read_under_environment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"api_key":"sk-file","model":"file-model"}"#).unwrap();

        let config = Config::load_with(&path, env_from(&[("COMMANDER_MODEL", "env-model")]));
        assert_eq!(config.api_key.as_deref(), Some("sk-file"));
        assert_eq!(config.model, "env-model");
    }
}
