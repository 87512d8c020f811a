//! Application configuration.
//!
//! Settings are layered with figment: built-in defaults, then an optional
//! `chartsense.toml`, then `CHARTSENSE_`-prefixed environment variables where
//! `__` separates nested keys (`CHARTSENSE_ANALYSIS__API_KEY`).

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE: &str = "chartsense.toml";
pub const ENV_PREFIX: &str = "CHARTSENSE_";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Figment(#[from] figment::Error),
}

/// Settings for the AI analysis service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
    /// Language the service is asked to answer in.
    pub language: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com/v1beta/models".to_string(),
            model: "gemini-2.5-flash".to_string(),
            timeout_secs: 120,
            language: "English".to_string(),
        }
    }
}

/// Output size for rendered charts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 960,
            height: 540,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub analysis: AnalysisConfig,
    pub render: RenderConfig,
}

impl AppConfig {
    /// Provider stack; `path` overrides the default config file location.
    pub fn figment(path: Option<&Path>) -> Figment {
        let file = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));

        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Ok(Self::figment(path).extract()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults_without_sources() {
        Jail::expect_with(|_jail| {
            let config: AppConfig = AppConfig::figment(None).extract()?;
            assert_eq!(config, AppConfig::default());
            assert!(config.analysis.api_key.is_none());
            Ok(())
        });
    }

    #[test]
    fn test_file_then_env_layering() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE,
                r#"
                [analysis]
                model = "gemini-from-file"
                timeout_secs = 30

                [render]
                width = 640
                "#,
            )?;
            jail.set_env("CHARTSENSE_ANALYSIS__MODEL", "gemini-from-env");
            jail.set_env("CHARTSENSE_ANALYSIS__API_KEY", "secret");

            let config: AppConfig = AppConfig::figment(None).extract()?;
            assert_eq!(config.analysis.model, "gemini-from-env");
            assert_eq!(config.analysis.api_key.as_deref(), Some("secret"));
            assert_eq!(config.analysis.timeout_secs, 30);
            assert_eq!(config.render.width, 640);
            assert_eq!(config.render.height, 540);
            Ok(())
        });
    }

    #[test]
    fn test_explicit_path() {
        Jail::expect_with(|jail| {
            jail.create_file("custom.toml", "[render]\nheight = 300\n")?;
            let config: AppConfig = AppConfig::figment(Some(Path::new("custom.toml"))).extract()?;
            assert_eq!(config.render.height, 300);
            Ok(())
        });
    }
}
