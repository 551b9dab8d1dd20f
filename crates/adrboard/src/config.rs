//! Configuration management for adrboard.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::policy::EnforcementLevel;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "adrboard";

/// Placeholder character for digits in a number format.
const NUMBER_PLACEHOLDER: char = 'N';

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `ADRBOARD_`)
/// 2. TOML config file at `~/.config/adrboard/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dataset configuration.
    pub dataset: DatasetConfig,
    /// Display configuration.
    pub display: DisplayConfig,
    /// Search configuration.
    pub search: SearchConfig,
    /// Draft generation configuration.
    pub generation: GenerationConfig,
    /// Policy configuration.
    pub policy: PolicyConfig,
}

/// Dataset-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Path to a JSON dataset file.
    /// Defaults to the seed dataset built into the binary.
    pub path: Option<PathBuf>,
    /// Reject datasets whose records reference ids that do not exist.
    /// When off, dangling references are logged and tolerated.
    pub strict_references: bool,
}

/// Display-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Format for ADR numbers; each `N` is a zero-padded digit.
    pub number_format: String,
    /// Number of recently updated ADRs shown on the dashboard.
    pub recent_limit: usize,
    /// Maximum length of a search snippet, in characters.
    pub snippet_length: usize,
}

/// Search-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of results when none is given.
    pub default_limit: usize,
}

/// Draft generation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Simulated generation latency in milliseconds.
    pub delay_ms: u64,
}

/// Policy-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// How strictly policy triggers are enforced in CI.
    pub enforcement_level: EnforcementLevel,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            number_format: "ADR-NNNN".to_string(),
            recent_limit: 5,
            snippet_length: 160,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { default_limit: 20 }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self { delay_ms: 2000 }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("ADRBOARD_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if !self.display.number_format.contains(NUMBER_PLACEHOLDER) {
            return Err(Error::ConfigValidation {
                message: format!(
                    "number_format ({}) must contain at least one '{NUMBER_PLACEHOLDER}'",
                    self.display.number_format
                ),
            });
        }

        if self.display.recent_limit == 0 {
            return Err(Error::ConfigValidation {
                message: "recent_limit must be greater than 0".to_string(),
            });
        }

        if self.display.snippet_length == 0 {
            return Err(Error::ConfigValidation {
                message: "snippet_length must be greater than 0".to_string(),
            });
        }

        if self.search.default_limit == 0 {
            return Err(Error::ConfigValidation {
                message: "default_limit must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Get the generation delay as a Duration.
    #[must_use]
    pub fn generation_delay(&self) -> Duration {
        Duration::from_millis(self.generation.delay_ms)
    }

    /// Format an ADR number using the configured format.
    ///
    /// The run of `N` placeholders is replaced by the number, zero-padded to
    /// the length of the run. Numbers wider than the run are not truncated.
    #[must_use]
    pub fn format_number(&self, number: u32) -> String {
        format_number(&self.display.number_format, number)
    }
}

/// Format `number` according to a pattern such as `ADR-NNNN`.
#[must_use]
pub fn format_number(pattern: &str, number: u32) -> String {
    let Some(start) = pattern.find(NUMBER_PLACEHOLDER) else {
        return format!("{pattern}{number}");
    };
    let width = pattern[start..]
        .chars()
        .take_while(|c| *c == NUMBER_PLACEHOLDER)
        .count();
    let end = start + width;
    format!(
        "{}{number:0width$}{}",
        &pattern[..start],
        &pattern[end..]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.dataset.path.is_none());
        assert!(!config.dataset.strict_references);
        assert_eq!(config.display.number_format, "ADR-NNNN");
        assert_eq!(config.policy.enforcement_level, EnforcementLevel::Warn);
    }

    #[test]
    fn test_default_display_config() {
        let display = DisplayConfig::default();

        assert_eq!(display.recent_limit, 5);
        assert_eq!(display.snippet_length, 160);
    }

    #[test]
    fn test_default_generation_config() {
        let generation = GenerationConfig::default();
        assert_eq!(generation.delay_ms, 2000);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_number_format_without_placeholder() {
        let mut config = Config::default();
        config.display.number_format = "ADR-".to_string();

        let result = config.validate();
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("number_format"));
    }

    #[test]
    fn test_validate_zero_recent_limit() {
        let mut config = Config::default();
        config.display.recent_limit = 0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("recent_limit"));
    }

    #[test]
    fn test_validate_zero_snippet_length() {
        let mut config = Config::default();
        config.display.snippet_length = 0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("snippet_length"));
    }

    #[test]
    fn test_validate_zero_search_limit() {
        let mut config = Config::default();
        config.search.default_limit = 0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("default_limit"));
    }

    #[test]
    fn test_generation_delay() {
        let config = Config::default();
        assert_eq!(config.generation_delay(), Duration::from_millis(2000));
    }

    #[test]
    fn test_format_number_default() {
        let config = Config::default();
        assert_eq!(config.format_number(7), "ADR-0007");
        assert_eq!(config.format_number(1234), "ADR-1234");
    }

    #[test]
    fn test_format_number_wider_than_pattern() {
        assert_eq!(format_number("ADR-NN", 123), "ADR-123");
    }

    #[test]
    fn test_format_number_with_suffix() {
        assert_eq!(format_number("DEC-NNN/ai", 4), "DEC-004/ai");
    }

    #[test]
    fn test_format_number_without_placeholder() {
        assert_eq!(format_number("#", 12), "#12");
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("adrboard"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        let result = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")));
        assert!(result.is_ok());

        let config = result.unwrap();
        assert_eq!(config, Config::default());
    }

    fn write_temp_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "adrboard-config-{name}-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_sections_from_file() {
        let path = write_temp_config(
            "sections",
            "[display]\nnumber_format = \"D-NNN\"\n\n\
             [generation]\ndelay_ms = 0\n\n\
             [policy]\nenforcement_level = \"enforce\"\n",
        );
        let config = Config::load_from(Some(path.clone())).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.display.number_format, "D-NNN");
        assert_eq!(config.display.recent_limit, 5);
        assert_eq!(config.generation.delay_ms, 0);
        assert_eq!(config.policy.enforcement_level, EnforcementLevel::Enforce);
        assert_eq!(config.format_number(7), "D-007");
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let path = write_temp_config("invalid", "[display]\nnumber_format = \"ADR\"\n");
        let result = Config::load_from(Some(path.clone()));
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(Error::ConfigValidation { .. })));
    }

    #[test]
    fn test_config_clone() {
        let config = Config::default();
        let cloned = config.clone();
        assert_eq!(config, cloned);
    }

    #[test]
    fn test_display_config_deserialize() {
        let json = r#"{"number_format": "D-NNN"}"#;
        let display: DisplayConfig = serde_json::from_str(json).unwrap();
        assert_eq!(display.number_format, "D-NNN");
        assert_eq!(display.recent_limit, 5);
    }

    #[test]
    fn test_policy_config_deserialize() {
        let json = r#"{"enforcement_level": "enforce"}"#;
        let policy: PolicyConfig = serde_json::from_str(json).unwrap();
        assert_eq!(policy.enforcement_level, EnforcementLevel::Enforce);
    }
}
