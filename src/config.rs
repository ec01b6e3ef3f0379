use crate::error::{Result, YtranslateError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Default backend serving transcripts and translations.
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:3000";

pub const DEFAULT_LANGUAGE: &str = "Spanish";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL serving `/transcript` and `/translate`.
    pub service_url: String,
    /// Target language used when none is given.
    pub default_language: String,
    /// Request the service's stub translator by default.
    pub use_mock: bool,
    /// Per-request timeout. Unset means wait indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            default_language: DEFAULT_LANGUAGE.to_string(),
            use_mock: false,
            timeout_secs: None,
        }
    }
}

impl Config {
    /// Load from the config file (if any), then apply environment overrides.
    pub fn load() -> Result<Self> {
        // Load from config file if it exists
        let mut config = match Self::config_file_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };

        // Override with environment variables
        if let Ok(url) = std::env::var("YTRANSLATE_SERVICE_URL") {
            config.service_url = url;
        }
        if let Ok(language) = std::env::var("YTRANSLATE_LANGUAGE") {
            config.default_language = language;
        }
        // Unparseable values are ignored
        if let Ok(mock) = std::env::var("YTRANSLATE_USE_MOCK") {
            if let Some(m) = parse_bool(&mock) {
                config.use_mock = m;
            }
        }
        if let Ok(timeout) = std::env::var("YTRANSLATE_TIMEOUT_SECS") {
            if let Ok(t) = timeout.parse() {
                config.timeout_secs = Some(t);
            }
        }

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Write to the default config file location.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path().ok_or_else(|| {
            YtranslateError::Config("Could not determine config directory".to_string())
        })?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.service_url).map_err(|e| {
            YtranslateError::Config(format!("Invalid service URL '{}': {}", self.service_url, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(YtranslateError::Config(
                "Service URL must use http or https".to_string(),
            ));
        }

        if self.default_language.trim().is_empty() {
            return Err(YtranslateError::Config(
                "Default language must not be empty".to_string(),
            ));
        }

        if self.timeout_secs == Some(0) {
            return Err(YtranslateError::Config(
                "Timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn config_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ytranslate").join("config.toml"))
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.service_url, "http://localhost:3000");
        assert_eq!(config.default_language, "Spanish");
        assert!(!config.use_mock);
        assert_eq!(config.timeout(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_bad_url() {
        let mut config = Config::default();
        config.service_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.service_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_language() {
        let mut config = Config::default();
        config.default_language = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = Config::default();
        config.timeout_secs = Some(0);
        assert!(config.validate().is_err());

        config.timeout_secs = Some(30);
        assert!(config.validate().is_ok());
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("use_mock = true").unwrap();
        assert!(config.use_mock);
        assert_eq!(config.service_url, DEFAULT_SERVICE_URL);
        assert_eq!(config.default_language, DEFAULT_LANGUAGE);
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
