use crate::error::{PackBoxError, Result};
use crate::logging;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::Level;

pub const DEFAULT_CONFIG_PATHS: &[&str] = &["packbox.toml", ".packbox.toml"];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub extract: ExtractConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub destination: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceConfig {
    pub root: PathBuf,
    /// Box name used in logs; defaults to the root's directory name.
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub enabled: bool,
    pub level: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            destination: PathBuf::from("packbox-out"),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("assets"),
            name: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "debug".to_string(),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(PackBoxError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| PackBoxError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| PackBoxError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                for default_path in DEFAULT_CONFIG_PATHS {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, overrides: &CliOverrides) {
        if let Some(ref destination) = overrides.destination {
            self.extract.destination = destination.clone();
        }

        if let Some(ref source) = overrides.source {
            self.source.root = source.clone();
        }

        if let Some(ref name) = overrides.box_name {
            self.source.name = Some(name.clone());
        }

        if let Some(ref level) = overrides.log_level {
            self.logging.enabled = true;
            self.logging.level = level.clone();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.extract.destination.as_os_str().is_empty() {
            return Err(PackBoxError::Config {
                message: "Destination directory must not be empty".to_string(),
            });
        }

        if self.source.root.as_os_str().is_empty() {
            return Err(PackBoxError::Config {
                message: "Source directory must not be empty".to_string(),
            });
        }

        if self.source.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(PackBoxError::Config {
                message: "Box name must not be blank".to_string(),
            });
        }

        if logging::parse_level(&self.logging.level).is_none() {
            return Err(PackBoxError::Config {
                message: format!(
                    "Unknown log level '{}' (expected one of: {})",
                    self.logging.level,
                    logging::VALID_LEVELS.join(", ")
                ),
            });
        }

        Ok(())
    }

    /// Level the extractor should log at, or `None` when logging is off.
    pub fn log_level(&self) -> Option<Level> {
        if self.logging.enabled {
            logging::parse_level(&self.logging.level)
        } else {
            None
        }
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub destination: Option<PathBuf>,
    pub source: Option<PathBuf>,
    pub box_name: Option<String>,
    pub log_level: Option<String>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_destination(mut self, destination: Option<PathBuf>) -> Self {
        self.destination = destination;
        self
    }

    pub fn with_source(mut self, source: Option<PathBuf>) -> Self {
        self.source = source;
        self
    }

    pub fn with_box_name(mut self, name: Option<String>) -> Self {
        self.box_name = name;
        self
    }

    pub fn with_log_level(mut self, level: Option<String>) -> Self {
        self.log_level = level;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.extract.destination, PathBuf::from("packbox-out"));
        assert!(!config.logging.enabled);
        assert!(config.log_level().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        config.logging.level = "shouty".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.extract.destination = PathBuf::new();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.source.name = Some("  ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_sample_config_round_trip() {
        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(temp_file.path(), Config::create_sample_config()).unwrap();

        let loaded_config = Config::load_from_file(temp_file.path()).unwrap();
        assert_eq!(loaded_config.extract.destination, PathBuf::from("packbox-out"));
        assert!(loaded_config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("packbox.toml");
        std::fs::write(&path, "[logging]\nenabled = true\nlevel = \"info\"\n").unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.log_level(), Some(Level::INFO));
        assert_eq!(config.source.root, PathBuf::from("assets"));
    }

    #[test]
    fn test_missing_config_file() {
        let err = Config::load_from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, PackBoxError::Config { .. }));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = Config::default();

        let overrides = CliOverrides::new()
            .with_destination(Some(PathBuf::from("/tmp/out")))
            .with_box_name(Some("web".to_string()))
            .with_log_level(Some("trace".to_string()));

        config.merge_with_cli_args(&overrides);

        assert_eq!(config.extract.destination, PathBuf::from("/tmp/out"));
        assert_eq!(config.source.name.as_deref(), Some("web"));
        assert_eq!(config.log_level(), Some(Level::TRACE));
        assert_eq!(config.source.root, PathBuf::from("assets"));
    }

    #[test]
    fn test_sample_config_generation() {
        let sample = Config::create_sample_config();
        assert!(sample.contains("[extract]"));
        assert!(sample.contains("[source]"));
        assert!(sample.contains("[logging]"));
    }
}
