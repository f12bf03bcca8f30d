/*
 * Manages application configuration: the log level, an optional log file, and
 * the style sheet the demo mounts. Settings are persisted as JSON in the
 * application's local configuration directory (see `path_utils`), or read from
 * an explicit path.
 *
 * It uses a trait-based approach (`ConfigManagerOperations`) so that callers
 * can be handed a mock or an alternative storage backend in tests. The
 * concrete implementation (`CoreConfigManager`) handles file system access.
 */
use crate::core::path_utils;
use crate::styles::{StyleDefinition, default_style_sheet};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

const CONFIG_FILENAME: &str = "config.json";

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Json(serde_json::Error),
    NoConfigDirectory,
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Json(err)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Configuration I/O error: {e}"),
            ConfigError::Json(e) => write!(f, "Configuration JSON error: {e}"),
            ConfigError::NoConfigDirectory => {
                write!(f, "Could not determine configuration directory")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Json(e) => Some(e),
            ConfigError::NoConfigDirectory => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    #[serde(default = "default_style_sheet")]
    pub styles: Vec<StyleDefinition>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            log_level: default_log_level(),
            log_file: None,
            styles: default_style_sheet(),
        }
    }
}

impl AppConfig {
    /// The configured level, or `Info` if it does not parse.
    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or_else(|_| {
            log::warn!(
                "AppConfig: unknown log level '{}', using info.",
                self.log_level
            );
            LevelFilter::Info
        })
    }
}

pub trait ConfigManagerOperations: Send + Sync {
    fn load_config(&self, app_name: &str) -> Result<Option<AppConfig>>;
    fn save_config(&self, app_name: &str, config: &AppConfig) -> Result<()>;
}

/// Reads a configuration from an explicit file.
pub fn load_config_from_path(path: &Path) -> Result<AppConfig> {
    log::debug!("Config: Loading configuration from {path:?}");
    let file = File::open(path)?;
    let config = serde_json::from_reader(BufReader::new(file))?;
    Ok(config)
}

fn write_config_to_path(path: &Path, config: &AppConfig) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, config)?;
    writer.flush()?;
    Ok(())
}

fn load_config_in_dir(config_dir: &Path) -> Result<Option<AppConfig>> {
    let file_path = config_dir.join(CONFIG_FILENAME);
    if !file_path.exists() {
        log::debug!("Config: Configuration file {file_path:?} does not exist.");
        return Ok(None);
    }
    if fs::metadata(&file_path)?.len() == 0 {
        log::debug!("Config: Configuration file {file_path:?} is empty.");
        return Ok(None);
    }
    load_config_from_path(&file_path).map(Some)
}

pub struct CoreConfigManager {}

impl CoreConfigManager {
    pub fn new() -> Self {
        CoreConfigManager {}
    }
}

impl Default for CoreConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManagerOperations for CoreConfigManager {
    /*
     * Loads the configuration stored for `app_name`. A missing or empty file
     * is not an error and yields `Ok(None)`; a file that does not parse is.
     */
    fn load_config(&self, app_name: &str) -> Result<Option<AppConfig>> {
        log::trace!("CoreConfigManager: Loading configuration for app '{app_name}'");
        let config_dir = path_utils::get_base_app_config_local_dir(app_name)
            .ok_or(ConfigError::NoConfigDirectory)?;
        load_config_in_dir(&config_dir)
    }

    fn save_config(&self, app_name: &str, config: &AppConfig) -> Result<()> {
        log::trace!("CoreConfigManager: Saving configuration for app '{app_name}'");
        let config_dir = path_utils::get_base_app_config_local_dir(app_name)
            .ok_or(ConfigError::NoConfigDirectory)?;
        let file_path = config_dir.join(CONFIG_FILENAME);
        write_config_to_path(&file_path, config)?;
        log::debug!("CoreConfigManager: Saved configuration to {file_path:?}.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::styles::{Color, FillSpec};
    use tempfile::tempdir;

    // Test helper that stores configuration in a caller-chosen directory.
    struct TestConfigManager {
        mock_config_dir: PathBuf,
    }

    impl TestConfigManager {
        fn new(mock_config_dir: PathBuf) -> Self {
            if !mock_config_dir.exists() {
                fs::create_dir_all(&mock_config_dir)
                    .expect("Failed to create mock config dir for test");
            }
            TestConfigManager { mock_config_dir }
        }
    }

    impl ConfigManagerOperations for TestConfigManager {
        fn load_config(&self, _app_name: &str) -> Result<Option<AppConfig>> {
            load_config_in_dir(&self.mock_config_dir)
        }

        fn save_config(&self, _app_name: &str, config: &AppConfig) -> Result<()> {
            write_config_to_path(&self.mock_config_dir.join(CONFIG_FILENAME), config)
        }
    }

    #[test]
    fn test_core_config_manager_save_and_load() {
        // Arrange
        let unique_app_name = format!("TestApp_StyleConfig_{}", rand::random::<u64>());
        let manager = CoreConfigManager::new();
        let config = AppConfig {
            log_level: "debug".to_string(),
            ..Default::default()
        };

        // Act
        manager
            .save_config(&unique_app_name, &config)
            .expect("Saving configuration should succeed.");
        let loaded = manager.load_config(&unique_app_name);

        // Assert
        match loaded {
            Ok(Some(loaded)) => assert_eq!(loaded, config),
            Ok(None) => panic!("Expected a configuration, but got None."),
            Err(e) => panic!("Failed to load configuration: {e:?}"),
        }

        // Cleanup
        path_utils::remove_app_config_dir(&unique_app_name);
    }

    #[test]
    fn test_load_missing_config_is_none() {
        let dir = tempdir().unwrap();
        let manager = TestConfigManager::new(dir.path().to_path_buf());

        match manager.load_config("AnyApp") {
            Ok(None) => {}
            Ok(Some(_)) => panic!("Expected None when file doesn't exist."),
            Err(e) => panic!("Unexpected error when file doesn't exist: {e:?}"),
        }
    }

    #[test]
    fn test_load_empty_config_is_none() {
        let dir = tempdir().unwrap();
        let manager = TestConfigManager::new(dir.path().to_path_buf());
        File::create(dir.path().join(CONFIG_FILENAME)).unwrap();

        assert!(matches!(manager.load_config("AnyApp"), Ok(None)));
    }

    #[test]
    fn test_load_malformed_config_is_json_error() {
        let dir = tempdir().unwrap();
        let manager = TestConfigManager::new(dir.path().to_path_buf());
        fs::write(dir.path().join(CONFIG_FILENAME), "{ not json").unwrap();

        assert!(matches!(
            manager.load_config("AnyApp"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_save_overwrites_previous_config() {
        let dir = tempdir().unwrap();
        let manager = TestConfigManager::new(dir.path().to_path_buf());
        let first = AppConfig::default();
        let second = AppConfig {
            styles: vec![StyleDefinition::Fill(FillSpec {
                color: Color::rgb(1, 2, 3),
            })],
            ..Default::default()
        };

        manager.save_config("AnyApp", &first).unwrap();
        manager.save_config("AnyApp", &second).unwrap();

        assert_eq!(manager.load_config("AnyApp").unwrap(), Some(second));
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("partial.json");
        fs::write(&path, r#"{"log_file":"run.log"}"#).unwrap();

        let config = load_config_from_path(&path).unwrap();

        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_file, Some(PathBuf::from("run.log")));
        assert_eq!(config.styles, default_style_sheet());
    }

    #[test]
    fn test_level_filter_parsing() {
        let mut config = AppConfig::default();
        assert_eq!(config.level_filter(), LevelFilter::Info);
        config.log_level = "TRACE".to_string();
        assert_eq!(config.level_filter(), LevelFilter::Trace);
        config.log_level = "loud".to_string();
        assert_eq!(config.level_filter(), LevelFilter::Info);
    }
}
