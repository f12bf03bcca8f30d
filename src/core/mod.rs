/*
 * Platform-agnostic support for the demo host: persisted configuration
 * (`config`) and the per-user directory it lives in (`path_utils`).
 */
pub mod config;
pub mod path_utils;

pub use config::{
    AppConfig, ConfigError, ConfigManagerOperations, CoreConfigManager, load_config_from_path,
};
