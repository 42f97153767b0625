//! Application configuration and local persistence.

pub mod args;
pub mod remote_config;
pub mod storage;

pub use args::{CliArgs, LogLevel};
pub use remote_config::RemoteConfig;
pub use storage::{ConfigError, SettingsStore, StorageManager, StoredSettings};
