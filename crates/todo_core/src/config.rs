//! Application configuration.
//!
//! # Responsibility
//! - Describe where the task store, attachment objects and logs live.
//! - Load overrides from a TOML file; every key is optional.
//!
//! # Invariants
//! - Paths returned by `resolve_paths` are absolute.
//! - A missing config file is not an error; defaults apply.

use crate::logging::default_log_level;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const DEFAULT_DATA_DIR: &str = "todo-data";
const DEFAULT_DATABASE_FILE: &str = "todos.sqlite3";
const DEFAULT_STORAGE_DIR: &str = "storage";
const DEFAULT_LOG_DIR: &str = "logs";

#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse config `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

/// Settings read from `todo.toml`.
///
/// Relative `database_file`, `storage_dir` and `log_dir` are resolved against
/// `data_dir`; a relative `data_dir` is resolved against the caller's base.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub database_file: PathBuf,
    pub storage_dir: PathBuf,
    pub log_dir: PathBuf,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            database_file: PathBuf::from(DEFAULT_DATABASE_FILE),
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            log_level: default_log_level().to_string(),
        }
    }
}

impl AppConfig {
    /// Returns a copy with every path made absolute.
    pub fn resolve_paths(&self, base: &Path) -> Self {
        let data_dir = absolutize(base, &self.data_dir);
        Self {
            database_file: absolutize(&data_dir, &self.database_file),
            storage_dir: absolutize(&data_dir, &self.storage_dir),
            log_dir: absolutize(&data_dir, &self.log_dir),
            log_level: self.log_level.clone(),
            data_dir,
        }
    }
}

/// Parses configuration from TOML text.
pub fn parse_config(content: &str, origin: &Path) -> Result<AppConfig, ConfigError> {
    toml::from_str(content).map_err(|source| ConfigError::Parse {
        path: origin.to_path_buf(),
        source,
    })
}

/// Loads `path` when it exists, otherwise returns defaults.
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(AppConfig::default());
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content, path)
}

fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::{load_config, parse_config, AppConfig, ConfigError};
    use std::path::{Path, PathBuf};

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn partial_file_overrides_only_given_keys() {
        let config = parse_config(
            "data_dir = \"/srv/todo\"\nlog_level = \"warn\"\n",
            Path::new("todo.toml"),
        )
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/todo"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.storage_dir, AppConfig::default().storage_dir);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = parse_config("colour = \"red\"\n", Path::new("todo.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn resolve_paths_nests_relative_paths_under_data_dir() {
        let base = std::env::temp_dir();
        let resolved = AppConfig::default().resolve_paths(&base);
        assert_eq!(resolved.data_dir, base.join("todo-data"));
        assert_eq!(
            resolved.database_file,
            base.join("todo-data").join("todos.sqlite3")
        );
        assert!(resolved.log_dir.is_absolute());
    }
}
