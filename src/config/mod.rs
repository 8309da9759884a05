use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Directory, relative to the working directory, holding the database file.
pub const DEFAULT_DATABASE_DIR: &str = "sqlite/database";
pub const DEFAULT_DATABASE_NAME: &str = "surveydb";
pub const DEFAULT_USERNAME: &str = "sa";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database_dir")]
    pub database_dir: String,
    #[serde(default = "default_database_name")]
    pub database_name: String,
    #[serde(default = "default_username")]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    #[serde(default = "default_foreign_keys")]
    pub foreign_keys: bool,
}

fn default_database_dir() -> String {
    DEFAULT_DATABASE_DIR.to_string()
}
fn default_database_name() -> String {
    DEFAULT_DATABASE_NAME.to_string()
}
fn default_username() -> String {
    DEFAULT_USERNAME.to_string()
}
fn default_busy_timeout_ms() -> u64 {
    5000
}
fn default_foreign_keys() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_dir: default_database_dir(),
            database_name: default_database_name(),
            username: default_username(),
            password: String::new(),
            busy_timeout_ms: default_busy_timeout_ms(),
            foreign_keys: default_foreign_keys(),
        }
    }
}

impl Config {
    /// Config rooted at an explicit database directory, everything else default.
    pub fn with_database_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            database_dir: dir.as_ref().to_string_lossy().to_string(),
            ..Self::default()
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".surveydb")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("surveydb.conf")
    }

    /// Load configuration from `path`, or return defaults if the file does not exist
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;

        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("cannot parse {}: {e}", path.display())))
    }

    /// Load the configuration from the standard location
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    /// Write the configuration as YAML, creating parent directories when needed
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(self)
            .map_err(|e| AppError::Config(format!("cannot serialize configuration: {e}")))?;

        let mut file = fs::File::create(path)?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }

    /// Absolute path of the directory holding the database.
    ///
    /// Relative `database_dir` values are resolved against the current
    /// working directory; `~/` is expanded.
    pub fn base_directory(&self) -> AppResult<PathBuf> {
        let dir = expand_tilde(&self.database_dir);
        if dir.is_absolute() {
            return Ok(dir);
        }

        let cwd = env::current_dir()?;
        Ok(cwd.join(dir))
    }

    /// Full path of the database file.
    pub fn database_file(&self) -> AppResult<PathBuf> {
        Ok(self
            .base_directory()?
            .join(format!("{}.sqlite", self.database_name)))
    }

    /// SQLite URI used to open the database (read/write, created when missing).
    pub fn connection_url(&self) -> AppResult<String> {
        Ok(build_url(&self.database_file()?))
    }
}

/// Build a `file:` URI for `path`. Characters with a meaning in URIs are
/// percent-encoded.
pub fn build_url(path: &Path) -> String {
    let raw = path.to_string_lossy().replace('\\', "/");
    let mut encoded = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '%' => encoded.push_str("%25"),
            '?' => encoded.push_str("%3f"),
            '#' => encoded.push_str("%23"),
            c => encoded.push(c),
        }
    }

    // Windows drive letters need a leading slash: file:/C:/...
    if !encoded.starts_with('/') {
        encoded.insert(0, '/');
    }

    format!("file:{encoded}?mode=rwc")
}
