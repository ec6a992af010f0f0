//! Configuration loader for the dtl tool
//!
//! `defaults/dtl.default.toml` is embedded into the binary so that docs and
//! runtime behavior stay in sync. The user file, an explicit `--config` file
//! and environment overrides are layered on top of those defaults via
//! [`Loader`] before deserializing into [`DtlConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use directories::{BaseDirs, ProjectDirs};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_TOML: &str = include_str!("../defaults/dtl.default.toml");

/// Environment variable overriding `journal.dir`
pub const DIR_ENV: &str = "DTL_DIR";

#[derive(Debug, Clone, Deserialize)]
pub struct DtlConfig {
    pub journal: JournalConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JournalConfig {
    pub dir: String,
    pub default_file: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl JournalConfig {
    /// Journal directory with a leading `~` expanded
    pub fn dir(&self) -> PathBuf {
        expand_home(&self.dir)
    }

    /// Resolve a journal path given on the command line
    ///
    /// `None` means the default journal. Relative paths that do not exist in
    /// the working directory are taken relative to the journal directory.
    pub fn resolve(&self, path: Option<&Path>) -> PathBuf {
        match path {
            None => self.dir().join(&self.default_file),
            Some(path) if path.is_absolute() || path.exists() => path.to_path_buf(),
            Some(path) => self.dir().join(path),
        }
    }
}

/// Layers configuration sources over the built-in defaults
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer `<config dir>/dtl/config.toml`, when the platform has one.
    pub fn with_user_file(self) -> Self {
        match user_config_path() {
            Some(path) => self.with_optional_file(path),
            None => self,
        }
    }

    /// Apply a single key/value override.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Apply `DTL_DIR` from the environment, if set.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        match std::env::var(DIR_ENV) {
            Ok(dir) if !dir.is_empty() => self.set_override("journal.dir", dir),
            _ => Ok(self),
        }
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<DtlConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Defaults, user file, optional explicit file, then environment overrides
pub fn load(explicit: Option<&Path>) -> Result<DtlConfig, ConfigError> {
    let mut loader = Loader::new().with_user_file();
    if let Some(path) = explicit {
        loader = loader.with_file(path);
    }
    loader.with_env_overrides()?.build()
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<DtlConfig, ConfigError> {
    Loader::new().build()
}

pub fn user_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "dtl").map(|dirs| dirs.config_dir().join("config.toml"))
}

fn expand_home(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(path),
    };
    match BaseDirs::new() {
        Some(dirs) if rest.is_empty() => dirs.home_dir().to_path_buf(),
        Some(dirs) => dirs.home_dir().join(rest),
        None => PathBuf::from(path),
    }
}
