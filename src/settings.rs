//! Configuration loader.
//!
//! `defaults/sqf-diary.default.toml` is embedded into the binary so that the documented
//! defaults and runtime behavior stay in sync. Applications layer user files and single-key
//! overrides on top via [`Loader`] before deserializing into [`SqfConfig`].

use crate::markup::FontSizeTable;
use crate::serializer::SerializerOptions;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/sqf-diary.default.toml");

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SqfConfig {
    pub record: RecordConfig,
    pub font: FontConfig,
}

/// Command template values.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordConfig {
    pub target: String,
    pub subject: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FontConfig {
    pub sizes: FontSizeTable,
}

impl SqfConfig {
    pub fn serializer_options(&self) -> SerializerOptions {
        SerializerOptions {
            target: self.record.target.clone(),
            subject: self.record.subject.clone(),
            font_sizes: self.font.sizes,
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
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

    /// Apply a single key/value override, e.g. `record.subject` from the command line.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<SqfConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<SqfConfig, ConfigError> {
    Loader::new().build()
}
