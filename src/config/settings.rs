//! TOML-based configuration for sqlpress.
//!
//! Example configuration:
//! ```toml
//! [compiler]
//! dialect = "sqlserver"
//! row_number_alias = "row_num"
//! wrapper_alias = "results_wrapper"
//! max_parameters = 1000
//! ```
//!
//! Every key is optional. The library never looks for a file on its own; the
//! caller passes the path or the text.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::compiler::{CompileOptions, Compiler};
use crate::dialect::Dialect;

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Compiler configuration.
    pub compiler: CompilerSettings,
}

/// `[compiler]` table.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CompilerSettings {
    /// Target dialect (`tsql`/`sqlserver`/`mssql`, `postgres`, `mysql`,
    /// `sqlite`, `oracle`).
    pub dialect: Dialect,

    /// Ordinal column name used by window pagination.
    pub row_number_alias: String,

    /// Derived-table alias used by window pagination.
    pub wrapper_alias: String,

    /// Override for the dialect's bound-parameter ceiling.
    pub max_parameters: Option<usize>,
}

impl Default for CompilerSettings {
    fn default() -> Self {
        let options = CompileOptions::default();
        Self {
            dialect: Dialect::default(),
            row_number_alias: options.row_number_alias,
            wrapper_alias: options.wrapper_alias,
            max_parameters: options.max_parameters,
        }
    }
}

impl CompilerSettings {
    /// Convert to compile options.
    pub fn options(&self) -> CompileOptions {
        CompileOptions {
            row_number_alias: self.row_number_alias.clone(),
            wrapper_alias: self.wrapper_alias.clone(),
            max_parameters: self.max_parameters,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the compiler cannot use.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let compiler = &self.compiler;
        if compiler.row_number_alias.trim().is_empty() {
            return Err(SettingsError::InvalidConfig(
                "compiler.row_number_alias must not be empty".to_string(),
            ));
        }
        if compiler.wrapper_alias.trim().is_empty() {
            return Err(SettingsError::InvalidConfig(
                "compiler.wrapper_alias must not be empty".to_string(),
            ));
        }
        if compiler.max_parameters == Some(0) {
            return Err(SettingsError::InvalidConfig(
                "compiler.max_parameters must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Build a compiler from these settings.
    pub fn compiler(&self) -> Compiler {
        Compiler::with_options(self.compiler.dialect, self.compiler.options())
    }
}
