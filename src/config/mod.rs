//! Configuration module for sqlpress.
//!
//! Compiler defaults can be kept in a TOML file instead of being wired up in
//! code.

mod settings;

pub use settings::{CompilerSettings, Settings, SettingsError};
