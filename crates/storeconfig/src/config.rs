// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Store configuration.
//!
//! Supports both programmatic and file-based configuration. A configuration
//! file carries output options and extra store descriptions that extend (or
//! override) the built-in registry:
//!
//! ```toml
//! [store]
//! indent_width = 2
//! encoding = "UTF-8"
//! backup = true
//!
//! [[descriptors]]
//! id = "com.example.AuditListener"
//! tag = "Listener"
//! standard = false
//! transient_attributes = ["password"]
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::appender::DEFAULT_INDENT_WIDTH;
use crate::descriptor::StoreDescription;
use crate::registry::StoreRegistry;
use crate::strategy::StrategyKind;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Output options for a store invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreOptions {
    /// Spaces per nesting level.
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,

    /// Encoding named in the XML declaration.
    #[serde(default = "default_encoding")]
    pub encoding: String,

    /// Write the `<?xml ...?>` declaration.
    #[serde(default = "default_true")]
    pub xml_declaration: bool,

    /// Keep a timestamped copy of the file being replaced.
    #[serde(default = "default_true")]
    pub backup: bool,
}

fn default_indent_width() -> usize {
    DEFAULT_INDENT_WIDTH
}

fn default_encoding() -> String {
    "UTF-8".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            indent_width: DEFAULT_INDENT_WIDTH,
            encoding: default_encoding(),
            xml_declaration: true,
            backup: true,
        }
    }
}

impl StoreOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.indent_width > 16 {
            return Err(ConfigError::Invalid(format!(
                "indent_width {} is too large (max 16)",
                self.indent_width
            )));
        }
        if self.encoding.trim().is_empty() {
            return Err(ConfigError::Invalid("encoding must not be empty".into()));
        }
        Ok(())
    }
}

/// Contents of a store configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfigFile {
    /// Output options.
    #[serde(default)]
    pub store: StoreOptions,

    /// Extra descriptions registered on top of the defaults.
    #[serde(default)]
    pub descriptors: Vec<StoreDescription>,
}

impl StoreConfigFile {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.store.validate()?;

        for (i, desc) in self.descriptors.iter().enumerate() {
            if desc.id.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("Descriptor {} has empty id", i)));
            }
            if desc.tag.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "Descriptor {} ({}) has empty tag",
                    i, desc.id
                )));
            }
            if desc.strategy == StrategyKind::StringArray && desc.qualifier.is_none() {
                return Err(ConfigError::Invalid(format!(
                    "Descriptor {} ({}) uses the string-array strategy without a qualifier",
                    i, desc.id
                )));
            }
        }

        Ok(())
    }

    /// Register every extra description on `registry`.
    pub fn apply(&self, registry: &StoreRegistry) {
        for desc in &self.descriptors {
            registry.register(desc.clone());
        }
    }

    /// Sample configuration for `gen-config`.
    pub fn example() -> Self {
        Self {
            store: StoreOptions::default(),
            descriptors: vec![StoreDescription::new("com.example.AuditListener", "Listener")
                .non_standard()
                .transient_attribute("password")],
        }
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
