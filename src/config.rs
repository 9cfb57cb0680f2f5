//!
//! This module defines configuration structures and loading logic for mdlite.
//! Configuration lives in a TOML file with a `[global]` table and one table per rule.

use crate::types::OffsetEncoding;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File names searched for during config discovery, in priority order
pub const CONFIG_FILE_NAMES: &[&str] = &[".mdlite.toml", "mdlite.toml"];

/// Normalizes configuration keys (rule names, option names) to lowercase kebab-case.
pub fn normalize_key(key: &str) -> String {
    key.trim().replace('_', "-").to_ascii_lowercase()
}

/// Represents a rule-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, schemars::JsonSchema)]
pub struct RuleConfig {
    /// Configuration values for the rule
    #[serde(flatten)]
    #[schemars(schema_with = "arbitrary_value_schema")]
    pub values: BTreeMap<String, toml::Value>,
}

/// Generate a JSON schema for arbitrary configuration values
fn arbitrary_value_schema(_gen: &mut schemars::SchemaGenerator) -> schemars::Schema {
    schemars::json_schema!({
        "type": "object",
        "additionalProperties": true
    })
}

/// Represents the complete configuration loaded from .mdlite.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, schemars::JsonSchema)]
#[schemars(
    description = "mdlite configuration. Rules can be configured individually using [rule-name] sections with rule-specific options."
)]
pub struct Config {
    /// Global configuration options
    #[serde(default)]
    pub global: GlobalConfig,

    /// Rule-specific configurations (e.g., trailing-spaces, blank-lines)
    ///
    /// - trailing-spaces: min-spaces
    /// - blank-lines: maximum, mode ("repeat" or "merge")
    #[serde(flatten)]
    pub rules: BTreeMap<String, RuleConfig>,
}

impl Config {
    /// Parse a configuration from TOML text, normalizing rule section names
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.rules = std::mem::take(&mut config.rules)
            .into_iter()
            .map(|(name, section)| (normalize_key(&name), section))
            .collect();
        config.global.enable = config.global.enable.iter().map(|r| normalize_key(r)).collect();
        config.global.disable = config.global.disable.iter().map(|r| normalize_key(r)).collect();
        Ok(config)
    }

    /// Load a configuration file from an explicit path
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            source,
            path: path.display().to_string(),
        })?;
        let config = Self::from_toml_str(&content)?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Search `start_dir` and its ancestors for a config file
    pub fn discover(start_dir: &Path) -> Option<PathBuf> {
        let mut current = Some(start_dir);
        while let Some(dir) = current {
            for name in CONFIG_FILE_NAMES {
                let candidate = dir.join(name);
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
            current = dir.parent();
        }
        None
    }

    /// Load the explicit config if given, else the discovered one, else defaults
    pub fn load_or_discover(explicit: Option<&Path>, start_dir: &Path) -> Result<(Self, Option<PathBuf>), ConfigError> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }
        match Self::discover(start_dir) {
            Some(path) => Ok((Self::load(&path)?, Some(path))),
            None => Ok((Self::default(), None)),
        }
    }

    /// Names of rule sections and enable/disable entries that match no known rule
    pub fn unknown_rule_names(&self, known: &[&str]) -> Vec<String> {
        let mut unknown: Vec<String> = self
            .rules
            .keys()
            .chain(self.global.enable.iter())
            .chain(self.global.disable.iter())
            .filter(|name| name.as_str() != "all" && !known.contains(&name.as_str()))
            .cloned()
            .collect();
        unknown.sort();
        unknown.dedup();
        unknown
    }

    /// Offset encoding for public ranges
    pub fn offset_encoding(&self) -> OffsetEncoding {
        self.global.offset_encoding
    }
}

/// Global configuration options
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default, schemars::JsonSchema)]
#[serde(default, rename_all = "kebab-case")]
pub struct GlobalConfig {
    /// Enabled rules; when non-empty only these rules run
    #[serde(default)]
    pub enable: Vec<String>,

    /// Disabled rules
    #[serde(default)]
    pub disable: Vec<String>,

    /// Unit of the offsets reported to callers ("utf16" or "utf8")
    #[serde(default, alias = "offset_encoding")]
    pub offset_encoding: OffsetEncoding,
}

/// Create a default configuration file at the specified path
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Err(ConfigError::FileExists {
            path: path.display().to_string(),
        });
    }

    let default_config = r#"# mdlite configuration file

[global]
# Rules to disable (uncomment and modify as needed)
# disable = ["trailing-spaces"]

# Rules to enable exclusively (if provided, only these rules will run)
# enable = ["heading-format", "blockquote-format"]

# Unit of reported offsets: "utf16" (editor text fields) or "utf8" (bytes)
offset-encoding = "utf16"

# [trailing-spaces]
# min-spaces = 3  # Number of trailing whitespace characters that count as an issue

# [blank-lines]
# maximum = 1       # Blank lines allowed in a row
# mode = "repeat"   # "repeat": one issue per extra blank line, "merge": one issue per run
"#;

    fs::write(path, default_config).map_err(|source| ConfigError::IoError {
        source,
        path: path.display().to_string(),
    })
}

/// Errors that can occur when loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read config file at {path}: {source}")]
    IoError { source: io::Error, path: String },

    /// Failed to parse the configuration content
    #[error("Failed to parse config: {0}")]
    ParseError(String),

    /// Configuration file already exists
    #[error("Configuration file already exists at {path}")]
    FileExists { path: String },
}
