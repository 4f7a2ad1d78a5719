// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Engine Configuration
//!
//! Settings for the pattern detectors and the input/output adapters, resolved
//! from layered sources.
//!
//! ## Configuration Sources (Priority: Low to High)
//!
//! 1. **Default** - Built-in defaults (reproduce the fixed message identifiers)
//! 2. **File** - TOML or YAML configuration file
//! 3. **CommandLine** - CLI flags
//!
//! ## Example
//!
//! ```toml
//! log_level = "info"
//!
//! [pattern_a]
//! bracket_message = 1339
//! trigger_messages = [2118, 4948]
//!
//! [pattern_b]
//! reset_message = 1339
//! trigger_message = 1748
//! gross_threshold = 50
//!
//! [input]
//! delimiter = ","
//! has_header = true
//!
//! [output]
//! format = "json"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::core::error::{CepError, CepResult};
use crate::core::pattern::bracket_counter::{DEFAULT_BRACKET_MESSAGE, DEFAULT_TRIGGER_MESSAGES};
use crate::core::pattern::gross_tracker::{
    DEFAULT_GROSS_THRESHOLD, DEFAULT_RESET_MESSAGE, DEFAULT_TRIGGER_MESSAGE,
};

/// Origin of a resolved setting, with priority ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigSource {
    /// Built-in defaults (priority: 0)
    Default,
    /// Configuration file (priority: 1)
    File,
    /// Command line flags (priority: 2)
    CommandLine,
}

impl ConfigSource {
    #[inline]
    pub const fn priority(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::CommandLine => 2,
        }
    }

    #[inline]
    pub const fn description(&self) -> &'static str {
        match self {
            ConfigSource::Default => "built-in default",
            ConfigSource::File => "configuration file",
            ConfigSource::CommandLine => "command line",
        }
    }
}

/// Log level for the binary's logger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl LogLevel {
    /// Parse log level from string (case-insensitive)
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!(
                "Invalid log level '{}'. Valid values: 'trace', 'debug', 'info', 'warn', 'error'",
                s
            )),
        }
    }

    #[inline]
    pub const fn as_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// Raise verbosity by `steps` levels, saturating at trace
    pub fn raised_by(self, steps: u8) -> Self {
        let ordered = [
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ];
        let current = ordered.iter().position(|l| *l == self).unwrap_or(1);
        ordered[(current + steps as usize).min(ordered.len() - 1)]
    }
}

impl TryFrom<String> for LogLevel {
    type Error = String;

    fn try_from(value: String) -> Result<Self, String> {
        LogLevel::parse(&value)
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.as_str().to_string()
    }
}

/// Alert output encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One rendered alert message per line
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> CepResult<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(CepError::configuration_with_key(
                format!("Unknown output format '{}'. Valid values: 'text', 'json'", other),
                "output.format",
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternAConfig {
    pub bracket_message: i64,
    pub trigger_messages: Vec<i64>,
}

impl Default for PatternAConfig {
    fn default() -> Self {
        Self {
            bracket_message: DEFAULT_BRACKET_MESSAGE,
            trigger_messages: DEFAULT_TRIGGER_MESSAGES.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternBConfig {
    pub reset_message: i64,
    pub trigger_message: i64,
    pub gross_threshold: f64,
}

impl Default for PatternBConfig {
    fn default() -> Self {
        Self {
            reset_message: DEFAULT_RESET_MESSAGE,
            trigger_message: DEFAULT_TRIGGER_MESSAGE,
            gross_threshold: DEFAULT_GROSS_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub delimiter: char,
    pub has_header: bool,
    pub ignore_parse_errors: bool,
    pub max_fields: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            has_header: true,
            ignore_parse_errors: false,
            max_fields: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

const CONFIG_KEYS: [&str; 5] = ["log_level", "pattern_a", "pattern_b", "input", "output"];

/// Top-level keys and one level of `section.field` keys set by a TOML document
fn toml_keys(document: &toml::Table) -> Vec<String> {
    let mut keys = Vec::new();
    for (key, value) in document {
        keys.push(key.clone());
        if let toml::Value::Table(section) = value {
            keys.extend(section.keys().map(|field| format!("{}.{}", key, field)));
        }
    }
    keys
}

fn yaml_keys(document: &serde_yaml::Value) -> Vec<String> {
    let mut keys = Vec::new();
    let Some(mapping) = document.as_mapping() else {
        return keys;
    };
    for (key, value) in mapping {
        let Some(key) = key.as_str() else {
            continue;
        };
        keys.push(key.to_string());
        if let Some(section) = value.as_mapping() {
            keys.extend(
                section
                    .keys()
                    .filter_map(|field| field.as_str())
                    .map(|field| format!("{}.{}", key, field)),
            );
        }
    }
    keys
}

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub log_level: LogLevel,
    pub pattern_a: PatternAConfig,
    pub pattern_b: PatternBConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
    #[serde(skip)]
    sources: HashMap<String, ConfigSource>,
}

impl EngineConfig {
    /// Parse and validate TOML text
    pub fn from_toml_str(text: &str) -> CepResult<Self> {
        let invalid = |e: toml::de::Error| {
            CepError::configuration(format!("Invalid TOML configuration: {}", e))
        };
        let document: toml::Table = toml::from_str(text).map_err(invalid)?;
        let present = toml_keys(&document);
        let mut config: EngineConfig = toml::Value::Table(document).try_into().map_err(invalid)?;
        config.mark_present(present);
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate YAML text
    pub fn from_yaml_str(text: &str) -> CepResult<Self> {
        let invalid = |e: serde_yaml::Error| {
            CepError::configuration(format!("Invalid YAML configuration: {}", e))
        };
        let document: serde_yaml::Value = serde_yaml::from_str(text).map_err(invalid)?;
        if document.is_null() {
            return Ok(Self::default());
        }
        let present = yaml_keys(&document);
        let mut config: EngineConfig = serde_yaml::from_value(document).map_err(invalid)?;
        config.mark_present(present);
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file, choosing the parser by extension
    pub fn load(path: impl AsRef<Path>) -> CepResult<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        let text = std::fs::read_to_string(path)?;

        match extension.as_str() {
            "toml" => Self::from_toml_str(&text),
            "yaml" | "yml" => Self::from_yaml_str(&text),
            other => Err(CepError::configuration(format!(
                "Unsupported configuration file extension '{}' for {}",
                other,
                path.display()
            ))),
        }
    }

    fn mark_present(&mut self, keys: Vec<String>) {
        for key in keys {
            self.mark(&key, ConfigSource::File);
        }
    }

    fn mark(&mut self, key: &str, source: ConfigSource) {
        let current = self.source_of(key);
        if source.priority() >= current.priority() {
            self.sources.insert(key.to_string(), source);
        }
    }

    /// Where a setting was last resolved from. Keys are section names
    /// (`pattern_b`) or dotted fields (`pattern_b.gross_threshold`).
    pub fn source_of(&self, key: &str) -> ConfigSource {
        self.sources
            .get(key)
            .copied()
            .unwrap_or(ConfigSource::Default)
    }

    /// Source of every top-level setting, in declaration order
    pub fn resolved_sources(&self) -> Vec<(&'static str, ConfigSource)> {
        CONFIG_KEYS
            .iter()
            .map(|key| (*key, self.source_of(key)))
            .collect()
    }

    /// Override the log level from the command line
    pub fn set_log_level(&mut self, level: LogLevel) {
        self.log_level = level;
        self.mark("log_level", ConfigSource::CommandLine);
    }

    /// Override the output format from the command line
    pub fn set_output_format(&mut self, format: OutputFormat) {
        self.output.format = format;
        self.mark("output", ConfigSource::CommandLine);
        self.mark("output.format", ConfigSource::CommandLine);
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> CepResult<()> {
        if self.pattern_a.trigger_messages.is_empty() {
            return Err(CepError::configuration_with_key(
                "At least one trigger message is required",
                "pattern_a.trigger_messages",
            ));
        }
        if self
            .pattern_a
            .trigger_messages
            .contains(&self.pattern_a.bracket_message)
        {
            return Err(CepError::configuration_with_key(
                format!(
                    "Bracket message {} cannot also be a trigger message",
                    self.pattern_a.bracket_message
                ),
                "pattern_a.trigger_messages",
            ));
        }
        if !self.pattern_b.gross_threshold.is_finite() || self.pattern_b.gross_threshold < 0.0 {
            return Err(CepError::configuration_with_key(
                format!(
                    "Gross threshold must be a non-negative number, got {}",
                    self.pattern_b.gross_threshold
                ),
                "pattern_b.gross_threshold",
            ));
        }
        if self.input.max_fields < 4 {
            return Err(CepError::configuration_with_key(
                format!(
                    "max_fields must allow the four event columns, got {}",
                    self.input.max_fields
                ),
                "input.max_fields",
            ));
        }
        Ok(())
    }
}
