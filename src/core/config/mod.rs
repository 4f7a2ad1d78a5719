// SPDX-License-Identifier: MIT OR Apache-2.0

pub mod engine_config;

pub use engine_config::{
    ConfigSource, EngineConfig, InputConfig, LogLevel, OutputConfig, OutputFormat,
    PatternAConfig, PatternBConfig,
};
