// SPDX-License-Identifier: MIT OR Apache-2.0

//! Alert output mappers.
//!
//! - [`TextAlertMapper`]: the rendered alert message, one per line
//! - [`JsonAlertMapper`]: one JSON object per line (`pattern`, `timestamp`, `message`)

use super::AlertMapper;
use crate::core::config::OutputFormat;
use crate::core::error::{CepError, CepResult};
use crate::core::pattern::Alert;

#[derive(Debug, Clone, Default)]
pub struct TextAlertMapper;

impl TextAlertMapper {
    pub fn new() -> Self {
        Self
    }
}

impl AlertMapper for TextAlertMapper {
    fn map(&self, alerts: &[Alert]) -> CepResult<Vec<u8>> {
        let mut output = String::new();
        for alert in alerts {
            output.push_str(alert.message());
            output.push('\n');
        }
        Ok(output.into_bytes())
    }

    fn clone_box(&self) -> Box<dyn AlertMapper> {
        Box::new(self.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct JsonAlertMapper;

impl JsonAlertMapper {
    pub fn new() -> Self {
        Self
    }
}

impl AlertMapper for JsonAlertMapper {
    fn map(&self, alerts: &[Alert]) -> CepResult<Vec<u8>> {
        let mut output = Vec::new();
        for alert in alerts {
            serde_json::to_writer(&mut output, alert)
                .map_err(|e| CepError::serialization(format!("Failed to encode alert: {}", e)))?;
            output.push(b'\n');
        }
        Ok(output)
    }

    fn clone_box(&self) -> Box<dyn AlertMapper> {
        Box::new(self.clone())
    }
}

/// Mapper for a configured output format
pub fn mapper_for_format(format: OutputFormat) -> Box<dyn AlertMapper> {
    match format {
        OutputFormat::Text => Box::new(TextAlertMapper::new()),
        OutputFormat::Json => Box::new(JsonAlertMapper::new()),
    }
}
