// SPDX-License-Identifier: MIT OR Apache-2.0

//! Numeric series mapper for the statistical rule checker.
//!
//! Rows are `timestamp,value[,...]`; both columns are read as decimals.

use std::path::Path;

use super::split_fields;
use crate::core::error::{CepError, CepResult};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub timestamp: f64,
    pub value: f64,
}

#[derive(Debug, Clone)]
pub struct SeriesCsvMapper {
    delimiter: char,
    has_header: bool,
}

impl Default for SeriesCsvMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl SeriesCsvMapper {
    pub fn new() -> Self {
        Self {
            delimiter: ',',
            has_header: true,
        }
    }

    pub fn set_delimiter(&mut self, delimiter: char) {
        self.delimiter = delimiter;
    }

    pub fn set_has_header(&mut self, has_header: bool) {
        self.has_header = has_header;
    }

    pub fn map_file(&self, path: impl AsRef<Path>) -> CepResult<Vec<SeriesPoint>> {
        let text = std::fs::read_to_string(path.as_ref())?;
        self.map_str(&text)
    }

    pub fn map_str(&self, input: &str) -> CepResult<Vec<SeriesPoint>> {
        let skip = usize::from(self.has_header);
        let mut points = Vec::new();

        for (idx, line) in input.lines().enumerate().skip(skip) {
            if line.trim().is_empty() {
                continue;
            }
            let line_no = idx + 1;
            let fields = split_fields(line, self.delimiter);
            if fields.len() < 2 {
                return Err(CepError::mapping_failed(
                    format!("Expected timestamp and value, found {} field(s)", fields.len()),
                    line_no,
                ));
            }
            let parse = |field: &str, name: &str| {
                field.parse::<f64>().map_err(|_| {
                    CepError::mapping_failed(format!("{} '{}' is not a number", name, field), line_no)
                })
            };
            points.push(SeriesPoint {
                timestamp: parse(fields[0].as_str(), "timestamp")?,
                value: parse(fields[1].as_str(), "value")?,
            });
        }

        Ok(points)
    }
}
