// SPDX-License-Identifier: MIT OR Apache-2.0

//! CSV Event Mapper
//!
//! Maps delimited text rows to [`Event`]s by position:
//!
//! | column | field        | parsed as |
//! |--------|--------------|-----------|
//! | 0      | `timestamp`  | integer   |
//! | 1      | `message_id` | integer   |
//! | 2      | `direction`  | `coming` or anything else (`going`) |
//! | 3      | `value`      | decimal   |
//!
//! Extra trailing columns are ignored. The first row is a header by default.

use log::warn;
use std::path::Path;

use super::{split_fields, SourceMapper};
use crate::core::config::InputConfig;
use crate::core::error::{CepError, CepResult};
use crate::core::event::{Direction, Event};

const EVENT_COLUMNS: usize = 4;

#[derive(Debug, Clone)]
pub struct CsvSourceMapper {
    /// CSV delimiter character
    delimiter: char,
    /// Whether the first row is a header (skip it)
    has_header: bool,
    /// Skip malformed rows instead of failing the whole input
    ignore_parse_errors: bool,
    /// Maximum number of fields per row
    max_fields: usize,
}

impl CsvSourceMapper {
    /// Comma delimiter, header row expected
    pub fn new() -> Self {
        Self::from_config(&InputConfig::default())
    }

    pub fn from_config(config: &InputConfig) -> Self {
        Self {
            delimiter: config.delimiter,
            has_header: config.has_header,
            ignore_parse_errors: config.ignore_parse_errors,
            max_fields: config.max_fields,
        }
    }

    pub fn set_delimiter(&mut self, delimiter: char) {
        self.delimiter = delimiter;
    }

    pub fn set_has_header(&mut self, has_header: bool) {
        self.has_header = has_header;
    }

    pub fn set_ignore_parse_errors(&mut self, ignore: bool) {
        self.ignore_parse_errors = ignore;
    }

    pub fn set_max_fields(&mut self, max_fields: usize) {
        self.max_fields = max_fields;
    }

    /// Read and map a whole file
    pub fn map_file(&self, path: impl AsRef<Path>) -> CepResult<Vec<Event>> {
        let bytes = std::fs::read(path.as_ref())?;
        self.map(&bytes)
    }

    fn parse_row(&self, line: &str, line_no: usize) -> CepResult<Event> {
        let fields = split_fields(line, self.delimiter);

        if fields.len() > self.max_fields {
            return Err(CepError::mapping_failed(
                format!(
                    "Field count {} exceeds maximum allowed {}",
                    fields.len(),
                    self.max_fields
                ),
                line_no,
            ));
        }
        if fields.len() < EVENT_COLUMNS {
            return Err(CepError::mapping_failed(
                format!(
                    "Expected at least {} fields (timestamp, message, direction, value), found {}",
                    EVENT_COLUMNS,
                    fields.len()
                ),
                line_no,
            ));
        }

        let timestamp = parse_integer(&fields[0], "timestamp", line_no)?;
        let message_id = parse_integer(&fields[1], "message", line_no)?;
        let direction = Direction::from_field(&fields[2]);
        let value = fields[3].parse::<f64>().map_err(|_| {
            CepError::mapping_failed(format!("value '{}' is not a number", fields[3]), line_no)
        })?;

        Ok(Event::new(timestamp, message_id, direction, value))
    }
}

fn parse_integer(field: &str, name: &str, line_no: usize) -> CepResult<i64> {
    field.parse::<i64>().map_err(|_| {
        CepError::mapping_failed(format!("{} '{}' is not an integer", name, field), line_no)
    })
}

impl Default for CsvSourceMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceMapper for CsvSourceMapper {
    fn map(&self, input: &[u8]) -> CepResult<Vec<Event>> {
        let input_str = std::str::from_utf8(input)
            .map_err(|e| CepError::other(format!("Invalid UTF-8 in CSV input: {}", e)))?;

        let mut events = Vec::new();
        let skip = usize::from(self.has_header);

        for (idx, line) in input_str.lines().enumerate().skip(skip) {
            if line.trim().is_empty() {
                continue;
            }

            let line_no = idx + 1;
            match self.parse_row(line, line_no) {
                Ok(event) => events.push(event),
                Err(e) if self.ignore_parse_errors => {
                    warn!("Skipping malformed row: {}", e);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(events)
    }
}
