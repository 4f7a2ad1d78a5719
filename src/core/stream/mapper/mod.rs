// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Data Mapping
//!
//! Adapters between raw bytes and the engine's typed values.
//!
//! ## Mapper Types
//!
//! - **SourceMapper**: raw delimited text → [`Event`]s
//! - **AlertMapper**: [`Alert`]s → raw bytes for a sink
//!
//! Validation happens here: the engine only ever sees well-typed events.

pub mod alert_mapper;
pub mod csv_mapper;
pub mod series_mapper;

pub use alert_mapper::{mapper_for_format, JsonAlertMapper, TextAlertMapper};
pub use csv_mapper::CsvSourceMapper;
pub use series_mapper::{SeriesCsvMapper, SeriesPoint};

use crate::core::error::CepResult;
use crate::core::event::Event;
use crate::core::pattern::Alert;
use std::fmt::Debug;

/// Maps raw input bytes to events, in input order
pub trait SourceMapper: Debug + Send + Sync {
    /// # Returns
    /// * `Ok(Vec<Event>)` - events in the order they appear in `input`
    /// * `Err(CepError)` - malformed input (unless the mapper is told to skip bad rows)
    fn map(&self, input: &[u8]) -> CepResult<Vec<Event>>;
}

/// Maps emitted alerts to output bytes
pub trait AlertMapper: Debug + Send + Sync {
    fn map(&self, alerts: &[Alert]) -> CepResult<Vec<u8>>;

    fn clone_box(&self) -> Box<dyn AlertMapper>;
}

impl Clone for Box<dyn AlertMapper> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Split one delimited line into trimmed fields, honouring double quotes.
pub(crate) fn split_fields(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current_field = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delimiter && !in_quotes => {
                fields.push(current_field.trim().to_string());
                current_field.clear();
            }
            c => current_field.push(c),
        }
    }

    fields.push(current_field.trim().to_string());
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_fields_quotes_and_trim() {
        assert_eq!(
            split_fields(" 1 ,\"a,b\", coming", ','),
            vec!["1", "a,b", "coming"]
        );
        assert_eq!(split_fields("", ','), vec![""]);
        assert_eq!(split_fields("1|2", '|'), vec!["1", "2"]);
    }
}
