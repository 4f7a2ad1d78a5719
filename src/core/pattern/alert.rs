// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::Serialize;
use std::fmt;

/// Immutable, formatted notification produced when a pattern completes a cycle.
///
/// The rendered `message` is the canonical representation; `pattern` and
/// `timestamp` are carried alongside for structured sinks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pattern: String,
    timestamp: i64,
    message: String,
}

impl Alert {
    pub fn new(pattern: impl Into<String>, timestamp: i64, message: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            timestamp,
            message: message.into(),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
