// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::core::error::{CepError, CepResult};
use crate::core::stream::output::sink::sink_trait::Sink;
use std::sync::{Arc, Mutex};

/// LogSink - Debug sink that logs each alert line through the `log` facade
///
/// Published lines are also kept in `lines` so callers can inspect them.
#[derive(Debug, Clone)]
pub struct LogSink {
    pub lines: Arc<Mutex<Vec<String>>>,
    prefix: String,
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink {
    pub fn new() -> Self {
        Self::with_prefix("[ALERT]")
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            lines: Arc::new(Mutex::new(Vec::new())),
            prefix: prefix.into(),
        }
    }
}

impl Sink for LogSink {
    fn publish(&self, payload: &[u8]) -> CepResult<()> {
        let text = std::str::from_utf8(payload)
            .map_err(|e| CepError::other(format!("LogSink received non UTF-8 payload: {}", e)))?;

        let mut lines = self
            .lines
            .lock()
            .map_err(|_| CepError::other("LogSink line buffer poisoned"))?;
        for line in text.lines() {
            log::info!("{} {}", self.prefix, line);
            lines.push(line.to_string());
        }
        Ok(())
    }

    fn clone_box(&self) -> Box<dyn Sink> {
        Box::new(self.clone())
    }
}
