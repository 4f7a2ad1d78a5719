// SPDX-License-Identifier: MIT OR Apache-2.0

pub mod file_sink;
pub mod log_sink;
pub mod sink_trait;

use crate::core::error::CepResult;
use crate::core::pattern::Alert;
use crate::core::stream::mapper::AlertMapper;

pub use file_sink::FileSink;
pub use log_sink::LogSink;
pub use sink_trait::Sink;

/// Connects an [`AlertMapper`] to a [`Sink`]:
///
/// ```text
/// Alerts → AlertMapper::map() → Vec<u8> → Sink::publish() → file / log
/// ```
///
/// Clones share the underlying destination (`Sink::clone_box`).
#[derive(Debug, Clone)]
pub struct AlertPublisher {
    pub sink: Box<dyn Sink>,
    pub mapper: Box<dyn AlertMapper>,
}

impl AlertPublisher {
    pub fn new(sink: Box<dyn Sink>, mapper: Box<dyn AlertMapper>) -> Self {
        Self { sink, mapper }
    }

    /// Start the sink, write every alert in order, then stop it.
    pub fn publish_all(&self, alerts: &[Alert]) -> CepResult<()> {
        self.sink.start()?;
        let payload = self.mapper.map(alerts)?;
        let result = self.sink.publish(&payload);
        self.sink.stop();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::OutputFormat;
    use crate::core::stream::mapper::{mapper_for_format, TextAlertMapper};

    #[test]
    fn test_publisher_routes_through_mapper() {
        let sink = LogSink::new();
        let lines = sink.lines.clone();
        let publisher = AlertPublisher::new(Box::new(sink), Box::new(TextAlertMapper::new()));
        publisher
            .publish_all(&[Alert::new("pattern_a", 1, "a"), Alert::new("pattern_b", 2, "b")])
            .unwrap();
        assert_eq!(*lines.lock().unwrap(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_cloned_publisher_writes_to_same_destination() {
        let sink = LogSink::with_prefix("[A]");
        let lines = sink.lines.clone();
        let publisher = AlertPublisher::new(Box::new(sink), mapper_for_format(OutputFormat::Json));
        let copy = publisher.clone();
        publisher
            .publish_all(&[Alert::new("pattern_a", 1, "first")])
            .unwrap();
        copy.publish_all(&[Alert::new("pattern_b", 2, "second")])
            .unwrap();

        let lines = lines.lock().unwrap();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"first\""));
        assert!(lines[1].contains("\"pattern_b\""));
    }
}
