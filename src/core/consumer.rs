// SPDX-License-Identifier: MIT OR Apache-2.0

//! Event dispatcher: fans each event out to every registered pattern in a
//! fixed order and appends their alerts to an append-only log.

use log::{info, trace};

use crate::core::config::EngineConfig;
use crate::core::error::CepResult;
use crate::core::event::Event;
use crate::core::pattern::{Alert, BracketCounterPattern, GrossTrackerPattern, PatternDetector};

/// Counters describing a single pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsumerStats {
    pub events_processed: u64,
    pub alerts_emitted: u64,
}

/// Owns its pattern detectors and the alert log of one event stream.
///
/// Construct one `Consumer` per stream: detectors are instance-scoped and are
/// never shared between consumers.
#[derive(Debug)]
pub struct Consumer {
    patterns: Vec<Box<dyn PatternDetector>>,
    alerts: Vec<Alert>,
    stats: ConsumerStats,
}

impl Default for Consumer {
    fn default() -> Self {
        Self::new()
    }
}

impl Consumer {
    /// Pattern A followed by Pattern B, with the default message identifiers
    pub fn new() -> Self {
        Self::with_patterns(vec![
            Box::new(BracketCounterPattern::new()),
            Box::new(GrossTrackerPattern::new()),
        ])
    }

    /// Pattern A followed by Pattern B, with configured message identifiers.
    /// Fails if `config` does not pass [`EngineConfig::validate`].
    pub fn from_config(config: &EngineConfig) -> CepResult<Self> {
        config.validate()?;
        let a = &config.pattern_a;
        let b = &config.pattern_b;
        Ok(Self::with_patterns(vec![
            Box::new(BracketCounterPattern::with_messages(
                a.bracket_message,
                a.trigger_messages.clone(),
            )),
            Box::new(GrossTrackerPattern::with_messages(
                b.reset_message,
                b.trigger_message,
                b.gross_threshold,
            )),
        ]))
    }

    pub fn with_patterns(patterns: Vec<Box<dyn PatternDetector>>) -> Self {
        Self {
            patterns,
            alerts: Vec::new(),
            stats: ConsumerStats::default(),
        }
    }

    /// Append a detector; it sees events after the ones already registered.
    pub fn register(&mut self, pattern: Box<dyn PatternDetector>) {
        self.patterns.push(pattern);
    }

    pub fn pattern_names(&self) -> Vec<&str> {
        self.patterns.iter().map(|p| p.name()).collect()
    }

    /// Dispatch one event to every pattern. Returns the number of alerts it produced.
    pub fn consume_event(&mut self, event: &Event) -> usize {
        self.stats.events_processed += 1;
        let mut emitted = 0;
        for pattern in self.patterns.iter_mut() {
            if let Some(alert) = pattern.consume_event(event) {
                trace!("{} -> {}", pattern.name(), alert);
                self.alerts.push(alert);
                emitted += 1;
            }
        }
        self.stats.alerts_emitted += emitted as u64;
        emitted
    }

    /// Run a whole ordered stream through the dispatcher.
    pub fn consume_all<'a, I>(&mut self, events: I) -> usize
    where
        I: IntoIterator<Item = &'a Event>,
    {
        let emitted: usize = events.into_iter().map(|e| self.consume_event(e)).sum();
        info!(
            "Processed {} events, {} alerts emitted",
            self.stats.events_processed, self.stats.alerts_emitted
        );
        emitted
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn into_alerts(self) -> Vec<Alert> {
        self.alerts
    }

    pub fn stats(&self) -> ConsumerStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Emits an alert for every event whose id matches
    #[derive(Debug)]
    struct EchoPattern(i64);

    impl PatternDetector for EchoPattern {
        fn name(&self) -> &str {
            "echo"
        }

        fn consume_event(&mut self, event: &Event) -> Option<Alert> {
            (event.message_id == self.0)
                .then(|| Alert::new("echo", event.timestamp, format!("echo {}", event.timestamp)))
        }
    }

    #[test]
    fn test_default_pattern_order() {
        let consumer = Consumer::new();
        assert_eq!(consumer.pattern_names(), vec!["pattern_a", "pattern_b"]);
    }

    #[test]
    fn test_alerts_interleave_in_event_order() {
        let mut consumer = Consumer::with_patterns(vec![Box::new(EchoPattern(1))]);
        consumer.register(Box::new(EchoPattern(2)));
        let events = [
            Event::coming(1, 2, 0.0),
            Event::coming(2, 1, 0.0),
            Event::coming(3, 3, 0.0),
        ];
        assert_eq!(consumer.consume_all(events.iter()), 2);
        let messages: Vec<_> = consumer.alerts().iter().map(|a| a.message()).collect();
        assert_eq!(messages, vec!["echo 1", "echo 2"]);
        assert_eq!(
            consumer.stats(),
            ConsumerStats {
                events_processed: 3,
                alerts_emitted: 2
            }
        );
    }

    #[test]
    fn test_silent_event_leaves_log_unchanged() {
        let mut consumer = Consumer::new();
        consumer.consume_event(&Event::coming(1, 1339, 0.0));
        consumer.consume_event(&Event::coming(2, 2118, 5.0));
        let before = consumer.alerts().to_vec();
        assert_eq!(consumer.consume_event(&Event::coming(3, 9999, 5.0)), 0);
        assert_eq!(consumer.alerts(), before.as_slice());
    }

    #[test]
    fn test_consumers_do_not_share_state() {
        let mut first = Consumer::new();
        let mut second = Consumer::new();
        first.consume_event(&Event::coming(1, 1339, 0.0));
        first.consume_event(&Event::coming(2, 2118, 5.0));
        assert_eq!(first.alerts().len(), 1);

        assert_eq!(second.consume_event(&Event::coming(2, 2118, 5.0)), 0);
        assert!(second.alerts().is_empty());
    }

    #[test]
    fn test_from_config_uses_configured_ids() {
        let mut config = EngineConfig::default();
        config.pattern_b.reset_message = 7;
        config.pattern_b.trigger_message = 8;
        let mut consumer = Consumer::from_config(&config).unwrap();
        consumer.consume_event(&Event::going(1, 7, 0.0));
        consumer.consume_event(&Event::coming(2, 8, 3.0));
        assert_eq!(
            consumer.alerts()[0].message(),
            "[2] ALERT: Pattern B: start: 1 end: 2  gross (7 inactive): 0 gross (8 active): 3"
        );
    }

    #[test]
    fn test_from_config_rejects_invalid_config() {
        let mut config = EngineConfig::default();
        config.pattern_a.trigger_messages = vec![config.pattern_a.bracket_message];
        assert!(matches!(
            Consumer::from_config(&config),
            Err(crate::core::error::CepError::Configuration { .. })
        ));
    }
}
