// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pattern A: bracketed activity counter.
//!
//! A bracket message going `coming` opens a window and going `going` closes
//! it. While the window is open, every trigger message going `coming` is
//! recorded and re-evaluates the running alert; closing the window emits a
//! final alert and clears it.

use log::debug;

use super::{Alert, PatternDetector, Transition};
use crate::core::event::Event;

pub const PATTERN_A_NAME: &str = "pattern_a";
pub const DEFAULT_BRACKET_MESSAGE: i64 = 1339;
pub const DEFAULT_TRIGGER_MESSAGES: [i64; 2] = [2118, 4948];

/// Reported as `end` while the window is still open.
pub const UNSET_END: i64 = -1;

#[derive(Debug, Clone)]
pub struct BracketCounterPattern {
    bracket_message: i64,
    trigger_messages: Vec<i64>,
    active: bool,
    /// Opening bracket, recorded triggers and (transiently) the closing bracket
    window: Vec<Event>,
}

impl Default for BracketCounterPattern {
    fn default() -> Self {
        Self::new()
    }
}

impl BracketCounterPattern {
    pub fn new() -> Self {
        Self::with_messages(DEFAULT_BRACKET_MESSAGE, DEFAULT_TRIGGER_MESSAGES.to_vec())
    }

    pub fn with_messages(bracket_message: i64, trigger_messages: Vec<i64>) -> Self {
        Self {
            bracket_message,
            trigger_messages,
            active: false,
            window: Vec::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn bracket_message(&self) -> i64 {
        self.bracket_message
    }

    pub fn trigger_messages(&self) -> &[i64] {
        &self.trigger_messages
    }

    /// Open the window. Rejected when it is already open.
    pub fn activate(&mut self) -> Transition {
        if self.active {
            return Transition::RejectedDuplicate;
        }
        self.active = true;
        Transition::Applied
    }

    /// Close the window. Rejected when nothing is open.
    pub fn deactivate(&mut self) -> Transition {
        if !self.active {
            return Transition::RejectedNoop;
        }
        self.active = false;
        Transition::Applied
    }

    fn is_trigger(&self, message_id: i64) -> bool {
        self.trigger_messages.contains(&message_id)
    }

    fn record(&mut self, event: &Event) -> Option<Alert> {
        self.window.push(event.clone());
        let alert = self.evaluate();
        if !self.active {
            self.window.clear();
        }
        alert
    }

    fn evaluate(&self) -> Option<Alert> {
        let (first, rest) = self.window.split_first()?;
        let start = first.timestamp;

        // The event that caused this evaluation, which may be the closing bracket.
        let last = rest.last()?;
        let timestamp = last.timestamp;
        let (end, relevant) = if last.message_id == self.bracket_message {
            (last.timestamp, &rest[..rest.len() - 1])
        } else {
            (UNSET_END, rest)
        };

        if relevant.is_empty() {
            return None;
        }

        let listed = relevant
            .iter()
            .map(|e| format!("[{}, {}]", e.message_id, e.value))
            .collect::<Vec<_>>()
            .join(", ");

        Some(Alert::new(
            PATTERN_A_NAME,
            timestamp,
            format!(
                "[{}] ALERT: Pattern A: start: {} end: {}  count: {} [message, speed]: [{}]",
                timestamp,
                start,
                end,
                relevant.len(),
                listed
            ),
        ))
    }
}

impl PatternDetector for BracketCounterPattern {
    fn name(&self) -> &str {
        PATTERN_A_NAME
    }

    fn consume_event(&mut self, event: &Event) -> Option<Alert> {
        if event.message_id == self.bracket_message {
            let transition = if event.is_coming() {
                self.activate()
            } else {
                self.deactivate()
            };
            if !transition.is_applied() {
                debug!(
                    "{}: ignored bracket {} {} at {} ({:?})",
                    PATTERN_A_NAME, event.message_id, event.direction, event.timestamp, transition
                );
                return None;
            }
            return self.record(event);
        }

        if self.active && event.is_coming() && self.is_trigger(event.message_id) {
            return self.record(event);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(pattern: &mut BracketCounterPattern, events: &[Event]) -> Vec<Alert> {
        events
            .iter()
            .filter_map(|e| pattern.consume_event(e))
            .collect()
    }

    #[test]
    fn test_activation_guards() {
        let mut p = BracketCounterPattern::new();
        assert_eq!(p.deactivate(), Transition::RejectedNoop);
        assert_eq!(p.activate(), Transition::Applied);
        assert_eq!(p.activate(), Transition::RejectedDuplicate);
        assert!(p.is_active());
        assert_eq!(p.deactivate(), Transition::Applied);
        assert!(!p.is_active());
    }

    #[test]
    fn test_opening_bracket_alone_emits_nothing() {
        let mut p = BracketCounterPattern::new();
        assert!(p.consume_event(&Event::coming(1, 1339, 0.0)).is_none());
        assert_eq!(p.window.len(), 1);
    }

    #[test]
    fn test_running_alert_then_closing_alert() {
        let mut p = BracketCounterPattern::new();
        let alerts = feed(
            &mut p,
            &[
                Event::coming(1, 1339, 0.0),
                Event::coming(2, 2118, 5.0),
                Event::going(3, 1339, 0.0),
            ],
        );
        assert_eq!(alerts.len(), 2);
        assert_eq!(
            alerts[0].message(),
            "[2] ALERT: Pattern A: start: 1 end: -1  count: 1 [message, speed]: [[2118, 5]]"
        );
        assert_eq!(
            alerts[1].message(),
            "[3] ALERT: Pattern A: start: 1 end: 3  count: 1 [message, speed]: [[2118, 5]]"
        );
        assert!(p.window.is_empty());
        assert!(!p.is_active());
    }

    #[test]
    fn test_running_alert_is_cumulative() {
        let mut p = BracketCounterPattern::new();
        let alerts = feed(
            &mut p,
            &[
                Event::coming(10, 1339, 0.0),
                Event::coming(11, 2118, 5.0),
                Event::coming(12, 4948, 7.5),
            ],
        );
        assert_eq!(alerts.len(), 2);
        assert_eq!(
            alerts[1].message(),
            "[12] ALERT: Pattern A: start: 10 end: -1  count: 2 [message, speed]: [[2118, 5], [4948, 7.5]]"
        );
        assert_eq!(alerts[1].timestamp(), 12);
    }

    #[test]
    fn test_duplicate_activation_leaves_window_untouched() {
        let mut p = BracketCounterPattern::new();
        p.consume_event(&Event::coming(1, 1339, 0.0));
        p.consume_event(&Event::coming(2, 2118, 3.0));
        let before = p.window.clone();
        assert!(p.consume_event(&Event::coming(3, 1339, 0.0)).is_none());
        assert_eq!(p.window, before);
        assert!(p.is_active());
    }

    #[test]
    fn test_triggers_ignored_outside_window_and_when_going() {
        let mut p = BracketCounterPattern::new();
        assert!(p.consume_event(&Event::coming(1, 2118, 5.0)).is_none());
        p.consume_event(&Event::coming(2, 1339, 0.0));
        assert!(p.consume_event(&Event::going(3, 2118, 5.0)).is_none());
        assert!(p.consume_event(&Event::coming(4, 9999, 5.0)).is_none());
        assert_eq!(p.window.len(), 1);
    }

    #[test]
    fn test_empty_window_close_emits_nothing() {
        let mut p = BracketCounterPattern::new();
        let alerts = feed(
            &mut p,
            &[Event::coming(1, 1339, 0.0), Event::going(2, 1339, 0.0)],
        );
        assert!(alerts.is_empty());
        assert!(p.window.is_empty());
    }

    #[test]
    fn test_custom_messages() {
        let mut p = BracketCounterPattern::with_messages(7, vec![8]);
        p.consume_event(&Event::coming(1, 7, 0.0));
        assert!(p.consume_event(&Event::coming(2, 2118, 1.0)).is_none());
        let alert = p.consume_event(&Event::coming(3, 8, 1.0)).unwrap();
        assert!(alert.message().contains("[[8, 1]]"));
    }
}
