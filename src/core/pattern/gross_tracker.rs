// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pattern B: cumulative gross-delta tracker.
//!
//! Every `coming` event refreshes the running gross counter from its payload.
//! A reset message going `going` arms the tracker at the current gross; once
//! armed, each secondary trigger going `coming` emits an alert comparing the
//! gross at arming time with the trigger's payload. Growth beyond the
//! threshold disarms the tracker.

use log::debug;

use super::{Alert, PatternDetector, Transition};
use crate::core::event::Event;

pub const PATTERN_B_NAME: &str = "pattern_b";
pub const DEFAULT_RESET_MESSAGE: i64 = 1339;
pub const DEFAULT_TRIGGER_MESSAGE: i64 = 1748;
pub const DEFAULT_GROSS_THRESHOLD: f64 = 50.0;

/// `start_ts` before the first arm cycle.
const UNSET_TS: i64 = 0;

#[derive(Debug, Clone)]
pub struct GrossTrackerPattern {
    reset_message: i64,
    trigger_message: i64,
    gross_threshold: f64,
    armed: bool,
    start_gross: f64,
    current_gross: f64,
    start_ts: i64,
    end_ts: Option<i64>,
}

impl Default for GrossTrackerPattern {
    fn default() -> Self {
        Self::new()
    }
}

impl GrossTrackerPattern {
    pub fn new() -> Self {
        Self::with_messages(
            DEFAULT_RESET_MESSAGE,
            DEFAULT_TRIGGER_MESSAGE,
            DEFAULT_GROSS_THRESHOLD,
        )
    }

    pub fn with_messages(reset_message: i64, trigger_message: i64, gross_threshold: f64) -> Self {
        Self {
            reset_message,
            trigger_message,
            gross_threshold,
            armed: false,
            start_gross: 0.0,
            current_gross: 0.0,
            start_ts: UNSET_TS,
            end_ts: None,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn start_gross(&self) -> f64 {
        self.start_gross
    }

    pub fn current_gross(&self) -> f64 {
        self.current_gross
    }

    pub fn start_ts(&self) -> i64 {
        self.start_ts
    }

    /// Timestamp of the first trigger in the current arm cycle
    pub fn end_ts(&self) -> Option<i64> {
        self.end_ts
    }

    /// Start a new arm cycle at the current gross. Always applies, discarding
    /// any cycle in progress.
    pub fn arm(&mut self, timestamp: i64) -> Transition {
        self.armed = true;
        self.start_gross = self.current_gross;
        self.start_ts = timestamp;
        self.end_ts = None;
        Transition::Applied
    }

    /// Cancel the current arm cycle.
    pub fn disarm(&mut self) -> Transition {
        if !self.armed {
            return Transition::RejectedNoop;
        }
        self.armed = false;
        self.end_ts = None;
        Transition::Applied
    }

    fn delta_exceeded(&self) -> bool {
        self.current_gross - self.start_gross > self.gross_threshold
    }

    fn build_alert(&self, event: &Event, end_ts: i64) -> Alert {
        Alert::new(
            PATTERN_B_NAME,
            event.timestamp,
            format!(
                "[{}] ALERT: Pattern B: start: {} end: {}  gross ({} inactive): {} gross ({} active): {}",
                event.timestamp,
                self.start_ts,
                end_ts,
                self.reset_message,
                self.start_gross,
                self.trigger_message,
                event.value
            ),
        )
    }
}

impl PatternDetector for GrossTrackerPattern {
    fn name(&self) -> &str {
        PATTERN_B_NAME
    }

    fn consume_event(&mut self, event: &Event) -> Option<Alert> {
        if event.is_coming() {
            self.current_gross = event.value;
            if self.armed && self.delta_exceeded() {
                self.disarm();
                debug!(
                    "{}: disarmed at {} (gross {} -> {})",
                    PATTERN_B_NAME, event.timestamp, self.start_gross, self.current_gross
                );
            }
        } else if event.message_id == self.reset_message {
            self.arm(event.timestamp);
            debug!(
                "{}: armed at {} with gross {}",
                PATTERN_B_NAME, event.timestamp, self.start_gross
            );
        }

        if self.armed && event.is_coming() && event.message_id == self.trigger_message {
            let end_ts = *self.end_ts.get_or_insert(event.timestamp);
            return Some(self.build_alert(event, end_ts));
        }

        None
    }
}
