// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;

/// Signal edge carried by an event: the signal is becoming active or inactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Coming,
    Going,
}

impl Direction {
    /// Parse the textual direction column. Only `coming` marks a rising edge;
    /// every other token is treated as `Going`.
    pub fn from_field(field: &str) -> Self {
        if field.trim() == "coming" {
            Direction::Coming
        } else {
            Direction::Going
        }
    }

    #[inline]
    pub const fn is_coming(&self) -> bool {
        matches!(self, Direction::Coming)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Coming => f.write_str("coming"),
            Direction::Going => f.write_str("going"),
        }
    }
}

/// A single immutable record of the input stream.
///
/// `timestamp` is expected to be non-decreasing across a stream; the engine
/// relies on the caller for ordering and never re-sorts.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub timestamp: i64,
    pub message_id: i64,
    pub direction: Direction,
    pub value: f64,
}

impl Event {
    pub fn new(timestamp: i64, message_id: i64, direction: Direction, value: f64) -> Self {
        Self {
            timestamp,
            message_id,
            direction,
            value,
        }
    }

    /// Shorthand for a rising-edge event
    pub fn coming(timestamp: i64, message_id: i64, value: f64) -> Self {
        Self::new(timestamp, message_id, Direction::Coming, value)
    }

    /// Shorthand for a falling-edge event
    pub fn going(timestamp: i64, message_id: i64, value: f64) -> Self {
        Self::new(timestamp, message_id, Direction::Going, value)
    }

    #[inline]
    pub fn is_coming(&self) -> bool {
        self.direction.is_coming()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from_field() {
        assert_eq!(Direction::from_field("coming"), Direction::Coming);
        assert_eq!(Direction::from_field(" coming "), Direction::Coming);
        assert_eq!(Direction::from_field("going"), Direction::Going);
        assert_eq!(Direction::from_field("Coming"), Direction::Going);
        assert_eq!(Direction::from_field(""), Direction::Going);
    }

    #[test]
    fn test_event_constructors() {
        let e = Event::coming(10, 2118, 5.0);
        assert!(e.is_coming());
        assert_eq!(e.message_id, 2118);
        assert!(!Event::going(11, 1339, 0.0).is_coming());
    }
}
