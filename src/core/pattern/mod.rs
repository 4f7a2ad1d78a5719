// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Pattern Detection
//!
//! Each detector is a small private state machine that consumes one event at a
//! time and may emit a single [`Alert`] in response.
//!
//! ## Detectors
//!
//! - [`BracketCounterPattern`] (Pattern A): counts trigger messages inside a
//!   window opened and closed by a bracket message.
//! - [`GrossTrackerPattern`] (Pattern B): tracks the cumulative gross counter
//!   from a reset message up to a secondary trigger.
//!
//! Detectors never share state. Every [`crate::core::consumer::Consumer`] owns
//! freshly constructed instances, so independent streams cannot interfere.

pub mod alert;
pub mod bracket_counter;
pub mod gross_tracker;

pub use alert::Alert;
pub use bracket_counter::BracketCounterPattern;
pub use gross_tracker::GrossTrackerPattern;

use crate::core::event::Event;
use std::fmt::Debug;

/// Capability implemented by every pattern variant.
pub trait PatternDetector: Debug + Send {
    /// Stable name used in logs and structured output
    fn name(&self) -> &str;

    /// Feed one event in stream order.
    ///
    /// Returns `Some(alert)` when this event completes (or refreshes) a match.
    /// Invalid transitions are swallowed here and never abort the pass.
    fn consume_event(&mut self, event: &Event) -> Option<Alert>;
}

/// Outcome of a guarded state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The transition took effect
    Applied,
    /// The pattern was already in the target state (e.g. second activation)
    RejectedDuplicate,
    /// The transition had nothing to act on (e.g. deactivating an idle pattern)
    RejectedNoop,
}

impl Transition {
    #[inline]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Transition::Applied)
    }
}
