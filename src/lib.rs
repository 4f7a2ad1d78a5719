// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sequential complex-event-processing engine.
//!
//! Events are fed one at a time, in stream order, to a [`core::Consumer`],
//! which dispatches each one to every registered pattern detector and keeps
//! the emitted alerts in an append-only log.
//!
//! ```
//! use dataflow_cep::core::{Consumer, Event};
//!
//! let mut consumer = Consumer::new();
//! consumer.consume_event(&Event::coming(1, 1339, 0.0));
//! consumer.consume_event(&Event::coming(2, 2118, 5.0));
//! consumer.consume_event(&Event::going(3, 1339, 0.0));
//!
//! assert_eq!(
//!     consumer.alerts().last().unwrap().message(),
//!     "[3] ALERT: Pattern A: start: 1 end: 3  count: 1 [message, speed]: [[2118, 5]]"
//! );
//! ```

pub mod core;
