// SPDX-License-Identifier: MIT OR Apache-2.0

pub mod config;
pub mod consumer;
pub mod error;
pub mod event;
pub mod pattern;
pub mod rules;
pub mod stream;

pub use consumer::{Consumer, ConsumerStats};
pub use error::{CepError, CepResult};
pub use event::{Direction, Event};
pub use pattern::{Alert, PatternDetector, Transition};
