// SPDX-License-Identifier: MIT OR Apache-2.0

//! Statistical rule checks over a flat numeric series. Independent of the
//! pattern engine: no state is shared with [`crate::core::consumer`].

pub mod nelson;

pub use nelson::{check_all, render_report, Baseline, NelsonReport, DEFAULT_BASELINE};
