// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::core::error::CepResult;
use std::fmt::Debug;

/// Destination for mapped alert bytes.
///
/// `publish` may be called several times during a run; payloads must be
/// written in the order received.
pub trait Sink: Debug + Send + Sync {
    /// Prepare the destination (e.g. create or truncate a file)
    fn start(&self) -> CepResult<()> {
        Ok(())
    }

    fn publish(&self, payload: &[u8]) -> CepResult<()>;

    fn stop(&self) {}

    fn clone_box(&self) -> Box<dyn Sink>;
}

impl Clone for Box<dyn Sink> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
