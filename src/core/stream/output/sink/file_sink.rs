// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::core::error::CepResult;
use crate::core::stream::output::sink::sink_trait::Sink;

/// Writes alert payloads to a text file.
///
/// `start` creates or truncates the file; every `publish` appends.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn start(&self) -> CepResult<()> {
        std::fs::File::create(&self.path)?;
        Ok(())
    }

    fn publish(&self, payload: &[u8]) -> CepResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(payload)?;
        file.flush()?;
        Ok(())
    }

    fn clone_box(&self) -> Box<dyn Sink> {
        Box::new(self.clone())
    }
}
