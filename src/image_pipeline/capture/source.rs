use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Capture was cancelled")]
    Cancelled,

    #[error("Capture failed: {0}")]
    Failed(String),
}

/// Platform camera interface.
///
/// Given a destination, writes the photo there and hands back the location of
/// the written data.
pub trait CaptureSource {
    fn capture(&self, destination: &Path) -> Result<PathBuf, CaptureError>;
}

/// Camera stand-in that "captures" by copying an existing image file.
pub struct FileCapture {
    source: PathBuf,
}

impl FileCapture {
    pub fn new<P: Into<PathBuf>>(source: P) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }
}

impl CaptureSource for FileCapture {
    fn capture(&self, destination: &Path) -> Result<PathBuf, CaptureError> {
        debug!(
            source = %self.source.display(),
            destination = %destination.display(),
            "capturing from file"
        );
        std::fs::copy(&self.source, destination).map_err(|e| {
            warn!(error = %e, "file capture failed");
            CaptureError::Failed(format!("{}: {}", self.source.display(), e))
        })?;
        Ok(destination.to_path_buf())
    }
}
