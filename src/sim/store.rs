//! Results store: an append-only file of `bincode` records.
//!
//! Records are written back to back with no framing. A batch interrupted
//! mid-write leaves a truncated last record; reading stops there, so the
//! batch resumes from the last complete summary.

use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};

use super::summary::SimulationSummary;

/// Error reading or writing the results store.
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Encoding(bincode::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "results store I/O error: {e}"),
            StoreError::Encoding(e) => write!(f, "results store encoding error: {e}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Encoding(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<bincode::Error> for StoreError {
    fn from(e: bincode::Error) -> Self {
        StoreError::Encoding(e)
    }
}

/// Append-only store of simulation summaries.
#[derive(Clone, Debug)]
pub struct ResultStore {
    path: PathBuf,
}

impl ResultStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every complete record. A missing file is an empty store.
    pub fn load(&self) -> Result<Vec<SimulationSummary>, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut reader = BufReader::new(file);
        let mut summaries = Vec::new();
        loop {
            match bincode::deserialize_from::<_, SimulationSummary>(&mut reader) {
                Ok(summary) => summaries.push(summary),
                Err(e) => {
                    if let bincode::ErrorKind::Io(io) = e.as_ref() {
                        if io.kind() == ErrorKind::UnexpectedEof {
                            break;
                        }
                    }
                    return Err(e.into());
                }
            }
        }
        debug!("loaded {} summaries from {}", summaries.len(), self.path.display());
        Ok(summaries)
    }

    /// Append records to the end of the store, creating it if needed.
    pub fn append(&self, summaries: &[SimulationSummary]) -> Result<(), StoreError> {
        if summaries.is_empty() {
            return Ok(());
        }
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        let mut writer = BufWriter::new(file);
        for summary in summaries {
            bincode::serialize_into(&mut writer, summary)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Delete the store.
    pub fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => {
                warn!("cannot remove {}: {}", self.path.display(), e);
                Err(e.into())
            }
        }
    }
}
