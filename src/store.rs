use crate::error::StoreError;
use crate::results::Snapshot;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Single-file store for crawl snapshots
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the snapshot, failing with [`StoreError::NotFound`] if none was saved
    pub fn load(&self) -> Result<Snapshot, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(self.path.display().to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let snapshot: Snapshot = serde_json::from_reader(BufReader::new(file))?;
        ::log::info!("Loaded {} profiles from {}", snapshot.len(), self.path.display());
        Ok(snapshot)
    }

    /// Replaces the stored snapshot
    pub fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        // Ensure parent directories exist
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, snapshot)?;
        writer.flush()?;

        ::log::info!("Saved {} profiles to {}", snapshot.len(), self.path.display());
        Ok(())
    }
}
