//! Snapshot storage
//!
//! Directory structure:
//! ~/.cashcast/
//!   cashcast.log
//!   snapshots/
//!     baseline.json
//!     with-car.json

use std::fs;
use std::path::{Path, PathBuf};

use cashcast_core::CastSnapshot;

use crate::config::PlanFile;
use crate::util::io::atomic_write;

const SNAPSHOT_EXT: &str = "json";

/// Error types for storage operations
#[derive(Debug)]
pub enum StorageError {
    Io(String),
    Parse(String),
    Serialize(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(msg) => write!(f, "IO error: {}", msg),
            StorageError::Parse(msg) => write!(f, "Parse error: {}", msg),
            StorageError::Serialize(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

/// Read a YAML plan file
pub fn load_plan(path: &Path) -> Result<PlanFile, StorageError> {
    let content = fs::read_to_string(path)
        .map_err(|e| StorageError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

    serde_saphyr::from_str(&content)
        .map_err(|e| StorageError::Parse(format!("Failed to parse plan: {}", e)))
}

pub fn load_snapshot(path: &Path) -> Result<CastSnapshot, StorageError> {
    let content = fs::read_to_string(path)
        .map_err(|e| StorageError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

    serde_json::from_str(&content)
        .map_err(|e| StorageError::Parse(format!("Failed to parse snapshot: {}", e)))
}

/// Write a snapshot as pretty JSON, replacing any existing file atomically
pub fn save_snapshot(path: &Path, snapshot: &CastSnapshot) -> Result<(), StorageError> {
    let json = serde_json::to_string_pretty(snapshot)
        .map_err(|e| StorageError::Serialize(format!("Failed to serialize snapshot: {}", e)))?;

    atomic_write(path, &json)
        .map_err(|e| StorageError::Io(format!("Failed to write {}: {}", path.display(), e)))?;

    tracing::debug!(
        path = %path.display(),
        events = snapshot.events.len(),
        "snapshot saved"
    );
    Ok(())
}

/// Manages the data directory holding logs and named snapshots
pub struct DataDirectory {
    root: PathBuf,
}

impl DataDirectory {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Get the default data directory path (~/.cashcast/)
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".cashcast")
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn snapshots_dir(&self) -> PathBuf {
        self.root.join("snapshots")
    }

    /// Path of the named snapshot, whether or not it exists yet
    pub fn snapshot_path(&self, name: &str) -> PathBuf {
        self.snapshots_dir()
            .join(format!("{}.{SNAPSHOT_EXT}", sanitize_filename(name)))
    }

    pub fn exists(&self) -> bool {
        self.root.exists() && self.snapshots_dir().exists()
    }

    pub fn init(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)
            .map_err(|e| StorageError::Io(format!("Failed to create data directory: {}", e)))?;
        fs::create_dir_all(self.snapshots_dir()).map_err(|e| {
            StorageError::Io(format!("Failed to create snapshots directory: {}", e))
        })?;
        Ok(())
    }

    pub fn save(&self, name: &str, snapshot: &CastSnapshot) -> Result<PathBuf, StorageError> {
        if !self.exists() {
            self.init()?;
        }
        let path = self.snapshot_path(name);
        save_snapshot(&path, snapshot)?;
        Ok(path)
    }

    /// Load by name from the data directory, or directly when `name_or_path`
    /// points at an existing file
    pub fn load(&self, name_or_path: &str) -> Result<CastSnapshot, StorageError> {
        let direct = Path::new(name_or_path);
        if direct.is_file() {
            return load_snapshot(direct);
        }
        load_snapshot(&self.snapshot_path(name_or_path))
    }

    /// Names of the stored snapshots, sorted
    pub fn list(&self) -> Result<Vec<String>, StorageError> {
        let dir = self.snapshots_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&dir)
            .map_err(|e| StorageError::Io(format!("Failed to read snapshots directory: {}", e)))?;

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == SNAPSHOT_EXT))
            .filter_map(|path| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .collect();
        names.sort();
        Ok(names)
    }
}

/// Sanitize a snapshot name for use as a filename
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
