//! Filesystem snapshot backend
//!
//! Layout under the root directory:
//!
//! ```text
//! hypergraph.json
//! history/000001-20240101T120000.000000Z.json
//! history/000002-20240101T120105.250000Z.json
//! ```
//!
//! Every write goes to a temporary file first and is then renamed into place,
//! so a crash never leaves a partially written document behind.

use crate::StoreError;
use chrono::{DateTime, NaiveDateTime, Utc};
use entail_domain::{Hypergraph, SnapshotId, SnapshotInfo, SnapshotStore};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

const CURRENT_FILE: &str = "hypergraph.json";
const HISTORY_DIR: &str = "history";
const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S%.6fZ";

/// Directory-backed implementation of [`SnapshotStore`]
#[derive(Debug, Clone)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    /// Use (and create if needed) the given directory
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(root.join(HISTORY_DIR))?;
        Ok(Self { root })
    }

    /// Directory holding the document
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the current document
    pub fn current_path(&self) -> PathBuf {
        self.root.join(CURRENT_FILE)
    }

    fn history_dir(&self) -> PathBuf {
        self.root.join(HISTORY_DIR)
    }

    /// Parse `<seq>-<timestamp>` into its parts
    fn parse_stem(stem: &str) -> Option<(u64, DateTime<Utc>)> {
        let (seq, timestamp) = stem.split_once('-')?;
        let seq = seq.parse().ok()?;
        let timestamp = NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT)
            .ok()?
            .and_utc();
        Some((seq, timestamp))
    }

    /// History entries sorted by sequence number
    fn entries(&self) -> Result<Vec<(u64, SnapshotInfo)>, StoreError> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(self.history_dir())? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match Self::parse_stem(stem) {
                Some((seq, timestamp)) => entries.push((
                    seq,
                    SnapshotInfo {
                        id: SnapshotId::new(stem),
                        timestamp,
                    },
                )),
                None => debug!(file = %path.display(), "Skipping unrecognized history file"),
            }
        }
        entries.sort_by_key(|(seq, _)| *seq);
        Ok(entries)
    }

    /// Resolve a snapshot id to its file, refusing anything outside history/
    fn snapshot_path(&self, id: &SnapshotId) -> Option<PathBuf> {
        let id = id.as_str();
        if id.is_empty() || id.contains(['/', '\\']) || id.contains("..") {
            return None;
        }
        Some(self.history_dir().join(format!("{}.json", id)))
    }

    fn read_document(path: &Path) -> Result<Hypergraph, StoreError> {
        let json = fs::read_to_string(path)?;
        Ok(Hypergraph::from_json(&json)?)
    }
}

/// Write via a sibling temp file, flushed to disk, then an atomic rename
fn write_atomic(path: &Path, contents: &str) -> Result<(), StoreError> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let mut file = fs::File::create(&tmp)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()?;
    drop(file);

    fs::rename(&tmp, path)?;
    Ok(())
}

impl SnapshotStore for FileBackend {
    type Error = StoreError;

    fn load_current(&self) -> Result<Option<Hypergraph>, Self::Error> {
        let path = self.current_path();
        if !path.exists() {
            return Ok(None);
        }
        Self::read_document(&path).map(Some)
    }

    fn write_current(&mut self, graph: &Hypergraph) -> Result<(), Self::Error> {
        write_atomic(&self.current_path(), &graph.to_json_pretty()?)
    }

    fn append_snapshot(
        &mut self,
        graph: &Hypergraph,
        at: DateTime<Utc>,
    ) -> Result<SnapshotInfo, Self::Error> {
        let seq = self.entries()?.last().map_or(1, |(seq, _)| seq + 1);
        let stem = format!("{:06}-{}", seq, at.format(TIMESTAMP_FORMAT));
        let path = self.history_dir().join(format!("{}.json", stem));
        if path.exists() {
            return Err(StoreError::InvalidData(format!(
                "History entry {} already exists",
                stem
            )));
        }

        write_atomic(&path, &graph.to_json_pretty()?)?;

        // Report the timestamp as it round-trips through the file name
        let timestamp = Self::parse_stem(&stem).map_or(at, |(_, t)| t);
        Ok(SnapshotInfo {
            id: SnapshotId::new(stem),
            timestamp,
        })
    }

    fn list_snapshots(&self) -> Result<Vec<SnapshotInfo>, Self::Error> {
        Ok(self.entries()?.into_iter().map(|(_, info)| info).collect())
    }

    fn read_snapshot(&self, id: &SnapshotId) -> Result<Option<Hypergraph>, Self::Error> {
        match self.snapshot_path(id) {
            Some(path) if path.exists() => Self::read_document(&path).map(Some),
            _ => Ok(None),
        }
    }
}
