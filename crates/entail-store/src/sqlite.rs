//! SQLite snapshot backend

use crate::StoreError;
use chrono::{DateTime, Utc};
use entail_domain::{Hypergraph, SnapshotId, SnapshotInfo, SnapshotStore};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use uuid::Uuid;

/// SQLite-based implementation of [`SnapshotStore`]
///
/// The current document lives in a single-row table; history is an
/// append-only table guarded by triggers that abort any update or delete.
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own backend instance.
pub struct SqliteBackend {
    conn: Connection,
}

impl SqliteBackend {
    /// Open (or create) a database at the given path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```
    /// use entail_store::SqliteBackend;
    ///
    /// let backend = SqliteBackend::new(":memory:").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut backend = Self { conn };
        backend.initialize_schema()?;
        Ok(backend)
    }

    /// Open a fresh in-memory database
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::new(":memory:")
    }

    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        self.conn.execute_batch(include_str!("schema.sql"))?;
        Ok(())
    }

    fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, StoreError> {
        DateTime::parse_from_rfc3339(raw)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| StoreError::InvalidData(format!("Bad timestamp '{}': {}", raw, e)))
    }
}

impl SnapshotStore for SqliteBackend {
    type Error = StoreError;

    fn load_current(&self) -> Result<Option<Hypergraph>, Self::Error> {
        let document: Option<String> = self
            .conn
            .query_row("SELECT document FROM current_document WHERE id = 1", [], |row| row.get(0))
            .optional()?;

        document
            .map(|json| Hypergraph::from_json(&json).map_err(StoreError::from))
            .transpose()
    }

    fn write_current(&mut self, graph: &Hypergraph) -> Result<(), Self::Error> {
        let json = graph.to_json_pretty()?;
        self.conn.execute(
            "INSERT INTO current_document (id, document, updated_at) VALUES (1, ?1, ?2)
             ON CONFLICT(id) DO UPDATE SET
             document = excluded.document, updated_at = excluded.updated_at",
            params![json, graph.metadata.last_updated.to_rfc3339()],
        )?;
        Ok(())
    }

    fn append_snapshot(
        &mut self,
        graph: &Hypergraph,
        at: DateTime<Utc>,
    ) -> Result<SnapshotInfo, Self::Error> {
        let id = SnapshotId::new(Uuid::now_v7().to_string());
        let json = graph.to_json_pretty()?;

        self.conn.execute(
            "INSERT INTO snapshots (id, taken_at, document) VALUES (?1, ?2, ?3)",
            params![id.as_str(), at.to_rfc3339(), json],
        )?;

        Ok(SnapshotInfo { id, timestamp: at })
    }

    fn list_snapshots(&self) -> Result<Vec<SnapshotInfo>, Self::Error> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, taken_at FROM snapshots ORDER BY seq ASC")?;

        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, taken_at)| {
                Ok(SnapshotInfo {
                    id: SnapshotId::new(id),
                    timestamp: Self::parse_timestamp(&taken_at)?,
                })
            })
            .collect()
    }

    fn read_snapshot(&self, id: &SnapshotId) -> Result<Option<Hypergraph>, Self::Error> {
        let document: Option<String> = self
            .conn
            .query_row(
                "SELECT document FROM snapshots WHERE id = ?1",
                params![id.as_str()],
                |row| row.get(0),
            )
            .optional()?;

        document
            .map(|json| Hypergraph::from_json(&json).map_err(StoreError::from))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_database() {
        let backend = SqliteBackend::in_memory().unwrap();
        assert!(backend.load_current().unwrap().is_none());
        assert!(backend.list_snapshots().unwrap().is_empty());
    }

    #[test]
    fn test_current_document_is_replaced() {
        let mut backend = SqliteBackend::in_memory().unwrap();
        let first = Hypergraph::new("first", "", "root");
        let second = Hypergraph::new("second", "", "root");

        backend.write_current(&first).unwrap();
        backend.write_current(&second).unwrap();

        let loaded = backend.load_current().unwrap().unwrap();
        assert_eq!(loaded.metadata.name, "second");
    }

    #[test]
    fn test_snapshots_are_ordered_and_readable() {
        let mut backend = SqliteBackend::in_memory().unwrap();
        let mut ids = Vec::new();
        for name in ["a", "b", "c"] {
            let graph = Hypergraph::new(name, "", "root");
            ids.push(backend.append_snapshot(&graph, Utc::now()).unwrap().id);
        }

        let listed: Vec<SnapshotId> = backend.list_snapshots().unwrap().into_iter().map(|s| s.id).collect();
        assert_eq!(listed, ids);

        let middle = backend.read_snapshot(&ids[1]).unwrap().unwrap();
        assert_eq!(middle.metadata.name, "b");
        assert!(backend.read_snapshot(&SnapshotId::from("nope")).unwrap().is_none());
    }

    #[test]
    fn test_history_rejects_mutation() {
        let mut backend = SqliteBackend::in_memory().unwrap();
        backend
            .append_snapshot(&Hypergraph::new("a", "", "root"), Utc::now())
            .unwrap();

        assert!(backend.conn.execute("DELETE FROM snapshots", []).is_err());
        assert!(backend
            .conn
            .execute("UPDATE snapshots SET document = '{}'", [])
            .is_err());
        assert_eq!(backend.list_snapshots().unwrap().len(), 1);
    }
}
