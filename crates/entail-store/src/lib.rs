//! Entail Storage Layer
//!
//! Append-only versioned persistence for hypergraph documents.
//!
//! # Architecture
//!
//! - [`VersionedStore`] runs cost propagation and validation on every save
//!   and snapshots the state being replaced before writing
//! - Backends implement [`SnapshotStore`](entail_domain::SnapshotStore):
//!   [`SqliteBackend`] (single database file or `:memory:`) and
//!   [`FileBackend`] (a directory of JSON files)
//!
//! # Examples
//!
//! ```no_run
//! use entail_store::{FileBackend, VersionedStore};
//!
//! let backend = FileBackend::new("./my-hypothesis").unwrap();
//! let store = VersionedStore::new(backend);
//! for entry in store.get_history().unwrap() {
//!     println!("{} {}", entry.timestamp, entry.id);
//! }
//! ```

#![warn(missing_docs)]

mod error;
mod file;
mod sqlite;
mod versioned;

pub use error::StoreError;
pub use file::FileBackend;
pub use sqlite::SqliteBackend;
pub use versioned::{SaveReceipt, VersionedStore};
