//! hanoi-state — snapshot persistence for the Hanoi rotation.
//!
//! Two backends implement [`SnapshotStore`]:
//!
//! - [`StateStore`]: a [redb](https://docs.rs/redb) database with one
//!   `snapshots` table, JSON values keyed by snapshot name. Supports an
//!   in-memory backend for tests.
//! - [`FileStore`]: one JSON file per snapshot name in a directory.
//!
//! A missing snapshot is `Ok(None)`, which tells the caller to start a fresh
//! rotation. A snapshot that is present but malformed is an error.

pub mod backend;
pub mod error;
pub mod file;
pub mod store;
pub mod tables;

pub use backend::SnapshotStore;
pub use error::{StateError, StateResult};
pub use file::FileStore;
pub use store::StateStore;
