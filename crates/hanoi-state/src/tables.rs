//! redb table definitions.

use redb::TableDefinition;

/// Rotation snapshots keyed by snapshot name, JSON-encoded.
pub const SNAPSHOTS: TableDefinition<&str, &[u8]> = TableDefinition::new("snapshots");
