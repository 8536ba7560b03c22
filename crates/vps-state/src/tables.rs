//! redb table definitions for the record store.

use redb::TableDefinition;

/// VPS records keyed by `{uuid}` (hyphenated lowercase string form),
/// values JSON-serialized [`VpsRecord`](vps_core::VpsRecord)s.
pub const RECORDS: TableDefinition<&str, &[u8]> = TableDefinition::new("vps_records");
