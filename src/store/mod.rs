//! Material storage
//!
//! The ledger talks to storage only through [`MaterialStore`]. Stores hold
//! wire records (snake_case field names) and translate at the boundary with
//! the table in [`mapping`], so nothing above this module knows the storage
//! naming.
//!
//! Two implementations:
//! - [`RedbStore`] - on-disk, single-file redb database (ACID)
//! - [`MemoryStore`] - in-process, with failure injection for tests

pub mod mapping;
mod memory;
mod redb_store;

pub use mapping::{from_wire, to_wire, FIELD_MAP};
pub use memory::MemoryStore;
pub use redb_store::RedbStore;

use crate::models::Material;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use thiserror::Error;

/// A material record as held by storage, keyed by wire field names
pub type WireRecord = Map<String, Value>;

/// Store-owned creation timestamp column
pub const CREATED_AT: &str = "created_at";

/// Store-owned insertion counter column, breaks timestamp ties
pub const ROW_ID: &str = "row_id";

/// Errors raised by a store backend
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] redb::Error),

    #[error("failed to encode record: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("malformed record '{key}': {reason}")]
    Malformed { key: String, reason: String },

    #[error("material '{0}' already exists")]
    DuplicateId(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

macro_rules! redb_error_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for StoreError {
                fn from(e: $ty) -> Self {
                    StoreError::Database(e.into())
                }
            }
        )*
    };
}

redb_error_from!(
    redb::DatabaseError,
    redb::TransactionError,
    redb::TableError,
    redb::StorageError,
    redb::CommitError,
);

pub type StoreResult<T> = Result<T, StoreError>;

/// Flat collection of materials keyed by identifier
pub trait MaterialStore {
    /// Name of this backend (for logging)
    fn name(&self) -> &str;

    /// Connectivity check, returns the number of stored records
    fn ping(&self) -> StoreResult<usize>;

    /// All records, newest first
    fn list_all(&self) -> StoreResult<Vec<Material>>;

    /// Insert one record and return it as stored.
    ///
    /// A non-empty identifier is kept; an empty one is assigned.
    /// Fails with [`StoreError::DuplicateId`] if the identifier exists.
    fn insert(&self, material: &Material) -> StoreResult<Material>;

    /// Delete by identifier, returns whether a record was removed
    fn delete(&self, id: &str) -> StoreResult<bool>;

    /// Delete every record, returns how many were removed
    fn delete_all(&self) -> StoreResult<usize>;
}

/// Give the material an identifier if the client did not
pub(crate) fn with_identifier(material: &Material) -> Material {
    let mut material = material.clone();
    if material.id.trim().is_empty() {
        material.id = uuid::Uuid::new_v4().to_string();
    }
    material
}

/// A stored row's ordering key: (created_at, row_id)
pub(crate) fn ordering_key(record: &WireRecord) -> (Option<DateTime<Utc>>, u64) {
    let created_at = record
        .get(CREATED_AT)
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|d| d.with_timezone(&Utc));
    let row_id = record.get(ROW_ID).and_then(Value::as_u64).unwrap_or(0);
    (created_at, row_id)
}

/// Sort records newest first and translate them to materials
pub(crate) fn newest_first(mut records: Vec<WireRecord>) -> StoreResult<Vec<Material>> {
    records.sort_by_key(|r| std::cmp::Reverse(ordering_key(r)));
    records.iter().map(from_wire).collect()
}

/// Add the store-owned columns to a wire record
pub(crate) fn stamp(record: &mut WireRecord, created_at: DateTime<Utc>, row_id: u64) {
    record.insert(
        CREATED_AT.to_string(),
        Value::String(created_at.to_rfc3339_opts(chrono::SecondsFormat::Nanos, true)),
    );
    record.insert(ROW_ID.to_string(), Value::from(row_id));
}
