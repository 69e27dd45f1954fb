//! On-disk store backed by redb
//!
//! One table of JSON-encoded wire records keyed by identifier, and a meta
//! table holding the insertion counter.

use super::{
    from_wire, newest_first, stamp, to_wire, with_identifier, MaterialStore, StoreError,
    StoreResult, WireRecord,
};
use crate::models::Material;
use chrono::Utc;
use redb::{Database, ReadableTable, TableDefinition};
use std::path::{Path, PathBuf};
use tracing::debug;

// redb table definitions
const MATERIALS_TABLE: TableDefinition<&str, &[u8]> =
    TableDefinition::new("construction_materials");
const META_TABLE: TableDefinition<&str, u64> = TableDefinition::new("meta");

const NEXT_ROW_KEY: &str = "next_row";

/// Ledger store in a single redb file
pub struct RedbStore {
    db: Database,
    path: PathBuf,
}

impl RedbStore {
    /// Create or open the database file, creating parent directories
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::create(path)?;
        debug!("Opened ledger database at {}", path.display());
        Ok(Self {
            db,
            path: path.to_path_buf(),
        })
    }

    fn read_records(&self) -> StoreResult<Vec<WireRecord>> {
        let read_txn = self.db.begin_read()?;

        // A fresh database has no table yet
        let table = match read_txn.open_table(MATERIALS_TABLE) {
            Ok(t) => t,
            Err(redb::TableError::TableDoesNotExist(_)) => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for item in table.iter()? {
            let (key, value) = item?;
            let record: WireRecord =
                serde_json::from_slice(value.value()).map_err(|e| StoreError::Malformed {
                    key: key.value().to_string(),
                    reason: e.to_string(),
                })?;
            records.push(record);
        }
        Ok(records)
    }
}

impl MaterialStore for RedbStore {
    fn name(&self) -> &str {
        "redb"
    }

    fn ping(&self) -> StoreResult<usize> {
        let read_txn = self.db.begin_read()?;
        let table = match read_txn.open_table(MATERIALS_TABLE) {
            Ok(t) => t,
            Err(redb::TableError::TableDoesNotExist(_)) => return Ok(0),
            Err(e) => return Err(e.into()),
        };
        let count = table.iter()?.count();
        Ok(count)
    }

    fn list_all(&self) -> StoreResult<Vec<Material>> {
        newest_first(self.read_records()?)
    }

    fn insert(&self, material: &Material) -> StoreResult<Material> {
        let material = with_identifier(material);
        let mut record = to_wire(&material)?;

        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(MATERIALS_TABLE)?;
            if table.get(material.id.as_str())?.is_some() {
                return Err(StoreError::DuplicateId(material.id));
            }

            let mut meta = write_txn.open_table(META_TABLE)?;
            let row_id = meta.get(NEXT_ROW_KEY)?.map(|v| v.value()).unwrap_or(0);
            meta.insert(NEXT_ROW_KEY, row_id + 1)?;

            stamp(&mut record, Utc::now(), row_id);
            let bytes = serde_json::to_vec(&record)?;
            table.insert(material.id.as_str(), bytes.as_slice())?;
        }
        write_txn.commit()?;

        debug!("Inserted material {} into {}", material.id, self.path.display());
        from_wire(&record)
    }

    fn delete(&self, id: &str) -> StoreResult<bool> {
        let write_txn = self.db.begin_write()?;
        let removed = {
            let mut table = write_txn.open_table(MATERIALS_TABLE)?;
            let removed = table.remove(id)?.is_some();
            removed
        };
        write_txn.commit()?;
        Ok(removed)
    }

    fn delete_all(&self) -> StoreResult<usize> {
        let write_txn = self.db.begin_write()?;
        let removed = {
            let table = write_txn.open_table(MATERIALS_TABLE)?;
            let count = table.iter()?.count();
            count
        };
        write_txn.delete_table(MATERIALS_TABLE)?;
        write_txn.commit()?;
        Ok(removed)
    }
}
