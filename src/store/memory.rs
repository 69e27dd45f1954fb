//! In-memory store
//!
//! Holds wire records behind the same translation table as the on-disk
//! store. Reads and writes can be made to fail on demand to exercise the
//! ledger's error paths.

use super::{
    newest_first, stamp, to_wire, with_identifier, MaterialStore, StoreError, StoreResult,
    WireRecord,
};
use crate::models::Material;
use chrono::Utc;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// In-process material store
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<Vec<WireRecord>>,
    next_row: AtomicU64,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `ping` and `list_all` fail until reset
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make `insert`, `delete` and `delete_all` fail until reset
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Raw wire records, in insertion order
    pub fn records(&self) -> StoreResult<Vec<WireRecord>> {
        Ok(self.read()?.clone())
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Vec<WireRecord>>> {
        self.records
            .read()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Vec<WireRecord>>> {
        self.records
            .write()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }

    fn check_reads(&self) -> StoreResult<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("connection refused".to_string()));
        }
        Ok(())
    }

    fn check_writes(&self) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("write rejected".to_string()));
        }
        Ok(())
    }
}

fn record_id(record: &WireRecord) -> Option<&str> {
    record.get("id").and_then(Value::as_str)
}

impl MaterialStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn ping(&self) -> StoreResult<usize> {
        self.check_reads()?;
        Ok(self.read()?.len())
    }

    fn list_all(&self) -> StoreResult<Vec<Material>> {
        self.check_reads()?;
        newest_first(self.read()?.clone())
    }

    fn insert(&self, material: &Material) -> StoreResult<Material> {
        self.check_writes()?;
        let material = with_identifier(material);
        let mut records = self.write()?;
        if records.iter().any(|r| record_id(r) == Some(material.id.as_str())) {
            return Err(StoreError::DuplicateId(material.id));
        }

        let mut record = to_wire(&material)?;
        let row_id = self.next_row.fetch_add(1, Ordering::SeqCst);
        stamp(&mut record, Utc::now(), row_id);
        let stored = super::from_wire(&record)?;
        records.push(record);
        Ok(stored)
    }

    fn delete(&self, id: &str) -> StoreResult<bool> {
        self.check_writes()?;
        let mut records = self.write()?;
        let before = records.len();
        records.retain(|r| record_id(r) != Some(id));
        Ok(records.len() < before)
    }

    fn delete_all(&self) -> StoreResult<usize> {
        self.check_writes()?;
        let mut records = self.write()?;
        let removed = records.len();
        records.clear();
        Ok(removed)
    }
}
