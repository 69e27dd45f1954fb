//! The material ledger
//!
//! In-memory ordered collection (newest first) kept in step with a
//! [`MaterialStore`]. Store failures follow one policy per operation:
//!
//! - load: logged, the collection keeps its prior contents
//! - add: logged, sync indicator goes to `error`, nothing is inserted locally
//! - delete / clear: returned to the caller, the collection is untouched
//!
//! Nothing is retried.

use crate::models::{DashboardReport, Material, SyncStatus};
use crate::scoring::CarbonConfig;
use crate::store::{MaterialStore, StoreError};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{error, info, warn};

/// How long a successful write shows as syncing before it settles
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(800);

/// Errors surfaced by ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Sync error: {0}")]
    Create(#[source] StoreError),

    #[error("Delete operation failed: {0}")]
    Delete(#[source] StoreError),

    #[error("Failed to clear ledger: {0}")]
    Clear(#[source] StoreError),
}

/// Operator's answer to the clear-all prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Confirmation::Confirmed
        } else {
            Confirmation::Declined
        }
    }
}

/// Result of a clear-all request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    Cleared { removed: usize },
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SyncState {
    Idle,
    InFlight,
    Settling { since: Instant },
    Failed,
}

/// Sync status of the insert path.
///
/// A success reads as `syncing` until the settle delay has passed.
#[derive(Debug, Clone)]
pub struct SyncIndicator {
    state: SyncState,
    settle_delay: Duration,
}

impl SyncIndicator {
    pub fn new(settle_delay: Duration) -> Self {
        Self {
            state: SyncState::Idle,
            settle_delay,
        }
    }

    pub fn begin(&mut self) {
        self.state = SyncState::InFlight;
    }

    pub fn succeed(&mut self, at: Instant) {
        self.state = SyncState::Settling { since: at };
    }

    pub fn fail(&mut self) {
        self.state = SyncState::Failed;
    }

    pub fn status_at(&self, now: Instant) -> SyncStatus {
        match self.state {
            SyncState::Idle => SyncStatus::Synced,
            SyncState::InFlight => SyncStatus::Syncing,
            SyncState::Settling { since } => {
                if now.saturating_duration_since(since) >= self.settle_delay {
                    SyncStatus::Synced
                } else {
                    SyncStatus::Syncing
                }
            }
            SyncState::Failed => SyncStatus::Error,
        }
    }

    pub fn status(&self) -> SyncStatus {
        self.status_at(Instant::now())
    }
}

impl Default for SyncIndicator {
    fn default() -> Self {
        Self::new(DEFAULT_SETTLE_DELAY)
    }
}

/// Materials plus the store they are persisted in
pub struct Ledger<S: MaterialStore> {
    store: S,
    materials: Vec<Material>,
    sync: SyncIndicator,
}

impl<S: MaterialStore> Ledger<S> {
    pub fn new(store: S, settle_delay: Duration) -> Self {
        Self {
            store,
            materials: Vec::new(),
            sync: SyncIndicator::new(settle_delay),
        }
    }

    /// Create a ledger and load it from the store
    pub fn open(store: S, settle_delay: Duration) -> Self {
        let mut ledger = Self::new(store, settle_delay);
        ledger.load();
        ledger
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Materials, most recently added first
    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn sync_status(&self) -> SyncStatus {
        self.sync.status()
    }

    /// Fetch everything from the store.
    ///
    /// Failures are logged and leave the current contents in place.
    pub fn load(&mut self) -> usize {
        if let Err(e) = self.store.ping() {
            error!("Store connection failed ({}): {}", self.store.name(), e);
        }

        match self.store.list_all() {
            Ok(materials) => {
                info!("Loaded {} materials from {}", materials.len(), self.store.name());
                self.materials = materials;
            }
            Err(e) => error!("Error fetching materials: {}", e),
        }
        self.materials.len()
    }

    /// Persist a new material and put it at the front of the ledger
    pub fn add(&mut self, material: Material) -> Result<&Material, LedgerError> {
        self.sync.begin();
        match self.store.insert(&material) {
            Ok(stored) => {
                info!("Added material {} ({})", stored.id, stored.name);
                self.materials.insert(0, stored);
                self.sync.succeed(Instant::now());
                Ok(&self.materials[0])
            }
            Err(e) => {
                self.sync.fail();
                error!("Sync Error: {}", e);
                Err(LedgerError::Create(e))
            }
        }
    }

    /// Delete a material by identifier.
    ///
    /// Returns whether the store held a record with that identifier.
    pub fn delete(&mut self, id: &str) -> Result<bool, LedgerError> {
        let removed = self.store.delete(id).map_err(LedgerError::Delete)?;
        if !removed {
            warn!("No stored material with id {}", id);
        }
        self.materials.retain(|m| m.id != id);
        Ok(removed)
    }

    /// Remove every material once the operator has confirmed
    pub fn clear_all(&mut self, confirmation: Confirmation) -> Result<ClearOutcome, LedgerError> {
        if confirmation == Confirmation::Declined {
            info!("Clear cancelled by operator");
            return Ok(ClearOutcome::Cancelled);
        }
        let removed = self.store.delete_all().map_err(LedgerError::Clear)?;
        info!("Cleared {} materials", removed);
        self.materials.clear();
        Ok(ClearOutcome::Cleared { removed })
    }

    /// Dashboard metrics for the current contents
    pub fn report(&self, carbon_config: &CarbonConfig, currency: &str) -> DashboardReport {
        DashboardReport::build(&self.materials, carbon_config, currency)
    }
}
