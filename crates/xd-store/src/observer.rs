//! `PersistObserver`: bridges `SchedulerObserver` to the file store.

use xd_core::Timestamp;
use xd_dock::HistoryRecord;
use xd_sim::{Facility, SchedulerObserver};

use crate::{FileStore, HistoryWriter, StoreError, StoreResult};

/// A [`SchedulerObserver`] that appends every completion to the history file
/// and saves queues, warehouse, and unit times after each tick that changed
/// state.
///
/// Errors are stored internally because observer methods have no return
/// value.  Check with [`take_error`][Self::take_error] after each tick.
pub struct PersistObserver {
    store:      FileStore,
    history:    HistoryWriter,
    saves:      u64,
    last_error: Option<StoreError>,
}

impl PersistObserver {
    /// Open the history file under `store`'s directory for appending.
    pub fn new(store: FileStore) -> StoreResult<Self> {
        std::fs::create_dir_all(store.dir())?;
        let history = HistoryWriter::open(store.history_path())?;
        Ok(Self { store, history, saves: 0, last_error: None })
    }

    pub fn store(&self) -> &FileStore {
        &self.store
    }

    /// Number of snapshot saves performed.
    pub fn saves(&self) -> u64 {
        self.saves
    }

    pub fn history(&self) -> &HistoryWriter {
        &self.history
    }

    /// Save immediately, e.g. after accepting arrivals between ticks.
    pub fn save_now(&mut self, facility: &Facility) -> StoreResult<()> {
        self.store.save_facility(facility)?;
        self.saves += 1;
        Ok(())
    }

    /// Take the stored error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<StoreError> {
        self.last_error.take()
    }

    fn store_err(&mut self, result: StoreResult<()>) {
        if let Err(e) = result {
            tracing::error!(error = %e, "persistence failed");
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl SchedulerObserver for PersistObserver {
    fn on_complete(&mut self, record: &HistoryRecord) {
        let result = self.history.append(record);
        self.store_err(result);
    }

    fn on_tick_end(&mut self, _now: Timestamp, facility: &Facility, changed: bool) {
        if changed {
            let result = self.save_now(facility);
            self.store_err(result);
        }
    }
}
