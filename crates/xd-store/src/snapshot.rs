//! `FileStore`: the six data files in one directory.

use std::path::{Path, PathBuf};

use xd_core::DockKind;
use xd_dispatch::Queues;
use xd_ledger::{Ledger, UnitTimeTable};
use xd_sim::Facility;

use crate::records::{read_rates, read_tasks, read_warehouse, write_rates, write_tasks, write_warehouse};
use crate::StoreResult;

pub const UNLOAD_QUEUE_FILE: &str = "unload_queue.txt";
pub const LOAD_QUEUE_FILE:   &str = "load_queue.txt";
pub const WAREHOUSE_FILE:    &str = "warehouse.txt";
pub const UNLOAD_TIMES_FILE: &str = "unload_times.txt";
pub const LOAD_TIMES_FILE:   &str = "load_times.txt";
pub const HISTORY_FILE:      &str = "history_of_actions.txt";

/// Everything restored at process start.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub queues:       Queues,
    pub ledger:       Ledger,
    pub unload_rates: UnitTimeTable,
    pub load_rates:   UnitTimeTable,
}

/// Durable state as plain text files under one directory.
///
/// Missing files load as empty, so a fresh directory is a valid cold start.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir:         PathBuf,
    write_rates: bool,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), write_rates: true }
    }

    /// Never rewrite the unit-time files on save.  Rates held in memory that
    /// did not come from disk stay out of the data directory.
    pub fn without_rate_writes(mut self) -> Self {
        self.write_rates = false;
        self
    }

    #[inline]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn queue_path(&self, kind: DockKind) -> PathBuf {
        self.dir.join(match kind {
            DockKind::Unload => UNLOAD_QUEUE_FILE,
            DockKind::Load   => LOAD_QUEUE_FILE,
        })
    }

    pub fn rates_path(&self, kind: DockKind) -> PathBuf {
        self.dir.join(match kind {
            DockKind::Unload => UNLOAD_TIMES_FILE,
            DockKind::Load   => LOAD_TIMES_FILE,
        })
    }

    pub fn warehouse_path(&self) -> PathBuf {
        self.dir.join(WAREHOUSE_FILE)
    }

    pub fn history_path(&self) -> PathBuf {
        self.dir.join(HISTORY_FILE)
    }

    /// Read queues, warehouse, and both unit-time tables.
    pub fn load(&self) -> StoreResult<Snapshot> {
        let snapshot = Snapshot {
            queues: Queues::new(
                read_tasks(&self.queue_path(DockKind::Unload))?,
                read_tasks(&self.queue_path(DockKind::Load))?,
            ),
            ledger:       read_warehouse(&self.warehouse_path())?,
            unload_rates: read_rates(&self.rates_path(DockKind::Unload))?,
            load_rates:   read_rates(&self.rates_path(DockKind::Load))?,
        };
        tracing::info!(
            dir = %self.dir.display(),
            unload_queued = snapshot.queues.unload.len(),
            load_queued = snapshot.queues.load.len(),
            items = snapshot.ledger.len(),
            "state loaded",
        );
        Ok(snapshot)
    }

    pub fn save(&self, snapshot: &Snapshot) -> StoreResult<()> {
        self.write_all(&snapshot.queues, &snapshot.ledger, &snapshot.unload_rates, &snapshot.load_rates)
    }

    /// Save the live state of a running scheduler.
    pub fn save_facility(&self, facility: &Facility) -> StoreResult<()> {
        self.write_all(
            facility.queues(),
            facility.ledger(),
            facility.dock(DockKind::Unload).rates(),
            facility.dock(DockKind::Load).rates(),
        )
    }

    fn write_all(
        &self,
        queues:       &Queues,
        ledger:       &Ledger,
        unload_rates: &UnitTimeTable,
        load_rates:   &UnitTimeTable,
    ) -> StoreResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        write_tasks(&self.queue_path(DockKind::Unload), &queues.unload)?;
        write_tasks(&self.queue_path(DockKind::Load), &queues.load)?;
        write_warehouse(&self.warehouse_path(), ledger)?;
        if self.write_rates {
            write_rates(&self.rates_path(DockKind::Unload), unload_rates)?;
            write_rates(&self.rates_path(DockKind::Load), load_rates)?;
        }
        tracing::debug!(dir = %self.dir.display(), "state saved");
        Ok(())
    }
}
