//! crossdock — runs the cross-dock scheduler against a data directory.
//!
//! Restores queues, warehouse, and unit-time tables from `data_dir`, then
//! ticks once per `tick_interval_ms` of wall-clock time.  Each tick's changes
//! are written back and every completed operation is appended to
//! `history_of_actions.txt`.
//!
//! New vehicles are read from stdin, one per line:
//!
//! ```text
//! unload;AB123CD;pallets;6
//! load;EF456GH;pallets;4
//! ```
//!
//! Usage: `crossdock [config.json]`.  Log level via `RUST_LOG` (default
//! `info`).

mod intake;

use std::path::Path;
use std::sync::mpsc::Receiver;
use std::thread;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use xd_core::{Clock, DockKind, FacilityConfig, Timestamp, WallClock};
use xd_dock::HistoryRecord;
use xd_sim::{Facility, Scheduler, SchedulerBuilder, SchedulerObserver};
use xd_store::{FileStore, PersistObserver};

use intake::Arrival;

// ── Observer wrapper to log progress ──────────────────────────────────────────

struct StatusObserver {
    inner:     PersistObserver,
    completed: u64,
}

impl SchedulerObserver for StatusObserver {
    fn on_complete(&mut self, record: &HistoryRecord) {
        self.completed += 1;
        tracing::info!(
            action = %record.action,
            task = %record.task,
            start = %record.start,
            end = %record.end,
            "completed",
        );
        self.inner.on_complete(record);
    }

    fn on_tick_end(&mut self, now: Timestamp, facility: &Facility, changed: bool) {
        if changed {
            tracing::info!(
                unload_queued = facility.queue(DockKind::Unload).len(),
                load_queued = facility.queue(DockKind::Load).len(),
                unload_dock = ?facility.dock(DockKind::Unload).status(),
                load_dock = ?facility.dock(DockKind::Load).status(),
                items = facility.ledger().len(),
                "facility",
            );
        }
        self.inner.on_tick_end(now, facility, changed);
    }
}

// ── Setup ─────────────────────────────────────────────────────────────────────

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn load_config(path: Option<&Path>) -> Result<FacilityConfig> {
    let Some(path) = path else {
        return Ok(FacilityConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

/// Accept every pending arrival.  Returns how many were queued.
fn drain_intake(scheduler: &mut Scheduler, rx: &Receiver<Arrival>, now: Timestamp) -> usize {
    rx.try_iter()
        .filter(|a| {
            // Rejections are logged by the scheduler; the queue is unchanged.
            scheduler.arrive(a.kind, &a.plate, &a.item, a.quantity, now).is_ok()
        })
        .count()
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing();

    let config_path = std::env::args().nth(1);
    let config = load_config(config_path.as_deref().map(Path::new))?;
    let clock = WallClock::new();

    let mut store = FileStore::new(&config.data_dir);
    let mut snapshot = store.load()?;
    if config.demo_arrivals.count > 0 {
        // Demo unit times live in memory only.
        intake::fill_demo_rates(&mut snapshot.unload_rates, &mut snapshot.load_rates);
        store = store.without_rate_writes();
    }

    let interval = config.tick_interval();
    let max_ticks = config.max_ticks;
    let mut scheduler = SchedulerBuilder::new(config.clone())
        .queues(snapshot.queues)
        .ledger(snapshot.ledger)
        .unload_rates(snapshot.unload_rates)
        .load_rates(snapshot.load_rates)
        .build()?;

    let mut observer = StatusObserver { inner: PersistObserver::new(store)?, completed: 0 };

    let now = clock.now();
    for a in intake::demo_arrivals(&config.demo_arrivals) {
        scheduler.arrive(a.kind, &a.plate, &a.item, a.quantity, now)?;
    }
    observer.inner.save_now(scheduler.facility())?;

    let rx = intake::spawn_stdin();
    tracing::info!(interval_ms = config.tick_interval_ms, ?max_ticks, "scheduler running");

    loop {
        let now = clock.now();
        if drain_intake(&mut scheduler, &rx, now) > 0 {
            observer.inner.save_now(scheduler.facility())?;
        }

        scheduler.tick(now, &mut observer)?;
        if let Some(e) = observer.inner.take_error() {
            return Err(e).context("persisting scheduler state");
        }

        if max_ticks.is_some_and(|max| scheduler.ticks >= max) {
            break;
        }
        thread::sleep(interval);
    }

    tracing::info!(ticks = scheduler.ticks, completed = observer.completed, "scheduler stopped");
    Ok(())
}
