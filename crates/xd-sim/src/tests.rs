//! Integration tests for xd-sim.

use xd_core::{DockKind, FacilityConfig, ItemId, ManualClock, PriorityPolicy, Task, Timestamp};
use xd_dispatch::{Queues, TaskQueue};
use xd_dock::{DockOperation, DockStatus, HistoryRecord, ACTION_LOAD, ACTION_UNLOAD};
use xd_ledger::{Ledger, UnitTimeTable};

use crate::{Facility, NoopObserver, Scheduler, SchedulerBuilder, SchedulerObserver, SimError};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn task(plate: &str, item: &str, qty: u32) -> Task {
    Task::new(plate, Timestamp(0), item, qty).unwrap()
}

fn rates(rows: &[(&str, u32)]) -> UnitTimeTable {
    rows.iter().map(|&(i, s)| (ItemId::from(i), s)).collect()
}

fn stock(rows: &[(&str, u32)]) -> Ledger {
    Ledger::from_rows(rows.iter().map(|&(i, q)| (Timestamp(0), ItemId::from(i), q)))
}

fn queues(unload: Vec<Task>, load: Vec<Task>) -> Queues {
    Queues::new(unload.into_iter().collect::<TaskQueue>(), load.into_iter().collect())
}

/// Scheduler with unload rate X→2 s and load rate X→1 s.
fn scheduler(unload: Vec<Task>, load: Vec<Task>, ledger: Ledger) -> Scheduler {
    SchedulerBuilder::new(FacilityConfig::default())
        .queues(queues(unload, load))
        .ledger(ledger)
        .unload_rates(rates(&[("X", 2)]))
        .load_rates(rates(&[("X", 1)]))
        .build()
        .unwrap()
}

fn tick(s: &mut Scheduler, t: u64) -> crate::TickReport {
    s.tick(Timestamp(t), &mut NoopObserver).unwrap()
}

// ── SchedulerBuilder ──────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_successfully_with_defaults() {
        let s = SchedulerBuilder::new(FacilityConfig::default()).build().unwrap();
        assert!(s.facility().is_quiet());
        assert!(s.facility().ledger().is_empty());
        assert_eq!(s.ticks, 0);
    }

    #[test]
    fn zero_tick_interval_is_config_error() {
        let config = FacilityConfig { tick_interval_ms: 0, ..Default::default() };
        let result = SchedulerBuilder::new(config).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn non_finite_weight_is_config_error() {
        let mut config = FacilityConfig::default();
        config.weights.wait = f64::NAN;
        assert!(matches!(SchedulerBuilder::new(config).build(), Err(SimError::Config(_))));
    }

    #[test]
    fn restored_state_is_visible() {
        let s = scheduler(vec![task("A", "X", 5)], vec![task("B", "X", 1)], stock(&[("X", 4)]));
        assert_eq!(s.facility().queue(DockKind::Unload).len(), 1);
        assert_eq!(s.facility().queue(DockKind::Load).len(), 1);
        assert_eq!(s.facility().ledger().available(&"X".into()), 4);
    }
}

// ── Intake ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod intake {
    use super::*;

    #[test]
    fn arrival_is_stamped_with_now() {
        let mut s = scheduler(vec![], vec![], Ledger::new());
        s.arrive(DockKind::Load, "P1", "X", 3, Timestamp(500)).unwrap();
        let front = s.facility().queue(DockKind::Load).front().unwrap();
        assert_eq!(front.arrival(), Timestamp(500));
        assert_eq!(front.quantity(), 3);
    }

    #[test]
    fn zero_quantity_rejected_and_queue_unchanged() {
        let mut s = scheduler(vec![], vec![], Ledger::new());
        let err = s.arrive(DockKind::Unload, "P1", "X", 0, Timestamp(0)).unwrap_err();
        assert!(matches!(err, SimError::Intake(_)));
        assert!(s.facility().queue(DockKind::Unload).is_empty());
    }

    #[test]
    fn blank_plate_rejected() {
        let mut s = scheduler(vec![], vec![], Ledger::new());
        assert!(s.arrive(DockKind::Unload, "  ", "X", 1, Timestamp(0)).is_err());
        assert!(s.facility().queue(DockKind::Unload).is_empty());
    }
}

// ── Tick ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tick_tests {
    use super::*;

    #[test]
    fn empty_tick_changes_nothing() {
        let mut s = scheduler(vec![], vec![], stock(&[("X", 1)]));
        let report = tick(&mut s, 0);
        assert!(!report.changed());
        assert_eq!(report.blocked, 0);
        assert!(s.facility().is_quiet());
        assert_eq!(s.facility().ledger().available(&"X".into()), 1);
        assert_eq!(s.ticks, 1);
    }

    #[test]
    fn unload_scenario_duration_and_credit() {
        let mut s = scheduler(vec![task("A", "X", 5)], vec![], Ledger::new());

        let r = tick(&mut s, 100);
        assert_eq!(r.started, 1);
        let op = s.facility().dock(DockKind::Unload).current().unwrap();
        assert_eq!(op.end, Timestamp(110));

        assert!(!tick(&mut s, 109).changed());

        let r = tick(&mut s, 110);
        assert_eq!(r.completed.len(), 1);
        assert_eq!(r.completed[0].action, ACTION_UNLOAD);
        assert_eq!(s.facility().ledger().available(&"X".into()), 5);
        assert!(s.facility().dock(DockKind::Unload).is_idle());
    }

    #[test]
    fn partial_load_scenario() {
        let mut s = scheduler(vec![], vec![task("B", "X", 8)], stock(&[("X", 5)]));

        let r = tick(&mut s, 0);
        assert_eq!(r.started, 1);
        let op = s.facility().dock(DockKind::Load).current().unwrap();
        assert_eq!(op.task.quantity(), 5);
        assert_eq!(op.end, Timestamp(5));

        // Shortfall queued exactly once, same plate/arrival/item.
        let load_q = s.facility().queue(DockKind::Load);
        assert_eq!(load_q.len(), 1);
        assert_eq!(load_q.front(), Some(&task("B", "X", 3)));

        // Busy tick does not touch the remainder.
        tick(&mut s, 1);
        assert_eq!(s.facility().queue(DockKind::Load).len(), 1);

        let r = tick(&mut s, 5);
        assert_eq!(r.completed.len(), 1);
        assert_eq!(r.completed[0].action, ACTION_LOAD);
        assert_eq!(r.completed[0].task.quantity(), 5);
        assert!(!s.facility().ledger().contains(&"X".into()));

        // The remainder now finds no stock.
        assert_eq!(r.blocked, 1);
        assert_eq!(s.facility().dock(DockKind::Load).status(), DockStatus::WaitingForStock);
    }

    #[test]
    fn blocked_load_scenario() {
        let mut s = scheduler(vec![], vec![task("C", "Y", 1)], Ledger::new());
        let r = tick(&mut s, 0);
        assert_eq!(r.blocked, 1);
        // The blocked dispatch re-ranked the load queue.
        assert!(r.changed());
        assert!(s.facility().dock(DockKind::Load).is_idle());
        assert_eq!(s.facility().queue(DockKind::Load).front(), Some(&task("C", "Y", 1)));
        assert_eq!(s.facility().queue(DockKind::Load).len(), 1);
    }

    #[test]
    fn operation_spanning_midnight_completes_next_day() {
        let mut s = scheduler(vec![task("A", "X", 10)], vec![], Ledger::new());
        tick(&mut s, 86_390);
        let op = s.facility().dock(DockKind::Unload).current().unwrap();
        assert_eq!(op.end, Timestamp(86_410));

        let mut completed = 0;
        for t in 86_391..=86_410 {
            completed += tick(&mut s, t).completed.len();
        }
        assert_eq!(completed, 1);
        assert_eq!(s.facility().ledger().available(&"X".into()), 10);
        assert!(s.facility().dock(DockKind::Unload).is_idle());
    }

    #[test]
    fn unload_completion_unblocks_load_in_same_tick() {
        let mut s = scheduler(vec![task("A", "X", 5)], vec![task("B", "X", 3)], Ledger::new());

        let r = tick(&mut s, 0);
        assert_eq!((r.started, r.blocked), (1, 1));

        // Unload dock completes first, so the load dock sees the credit.
        let r = tick(&mut s, 10);
        assert_eq!(r.completed.len(), 1);
        assert_eq!(r.started, 1);
        let op = s.facility().dock(DockKind::Load).current().unwrap();
        assert_eq!((op.task.quantity(), op.end), (3, Timestamp(13)));

        tick(&mut s, 13);
        assert_eq!(s.facility().ledger().available(&"X".into()), 2);
        assert!(s.facility().is_quiet());
    }

    #[test]
    fn unknown_item_takes_zero_time() {
        let mut s = scheduler(vec![task("A", "Z", 4)], vec![], Ledger::new());
        tick(&mut s, 0);
        let op = s.facility().dock(DockKind::Unload).current().unwrap();
        assert_eq!(op.end, Timestamp(0));
        let r = tick(&mut s, 1);
        assert_eq!(r.completed.len(), 1);
        assert_eq!(s.facility().ledger().available(&"Z".into()), 4);
    }

    #[test]
    fn run_ticks_advances_clock() {
        let mut s = scheduler(vec![], vec![], Ledger::new());
        let mut clock = ManualClock::new(Timestamp(0));
        let reports = s.run_ticks(5, &mut clock, 1, &mut NoopObserver).unwrap();
        assert_eq!(reports.len(), 5);
        assert_eq!(reports[4].now, Timestamp(4));
        assert_eq!(clock.current, Timestamp(5));
        assert_eq!(s.ticks, 5);
    }
}

// ── Policy ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod policy {
    use super::*;

    fn first_started(policy: PriorityPolicy) -> String {
        let config = FacilityConfig { policy, ..Default::default() };
        let mut s = SchedulerBuilder::new(config)
            .queues(queues(vec![task("A", "X", 1), task("B", "Y", 9)], vec![]))
            .build()
            .unwrap();
        tick(&mut s, 0);
        s.facility().dock(DockKind::Unload).current().unwrap().task.plate().to_string()
    }

    #[test]
    fn weighted_tie_keeps_queue_order() {
        assert_eq!(first_started(PriorityPolicy::Weighted), "A");
    }

    #[test]
    fn key_order_prefers_larger_quantity() {
        assert_eq!(first_started(PriorityPolicy::KeyOrder), "B");
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use super::*;

    fn busy_facility() -> Scheduler {
        scheduler(
            vec![task("U1", "X", 4), task("U2", "Y", 2), task("U3", "X", 1)],
            vec![task("L1", "X", 6), task("L2", "Y", 1), task("L3", "Z", 2)],
            stock(&[("X", 2)]),
        )
    }

    fn assert_positive(f: &Facility) {
        for kind in DockKind::ALL {
            assert!(f.queue(kind).iter().all(|t| t.quantity() > 0));
            if let Some(op) = f.dock(kind).current() {
                assert!(op.task.quantity() > 0);
            }
        }
        assert!(f.ledger().iter().all(|(_, e)| e.quantity > 0));
    }

    #[test]
    fn identical_inputs_give_identical_runs() {
        let mut a = busy_facility();
        let mut b = busy_facility();
        let mut ca = ManualClock::new(Timestamp(0));
        let mut cb = ManualClock::new(Timestamp(0));
        let ra = a.run_ticks(40, &mut ca, 1, &mut NoopObserver).unwrap();
        let rb = b.run_ticks(40, &mut cb, 1, &mut NoopObserver).unwrap();
        assert_eq!(ra, rb);
    }

    #[test]
    fn quantities_stay_positive_every_tick() {
        let mut s = busy_facility();
        for t in 0..40 {
            tick(&mut s, t);
            assert_positive(s.facility());
        }
    }

    #[test]
    fn loads_never_exceed_credited_stock() {
        let mut s = busy_facility();
        let mut clock = ManualClock::new(Timestamp(0));
        let reports = s.run_ticks(60, &mut clock, 1, &mut NoopObserver).unwrap();

        let mut credited = 2; // initial X
        let mut debited = 0;
        for rec in reports.iter().flat_map(|r| &r.completed) {
            if rec.task.item().as_str() != "X" {
                continue;
            }
            match rec.kind() {
                Some(DockKind::Unload) => credited += rec.task.quantity(),
                Some(DockKind::Load)   => debited += rec.task.quantity(),
                None => unreachable!(),
            }
        }
        assert!(debited <= credited);
        assert_eq!(s.facility().ledger().available(&"X".into()), credited - debited);
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        starts:     usize,
        ends:       usize,
        changed:    usize,
        dispatched: usize,
        remainders: usize,
        blocked:    usize,
        records:    Vec<HistoryRecord>,
    }

    impl SchedulerObserver for Counter {
        fn on_tick_start(&mut self, _now: Timestamp) {
            self.starts += 1;
        }
        fn on_dispatch(&mut self, _kind: DockKind, _op: &DockOperation, remainder: Option<&Task>) {
            self.dispatched += 1;
            self.remainders += usize::from(remainder.is_some());
        }
        fn on_blocked(&mut self, _kind: DockKind, _task: &Task) {
            self.blocked += 1;
        }
        fn on_complete(&mut self, record: &HistoryRecord) {
            self.records.push(record.clone());
        }
        fn on_tick_end(&mut self, _now: Timestamp, _f: &Facility, changed: bool) {
            self.ends += 1;
            self.changed += usize::from(changed);
        }
    }

    #[test]
    fn callbacks_match_tick_activity() {
        let mut s = scheduler(vec![], vec![task("B", "X", 8)], stock(&[("X", 5)]));
        let mut obs = Counter::default();
        let mut clock = ManualClock::new(Timestamp(0));
        s.run_ticks(6, &mut clock, 1, &mut obs).unwrap();

        assert_eq!((obs.starts, obs.ends), (6, 6));
        assert_eq!(obs.dispatched, 1);
        assert_eq!(obs.remainders, 1);
        assert_eq!(obs.records.len(), 1);
        // Tick 0 (start) and tick 5 (completion plus blocked retry).
        assert_eq!(obs.changed, 2);
        assert_eq!(obs.blocked, 1);
        assert_eq!(obs.records[0].start, Timestamp(0));
        assert_eq!(obs.records[0].end, Timestamp(5));
    }
}
