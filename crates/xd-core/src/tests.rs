//! Unit tests for xd-core primitives.

#[cfg(test)]
mod ids {
    use crate::{ItemId, Plate};

    #[test]
    fn display_is_raw_text() {
        assert_eq!(Plate::from("B009NU 142").to_string(), "B009NU 142");
        assert_eq!(ItemId::new("Item 1").as_str(), "Item 1");
    }

    #[test]
    fn blank_detection() {
        assert!(ItemId::from("   ").is_blank());
        assert!(!ItemId::from("X").is_blank());
    }
}

#[cfg(test)]
mod time {
    use std::time::Duration;

    use chrono::NaiveDate;

    use crate::{Clock, ManualClock, Timestamp, WallClock};

    #[test]
    fn parse_and_display() {
        let t: Timestamp = "08:05:09".parse().unwrap();
        assert_eq!(t, Timestamp::from_hms(8, 5, 9));
        assert_eq!(t.to_string(), "08:05:09");
        assert_eq!("7:0:3".parse::<Timestamp>().unwrap().to_string(), "07:00:03");
    }

    #[test]
    fn parse_rejects_garbage() {
        for s in ["", "12:00", "25:00:00", "12:60:00", "aa:bb:cc", "1:2:3:4"] {
            assert!(s.parse::<Timestamp>().is_err(), "{s:?} should not parse");
        }
    }

    #[test]
    fn arithmetic() {
        let t = Timestamp::from_hms(10, 0, 0);
        assert_eq!(t + Duration::from_secs(90), Timestamp::from_hms(10, 1, 30));
        assert_eq!((t + 10) - t, Duration::from_secs(10));
        // Never negative.
        assert_eq!(t.since(t + 5), 0);
        assert_eq!(t - (t + 5), Duration::ZERO);
    }

    #[test]
    fn display_wraps_past_midnight() {
        let t = Timestamp::from_hms(23, 59, 59) + 2;
        assert_eq!(t.to_string(), "00:00:01");
        assert!(t > Timestamp::from_hms(23, 59, 59));
    }

    #[test]
    fn wall_clock_keeps_counting_past_midnight() {
        let day0 = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let clock = WallClock::starting_on(day0);
        let before = day0.and_hms_opt(23, 59, 50).unwrap();
        let after = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap().and_hms_opt(0, 0, 10).unwrap();
        assert_eq!(clock.reading(before), Timestamp(86_390));
        assert_eq!(clock.reading(after), Timestamp(86_410));
        assert_eq!(clock.reading(after).to_string(), "00:00:10");
        // Earlier days clamp to the reference day.
        let earlier = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap().and_hms_opt(12, 0, 0).unwrap();
        assert_eq!(clock.reading(earlier), Timestamp::from_hms(12, 0, 0));
    }

    #[test]
    fn manual_clock_steps() {
        let mut clock = ManualClock::new(Timestamp(100));
        assert_eq!(clock.now(), Timestamp(100));
        clock.advance(5);
        assert_eq!(clock.now(), Timestamp(105));
    }
}

#[cfg(test)]
mod task {
    use std::num::NonZeroU32;

    use crate::{DockKind, Task, Timestamp, XdError};

    fn task(qty: u32) -> Task {
        Task::new("P1", Timestamp(0), "X", qty).unwrap()
    }

    #[test]
    fn zero_quantity_rejected() {
        let err = Task::new("P1", Timestamp(0), "X", 0).unwrap_err();
        assert!(matches!(err, XdError::InvalidTask(_)));
    }

    #[test]
    fn blank_fields_rejected() {
        assert!(Task::new("", Timestamp(0), "X", 1).is_err());
        assert!(Task::new("P1", Timestamp(0), " ", 1).is_err());
    }

    fn take(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn split_partial() {
        let (taken, rest) = task(8).split(take(5));
        let rest = rest.unwrap();
        assert_eq!(taken.quantity(), 5);
        assert_eq!(rest.quantity(), 3);
        assert_eq!(rest.plate(), taken.plate());
        assert_eq!(rest.arrival(), taken.arrival());
        assert_eq!(rest.item(), taken.item());
    }

    #[test]
    fn split_never_yields_zero_quantity() {
        let (taken, rest) = task(4).split(take(4));
        assert_eq!(taken.quantity(), 4);
        assert!(rest.is_none());

        let (taken, rest) = task(4).split(take(99));
        assert_eq!(taken.quantity(), 4);
        assert!(rest.is_none());
    }

    #[test]
    fn dock_kind_labels() {
        assert_eq!(DockKind::Unload.to_string(), "unload");
        assert_eq!(DockKind::Load.as_str(), "load");
    }
}

#[cfg(all(test, feature = "serde"))]
mod task_serde {
    use crate::{Task, Timestamp};

    #[test]
    fn valid_task_deserializes() {
        let json = r#"{"plate":"P1","arrival":5,"item":"X","quantity":3}"#;
        let t: Task = serde_json::from_str(json).unwrap();
        assert_eq!(t, Task::new("P1", Timestamp(5), "X", 3).unwrap());
    }

    #[test]
    fn invalid_task_is_rejected() {
        for json in [
            r#"{"plate":"P1","arrival":5,"item":"X","quantity":0}"#,
            r#"{"plate":" ","arrival":5,"item":"X","quantity":1}"#,
            r#"{"plate":"P1","arrival":5,"item":"","quantity":1}"#,
        ] {
            assert!(serde_json::from_str::<Task>(json).is_err(), "{json} should not deserialize");
        }
    }
}

#[cfg(test)]
mod config {
    use crate::{FacilityConfig, PriorityPolicy};

    #[test]
    fn defaults() {
        let c = FacilityConfig::default();
        assert_eq!(c.tick_interval_ms, 1_000);
        assert_eq!(c.weights.wait, 2.0);
        assert_eq!(c.weights.dependency, 3.0);
        assert_eq!(c.weights.availability, 1.0);
        assert_eq!(c.policy, PriorityPolicy::Weighted);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn zero_interval_rejected() {
        let c = FacilityConfig { tick_interval_ms: 0, ..Default::default() };
        assert!(c.validate().is_err());
    }

    #[test]
    fn non_finite_weight_rejected() {
        let mut c = FacilityConfig::default();
        c.weights.wait = f64::NAN;
        assert!(c.validate().is_err());
    }
}
