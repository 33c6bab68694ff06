//! Facility time model.
//!
//! # Design
//!
//! Time is an integer count of seconds since midnight of the run's reference
//! day, wrapped in [`Timestamp`].  All dock arithmetic (`end = start + d`,
//! `now >= end`) is exact integer arithmetic with total ordering.
//!
//! [`WallClock`] keeps counting past midnight, so a running scheduler sees
//! monotonic time.  Persisted records only carry a time of day (`HH:MM:SS`):
//! a timestamp past 24 h is formatted modulo one day, and a restart begins a
//! new reference day.

use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;
use std::time::Duration;

use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};

use crate::XdError;

pub const SECS_PER_DAY: u64 = 86_400;

// ── Timestamp ─────────────────────────────────────────────────────────────────

/// An absolute facility timestamp in whole seconds.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub const MIDNIGHT: Timestamp = Timestamp(0);

    /// Build from a wall-clock time of day.
    pub fn from_hms(hours: u32, minutes: u32, seconds: u32) -> Timestamp {
        Timestamp(hours as u64 * 3_600 + minutes as u64 * 60 + seconds as u64)
    }

    /// Seconds elapsed from `earlier` to `self`, clamped to zero.
    #[inline]
    pub fn since(self, earlier: Timestamp) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// Break the time of day into (hour, minute, second).
    pub fn hms(self) -> (u32, u32, u32) {
        let secs = self.0 % SECS_PER_DAY;
        ((secs / 3_600) as u32, ((secs % 3_600) / 60) as u32, (secs % 60) as u32)
    }
}

impl Add<Duration> for Timestamp {
    type Output = Timestamp;
    #[inline]
    fn add(self, rhs: Duration) -> Timestamp {
        Timestamp(self.0 + rhs.as_secs())
    }
}

impl Add<u64> for Timestamp {
    type Output = Timestamp;
    #[inline]
    fn add(self, rhs: u64) -> Timestamp {
        Timestamp(self.0 + rhs)
    }
}

impl Sub for Timestamp {
    type Output = Duration;
    /// Saturating difference; never negative.
    #[inline]
    fn sub(self, rhs: Timestamp) -> Duration {
        Duration::from_secs(self.since(rhs))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m, s) = self.hms();
        write!(f, "{h:02}:{m:02}:{s:02}")
    }
}

impl FromStr for Timestamp {
    type Err = XdError;

    /// Parse `HH:MM:SS` (single-digit fields accepted).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || XdError::Parse(format!("invalid time {s:?}: expected HH:MM:SS"));
        let mut parts = s.trim().split(':');
        let mut field = |max: u32| -> Result<u32, XdError> {
            let v: u32 = parts.next().ok_or_else(bad)?.parse().map_err(|_| bad())?;
            if v >= max { Err(bad()) } else { Ok(v) }
        };
        let (h, m, sec) = (field(24)?, field(60)?, field(60)?);
        if parts.next().is_some() {
            return Err(bad());
        }
        Ok(Timestamp::from_hms(h, m, sec))
    }
}

// ── Clock ─────────────────────────────────────────────────────────────────────

/// Source of "now" for the scheduler driver.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// A clock that only moves when told to.  Used by tests and replays.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    pub current: Timestamp,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self { current: start }
    }

    /// Advance by `secs` seconds.
    #[inline]
    pub fn advance(&mut self, secs: u64) {
        self.current = self.current + secs;
    }

    pub fn set(&mut self, t: Timestamp) {
        self.current = t;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.current
    }
}

/// Local wall-clock time, counted in seconds from midnight of the day the
/// clock was created.
///
/// Readings keep growing past midnight (`24:00:00` reads as `86400`), so an
/// operation whose end falls on the next day still becomes due.
#[derive(Clone, Copy, Debug)]
pub struct WallClock {
    day0: NaiveDate,
}

impl WallClock {
    pub fn new() -> Self {
        Self::starting_on(Local::now().date_naive())
    }

    /// A clock whose reference day is `day0`.
    pub fn starting_on(day0: NaiveDate) -> Self {
        Self { day0 }
    }

    /// The timestamp of the local time `at`.  Times before the reference day
    /// clamp to that day.
    pub fn reading(&self, at: NaiveDateTime) -> Timestamp {
        let days = at.date().signed_duration_since(self.day0).num_days().max(0) as u64;
        Timestamp(days * SECS_PER_DAY + at.num_seconds_from_midnight() as u64)
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for WallClock {
    fn now(&self) -> Timestamp {
        self.reading(Local::now().naive_local())
    }
}
