//! Facility configuration.
//!
//! Typically loaded from a JSON file by the driver binary and handed to the
//! scheduler builder.  Every field has a default so an empty object (or no
//! file at all) yields a working setup.

use std::path::PathBuf;
use std::time::Duration;

use crate::{XdError, XdResult};

/// Weights of the three priority factors.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PriorityWeights {
    /// Per second the vehicle has been waiting.
    pub wait:         f64,
    /// Per unit of downstream dependency (unload tasks only).
    pub dependency:   f64,
    /// Applied when the item is on hand (load tasks only).
    pub availability: f64,
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self { wait: 2.0, dependency: 3.0, availability: 1.0 }
    }
}

/// Which ranking the queues use at dispatch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PriorityPolicy {
    /// Weighted sum of waiting time, dependency, and availability.
    #[default]
    Weighted,
    /// Two-key ordering: dependency then quantity for unloads, availability
    /// then smallest stock for loads.
    KeyOrder,
}

/// Synthetic arrivals injected by the demo driver at start-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DemoArrivals {
    pub count: usize,
    pub seed:  u64,
}

impl Default for DemoArrivals {
    fn default() -> Self {
        Self { count: 0, seed: 42 }
    }
}

/// Top-level facility configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FacilityConfig {
    /// Wall-clock delay between scheduler ticks.  Default: 1000 ms.
    pub tick_interval_ms: u64,

    /// Directory holding the queue, warehouse, time-table, and history files.
    pub data_dir: PathBuf,

    pub weights: PriorityWeights,

    pub policy: PriorityPolicy,

    /// Stop after this many ticks.  `None` runs until the process is killed.
    pub max_ticks: Option<u64>,

    pub demo_arrivals: DemoArrivals,
}

impl Default for FacilityConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1_000,
            data_dir:         PathBuf::from("."),
            weights:          PriorityWeights::default(),
            policy:           PriorityPolicy::default(),
            max_ticks:        None,
            demo_arrivals:    DemoArrivals::default(),
        }
    }
}

impl FacilityConfig {
    /// Reject settings the scheduler cannot run with.
    pub fn validate(&self) -> XdResult<()> {
        if self.tick_interval_ms == 0 {
            return Err(XdError::Config("tick_interval_ms must be positive".into()));
        }
        let w = &self.weights;
        if ![w.wait, w.dependency, w.availability].iter().all(|v| v.is_finite()) {
            return Err(XdError::Config("priority weights must be finite".into()));
        }
        Ok(())
    }

    #[inline]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
