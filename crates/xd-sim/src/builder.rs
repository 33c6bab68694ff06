//! Fluent builder for constructing a [`Scheduler`].

use xd_core::FacilityConfig;
use xd_dispatch::{PriorityModel, Queues, Ranking};
use xd_ledger::{Ledger, UnitTimeTable};

use crate::{Facility, Scheduler, SimError, SimResult};

/// Fluent builder for [`Scheduler<M>`].
///
/// # Required inputs
///
/// - [`FacilityConfig`]: tick interval, priority weights and policy, …
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default                                     |
/// |----------------------|---------------------------------------------|
/// | `.queues(q)`         | Both queues empty                           |
/// | `.ledger(l)`         | Empty warehouse                             |
/// | `.unload_rates(t)`   | Empty table (every unload takes 0 s)        |
/// | `.load_rates(t)`     | Empty table (every load takes 0 s)          |
/// | `.model(m)`          | [`Ranking`] from `config.policy` + weights  |
///
/// # Example
///
/// ```rust,ignore
/// let snapshot = FileStore::new(&config.data_dir).load()?;
/// let mut scheduler = SchedulerBuilder::new(config)
///     .queues(snapshot.queues)
///     .ledger(snapshot.ledger)
///     .unload_rates(snapshot.unload_rates)
///     .load_rates(snapshot.load_rates)
///     .build()?;
/// scheduler.tick(clock.now(), &mut NoopObserver)?;
/// ```
pub struct SchedulerBuilder<M: PriorityModel = Ranking> {
    config:       FacilityConfig,
    queues:       Queues,
    ledger:       Ledger,
    unload_rates: UnitTimeTable,
    load_rates:   UnitTimeTable,
    model:        M,
}

impl SchedulerBuilder<Ranking> {
    /// Create a builder whose ranking follows `config.policy`.
    pub fn new(config: FacilityConfig) -> Self {
        let model = Ranking::from_config(config.policy, config.weights);
        Self {
            config,
            queues:       Queues::default(),
            ledger:       Ledger::new(),
            unload_rates: UnitTimeTable::new(),
            load_rates:   UnitTimeTable::new(),
            model,
        }
    }
}

impl<M: PriorityModel> SchedulerBuilder<M> {
    /// Initial queue contents, typically restored from disk.
    pub fn queues(mut self, queues: Queues) -> Self {
        self.queues = queues;
        self
    }

    /// Initial warehouse contents.
    pub fn ledger(mut self, ledger: Ledger) -> Self {
        self.ledger = ledger;
        self
    }

    pub fn unload_rates(mut self, rates: UnitTimeTable) -> Self {
        self.unload_rates = rates;
        self
    }

    pub fn load_rates(mut self, rates: UnitTimeTable) -> Self {
        self.load_rates = rates;
        self
    }

    /// Replace the ranking model, overriding `config.policy`.
    pub fn model<M2: PriorityModel>(self, model: M2) -> SchedulerBuilder<M2> {
        SchedulerBuilder {
            config:       self.config,
            queues:       self.queues,
            ledger:       self.ledger,
            unload_rates: self.unload_rates,
            load_rates:   self.load_rates,
            model,
        }
    }

    /// Validate the configuration and return a ready-to-tick [`Scheduler`].
    pub fn build(self) -> SimResult<Scheduler<M>> {
        self.config
            .validate()
            .map_err(|e| SimError::Config(e.to_string()))?;

        tracing::info!(
            unload_queued = self.queues.unload.len(),
            load_queued   = self.queues.load.len(),
            items         = self.ledger.len(),
            policy        = ?self.config.policy,
            "scheduler built",
        );

        Ok(Scheduler {
            facility: Facility::new(self.queues, self.ledger, self.unload_rates, self.load_rates),
            config:   self.config,
            model:    self.model,
            ticks:    0,
        })
    }
}
