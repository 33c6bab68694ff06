//! Per-item handling rates and the duration estimator.

use std::collections::HashMap;
use std::time::Duration;

use xd_core::ItemId;

/// Seconds needed to move one unit of an item, per item.
///
/// One table exists for unloading and one for loading.  The scheduler only
/// reads them; they are loaded once at start-up.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UnitTimeTable {
    secs_per_unit: HashMap<ItemId, u32>,
    /// Insertion order, so saving writes rows back the way they were read.
    order: Vec<ItemId>,
}

impl UnitTimeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or replace) the rate for `item`.
    pub fn insert(&mut self, item: ItemId, secs_per_unit: u32) {
        if self.secs_per_unit.insert(item.clone(), secs_per_unit).is_none() {
            self.order.push(item);
        }
    }

    #[inline]
    pub fn get(&self, item: &ItemId) -> Option<u32> {
        self.secs_per_unit.get(item).copied()
    }

    /// Rows in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&ItemId, u32)> {
        self.order.iter().map(|item| (item, self.secs_per_unit[item]))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl FromIterator<(ItemId, u32)> for UnitTimeTable {
    /// Later rows for the same item override earlier ones.
    fn from_iter<I: IntoIterator<Item = (ItemId, u32)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (item, secs) in iter {
            table.insert(item, secs);
        }
        table
    }
}

/// Time to move `quantity` units of `item` according to `table`.
///
/// An item missing from the table takes zero time: the operation completes
/// on the next tick.
pub fn estimate(item: &ItemId, quantity: u32, table: &UnitTimeTable) -> Duration {
    match table.get(item) {
        Some(secs) => Duration::from_secs(quantity as u64 * secs as u64),
        None => {
            tracing::debug!(%item, "no unit time for item, zero duration");
            Duration::ZERO
        }
    }
}
