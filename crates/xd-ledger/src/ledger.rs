//! The warehouse `Ledger`: on-hand quantity per item.
//!
//! Entries are kept in a `BTreeMap` so iteration (and therefore the saved
//! warehouse file) is ordered by item name and reproducible across runs.
//!
//! # Invariants
//!
//! - At most one entry per item.
//! - Every stored entry has `quantity > 0`; an entry debited to exactly zero
//!   is removed rather than kept as a zero record.

use std::collections::BTreeMap;

use xd_core::{ItemId, Timestamp};

use crate::{LedgerError, LedgerResult};

/// One warehouse line: when the item was last credited and how much is on hand.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StockEntry {
    pub updated:  Timestamp,
    pub quantity: u32,
}

/// Authoritative map of item → on-hand stock.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ledger {
    entries: BTreeMap<ItemId, StockEntry>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw `(time, item, quantity)` rows.
    ///
    /// Rows for a repeated item are merged: quantities sum and the first time
    /// seen is kept.  Rows with a zero quantity contribute nothing.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (Timestamp, ItemId, u32)>,
    {
        let mut entries: BTreeMap<ItemId, StockEntry> = BTreeMap::new();
        for (time, item, quantity) in rows {
            if quantity == 0 {
                continue;
            }
            entries
                .entry(item)
                .and_modify(|e| e.quantity = e.quantity.saturating_add(quantity))
                .or_insert(StockEntry { updated: time, quantity });
        }
        Self { entries }
    }

    /// Add `quantity` of `item`, creating the entry if needed, and stamp it
    /// with `time`.
    pub fn credit(&mut self, item: &ItemId, quantity: u32, time: Timestamp) {
        if quantity == 0 {
            return;
        }
        let entry = self
            .entries
            .entry(item.clone())
            .or_insert(StockEntry { updated: time, quantity: 0 });
        entry.quantity = entry.quantity.saturating_add(quantity);
        entry.updated = time;
        tracing::debug!(%item, quantity, on_hand = entry.quantity, at = %time, "stock credited");
    }

    /// Remove `quantity` of `item`.
    ///
    /// The entry keeps the time of its last credit.  If the remaining
    /// quantity is exactly zero the entry is dropped.
    ///
    /// # Errors
    /// [`LedgerError::InsufficientStock`] if the item is absent or holds less
    /// than `quantity`; the ledger is unchanged.
    pub fn debit(&mut self, item: &ItemId, quantity: u32, time: Timestamp) -> LedgerResult<()> {
        let available = self.available(item);
        if available < quantity {
            return Err(LedgerError::InsufficientStock {
                item: item.clone(),
                requested: quantity,
                available,
            });
        }
        let remaining = available - quantity;
        if remaining == 0 {
            self.entries.remove(item);
        } else if let Some(entry) = self.entries.get_mut(item) {
            entry.quantity = remaining;
        }
        tracing::debug!(%item, quantity, on_hand = remaining, at = %time, "stock debited");
        Ok(())
    }

    /// On-hand quantity of `item`; 0 if absent.
    #[inline]
    pub fn available(&self, item: &ItemId) -> u32 {
        self.entries.get(item).map_or(0, |e| e.quantity)
    }

    #[inline]
    pub fn get(&self, item: &ItemId) -> Option<&StockEntry> {
        self.entries.get(item)
    }

    #[inline]
    pub fn contains(&self, item: &ItemId) -> bool {
        self.entries.contains_key(item)
    }

    /// Iterate entries in item order.
    pub fn iter(&self) -> impl Iterator<Item = (&ItemId, &StockEntry)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
