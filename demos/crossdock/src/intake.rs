//! Arrival sources: stdin lines and seeded demo traffic.

use std::io::{self, BufRead};
use std::str::FromStr;
use std::sync::mpsc::{self, Receiver};
use std::thread;

use anyhow::{Context, Result, anyhow, bail};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use xd_core::{DemoArrivals, DockKind, ItemId};
use xd_ledger::UnitTimeTable;

// ── Demo catalogue ────────────────────────────────────────────────────────────

const PLATES: [&str; 6] = ["AB123CD", "EF456GH", "IJ789KL", "MN012OP", "QR345ST", "UV678WX"];

/// Demo items with (unload, load) seconds per unit.
const ITEMS: [(&str, u32, u32); 4] = [
    ("pallets", 3, 2),
    ("crates",  2, 1),
    ("drums",   4, 3),
    ("rolls",   1, 1),
];

const MAX_QUANTITY: u32 = 12;

// ── Arrival ───────────────────────────────────────────────────────────────────

/// A vehicle announced by an external caller, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arrival {
    pub kind:     DockKind,
    pub plate:    String,
    pub item:     String,
    pub quantity: u32,
}

impl FromStr for Arrival {
    type Err = anyhow::Error;

    /// `unload;PLATE;ITEM;QTY` or `load;PLATE;ITEM;QTY`.
    fn from_str(s: &str) -> Result<Self> {
        let fields: Vec<&str> = s.split(';').map(str::trim).collect();
        let &[kind, plate, item, quantity] = fields.as_slice() else {
            bail!("expected kind;plate;item;quantity, got {} fields", fields.len());
        };
        let kind = DockKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(kind))
            .ok_or_else(|| anyhow!("unknown dock kind {kind:?}"))?;
        let quantity = quantity
            .parse::<u32>()
            .with_context(|| format!("bad quantity {quantity:?}"))?;
        Ok(Self { kind, plate: plate.to_owned(), item: item.to_owned(), quantity })
    }
}

/// Read arrivals from stdin on a background thread.
///
/// The scheduler drains the receiver between ticks, so queue mutation stays
/// on the scheduler's thread.
pub fn spawn_stdin() -> Receiver<Arrival> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match line.parse::<Arrival>() {
                Ok(arrival) => {
                    if tx.send(arrival).is_err() {
                        break;
                    }
                }
                Err(e) => tracing::warn!(input = line, error = %e, "ignoring intake line"),
            }
        }
        tracing::debug!("stdin closed");
    });
    rx
}

/// Random arrivals drawn from the demo catalogue.
pub fn demo_arrivals(settings: &DemoArrivals) -> Vec<Arrival> {
    let mut rng = SmallRng::seed_from_u64(settings.seed);
    (0..settings.count)
        .map(|_| {
            let kind = if rng.gen_bool(0.5) { DockKind::Unload } else { DockKind::Load };
            let (item, _, _) = ITEMS[rng.gen_range(0..ITEMS.len())];
            Arrival {
                kind,
                plate:    PLATES[rng.gen_range(0..PLATES.len())].to_owned(),
                item:     item.to_owned(),
                quantity: rng.gen_range(1..=MAX_QUANTITY),
            }
        })
        .collect()
}

/// Add unit times for demo items the loaded tables do not cover.
pub fn fill_demo_rates(unload: &mut UnitTimeTable, load: &mut UnitTimeTable) {
    for (item, unload_secs, load_secs) in ITEMS {
        let item = ItemId::from(item);
        if unload.get(&item).is_none() {
            unload.insert(item.clone(), unload_secs);
        }
        if load.get(&item).is_none() {
            load.insert(item, load_secs);
        }
    }
}
