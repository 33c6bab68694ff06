//! Semicolon-separated line codecs for queues, warehouse, and unit times.
//!
//! | File kind  | Line format                      |
//! |------------|----------------------------------|
//! | queue      | `plate;arrival;item;quantity`    |
//! | warehouse  | `time;item;quantity`             |
//! | unit times | `item;unitSeconds`               |
//!
//! Times are `HH:MM:SS`.  Lines with the wrong number of fields are skipped
//! with a warning; a malformed number or time in a well-formed line is a
//! [`StoreError::Parse`].  A missing file reads as empty.

use std::fmt::Display;
use std::fs::File;
use std::io;
use std::path::Path;
use std::str::FromStr;

use csv::{Reader, ReaderBuilder, StringRecord, Terminator, Trim, Writer, WriterBuilder};

use xd_core::{ItemId, Task, Timestamp};
use xd_dispatch::TaskQueue;
use xd_ledger::{Ledger, UnitTimeTable};

use crate::{StoreError, StoreResult};

pub const TASK_FIELDS:      usize = 4;
pub const WAREHOUSE_FIELDS: usize = 3;
pub const RATE_FIELDS:      usize = 2;

// ── Reading ───────────────────────────────────────────────────────────────────

/// One well-formed line, with enough context to report parse errors.
pub(crate) struct Line<'a> {
    path:       &'a Path,
    pub number: u64,
    record:     &'a StringRecord,
}

impl Line<'_> {
    pub fn str(&self, i: usize) -> &str {
        self.record.get(i).unwrap_or_default()
    }

    pub fn parse<T>(&self, i: usize, what: &str) -> StoreResult<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        let raw = self.str(i);
        raw.parse()
            .map_err(|e| self.error(format!("bad {what} {raw:?}: {e}")))
    }

    pub fn error(&self, message: String) -> StoreError {
        StoreError::Parse { path: self.path.to_path_buf(), line: self.number, message }
    }

    pub fn skip(&self, reason: &dyn Display) {
        tracing::warn!(path = %self.path.display(), line = self.number, %reason, "skipping line");
    }
}

fn open(path: &Path) -> StoreResult<Option<Reader<File>>> {
    match File::open(path) {
        Ok(file) => Ok(Some(
            ReaderBuilder::new()
                .delimiter(b';')
                .has_headers(false)
                .flexible(true)
                .trim(Trim::All)
                .from_reader(file),
        )),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "file absent, reading as empty");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Call `visit` for every line of `path` that has exactly `width` fields.
pub(crate) fn read_rows<F>(path: &Path, width: usize, mut visit: F) -> StoreResult<()>
where
    F: FnMut(Line<'_>) -> StoreResult<()>,
{
    let Some(mut reader) = open(path)? else {
        return Ok(());
    };
    let mut record = StringRecord::new();
    while reader.read_record(&mut record)? {
        let number = record.position().map_or(0, |p| p.line());
        if record.len() != width {
            tracing::warn!(
                path = %path.display(),
                line = number,
                fields = record.len(),
                expected = width,
                "skipping line with wrong field count",
            );
            continue;
        }
        visit(Line { path, number, record: &record })?;
    }
    Ok(())
}

/// Read a queue file in line order.  Tasks that fail validation (zero
/// quantity, blank plate or item) are skipped.
pub fn read_tasks(path: &Path) -> StoreResult<TaskQueue> {
    let mut queue = TaskQueue::new();
    read_rows(path, TASK_FIELDS, |line| {
        let arrival: Timestamp = line.parse(1, "arrival time")?;
        let quantity: u32 = line.parse(3, "quantity")?;
        match Task::new(line.str(0), arrival, line.str(2), quantity) {
            Ok(task) => queue.push_back(task),
            Err(e) => line.skip(&e),
        }
        Ok(())
    })?;
    Ok(queue)
}

/// Read the warehouse file.  Repeated items are merged: quantities summed,
/// first time kept.
pub fn read_warehouse(path: &Path) -> StoreResult<Ledger> {
    let mut rows = Vec::new();
    read_rows(path, WAREHOUSE_FIELDS, |line| {
        let time: Timestamp = line.parse(0, "time")?;
        let quantity: u32 = line.parse(2, "quantity")?;
        let item = ItemId::from(line.str(1));
        if item.is_blank() {
            line.skip(&"blank item");
        } else {
            rows.push((time, item, quantity));
        }
        Ok(())
    })?;
    Ok(Ledger::from_rows(rows))
}

/// Read a unit-time table.  A repeated item keeps its last value.
pub fn read_rates(path: &Path) -> StoreResult<UnitTimeTable> {
    let mut table = UnitTimeTable::new();
    read_rows(path, RATE_FIELDS, |line| {
        let secs: u32 = line.parse(1, "unit seconds")?;
        let item = ItemId::from(line.str(0));
        if item.is_blank() {
            line.skip(&"blank item");
        } else {
            table.insert(item, secs);
        }
        Ok(())
    })?;
    Ok(table)
}

// ── Writing ───────────────────────────────────────────────────────────────────

pub(crate) fn writer_builder() -> WriterBuilder {
    let mut builder = WriterBuilder::new();
    builder
        .delimiter(b';')
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'));
    builder
}

fn create(path: &Path) -> StoreResult<Writer<File>> {
    Ok(writer_builder().from_path(path)?)
}

/// Overwrite `path` with one line per task, front of the queue first.
pub fn write_tasks(path: &Path, queue: &TaskQueue) -> StoreResult<()> {
    let mut w = create(path)?;
    for task in queue {
        let arrival = task.arrival().to_string();
        let quantity = task.quantity().to_string();
        w.write_record([task.plate().as_str(), arrival.as_str(), task.item().as_str(), quantity.as_str()])?;
    }
    w.flush()?;
    Ok(())
}

pub fn write_warehouse(path: &Path, ledger: &Ledger) -> StoreResult<()> {
    let mut w = create(path)?;
    for (item, entry) in ledger.iter() {
        let time = entry.updated.to_string();
        let quantity = entry.quantity.to_string();
        w.write_record([time.as_str(), item.as_str(), quantity.as_str()])?;
    }
    w.flush()?;
    Ok(())
}

pub fn write_rates(path: &Path, table: &UnitTimeTable) -> StoreResult<()> {
    let mut w = create(path)?;
    for (item, secs) in table.iter() {
        let secs = secs.to_string();
        w.write_record([item.as_str(), secs.as_str()])?;
    }
    w.flush()?;
    Ok(())
}
