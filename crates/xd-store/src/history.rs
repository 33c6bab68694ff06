//! Append-only history sink and its reader.
//!
//! One line per completed operation:
//! `action;plate;arrival;item;quantity;startTime;endTime`.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use csv::Writer;

use xd_core::{Task, Timestamp};
use xd_dock::HistoryRecord;

use crate::records::{read_rows, writer_builder};
use crate::StoreResult;

pub const HISTORY_FIELDS: usize = 7;

/// Appends [`HistoryRecord`]s to a file, flushing after each one.
///
/// Existing lines are never rewritten.
pub struct HistoryWriter {
    path:    PathBuf,
    writer:  Writer<File>,
    written: u64,
}

impl HistoryWriter {
    /// Open `path` for appending, creating it if absent.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self { writer: writer_builder().from_writer(file), path, written: 0 })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records appended through this writer.
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn append(&mut self, record: &HistoryRecord) -> StoreResult<()> {
        let task = &record.task;
        let arrival = task.arrival().to_string();
        let quantity = task.quantity().to_string();
        let start = record.start.to_string();
        let end = record.end.to_string();
        self.writer.write_record([
            record.action.as_str(),
            task.plate().as_str(),
            arrival.as_str(),
            task.item().as_str(),
            quantity.as_str(),
            start.as_str(),
            end.as_str(),
        ])?;
        self.writer.flush()?;
        self.written += 1;
        Ok(())
    }
}

/// Read a history file back in line order.  A missing file reads as empty.
pub fn read_history(path: &Path) -> StoreResult<Vec<HistoryRecord>> {
    let mut records = Vec::new();
    read_rows(path, HISTORY_FIELDS, |line| {
        let arrival: Timestamp = line.parse(2, "arrival time")?;
        let quantity: u32 = line.parse(4, "quantity")?;
        let start: Timestamp = line.parse(5, "start time")?;
        let end: Timestamp = line.parse(6, "end time")?;
        let task = Task::new(line.str(1), arrival, line.str(3), quantity)
            .map_err(|e| line.error(e.to_string()))?;
        records.push(HistoryRecord { action: line.str(0).to_owned(), task, start, end });
        Ok(())
    })?;
    Ok(records)
}
