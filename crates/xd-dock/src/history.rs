//! Completed-operation records.

use xd_core::{DockKind, Task, Timestamp};

use crate::DockOperation;

pub const ACTION_UNLOAD: &str = "unload_completed";
pub const ACTION_LOAD:   &str = "load_completed";

/// One completed dock operation.  Produced exactly once per completion and
/// never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRecord {
    /// Free-form label.  Records written by this engine use
    /// [`ACTION_UNLOAD`] or [`ACTION_LOAD`]; older files may hold others.
    pub action: String,
    /// The task as served (the reduced quantity for a partial load).
    pub task:   Task,
    pub start:  Timestamp,
    pub end:    Timestamp,
}

impl HistoryRecord {
    pub fn completed(kind: DockKind, op: &DockOperation) -> Self {
        let action = match kind {
            DockKind::Unload => ACTION_UNLOAD,
            DockKind::Load   => ACTION_LOAD,
        };
        Self {
            action: action.to_owned(),
            task:   op.task.clone(),
            start:  op.start,
            end:    op.end,
        }
    }

    /// The dock kind for records written by this engine.
    pub fn kind(&self) -> Option<DockKind> {
        match self.action.as_str() {
            ACTION_UNLOAD => Some(DockKind::Unload),
            ACTION_LOAD   => Some(DockKind::Load),
            _ => None,
        }
    }
}
