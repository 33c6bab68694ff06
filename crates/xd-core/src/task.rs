//! The `Task` record and the dock kind it is queued for.

use std::fmt;
use std::num::NonZeroU32;

use crate::{ItemId, Plate, Timestamp, XdError, XdResult};

/// Which dock (and which queue) a task belongs to.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DockKind {
    /// Cargo goes from the vehicle into the warehouse.
    Unload,
    /// Cargo goes from the warehouse onto the vehicle.
    Load,
}

impl DockKind {
    pub const ALL: [DockKind; 2] = [DockKind::Unload, DockKind::Load];

    pub fn as_str(self) -> &'static str {
        match self {
            DockKind::Unload => "unload",
            DockKind::Load   => "load",
        }
    }
}

impl fmt::Display for DockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One vehicle's pending operation.
///
/// The fields are private so that `quantity > 0` holds for every `Task` that
/// exists; construct through [`Task::new`].
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "TaskFields"))]
pub struct Task {
    plate:    Plate,
    arrival:  Timestamp,
    item:     ItemId,
    quantity: u32,
}

impl Task {
    /// Validate and build a task.
    ///
    /// # Errors
    /// [`XdError::InvalidTask`] if `quantity` is zero or the plate or item is
    /// blank.
    pub fn new(
        plate:    impl Into<Plate>,
        arrival:  Timestamp,
        item:     impl Into<ItemId>,
        quantity: u32,
    ) -> XdResult<Task> {
        let plate = plate.into();
        let item = item.into();
        if quantity == 0 {
            return Err(XdError::InvalidTask(format!("{plate}: quantity must be positive")));
        }
        if plate.is_blank() {
            return Err(XdError::InvalidTask("missing plate".into()));
        }
        if item.is_blank() {
            return Err(XdError::InvalidTask(format!("{plate}: missing item")));
        }
        Ok(Task { plate, arrival, item, quantity })
    }

    #[inline]
    pub fn plate(&self) -> &Plate {
        &self.plate
    }

    #[inline]
    pub fn arrival(&self) -> Timestamp {
        self.arrival
    }

    #[inline]
    pub fn item(&self) -> &ItemId {
        &self.item
    }

    #[inline]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Split off `take` units.
    ///
    /// Returns `(taken, remainder)`.  `taken` holds `min(take, quantity)`
    /// units and is never empty; `remainder` is `None` when `take` covers the
    /// whole quantity.  Both halves keep the plate, arrival, and item of
    /// `self`.
    pub fn split(self, take: NonZeroU32) -> (Task, Option<Task>) {
        let take = take.get().min(self.quantity);
        let rest = self.quantity - take;
        let remainder = (rest > 0).then(|| Task { quantity: rest, ..self.clone() });
        (Task { quantity: take, ..self }, remainder)
    }
}

/// Unvalidated wire form of a [`Task`]; deserialization goes through
/// [`Task::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct TaskFields {
    plate:    Plate,
    arrival:  Timestamp,
    item:     ItemId,
    quantity: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<TaskFields> for Task {
    type Error = XdError;

    fn try_from(f: TaskFields) -> XdResult<Task> {
        Task::new(f.plate, f.arrival, f.item, f.quantity)
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}; {}; {}", self.plate, self.item, self.quantity)
    }
}
