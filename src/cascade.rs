//! Cascading aesthetic selection
//!
//! An [`Assignment`] holds one optional column per aesthetic slot. Slots are filled
//! strictly left to right:
//!
//! - a slot is visible only when every slot before it holds a column
//! - a visible slot offers every column not already taken by an earlier slot
//! - writing a slot clears every slot after it, even if the value is unchanged
//!
//! The assignment is the single source of truth: the columns still on offer are
//! recomputed from it on every call rather than tracked separately.
//!
//! # Example
//!
//! ```rust
//! use ggpick::{available_for, set_slot, Aesthetic, Assignment, Column};
//!
//! let assignment = set_slot(Aesthetic::X, Some(Column::Mpg), &Assignment::new())?;
//! let options = available_for(Aesthetic::Y, &assignment).unwrap();
//! assert!(!options.contains(&Some(Column::Mpg)));
//! # Ok::<(), ggpick::GgpickError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::plot::{Aesthetic, Column};
use crate::{GgpickError, Result};

/// The current column per aesthetic slot (`None` = unset)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Assignment {
    slots: [Option<Column>; 5],
}

impl Assignment {
    /// A fully unset assignment
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: Aesthetic) -> Option<Column> {
        self.slots[slot.index()]
    }

    /// Iterate over `(slot, value)` pairs in selection order
    pub fn iter(&self) -> impl Iterator<Item = (Aesthetic, Option<Column>)> + '_ {
        Aesthetic::ALL.into_iter().zip(self.slots.iter().copied())
    }

    /// Concrete columns, in slot order
    pub fn bound(&self) -> Vec<Column> {
        self.slots.iter().flatten().copied().collect()
    }

    /// A slot is shown once every slot before it holds a column
    pub fn is_visible(&self, slot: Aesthetic) -> bool {
        slot.upstream().iter().all(|s| self.get(*s).is_some())
    }

    /// All five columns, if every slot is concrete
    pub fn complete(&self) -> Option<[Column; 5]> {
        let [x, y, color, size, shape] = self.slots;
        Some([x?, y?, color?, size?, shape?])
    }

    pub fn is_complete(&self) -> bool {
        self.complete().is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

impl std::fmt::Display for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .slots
            .iter()
            .map(|slot| match slot {
                Some(column) => column.name().to_string(),
                None => "-".to_string(),
            })
            .collect();
        write!(f, "({})", parts.join(", "))
    }
}

/// Choices offered for `slot`: the unset sentinel first, then every column not
/// bound to an earlier slot, in dataset order.
///
/// Returns `None` when the slot is hidden because an earlier slot is unset.
pub fn available_for(slot: Aesthetic, assignment: &Assignment) -> Option<Vec<Option<Column>>> {
    if !assignment.is_visible(slot) {
        return None;
    }

    let taken: Vec<Column> = slot
        .upstream()
        .iter()
        .filter_map(|s| assignment.get(*s))
        .collect();

    let mut choices = Vec::with_capacity(1 + Column::ALL.len() - taken.len());
    choices.push(None);
    choices.extend(
        Column::ALL
            .into_iter()
            .filter(|column| !taken.contains(column))
            .map(Some),
    );
    Some(choices)
}

/// Write `column` into `slot` and reset every later slot.
///
/// Unsetting a slot is always accepted. A concrete column must be on offer for the
/// slot, otherwise the selection is rejected and `assignment` is left untouched.
pub fn set_slot(
    slot: Aesthetic,
    column: Option<Column>,
    assignment: &Assignment,
) -> Result<Assignment> {
    if let Some(column) = column {
        let choices = available_for(slot, assignment).ok_or_else(|| {
            GgpickError::HiddenSlot(format!(
                "cannot bind '{}' to {}: an earlier slot is still unset",
                column, slot
            ))
        })?;
        if !choices.contains(&Some(column)) {
            return Err(GgpickError::InvalidSelection(format!(
                "column '{}' is not available for {} in {}",
                column, slot, assignment
            )));
        }
    }

    let mut next = *assignment;
    next.slots[slot.index()] = column;
    for downstream in slot.downstream() {
        next.slots[downstream.index()] = None;
    }
    Ok(next)
}

/// A user action on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Change the value of one slot
    Select {
        slot: Aesthetic,
        column: Option<Column>,
    },
    /// Clear every slot
    Reset,
}

/// Apply an event to an assignment, producing the next assignment
pub fn reduce(assignment: &Assignment, event: Event) -> Result<Assignment> {
    match event {
        Event::Select { slot, column } => set_slot(slot, column, assignment),
        Event::Reset => Ok(Assignment::new()),
    }
}
