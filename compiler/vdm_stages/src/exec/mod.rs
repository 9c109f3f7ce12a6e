//! Execution preparation.
//!
//! Each item gets a [`SlotLayout`]: one runtime slot per distinct name its
//! patterns bind. Identifier nodes record their slot, so a name bound twice
//! in one pattern reads and writes the same slot.

use tracing::trace;
use vdm_ir::{ItemKind, Name, PatternKind};
use vdm_stack::ensure_sufficient_stack;

use crate::lower::{LoweringError, LoweringTable};
use crate::stage::{Execution, ObligationStage, StagedItem, StagedPattern};

/// Index of a runtime variable slot.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct Slot(u32);

impl Slot {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Slots of one item, in order of first binding.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct SlotLayout {
    names: Vec<Name>,
}

impl SlotLayout {
    /// The slot of `name`, allocating one on first use.
    pub fn allocate(&mut self, name: Name) -> Slot {
        let index = match self.names.iter().position(|n| *n == name) {
            Some(index) => index,
            None => {
                self.names.push(name);
                self.names.len() - 1
            }
        };
        Slot(u32::try_from(index).unwrap_or(u32::MAX))
    }

    pub fn slot_of(&self, name: Name) -> Option<Slot> {
        self.names
            .iter()
            .position(|n| *n == name)
            .map(|i| Slot(u32::try_from(i).unwrap_or(u32::MAX)))
    }

    /// Names by slot index.
    pub fn names(&self) -> &[Name] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Lowering from the obligation stage: no slots yet.
pub fn execution_table() -> LoweringTable<StagedItem<ObligationStage>, Execution> {
    LoweringTable::uniform(|_| None, |_| SlotLayout::default())
}

/// Lower items to the execution stage and allocate their slots.
#[tracing::instrument(level = "debug", skip_all, fields(items = items.len()))]
pub fn prepare_execution(
    items: &[StagedItem<ObligationStage>],
) -> Result<Vec<StagedItem<Execution>>, LoweringError> {
    let mut staged = execution_table().lower_items(items)?;
    for item in &mut staged {
        let mut layout = SlotLayout::default();
        match &mut item.kind {
            ItemKind::Value { pattern, .. } => assign_slots(pattern, &mut layout),
            ItemKind::Function { params, .. } => {
                for pattern in params.iter_mut().flatten() {
                    assign_slots(pattern, &mut layout);
                }
            }
            ItemKind::Operation { params, .. } => {
                for pattern in params {
                    assign_slots(pattern, &mut layout);
                }
            }
            ItemKind::Type { .. } => {}
        }
        trace!(slots = layout.len(), "slots allocated");
        item.data = layout;
    }
    Ok(staged)
}

fn assign_slots(pattern: &mut StagedPattern<Execution>, layout: &mut SlotLayout) {
    ensure_sufficient_stack(|| {
        if let PatternKind::Identifier(name) = pattern.kind {
            pattern.data = Some(layout.allocate(name));
        }
        for child in pattern.kind.children_mut() {
            assign_slots(child, layout);
        }
    });
}
