//! Pipeline stages for the modelling-language core.
//!
//! The same pattern and item shapes pass through three stages, each with
//! its own node payload:
//!
//! 1. [`check`]: resolve types, bind patterns, collect definitions
//! 2. [`pog`]: proof obligations for value definitions that may not match
//! 3. [`exec`]: runtime slots for bound names
//!
//! Trees move from one stage to the next through a [`LoweringTable`], a
//! structural copy with a per-shape payload rule. [`batch`] checks
//! independent units in parallel.

pub mod batch;
pub mod check;
pub mod exec;
mod lower;
pub mod pog;
mod stage;

pub use batch::{check_units, Unit, UnitReport};
pub use check::{check_module, precheck_table, CheckConfig, CheckedItem, CheckedModule};
pub use exec::{execution_table, prepare_execution, Slot, SlotLayout};
pub use lower::{ItemRule, LoweringError, LoweringTable, PatternRule};
pub use pog::{
    generate_obligations, obligation_table, Obligation, ObligationKind, ObligationModule,
    PatternFacts, PoConfig,
};
pub use stage::{Execution, ItemNode, ObligationStage, PreCheck, Stage, StagedItem, StagedPattern};
