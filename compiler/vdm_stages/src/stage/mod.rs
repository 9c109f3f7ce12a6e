//! Stage-annotated trees.
//!
//! Every pipeline stage reuses the pattern and item shapes of `vdm_ir` and
//! attaches its own payload to each node. A [`Stage`] names the payload
//! types; [`StagedPattern`] and [`StagedItem`] carry them.

use std::fmt;

use vdm_ir::{Access, Item, ItemKind, PatternKind, PatternNode, Span};

use crate::check::CheckedItem;
use crate::exec::{Slot, SlotLayout};
use crate::pog::{Obligation, PatternFacts};

/// A pipeline stage: the payloads its pattern and item nodes carry.
pub trait Stage: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    const NAME: &'static str;
    type PatternData: Clone + PartialEq + fmt::Debug + Send;
    type ItemData: Clone + PartialEq + fmt::Debug + Send;
}

/// Type checking of definitions: item payloads hold the bindings.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct PreCheck;

impl Stage for PreCheck {
    const NAME: &'static str = "pre-check";
    type PatternData = ();
    type ItemData = CheckedItem;
}

/// Proof obligation generation: patterns carry their match facts.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct ObligationStage;

impl Stage for ObligationStage {
    const NAME: &'static str = "obligation";
    type PatternData = PatternFacts;
    type ItemData = Vec<Obligation>;
}

/// Execution preparation: identifiers carry their runtime slot.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Execution;

impl Stage for Execution {
    const NAME: &'static str = "execution";
    type PatternData = Option<Slot>;
    type ItemData = SlotLayout;
}

/// Pattern node of stage `S`.
#[derive(Clone, PartialEq, Debug)]
pub struct StagedPattern<S: Stage> {
    pub kind: PatternKind<StagedPattern<S>>,
    pub span: Span,
    pub data: S::PatternData,
}

impl<S: Stage> PatternNode for StagedPattern<S> {
    fn kind(&self) -> &PatternKind<Self> {
        &self.kind
    }

    fn span(&self) -> Span {
        self.span
    }
}

/// Item of stage `S`.
#[derive(Clone, PartialEq, Debug)]
pub struct StagedItem<S: Stage> {
    pub kind: ItemKind<StagedPattern<S>>,
    pub access: Access,
    pub span: Span,
    pub data: S::ItemData,
}

/// An item of any stage, parser items included.
pub trait ItemNode {
    type Pattern: PatternNode;

    fn kind(&self) -> &ItemKind<Self::Pattern>;
    fn access(&self) -> Access;
    fn span(&self) -> Span;
}

impl<P: PatternNode> ItemNode for Item<P> {
    type Pattern = P;

    fn kind(&self) -> &ItemKind<P> {
        &self.kind
    }

    fn access(&self) -> Access {
        self.access
    }

    fn span(&self) -> Span {
        self.span
    }
}

impl<S: Stage> ItemNode for StagedItem<S> {
    type Pattern = StagedPattern<S>;

    fn kind(&self) -> &ItemKind<StagedPattern<S>> {
        &self.kind
    }

    fn access(&self) -> Access {
        self.access
    }

    fn span(&self) -> Span {
        self.span
    }
}
