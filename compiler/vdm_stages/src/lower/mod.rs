//! Structural 1:1 lowering between stages.
//!
//! A [`LoweringTable`] holds one payload rule per pattern shape and per item
//! shape. Lowering copies the tree unchanged and asks the rule for the
//! node's shape what payload the copy carries. Table construction checks
//! that every shape has a rule, so lowering never meets a node it cannot
//! copy.

mod error;

use rustc_hash::FxHashMap;
use tracing::debug;
use vdm_ir::{ItemTag, PatternNode, PatternTag};
use vdm_stack::ensure_sufficient_stack;

use crate::stage::{ItemNode, Stage, StagedItem, StagedPattern};

pub use error::LoweringError;

/// Payload of the lowered copy of a pattern node.
pub type PatternRule<N, S> = fn(&N) -> <S as Stage>::PatternData;

/// Payload of the lowered copy of an item.
pub type ItemRule<I, S> = fn(&I) -> <S as Stage>::ItemData;

/// Lowering rules from items `I` to stage `S`.
pub struct LoweringTable<I: ItemNode, S: Stage> {
    patterns: FxHashMap<PatternTag, PatternRule<I::Pattern, S>>,
    items: FxHashMap<ItemTag, ItemRule<I, S>>,
}

impl<I: ItemNode, S: Stage> LoweringTable<I, S> {
    /// Build a table from explicit rules; every shape must have one.
    #[tracing::instrument(level = "debug", skip_all, fields(stage = S::NAME))]
    pub fn new(
        patterns: impl IntoIterator<Item = (PatternTag, PatternRule<I::Pattern, S>)>,
        items: impl IntoIterator<Item = (ItemTag, ItemRule<I, S>)>,
    ) -> Result<Self, LoweringError> {
        let table = LoweringTable {
            patterns: patterns.into_iter().collect(),
            items: items.into_iter().collect(),
        };
        if let Some(&tag) = PatternTag::ALL
            .iter()
            .find(|tag| !table.patterns.contains_key(tag))
        {
            return Err(LoweringError::MissingPattern {
                stage: S::NAME,
                tag,
            });
        }
        if let Some(&tag) = ItemTag::ALL.iter().find(|tag| !table.items.contains_key(tag)) {
            return Err(LoweringError::MissingItem {
                stage: S::NAME,
                tag,
            });
        }
        debug!(
            patterns = table.patterns.len(),
            items = table.items.len(),
            "lowering table validated"
        );
        Ok(table)
    }

    /// The same rule for every pattern shape and every item shape.
    pub fn uniform(pattern: PatternRule<I::Pattern, S>, item: ItemRule<I, S>) -> Self {
        LoweringTable {
            patterns: PatternTag::ALL.iter().map(|&tag| (tag, pattern)).collect(),
            items: ItemTag::ALL.iter().map(|&tag| (tag, item)).collect(),
        }
    }

    /// Replace the rule for one pattern shape.
    #[must_use]
    pub fn with_pattern_rule(mut self, tag: PatternTag, rule: PatternRule<I::Pattern, S>) -> Self {
        self.patterns.insert(tag, rule);
        self
    }

    pub fn lower_pattern(&self, pattern: &I::Pattern) -> Result<StagedPattern<S>, LoweringError> {
        ensure_sufficient_stack(|| {
            let tag = pattern.kind().tag();
            let rule = self
                .patterns
                .get(&tag)
                .ok_or(LoweringError::MissingPattern {
                    stage: S::NAME,
                    tag,
                })?;
            Ok(StagedPattern {
                kind: pattern.kind().try_map(&mut |child| self.lower_pattern(child))?,
                span: pattern.span(),
                data: rule(pattern),
            })
        })
    }

    pub fn lower_item(&self, item: &I) -> Result<StagedItem<S>, LoweringError> {
        let tag = item.kind().tag();
        let rule = self.items.get(&tag).ok_or(LoweringError::MissingItem {
            stage: S::NAME,
            tag,
        })?;
        Ok(StagedItem {
            kind: item.kind().try_map(&mut |p| self.lower_pattern(p))?,
            access: item.access(),
            span: item.span(),
            data: rule(item),
        })
    }

    /// Lower a definition list; the first failure aborts.
    #[tracing::instrument(level = "debug", skip_all, fields(stage = S::NAME, items = items.len()))]
    pub fn lower_items(&self, items: &[I]) -> Result<Vec<StagedItem<S>>, LoweringError> {
        items.iter().map(|item| self.lower_item(item)).collect()
    }
}
