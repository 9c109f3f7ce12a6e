//! Obligation stage driver.
//!
//! A value definition whose pattern might not match its value needs a proof
//! that it does. The obligation states that some instance of the pattern
//! equals the value:
//!
//! ```text
//! exists mk_(a, $any1) : (nat * nat) & mk_(a, $any1) = f(3)
//! ```
//!
//! Anonymous positions get fresh names so the quantifier can mention them.

use std::fmt;

use tracing::trace;
use vdm_ir::{ItemKind, Span, StringInterner};
use vdm_patterns::{
    always_matches, display_expr, display_pattern, is_simple, possible_type,
    remove_ignore_patterns, FreshNames,
};
use vdm_types::TypePool;

use crate::lower::{LoweringError, LoweringTable};
use crate::stage::{ObligationStage, PreCheck, StagedItem, StagedPattern};

/// Obligation options.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PoConfig {
    /// Also emit obligations for patterns that always match.
    pub emit_trivial: bool,
}

/// Match facts of a pattern node, computed during lowering.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct PatternFacts {
    pub always_matches: bool,
    pub simple: bool,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ObligationKind {
    /// A value definition's pattern matches its value.
    ValueBinding,
}

impl fmt::Display for ObligationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObligationKind::ValueBinding => f.write_str("value binding"),
        }
    }
}

/// A proof obligation with its text in concrete syntax.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Obligation {
    pub kind: ObligationKind,
    pub span: Span,
    pub text: String,
}

fn facts(pattern: &StagedPattern<PreCheck>) -> PatternFacts {
    PatternFacts {
        always_matches: always_matches(pattern),
        simple: is_simple(pattern),
    }
}

/// Lowering from the pre-check stage, attaching match facts to patterns.
pub fn obligation_table() -> LoweringTable<StagedItem<PreCheck>, ObligationStage> {
    LoweringTable::uniform(facts, |_| Vec::new())
}

/// The obligation stage tree and every obligation it produced.
#[derive(Clone, PartialEq, Debug)]
pub struct ObligationModule {
    pub items: Vec<StagedItem<ObligationStage>>,
    pub obligations: Vec<Obligation>,
}

/// Lower checked items and generate their obligations.
#[tracing::instrument(level = "debug", skip_all, fields(items = items.len()))]
pub fn generate_obligations(
    items: &[StagedItem<PreCheck>],
    pool: &mut TypePool,
    names: &StringInterner,
    config: &PoConfig,
) -> Result<ObligationModule, LoweringError> {
    let mut staged = obligation_table().lower_items(items)?;
    let mut fresh = FreshNames::new(names);
    let mut obligations = Vec::new();
    for item in &mut staged {
        let ItemKind::Value {
            pattern,
            declared,
            value,
        } = &item.kind
        else {
            continue;
        };
        if pattern.data.always_matches && !config.emit_trivial {
            continue;
        }
        let ty = declared.unwrap_or_else(|| possible_type(pattern, pool));
        let shown = if pattern.data.simple {
            display_pattern(pattern, pool, names).to_string()
        } else {
            let named = remove_ignore_patterns(pattern, &mut fresh);
            display_pattern(&named, pool, names).to_string()
        };
        let text = format!(
            "exists {shown} : {} & {shown} = {}",
            pool.format_type(ty, names),
            display_expr(value, pool, names),
        );
        trace!(%text, "value binding obligation");
        let obligation = Obligation {
            kind: ObligationKind::ValueBinding,
            span: item.span,
            text,
        };
        item.data.push(obligation.clone());
        obligations.push(obligation);
    }
    Ok(ObligationModule {
        items: staged,
        obligations,
    })
}
