//! Static pattern properties.
//!
//! Every property is a single recursive descent over the pattern and never
//! consults the type being matched; only [`possible_type`] builds types, and
//! only from the pattern itself.

use std::fmt;
use std::ops::Add;

use vdm_ir::{Literal, PatternKind, PatternNode, StringLookup, TypeId};
use vdm_stack::ensure_sufficient_stack;
use vdm_types::{TypePool, TypeSet};

/// Number of values a pattern consumes from an aggregate.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Length {
    /// Unconstrained until matched.
    Any,
    Fixed(usize),
}

impl Length {
    pub fn is_any(self) -> bool {
        self == Length::Any
    }

    pub fn fixed(self) -> Option<usize> {
        match self {
            Length::Fixed(n) => Some(n),
            Length::Any => None,
        }
    }
}

impl Add for Length {
    type Output = Length;

    fn add(self, rhs: Length) -> Length {
        match (self, rhs) {
            (Length::Fixed(a), Length::Fixed(b)) => Length::Fixed(a.saturating_add(b)),
            _ => Length::Any,
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Any => f.write_str("any"),
            Length::Fixed(n) => write!(f, "{n}"),
        }
    }
}

/// Fixed length of `pattern`, or [`Length::Any`].
///
/// String literals count their characters. Other literals and object
/// patterns count one; tuple and record patterns their arity.
pub fn length<N: PatternNode>(pattern: &N, names: &dyn StringLookup) -> Length {
    ensure_sufficient_stack(|| match pattern.kind() {
        PatternKind::Identifier(_) | PatternKind::Ignore | PatternKind::Expression(_) => {
            Length::Any
        }
        PatternKind::Literal(Literal::String(s)) => Length::Fixed(names.lookup(*s).chars().count()),
        PatternKind::Literal(_) | PatternKind::Object { .. } => Length::Fixed(1),
        PatternKind::Tuple(list)
        | PatternKind::Set(list)
        | PatternKind::Seq(list)
        | PatternKind::Record { fields: list, .. } => Length::Fixed(list.len()),
        PatternKind::Map(maplets) => Length::Fixed(maplets.len()),
        PatternKind::MapUnion(left, right)
        | PatternKind::Concatenation(left, right)
        | PatternKind::Union(left, right) => length(&**left, names) + length(&**right, names),
    })
}

/// Does `pattern` match every value of a compatible type?
///
/// Set, sequence and map patterns fix a cardinality, which is a property of
/// the value, so they never always match.
pub fn always_matches<N: PatternNode>(pattern: &N) -> bool {
    ensure_sufficient_stack(|| match pattern.kind() {
        PatternKind::Identifier(_) | PatternKind::Ignore => true,
        PatternKind::Union(left, right) | PatternKind::Concatenation(left, right) => {
            always_matches(&**left) && always_matches(&**right)
        }
        PatternKind::Tuple(list) | PatternKind::Record { fields: list, .. } => {
            list.iter().all(always_matches)
        }
        PatternKind::Literal(_)
        | PatternKind::Object { .. }
        | PatternKind::Set(_)
        | PatternKind::Seq(_)
        | PatternKind::Map(_)
        | PatternKind::MapUnion(..)
        | PatternKind::Expression(_) => false,
    })
}

/// Does `pattern` denote a single value with no variables?
///
/// A simple pattern can be written verbatim as an expression.
pub fn is_simple<N: PatternNode>(pattern: &N) -> bool {
    ensure_sufficient_stack(|| match pattern.kind() {
        PatternKind::Identifier(_) | PatternKind::Ignore | PatternKind::Object { .. } => false,
        PatternKind::Literal(_) | PatternKind::Expression(_) => true,
        kind => kind.children().into_iter().all(is_simple),
    })
}

/// The broadest type `pattern` could match.
pub fn possible_type<N: PatternNode>(pattern: &N, pool: &mut TypePool) -> TypeId {
    ensure_sufficient_stack(|| match pattern.kind() {
        PatternKind::Identifier(_) | PatternKind::Ignore | PatternKind::Expression(_) => {
            TypeId::UNKNOWN
        }
        PatternKind::Literal(lit) => literal_type(*lit, pool),
        PatternKind::Tuple(list) => {
            let components = list.iter().map(|p| possible_type(p, pool)).collect();
            pool.product(components)
        }
        PatternKind::Record { ty, .. } | PatternKind::Object { ty, .. } => *ty,
        PatternKind::Set(list) if list.is_empty() => pool.empty_set(),
        PatternKind::Set(list) => {
            let elem = union_of(list.iter(), pool);
            pool.set(elem)
        }
        PatternKind::Seq(list) if list.is_empty() => pool.empty_seq(),
        PatternKind::Seq(list) => {
            let elem = union_of(list.iter(), pool);
            pool.seq(elem)
        }
        PatternKind::Map(maplets) if maplets.is_empty() => pool.empty_map(),
        PatternKind::Map(maplets) => {
            let dom = union_of(maplets.iter().map(|m| &m.from), pool);
            let rng = union_of(maplets.iter().map(|m| &m.to), pool);
            pool.map(dom, rng)
        }
        PatternKind::Union(left, right) => {
            let ty = union_of([&**left, &**right], pool);
            if pool.is_unknown(ty) {
                pool.set(TypeId::UNKNOWN)
            } else {
                ty
            }
        }
        PatternKind::Concatenation(left, right) => {
            let ty = union_of([&**left, &**right], pool);
            if pool.is_unknown(ty) {
                pool.seq(TypeId::UNKNOWN)
            } else {
                ty
            }
        }
        PatternKind::MapUnion(left, right) => {
            let ty = union_of([&**left, &**right], pool);
            if pool.is_unknown(ty) {
                pool.map(TypeId::UNKNOWN, TypeId::UNKNOWN)
            } else {
                ty
            }
        }
    })
}

/// Union of the possible types of `patterns`; `Unknown` absorbs everything.
fn union_of<'p, N: PatternNode + 'p>(
    patterns: impl IntoIterator<Item = &'p N>,
    pool: &mut TypePool,
) -> TypeId {
    let types: Vec<TypeId> = patterns
        .into_iter()
        .map(|p| possible_type(p, pool))
        .collect();
    if types.iter().any(|t| pool.is_unknown(*t)) {
        return TypeId::UNKNOWN;
    }
    TypeSet::from_types(pool, types).into_type(pool)
}

/// Type of a literal: the narrowest numeric type for integers.
pub fn literal_type(lit: Literal, pool: &mut TypePool) -> TypeId {
    match lit {
        Literal::Bool(_) => TypeId::BOOL,
        Literal::Char(_) => TypeId::CHAR,
        Literal::Int(v) if v > 0 => TypeId::NAT1,
        Literal::Int(0) => TypeId::NAT,
        Literal::Int(_) => TypeId::INT,
        Literal::Real(_) => TypeId::REAL,
        Literal::Quote(tag) => pool.quote(tag),
        Literal::String(_) => pool.seq(TypeId::CHAR),
        Literal::Nil => pool.optional(TypeId::UNKNOWN),
    }
}

#[cfg(test)]
mod tests;
