//! Pattern trees.
//!
//! `PatternKind<P>` is the closed set of pattern shapes, generic over the
//! child node `P`. The parser's tree instantiates it with [`Pattern`]; each
//! pipeline stage instantiates it with its own annotated node. Algorithms that
//! must behave identically at every stage are written once against
//! [`PatternNode`].

use std::fmt;

use crate::{Expr, Literal, Name, Span, TypeId};

/// A `from |-> to` entry of a map pattern.
#[derive(Clone, PartialEq, Debug)]
pub struct Maplet<P> {
    pub from: P,
    pub to: P,
}

/// A `field |-> pattern` entry of an object pattern.
#[derive(Clone, PartialEq, Debug)]
pub struct ObjectField<P> {
    pub field: Name,
    pub pattern: P,
}

/// Pattern shapes.
#[derive(Clone, PartialEq, Debug)]
pub enum PatternKind<P> {
    /// Binds the matched value to a name.
    Identifier(Name),
    /// `-`: matches anything, binds nothing.
    Ignore,
    /// Matches exactly the literal's value.
    Literal(Literal),
    /// `mk_(p1, ..., pn)`
    Tuple(Vec<P>),
    /// `mk_R(p1, ..., pn)`; `ty` is the handle of the record type named `typename`.
    Record {
        typename: Name,
        ty: TypeId,
        fields: Vec<P>,
    },
    /// `obj_C(f1 |-> p1, ...)`; `ty` is the handle of the class type named `classname`.
    Object {
        classname: Name,
        ty: TypeId,
        fields: Vec<ObjectField<P>>,
    },
    /// `{p1, ..., pn}`
    Set(Vec<P>),
    /// `[p1, ..., pn]`
    Seq(Vec<P>),
    /// `{p1 |-> q1, ...}`
    Map(Vec<Maplet<P>>),
    /// `p munion q`
    MapUnion(Box<P>, Box<P>),
    /// `p ^ q`
    Concatenation(Box<P>, Box<P>),
    /// `p union q`
    Union(Box<P>, Box<P>),
    /// `(expr)`: matches the value of an expression.
    Expression(Box<Expr>),
}

/// Discriminant of [`PatternKind`], used to key per-variant tables.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum PatternTag {
    Identifier,
    Ignore,
    Literal,
    Tuple,
    Record,
    Object,
    Set,
    Seq,
    Map,
    MapUnion,
    Concatenation,
    Union,
    Expression,
}

impl PatternTag {
    /// Every tag, in declaration order.
    pub const ALL: [PatternTag; 13] = [
        PatternTag::Identifier,
        PatternTag::Ignore,
        PatternTag::Literal,
        PatternTag::Tuple,
        PatternTag::Record,
        PatternTag::Object,
        PatternTag::Set,
        PatternTag::Seq,
        PatternTag::Map,
        PatternTag::MapUnion,
        PatternTag::Concatenation,
        PatternTag::Union,
        PatternTag::Expression,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PatternTag::Identifier => "identifier",
            PatternTag::Ignore => "ignore",
            PatternTag::Literal => "literal",
            PatternTag::Tuple => "tuple",
            PatternTag::Record => "record",
            PatternTag::Object => "object",
            PatternTag::Set => "set",
            PatternTag::Seq => "sequence",
            PatternTag::Map => "map",
            PatternTag::MapUnion => "map union",
            PatternTag::Concatenation => "concatenation",
            PatternTag::Union => "union",
            PatternTag::Expression => "expression",
        }
    }
}

impl fmt::Display for PatternTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<P> PatternKind<P> {
    pub fn tag(&self) -> PatternTag {
        match self {
            PatternKind::Identifier(_) => PatternTag::Identifier,
            PatternKind::Ignore => PatternTag::Ignore,
            PatternKind::Literal(_) => PatternTag::Literal,
            PatternKind::Tuple(_) => PatternTag::Tuple,
            PatternKind::Record { .. } => PatternTag::Record,
            PatternKind::Object { .. } => PatternTag::Object,
            PatternKind::Set(_) => PatternTag::Set,
            PatternKind::Seq(_) => PatternTag::Seq,
            PatternKind::Map(_) => PatternTag::Map,
            PatternKind::MapUnion(..) => PatternTag::MapUnion,
            PatternKind::Concatenation(..) => PatternTag::Concatenation,
            PatternKind::Union(..) => PatternTag::Union,
            PatternKind::Expression(_) => PatternTag::Expression,
        }
    }

    /// Direct sub-patterns in source order.
    pub fn children(&self) -> Vec<&P> {
        match self {
            PatternKind::Identifier(_)
            | PatternKind::Ignore
            | PatternKind::Literal(_)
            | PatternKind::Expression(_) => Vec::new(),
            PatternKind::Tuple(list)
            | PatternKind::Set(list)
            | PatternKind::Seq(list)
            | PatternKind::Record { fields: list, .. } => list.iter().collect(),
            PatternKind::Object { fields, .. } => fields.iter().map(|f| &f.pattern).collect(),
            PatternKind::Map(maplets) => maplets.iter().flat_map(|m| [&m.from, &m.to]).collect(),
            PatternKind::MapUnion(left, right)
            | PatternKind::Concatenation(left, right)
            | PatternKind::Union(left, right) => vec![&**left, &**right],
        }
    }

    /// Mutable access to the direct sub-patterns in source order.
    pub fn children_mut(&mut self) -> Vec<&mut P> {
        match self {
            PatternKind::Identifier(_)
            | PatternKind::Ignore
            | PatternKind::Literal(_)
            | PatternKind::Expression(_) => Vec::new(),
            PatternKind::Tuple(list)
            | PatternKind::Set(list)
            | PatternKind::Seq(list)
            | PatternKind::Record { fields: list, .. } => list.iter_mut().collect(),
            PatternKind::Object { fields, .. } => {
                fields.iter_mut().map(|f| &mut f.pattern).collect()
            }
            PatternKind::Map(maplets) => maplets
                .iter_mut()
                .flat_map(|m| [&mut m.from, &mut m.to])
                .collect(),
            PatternKind::MapUnion(left, right)
            | PatternKind::Concatenation(left, right)
            | PatternKind::Union(left, right) => vec![&mut **left, &mut **right],
        }
    }

    /// Structural 1:1 copy into another child type.
    ///
    /// `f` is applied to every child in source order; the first error aborts
    /// the copy.
    pub fn try_map<Q, E>(
        &self,
        f: &mut impl FnMut(&P) -> Result<Q, E>,
    ) -> Result<PatternKind<Q>, E> {
        Ok(match self {
            PatternKind::Identifier(name) => PatternKind::Identifier(*name),
            PatternKind::Ignore => PatternKind::Ignore,
            PatternKind::Literal(lit) => PatternKind::Literal(*lit),
            PatternKind::Tuple(list) => PatternKind::Tuple(map_list(list, f)?),
            PatternKind::Record {
                typename,
                ty,
                fields,
            } => PatternKind::Record {
                typename: *typename,
                ty: *ty,
                fields: map_list(fields, f)?,
            },
            PatternKind::Object {
                classname,
                ty,
                fields,
            } => PatternKind::Object {
                classname: *classname,
                ty: *ty,
                fields: fields
                    .iter()
                    .map(|field| {
                        Ok(ObjectField {
                            field: field.field,
                            pattern: f(&field.pattern)?,
                        })
                    })
                    .collect::<Result<_, E>>()?,
            },
            PatternKind::Set(list) => PatternKind::Set(map_list(list, f)?),
            PatternKind::Seq(list) => PatternKind::Seq(map_list(list, f)?),
            PatternKind::Map(maplets) => PatternKind::Map(
                maplets
                    .iter()
                    .map(|m| {
                        Ok(Maplet {
                            from: f(&m.from)?,
                            to: f(&m.to)?,
                        })
                    })
                    .collect::<Result<_, E>>()?,
            ),
            PatternKind::MapUnion(left, right) => {
                PatternKind::MapUnion(Box::new(f(left)?), Box::new(f(right)?))
            }
            PatternKind::Concatenation(left, right) => {
                PatternKind::Concatenation(Box::new(f(left)?), Box::new(f(right)?))
            }
            PatternKind::Union(left, right) => {
                PatternKind::Union(Box::new(f(left)?), Box::new(f(right)?))
            }
            PatternKind::Expression(expr) => PatternKind::Expression(expr.clone()),
        })
    }
}

fn map_list<P, Q, E>(
    list: &[P],
    f: &mut impl FnMut(&P) -> Result<Q, E>,
) -> Result<Vec<Q>, E> {
    list.iter().map(|p| f(p)).collect()
}

/// A pattern node of some pipeline stage.
///
/// Implemented by the parser's [`Pattern`] and by every stage's annotated
/// node, so properties and matching are computed by one implementation.
pub trait PatternNode: Sized {
    fn kind(&self) -> &PatternKind<Self>;
    fn span(&self) -> Span;
}

/// Pattern as produced by the parser.
#[derive(Clone, PartialEq, Debug)]
pub struct Pattern {
    pub kind: PatternKind<Pattern>,
    pub span: Span,
}

impl PatternNode for Pattern {
    fn kind(&self) -> &PatternKind<Self> {
        &self.kind
    }

    fn span(&self) -> Span {
        self.span
    }
}

impl Pattern {
    pub fn new(kind: PatternKind<Pattern>, span: Span) -> Self {
        Pattern { kind, span }
    }

    pub fn identifier(name: Name, span: Span) -> Self {
        Pattern::new(PatternKind::Identifier(name), span)
    }

    pub fn ignore(span: Span) -> Self {
        Pattern::new(PatternKind::Ignore, span)
    }

    pub fn literal(lit: Literal, span: Span) -> Self {
        Pattern::new(PatternKind::Literal(lit), span)
    }

    pub fn tuple(list: Vec<Pattern>, span: Span) -> Self {
        Pattern::new(PatternKind::Tuple(list), span)
    }

    pub fn record(typename: Name, ty: TypeId, fields: Vec<Pattern>, span: Span) -> Self {
        Pattern::new(
            PatternKind::Record {
                typename,
                ty,
                fields,
            },
            span,
        )
    }

    pub fn object(
        classname: Name,
        ty: TypeId,
        fields: Vec<(Name, Pattern)>,
        span: Span,
    ) -> Self {
        let fields = fields
            .into_iter()
            .map(|(field, pattern)| ObjectField { field, pattern })
            .collect();
        Pattern::new(
            PatternKind::Object {
                classname,
                ty,
                fields,
            },
            span,
        )
    }

    pub fn set(list: Vec<Pattern>, span: Span) -> Self {
        Pattern::new(PatternKind::Set(list), span)
    }

    pub fn seq(list: Vec<Pattern>, span: Span) -> Self {
        Pattern::new(PatternKind::Seq(list), span)
    }

    pub fn map(maplets: Vec<(Pattern, Pattern)>, span: Span) -> Self {
        let maplets = maplets
            .into_iter()
            .map(|(from, to)| Maplet { from, to })
            .collect();
        Pattern::new(PatternKind::Map(maplets), span)
    }

    pub fn map_union(left: Pattern, right: Pattern) -> Self {
        let span = left.span.merge(right.span);
        Pattern::new(PatternKind::MapUnion(Box::new(left), Box::new(right)), span)
    }

    pub fn concatenation(left: Pattern, right: Pattern) -> Self {
        let span = left.span.merge(right.span);
        Pattern::new(
            PatternKind::Concatenation(Box::new(left), Box::new(right)),
            span,
        )
    }

    pub fn union(left: Pattern, right: Pattern) -> Self {
        let span = left.span.merge(right.span);
        Pattern::new(PatternKind::Union(Box::new(left), Box::new(right)), span)
    }

    pub fn expression(expr: Expr) -> Self {
        let span = expr.span;
        Pattern::new(PatternKind::Expression(Box::new(expr)), span)
    }
}

#[cfg(test)]
mod tests;
