//! Definition items: the units a definition list is made of.

use std::fmt;

use crate::{Expr, Name, Pattern, Span, Stmt, TypeId};

/// Visibility of a definition, ordered from narrowest to widest.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord, Default)]
pub enum Access {
    #[default]
    Private,
    Protected,
    Public,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Access::Private => "private",
            Access::Protected => "protected",
            Access::Public => "public",
        })
    }
}

/// Item shapes, generic over the pattern node of the owning stage.
#[derive(Clone, PartialEq, Debug)]
pub enum ItemKind<P> {
    /// `pattern : declared = value`
    Value {
        pattern: P,
        declared: Option<TypeId>,
        value: Expr,
    },
    /// Explicit function with curried parameter pattern lists.
    Function {
        name: Name,
        ty: TypeId,
        params: Vec<Vec<P>>,
        body: Expr,
    },
    /// Explicit operation with one parameter pattern list.
    Operation {
        name: Name,
        ty: TypeId,
        params: Vec<P>,
        body: Stmt,
    },
    /// `name = ty` type definition.
    Type { name: Name, ty: TypeId },
}

/// Discriminant of [`ItemKind`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ItemTag {
    Value,
    Function,
    Operation,
    Type,
}

impl ItemTag {
    pub const ALL: [ItemTag; 4] = [
        ItemTag::Value,
        ItemTag::Function,
        ItemTag::Operation,
        ItemTag::Type,
    ];
}

impl fmt::Display for ItemTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ItemTag::Value => "value definition",
            ItemTag::Function => "function definition",
            ItemTag::Operation => "operation definition",
            ItemTag::Type => "type definition",
        })
    }
}

impl<P> ItemKind<P> {
    pub fn tag(&self) -> ItemTag {
        match self {
            ItemKind::Value { .. } => ItemTag::Value,
            ItemKind::Function { .. } => ItemTag::Function,
            ItemKind::Operation { .. } => ItemTag::Operation,
            ItemKind::Type { .. } => ItemTag::Type,
        }
    }

    /// All patterns the item binds, in source order.
    pub fn patterns(&self) -> Vec<&P> {
        match self {
            ItemKind::Value { pattern, .. } => vec![pattern],
            ItemKind::Function { params, .. } => params.iter().flatten().collect(),
            ItemKind::Operation { params, .. } => params.iter().collect(),
            ItemKind::Type { .. } => Vec::new(),
        }
    }

    /// Structural 1:1 copy into another pattern node type.
    pub fn try_map<Q, E>(
        &self,
        f: &mut impl FnMut(&P) -> Result<Q, E>,
    ) -> Result<ItemKind<Q>, E> {
        Ok(match self {
            ItemKind::Value {
                pattern,
                declared,
                value,
            } => ItemKind::Value {
                pattern: f(pattern)?,
                declared: *declared,
                value: value.clone(),
            },
            ItemKind::Function {
                name,
                ty,
                params,
                body,
            } => ItemKind::Function {
                name: *name,
                ty: *ty,
                params: params
                    .iter()
                    .map(|list| list.iter().map(|p| f(p)).collect::<Result<Vec<_>, E>>())
                    .collect::<Result<_, E>>()?,
                body: body.clone(),
            },
            ItemKind::Operation {
                name,
                ty,
                params,
                body,
            } => ItemKind::Operation {
                name: *name,
                ty: *ty,
                params: params.iter().map(|p| f(p)).collect::<Result<_, E>>()?,
                body: body.clone(),
            },
            ItemKind::Type { name, ty } => ItemKind::Type {
                name: *name,
                ty: *ty,
            },
        })
    }
}

/// An item as produced by the parser.
#[derive(Clone, PartialEq, Debug)]
pub struct Item<P = Pattern> {
    pub kind: ItemKind<P>,
    pub access: Access,
    pub span: Span,
}

impl<P> Item<P> {
    pub fn new(kind: ItemKind<P>, access: Access, span: Span) -> Self {
        Item { kind, access, span }
    }
}
