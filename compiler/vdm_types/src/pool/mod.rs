//! Arena of type nodes.
//!
//! Every type lives in a [`TypePool`] and is referenced by [`TypeId`]. The
//! basic types and the `Void`/`Unknown`/`Undefined` markers occupy the fixed
//! slots declared on `TypeId`; everything else is appended.
//!
//! Each node carries a one-shot `resolved` bit. Resolution sets it on entry
//! so a self-referential definition is visited once; `unresolve` clears it
//! so a failed resolution can be retried.

mod construct;

use rustc_hash::FxHashMap;
use vdm_ir::{Span, TypeId};

use crate::{BasicType, TypeKind};

/// A type node with its source location and resolution state.
#[derive(Clone, Debug)]
pub struct TypeNode {
    pub kind: TypeKind,
    pub span: Span,
    resolved: bool,
}

/// Shapes synthesised from a union by the type accessors.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub(crate) enum Derived {
    SetElem,
    SeqElem,
    MapDom,
    MapRng,
    ProductField { arity: u32, index: u32 },
}

/// Arena of type nodes addressed by [`TypeId`].
#[derive(Clone, Debug)]
pub struct TypePool {
    nodes: Vec<TypeNode>,
    derived: FxHashMap<(TypeId, Derived), TypeId>,
}

impl Default for TypePool {
    fn default() -> Self {
        Self::new()
    }
}

impl TypePool {
    /// Create a pool with the fixed slots populated.
    pub fn new() -> Self {
        let mut pool = TypePool {
            nodes: Vec::with_capacity(64),
            derived: FxHashMap::default(),
        };
        for basic in BasicType::ALL {
            let id = pool.push(TypeKind::Basic(basic), Span::DUMMY);
            debug_assert_eq!(id, basic.id());
        }
        let void = pool.push(TypeKind::Void, Span::DUMMY);
        let unknown = pool.push(TypeKind::Unknown, Span::DUMMY);
        let undefined = pool.push(TypeKind::Undefined, Span::DUMMY);
        debug_assert_eq!(
            (void, unknown, undefined),
            (TypeId::VOID, TypeId::UNKNOWN, TypeId::UNDEFINED)
        );
        for node in &mut pool.nodes {
            node.resolved = true;
        }
        pool
    }

    fn push(&mut self, kind: TypeKind, span: Span) -> TypeId {
        let raw = u32::try_from(self.nodes.len()).unwrap_or(u32::MAX);
        self.nodes.push(TypeNode {
            kind,
            span,
            resolved: false,
        });
        TypeId::from_raw(raw)
    }

    /// Append a node.
    pub fn alloc(&mut self, kind: TypeKind, span: Span) -> TypeId {
        match kind {
            TypeKind::Basic(basic) => basic.id(),
            TypeKind::Void => TypeId::VOID,
            TypeKind::Unknown => TypeId::UNKNOWN,
            TypeKind::Undefined => TypeId::UNDEFINED,
            kind => self.push(kind, span),
        }
    }

    #[inline]
    pub fn node(&self, id: TypeId) -> &TypeNode {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn kind(&self, id: TypeId) -> &TypeKind {
        &self.nodes[id.index()].kind
    }

    #[inline]
    pub fn kind_mut(&mut self, id: TypeId) -> &mut TypeKind {
        &mut self.nodes[id.index()].kind
    }

    #[inline]
    pub fn span(&self, id: TypeId) -> Span {
        self.nodes[id.index()].span
    }

    #[inline]
    pub fn is_resolved(&self, id: TypeId) -> bool {
        self.nodes[id.index()].resolved
    }

    /// Set the resolved bit, returning its previous value.
    pub(crate) fn mark_resolved(&mut self, id: TypeId) -> bool {
        std::mem::replace(&mut self.nodes[id.index()].resolved, true)
    }

    /// Clear the resolved bit, returning its previous value.
    pub(crate) fn clear_resolved(&mut self, id: TypeId) -> bool {
        !id.is_primitive() && std::mem::replace(&mut self.nodes[id.index()].resolved, false)
    }

    pub(crate) fn derived(&self, id: TypeId, what: Derived) -> Option<TypeId> {
        self.derived.get(&(id, what)).copied()
    }

    pub(crate) fn cache_derived(&mut self, id: TypeId, what: Derived, ty: TypeId) -> TypeId {
        self.derived.insert((id, what), ty);
        ty
    }

    /// Drop every shape derived from `id`.
    pub(crate) fn forget_derived(&mut self, id: TypeId) {
        if !self.derived.is_empty() {
            self.derived.retain(|&(key, _), _| key != id);
        }
    }

    /// Number of nodes, including the fixed slots.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= TypeId::PRIMITIVE_COUNT as usize
    }

    /// Skip `Bracket` wrappers.
    pub fn debracket(&self, mut id: TypeId) -> TypeId {
        while let TypeKind::Bracket(inner) = self.kind(id) {
            id = *inner;
        }
        id
    }
}

#[cfg(test)]
mod tests;
