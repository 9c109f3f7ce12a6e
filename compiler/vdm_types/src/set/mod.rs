//! Type sets with absorption.
//!
//! A [`TypeSet`] accumulates the alternatives of a union. Insertion keeps the
//! set minimal:
//!
//! - `seq1 of T` is dropped when `seq of T` is present, and inserting
//!   `seq of T` removes `seq1 of T` (the same holds for `set`/`set1`)
//! - of several numeric types only the widest is kept
//! - `[T]` removes a bare `T`, and `T` is dropped when `[T]` is present
//! - nested unions are flattened

use smallvec::SmallVec;
use vdm_ir::TypeId;

use crate::{types_equal, types_identical, TypeKind, TypePool};

/// Insertion-ordered set of types.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeSet {
    members: SmallVec<[TypeId; 4]>,
}

impl TypeSet {
    pub fn new() -> Self {
        TypeSet::default()
    }

    /// Build a set by inserting each type in turn.
    pub fn from_types(pool: &TypePool, types: impl IntoIterator<Item = TypeId>) -> Self {
        let mut set = TypeSet::new();
        for ty in types {
            set.insert(pool, ty);
        }
        set
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.members.iter().copied()
    }

    pub fn contains(&self, pool: &TypePool, ty: TypeId) -> bool {
        self.members.iter().any(|m| types_identical(pool, *m, ty))
    }

    fn remove_where(&mut self, mut pred: impl FnMut(TypeId) -> bool) {
        self.members.retain(|m| !pred(*m));
    }

    /// Insert `ty`, applying the absorption rules.
    pub fn insert(&mut self, pool: &TypePool, ty: TypeId) {
        let bare = pool.debracket(ty);
        match pool.kind(bare) {
            TypeKind::Union(members) => {
                for member in members {
                    self.insert(pool, *member);
                }
                return;
            }
            TypeKind::Seq {
                elem,
                non_empty,
                empty: false,
            } => {
                let elem = *elem;
                let is_seq = |m: TypeId, want_non_empty: bool| {
                    matches!(pool.kind(pool.debracket(m)),
                        TypeKind::Seq { elem: e, non_empty: n, empty: false }
                            if *n == want_non_empty && types_equal(pool, *e, elem))
                };
                if *non_empty {
                    if self.iter().any(|m| is_seq(m, false)) {
                        return;
                    }
                } else {
                    self.remove_where(|m| is_seq(m, true));
                }
            }
            TypeKind::Set {
                elem,
                non_empty,
                empty: false,
            } => {
                let elem = *elem;
                let is_set = |m: TypeId, want_non_empty: bool| {
                    matches!(pool.kind(pool.debracket(m)),
                        TypeKind::Set { elem: e, non_empty: n, empty: false }
                            if *n == want_non_empty && types_equal(pool, *e, elem))
                };
                if *non_empty {
                    if self.iter().any(|m| is_set(m, false)) {
                        return;
                    }
                } else {
                    self.remove_where(|m| is_set(m, true));
                }
            }
            TypeKind::Basic(basic) => {
                if let Some(weight) = basic.numeric_weight() {
                    let widest = self.iter().find_map(|m| match pool.kind(pool.debracket(m)) {
                        TypeKind::Basic(b) => b.numeric_weight().map(|w| (m, w)),
                        _ => None,
                    });
                    match widest {
                        Some((_, present)) if present >= weight => return,
                        Some((narrower, _)) => self.remove_where(|m| m == narrower),
                        None => {}
                    }
                }
            }
            TypeKind::Optional(inner) => {
                let inner = *inner;
                if !matches!(pool.kind(inner), TypeKind::Unknown) {
                    self.remove_where(|m| types_identical(pool, m, inner));
                }
            }
            _ => {}
        }

        let optional_present = self.iter().any(|m| {
            matches!(pool.kind(pool.debracket(m)),
                TypeKind::Optional(inner) if types_identical(pool, *inner, ty))
        });
        if optional_present || self.contains(pool, ty) {
            return;
        }
        self.members.push(ty);
    }

    /// The type the set denotes: `Unknown` when empty, the sole member, or
    /// the union of all members.
    pub fn into_type(self, pool: &mut TypePool) -> TypeId {
        match self.members.len() {
            0 => TypeId::UNKNOWN,
            1 => self.members[0],
            _ => pool.union(self.members.into_vec()),
        }
    }
}

#[cfg(test)]
mod tests;
