//! Shape predicates and accessors.
//!
//! Queries look through `Bracket`, `Optional` and named types to the concrete
//! shape underneath. A named or record type declared `opaque` hides its
//! shape from every module except the one that defines it, so each query
//! takes the asking module as `from`.
//!
//! `Unknown` (and a generic `@T`) answers every predicate with `true` and
//! every accessor with `Unknown` components. A union satisfies a predicate
//! when any member does; its accessor result is the union of the members'
//! components.

use smallvec::SmallVec;
use vdm_ir::{Name, TypeId};
use vdm_stack::ensure_sufficient_stack;

use crate::pool::Derived;
use crate::{FunctionType, OperationType, TypeFunctions, TypeKind, TypePool, TypeSet};

type Seen = SmallVec<[TypeId; 8]>;
type Shapes = SmallVec<[TypeId; 4]>;

/// Element facts of a set type.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct SetShape {
    pub elem: TypeId,
    /// The type of `{}`: there are no elements to bind.
    pub empty: bool,
    pub non_empty: bool,
}

/// Element facts of a sequence type.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct SeqShape {
    pub elem: TypeId,
    pub empty: bool,
    pub non_empty: bool,
}

/// Domain and range of a map type.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct MapShape {
    pub dom: TypeId,
    pub rng: TypeId,
    pub empty: bool,
    pub injective: bool,
}

#[derive(Copy, Clone, Eq, PartialEq)]
enum Relation {
    Eq,
    Ord,
}

impl Relation {
    fn declared(self, functions: &TypeFunctions) -> bool {
        match self {
            Relation::Eq => functions.eq.is_some(),
            Relation::Ord => functions.ord.is_some(),
        }
    }
}

#[inline]
fn visible(opaque: bool, module: Name, from: Name) -> bool {
    !opaque || module == from
}

impl TypePool {
    /// Concrete shapes reachable from `id`, in declaration order.
    ///
    /// `Unknown` and generic parameters are reported as `TypeId::UNKNOWN`.
    fn shapes(&self, id: TypeId, from: Name, out: &mut Shapes, seen: &mut Seen) {
        ensure_sufficient_stack(|| match self.kind(id) {
            TypeKind::Bracket(inner) | TypeKind::Optional(inner) => {
                self.shapes(*inner, from, out, seen);
            }
            TypeKind::Named(named) => {
                if seen.contains(&id) || !visible(named.opaque, named.module, from) {
                    return;
                }
                seen.push(id);
                self.shapes(named.inner, from, out, seen);
            }
            TypeKind::Union(members) => {
                for member in members {
                    self.shapes(*member, from, out, seen);
                }
            }
            TypeKind::Record(record) if !visible(record.opaque, record.module, from) => {}
            TypeKind::Unknown | TypeKind::Parameter(_) => {
                if !out.contains(&TypeId::UNKNOWN) {
                    out.push(TypeId::UNKNOWN);
                }
            }
            _ => {
                if !out.contains(&id) {
                    out.push(id);
                }
            }
        });
    }

    fn matching(&self, id: TypeId, from: Name, test: impl Fn(&TypeKind) -> bool) -> Shapes {
        let mut out = Shapes::new();
        self.shapes(id, from, &mut out, &mut Seen::new());
        out.retain(|s| *s == TypeId::UNKNOWN || test(self.kind(*s)));
        out
    }

    fn satisfies(&self, id: TypeId, from: Name, test: impl Fn(&TypeKind) -> bool) -> bool {
        !self.matching(id, from, test).is_empty()
    }

    // === Predicates ===

    pub fn is_unknown(&self, id: TypeId) -> bool {
        matches!(self.kind(self.debracket(id)), TypeKind::Unknown)
    }

    pub fn is_void(&self, id: TypeId) -> bool {
        matches!(self.kind(self.debracket(id)), TypeKind::Void)
    }

    pub fn is_optional(&self, id: TypeId) -> bool {
        matches!(self.kind(self.debracket(id)), TypeKind::Optional(_))
    }

    pub fn is_set(&self, id: TypeId, from: Name) -> bool {
        self.satisfies(id, from, |k| matches!(k, TypeKind::Set { .. }))
    }

    pub fn is_seq(&self, id: TypeId, from: Name) -> bool {
        self.satisfies(id, from, |k| matches!(k, TypeKind::Seq { .. }))
    }

    pub fn is_map(&self, id: TypeId, from: Name) -> bool {
        self.satisfies(id, from, |k| matches!(k, TypeKind::Map { .. }))
    }

    /// Is this a product of exactly `arity` components?
    pub fn is_product(&self, id: TypeId, arity: usize, from: Name) -> bool {
        self.satisfies(id, from, |k| matches!(k, TypeKind::Product(l) if l.len() == arity))
    }

    pub fn is_record(&self, id: TypeId, from: Name) -> bool {
        self.satisfies(id, from, |k| matches!(k, TypeKind::Record(_)))
    }

    pub fn is_class(&self, id: TypeId, from: Name) -> bool {
        self.satisfies(id, from, |k| matches!(k, TypeKind::Class(_)))
    }

    pub fn is_function(&self, id: TypeId, from: Name) -> bool {
        self.satisfies(id, from, |k| matches!(k, TypeKind::Function(_)))
    }

    pub fn is_operation(&self, id: TypeId, from: Name) -> bool {
        self.satisfies(id, from, |k| matches!(k, TypeKind::Operation(_)))
    }

    pub fn is_numeric(&self, id: TypeId, from: Name) -> bool {
        self.satisfies(id, from, |k| matches!(k, TypeKind::Basic(b) if b.is_numeric()))
    }

    /// Is the type, seen through brackets and visible names, a union?
    pub fn is_union(&self, id: TypeId, from: Name) -> bool {
        let mut seen = Seen::new();
        let mut id = self.debracket(id);
        loop {
            match self.kind(id) {
                TypeKind::Union(_) => return true,
                TypeKind::Named(named)
                    if !seen.contains(&id) && visible(named.opaque, named.module, from) =>
                {
                    seen.push(id);
                    id = self.debracket(named.inner);
                }
                _ => return false,
            }
        }
    }

    /// Do values of this type support `<`? Numeric types and types with an
    /// `ord` clause do.
    pub fn is_ordered(&self, id: TypeId, from: Name) -> bool {
        self.has_relation(id, from, Relation::Ord, &mut Seen::new())
    }

    /// Does the type carry a user-defined `eq` clause?
    pub fn is_eq(&self, id: TypeId, from: Name) -> bool {
        self.has_relation(id, from, Relation::Eq, &mut Seen::new())
    }

    fn has_relation(&self, id: TypeId, from: Name, which: Relation, seen: &mut Seen) -> bool {
        ensure_sufficient_stack(|| match self.kind(id) {
            TypeKind::Bracket(inner) | TypeKind::Optional(inner) => {
                self.has_relation(*inner, from, which, seen)
            }
            TypeKind::Union(members) => members
                .iter()
                .any(|m| self.has_relation(*m, from, which, seen)),
            TypeKind::Unknown | TypeKind::Parameter(_) => true,
            TypeKind::Basic(basic) => which == Relation::Ord && basic.is_numeric(),
            TypeKind::Named(named) => {
                if which.declared(&named.functions) {
                    return true;
                }
                if seen.contains(&id) || !visible(named.opaque, named.module, from) {
                    return false;
                }
                seen.push(id);
                self.has_relation(named.inner, from, which, seen)
            }
            TypeKind::Record(record) => which.declared(&record.functions),
            _ => false,
        })
    }

    // === Accessors ===

    fn set_shape(&self, id: TypeId) -> SetShape {
        match self.kind(id) {
            TypeKind::Set {
                elem,
                empty,
                non_empty,
            } => SetShape {
                elem: *elem,
                empty: *empty,
                non_empty: *non_empty,
            },
            _ => SetShape {
                elem: TypeId::UNKNOWN,
                empty: false,
                non_empty: false,
            },
        }
    }

    fn seq_shape(&self, id: TypeId) -> SeqShape {
        match self.kind(id) {
            TypeKind::Seq {
                elem,
                empty,
                non_empty,
            } => SeqShape {
                elem: *elem,
                empty: *empty,
                non_empty: *non_empty,
            },
            _ => SeqShape {
                elem: TypeId::UNKNOWN,
                empty: false,
                non_empty: false,
            },
        }
    }

    fn map_shape(&self, id: TypeId) -> MapShape {
        match self.kind(id) {
            TypeKind::Map {
                dom,
                rng,
                empty,
                injective,
            } => MapShape {
                dom: *dom,
                rng: *rng,
                empty: *empty,
                injective: *injective,
            },
            _ => MapShape {
                dom: TypeId::UNKNOWN,
                rng: TypeId::UNKNOWN,
                empty: false,
                injective: false,
            },
        }
    }

    /// Union of `parts`, cached against `(id, what)`.
    fn derive(
        &mut self,
        id: TypeId,
        what: Derived,
        parts: impl IntoIterator<Item = TypeId>,
    ) -> TypeId {
        if let Some(ty) = self.derived(id, what) {
            return ty;
        }
        let ty = TypeSet::from_types(self, parts).into_type(self);
        self.cache_derived(id, what, ty)
    }

    pub fn set_of(&mut self, id: TypeId, from: Name) -> Option<SetShape> {
        let found = self.matching(id, from, |k| matches!(k, TypeKind::Set { .. }));
        match found.as_slice() {
            [] => None,
            [only] => Some(self.set_shape(*only)),
            many => {
                let shapes: Vec<SetShape> = many.iter().map(|s| self.set_shape(*s)).collect();
                let elem = self.derive(
                    id,
                    Derived::SetElem,
                    shapes.iter().filter(|s| !s.empty).map(|s| s.elem),
                );
                Some(SetShape {
                    elem,
                    empty: shapes.iter().all(|s| s.empty),
                    non_empty: shapes.iter().all(|s| s.non_empty),
                })
            }
        }
    }

    pub fn seq_of(&mut self, id: TypeId, from: Name) -> Option<SeqShape> {
        let found = self.matching(id, from, |k| matches!(k, TypeKind::Seq { .. }));
        match found.as_slice() {
            [] => None,
            [only] => Some(self.seq_shape(*only)),
            many => {
                let shapes: Vec<SeqShape> = many.iter().map(|s| self.seq_shape(*s)).collect();
                let elem = self.derive(
                    id,
                    Derived::SeqElem,
                    shapes.iter().filter(|s| !s.empty).map(|s| s.elem),
                );
                Some(SeqShape {
                    elem,
                    empty: shapes.iter().all(|s| s.empty),
                    non_empty: shapes.iter().all(|s| s.non_empty),
                })
            }
        }
    }

    pub fn map_of(&mut self, id: TypeId, from: Name) -> Option<MapShape> {
        let found = self.matching(id, from, |k| matches!(k, TypeKind::Map { .. }));
        match found.as_slice() {
            [] => None,
            [only] => Some(self.map_shape(*only)),
            many => {
                let shapes: Vec<MapShape> = many.iter().map(|s| self.map_shape(*s)).collect();
                let live = || shapes.iter().filter(|s| !s.empty);
                let dom = self.derive(id, Derived::MapDom, live().map(|s| s.dom));
                let rng = self.derive(id, Derived::MapRng, live().map(|s| s.rng));
                Some(MapShape {
                    dom,
                    rng,
                    empty: shapes.iter().all(|s| s.empty),
                    injective: shapes.iter().all(|s| s.injective),
                })
            }
        }
    }

    /// Component types of a product of exactly `arity` components.
    pub fn product_of(&mut self, id: TypeId, arity: usize, from: Name) -> Option<Vec<TypeId>> {
        let found = self.matching(id, from, |k| matches!(k, TypeKind::Product(l) if l.len() == arity));
        let components = |pool: &TypePool, s: TypeId| -> Vec<TypeId> {
            match pool.kind(s) {
                TypeKind::Product(list) => list.clone(),
                _ => vec![TypeId::UNKNOWN; arity],
            }
        };
        match found.as_slice() {
            [] => None,
            [only] => Some(components(self, *only)),
            many => {
                let all: Vec<Vec<TypeId>> = many.iter().map(|s| components(self, *s)).collect();
                let arity_key = u32::try_from(arity).unwrap_or(u32::MAX);
                Some(
                    (0..arity)
                        .map(|i| {
                            let index = u32::try_from(i).unwrap_or(u32::MAX);
                            self.derive(
                                id,
                                Derived::ProductField {
                                    arity: arity_key,
                                    index,
                                },
                                all.iter().map(|c| c[i]),
                            )
                        })
                        .collect(),
                )
            }
        }
    }

    /// The first record type reachable from `id`.
    pub fn record_of(&self, id: TypeId, from: Name) -> Option<TypeId> {
        self.matching(id, from, |k| matches!(k, TypeKind::Record(_)))
            .into_iter()
            .find(|s| *s != TypeId::UNKNOWN)
    }

    /// The class of the first object type reachable from `id`.
    pub fn class_of(&self, id: TypeId, from: Name) -> Option<Name> {
        self.matching(id, from, |k| matches!(k, TypeKind::Class(_)))
            .into_iter()
            .find_map(|s| match self.kind(s) {
                TypeKind::Class(name) => Some(*name),
                _ => None,
            })
    }

    pub fn function_of(&self, id: TypeId, from: Name) -> Option<FunctionType> {
        let found = self.matching(id, from, |k| matches!(k, TypeKind::Function(_)));
        let first = *found.first()?;
        Some(match self.kind(first) {
            TypeKind::Function(f) => f.clone(),
            _ => FunctionType {
                params: Vec::new(),
                result: TypeId::UNKNOWN,
                partial: true,
            },
        })
    }

    pub fn operation_of(&self, id: TypeId, from: Name) -> Option<OperationType> {
        let found = self.matching(id, from, |k| matches!(k, TypeKind::Operation(_)));
        let first = *found.first()?;
        Some(match self.kind(first) {
            TypeKind::Operation(op) => op.clone(),
            _ => OperationType {
                params: Vec::new(),
                result: TypeId::UNKNOWN,
            },
        })
    }

    /// The named or record type called `name` that `id` is, or is a union
    /// alternative of.
    pub fn find_named(&self, id: TypeId, name: Name, from: Name) -> Option<TypeId> {
        self.find_named_in(id, name, from, &mut Seen::new())
    }

    fn find_named_in(&self, id: TypeId, name: Name, from: Name, seen: &mut Seen) -> Option<TypeId> {
        ensure_sufficient_stack(|| match self.kind(id) {
            TypeKind::Bracket(inner) | TypeKind::Optional(inner) => {
                self.find_named_in(*inner, name, from, seen)
            }
            TypeKind::Union(members) => members
                .iter()
                .find_map(|m| self.find_named_in(*m, name, from, seen)),
            TypeKind::Named(named) => {
                if named.name == name {
                    return Some(id);
                }
                if seen.contains(&id) || !visible(named.opaque, named.module, from) {
                    return None;
                }
                seen.push(id);
                self.find_named_in(named.inner, name, from, seen)
            }
            TypeKind::Record(record) => (record.name == name).then_some(id),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests;
