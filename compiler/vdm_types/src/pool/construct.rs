//! Type construction helpers for the pool.

use vdm_ir::{Name, Span, TypeId};

use crate::{Field, FunctionType, NamedType, OperationType, RecordType, TypeKind, TypePool};

impl TypePool {
    // === Collections ===

    /// `set of elem`
    pub fn set(&mut self, elem: TypeId) -> TypeId {
        self.alloc(
            TypeKind::Set {
                elem,
                empty: false,
                non_empty: false,
            },
            Span::DUMMY,
        )
    }

    /// `set1 of elem`
    pub fn set1(&mut self, elem: TypeId) -> TypeId {
        self.alloc(
            TypeKind::Set {
                elem,
                empty: false,
                non_empty: true,
            },
            Span::DUMMY,
        )
    }

    /// Type of the empty set `{}`.
    pub fn empty_set(&mut self) -> TypeId {
        self.alloc(
            TypeKind::Set {
                elem: TypeId::UNKNOWN,
                empty: true,
                non_empty: false,
            },
            Span::DUMMY,
        )
    }

    /// `seq of elem`
    pub fn seq(&mut self, elem: TypeId) -> TypeId {
        self.alloc(
            TypeKind::Seq {
                elem,
                empty: false,
                non_empty: false,
            },
            Span::DUMMY,
        )
    }

    /// `seq1 of elem`
    pub fn seq1(&mut self, elem: TypeId) -> TypeId {
        self.alloc(
            TypeKind::Seq {
                elem,
                empty: false,
                non_empty: true,
            },
            Span::DUMMY,
        )
    }

    /// Type of the empty sequence `[]`.
    pub fn empty_seq(&mut self) -> TypeId {
        self.alloc(
            TypeKind::Seq {
                elem: TypeId::UNKNOWN,
                empty: true,
                non_empty: false,
            },
            Span::DUMMY,
        )
    }

    /// `map dom to rng`
    pub fn map(&mut self, dom: TypeId, rng: TypeId) -> TypeId {
        self.alloc(
            TypeKind::Map {
                dom,
                rng,
                empty: false,
                injective: false,
            },
            Span::DUMMY,
        )
    }

    /// `inmap dom to rng`
    pub fn inmap(&mut self, dom: TypeId, rng: TypeId) -> TypeId {
        self.alloc(
            TypeKind::Map {
                dom,
                rng,
                empty: false,
                injective: true,
            },
            Span::DUMMY,
        )
    }

    /// Type of the empty map `{|->}`.
    pub fn empty_map(&mut self) -> TypeId {
        self.alloc(
            TypeKind::Map {
                dom: TypeId::UNKNOWN,
                rng: TypeId::UNKNOWN,
                empty: true,
                injective: false,
            },
            Span::DUMMY,
        )
    }

    // === Composites ===

    /// `t1 * ... * tn`
    pub fn product(&mut self, fields: Vec<TypeId>) -> TypeId {
        self.alloc(TypeKind::Product(fields), Span::DUMMY)
    }

    /// `t1 | ... | tn`, with no absorption; see [`TypeSet`](crate::TypeSet).
    pub fn union(&mut self, members: Vec<TypeId>) -> TypeId {
        self.alloc(TypeKind::Union(members), Span::DUMMY)
    }

    /// `[inner]`
    pub fn optional(&mut self, inner: TypeId) -> TypeId {
        self.alloc(TypeKind::Optional(inner), Span::DUMMY)
    }

    /// `(inner)`
    pub fn bracket(&mut self, inner: TypeId) -> TypeId {
        self.alloc(TypeKind::Bracket(inner), Span::DUMMY)
    }

    /// `p1 * ... * pn +> result`, or `->` when `partial`.
    pub fn function(&mut self, params: Vec<TypeId>, result: TypeId, partial: bool) -> TypeId {
        self.alloc(
            TypeKind::Function(FunctionType {
                params,
                result,
                partial,
            }),
            Span::DUMMY,
        )
    }

    /// `p1 * ... * pn ==> result`
    pub fn operation(&mut self, params: Vec<TypeId>, result: TypeId) -> TypeId {
        self.alloc(
            TypeKind::Operation(OperationType { params, result }),
            Span::DUMMY,
        )
    }

    // === Names ===

    pub fn quote(&mut self, tag: Name) -> TypeId {
        self.alloc(TypeKind::Quote(tag), Span::DUMMY)
    }

    pub fn named(&mut self, named: NamedType, span: Span) -> TypeId {
        self.alloc(TypeKind::Named(named), span)
    }

    pub fn record(&mut self, record: RecordType, span: Span) -> TypeId {
        self.alloc(TypeKind::Record(record), span)
    }

    /// Record type from `(tag, type)` pairs.
    pub fn record_of_fields(
        &mut self,
        name: Name,
        module: Name,
        fields: &[(Name, TypeId)],
        span: Span,
    ) -> TypeId {
        let fields = fields.iter().map(|&(tag, ty)| Field::new(tag, ty)).collect();
        self.record(RecordType::new(name, module, fields), span)
    }

    /// `@name`
    pub fn parameter(&mut self, name: Name, span: Span) -> TypeId {
        self.alloc(TypeKind::Parameter(name), span)
    }

    /// A type name awaiting resolution.
    pub fn unresolved(&mut self, name: Name, span: Span) -> TypeId {
        self.alloc(TypeKind::Unresolved(name), span)
    }

    pub fn class(&mut self, name: Name, span: Span) -> TypeId {
        self.alloc(TypeKind::Class(name), span)
    }

    /// The maximal view `T!` of a named or record type.
    ///
    /// Any other type is returned unchanged.
    pub fn maximal_of(&mut self, id: TypeId) -> TypeId {
        let kind = match self.kind(id) {
            TypeKind::Named(named) if !named.maximal => {
                let mut named = named.clone();
                named.maximal = true;
                TypeKind::Named(named)
            }
            TypeKind::Record(record) if !record.maximal => {
                let mut record = record.clone();
                record.maximal = true;
                TypeKind::Record(record)
            }
            _ => return id,
        };
        let resolved = self.is_resolved(id);
        let span = self.span(id);
        let max = self.alloc(kind, span);
        if resolved {
            self.mark_resolved(max);
        }
        max
    }
}
