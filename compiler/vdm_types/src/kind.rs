//! Type node shapes.
//!
//! A type is a node in a [`TypePool`](crate::TypePool); every child is a
//! [`TypeId`] handle, so a named type whose body mentions its own name is an
//! ordinary graph edge rather than an owned recursive value.

use std::sync::OnceLock;

use smallvec::SmallVec;
use vdm_ir::{Name, TypeId};

use crate::env::{DefId, Environment, NameScope};

/// The built-in scalar types.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BasicType {
    Bool,
    Nat,
    Nat1,
    Int,
    Rat,
    Real,
    Char,
    Token,
}

impl BasicType {
    pub const ALL: [BasicType; 8] = [
        BasicType::Bool,
        BasicType::Nat,
        BasicType::Nat1,
        BasicType::Int,
        BasicType::Rat,
        BasicType::Real,
        BasicType::Char,
        BasicType::Token,
    ];

    /// The pre-allocated pool slot of this type.
    pub const fn id(self) -> TypeId {
        match self {
            BasicType::Bool => TypeId::BOOL,
            BasicType::Nat => TypeId::NAT,
            BasicType::Nat1 => TypeId::NAT1,
            BasicType::Int => TypeId::INT,
            BasicType::Rat => TypeId::RAT,
            BasicType::Real => TypeId::REAL,
            BasicType::Char => TypeId::CHAR,
            BasicType::Token => TypeId::TOKEN,
        }
    }

    /// Width of a numeric type; `None` for non-numeric types.
    ///
    /// `nat1 < nat < int < rat < real`: every value of a narrower type is a
    /// value of every wider one.
    pub const fn numeric_weight(self) -> Option<u8> {
        match self {
            BasicType::Nat1 => Some(1),
            BasicType::Nat => Some(2),
            BasicType::Int => Some(3),
            BasicType::Rat => Some(4),
            BasicType::Real => Some(5),
            BasicType::Bool | BasicType::Char | BasicType::Token => None,
        }
    }

    pub const fn is_numeric(self) -> bool {
        self.numeric_weight().is_some()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BasicType::Bool => "bool",
            BasicType::Nat => "nat",
            BasicType::Nat1 => "nat1",
            BasicType::Int => "int",
            BasicType::Rat => "rat",
            BasicType::Real => "real",
            BasicType::Char => "char",
            BasicType::Token => "token",
        }
    }
}

/// Names of the invariant, equality and ordering functions of a named type.
///
/// The functions may be defined textually after the type, so only their
/// names are recorded at construction. The definitions are looked up on
/// first use and cached.
#[derive(Clone, Debug, Default)]
pub struct TypeFunctions {
    pub inv: Option<Name>,
    pub eq: Option<Name>,
    pub ord: Option<Name>,
    defs: OnceLock<[Option<DefId>; 3]>,
}

impl PartialEq for TypeFunctions {
    fn eq(&self, other: &Self) -> bool {
        self.inv == other.inv && self.eq == other.eq && self.ord == other.ord
    }
}

impl TypeFunctions {
    pub fn new(inv: Option<Name>, eq: Option<Name>, ord: Option<Name>) -> Self {
        TypeFunctions {
            inv,
            eq,
            ord,
            defs: OnceLock::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.inv.is_none() && self.eq.is_none() && self.ord.is_none()
    }

    fn lookup(&self, env: &dyn Environment) -> [Option<DefId>; 3] {
        *self.defs.get_or_init(|| {
            [self.inv, self.eq, self.ord]
                .map(|name| name.and_then(|n| env.find_name(n, NameScope::GLOBAL)).map(|d| d.id))
        })
    }

    /// The invariant function's definition, if it exists.
    pub fn invariant(&self, env: &dyn Environment) -> Option<DefId> {
        self.lookup(env)[0]
    }

    pub fn equality(&self, env: &dyn Environment) -> Option<DefId> {
        self.lookup(env)[1]
    }

    pub fn ordering(&self, env: &dyn Environment) -> Option<DefId> {
        self.lookup(env)[2]
    }
}

/// `name = inner` with optional `inv`/`eq`/`ord` clauses.
#[derive(Clone, PartialEq, Debug)]
pub struct NamedType {
    pub name: Name,
    /// Module or class that defines the type.
    pub module: Name,
    pub inner: TypeId,
    /// Structure is hidden outside `module`.
    pub opaque: bool,
    /// View with the invariant suppressed (`T!`).
    pub maximal: bool,
    pub functions: TypeFunctions,
}

impl NamedType {
    pub fn new(name: Name, module: Name, inner: TypeId) -> Self {
        NamedType {
            name,
            module,
            inner,
            opaque: false,
            maximal: false,
            functions: TypeFunctions::default(),
        }
    }

    #[must_use]
    pub fn opaque(mut self) -> Self {
        self.opaque = true;
        self
    }

    #[must_use]
    pub fn with_functions(mut self, functions: TypeFunctions) -> Self {
        self.functions = functions;
        self
    }
}

/// One `tag : type` field of a record type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Field {
    pub tag: Name,
    pub ty: TypeId,
    /// `tag :- type`: ignored by equality.
    pub abstracted: bool,
}

impl Field {
    pub fn new(tag: Name, ty: TypeId) -> Self {
        Field {
            tag,
            ty,
            abstracted: false,
        }
    }
}

/// `name :: fields` or an inline `compose name of fields end`.
#[derive(Clone, PartialEq, Debug)]
pub struct RecordType {
    pub name: Name,
    pub module: Name,
    pub fields: Vec<Field>,
    /// Built by an inline `compose`.
    pub composed: bool,
    pub opaque: bool,
    pub maximal: bool,
    pub functions: TypeFunctions,
}

impl RecordType {
    pub fn new(name: Name, module: Name, fields: Vec<Field>) -> Self {
        RecordType {
            name,
            module,
            fields,
            composed: false,
            opaque: false,
            maximal: false,
            functions: TypeFunctions::default(),
        }
    }

    #[must_use]
    pub fn composed(mut self) -> Self {
        self.composed = true;
        self
    }

    #[must_use]
    pub fn opaque(mut self) -> Self {
        self.opaque = true;
        self
    }

    #[must_use]
    pub fn with_functions(mut self, functions: TypeFunctions) -> Self {
        self.functions = functions;
        self
    }

    pub fn field(&self, tag: Name) -> Option<&Field> {
        self.fields.iter().find(|f| f.tag == tag)
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FunctionType {
    pub params: Vec<TypeId>,
    pub result: TypeId,
    /// `->` rather than `+>`.
    pub partial: bool,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct OperationType {
    pub params: Vec<TypeId>,
    pub result: TypeId,
}

/// Type shapes.
#[derive(Clone, PartialEq, Debug)]
pub enum TypeKind {
    Basic(BasicType),
    /// `<TAG>`
    Quote(Name),
    /// `set of elem` / `set1 of elem`; `empty` marks the type of `{}`.
    Set {
        elem: TypeId,
        empty: bool,
        non_empty: bool,
    },
    /// `seq of elem` / `seq1 of elem`; `empty` marks the type of `[]`.
    Seq {
        elem: TypeId,
        empty: bool,
        non_empty: bool,
    },
    /// `map dom to rng` / `inmap dom to rng`; `empty` marks the type of `{|->}`.
    Map {
        dom: TypeId,
        rng: TypeId,
        empty: bool,
        injective: bool,
    },
    /// `t1 * ... * tn`
    Product(Vec<TypeId>),
    /// `t1 | ... | tn`
    Union(Vec<TypeId>),
    /// `[t]`
    Optional(TypeId),
    Function(FunctionType),
    Operation(OperationType),
    Named(NamedType),
    Record(RecordType),
    /// Generic type parameter `@T`.
    Parameter(Name),
    /// `(t)`
    Bracket(TypeId),
    /// Reference to a type name, replaced during resolution.
    Unresolved(Name),
    /// Object reference type of the named class.
    Class(Name),
    Void,
    Unknown,
    Undefined,
}

impl TypeKind {
    /// Direct child handles in declaration order.
    ///
    /// The body of a named type is a child; a resolved reference to another
    /// named type is the child handle itself.
    pub fn children(&self) -> SmallVec<[TypeId; 4]> {
        match self {
            TypeKind::Basic(_)
            | TypeKind::Quote(_)
            | TypeKind::Parameter(_)
            | TypeKind::Unresolved(_)
            | TypeKind::Class(_)
            | TypeKind::Void
            | TypeKind::Unknown
            | TypeKind::Undefined => SmallVec::new(),
            TypeKind::Set { elem, .. } | TypeKind::Seq { elem, .. } => smallvec::smallvec![*elem],
            TypeKind::Map { dom, rng, .. } => smallvec::smallvec![*dom, *rng],
            TypeKind::Product(list) | TypeKind::Union(list) => list.iter().copied().collect(),
            TypeKind::Optional(inner) | TypeKind::Bracket(inner) => smallvec::smallvec![*inner],
            TypeKind::Function(f) => f.params.iter().copied().chain([f.result]).collect(),
            TypeKind::Operation(op) => op.params.iter().copied().chain([op.result]).collect(),
            TypeKind::Named(named) => smallvec::smallvec![named.inner],
            TypeKind::Record(record) => record.fields.iter().map(|f| f.ty).collect(),
        }
    }

    /// Mutable child handles, in the same order as [`children`](Self::children).
    pub fn children_mut(&mut self) -> SmallVec<[&mut TypeId; 4]> {
        match self {
            TypeKind::Basic(_)
            | TypeKind::Quote(_)
            | TypeKind::Parameter(_)
            | TypeKind::Unresolved(_)
            | TypeKind::Class(_)
            | TypeKind::Void
            | TypeKind::Unknown
            | TypeKind::Undefined => SmallVec::new(),
            TypeKind::Set { elem, .. } | TypeKind::Seq { elem, .. } => smallvec::smallvec![elem],
            TypeKind::Map { dom, rng, .. } => smallvec::smallvec![dom, rng],
            TypeKind::Product(list) | TypeKind::Union(list) => list.iter_mut().collect(),
            TypeKind::Optional(inner) | TypeKind::Bracket(inner) => smallvec::smallvec![inner],
            TypeKind::Function(f) => f.params.iter_mut().chain([&mut f.result]).collect(),
            TypeKind::Operation(op) => op.params.iter_mut().chain([&mut op.result]).collect(),
            TypeKind::Named(named) => smallvec::smallvec![&mut named.inner],
            TypeKind::Record(record) => record.fields.iter_mut().map(|f| &mut f.ty).collect(),
        }
    }

    /// The defining name of a named, record, quote, class or parameter type.
    pub fn name(&self) -> Option<Name> {
        match self {
            TypeKind::Named(named) => Some(named.name),
            TypeKind::Record(record) => Some(record.name),
            TypeKind::Quote(name)
            | TypeKind::Class(name)
            | TypeKind::Parameter(name)
            | TypeKind::Unresolved(name) => Some(*name),
            _ => None,
        }
    }

    pub fn is_invariant_type(&self) -> bool {
        matches!(self, TypeKind::Named(_) | TypeKind::Record(_))
    }
}
