//! Type handle shared by syntax trees and the type pool.

use std::fmt;

/// Index of a type node in a `TypePool`.
///
/// Syntax trees store these handles rather than owning types, so a record
/// pattern can name a type that is only resolved later, and a named type can
/// refer to itself without an owned recursive structure.
///
/// The basic types and the three marker types have fixed slots so that every
/// pool agrees on them without a lookup.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    pub const BOOL: TypeId = TypeId(0);
    pub const NAT: TypeId = TypeId(1);
    pub const NAT1: TypeId = TypeId(2);
    pub const INT: TypeId = TypeId(3);
    pub const RAT: TypeId = TypeId(4);
    pub const REAL: TypeId = TypeId(5);
    pub const CHAR: TypeId = TypeId(6);
    pub const TOKEN: TypeId = TypeId(7);
    pub const VOID: TypeId = TypeId(8);
    pub const UNKNOWN: TypeId = TypeId(9);
    pub const UNDEFINED: TypeId = TypeId(10);

    /// Number of pre-allocated slots.
    pub const PRIMITIVE_COUNT: u32 = 11;

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        TypeId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Check if this handle is one of the pre-allocated slots.
    #[inline]
    pub const fn is_primitive(self) -> bool {
        self.0 < Self::PRIMITIVE_COUNT
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            TypeId::BOOL => write!(f, "TypeId::BOOL"),
            TypeId::NAT => write!(f, "TypeId::NAT"),
            TypeId::NAT1 => write!(f, "TypeId::NAT1"),
            TypeId::INT => write!(f, "TypeId::INT"),
            TypeId::RAT => write!(f, "TypeId::RAT"),
            TypeId::REAL => write!(f, "TypeId::REAL"),
            TypeId::CHAR => write!(f, "TypeId::CHAR"),
            TypeId::TOKEN => write!(f, "TypeId::TOKEN"),
            TypeId::VOID => write!(f, "TypeId::VOID"),
            TypeId::UNKNOWN => write!(f, "TypeId::UNKNOWN"),
            TypeId::UNDEFINED => write!(f, "TypeId::UNDEFINED"),
            TypeId(raw) => write!(f, "TypeId({raw})"),
        }
    }
}
