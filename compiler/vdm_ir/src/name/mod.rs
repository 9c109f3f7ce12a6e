//! Interned identifiers.

use std::fmt;

/// Handle of an interned string.
///
/// The top 4 bits select the interner shard and the low 28 bits index into
/// it. Variables, type names, fields, quote tags and module names are all
/// `Name`s, so comparing any two is one integer comparison.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// The empty string; also stands for "no module".
    pub const EMPTY: Name = Name(0);

    pub const NUM_SHARDS: usize = 16;
    pub const MAX_LOCAL: u32 = (1 << 28) - 1;

    #[inline]
    pub const fn new(shard: u32, local: u32) -> Self {
        debug_assert!((shard as usize) < Self::NUM_SHARDS);
        debug_assert!(local <= Self::MAX_LOCAL);
        Name((shard << 28) | local)
    }

    #[inline]
    pub const fn shard(self) -> usize {
        (self.0 >> 28) as usize
    }

    #[inline]
    pub const fn local(self) -> usize {
        (self.0 & Self::MAX_LOCAL) as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({}:{})", self.shard(), self.local())
    }
}
