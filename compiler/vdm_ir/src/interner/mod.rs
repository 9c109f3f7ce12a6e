//! Identifier storage.
//!
//! Every identifier, type name, field name and quote tag is interned once
//! and handled as a [`Name`] afterwards. Units checked on different threads
//! share one interner, so the table is split into shards that lock
//! independently. Strings are leaked and live for the rest of the process.

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use thiserror::Error;

use super::Name;

/// Words interned up front so their handles are stable across interners.
const RESERVED: &[&str] = &[
    "bool", "nat", "nat1", "int", "rat", "real", "char", "token", "set", "set1", "seq", "seq1",
    "map", "inmap", "of", "to", "mk_", "obj_", "union", "munion", "nil", "true", "false", "types",
    "values", "functions", "operations", "state", "instance", "variables", "inv", "eq", "ord",
    "pre", "post", "measure",
];

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InternError {
    #[error("identifier table shard {shard} is full ({count} entries)")]
    ShardFull { shard: usize, count: usize },
}

#[derive(Default)]
struct Shard {
    index: FxHashMap<&'static str, u32>,
    strings: Vec<&'static str>,
}

impl Shard {
    fn get(&self, s: &str) -> Option<u32> {
        self.index.get(s).copied()
    }

    fn insert(&mut self, shard: usize, s: &str) -> Result<u32, InternError> {
        let count = self.strings.len();
        let local = u32::try_from(count)
            .ok()
            .filter(|local| *local <= Name::MAX_LOCAL)
            .ok_or(InternError::ShardFull { shard, count })?;
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        self.strings.push(leaked);
        self.index.insert(leaked, local);
        Ok(local)
    }
}

/// Thread-safe string interner producing [`Name`]s.
pub struct StringInterner {
    shards: [RwLock<Shard>; Name::NUM_SHARDS],
    count: AtomicUsize,
}

impl StringInterner {
    pub fn new() -> Self {
        let interner = StringInterner {
            shards: std::array::from_fn(|_| RwLock::new(Shard::default())),
            count: AtomicUsize::new(0),
        };
        // The empty string must land on `Name::EMPTY`.
        for word in std::iter::once("").chain(RESERVED.iter().copied()) {
            interner.intern(word);
        }
        interner
    }

    fn shard_of(s: &str) -> usize {
        if s.is_empty() {
            return 0;
        }
        let hash = s
            .bytes()
            .take(8)
            .fold(0u32, |h, b| h.wrapping_mul(31).wrapping_add(u32::from(b)));
        hash as usize % Name::NUM_SHARDS
    }

    /// Intern `s`, failing only when its shard is full.
    pub fn try_intern(&self, s: &str) -> Result<Name, InternError> {
        let shard = Self::shard_of(s);
        #[expect(clippy::cast_possible_truncation, reason = "shard < 16")]
        let make = |local| Name::new(shard as u32, local);

        if let Some(local) = self.shards[shard].read().get(s) {
            return Ok(make(local));
        }
        let mut guard = self.shards[shard].write();
        if let Some(local) = guard.get(s) {
            return Ok(make(local));
        }
        let local = guard.insert(shard, s)?;
        self.count.fetch_add(1, Ordering::Relaxed);
        Ok(make(local))
    }

    /// Intern `s`.
    ///
    /// # Panics
    /// When a shard overflows; see [`try_intern`](Self::try_intern).
    pub fn intern(&self, s: &str) -> Name {
        self.try_intern(s).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn lookup(&self, name: Name) -> &'static str {
        self.shards[name.shard()].read().strings[name.local()]
    }

    /// Number of interned strings, the empty string included.
    pub fn len(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// Name-to-text lookup, as needed by formatting and diagnostics.
pub trait StringLookup {
    fn lookup(&self, name: Name) -> &str;
}

impl StringLookup for StringInterner {
    fn lookup(&self, name: Name) -> &str {
        StringInterner::lookup(self, name)
    }
}
