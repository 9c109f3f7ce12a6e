//! Recursive and infinite type detection.
//!
//! A type definition is *recursive* when its body reaches its own name, and
//! *infinite* when it reaches its own name on a path with no escape. An
//! escape is anything that admits a finite value without mentioning the
//! type again: an optional, a possibly-empty set, sequence or map, a
//! function or operation, or a union with a non-recursive alternative.
//!
//! ```text
//! T = seq of T          -- recursive
//! T = nat * T           -- infinite
//! T = nat | (nat * T)   -- recursive
//! ```

use rustc_hash::FxHashSet;
use tracing::debug;
use vdm_diagnostic::{Diagnostic, DiagnosticQueue, ErrorCode};
use vdm_ir::{Name, StringLookup, TypeId};
use vdm_stack::ensure_sufficient_stack;

use crate::{TypeKind, TypePool};

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Recursion {
    Recursive,
    Infinite,
}

/// Classify each named or record definition in `defs`.
///
/// The walk enters the bodies of named types, of records listed in `defs`
/// and of inline `compose` records; any other record is a leaf.
/// Definitions that do not refer to themselves are omitted. Call after
/// resolution: unresolved references are not followed.
pub fn classify_recursion(pool: &TypePool, defs: &[TypeId]) -> Vec<(TypeId, Recursion)> {
    let defined: FxHashSet<TypeId> = defs.iter().copied().collect();
    defs.iter()
        .filter_map(|&def| {
            let name = match pool.kind(def) {
                TypeKind::Named(named) => named.name,
                TypeKind::Record(record) => record.name,
                _ => return None,
            };
            let mut walk = Walk {
                pool,
                defined: &defined,
                target: name,
                strict: true,
                on_path: FxHashSet::default(),
            };
            if walk.body_reaches(def) {
                return Some((def, Recursion::Infinite));
            }
            walk.strict = false;
            walk.body_reaches(def).then_some((def, Recursion::Recursive))
        })
        .collect()
}

/// Classify `defs` and report: an infinite type is an error (E1011), a
/// recursive one a note (E1010).
#[tracing::instrument(level = "debug", skip_all, fields(count = defs.len()))]
pub fn report_recursion(
    pool: &TypePool,
    defs: &[TypeId],
    names: &dyn StringLookup,
    diagnostics: &mut DiagnosticQueue,
) -> Vec<(TypeId, Recursion)> {
    let found = classify_recursion(pool, defs);
    for &(def, recursion) in &found {
        let text = pool.kind(def).name().map_or("?", |n| names.lookup(n));
        debug!(name = text, ?recursion, "self-referential type");
        let span = pool.span(def);
        match recursion {
            Recursion::Infinite => {
                diagnostics.emit_error(
                    Diagnostic::error(ErrorCode::E1011)
                        .with_message(format!("type `{text}` is infinite"))
                        .with_label(span, "every value of this type contains another")
                        .with_suggestion("make the self-reference optional or put it in a collection"),
                );
            }
            Recursion::Recursive => {
                diagnostics.push(
                    Diagnostic::note(ErrorCode::E1010)
                        .with_message(format!("type `{text}` is recursive"))
                        .with_label(span, "refers to itself"),
                );
            }
        }
    }
    found
}

struct Walk<'a> {
    pool: &'a TypePool,
    defined: &'a FxHashSet<TypeId>,
    target: Name,
    /// Only follow paths without an escape.
    strict: bool,
    on_path: FxHashSet<TypeId>,
}

impl Walk<'_> {
    /// Does the body of the named or record type `def` reach the target?
    fn body_reaches(&mut self, def: TypeId) -> bool {
        if !self.on_path.insert(def) {
            return false;
        }
        let found = match self.pool.kind(def) {
            TypeKind::Named(named) => self.reaches(named.inner),
            TypeKind::Record(record) => {
                let fields: Vec<TypeId> = record.fields.iter().map(|f| f.ty).collect();
                fields.into_iter().any(|f| self.reaches(f))
            }
            _ => false,
        };
        self.on_path.remove(&def);
        found
    }

    fn reaches(&mut self, id: TypeId) -> bool {
        ensure_sufficient_stack(|| {
            let pool = self.pool;
            match pool.kind(id) {
                TypeKind::Named(named) if named.name == self.target => true,
                TypeKind::Record(record) if record.name == self.target => true,
                TypeKind::Named(_) => self.body_reaches(id),
                TypeKind::Record(record) if record.composed || self.defined.contains(&id) => {
                    self.body_reaches(id)
                }
                TypeKind::Record(_) => false,
                TypeKind::Bracket(inner) => self.reaches(*inner),
                TypeKind::Product(list) => list.iter().any(|t| self.reaches(*t)),
                TypeKind::Union(list) if self.strict => list.iter().all(|t| self.reaches(*t)),
                TypeKind::Union(list) => list.iter().any(|t| self.reaches(*t)),
                TypeKind::Set {
                    elem,
                    non_empty,
                    ..
                }
                | TypeKind::Seq {
                    elem,
                    non_empty,
                    ..
                } => (!self.strict || *non_empty) && self.reaches(*elem),
                TypeKind::Optional(_)
                | TypeKind::Map { .. }
                | TypeKind::Function(_)
                | TypeKind::Operation(_)
                    if self.strict =>
                {
                    false
                }
                kind => kind.children().into_iter().any(|t| self.reaches(t)),
            }
        })
    }
}

/// Inline `compose` record types reachable from `id` without entering the
/// body of another named type. For a named or record definition the walk
/// starts at its body.
pub fn compose_types(pool: &TypePool, id: TypeId) -> Vec<TypeId> {
    fn walk(pool: &TypePool, id: TypeId, out: &mut Vec<TypeId>) {
        ensure_sufficient_stack(|| match pool.kind(id) {
            TypeKind::Record(record) if record.composed => {
                if out.contains(&id) {
                    return;
                }
                out.push(id);
                for field in &record.fields {
                    walk(pool, field.ty, out);
                }
            }
            TypeKind::Named(_) | TypeKind::Record(_) => {}
            kind => {
                for child in kind.children() {
                    walk(pool, child, out);
                }
            }
        });
    }

    let body: Vec<TypeId> = match pool.kind(id) {
        TypeKind::Named(named) => vec![named.inner],
        TypeKind::Record(record) if !record.composed => {
            record.fields.iter().map(|f| f.ty).collect()
        }
        _ => vec![id],
    };
    let mut out = Vec::new();
    for ty in body {
        walk(pool, ty, &mut out);
    }
    out
}
