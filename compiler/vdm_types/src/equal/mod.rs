//! Type equality.
//!
//! Named, record, quote, class and parameter types compare by name, so
//! comparing two self-referential types never follows the cycle.
//! Aggregates compare structurally.
//!
//! [`types_equal`] is the checker's notion of equality: `Unknown` equals
//! anything, the empty-collection markers equal any collection of the same
//! kind, and maximality is asymmetric. [`types_identical`] drops all three
//! allowances and is what [`TypeSet`](crate::TypeSet) deduplicates with.

use vdm_ir::TypeId;
use vdm_stack::ensure_sufficient_stack;

use crate::{TypeKind, TypePool};

#[derive(Copy, Clone, Eq, PartialEq)]
enum Mode {
    Lenient,
    Strict,
}

/// Is `a` equal to `b`?
///
/// Not symmetric: when `a` is a maximal named or record type, `b` must be
/// maximal too; a non-maximal `a` accepts either.
pub fn types_equal(pool: &TypePool, a: TypeId, b: TypeId) -> bool {
    equal(pool, a, b, Mode::Lenient)
}

/// Exact structural identity.
pub fn types_identical(pool: &TypePool, a: TypeId, b: TypeId) -> bool {
    equal(pool, a, b, Mode::Strict)
}

fn all_equal(pool: &TypePool, a: &[TypeId], b: &[TypeId], mode: Mode) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| equal(pool, *x, *y, mode))
}

/// Every member of `a` has an equal member in `b`.
fn covered(pool: &TypePool, a: &[TypeId], b: &[TypeId], mode: Mode) -> bool {
    a.iter().all(|x| b.iter().any(|y| equal(pool, *x, *y, mode)))
}

fn maximal_ok(left: bool, right: bool, mode: Mode) -> bool {
    match mode {
        Mode::Lenient => !left || right,
        Mode::Strict => left == right,
    }
}

fn equal(pool: &TypePool, a: TypeId, b: TypeId, mode: Mode) -> bool {
    if a == b {
        return true;
    }
    ensure_sufficient_stack(|| {
        let a = pool.debracket(a);
        let b = pool.debracket(b);
        if a == b {
            return true;
        }
        let lenient = mode == Mode::Lenient;

        match (pool.kind(a), pool.kind(b)) {
            (TypeKind::Unknown, _) | (_, TypeKind::Unknown) if lenient => true,
            (TypeKind::Basic(x), TypeKind::Basic(y)) => x == y,
            (TypeKind::Quote(x), TypeKind::Quote(y))
            | (TypeKind::Parameter(x), TypeKind::Parameter(y))
            | (TypeKind::Unresolved(x), TypeKind::Unresolved(y))
            | (TypeKind::Class(x), TypeKind::Class(y)) => x == y,
            (
                TypeKind::Set {
                    elem: e1,
                    empty: m1,
                    non_empty: n1,
                },
                TypeKind::Set {
                    elem: e2,
                    empty: m2,
                    non_empty: n2,
                },
            )
            | (
                TypeKind::Seq {
                    elem: e1,
                    empty: m1,
                    non_empty: n1,
                },
                TypeKind::Seq {
                    elem: e2,
                    empty: m2,
                    non_empty: n2,
                },
            ) => {
                n1 == n2
                    && if lenient {
                        *m1 || *m2 || equal(pool, *e1, *e2, mode)
                    } else {
                        m1 == m2 && equal(pool, *e1, *e2, mode)
                    }
            }
            (
                TypeKind::Map {
                    dom: d1,
                    rng: r1,
                    empty: m1,
                    injective: i1,
                },
                TypeKind::Map {
                    dom: d2,
                    rng: r2,
                    empty: m2,
                    injective: i2,
                },
            ) => {
                let parts = equal(pool, *d1, *d2, mode) && equal(pool, *r1, *r2, mode);
                i1 == i2
                    && if lenient {
                        *m1 || *m2 || parts
                    } else {
                        m1 == m2 && parts
                    }
            }
            (TypeKind::Product(x), TypeKind::Product(y)) => all_equal(pool, x, y, mode),
            (TypeKind::Union(x), TypeKind::Union(y)) => {
                covered(pool, x, y, mode) && covered(pool, y, x, mode)
            }
            (TypeKind::Optional(x), TypeKind::Optional(y)) => equal(pool, *x, *y, mode),
            (TypeKind::Function(f), TypeKind::Function(g)) => {
                f.partial == g.partial
                    && all_equal(pool, &f.params, &g.params, mode)
                    && equal(pool, f.result, g.result, mode)
            }
            (TypeKind::Operation(f), TypeKind::Operation(g)) => {
                all_equal(pool, &f.params, &g.params, mode) && equal(pool, f.result, g.result, mode)
            }
            (TypeKind::Named(x), TypeKind::Named(y)) => {
                x.name == y.name && maximal_ok(x.maximal, y.maximal, mode)
            }
            (TypeKind::Record(x), TypeKind::Record(y)) => {
                x.name == y.name && maximal_ok(x.maximal, y.maximal, mode)
            }
            (TypeKind::Void, TypeKind::Void)
            | (TypeKind::Unknown, TypeKind::Unknown)
            | (TypeKind::Undefined, TypeKind::Undefined) => true,
            _ => false,
        }
    })
}
