//! Tree folds.
//!
//! A computation over the syntax trees implements [`Fold`]: it says how to
//! start (`identity`) and how to merge two partial results (`combine`), and
//! overrides only the `fold_*` methods for the nodes it cares about. Every
//! other node falls through to a `walk_*` function that folds the node's
//! children and combines their results left to right.
//!
//! One implementation covers every tree kind. A pattern fold that reaches an
//! expression guard continues through `fold_expr`, an expression that
//! binds patterns continues through `fold_pattern`, and so on, so a
//! computation never needs to know how another tree kind is laid out.
//!
//! # Example
//!
//! ```text
//! struct Names(Vec<Name>);
//!
//! impl Fold for Names {
//!     type Output = ();
//!     fn identity(&mut self) {}
//!     fn combine(&mut self, (): (), (): ()) {}
//!     fn fold_identifier(&mut self, name: Name, _: Span) {
//!         self.0.push(name);
//!     }
//! }
//! ```
//!
//! Types are a graph rather than a tree. [`walk_type`] descends through
//! aggregate types and treats named, record and reference types as leaves,
//! so a fold over a self-referential type terminates.

mod walk;

use vdm_ir::{Expr, ItemKind, Literal, Name, PatternNode, Span, Stmt, TypeId};
use vdm_types::TypePool;

pub use walk::{fold_all, walk_expr, walk_item, walk_pattern, walk_stmt, walk_type};

/// A computation over syntax trees and types.
///
/// `combine` must be associative; `identity` must be its neutral element.
pub trait Fold: Sized {
    type Output;

    /// Result for a node that contributes nothing.
    fn identity(&mut self) -> Self::Output;

    /// Merge the results of two siblings, left before right.
    fn combine(&mut self, left: Self::Output, right: Self::Output) -> Self::Output;

    // === Patterns ===

    /// Fold a pattern of any pipeline stage.
    fn fold_pattern<N: PatternNode>(&mut self, pattern: &N) -> Self::Output {
        walk_pattern(self, pattern)
    }

    fn fold_identifier(&mut self, name: Name, span: Span) -> Self::Output {
        let _ = (name, span);
        self.identity()
    }

    fn fold_ignore(&mut self, span: Span) -> Self::Output {
        let _ = span;
        self.identity()
    }

    fn fold_pattern_literal(&mut self, lit: Literal, span: Span) -> Self::Output {
        let _ = (lit, span);
        self.identity()
    }

    /// A type handle embedded in a pattern, expression or item.
    ///
    /// Folds that look inside types override this to call [`walk_type`]
    /// with their pool.
    fn fold_type_ref(&mut self, ty: TypeId, span: Span) -> Self::Output {
        let _ = (ty, span);
        self.identity()
    }

    // === Expressions and statements ===

    fn fold_expr(&mut self, expr: &Expr) -> Self::Output {
        walk_expr(self, expr)
    }

    /// A name used in an expression or as an assignment or call target.
    fn fold_variable(&mut self, name: Name, span: Span) -> Self::Output {
        let _ = (name, span);
        self.identity()
    }

    fn fold_stmt(&mut self, stmt: &Stmt) -> Self::Output {
        walk_stmt(self, stmt)
    }

    // === Definitions ===

    fn fold_item<N: PatternNode>(&mut self, item: &ItemKind<N>) -> Self::Output {
        walk_item(self, item)
    }

    // === Types ===

    fn fold_type(&mut self, pool: &TypePool, ty: TypeId) -> Self::Output {
        walk_type(self, pool, ty)
    }

    /// A type with no structural children: basic, quote, named, record,
    /// parameter, reference, class and the marker types.
    fn fold_type_leaf(&mut self, pool: &TypePool, ty: TypeId) -> Self::Output {
        let _ = (pool, ty);
        self.identity()
    }
}
