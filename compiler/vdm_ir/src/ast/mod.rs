//! Syntax trees consumed by the type and pattern crates.
//!
//! The parser that produces these trees lives outside this workspace; every
//! named-type reference arrives as a `TypeId` pointing at an unresolved
//! placeholder node in the type pool.

mod expr;
mod item;
mod literal;
mod pattern;

pub use expr::{BinaryOp, CaseArm, Expr, ExprKind, LetBinding, Stmt, StmtKind, UnaryOp};
pub use item::{Access, Item, ItemKind, ItemTag};
pub use literal::Literal;
pub use pattern::{Maplet, ObjectField, Pattern, PatternKind, PatternNode, PatternTag};
