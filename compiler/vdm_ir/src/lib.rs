//! VDM IR - syntax trees and identifiers for the modelling-language core.
//!
//! This crate contains the data shared by every later crate:
//! - Spans for source locations
//! - Names for interned identifiers
//! - `TypeId` handles into a type pool
//! - Pattern, expression, statement and item trees
//!
//! # Design Philosophy
//!
//! - **Intern names**: identifiers become `Name(u32)`.
//! - **Types by handle**: trees hold `TypeId`s; the pool owns the nodes.
//! - **One shape, many stages**: `PatternKind<P>` and `ItemKind<P>` are generic
//!   over their child node so each pipeline stage reuses the same shape with
//!   its own annotations.
//!
//! Types that contain floats store them as u64 bits for Hash compatibility.

/// Compile-time assertion that a type has a specific size.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod ast;
mod interner;
mod name;
mod span;
mod type_id;

pub use ast::{
    Access, BinaryOp, CaseArm, Expr, ExprKind, Item, ItemKind, ItemTag, LetBinding, Literal,
    Maplet, ObjectField, Pattern, PatternKind, PatternNode, PatternTag, Stmt, StmtKind, UnaryOp,
};
pub use interner::{InternError, StringInterner, StringLookup};
pub use name::Name;
pub use span::Span;
pub use type_id::TypeId;
