//! Type model for the modelling-language core.
//!
//! Types are nodes in a [`TypePool`] addressed by [`TypeId`]:
//! - [`TypeKind`] is the closed set of shapes
//! - [`Resolver`] replaces name references with the types they denote
//! - [`types_equal`] / [`types_identical`] compare types
//! - predicates (`is_set`, `is_product`, ...) and accessors (`set_of`,
//!   `product_of`, ...) on the pool look through brackets, optionals,
//!   names and unions
//! - [`TypeSet`] builds minimal unions
//! - [`classify_recursion`] tells recursive from infinite definitions
//!
//! Names are looked up through an [`Environment`]; the crate never owns the
//! definition table.

mod equal;
pub mod env;
mod format;
mod kind;
mod pool;
mod query;
mod recursion;
mod resolve;
mod set;

pub use env::{ClassDef, DefId, DefKind, Definition, Environment, ModuleEnv, NameScope, ScopedEnv};
pub use equal::{types_equal, types_identical};
pub use kind::{
    BasicType, Field, FunctionType, NamedType, OperationType, RecordType, TypeFunctions, TypeKind,
};
pub use pool::{TypeNode, TypePool};
pub use query::{MapShape, SeqShape, SetShape};
pub use recursion::{classify_recursion, compose_types, report_recursion, Recursion};
pub use resolve::Resolver;
pub use set::TypeSet;
pub use vdm_ir::TypeId;

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    vdm_ir::static_assert_size!(super::TypeId, 4);
    vdm_ir::static_assert_size!(super::env::DefId, 4);
}
