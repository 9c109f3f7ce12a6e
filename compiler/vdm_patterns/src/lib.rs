//! Patterns for the modelling-language core.
//!
//! - [`properties`]: what a pattern says about itself (length, possible
//!   type, whether it always matches)
//! - [`bind`]: matching a pattern against a type, producing bindings
//! - [`names`]: the names a pattern introduces, uses and hides
//! - [`rewrite`]: structural copies and type resolution in place
//! - [`display`]: concrete syntax
//!
//! Every function is generic over [`PatternNode`](vdm_ir::PatternNode), so
//! the same code runs on the parser's tree and on each stage's tree.

pub mod bind;
pub mod display;
pub mod names;
pub mod properties;
pub mod rewrite;

pub use bind::{bind, BindErrorKind, Binder, Binding, Bound};
pub use display::{display_expr, display_pattern};
pub use names::{free_variables, hidden_variable_warnings, hidden_variables, variable_names};
pub use properties::{always_matches, is_simple, length, literal_type, possible_type, Length};
pub use rewrite::{remove_ignore_patterns, resolve_pattern_types, to_pattern, FreshNames};
