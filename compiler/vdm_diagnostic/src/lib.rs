//! Diagnostic system for the type, pattern and stage crates.
//!
//! Diagnostics are data, not control flow: every phase appends to a
//! [`DiagnosticQueue`] and keeps going, so one malformed pattern never hides
//! an unrelated problem elsewhere in the same definition list.
//!
//! - Error codes for searchability, grouped by numeric class
//! - Clear messages (what went wrong)
//! - Primary span (where it went wrong)
//! - Notes carrying expected-vs-actual type descriptions
//!
//! # Error Guarantees
//!
//! [`ErrorGuaranteed`] is type-level proof that at least one error was
//! emitted. Type resolution returns `Result<TypeId, ErrorGuaranteed>` so a
//! failed resolution can never go unreported.

mod diagnostic;
mod error_code;
mod guarantee;
pub mod queue;

pub use diagnostic::{type_mismatch, Diagnostic, Label, Severity};
pub use error_code::{ErrorClass, ErrorCode};
pub use guarantee::ErrorGuaranteed;
pub use queue::{DiagnosticConfig, DiagnosticQueue};
