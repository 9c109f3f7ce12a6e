//! Binding failures and their diagnostics.
//!
//! # Error Code Ranges (E2xxx)
//!
//! - E2001–E2003: Tuple and record arity or type
//! - E2004–E2008: Collection shape
//! - E2009–E2012: Object patterns
//! - E2013: Parameter lists

use vdm_diagnostic::{type_mismatch, Diagnostic, ErrorCode};
use vdm_ir::{Name, Span, StringLookup, TypeId};
use vdm_types::TypePool;

/// Why part of a pattern could not be bound.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum BindErrorKind {
    TupleArity { arity: usize, found: TypeId },
    RecordMismatch { typename: Name, found: TypeId },
    RecordArity {
        typename: Name,
        expected: usize,
        found: usize,
    },
    NotASet { found: TypeId },
    NotASeq { found: TypeId },
    NotAMap { found: TypeId },
    UnionNotSet { found: TypeId },
    MapUnionNotMap { found: TypeId },
    ObjectMismatch { classname: Name, found: TypeId },
    UnknownMember { classname: Name, field: Name },
    NotAField { classname: Name, field: Name },
    InaccessibleMember { classname: Name, field: Name },
    ParameterCount { expected: usize, found: usize },
}

impl BindErrorKind {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::TupleArity { .. } => ErrorCode::E2001,
            Self::RecordMismatch { .. } => ErrorCode::E2002,
            Self::RecordArity { .. } => ErrorCode::E2003,
            Self::NotASet { .. } => ErrorCode::E2004,
            Self::NotASeq { .. } => ErrorCode::E2005,
            Self::NotAMap { .. } => ErrorCode::E2006,
            Self::UnionNotSet { .. } => ErrorCode::E2007,
            Self::MapUnionNotMap { .. } => ErrorCode::E2008,
            Self::ObjectMismatch { .. } => ErrorCode::E2009,
            Self::UnknownMember { .. } => ErrorCode::E2010,
            Self::NotAField { .. } => ErrorCode::E2011,
            Self::InaccessibleMember { .. } => ErrorCode::E2012,
            Self::ParameterCount { .. } => ErrorCode::E2013,
        }
    }

    /// Render as a diagnostic at `span`.
    pub fn to_diagnostic(&self, span: Span, pool: &TypePool, names: &dyn StringLookup) -> Diagnostic {
        let code = self.error_code();
        let ty = |id: TypeId| pool.format_type(id, names);
        let shape = |found: TypeId, what: &str, expected: &str| {
            type_mismatch(
                code,
                span,
                format!("{what} pattern cannot match a value of type `{}`", ty(found)),
                expected,
                &ty(found),
            )
        };
        match self {
            Self::TupleArity { arity, found } => type_mismatch(
                code,
                span,
                format!("tuple pattern of {arity} elements cannot match `{}`", ty(*found)),
                &format!("a product of {arity} types"),
                &ty(*found),
            ),
            Self::RecordMismatch { typename, found } => type_mismatch(
                code,
                span,
                format!(
                    "record pattern `mk_{}` cannot match `{}`",
                    names.lookup(*typename),
                    ty(*found)
                ),
                names.lookup(*typename),
                &ty(*found),
            ),
            Self::RecordArity {
                typename,
                expected,
                found,
            } => Diagnostic::error(code)
                .with_message(format!(
                    "record `{}` has {expected} fields but the pattern has {found}",
                    names.lookup(*typename)
                ))
                .with_label(span, format!("expected {expected} field patterns")),
            Self::NotASet { found } => shape(*found, "set", "a set type"),
            Self::NotASeq { found } => shape(*found, "sequence", "a sequence type"),
            Self::NotAMap { found } => shape(*found, "map", "a map type"),
            Self::UnionNotSet { found } => shape(*found, "set union", "a set type"),
            Self::MapUnionNotMap { found } => shape(*found, "map union", "a map type"),
            Self::ObjectMismatch { classname, found } => type_mismatch(
                code,
                span,
                format!(
                    "object pattern `obj_{}` cannot match `{}`",
                    names.lookup(*classname),
                    ty(*found)
                ),
                &format!("`{}` or a subclass", names.lookup(*classname)),
                &ty(*found),
            ),
            Self::UnknownMember { classname, field } => Diagnostic::error(code)
                .with_message(format!(
                    "class `{}` has no member `{}`",
                    names.lookup(*classname),
                    names.lookup(*field)
                ))
                .with_label(span, "unknown member"),
            Self::NotAField { classname, field } => Diagnostic::error(code)
                .with_message(format!(
                    "`{}` in class `{}` is not an instance variable",
                    names.lookup(*field),
                    names.lookup(*classname)
                ))
                .with_label(span, "only instance variables can be matched"),
            Self::InaccessibleMember { classname, field } => Diagnostic::error(code)
                .with_message(format!(
                    "instance variable `{}` of class `{}` is not accessible here",
                    names.lookup(*field),
                    names.lookup(*classname)
                ))
                .with_label(span, "inaccessible member"),
            Self::ParameterCount { expected, found } => Diagnostic::error(code)
                .with_message(format!("expected {expected} parameters, found {found}"))
                .with_label(span, "wrong number of parameter patterns"),
        }
    }
}
