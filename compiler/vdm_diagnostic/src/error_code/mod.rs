//! Error codes for all core diagnostics.
//!
//! Each code is a unique identifier (e.g., `E2001`) whose first digit is the
//! numeric class of the problem. Downstream renderers group and filter on
//! the class; tests match on the exact code.

use std::fmt;

/// Error codes for all core diagnostics.
///
/// Format: E#### / W#### where the first digit is the class:
/// - E1xxx: Type resolution errors
/// - E2xxx: Pattern binding errors
/// - E9xxx: Internal errors
/// - W5xxx: Warnings
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum ErrorCode {
    // Type Resolution (E1xxx)
    /// Unable to resolve type name
    E1001,
    /// Name refers to something that is not a type definition
    E1002,
    /// Type parameter `@T` not defined
    E1003,
    /// Recursive type definition
    E1010,
    /// Infinite type definition
    E1011,

    // Pattern Binding (E2xxx)
    /// Tuple pattern against a product of different cardinality
    E2001,
    /// Record pattern against an incompatible record type
    E2002,
    /// Record pattern field count mismatch
    E2003,
    /// Set pattern against a non-set type
    E2004,
    /// Sequence pattern against a non-sequence type
    E2005,
    /// Map pattern against a non-map type
    E2006,
    /// Union pattern against a non-set type
    E2007,
    /// Map union pattern against a non-map type
    E2008,
    /// Object pattern against an incompatible object type
    E2009,
    /// Unknown member in object pattern
    E2010,
    /// Object pattern member is not an instance variable
    E2011,
    /// Inaccessible member in object pattern
    E2012,
    /// Parameter pattern count mismatch
    E2013,

    // Internal (E9xxx)
    /// Stage lowering table is missing a node kind
    E9001,

    // Warnings (W5xxx)
    /// Pattern variable hides an outer definition
    W5001,
    /// Pattern binds the same name at different types
    W5002,
}

/// Numeric class of an [`ErrorCode`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorClass {
    Resolution,
    Binding,
    Internal,
    Warning,
}

impl ErrorCode {
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1010,
        ErrorCode::E1011,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2005,
        ErrorCode::E2006,
        ErrorCode::E2007,
        ErrorCode::E2008,
        ErrorCode::E2009,
        ErrorCode::E2010,
        ErrorCode::E2011,
        ErrorCode::E2012,
        ErrorCode::E2013,
        ErrorCode::E9001,
        ErrorCode::W5001,
        ErrorCode::W5002,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1010 => "E1010",
            ErrorCode::E1011 => "E1011",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E2008 => "E2008",
            ErrorCode::E2009 => "E2009",
            ErrorCode::E2010 => "E2010",
            ErrorCode::E2011 => "E2011",
            ErrorCode::E2012 => "E2012",
            ErrorCode::E2013 => "E2013",
            ErrorCode::E9001 => "E9001",
            ErrorCode::W5001 => "W5001",
            ErrorCode::W5002 => "W5002",
        }
    }

    /// The numeric part of the code, e.g. `2001` for `E2001`.
    pub fn number(&self) -> u16 {
        self.as_str()[1..].parse().unwrap_or(0)
    }

    pub fn class(&self) -> ErrorClass {
        match self.number() / 1000 {
            1 => ErrorClass::Resolution,
            2 => ErrorClass::Binding,
            5 => ErrorClass::Warning,
            _ => ErrorClass::Internal,
        }
    }

    pub fn is_warning(&self) -> bool {
        self.as_str().starts_with('W')
    }

    /// Short description used by `--explain`-style lookups.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "unable to resolve type name",
            ErrorCode::E1002 => "name is not a type definition",
            ErrorCode::E1003 => "type parameter not defined",
            ErrorCode::E1010 => "recursive type definition",
            ErrorCode::E1011 => "infinite type definition",
            ErrorCode::E2001 => "tuple pattern cardinality mismatch",
            ErrorCode::E2002 => "record pattern type mismatch",
            ErrorCode::E2003 => "record pattern field count mismatch",
            ErrorCode::E2004 => "set pattern against non-set type",
            ErrorCode::E2005 => "sequence pattern against non-sequence type",
            ErrorCode::E2006 => "map pattern against non-map type",
            ErrorCode::E2007 => "union pattern against non-set type",
            ErrorCode::E2008 => "map union pattern against non-map type",
            ErrorCode::E2009 => "object pattern type mismatch",
            ErrorCode::E2010 => "unknown object pattern member",
            ErrorCode::E2011 => "object pattern member is not a field",
            ErrorCode::E2012 => "inaccessible object pattern member",
            ErrorCode::E2013 => "parameter pattern count mismatch",
            ErrorCode::E9001 => "missing stage lowering entry",
            ErrorCode::W5001 => "pattern variable hides a definition",
            ErrorCode::W5002 => "pattern binds a name at different types",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests;
