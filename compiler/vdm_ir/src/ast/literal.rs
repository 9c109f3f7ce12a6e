//! Literal values shared by literal patterns and literal expressions.

use crate::Name;

/// A literal value.
///
/// Reals are stored as their IEEE bit pattern so the type can derive
/// `Eq` and `Hash`; strings and quote tags are interned.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Literal {
    Bool(bool),
    Char(char),
    Int(i64),
    Real(u64),
    Quote(Name),
    String(Name),
    Nil,
}

impl Literal {
    /// Build a real literal from its value.
    pub fn real(value: f64) -> Self {
        Literal::Real(value.to_bits())
    }

    /// The value of a real literal.
    pub fn as_real(self) -> Option<f64> {
        match self {
            Literal::Real(bits) => Some(f64::from_bits(bits)),
            _ => None,
        }
    }
}
