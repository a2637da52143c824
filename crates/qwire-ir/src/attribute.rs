//! Instruction attributes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::angle::Angle;
use crate::gate::Gate;
use crate::types::Type;

/// A compile-time datum attached to an instruction.
///
/// Gate-application instructions hold their gate as an `Attribute` rather
/// than a [`Gate`] so that text naming some other attribute in gate position
/// still builds and is rejected by verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    /// A gate.
    Gate(Gate),
    /// A standalone angle.
    Angle(Angle),
    /// A type used as an attribute.
    Type(Type),
    /// An integer.
    Int(i64),
}

impl Attribute {
    /// Get the gate if this is a gate attribute.
    pub fn as_gate(&self) -> Option<&Gate> {
        match self {
            Attribute::Gate(g) => Some(g),
            _ => None,
        }
    }
}

impl From<Gate> for Attribute {
    fn from(gate: Gate) -> Self {
        Attribute::Gate(gate)
    }
}

impl From<Angle> for Attribute {
    fn from(angle: Angle) -> Self {
        Attribute::Angle(angle)
    }
}

impl From<Type> for Attribute {
    fn from(ty: Type) -> Self {
        Attribute::Type(ty)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attribute::Gate(g) => write!(f, "{g}"),
            Attribute::Angle(a) => write!(f, "#gate.angle<{a}>"),
            Attribute::Type(t) => write!(f, "{t}"),
            Attribute::Int(i) => write!(f, "{i}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_gate() {
        assert_eq!(Attribute::from(Gate::CZ).as_gate(), Some(&Gate::CZ));
        assert_eq!(Attribute::from(Angle::PI).as_gate(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Attribute::from(Angle::new(-0.5)).to_string(), "#gate.angle<1.5pi>");
        assert_eq!(Attribute::from(Type::Qubit).to_string(), "!qubit");
        assert_eq!(Attribute::Int(-3).to_string(), "-3");
    }
}
