//! Value types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The type of a run-time gate value, tagged with the gate's qubit count.
///
/// A gate known when the circuit is built is an attribute ([`crate::Gate`]);
/// a gate computed while the circuit runs is a value of this type.
/// A count of zero is representable but no gate produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GateType {
    /// Number of qubits the gate acts on.
    pub num_qubits: u32,
}

impl GateType {
    /// Create a gate type for gates over `num_qubits` qubits.
    pub const fn new(num_qubits: u32) -> Self {
        Self { num_qubits }
    }
}

impl fmt::Display for GateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "!gate.type<{}>", self.num_qubits)
    }
}

/// Widths accepted for floating-point scalars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FloatWidth {
    F16,
    F32,
    F64,
}

impl FloatWidth {
    /// Bit width.
    pub fn bits(self) -> u32 {
        match self {
            FloatWidth::F16 => 16,
            FloatWidth::F32 => 32,
            FloatWidth::F64 => 64,
        }
    }

    /// Look up a width by bit count.
    pub fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            16 => Some(FloatWidth::F16),
            32 => Some(FloatWidth::F32),
            64 => Some(FloatWidth::F64),
            _ => None,
        }
    }
}

/// The type of an SSA value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    /// Qubit handle.
    Qubit,
    /// Signless fixed-width integer; `Int(1)` is the boolean type.
    Int(u32),
    /// Floating-point scalar.
    Float(FloatWidth),
    /// Machine index.
    Index,
    /// Run-time gate value.
    Gate(GateType),
}

impl Type {
    /// The boolean type, `i1`.
    pub const I1: Type = Type::Int(1);

    /// The 64-bit float type.
    pub const F64: Type = Type::Float(FloatWidth::F64);

    /// Shorthand for `Type::Gate(GateType::new(num_qubits))`.
    pub const fn gate(num_qubits: u32) -> Self {
        Type::Gate(GateType::new(num_qubits))
    }

    /// Check if this is the qubit handle type.
    #[inline]
    pub fn is_qubit(&self) -> bool {
        matches!(self, Type::Qubit)
    }

    /// Get the gate type if this is a gate value type.
    pub fn as_gate(&self) -> Option<GateType> {
        match self {
            Type::Gate(g) => Some(*g),
            _ => None,
        }
    }
}

impl From<GateType> for Type {
    fn from(ty: GateType) -> Self {
        Type::Gate(ty)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Qubit => write!(f, "!qubit"),
            Type::Int(width) => write!(f, "i{width}"),
            Type::Float(width) => write!(f, "f{}", width.bits()),
            Type::Index => write!(f, "index"),
            Type::Gate(g) => write!(f, "{g}"),
        }
    }
}
