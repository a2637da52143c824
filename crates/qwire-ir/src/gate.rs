//! Gate attributes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::angle::Angle;
use crate::types::GateType;

/// A gate known when the circuit is built.
///
/// Gates are plain data: two gates are equal when they are the same variant
/// with equal parameters. Whether a gate fits the qubits it is applied to is
/// checked by the instructions that carry it, not by the gate itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gate {
    // Single-qubit Clifford+T gates
    /// Hadamard gate.
    H,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// Phase gate (sqrt(Z)).
    S,
    /// Phase-dagger gate.
    SDagger,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    TDagger,
    /// Identity gate.
    Id,

    /// Rotation around the Z axis.
    Rz(Angle),

    // Two-qubit gates
    /// Controlled-X (CNOT) gate.
    CNot,
    /// Controlled-Z gate.
    CZ,

    // Three-qubit gates
    /// Toffoli gate (CCX).
    Toffoli,
}

impl Gate {
    /// Create a Z rotation by `angle · π`.
    pub fn rz(angle: impl Into<Angle>) -> Self {
        Gate::Rz(angle.into())
    }

    /// Every gate that takes no parameters.
    pub fn all_fixed() -> [Gate; 12] {
        [
            Gate::H,
            Gate::X,
            Gate::Y,
            Gate::Z,
            Gate::S,
            Gate::SDagger,
            Gate::T,
            Gate::TDagger,
            Gate::Id,
            Gate::CNot,
            Gate::CZ,
            Gate::Toffoli,
        ]
    }

    /// Get the name of this gate, without the `gate.` dialect prefix.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Gate::H => "h",
            Gate::X => "x",
            Gate::Y => "y",
            Gate::Z => "z",
            Gate::S => "s",
            Gate::SDagger => "s_dagger",
            Gate::T => "t",
            Gate::TDagger => "t_dagger",
            Gate::Id => "id",
            Gate::Rz(_) => "rz",
            Gate::CNot => "cnot",
            Gate::CZ => "cz",
            Gate::Toffoli => "toffoli",
        }
    }

    /// Look up a parameterless gate by name.
    pub fn fixed_from_name(name: &str) -> Option<Self> {
        Self::all_fixed().into_iter().find(|g| g.name() == name)
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            Gate::H
            | Gate::X
            | Gate::Y
            | Gate::Z
            | Gate::S
            | Gate::SDagger
            | Gate::T
            | Gate::TDagger
            | Gate::Id
            | Gate::Rz(_) => 1,

            Gate::CNot | Gate::CZ => 2,

            Gate::Toffoli => 3,
        }
    }

    /// The type a run-time value of this gate has.
    #[inline]
    pub fn gate_type(&self) -> GateType {
        GateType::new(self.num_qubits())
    }

    /// Check if this gate has parameters.
    pub fn is_parameterized(&self) -> bool {
        matches!(self, Gate::Rz(_))
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::Rz(angle) => write!(f, "#gate.rz<{angle}>"),
            _ => write!(f, "#gate.{}", self.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_arity() {
        for gate in [
            Gate::H,
            Gate::X,
            Gate::Y,
            Gate::Z,
            Gate::S,
            Gate::SDagger,
            Gate::T,
            Gate::TDagger,
            Gate::Id,
            Gate::rz(0.25),
        ] {
            assert_eq!(gate.num_qubits(), 1, "{gate}");
        }
        assert_eq!(Gate::CNot.num_qubits(), 2);
        assert_eq!(Gate::CZ.num_qubits(), 2);
        assert_eq!(Gate::Toffoli.num_qubits(), 3);
    }

    #[test]
    fn test_rz_arity_ignores_angle() {
        assert_eq!(Gate::rz(0.0).num_qubits(), 1);
        assert_eq!(Gate::rz(1.75).num_qubits(), 1);
        assert_eq!(Gate::rz(0.5).gate_type(), GateType::new(1));
    }

    #[test]
    fn test_equality() {
        assert_eq!(Gate::rz(0.5), Gate::rz(2.5));
        assert_ne!(Gate::rz(0.5), Gate::rz(0.25));
        assert_ne!(Gate::S, Gate::SDagger);
        assert!(Gate::rz(0.5).is_parameterized());
        assert!(!Gate::H.is_parameterized());
    }

    #[test]
    fn test_names() {
        assert_eq!(Gate::fixed_from_name("toffoli"), Some(Gate::Toffoli));
        assert_eq!(Gate::fixed_from_name("t_dagger"), Some(Gate::TDagger));
        assert_eq!(Gate::fixed_from_name("rz"), None);
        for gate in Gate::all_fixed() {
            assert_eq!(Gate::fixed_from_name(gate.name()), Some(gate));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Gate::H.to_string(), "#gate.h");
        assert_eq!(Gate::SDagger.to_string(), "#gate.s_dagger");
        assert_eq!(Gate::rz(0.5).to_string(), "#gate.rz<0.5pi>");
        assert_eq!(Gate::rz(1.0).to_string(), "#gate.rz<pi>");
    }
}
