//! Syntax tree for the circuit text format.
//!
//! Values are still referred to by their textual names here; lowering
//! resolves them against the circuit's value table.

use qwire_ir::{Attribute, Gate, Type};
use serde::{Deserialize, Serialize};

/// A complete circuit in text form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// Entry arguments, in order.
    pub arguments: Vec<Argument>,
    /// Instructions in program order.
    pub statements: Vec<Statement>,
}

/// An entry argument: `%name : type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    pub name: String,
    pub ty: Type,
}

/// One instruction line: `%r0, %r1 = op ...` or just `op ...`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    /// Names bound to the instruction's results.
    pub results: Vec<String>,
    /// The instruction.
    pub op: OpSyntax,
    /// Source line, for diagnostics.
    pub line: usize,
}

/// An instruction with unresolved operand names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OpSyntax {
    /// `gate.constant #gate.h`
    ConstantGate { gate: Gate },

    /// `gate.quaternion<f64> %a + %b i + %c j + %d k`
    Quaternion {
        ty: Type,
        real: String,
        i: String,
        j: String,
        k: String,
    },

    /// `gate.compose %a, %b : !gate.type<1>`
    Compose { lhs: String, rhs: String, ty: Type },

    /// `gate.xzs %x, %z, %phase`
    Xzs { x: String, z: String, phase: String },

    /// `qref.gate<#gate.cnot> %0, %1 : !qubit, !qubit`
    QrefGate {
        gate: Attribute,
        qubits: Vec<String>,
        types: Vec<Type>,
    },

    /// `qref.dyn_gate<%g> %0 : !qubit`
    QrefDynGate {
        gate: String,
        qubits: Vec<String>,
        types: Vec<Type>,
    },

    /// `qref.measure %0`
    QrefMeasure { qubit: String },

    /// `qssa.gate<#gate.h> %0 : !qubit`
    QssaGate {
        gate: Attribute,
        qubits: Vec<String>,
        types: Vec<Type>,
    },

    /// `qssa.measure %0`
    QssaMeasure { qubit: String },
}

impl OpSyntax {
    /// Fully qualified instruction name.
    pub fn name(&self) -> &'static str {
        match self {
            OpSyntax::ConstantGate { .. } => "gate.constant",
            OpSyntax::Quaternion { .. } => "gate.quaternion",
            OpSyntax::Compose { .. } => "gate.compose",
            OpSyntax::Xzs { .. } => "gate.xzs",
            OpSyntax::QrefGate { .. } => "qref.gate",
            OpSyntax::QrefDynGate { .. } => "qref.dyn_gate",
            OpSyntax::QrefMeasure { .. } => "qref.measure",
            OpSyntax::QssaGate { .. } => "qssa.gate",
            OpSyntax::QssaMeasure { .. } => "qssa.measure",
        }
    }

    /// Number of results the instruction produces.
    pub fn num_results(&self) -> usize {
        match self {
            OpSyntax::QrefGate { .. } | OpSyntax::QrefDynGate { .. } => 0,
            OpSyntax::QssaGate { qubits, .. } => qubits.len(),
            OpSyntax::QssaMeasure { .. } => 2,
            _ => 1,
        }
    }
}
