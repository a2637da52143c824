//! The `gate` dialect: instructions producing run-time gate values.

use serde::{Deserialize, Serialize};

use super::{Op, OpTraits, count_mismatch};
use crate::attribute::Attribute;
use crate::constraint::{Constraint, ConstraintContext, GateTypeConstraint, TypeBase, TypeVar};
use crate::error::VerifyResult;
use crate::gate::Gate;
use crate::types::Type;
use crate::value::Value;

const GATE_T: TypeVar = TypeVar::new("T", TypeBase::Gate);
const SCALAR_T: TypeVar = TypeVar::new("T", TypeBase::IntOrFloat);
const SINGLE_QUBIT_GATE: TypeBase = TypeBase::Exact(Type::gate(1));
const BOOL: TypeBase = TypeBase::Exact(Type::I1);

/// `gate.constant`: lifts a gate attribute to a value of its gate type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstantGateOp {
    /// The lifted gate.
    pub gate: Gate,
    /// The gate value.
    pub out: Value,
}

impl Op for ConstantGateOp {
    fn name(&self) -> &'static str {
        "gate.constant"
    }

    fn operands(&self) -> Vec<Value> {
        vec![]
    }

    fn results(&self) -> Vec<Value> {
        vec![self.out]
    }

    fn traits(&self) -> OpTraits {
        OpTraits::CONSTANT
    }

    fn verify(&self, operand_types: &[Type], result_types: &[Type]) -> VerifyResult<()> {
        if !operand_types.is_empty() {
            return Err(count_mismatch(self.name(), "operands", 0, operand_types.len()));
        }
        let [out] = result_types else {
            return Err(count_mismatch(self.name(), "results", 1, result_types.len()));
        };
        let mut ctx = ConstraintContext::new();
        GateTypeConstraint::new(GATE_T).verify(&Attribute::Gate(self.gate), &mut ctx)?;
        GATE_T.verify(out, &mut ctx)
    }
}

/// `gate.quaternion`: the single-qubit gate whose action on the Bloch sphere
/// is conjugation by the quaternion `real + i·i + j·j + k·k`.
///
/// The quaternion is not normalized here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuaternionGateOp {
    /// Real part.
    pub real: Value,
    /// `i` coefficient.
    pub i: Value,
    /// `j` coefficient.
    pub j: Value,
    /// `k` coefficient.
    pub k: Value,
    /// The gate value.
    pub out: Value,
}

impl Op for QuaternionGateOp {
    fn name(&self) -> &'static str {
        "gate.quaternion"
    }

    fn operands(&self) -> Vec<Value> {
        vec![self.real, self.i, self.j, self.k]
    }

    fn results(&self) -> Vec<Value> {
        vec![self.out]
    }

    fn traits(&self) -> OpTraits {
        OpTraits::PURE
    }

    fn verify(&self, operand_types: &[Type], result_types: &[Type]) -> VerifyResult<()> {
        if operand_types.len() != 4 {
            return Err(count_mismatch(self.name(), "operands", 4, operand_types.len()));
        }
        let [out] = result_types else {
            return Err(count_mismatch(self.name(), "results", 1, result_types.len()));
        };
        let mut ctx = ConstraintContext::new();
        for ty in operand_types {
            SCALAR_T.verify(ty, &mut ctx)?;
        }
        SINGLE_QUBIT_GATE.verify(out, &mut ctx)
    }
}

/// `gate.compose`: applies `lhs`, then `rhs`. Both must act on the same
/// number of qubits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposeGateOp {
    /// First gate.
    pub lhs: Value,
    /// Second gate.
    pub rhs: Value,
    /// The composite gate.
    pub out: Value,
}

impl Op for ComposeGateOp {
    fn name(&self) -> &'static str {
        "gate.compose"
    }

    fn operands(&self) -> Vec<Value> {
        vec![self.lhs, self.rhs]
    }

    fn results(&self) -> Vec<Value> {
        vec![self.out]
    }

    fn traits(&self) -> OpTraits {
        OpTraits::PURE
    }

    fn verify(&self, operand_types: &[Type], result_types: &[Type]) -> VerifyResult<()> {
        let [lhs, rhs] = operand_types else {
            return Err(count_mismatch(self.name(), "operands", 2, operand_types.len()));
        };
        let [out] = result_types else {
            return Err(count_mismatch(self.name(), "results", 1, result_types.len()));
        };
        let mut ctx = ConstraintContext::new();
        GATE_T.verify(lhs, &mut ctx)?;
        GATE_T.verify(rhs, &mut ctx)?;
        GATE_T.verify(out, &mut ctx)
    }
}

/// `gate.xzs`: `X` if `x`, then `Z` if `z`, then a π/2 phase if `phase`.
///
/// Encodes a Pauli-frame correction and its phase byproduct as one
/// single-qubit gate value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XzsOp {
    /// Apply `X`.
    pub x: Value,
    /// Apply `Z`.
    pub z: Value,
    /// Apply the phase gate.
    pub phase: Value,
    /// The gate value.
    pub out: Value,
}

impl Op for XzsOp {
    fn name(&self) -> &'static str {
        "gate.xzs"
    }

    fn operands(&self) -> Vec<Value> {
        vec![self.x, self.z, self.phase]
    }

    fn results(&self) -> Vec<Value> {
        vec![self.out]
    }

    fn traits(&self) -> OpTraits {
        OpTraits::PURE
    }

    fn verify(&self, operand_types: &[Type], result_types: &[Type]) -> VerifyResult<()> {
        if operand_types.len() != 3 {
            return Err(count_mismatch(self.name(), "operands", 3, operand_types.len()));
        }
        let [out] = result_types else {
            return Err(count_mismatch(self.name(), "results", 1, result_types.len()));
        };
        let mut ctx = ConstraintContext::new();
        for ty in operand_types {
            BOOL.verify(ty, &mut ctx)?;
        }
        SINGLE_QUBIT_GATE.verify(out, &mut ctx)
    }
}

/// Instructions of the `gate` dialect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GateDialectOp {
    /// `gate.constant`
    Constant(ConstantGateOp),
    /// `gate.quaternion`
    Quaternion(QuaternionGateOp),
    /// `gate.compose`
    Compose(ComposeGateOp),
    /// `gate.xzs`
    Xzs(XzsOp),
}

impl GateDialectOp {
    fn as_op(&self) -> &dyn Op {
        match self {
            GateDialectOp::Constant(op) => op,
            GateDialectOp::Quaternion(op) => op,
            GateDialectOp::Compose(op) => op,
            GateDialectOp::Xzs(op) => op,
        }
    }
}

impl Op for GateDialectOp {
    fn name(&self) -> &'static str {
        self.as_op().name()
    }

    fn operands(&self) -> Vec<Value> {
        self.as_op().operands()
    }

    fn results(&self) -> Vec<Value> {
        self.as_op().results()
    }

    fn traits(&self) -> OpTraits {
        self.as_op().traits()
    }

    fn verify(&self, operand_types: &[Type], result_types: &[Type]) -> VerifyResult<()> {
        self.as_op().verify(operand_types, result_types)
    }
}
