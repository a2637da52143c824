//! The `qref` dialect: qubits are references whose state gates mutate in
//! place.

use serde::{Deserialize, Serialize};

use super::{Op, check_distinct, count_mismatch};
use crate::attribute::Attribute;
use crate::constraint::{
    Constraint, ConstraintContext, DynGateConstraint, GateConstraint, RangeVar, TypeBase,
};
use crate::error::VerifyResult;
use crate::types::Type;
use crate::value::Value;

const Q: RangeVar = RangeVar::qubits("Q");
const QUBIT: TypeBase = TypeBase::Exact(Type::Qubit);
const BOOL: TypeBase = TypeBase::Exact(Type::I1);

/// `qref.gate`: applies a gate attribute to qubit references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateOp {
    /// The gate; verification rejects anything that is not a gate.
    pub gate: Attribute,
    /// Qubits acted on, one per gate qubit.
    pub ins: Vec<Value>,
}

impl Op for GateOp {
    fn name(&self) -> &'static str {
        "qref.gate"
    }

    fn operands(&self) -> Vec<Value> {
        self.ins.clone()
    }

    fn results(&self) -> Vec<Value> {
        vec![]
    }

    fn verify(&self, operand_types: &[Type], result_types: &[Type]) -> VerifyResult<()> {
        if !result_types.is_empty() {
            return Err(count_mismatch(self.name(), "results", 0, result_types.len()));
        }
        let mut ctx = ConstraintContext::new();
        GateConstraint::qubits(Q.name).verify(&self.gate, &mut ctx)?;
        Q.verify(operand_types, &mut ctx)?;
        check_distinct(&self.ins)
    }
}

/// `qref.dyn_gate`: applies a run-time gate value to qubit references.
///
/// Operands are encoded qubits first, gate last. Verification does not
/// depend on that order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynGateOp {
    /// Qubits acted on.
    pub ins: Vec<Value>,
    /// The gate value.
    pub gate: Value,
}

impl Op for DynGateOp {
    fn name(&self) -> &'static str {
        "qref.dyn_gate"
    }

    fn operands(&self) -> Vec<Value> {
        let mut operands = self.ins.clone();
        operands.push(self.gate);
        operands
    }

    fn results(&self) -> Vec<Value> {
        vec![]
    }

    fn verify(&self, operand_types: &[Type], result_types: &[Type]) -> VerifyResult<()> {
        if !result_types.is_empty() {
            return Err(count_mismatch(self.name(), "results", 0, result_types.len()));
        }
        let Some((gate, qubits)) = operand_types.split_last() else {
            return Err(count_mismatch(self.name(), "operands", 1, 0));
        };
        let mut ctx = ConstraintContext::new();
        DynGateConstraint::new(Q.name).verify(gate, &mut ctx)?;
        Q.verify(qubits, &mut ctx)?;
        check_distinct(&self.ins)
    }
}

/// `qref.measure`: measures a qubit reference.
///
/// The reference stays valid, but the qubit has collapsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureOp {
    /// Measured qubit.
    pub in_qubit: Value,
    /// Outcome.
    pub out: Value,
}

impl Op for MeasureOp {
    fn name(&self) -> &'static str {
        "qref.measure"
    }

    fn operands(&self) -> Vec<Value> {
        vec![self.in_qubit]
    }

    fn results(&self) -> Vec<Value> {
        vec![self.out]
    }

    fn verify(&self, operand_types: &[Type], result_types: &[Type]) -> VerifyResult<()> {
        let [in_qubit] = operand_types else {
            return Err(count_mismatch(self.name(), "operands", 1, operand_types.len()));
        };
        let [out] = result_types else {
            return Err(count_mismatch(self.name(), "results", 1, result_types.len()));
        };
        let mut ctx = ConstraintContext::new();
        QUBIT.verify(in_qubit, &mut ctx)?;
        BOOL.verify(out, &mut ctx)
    }
}

/// Instructions of the `qref` dialect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QrefOp {
    /// `qref.gate`
    Gate(GateOp),
    /// `qref.dyn_gate`
    DynGate(DynGateOp),
    /// `qref.measure`
    Measure(MeasureOp),
}

impl QrefOp {
    fn as_op(&self) -> &dyn Op {
        match self {
            QrefOp::Gate(op) => op,
            QrefOp::DynGate(op) => op,
            QrefOp::Measure(op) => op,
        }
    }
}

impl Op for QrefOp {
    fn name(&self) -> &'static str {
        self.as_op().name()
    }

    fn operands(&self) -> Vec<Value> {
        self.as_op().operands()
    }

    fn results(&self) -> Vec<Value> {
        self.as_op().results()
    }

    fn verify(&self, operand_types: &[Type], result_types: &[Type]) -> VerifyResult<()> {
        self.as_op().verify(operand_types, result_types)
    }
}
