//! The `qssa` dialect: qubits are single-assignment values.
//!
//! Every instruction consumes its input qubits and produces fresh ones.
//! Consumed handles must not be used again; that discipline is checked by
//! whoever owns the circuit, not here.

use serde::{Deserialize, Serialize};

use super::{Op, check_distinct, count_mismatch};
use crate::attribute::Attribute;
use crate::constraint::{Constraint, ConstraintContext, GateConstraint, RangeVar, TypeBase};
use crate::error::{VerifyError, VerifyResult};
use crate::types::Type;
use crate::value::Value;

const Q: RangeVar = RangeVar::qubits("Q");
const QUBIT: TypeBase = TypeBase::Exact(Type::Qubit);
const BOOL: TypeBase = TypeBase::Exact(Type::I1);

/// `qssa.gate`: applies a gate attribute, producing one new qubit per input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateOp {
    /// The gate; verification rejects anything that is not a gate.
    pub gate: Attribute,
    /// Consumed qubits.
    pub ins: Vec<Value>,
    /// Post-gate qubits, positionally matching `ins`.
    pub outs: Vec<Value>,
}

impl Op for GateOp {
    fn name(&self) -> &'static str {
        "qssa.gate"
    }

    fn operands(&self) -> Vec<Value> {
        self.ins.clone()
    }

    fn results(&self) -> Vec<Value> {
        self.outs.clone()
    }

    fn verify(&self, operand_types: &[Type], result_types: &[Type]) -> VerifyResult<()> {
        let mut ctx = ConstraintContext::new();
        GateConstraint::qubits(Q.name).verify(&self.gate, &mut ctx)?;
        Q.verify(operand_types, &mut ctx)?;
        Q.verify(result_types, &mut ctx).map_err(|err| match err {
            VerifyError::ArityMismatch { expected, found } => {
                VerifyError::ResultArityMismatch { expected, found }
            }
            err => err,
        })?;
        check_distinct(&self.ins)
    }
}

/// `qssa.measure`: measures a qubit value, producing the outcome and the
/// post-measurement qubit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureOp {
    /// Consumed qubit.
    pub in_qubit: Value,
    /// Outcome.
    pub out: Value,
    /// Post-measurement qubit.
    pub out_qubit: Value,
}

impl Op for MeasureOp {
    fn name(&self) -> &'static str {
        "qssa.measure"
    }

    fn operands(&self) -> Vec<Value> {
        vec![self.in_qubit]
    }

    fn results(&self) -> Vec<Value> {
        vec![self.out, self.out_qubit]
    }

    fn verify(&self, operand_types: &[Type], result_types: &[Type]) -> VerifyResult<()> {
        let [in_qubit] = operand_types else {
            return Err(count_mismatch(self.name(), "operands", 1, operand_types.len()));
        };
        let [out, out_qubit] = result_types else {
            return Err(count_mismatch(self.name(), "results", 2, result_types.len()));
        };
        let mut ctx = ConstraintContext::new();
        QUBIT.verify(in_qubit, &mut ctx)?;
        BOOL.verify(out, &mut ctx)?;
        QUBIT.verify(out_qubit, &mut ctx)
    }
}

/// Instructions of the `qssa` dialect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QssaOp {
    /// `qssa.gate`
    Gate(GateOp),
    /// `qssa.measure`
    Measure(MeasureOp),
}

impl QssaOp {
    fn as_op(&self) -> &dyn Op {
        match self {
            QssaOp::Gate(op) => op,
            QssaOp::Measure(op) => op,
        }
    }
}

impl Op for QssaOp {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::Gate;

    #[test]
    fn test_gate_results_match_inputs() {
        let op = GateOp {
            gate: Gate::CNot.into(),
            ins: vec![Value(0), Value(1)],
            outs: vec![Value(2), Value(3)],
        };
        assert!(op.verify(&[Type::Qubit; 2], &[Type::Qubit; 2]).is_ok());
        assert_eq!(op.results().len(), op.operands().len());
    }

    #[test]
    fn test_gate_result_count_mismatch() {
        let op = GateOp {
            gate: Gate::CNot.into(),
            ins: vec![Value(0), Value(1)],
            outs: vec![Value(2)],
        };
        let err = op.verify(&[Type::Qubit; 2], &[Type::Qubit]).unwrap_err();
        assert_eq!(
            err,
            VerifyError::ResultArityMismatch {
                expected: 2,
                found: 1
            }
        );
        assert_eq!(err.to_string(), "expected 2 results, found 1");
    }

    #[test]
    fn test_gate_arity_mismatch() {
        let op = GateOp {
            gate: Gate::H.into(),
            ins: vec![Value(0), Value(1)],
            outs: vec![Value(2), Value(3)],
        };
        let err = op
            .verify(&[Type::Qubit; 2], &[Type::Qubit; 2])
            .unwrap_err();
        assert_eq!(err.to_string(), "expected 1 operands, found 2");
    }

    #[test]
    fn test_measure_produces_outcome_and_qubit() {
        let op = MeasureOp {
            in_qubit: Value(0),
            out: Value(1),
            out_qubit: Value(2),
        };
        assert_eq!(op.results(), vec![Value(1), Value(2)]);
        assert!(op.verify(&[Type::Qubit], &[Type::I1, Type::Qubit]).is_ok());
        assert!(op.verify(&[Type::Qubit], &[Type::I1]).is_err());
        assert!(op.verify(&[Type::Qubit], &[Type::Qubit, Type::I1]).is_err());
    }
}
