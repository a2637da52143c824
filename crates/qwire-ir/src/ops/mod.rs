//! Instructions, grouped by dialect.
//!
//! - [`gate`]: builders for run-time gate values.
//! - [`qref`]: gate application on qubit references, mutated in place.
//! - [`qssa`]: gate application on qubit values under single assignment.
//!
//! Every instruction implements [`Op`]. Verification is handed the resolved
//! types of the instruction's operands and results, in the order returned by
//! [`Op::operands`] and [`Op::results`], and builds a fresh
//! [`ConstraintContext`](crate::constraint::ConstraintContext) for itself.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{VerifyError, VerifyResult};
use crate::types::Type;
use crate::value::Value;

pub mod gate;
pub mod qref;
pub mod qssa;

pub use gate::GateDialectOp;
pub use qref::QrefOp;
pub use qssa::QssaOp;

/// Markers consumed by passes outside this crate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OpTraits {
    /// No side effects; may be removed if unused.
    pub pure: bool,
    /// Produces the same value every time; may be folded.
    pub constant_like: bool,
}

impl OpTraits {
    /// Pure, not constant-like.
    pub const PURE: OpTraits = OpTraits {
        pure: true,
        constant_like: false,
    };

    /// Pure and constant-like.
    pub const CONSTANT: OpTraits = OpTraits {
        pure: true,
        constant_like: true,
    };
}

/// An instruction.
pub trait Op {
    /// Fully qualified name, e.g. `qssa.gate`.
    fn name(&self) -> &'static str;

    /// Values consumed, in encoding order.
    fn operands(&self) -> Vec<Value>;

    /// Values produced.
    fn results(&self) -> Vec<Value>;

    /// Optimization markers.
    fn traits(&self) -> OpTraits {
        OpTraits::default()
    }

    /// Check the instruction's typing rules.
    ///
    /// `operand_types` and `result_types` are aligned with
    /// [`Op::operands`] and [`Op::results`].
    fn verify(&self, operand_types: &[Type], result_types: &[Type]) -> VerifyResult<()>;
}

/// Any instruction of any dialect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operation {
    /// `gate.*`
    Gate(GateDialectOp),
    /// `qref.*`
    Qref(QrefOp),
    /// `qssa.*`
    Qssa(QssaOp),
}

impl Operation {
    fn as_op(&self) -> &dyn Op {
        match self {
            Operation::Gate(op) => op,
            Operation::Qref(op) => op,
            Operation::Qssa(op) => op,
        }
    }
}

impl Op for Operation {
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

impl From<GateDialectOp> for Operation {
    fn from(op: GateDialectOp) -> Self {
        Operation::Gate(op)
    }
}

impl From<QrefOp> for Operation {
    fn from(op: QrefOp) -> Self {
        Operation::Qref(op)
    }
}

impl From<QssaOp> for Operation {
    fn from(op: QssaOp) -> Self {
        Operation::Qssa(op)
    }
}

/// Error for a fixed-shape instruction handed the wrong number of types.
pub(crate) fn count_mismatch(
    op: &'static str,
    what: &'static str,
    expected: usize,
    found: usize,
) -> VerifyError {
    VerifyError::OperandCount {
        op,
        what,
        expected,
        found,
    }
}

/// Reject a qubit list naming the same handle twice.
pub(crate) fn check_distinct(qubits: &[Value]) -> VerifyResult<()> {
    let mut seen = FxHashSet::default();
    for &value in qubits {
        if !seen.insert(value) {
            return Err(VerifyError::DuplicateQubit { value });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_distinct() {
        assert!(check_distinct(&[Value(0), Value(1), Value(2)]).is_ok());
        assert_eq!(
            check_distinct(&[Value(0), Value(1), Value(0)]),
            Err(VerifyError::DuplicateQubit { value: Value(0) })
        );
    }

    #[test]
    fn test_trait_markers() {
        assert!(OpTraits::CONSTANT.pure && OpTraits::CONSTANT.constant_like);
        assert!(OpTraits::PURE.pure && !OpTraits::PURE.constant_like);
        assert_eq!(OpTraits::default(), OpTraits { pure: false, constant_like: false });
    }
}
