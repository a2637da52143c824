//! Error types for the IR crate.

use thiserror::Error;

use crate::attribute::Attribute;
use crate::types::Type;
use crate::value::Value;

/// Reasons a single instruction fails verification.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum VerifyError {
    /// An attribute in gate position is not a gate.
    #[error("attribute {attribute} expected to be a gate")]
    NotAGate {
        /// The offending attribute.
        attribute: Attribute,
    },

    /// A value in gate position does not have a gate type.
    #[error("value of type {ty} expected to be a gate")]
    NotAGateType {
        /// The type that was found.
        ty: Type,
    },

    /// A qubit list disagrees with the arity bound for it.
    #[error("expected {expected} operands, found {found}")]
    ArityMismatch {
        /// Qubit count implied by the gate.
        expected: usize,
        /// Qubit count actually supplied.
        found: usize,
    },

    /// A result list disagrees with the arity bound for it.
    #[error("expected {expected} results, found {found}")]
    ResultArityMismatch {
        /// Result count implied by the gate.
        expected: usize,
        /// Result count actually supplied.
        found: usize,
    },

    /// A type variable was bound to two different types.
    #[error("variable '{var}' bound to {expected}, found {found}")]
    ConflictingBinding {
        /// Name of the variable.
        var: &'static str,
        /// Type already bound.
        expected: Type,
        /// Type that disagreed.
        found: Type,
    },

    /// A variable was bound both to a single type and to a type list.
    #[error("variable '{var}' used as both a single type and a type list")]
    BindingKindMismatch {
        /// Name of the variable.
        var: &'static str,
    },

    /// A value does not have the exact type required.
    #[error("expected type {expected}, found {found}")]
    TypeMismatch {
        /// Required type.
        expected: Type,
        /// Type found.
        found: Type,
    },

    /// A value does not belong to the family of types required.
    #[error("expected {expected}, found {found}")]
    BaseMismatch {
        /// Description of the accepted family.
        expected: &'static str,
        /// Type found.
        found: Type,
    },

    /// A fixed-shape instruction has the wrong number of operands or results.
    #[error("'{op}' expects {expected} {what}, got {found}")]
    OperandCount {
        /// Instruction name.
        op: &'static str,
        /// Whether operands or results were miscounted.
        what: &'static str,
        /// Expected count.
        expected: usize,
        /// Actual count.
        found: usize,
    },

    /// The same qubit handle appears twice in one gate application.
    #[error("duplicate qubit {value} in gate application")]
    DuplicateQubit {
        /// The repeated handle.
        value: Value,
    },
}

/// Result type for verifying one instruction.
pub type VerifyResult<T> = Result<T, VerifyError>;

/// Errors that can occur in IR operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Value is not defined in the circuit.
    #[error("Value {0} is not defined in circuit")]
    UnknownValue(Value),

    /// An instruction failed verification.
    #[error("Instruction {index} ('{op}') failed verification: {source}")]
    Verification {
        /// Position of the instruction in the circuit body.
        index: usize,
        /// Name of the instruction.
        op: &'static str,
        /// What went wrong.
        #[source]
        source: VerifyError,
    },
}

impl IrError {
    /// Get the verification failure, if this is one.
    pub fn verify_error(&self) -> Option<&VerifyError> {
        match self {
            IrError::Verification { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
