//! Error types for the circuit text format.

use qwire_ir::Type;
use thiserror::Error;

/// Errors that can occur during parsing or printing.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// Lexer error (invalid token).
    #[error("Lexer error at position {position}: {message}")]
    LexerError { position: usize, message: String },

    /// Unexpected token.
    #[error("Unexpected token at line {line}: expected {expected}, found {found}")]
    UnexpectedToken {
        line: usize,
        expected: String,
        found: String,
    },

    /// Unexpected end of input.
    #[error("Unexpected end of input: {0}")]
    UnexpectedEof(String),

    /// A numeric coefficient was given without `pi`.
    #[error("Invalid angle at line {line}: coefficient {coefficient} must be followed by 'pi'")]
    InvalidAngle { line: usize, coefficient: f64 },

    /// Unknown gate name.
    #[error("Unknown gate: {0}")]
    UnknownGate(String),

    /// Unknown type name.
    #[error("Unknown type: {0}")]
    UnknownType(String),

    /// Unknown instruction name.
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// Value used before it was defined.
    #[error("Undefined value: %{0}")]
    UndefinedIdentifier(String),

    /// Value name defined twice.
    #[error("Duplicate declaration: %{0}")]
    DuplicateDeclaration(String),

    /// A type annotation disagrees with the value's type.
    #[error("Value %{value} declared as {declared}, but has type {actual}")]
    OperandType {
        value: String,
        declared: Type,
        actual: Type,
    },

    /// A type list does not have one entry per operand.
    #[error("'{op}' lists {got} types for {expected} operands")]
    WrongTypeCount {
        op: String,
        expected: usize,
        got: usize,
    },

    /// Result names do not match what the instruction produces.
    #[error("'{op}' produces {expected} results, but {got} names were given")]
    WrongResultCount {
        op: String,
        expected: usize,
        got: usize,
    },

    /// IR error during circuit construction.
    #[error("Circuit error: {0}")]
    CircuitError(#[from] qwire_ir::IrError),
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;
