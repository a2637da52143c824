//! Qwire Circuit Intermediate Representation
//!
//! This crate provides the core data structures for representing quantum
//! circuits as SSA instruction lists. Gates are first-class: they appear as
//! compile-time attributes, and as run-time values that can be built,
//! composed and applied.
//!
//! # Overview
//!
//! Instructions live in three dialects:
//!
//! - **`gate`**: builds gate values (`gate.constant`, `gate.quaternion`,
//!   `gate.compose`, `gate.xzs`)
//! - **`qref`**: applies gates to qubit references, mutating them in place
//! - **`qssa`**: applies gates to qubit values, producing fresh qubits
//!
//! Every gate application must agree with the gate's arity. This is
//! expressed by [`constraint`]s that share a variable (conventionally `Q`)
//! between the gate and the qubit list, so the number of qubits a gate acts
//! on and the number supplied are checked against each other without the
//! instruction knowing which gate it holds.
//!
//! # Core Components
//!
//! - **Angles**: [`Angle`], a multiple of π normalized into `[0, 2)`
//! - **Gates**: [`Gate`] for the built-in gate attributes
//! - **Types**: [`Type`] and [`GateType`] for qubits, scalars and gate values
//! - **Constraints**: [`ConstraintContext`], [`GateConstraint`],
//!   [`DynGateConstraint`] and [`RangeVar`]
//! - **Instructions**: [`Operation`] and the [`Op`] trait
//! - **Circuit**: [`Circuit`] builder and verifier
//!
//! # Example: Building a Bell Pair
//!
//! ```rust
//! use qwire_ir::{Circuit, Gate};
//!
//! let (mut circuit, q) = Circuit::with_qubits(2);
//! let h = circuit.qssa_gate(Gate::H, [q[0]]).unwrap();
//! let pair = circuit.qssa_gate(Gate::CNot, [h[0], q[1]]).unwrap();
//! let (bit, _) = circuit.qssa_measure(pair[0]).unwrap();
//!
//! assert!(circuit.verify().is_ok());
//! assert_eq!(circuit.num_ops(), 3);
//! # let _ = bit;
//! ```
//!
//! # Example: Gate Values
//!
//! ```rust
//! use qwire_ir::{Circuit, Gate, Type};
//!
//! let (mut circuit, q) = Circuit::with_qubits(1);
//! let flip = circuit.add_argument(Type::I1);
//!
//! // A Pauli-frame correction chosen at run time, composed with T.
//! let t = circuit.constant_gate(Gate::T);
//! let fix = circuit.xzs(flip, flip, flip).unwrap();
//! let gate = circuit.compose(t, fix).unwrap();
//! circuit.qref_dyn_gate(gate, [q[0]]).unwrap();
//!
//! assert!(circuit.verify().is_ok());
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `H` | 1 | Hadamard gate |
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `S`, `SDagger` | 1 | S and S-dagger gates |
//! | `T`, `TDagger` | 1 | T and T-dagger gates |
//! | `Id` | 1 | Identity |
//! | `Rz` | 1 | Z rotation by an [`Angle`] |
//! | `CNot` | 2 | Controlled-NOT |
//! | `CZ` | 2 | Controlled-Z |
//! | `Toffoli` | 3 | Doubly-controlled NOT |

pub mod angle;
pub mod attribute;
pub mod circuit;
pub mod constraint;
pub mod error;
pub mod gate;
pub mod ops;
pub mod types;
pub mod value;

pub use angle::Angle;
pub use attribute::Attribute;
pub use circuit::Circuit;
pub use constraint::{
    Binding, Constraint, ConstraintContext, DynGateConstraint, GateConstraint,
    GateTypeConstraint, RangeVar, TypeBase, TypeVar, VarName,
};
pub use error::{IrError, IrResult, VerifyError, VerifyResult};
pub use gate::Gate;
pub use ops::{GateDialectOp, Op, OpTraits, Operation, QrefOp, QssaOp};
pub use types::{FloatWidth, GateType, Type};
pub use value::{Value, ValueDef, ValueInfo};
