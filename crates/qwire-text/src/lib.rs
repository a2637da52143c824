//! Text Format Parser and Printer for Qwire
//!
//! This crate reads and writes the textual form of Qwire circuits, and of
//! the angles, gates, types and attributes that appear inside them.
//!
//! # Syntax
//!
//! | Construct | Example |
//! |-----------|---------|
//! | Angle | `0`, `pi`, `0.5pi`, `-0.25pi` |
//! | Gate attribute | `#gate.h`, `#gate.cnot`, `#gate.rz<0.5pi>` |
//! | Angle attribute | `#gate.angle<pi>` |
//! | Types | `!qubit`, `!gate.type<2>`, `i1`, `f64`, `index` |
//! | Circuit header | `circuit(%0 : !qubit, %1 : i1) { ... }` |
//! | Gate application | `qref.gate<#gate.cnot> %0, %1 : !qubit, !qubit` |
//! | Dynamic gate | `qref.dyn_gate<%g> %0 : !qubit` |
//! | Value-semantics gate | `%2 = qssa.gate<#gate.h> %0 : !qubit` |
//! | Measurement | `%3 = qref.measure %0`, `%4, %5 = qssa.measure %2` |
//! | Gate values | `gate.constant`, `gate.quaternion<f64>`, `gate.compose`, `gate.xzs` |
//! | Comments | `// comment` |
//!
//! Value names are `%` followed by letters, digits or underscores. The
//! printer numbers values in definition order.
//!
//! # Example: Parsing
//!
//! ```rust
//! use qwire_text::parse_circuit;
//!
//! let source = r#"
//!     circuit(%a : !qubit, %b : !qubit) {
//!       %h = qssa.gate<#gate.h> %a : !qubit
//!       %c, %t = qssa.gate<#gate.cnot> %h, %b : !qubit, !qubit
//!       %bit, %q = qssa.measure %c
//!     }
//! "#;
//!
//! let circuit = parse_circuit(source).unwrap();
//! assert_eq!(circuit.num_ops(), 3);
//! assert!(circuit.verify().is_ok());
//! ```
//!
//! # Example: Printing
//!
//! ```rust
//! use qwire_ir::Circuit;
//! use qwire_text::emit;
//!
//! let circuit = Circuit::ghz(3).unwrap();
//! let text = emit(&circuit).unwrap();
//! assert!(text.contains("qref.gate<#gate.h> %0 : !qubit"));
//! assert!(text.contains("qref.gate<#gate.cnot> %1, %2 : !qubit, !qubit"));
//! ```
//!
//! # Example: Round-Trip
//!
//! ```rust
//! use qwire_ir::Circuit;
//! use qwire_text::{emit, parse_angle, parse_circuit};
//!
//! let circuit = Circuit::bell().unwrap();
//! let reparsed = parse_circuit(&emit(&circuit).unwrap()).unwrap();
//! assert_eq!(reparsed, circuit);
//!
//! let angle = parse_angle("-0.5pi").unwrap();
//! assert_eq!(angle.to_string(), "1.5pi");
//! ```

mod ast;
mod emitter;
mod error;
mod lexer;
mod parser;

pub use emitter::{PrintConfig, emit, emit_with};
pub use error::{ParseError, ParseResult};
pub use parser::{parse_angle, parse_ast, parse_attribute, parse_circuit, parse_gate, parse_type};

// Re-export syntax tree types for advanced users
pub mod syntax {
    pub use crate::ast::*;
}
