//! Syntax-tree-to-Circuit lowering.

use qwire_ir::{Circuit, Type, Value};
use rustc_hash::FxHashMap;

use crate::ast::{OpSyntax, Program, Statement};
use crate::error::{ParseError, ParseResult};

/// Lower a syntax tree to a Circuit.
pub(crate) fn lower_to_circuit(program: &Program) -> ParseResult<Circuit> {
    let mut lowerer = Lowerer::new();
    lowerer.lower(program)?;
    Ok(lowerer.circuit)
}

/// Resolves value names while building a circuit.
struct Lowerer {
    circuit: Circuit,
    /// Value names in scope.
    names: FxHashMap<String, Value>,
}

impl Lowerer {
    fn new() -> Self {
        Self {
            circuit: Circuit::new(),
            names: FxHashMap::default(),
        }
    }

    fn lower(&mut self, program: &Program) -> ParseResult<()> {
        for arg in &program.arguments {
            let value = self.circuit.add_argument(arg.ty);
            self.define(&arg.name, value)?;
        }

        for stmt in &program.statements {
            self.lower_statement(stmt)?;
        }

        Ok(())
    }

    fn lower_statement(&mut self, stmt: &Statement) -> ParseResult<()> {
        let expected = stmt.op.num_results();
        if stmt.results.len() != expected {
            return Err(ParseError::WrongResultCount {
                op: stmt.op.name().into(),
                expected,
                got: stmt.results.len(),
            });
        }

        let results = match &stmt.op {
            OpSyntax::ConstantGate { gate } => vec![self.circuit.constant_gate(*gate)],

            OpSyntax::Quaternion { ty, real, i, j, k } => {
                let real = self.typed(real, *ty)?;
                let i = self.typed(i, *ty)?;
                let j = self.typed(j, *ty)?;
                let k = self.typed(k, *ty)?;
                vec![self.circuit.quaternion(real, i, j, k)?]
            }

            OpSyntax::Compose { lhs, rhs, ty } => {
                let lhs = self.resolve(lhs)?;
                let rhs = self.resolve(rhs)?;
                vec![self.circuit.compose_as(lhs, rhs, *ty)?]
            }

            OpSyntax::Xzs { x, z, phase } => {
                let x = self.resolve(x)?;
                let z = self.resolve(z)?;
                let phase = self.resolve(phase)?;
                vec![self.circuit.xzs(x, z, phase)?]
            }

            OpSyntax::QrefGate {
                gate,
                qubits,
                types,
            } => {
                let qubits = self.typed_operands(stmt, qubits, types)?;
                self.circuit.qref_gate(*gate, qubits)?;
                Vec::new()
            }

            OpSyntax::QrefDynGate {
                gate,
                qubits,
                types,
            } => {
                let qubits = self.typed_operands(stmt, qubits, types)?;
                let gate = self.resolve(gate)?;
                self.circuit.qref_dyn_gate(gate, qubits)?;
                Vec::new()
            }

            OpSyntax::QrefMeasure { qubit } => {
                let qubit = self.resolve(qubit)?;
                vec![self.circuit.qref_measure(qubit)?]
            }

            OpSyntax::QssaGate {
                gate,
                qubits,
                types,
            } => {
                let qubits = self.typed_operands(stmt, qubits, types)?;
                self.circuit.qssa_gate(*gate, qubits)?
            }

            OpSyntax::QssaMeasure { qubit } => {
                let qubit = self.resolve(qubit)?;
                let (bit, qubit) = self.circuit.qssa_measure(qubit)?;
                vec![bit, qubit]
            }
        };

        for (name, value) in stmt.results.iter().zip(results) {
            self.define(name, value)?;
        }
        Ok(())
    }

    fn define(&mut self, name: &str, value: Value) -> ParseResult<()> {
        if self.names.insert(name.to_string(), value).is_some() {
            return Err(ParseError::DuplicateDeclaration(name.to_string()));
        }
        Ok(())
    }

    fn resolve(&self, name: &str) -> ParseResult<Value> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| ParseError::UndefinedIdentifier(name.to_string()))
    }

    /// Resolve `name` and check it against a type annotation.
    fn typed(&self, name: &str, declared: Type) -> ParseResult<Value> {
        let value = self.resolve(name)?;
        let actual = self.circuit.value_type(value)?;
        if actual != declared {
            return Err(ParseError::OperandType {
                value: name.to_string(),
                declared,
                actual,
            });
        }
        Ok(value)
    }

    /// Resolve an operand list annotated with one type per operand.
    fn typed_operands(
        &self,
        stmt: &Statement,
        names: &[String],
        types: &[Type],
    ) -> ParseResult<Vec<Value>> {
        if names.len() != types.len() {
            return Err(ParseError::WrongTypeCount {
                op: stmt.op.name().into(),
                expected: names.len(),
                got: types.len(),
            });
        }
        names
            .iter()
            .zip(types)
            .map(|(name, ty)| self.typed(name, *ty))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ParseError;
    use crate::parser::parse_circuit;
    use qwire_ir::{Gate, IrError, Type, VerifyError};

    #[test]
    fn test_example_circuit() {
        let source = r"
            circuit(%0 : !qubit, %1 : !qubit, %2 : i1, %3 : f64) {
              %4 = gate.constant #gate.h
              qref.gate<#gate.cnot> %0, %1 : !qubit, !qubit
              qref.dyn_gate<%4> %0 : !qubit
              %5 = qref.measure %0
              %6 = qssa.gate<#gate.rz<0.5pi>> %1 : !qubit
              %7, %8 = qssa.measure %6
              %9 = gate.quaternion<f64> %3 + %3 i + %3 j + %3 k
              %10 = gate.compose %4, %9 : !gate.type<1>
              %11 = gate.xzs %2, %2, %2
            }
        ";

        let circuit = parse_circuit(source).unwrap();
        assert_eq!(circuit.num_ops(), 9);
        assert_eq!(circuit.num_values(), 12);
        circuit.verify().unwrap();
    }

    #[test]
    fn test_arity_failure_survives_parsing() {
        let source = r"
            circuit(%0 : !qubit, %1 : !qubit) {
              %2, %3 = qssa.gate<#gate.h> %0, %1 : !qubit, !qubit
            }
        ";

        let circuit = parse_circuit(source).unwrap();
        let err = circuit.verify().unwrap_err();
        assert!(matches!(
            err.verify_error(),
            Some(VerifyError::ArityMismatch {
                expected: 1,
                found: 2
            })
        ));
    }

    #[test]
    fn test_huge_gate_type_fails_verification() {
        let source = r"
            circuit(%g : !gate.type<4000000000>, %q : !qubit) {
              qref.dyn_gate<%g> %q : !qubit
            }
        ";

        let circuit = parse_circuit(source).unwrap();
        let err = circuit.verify().unwrap_err();
        assert!(matches!(
            err.verify_error(),
            Some(VerifyError::ArityMismatch {
                expected: 4_000_000_000,
                found: 1
            })
        ));
    }

    #[test]
    fn test_result_count() {
        let source = r"
            circuit(%0 : !qubit) {
              %1 = qssa.measure %0
            }
        ";
        assert!(matches!(
            parse_circuit(source),
            Err(ParseError::WrongResultCount {
                expected: 2,
                got: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_type_annotation_mismatch() {
        let source = r"
            circuit(%0 : i1) {
              qref.gate<#gate.x> %0 : !qubit
            }
        ";
        assert!(matches!(
            parse_circuit(source),
            Err(ParseError::OperandType {
                declared: Type::Qubit,
                actual: Type::Int(1),
                ..
            })
        ));

        let source = r"
            circuit(%0 : !qubit, %1 : !qubit) {
              qref.gate<#gate.cz> %0, %1 : !qubit
            }
        ";
        assert!(matches!(
            parse_circuit(source),
            Err(ParseError::WrongTypeCount {
                expected: 2,
                got: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_duplicate_and_self_reference() {
        let source = r"
            circuit(%a : !qubit, %a : !qubit) {}
        ";
        assert!(matches!(
            parse_circuit(source),
            Err(ParseError::DuplicateDeclaration(ref name)) if name == "a"
        ));

        let source = r"
            circuit(%q : !qubit) {
              %b = qref.measure %b
            }
        ";
        assert!(matches!(
            parse_circuit(source),
            Err(ParseError::UndefinedIdentifier(ref name)) if name == "b"
        ));
    }

    #[test]
    fn test_compose_declared_type() {
        let source = r"
            circuit() {
              %h = gate.constant #gate.h
              %cz = gate.constant #gate.cz
              %bad = gate.compose %h, %cz : !gate.type<1>
            }
        ";
        let circuit = parse_circuit(source).unwrap();
        let err = circuit.verify().unwrap_err();
        assert!(matches!(err, IrError::Verification { index: 2, .. }));
        assert_eq!(
            circuit.value_type(qwire_ir::Value(0)).unwrap(),
            Gate::H.gate_type().into()
        );
    }
}
