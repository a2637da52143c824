//! Printer for the circuit text format.

use qwire_ir::{Circuit, GateDialectOp, IrError, Op, Operation, QrefOp, QssaOp, Value};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::ParseResult;

/// Printer settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintConfig {
    /// Spaces before each instruction line.
    pub indent: usize,
    /// Printed between `%` and each value's number, e.g. `v` for `%v0`.
    pub value_prefix: String,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            indent: 2,
            value_prefix: String::new(),
        }
    }
}

/// Emit a circuit in text form with default settings.
pub fn emit(circuit: &Circuit) -> ParseResult<String> {
    emit_with(circuit, &PrintConfig::default())
}

/// Emit a circuit in text form.
///
/// Values are renumbered in definition order: arguments first, then each
/// instruction's results. A circuit built front to back with arguments
/// added before any instruction parses back to an equal circuit.
pub fn emit_with(circuit: &Circuit, config: &PrintConfig) -> ParseResult<String> {
    let mut emitter = Emitter::new(circuit, config);
    emitter.emit_circuit()?;
    Ok(emitter.output)
}

/// Text emitter.
struct Emitter<'a> {
    circuit: &'a Circuit,
    config: &'a PrintConfig,
    output: String,
    /// Printed number of each value.
    numbering: FxHashMap<Value, usize>,
}

impl<'a> Emitter<'a> {
    fn new(circuit: &'a Circuit, config: &'a PrintConfig) -> Self {
        let defined = circuit
            .arguments()
            .iter()
            .copied()
            .chain(circuit.operations().iter().flat_map(Op::results));
        let numbering = defined.enumerate().map(|(n, v)| (v, n)).collect();

        Self {
            circuit,
            config,
            output: String::new(),
            numbering,
        }
    }

    fn emit_circuit(&mut self) -> ParseResult<()> {
        let circuit = self.circuit;
        let arguments = circuit
            .arguments()
            .iter()
            .map(|&v| -> ParseResult<String> {
                Ok(format!("{} : {}", self.name(v)?, circuit.value_type(v)?))
            })
            .collect::<ParseResult<Vec<_>>>()?
            .join(", ");
        self.output.push_str(&format!("circuit({arguments}) {{\n"));

        for op in circuit.operations() {
            let line = self.emit_operation(op)?;
            self.writeln(&line);
        }

        self.output.push_str("}\n");
        Ok(())
    }

    fn emit_operation(&self, op: &Operation) -> ParseResult<String> {
        let body = match op {
            Operation::Gate(GateDialectOp::Constant(op)) => format!("gate.constant {}", op.gate),
            Operation::Gate(GateDialectOp::Quaternion(op)) => format!(
                "gate.quaternion<{}> {} + {} i + {} j + {} k",
                self.circuit.value_type(op.real)?,
                self.name(op.real)?,
                self.name(op.i)?,
                self.name(op.j)?,
                self.name(op.k)?,
            ),
            Operation::Gate(GateDialectOp::Compose(op)) => format!(
                "gate.compose {}, {} : {}",
                self.name(op.lhs)?,
                self.name(op.rhs)?,
                self.circuit.value_type(op.out)?,
            ),
            Operation::Gate(GateDialectOp::Xzs(op)) => format!(
                "gate.xzs {}, {}, {}",
                self.name(op.x)?,
                self.name(op.z)?,
                self.name(op.phase)?,
            ),
            Operation::Qref(QrefOp::Gate(op)) => {
                format!("qref.gate<{}>{}", op.gate, self.typed_operands(&op.ins)?)
            }
            Operation::Qref(QrefOp::DynGate(op)) => format!(
                "qref.dyn_gate<{}>{}",
                self.name(op.gate)?,
                self.typed_operands(&op.ins)?
            ),
            Operation::Qref(QrefOp::Measure(op)) => {
                format!("qref.measure {}", self.name(op.in_qubit)?)
            }
            Operation::Qssa(QssaOp::Gate(op)) => {
                format!("qssa.gate<{}>{}", op.gate, self.typed_operands(&op.ins)?)
            }
            Operation::Qssa(QssaOp::Measure(op)) => {
                format!("qssa.measure {}", self.name(op.in_qubit)?)
            }
        };

        let results = op.results();
        if results.is_empty() {
            Ok(body)
        } else {
            Ok(format!("{} = {body}", self.names(&results)?))
        }
    }

    /// ` %a, %b : ty, ty`, or nothing for an empty list.
    fn typed_operands(&self, values: &[Value]) -> ParseResult<String> {
        if values.is_empty() {
            return Ok(String::new());
        }
        let types = values
            .iter()
            .map(|&v| -> ParseResult<String> { Ok(self.circuit.value_type(v)?.to_string()) })
            .collect::<ParseResult<Vec<_>>>()?
            .join(", ");
        Ok(format!(" {} : {types}", self.names(values)?))
    }

    fn name(&self, value: Value) -> ParseResult<String> {
        let n = self
            .numbering
            .get(&value)
            .ok_or(IrError::UnknownValue(value))?;
        Ok(format!("%{}{n}", self.config.value_prefix))
    }

    fn names(&self, values: &[Value]) -> ParseResult<String> {
        Ok(values
            .iter()
            .map(|&v| self.name(v))
            .collect::<ParseResult<Vec<_>>>()?
            .join(", "))
    }

    fn writeln(&mut self, line: &str) {
        let indent = " ".repeat(self.config.indent);
        self.output.push_str(&indent);
        self.output.push_str(line);
        self.output.push('\n');
    }
}
