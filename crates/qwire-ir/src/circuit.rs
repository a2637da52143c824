//! Circuit bodies and the builder API.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::attribute::Attribute;
use crate::error::{IrError, IrResult};
use crate::gate::Gate;
use crate::ops::{
    GateDialectOp, Op, Operation, QrefOp, QssaOp,
    gate::{ComposeGateOp, ConstantGateOp, QuaternionGateOp, XzsOp},
    qref, qssa,
};
use crate::types::Type;
use crate::value::{Value, ValueDef, ValueInfo};

/// A straight-line instruction body.
///
/// A circuit owns a table of SSA values and an ordered list of
/// instructions. Its entry arguments stand in for qubits and scalars
/// supplied by whatever calls the circuit. Builders record instructions
/// without checking them; [`Circuit::verify`] does that.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Entry arguments, in order.
    arguments: Vec<Value>,
    /// Every value, indexed by [`Value::index`].
    values: Vec<ValueInfo>,
    /// Instructions in program order.
    ops: Vec<Operation>,
}

impl Circuit {
    /// Create an empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a circuit with `num_qubits` qubit arguments.
    pub fn with_qubits(num_qubits: u32) -> (Self, Vec<Value>) {
        let mut circuit = Self::new();
        let qubits = circuit.add_qubits(num_qubits);
        (circuit, qubits)
    }

    /// Add an entry argument.
    pub fn add_argument(&mut self, ty: Type) -> Value {
        let def = ValueDef::Argument(self.arguments.len());
        let value = self.new_value(ty, def);
        self.arguments.push(value);
        value
    }

    /// Add a qubit entry argument.
    pub fn add_qubit(&mut self) -> Value {
        self.add_argument(Type::Qubit)
    }

    /// Add several qubit entry arguments.
    pub fn add_qubits(&mut self, n: u32) -> Vec<Value> {
        (0..n).map(|_| self.add_qubit()).collect()
    }

    // =========================================================================
    // gate dialect
    // =========================================================================

    /// Lift a gate attribute to a gate value (`gate.constant`).
    pub fn constant_gate(&mut self, gate: Gate) -> Value {
        let out = self.pending_result(Type::Gate(gate.gate_type()), 0);
        self.push(GateDialectOp::Constant(ConstantGateOp { gate, out }));
        out
    }

    /// Build a single-qubit gate value from quaternion components
    /// (`gate.quaternion`).
    pub fn quaternion(&mut self, real: Value, i: Value, j: Value, k: Value) -> IrResult<Value> {
        self.check_defined(&[real, i, j, k])?;
        let out = self.pending_result(Type::gate(1), 0);
        self.push(GateDialectOp::Quaternion(QuaternionGateOp {
            real,
            i,
            j,
            k,
            out,
        }));
        Ok(out)
    }

    /// Compose two gate values (`gate.compose`). The result has `lhs`'s type.
    pub fn compose(&mut self, lhs: Value, rhs: Value) -> IrResult<Value> {
        let ty = self.value_type(lhs)?;
        self.compose_as(lhs, rhs, ty)
    }

    /// Compose two gate values, declaring the result type explicitly.
    pub fn compose_as(&mut self, lhs: Value, rhs: Value, ty: Type) -> IrResult<Value> {
        self.check_defined(&[lhs, rhs])?;
        let out = self.pending_result(ty, 0);
        self.push(GateDialectOp::Compose(ComposeGateOp { lhs, rhs, out }));
        Ok(out)
    }

    /// Build a Pauli-frame correction gate value (`gate.xzs`).
    pub fn xzs(&mut self, x: Value, z: Value, phase: Value) -> IrResult<Value> {
        self.check_defined(&[x, z, phase])?;
        let out = self.pending_result(Type::gate(1), 0);
        self.push(GateDialectOp::Xzs(XzsOp { x, z, phase, out }));
        Ok(out)
    }

    // =========================================================================
    // qref dialect
    // =========================================================================

    /// Apply a gate attribute to qubit references (`qref.gate`).
    pub fn qref_gate(
        &mut self,
        gate: impl Into<Attribute>,
        qubits: impl IntoIterator<Item = Value>,
    ) -> IrResult<&mut Self> {
        let ins: Vec<Value> = qubits.into_iter().collect();
        self.check_defined(&ins)?;
        self.push(QrefOp::Gate(qref::GateOp {
            gate: gate.into(),
            ins,
        }));
        Ok(self)
    }

    /// Apply a gate value to qubit references (`qref.dyn_gate`).
    pub fn qref_dyn_gate(
        &mut self,
        gate: Value,
        qubits: impl IntoIterator<Item = Value>,
    ) -> IrResult<&mut Self> {
        let ins: Vec<Value> = qubits.into_iter().collect();
        self.check_defined(&ins)?;
        self.check_defined(&[gate])?;
        self.push(QrefOp::DynGate(qref::DynGateOp { ins, gate }));
        Ok(self)
    }

    /// Measure a qubit reference (`qref.measure`), returning the outcome.
    pub fn qref_measure(&mut self, qubit: Value) -> IrResult<Value> {
        self.check_defined(&[qubit])?;
        let out = self.pending_result(Type::I1, 0);
        self.push(QrefOp::Measure(qref::MeasureOp {
            in_qubit: qubit,
            out,
        }));
        Ok(out)
    }

    // =========================================================================
    // qssa dialect
    // =========================================================================

    /// Apply a gate attribute to qubit values (`qssa.gate`), returning one
    /// new qubit per input.
    pub fn qssa_gate(
        &mut self,
        gate: impl Into<Attribute>,
        qubits: impl IntoIterator<Item = Value>,
    ) -> IrResult<Vec<Value>> {
        let ins: Vec<Value> = qubits.into_iter().collect();
        self.check_defined(&ins)?;
        let outs: Vec<Value> = (0..ins.len())
            .map(|index| self.pending_result(Type::Qubit, index))
            .collect();
        self.push(QssaOp::Gate(qssa::GateOp {
            gate: gate.into(),
            ins,
            outs: outs.clone(),
        }));
        Ok(outs)
    }

    /// Measure a qubit value (`qssa.measure`), returning the outcome and the
    /// post-measurement qubit.
    pub fn qssa_measure(&mut self, qubit: Value) -> IrResult<(Value, Value)> {
        self.check_defined(&[qubit])?;
        let out = self.pending_result(Type::I1, 0);
        let out_qubit = self.pending_result(Type::Qubit, 1);
        self.push(QssaOp::Measure(qssa::MeasureOp {
            in_qubit: qubit,
            out,
            out_qubit,
        }));
        Ok((out, out_qubit))
    }

    // =========================================================================
    // Verification
    // =========================================================================

    /// Verify every instruction.
    ///
    /// Each instruction is checked on its own with fresh variable bindings.
    /// Stops at the first failure.
    #[instrument(skip(self), fields(ops = self.ops.len()))]
    pub fn verify(&self) -> IrResult<()> {
        for (index, op) in self.ops.iter().enumerate() {
            let operand_types = self.types_of(&op.operands())?;
            let result_types = self.types_of(&op.results())?;
            debug!(index, op = op.name(), "verifying instruction");
            op.verify(&operand_types, &result_types)
                .map_err(|source| IrError::Verification {
                    index,
                    op: op.name(),
                    source,
                })?;
        }
        info!(
            ops = self.ops.len(),
            values = self.values.len(),
            "circuit verified"
        );
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Entry arguments.
    pub fn arguments(&self) -> &[Value] {
        &self.arguments
    }

    /// Instructions in program order.
    pub fn operations(&self) -> &[Operation] {
        &self.ops
    }

    /// Number of instructions.
    pub fn num_ops(&self) -> usize {
        self.ops.len()
    }

    /// Number of values, arguments included.
    pub fn num_values(&self) -> usize {
        self.values.len()
    }

    /// Look up a value's table entry.
    pub fn value_info(&self, value: Value) -> IrResult<&ValueInfo> {
        self.values
            .get(value.index())
            .ok_or(IrError::UnknownValue(value))
    }

    /// Look up a value's type.
    pub fn value_type(&self, value: Value) -> IrResult<Type> {
        self.value_info(value).map(|info| info.ty)
    }

    /// Every value, in definition order.
    pub fn values(&self) -> impl Iterator<Item = (Value, &ValueInfo)> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, info)| (Value(i as u32), info))
    }

    // =========================================================================
    // Pre-built circuits
    // =========================================================================

    /// Create a Bell pair in the `qssa` dialect and measure both qubits.
    pub fn bell() -> IrResult<Self> {
        let (mut circuit, qubits) = Self::with_qubits(2);
        let h = circuit.qssa_gate(Gate::H, [qubits[0]])?;
        let pair = circuit.qssa_gate(Gate::CNot, [h[0], qubits[1]])?;
        for q in pair {
            circuit.qssa_measure(q)?;
        }
        Ok(circuit)
    }

    /// Create an `n`-qubit GHZ preparation in the `qref` dialect, with
    /// measurements.
    pub fn ghz(n: u32) -> IrResult<Self> {
        let (mut circuit, qubits) = Self::with_qubits(n);
        if let Some(&first) = qubits.first() {
            circuit.qref_gate(Gate::H, [first])?;
        }
        for pair in qubits.windows(2) {
            circuit.qref_gate(Gate::CNot, [pair[0], pair[1]])?;
        }
        for &q in &qubits {
            circuit.qref_measure(q)?;
        }
        Ok(circuit)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn new_value(&mut self, ty: Type, def: ValueDef) -> Value {
        let value = Value(self.values.len() as u32);
        self.values.push(ValueInfo { ty, def });
        value
    }

    /// Allocate result `index` of the instruction about to be pushed.
    fn pending_result(&mut self, ty: Type, index: usize) -> Value {
        let op = self.ops.len();
        self.new_value(ty, ValueDef::Result { op, index })
    }

    fn push(&mut self, op: impl Into<Operation>) {
        self.ops.push(op.into());
    }

    fn check_defined(&self, values: &[Value]) -> IrResult<()> {
        for &value in values {
            self.value_info(value)?;
        }
        Ok(())
    }

    fn types_of(&self, values: &[Value]) -> IrResult<Vec<Type>> {
        values.iter().map(|&v| self.value_type(v)).collect()
    }
}
