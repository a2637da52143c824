//! Type constraints and the variable-binding context.
//!
//! An instruction declares its typing rules as constraints over its
//! attributes, operand types and result types. Constraints may name a
//! variable; every site naming the same variable must agree on what it
//! binds to. This is how "the qubit list has as many entries as the gate has
//! qubits" is expressed: the gate and the qubit list each contribute a
//! binding for `Q`, and the second one to arrive must match the first.
//!
//! Bindings live in a [`ConstraintContext`] that is created for one
//! instruction and dropped afterwards, so nothing leaks between
//! instructions.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::attribute::Attribute;
use crate::error::{VerifyError, VerifyResult};
use crate::types::{GateType, Type};

/// Name of a constraint variable.
pub type VarName = &'static str;

/// What a constraint variable is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Binding {
    /// A single type.
    Type(Type),
    /// An ordered list of types, e.g. those of a variadic operand group.
    Range(Vec<Type>),
    /// A list of this many qubit handles, kept as a count.
    Qubits(u32),
}

impl Binding {
    /// A range of `n` qubit types.
    pub fn qubits(n: u32) -> Self {
        Binding::Qubits(n)
    }

    /// Number of elements, for list bindings.
    pub fn list_len(&self) -> Option<usize> {
        match self {
            Binding::Type(_) => None,
            Binding::Range(types) => Some(types.len()),
            Binding::Qubits(n) => Some(*n as usize),
        }
    }

    /// Type of element `index`, for list bindings.
    fn element(&self, index: usize) -> Option<Type> {
        match self {
            Binding::Type(_) => None,
            Binding::Range(types) => types.get(index).copied(),
            Binding::Qubits(n) => (index < *n as usize).then_some(Type::Qubit),
        }
    }

    /// Whether two bindings describe the same type or type list.
    ///
    /// A qubit count agrees with an explicit list of that many qubits.
    pub fn agrees_with(&self, other: &Binding) -> bool {
        match (self, other) {
            (Binding::Qubits(n), Binding::Range(types))
            | (Binding::Range(types), Binding::Qubits(n)) => {
                types.len() == *n as usize && types.iter().all(|ty| *ty == Type::Qubit)
            }
            _ => self == other,
        }
    }
}

/// Variable bindings collected while verifying one instruction.
#[derive(Debug, Default)]
pub struct ConstraintContext {
    bindings: FxHashMap<VarName, Binding>,
}

impl ConstraintContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current binding of `var`.
    pub fn get(&self, var: VarName) -> Option<&Binding> {
        self.bindings.get(var)
    }

    /// Bind `var`, or check the new binding against an existing one.
    pub fn bind(&mut self, var: VarName, binding: Binding) -> VerifyResult<()> {
        match self.bindings.get(var) {
            None => {
                self.bindings.insert(var, binding);
                Ok(())
            }
            Some(existing) if existing.agrees_with(&binding) => Ok(()),
            Some(existing) => {
                debug!(var, ?existing, found = ?binding, "conflicting constraint binding");
                Err(conflict(var, existing, &binding))
            }
        }
    }
}

fn conflict(var: VarName, expected: &Binding, found: &Binding) -> VerifyError {
    if let (Binding::Type(expected), Binding::Type(found)) = (expected, found) {
        return VerifyError::ConflictingBinding {
            var,
            expected: *expected,
            found: *found,
        };
    }
    let (Some(expected_len), Some(found_len)) = (expected.list_len(), found.list_len()) else {
        return VerifyError::BindingKindMismatch { var };
    };
    if expected_len != found_len {
        return VerifyError::ArityMismatch {
            expected: expected_len,
            found: found_len,
        };
    }
    (0..expected_len)
        .filter_map(|i| Some((expected.element(i)?, found.element(i)?)))
        .find(|(e, f)| e != f)
        .map_or(VerifyError::BindingKindMismatch { var }, |(expected, found)| {
            VerifyError::TypeMismatch { expected, found }
        })
}

/// A typing rule over values of type `T`.
pub trait Constraint<T: ?Sized> {
    /// Check `value`, recording any variable bindings in `ctx`.
    fn verify(&self, value: &T, ctx: &mut ConstraintContext) -> VerifyResult<()>;

    /// The bindings `value` contributes to this constraint's variables.
    ///
    /// Returns nothing for values the constraint would reject.
    fn variable_bindings(&self, value: &T) -> Vec<(VarName, Binding)>;
}

/// A family of acceptable types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeBase {
    /// Any type.
    Any,
    /// Exactly this type.
    Exact(Type),
    /// Any gate type.
    Gate,
    /// Any integer or floating-point type.
    IntOrFloat,
}

impl TypeBase {
    fn describe(self) -> &'static str {
        match self {
            TypeBase::Any => "any type",
            TypeBase::Exact(_) => "a specific type",
            TypeBase::Gate => "a gate type",
            TypeBase::IntOrFloat => "an integer or float type",
        }
    }
}

impl Constraint<Type> for TypeBase {
    fn verify(&self, ty: &Type, _ctx: &mut ConstraintContext) -> VerifyResult<()> {
        let ok = match self {
            TypeBase::Any => true,
            TypeBase::Exact(expected) => {
                if expected != ty {
                    return Err(VerifyError::TypeMismatch {
                        expected: *expected,
                        found: *ty,
                    });
                }
                true
            }
            TypeBase::Gate => matches!(ty, Type::Gate(_)),
            TypeBase::IntOrFloat => matches!(ty, Type::Int(_) | Type::Float(_)),
        };
        if ok {
            Ok(())
        } else {
            Err(VerifyError::BaseMismatch {
                expected: self.describe(),
                found: *ty,
            })
        }
    }

    fn variable_bindings(&self, _ty: &Type) -> Vec<(VarName, Binding)> {
        Vec::new()
    }
}

/// A single type, shared by every site naming the same variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeVar {
    /// Variable name.
    pub name: VarName,
    /// Types the variable may bind to.
    pub base: TypeBase,
}

impl TypeVar {
    /// Create a type variable.
    pub const fn new(name: VarName, base: TypeBase) -> Self {
        Self { name, base }
    }
}

impl Constraint<Type> for TypeVar {
    fn verify(&self, ty: &Type, ctx: &mut ConstraintContext) -> VerifyResult<()> {
        self.base.verify(ty, ctx)?;
        ctx.bind(self.name, Binding::Type(*ty))
    }

    fn variable_bindings(&self, ty: &Type) -> Vec<(VarName, Binding)> {
        vec![(self.name, Binding::Type(*ty))]
    }
}

/// A list of types, shared by every site naming the same variable.
///
/// Used for variadic operand and result groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeVar {
    /// Variable name.
    pub name: VarName,
    /// Types each element may have.
    pub element: TypeBase,
}

impl RangeVar {
    /// Create a range variable.
    pub const fn new(name: VarName, element: TypeBase) -> Self {
        Self { name, element }
    }

    /// A range variable over qubit handles.
    pub const fn qubits(name: VarName) -> Self {
        Self::new(name, TypeBase::Exact(Type::Qubit))
    }
}

impl Constraint<[Type]> for RangeVar {
    fn verify(&self, types: &[Type], ctx: &mut ConstraintContext) -> VerifyResult<()> {
        for ty in types {
            self.element.verify(ty, ctx)?;
        }
        ctx.bind(self.name, Binding::Range(types.to_vec()))
    }

    fn variable_bindings(&self, types: &[Type]) -> Vec<(VarName, Binding)> {
        vec![(self.name, Binding::Range(types.to_vec()))]
    }
}

/// Ties a run-time gate value's qubit count to a qubit list.
///
/// Checks that a value has a gate type and binds the qubit range variable
/// to as many qubits as that type declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DynGateConstraint {
    /// The qubit range variable.
    pub qubits: VarName,
}

impl DynGateConstraint {
    /// Create a constraint binding `qubits`.
    pub const fn new(qubits: VarName) -> Self {
        Self { qubits }
    }
}

impl Constraint<Type> for DynGateConstraint {
    fn verify(&self, ty: &Type, ctx: &mut ConstraintContext) -> VerifyResult<()> {
        let GateType { num_qubits } = ty
            .as_gate()
            .ok_or(VerifyError::NotAGateType { ty: *ty })?;
        ctx.bind(self.qubits, Binding::qubits(num_qubits))
    }

    fn variable_bindings(&self, ty: &Type) -> Vec<(VarName, Binding)> {
        ty.as_gate()
            .map(|g| vec![(self.qubits, Binding::qubits(g.num_qubits))])
            .unwrap_or_default()
    }
}

/// Lifts a gate attribute to its [`GateType`] and checks that against an
/// inner type constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateTypeConstraint<C> {
    /// Constraint applied to the gate's type.
    pub inner: C,
}

impl<C> GateTypeConstraint<C> {
    /// Wrap an inner type constraint.
    pub const fn new(inner: C) -> Self {
        Self { inner }
    }
}

/// Ties a gate attribute's qubit count to a qubit list.
pub type GateConstraint = GateTypeConstraint<DynGateConstraint>;

impl GateConstraint {
    /// A gate attribute constraint binding the qubit range variable `qubits`.
    pub const fn qubits(qubits: VarName) -> Self {
        Self::new(DynGateConstraint::new(qubits))
    }
}

impl<C: Constraint<Type>> Constraint<Attribute> for GateTypeConstraint<C> {
    fn verify(&self, attr: &Attribute, ctx: &mut ConstraintContext) -> VerifyResult<()> {
        let gate = attr
            .as_gate()
            .ok_or(VerifyError::NotAGate { attribute: *attr })?;
        self.inner.verify(&Type::Gate(gate.gate_type()), ctx)
    }

    fn variable_bindings(&self, attr: &Attribute) -> Vec<(VarName, Binding)> {
        attr.as_gate()
            .map(|g| self.inner.variable_bindings(&Type::Gate(g.gate_type())))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle::Angle;
    use crate::gate::Gate;

    const Q: RangeVar = RangeVar::qubits("Q");

    #[test]
    fn test_rebinding_same_value() {
        let mut ctx = ConstraintContext::new();
        ctx.bind("T", Binding::Type(Type::gate(1))).unwrap();
        ctx.bind("T", Binding::Type(Type::gate(1))).unwrap();
        assert_eq!(ctx.get("T"), Some(&Binding::Type(Type::gate(1))));
    }

    #[test]
    fn test_conflicting_type_binding() {
        let mut ctx = ConstraintContext::new();
        ctx.bind("T", Binding::Type(Type::gate(1))).unwrap();
        let err = ctx.bind("T", Binding::Type(Type::gate(2))).unwrap_err();
        assert_eq!(
            err,
            VerifyError::ConflictingBinding {
                var: "T",
                expected: Type::gate(1),
                found: Type::gate(2),
            }
        );
    }

    #[test]
    fn test_binding_kind_mismatch() {
        let mut ctx = ConstraintContext::new();
        ctx.bind("Q", Binding::qubits(1)).unwrap();
        let err = ctx.bind("Q", Binding::Type(Type::Qubit)).unwrap_err();
        assert_eq!(err, VerifyError::BindingKindMismatch { var: "Q" });
    }

    #[test]
    fn test_gate_attribute_matches_qubit_list() {
        let gate = GateConstraint::qubits("Q");
        let mut ctx = ConstraintContext::new();
        gate.verify(&Attribute::Gate(Gate::CNot), &mut ctx).unwrap();
        Q.verify(&[Type::Qubit, Type::Qubit], &mut ctx).unwrap();
    }

    #[test]
    fn test_gate_attribute_arity_mismatch() {
        let gate = GateConstraint::qubits("Q");
        let mut ctx = ConstraintContext::new();
        gate.verify(&Attribute::Gate(Gate::H), &mut ctx).unwrap();
        let err = Q.verify(&[Type::Qubit, Type::Qubit], &mut ctx).unwrap_err();
        assert_eq!(
            err,
            VerifyError::ArityMismatch {
                expected: 1,
                found: 2
            }
        );
        assert_eq!(err.to_string(), "expected 1 operands, found 2");
    }

    #[test]
    fn test_qubit_list_first_still_conflicts() {
        let gate = GateConstraint::qubits("Q");
        let mut ctx = ConstraintContext::new();
        Q.verify(&[Type::Qubit; 3], &mut ctx).unwrap();
        let err = gate.verify(&Attribute::Gate(Gate::CZ), &mut ctx).unwrap_err();
        assert!(matches!(err, VerifyError::ArityMismatch { .. }));
    }

    #[test]
    fn test_not_a_gate() {
        let gate = GateConstraint::qubits("Q");
        let mut ctx = ConstraintContext::new();
        let attr = Attribute::Angle(Angle::PI);
        let err = gate.verify(&attr, &mut ctx).unwrap_err();
        assert_eq!(err, VerifyError::NotAGate { attribute: attr });
        assert!(gate.variable_bindings(&attr).is_empty());
        assert!(ctx.get("Q").is_none());
    }

    #[test]
    fn test_dyn_gate_constraint() {
        let dyn_gate = DynGateConstraint::new("Q");
        let mut ctx = ConstraintContext::new();
        dyn_gate.verify(&Type::gate(3), &mut ctx).unwrap();
        assert_eq!(ctx.get("Q"), Some(&Binding::qubits(3)));

        let err = dyn_gate.verify(&Type::F64, &mut ConstraintContext::new());
        assert_eq!(err, Err(VerifyError::NotAGateType { ty: Type::F64 }));
    }

    #[test]
    fn test_variable_bindings() {
        let gate = GateConstraint::qubits("Q");
        assert_eq!(
            gate.variable_bindings(&Attribute::Gate(Gate::Toffoli)),
            vec![("Q", Binding::qubits(3))]
        );
        let [(_, from_gate)] = &DynGateConstraint::new("Q").variable_bindings(&Type::gate(2))[..]
        else {
            panic!("Expected one binding");
        };
        let [(_, from_list)] = &Q.variable_bindings(&[Type::Qubit, Type::Qubit])[..] else {
            panic!("Expected one binding");
        };
        assert!(from_gate.agrees_with(from_list));
        assert!(from_list.agrees_with(from_gate));
        assert!(!from_gate.agrees_with(&Binding::Range(vec![Type::Qubit, Type::I1])));
    }

    #[test]
    fn test_huge_gate_type_is_an_arity_mismatch() {
        let dyn_gate = DynGateConstraint::new("Q");
        let mut ctx = ConstraintContext::new();
        dyn_gate.verify(&Type::gate(u32::MAX), &mut ctx).unwrap();
        assert_eq!(ctx.get("Q").and_then(Binding::list_len), Some(u32::MAX as usize));

        let err = Q.verify(&[Type::Qubit], &mut ctx).unwrap_err();
        assert_eq!(
            err,
            VerifyError::ArityMismatch {
                expected: u32::MAX as usize,
                found: 1
            }
        );
    }

    #[test]
    fn test_count_binding_against_list() {
        let mut ctx = ConstraintContext::new();
        ctx.bind("Q", Binding::Range(vec![Type::Qubit; 2])).unwrap();
        ctx.bind("Q", Binding::qubits(2)).unwrap();
        assert_eq!(
            ctx.bind("Q", Binding::qubits(3)),
            Err(VerifyError::ArityMismatch {
                expected: 2,
                found: 3
            })
        );

        let mut ctx = ConstraintContext::new();
        ctx.bind("R", Binding::qubits(2)).unwrap();
        assert_eq!(
            ctx.bind("R", Binding::Range(vec![Type::Qubit, Type::F64])),
            Err(VerifyError::TypeMismatch {
                expected: Type::Qubit,
                found: Type::F64
            })
        );
    }

    #[test]
    fn test_gate_type_constraint_with_type_var() {
        let constant = GateTypeConstraint::new(TypeVar::new("T", TypeBase::Gate));
        let mut ctx = ConstraintContext::new();
        constant
            .verify(&Attribute::Gate(Gate::rz(0.5)), &mut ctx)
            .unwrap();
        assert_eq!(ctx.get("T"), Some(&Binding::Type(Type::gate(1))));
        TypeVar::new("T", TypeBase::Gate)
            .verify(&Type::gate(1), &mut ctx)
            .unwrap();
    }

    #[test]
    fn test_range_element_check() {
        let mut ctx = ConstraintContext::new();
        let err = Q.verify(&[Type::Qubit, Type::I1], &mut ctx).unwrap_err();
        assert_eq!(
            err,
            VerifyError::TypeMismatch {
                expected: Type::Qubit,
                found: Type::I1
            }
        );
    }

    #[test]
    fn test_type_base() {
        let mut ctx = ConstraintContext::new();
        assert!(TypeBase::IntOrFloat.verify(&Type::Int(8), &mut ctx).is_ok());
        assert!(TypeBase::IntOrFloat.verify(&Type::F64, &mut ctx).is_ok());
        assert!(TypeBase::IntOrFloat.verify(&Type::Qubit, &mut ctx).is_err());
        assert!(TypeBase::Gate.verify(&Type::gate(1), &mut ctx).is_ok());
        assert!(TypeBase::Any.verify(&Type::Index, &mut ctx).is_ok());
    }
}
