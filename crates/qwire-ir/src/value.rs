//! SSA values.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::Type;

/// Handle to a value defined in a [`crate::Circuit`].
///
/// Handles are indices into the circuit's value table and are only
/// meaningful for the circuit that created them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Value(pub u32);

impl Value {
    /// Index into the value table.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{}", self.0)
    }
}

/// Where a value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueDef {
    /// Entry argument of the circuit, supplied by the caller.
    Argument(usize),
    /// Result `index` of instruction `op`.
    Result {
        /// Position of the defining instruction.
        op: usize,
        /// Position among that instruction's results.
        index: usize,
    },
}

/// A value table entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValueInfo {
    /// Type of the value.
    pub ty: Type,
    /// Defining site.
    pub def: ValueDef,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_display() {
        assert_eq!(Value(0).to_string(), "%0");
        assert_eq!(Value(12).to_string(), "%12");
        assert_eq!(Value(7).index(), 7);
    }
}
