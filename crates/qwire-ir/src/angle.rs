//! Rotation angles expressed as multiples of π.

use serde::{Deserialize, Deserializer, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Neg, Sub};

/// A rotation angle stored as a coefficient of π.
///
/// The coefficient is always reduced into `[0, 2)`, so `Angle::new(-0.5)`
/// and `Angle::new(1.5)` are the same angle. Arithmetic renormalizes its
/// result. Non-finite inputs (NaN, ±∞) have no position on the circle and
/// reduce to zero.
///
/// Equality is bit-exact on the reduced coefficient.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(transparent)]
pub struct Angle(f64);

impl Angle {
    /// The zero angle.
    pub const ZERO: Angle = Angle(0.0);

    /// The angle π.
    pub const PI: Angle = Angle(1.0);

    /// Create an angle of `coefficient · π`, reduced modulo 2.
    pub fn new(coefficient: f64) -> Self {
        Angle(reduce(coefficient))
    }

    /// Create an angle from a value in radians.
    pub fn from_radians(radians: f64) -> Self {
        Self::new(radians / PI)
    }

    /// The reduced coefficient of π, in `[0, 2)`.
    #[inline]
    pub fn as_float_raw(self) -> f64 {
        self.0
    }

    /// The angle in radians, in `[0, 2π)`.
    #[inline]
    pub fn as_float(self) -> f64 {
        self.0 * PI
    }

    /// Check if this is the zero angle.
    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }
}

/// Reduce `f` into `[0, 2)`.
fn reduce(f: f64) -> f64 {
    if !f.is_finite() {
        return 0.0;
    }
    let r = f.rem_euclid(2.0);
    // rem_euclid can round tiny negative inputs up to exactly 2.0; -0.0 folds to 0.0.
    if r >= 2.0 || r == 0.0 { 0.0 } else { r }
}

impl Default for Angle {
    fn default() -> Self {
        Angle::ZERO
    }
}

impl PartialEq for Angle {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for Angle {}

impl Hash for Angle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl<'de> Deserialize<'de> for Angle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Angle::new)
    }
}

impl From<f64> for Angle {
    fn from(coefficient: f64) -> Self {
        Angle::new(coefficient)
    }
}

impl Add for Angle {
    type Output = Angle;

    fn add(self, rhs: Angle) -> Angle {
        Angle::new(self.0 + rhs.0)
    }
}

impl Sub for Angle {
    type Output = Angle;

    fn sub(self, rhs: Angle) -> Angle {
        Angle::new(self.0 - rhs.0)
    }
}

impl Neg for Angle {
    type Output = Angle;

    fn neg(self) -> Angle {
        Angle::new(-self.0)
    }
}

/// Prints the canonical parameter form: `0`, `pi`, or `{coefficient}pi`.
impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0.0 {
            write!(f, "0")
        } else if self.0 == 1.0 {
            write!(f, "pi")
        } else {
            write!(f, "{}pi", self.0)
        }
    }
}
