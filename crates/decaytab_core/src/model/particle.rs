//! Particle identity, stability and conserved quantum numbers.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg};

/// Numeric particle identifier (PDG-style Monte Carlo code).
///
/// Negative codes denote antiparticles.
pub type ParticleCode = i64;

/// Conserved additive quantum numbers of one particle.
///
/// Particle lists store each component in 32 bits; components are held
/// widened so daughter sums and charge conjugation cannot overflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuantumNumbers {
    /// Baryon number `B`.
    pub baryon: i64,
    /// Electric charge `Q` in units of the elementary charge.
    pub charge: i64,
    /// Strangeness `S`.
    pub strangeness: i64,
    /// Charm `C`.
    pub charm: i64,
}

impl QuantumNumbers {
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    pub const fn new(baryon: i64, charge: i64, strangeness: i64, charm: i64) -> Self {
        Self {
            baryon,
            charge,
            strangeness,
            charm,
        }
    }

    /// Widens the 32-bit components stored by particle lists.
    pub fn from_columns(baryon: i32, charge: i32, strangeness: i32, charm: i32) -> Self {
        Self::new(
            i64::from(baryon),
            i64::from(charge),
            i64::from(strangeness),
            i64::from(charm),
        )
    }

    /// Returns the quantum numbers of the charge-conjugate state.
    pub const fn negated(self) -> Self {
        Self::new(
            self.baryon.saturating_neg(),
            self.charge.saturating_neg(),
            self.strangeness.saturating_neg(),
            self.charm.saturating_neg(),
        )
    }
}

impl Neg for QuantumNumbers {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl Add for QuantumNumbers {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(
            self.baryon.saturating_add(rhs.baryon),
            self.charge.saturating_add(rhs.charge),
            self.strangeness.saturating_add(rhs.strangeness),
            self.charm.saturating_add(rhs.charm),
        )
    }
}

impl AddAssign for QuantumNumbers {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for QuantumNumbers {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl Display for QuantumNumbers {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "B={}, Q={}, S={}, C={}",
            self.baryon, self.charge, self.strangeness, self.charm
        )
    }
}

/// Stability flag as recorded by a particle list.
///
/// Name-indexed particle lists carry no stability column and always report
/// `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stability {
    Stable,
    Unstable,
    Unknown,
}

impl Stability {
    /// Maps the `0/1` stability column; any other value is `Unknown`.
    pub fn from_flag(flag: i64) -> Self {
        match flag {
            1 => Self::Stable,
            0 => Self::Unstable,
            _ => Self::Unknown,
        }
    }

    pub fn is_stable(self) -> bool {
        self == Self::Stable
    }
}

/// One particle of a code-indexed list.
///
/// Name-indexed lists carry neither a stability flag nor quantum numbers;
/// their rows are `registry::NameEntry`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleRecord {
    pub code: ParticleCode,
    /// Canonical (normalized) name.
    pub name: String,
    pub stability: Stability,
    /// Mass in GeV.
    pub mass: f64,
    pub quantum_numbers: QuantumNumbers,
}

#[cfg(test)]
mod tests {
    use super::{QuantumNumbers, Stability};

    #[test]
    fn negation_flips_every_component() {
        let proton = QuantumNumbers::new(1, 1, 0, 0);
        assert_eq!(-proton, QuantumNumbers::new(-1, -1, 0, 0));
        assert_eq!(proton.negated().negated(), proton);
    }

    #[test]
    fn sums_daughter_quantum_numbers() {
        let pion = QuantumNumbers::new(0, 1, 0, 0);
        let kaon = QuantumNumbers::new(0, -1, -1, 0);
        let total: QuantumNumbers = [pion, kaon, pion].into_iter().sum();
        assert_eq!(total, QuantumNumbers::new(0, 1, -1, 0));
    }

    #[test]
    fn extreme_column_values_neither_overflow_nor_wrap() {
        let top = QuantumNumbers::from_columns(i32::MAX, 0, 0, 0);
        let total: QuantumNumbers = [top, top].into_iter().sum();
        assert_eq!(total.baryon, 2 * i64::from(i32::MAX));

        let bottom = QuantumNumbers::from_columns(i32::MIN, 0, 0, 0);
        assert_eq!(bottom.negated().baryon, -i64::from(i32::MIN));
        assert_eq!(QuantumNumbers::new(i64::MIN, 0, 0, 0).negated().baryon, i64::MAX);
    }

    #[test]
    fn display_lists_all_components() {
        let qn = QuantumNumbers::new(1, -1, -3, 0);
        assert_eq!(qn.to_string(), "B=1, Q=-1, S=-3, C=0");
    }

    #[test]
    fn stability_flag_mapping() {
        assert_eq!(Stability::from_flag(1), Stability::Stable);
        assert_eq!(Stability::from_flag(0), Stability::Unstable);
        assert_eq!(Stability::from_flag(7), Stability::Unknown);
        assert!(!Stability::Unknown.is_stable());
    }
}
