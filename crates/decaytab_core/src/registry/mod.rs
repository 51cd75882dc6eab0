//! Particle registries built once per run from a particle list.
//!
//! # Responsibility
//! - Ingest code-indexed and name-indexed particle lists.
//! - Answer identity, stability and quantum-number lookups.
//!
//! # Invariants
//! - Within one registry a code belongs to exactly one record; later
//!   duplicates are recorded and ignored.
//! - Antiparticles are inferred from the positive code; no separate entry is
//!   required.
//! - Malformed particle-list lines are skipped, never fatal.
//! - Registries are read-only after construction.

use crate::model::particle::{QuantumNumbers, Stability};
use crate::names::{MatchKind, NameMatch};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod code_index;
pub mod name_index;

pub use code_index::CodeRegistry;
pub use name_index::{NameEntry, NameRegistry};

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Registry construction and lookup errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Neither the reference nor its absolute value is registered.
    UnknownParticle(String),
    /// The particle list produced no usable record.
    Empty { skipped_lines: usize },
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownParticle(value) => write!(f, "unknown particle {value}"),
            Self::Empty { skipped_lines } => write!(
                f,
                "particle list contains no usable records ({skipped_lines} lines skipped)"
            ),
        }
    }
}

impl Error for RegistryError {}

/// A code registered more than once; the first occurrence wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateCode {
    pub code: i64,
    pub first_line: usize,
    pub duplicate_line: usize,
}

/// How a table reference was found in a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Registry key that matched, as text.
    pub matched: String,
    pub kind: MatchKind,
}

impl From<NameMatch> for Resolution {
    fn from(value: NameMatch) -> Self {
        Self {
            matched: value.key,
            kind: value.kind,
        }
    }
}

/// Dialect-independent view of a registry, as consumed by the checker.
pub trait ParticleLookup {
    /// Reference type used by this dialect's decay tables.
    type Key;

    fn resolve(&self, key: &Self::Key) -> RegistryResult<Resolution>;

    fn stability(&self, key: &Self::Key) -> RegistryResult<Stability>;

    /// `None` when the dialect carries no quantum numbers at all.
    fn quantum_numbers(&self, key: &Self::Key) -> Option<RegistryResult<QuantumNumbers>>;

    /// Display label used as the prefix of diagnostics.
    fn label(&self, key: &Self::Key) -> String;

    /// Registry-level warnings (duplicate codes and the like).
    fn duplicate_codes(&self) -> &[DuplicateCode];
}
