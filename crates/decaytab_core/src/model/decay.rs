//! Decay blocks and the two decay-table dialects.
//!
//! # Invariants
//! - `DecayChannel::line` and `DecayBlock::line` are 1-based source lines.
//! - Code-indexed blocks reference particles by `ParticleCode`, name-indexed
//!   blocks by canonical name; the two never mix inside one table.

use crate::model::particle::ParticleCode;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Supported decay-table text formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    /// Particles keyed by numeric code; quantum numbers available.
    CodeIndexed,
    /// Particles keyed by free-form name; no quantum numbers.
    NameIndexed,
}

impl Dialect {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CodeIndexed => "code",
            Self::NameIndexed => "name",
        }
    }
}

impl Display for Dialect {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One decay channel of a parent.
#[derive(Debug, Clone, PartialEq)]
pub struct DecayChannel<P> {
    pub branching_ratio: f64,
    /// Ordered daughter references.
    pub daughters: Vec<P>,
    /// Orbital angular momentum label; advisory, never validated.
    pub angular_momentum: Option<i32>,
    pub line: usize,
}

/// One parent and its channels in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct DecayBlock<P> {
    pub parent: P,
    pub channels: Vec<DecayChannel<P>>,
    pub line: usize,
}

impl<P> DecayBlock<P> {
    pub fn new(parent: P, line: usize) -> Self {
        Self {
            parent,
            channels: Vec::new(),
            line,
        }
    }
}

/// Block of the code-indexed dialect.
pub type CodeBlock = DecayBlock<ParticleCode>;
/// Block of the name-indexed dialect.
pub type NameBlock = DecayBlock<String>;
