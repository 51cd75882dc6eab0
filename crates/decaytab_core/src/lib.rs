//! Core validation engine for particle decay tables.
//! Parses particle lists and decay tables, resolves particle references and
//! checks conservation laws and branching-ratio normalization.

pub mod check;
pub mod logging;
pub mod model;
pub mod names;
pub mod pipeline;
pub mod registry;
pub mod table;

pub use check::{CheckerConfig, ConservationChecker, ValidationMetrics, ValidationReport};
pub use logging::{
    default_log_level, init_logging, init_stderr_logging, logging_status, LogTarget,
};
pub use model::decay::{CodeBlock, DecayBlock, DecayChannel, Dialect, NameBlock};
pub use model::particle::{ParticleCode, ParticleRecord, QuantumNumbers, Stability};
pub use names::{MatchKind, NameMatch};
pub use pipeline::{load_dataset, validate_files, Dataset, IngestError, IngestResult};
pub use registry::{CodeRegistry, NameRegistry, ParticleLookup, RegistryError, RegistryResult};
pub use table::{parse_code_table, parse_name_table, TableError, TableResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
