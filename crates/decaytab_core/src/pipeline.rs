//! File-level ingestion and one-call validation runs.
//!
//! # Responsibility
//! - Read a particle list and a decay table of one dialect from disk.
//! - Surface ingestion failures with the file path and input role.
//!
//! # Invariants
//! - Ingestion errors abort the run before any checking happens.
//! - Validation findings are never converted into `IngestError`.

use crate::check::{CheckerConfig, ConservationChecker, ValidationReport};
use crate::model::decay::{CodeBlock, Dialect, NameBlock};
use crate::registry::{CodeRegistry, NameRegistry, RegistryError};
use crate::table::{parse_code_table, parse_name_table, TableError};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub type IngestResult<T> = Result<T, IngestError>;

/// Fatal error while loading input files.
#[derive(Debug)]
pub enum IngestError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    ParticleList {
        path: PathBuf,
        source: RegistryError,
    },
    DecayTable {
        path: PathBuf,
        source: TableError,
    },
}

impl IngestError {
    /// Short tag for the failing input, used by console renderers.
    pub fn role(&self) -> &'static str {
        match self {
            Self::Io { .. } => "input read error",
            Self::ParticleList { .. } => "particle list parse error",
            Self::DecayTable { .. } => "decay table parse error",
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. }
            | Self::ParticleList { path, .. }
            | Self::DecayTable { path, .. } => path,
        }
    }
}

impl Display for IngestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::ParticleList { path, source } => write!(f, "{}: {source}", path.display()),
            Self::DecayTable { path, source } => write!(f, "{}: {source}", path.display()),
        }
    }
}

impl Error for IngestError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::ParticleList { source, .. } => Some(source),
            Self::DecayTable { source, .. } => Some(source),
        }
    }
}

/// A registry and a decay table of the same dialect.
///
/// Variants pair each dialect's registry with its own block type, so a
/// code-indexed table is never checked against a name registry.
#[derive(Debug, Clone)]
pub enum Dataset {
    CodeIndexed {
        registry: CodeRegistry,
        blocks: Vec<CodeBlock>,
    },
    NameIndexed {
        registry: NameRegistry,
        blocks: Vec<NameBlock>,
    },
}

impl Dataset {
    /// Parses in-memory particle-list and decay-table text.
    ///
    /// Paths are only used to label errors.
    pub fn from_text(
        dialect: Dialect,
        particle_list: (&Path, &str),
        decay_table: (&Path, &str),
    ) -> IngestResult<Self> {
        let (plist_path, plist_text) = particle_list;
        let (decays_path, decays_text) = decay_table;
        let particle_err = |source| IngestError::ParticleList {
            path: plist_path.to_path_buf(),
            source,
        };
        let table_err = |source| IngestError::DecayTable {
            path: decays_path.to_path_buf(),
            source,
        };

        match dialect {
            Dialect::CodeIndexed => Ok(Self::CodeIndexed {
                registry: CodeRegistry::parse(plist_text).map_err(particle_err)?,
                blocks: parse_code_table(decays_text).map_err(table_err)?,
            }),
            Dialect::NameIndexed => Ok(Self::NameIndexed {
                registry: NameRegistry::parse(plist_text).map_err(particle_err)?,
                blocks: parse_name_table(decays_text).map_err(table_err)?,
            }),
        }
    }

    pub fn dialect(&self) -> Dialect {
        match self {
            Self::CodeIndexed { .. } => Dialect::CodeIndexed,
            Self::NameIndexed { .. } => Dialect::NameIndexed,
        }
    }

    pub fn block_count(&self) -> usize {
        match self {
            Self::CodeIndexed { blocks, .. } => blocks.len(),
            Self::NameIndexed { blocks, .. } => blocks.len(),
        }
    }

    /// Checks the decay table against the registry.
    pub fn validate(&self, config: &CheckerConfig) -> ValidationReport {
        let checker = ConservationChecker::new(config);
        match self {
            Self::CodeIndexed { registry, blocks } => checker.check_code_table(registry, blocks),
            Self::NameIndexed { registry, blocks } => checker.check_name_table(registry, blocks),
        }
    }
}

/// Reads and parses both input files.
///
/// # Errors
/// - `IngestError::Io` when a file cannot be read.
/// - `IngestError::ParticleList` when the particle list yields no records.
/// - `IngestError::DecayTable` on the first decay-table grammar error.
pub fn load_dataset(dialect: Dialect, plist: &Path, decays: &Path) -> IngestResult<Dataset> {
    let plist_text = read_input(plist)?;
    let decays_text = read_input(decays)?;
    let dataset = Dataset::from_text(dialect, (plist, &plist_text), (decays, &decays_text))
        .inspect_err(|err| {
            error!(
                "event=ingest module=pipeline status=error dialect={dialect} error_code={} path={}",
                err.role().replace(' ', "_"),
                err.path().display()
            );
        })?;
    info!(
        "event=ingest module=pipeline status=ok dialect={dialect} blocks={}",
        dataset.block_count()
    );
    Ok(dataset)
}

/// Loads both files and validates them in one call.
pub fn validate_files(
    dialect: Dialect,
    plist: &Path,
    decays: &Path,
    config: &CheckerConfig,
) -> IngestResult<ValidationReport> {
    let dataset = load_dataset(dialect, plist, decays)?;
    Ok(dataset.validate(config))
}

fn read_input(path: &Path) -> IngestResult<String> {
    std::fs::read_to_string(path).map_err(|source| {
        error!(
            "event=ingest module=pipeline status=error error_code=io path={}",
            path.display()
        );
        IngestError::Io {
            path: path.to_path_buf(),
            source,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::{Dataset, IngestError};
    use crate::check::CheckerConfig;
    use crate::model::decay::Dialect;
    use std::error::Error;
    use std::path::Path;

    #[test]
    fn from_text_labels_table_errors_with_path() {
        let err = Dataset::from_text(
            Dialect::CodeIndexed,
            (Path::new("list.dat"), "211 pi+ 0 0.14 1 -1 0 1 0 0\n"),
            (Path::new("decays.dat"), "211\nx\n"),
        )
        .unwrap_err();
        assert!(matches!(err, IngestError::DecayTable { .. }));
        assert_eq!(err.role(), "decay table parse error");
        assert_eq!(err.path(), Path::new("decays.dat"));
        assert!(err.to_string().starts_with("decays.dat: line 2"));
        assert!(err.source().is_some());
    }

    #[test]
    fn from_text_rejects_unusable_particle_list() {
        let err = Dataset::from_text(
            Dialect::NameIndexed,
            (Path::new("names.txt"), "# empty\n"),
            (Path::new("decays.txt"), ""),
        )
        .unwrap_err();
        assert!(matches!(err, IngestError::ParticleList { .. }));
    }

    #[test]
    fn validate_dispatches_on_dialect() {
        let dataset = Dataset::from_text(
            Dialect::NameIndexed,
            (
                Path::new("names.txt"),
                "π+ 0.1396 0 -1 211\nπ- 0.1396 0 -1 -211\nρ(770)0 0.775 0.149 -1 113\n",
            ),
            (Path::new("decays.txt"), "ρ(770)0\n1.0 1 π⁺ π⁻\n"),
        )
        .expect("dataset loads");
        assert_eq!(dataset.dialect(), Dialect::NameIndexed);
        let report = dataset.validate(&CheckerConfig::default());
        assert_eq!(report.dialect(), Dialect::NameIndexed);
        assert!(report.is_ok(), "{:?}", report.errors());
        assert_eq!(report.metrics().heuristic_matches, 0);
    }
}
