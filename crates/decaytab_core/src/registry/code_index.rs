//! Code-indexed particle list and registry.
//!
//! Columns (whitespace separated, first ten required):
//! `code name stable mass degeneracy statistics B Q S C [...]`.

use crate::model::particle::{ParticleCode, ParticleRecord, QuantumNumbers, Stability};
use crate::names::{canonicalize, MatchKind};
use crate::registry::{DuplicateCode, ParticleLookup, RegistryError, RegistryResult, Resolution};
use crate::table::{content_lines, parse_real};
use log::{debug, error, info};
use std::collections::BTreeMap;
use std::time::Instant;

const REQUIRED_COLUMNS: usize = 10;

#[derive(Debug, Clone)]
struct Registered {
    record: ParticleRecord,
    line: usize,
}

/// Registry keyed by particle code.
#[derive(Debug, Clone, Default)]
pub struct CodeRegistry {
    particles: BTreeMap<ParticleCode, Registered>,
    duplicates: Vec<DuplicateCode>,
    skipped_lines: usize,
}

impl CodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from code-indexed particle-list text.
    ///
    /// Lines with fewer than ten parseable columns are skipped.
    ///
    /// # Errors
    /// Returns `RegistryError::Empty` when no line yields a record.
    pub fn parse(text: &str) -> RegistryResult<Self> {
        let started_at = Instant::now();
        let mut registry = Self::new();

        for (line, content) in content_lines(text) {
            match parse_particle_line(content) {
                Some(record) => {
                    registry.register(record, line);
                }
                None => {
                    registry.skipped_lines += 1;
                    debug!("event=particle_line_skip module=registry dialect=code line={line}");
                }
            }
        }

        if registry.is_empty() {
            error!(
                "event=particle_list_parse module=registry status=error dialect=code error_code=empty skipped={}",
                registry.skipped_lines
            );
            return Err(RegistryError::Empty {
                skipped_lines: registry.skipped_lines,
            });
        }

        info!(
            "event=particle_list_parse module=registry status=ok dialect=code records={} skipped={} duplicates={} duration_ms={}",
            registry.len(),
            registry.skipped_lines,
            registry.duplicates.len(),
            started_at.elapsed().as_millis()
        );
        Ok(registry)
    }

    /// Registers one record; a repeated code is kept as a duplicate note.
    ///
    /// Returns `true` when the record was inserted.
    pub fn register(&mut self, record: ParticleRecord, line: usize) -> bool {
        let code = record.code;
        if let Some(existing) = self.particles.get(&code) {
            self.duplicates.push(DuplicateCode {
                code,
                first_line: existing.line,
                duplicate_line: line,
            });
            return false;
        }
        self.particles.insert(code, Registered { record, line });
        true
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }

    /// Returns sorted registered codes.
    pub fn codes(&self) -> Vec<ParticleCode> {
        self.particles.keys().copied().collect()
    }

    /// Returns the record registered under exactly `code`.
    pub fn get(&self, code: ParticleCode) -> Option<&ParticleRecord> {
        self.particles.get(&code).map(|entry| &entry.record)
    }

    /// Returns the record for `code` or, failing that, for `|code|`.
    ///
    /// The flag is `true` when the record was found through `|code|`, i.e.
    /// `code` is the antiparticle of the registered entry.
    fn find(&self, code: ParticleCode) -> Option<(&ParticleRecord, bool)> {
        if let Some(record) = self.get(code) {
            return Some((record, false));
        }
        let absolute = code.checked_abs()?;
        self.get(absolute).map(|record| (record, true))
    }

    /// Quantum numbers of `code`, negated when only `|code|` is registered.
    pub fn quantum_numbers(&self, code: ParticleCode) -> RegistryResult<QuantumNumbers> {
        let (record, conjugate) = self
            .find(code)
            .ok_or_else(|| RegistryError::UnknownParticle(code.to_string()))?;
        let qn = record.quantum_numbers;
        Ok(if conjugate { qn.negated() } else { qn })
    }

    /// Stability of `code`; antiparticles share the particle's flag.
    pub fn stability(&self, code: ParticleCode) -> RegistryResult<Stability> {
        self.find(code)
            .map(|(record, _)| record.stability)
            .ok_or_else(|| RegistryError::UnknownParticle(code.to_string()))
    }

    pub fn duplicates(&self) -> &[DuplicateCode] {
        &self.duplicates
    }
}

impl ParticleLookup for CodeRegistry {
    type Key = ParticleCode;

    fn resolve(&self, key: &ParticleCode) -> RegistryResult<Resolution> {
        match self.find(*key) {
            Some((record, _)) => Ok(Resolution {
                matched: record.code.to_string(),
                kind: MatchKind::Exact,
            }),
            None => Err(RegistryError::UnknownParticle(key.to_string())),
        }
    }

    fn stability(&self, key: &ParticleCode) -> RegistryResult<Stability> {
        CodeRegistry::stability(self, *key)
    }

    fn quantum_numbers(&self, key: &ParticleCode) -> Option<RegistryResult<QuantumNumbers>> {
        Some(CodeRegistry::quantum_numbers(self, *key))
    }

    fn label(&self, key: &ParticleCode) -> String {
        format!("PDG {key}")
    }

    fn duplicate_codes(&self) -> &[DuplicateCode] {
        &self.duplicates
    }
}

fn parse_particle_line(content: &str) -> Option<ParticleRecord> {
    let fields: Vec<&str> = content.split_whitespace().collect();
    if fields.len() < REQUIRED_COLUMNS {
        return None;
    }

    let code = fields[0].parse::<ParticleCode>().ok()?;
    let name = canonicalize(fields[1]);
    let stable_flag = fields[2].parse::<i64>().ok()?;
    let mass = parse_real(fields[3])?;
    // Degeneracy and statistics are not used by the checker but must parse.
    parse_real(fields[4])?;
    parse_real(fields[5])?;
    // Quantum-number columns outside the 32-bit range make the line malformed.
    let baryon = fields[6].parse::<i32>().ok()?;
    let charge = fields[7].parse::<i32>().ok()?;
    let strangeness = fields[8].parse::<i32>().ok()?;
    let charm = fields[9].parse::<i32>().ok()?;

    Some(ParticleRecord {
        code,
        name,
        stability: Stability::from_flag(stable_flag),
        mass,
        quantum_numbers: QuantumNumbers::from_columns(baryon, charge, strangeness, charm),
    })
}
