//! Name-indexed particle list and registry.
//!
//! Columns: `name mass width parity code [code ...]`. One line may carry an
//! isospin multiplet, so a name maps to one or more codes.

use crate::model::particle::{ParticleCode, QuantumNumbers, Stability};
use crate::names::{self, canonicalize, pretty_print, resolve_with, NameMatch};
use crate::registry::{DuplicateCode, ParticleLookup, RegistryError, RegistryResult, Resolution};
use crate::table::{content_lines, parse_real};
use log::{debug, error, info};
use std::collections::{HashMap, HashSet};
use std::time::Instant;

const MIN_COLUMNS: usize = 5;

/// One registered name with its multiplet codes.
#[derive(Debug, Clone, PartialEq)]
pub struct NameEntry {
    /// Canonical name.
    pub name: String,
    pub mass: Option<f64>,
    pub width: Option<f64>,
    pub parity: Option<i32>,
    pub codes: Vec<ParticleCode>,
    pub line: usize,
}

/// Registry keyed by canonical particle name.
#[derive(Debug, Clone, Default)]
pub struct NameRegistry {
    entries: Vec<NameEntry>,
    by_name: HashMap<String, usize>,
    known_names: HashSet<String>,
    skipped_lines: usize,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from name-indexed particle-list text.
    ///
    /// # Errors
    /// Returns `RegistryError::Empty` when no line yields an entry.
    pub fn parse(text: &str) -> RegistryResult<Self> {
        let started_at = Instant::now();
        let mut registry = Self::new();

        for (line, content) in content_lines(text) {
            match parse_name_line(content, line) {
                Some(entry) => registry.register(entry),
                None => {
                    registry.skipped_lines += 1;
                    debug!("event=particle_line_skip module=registry dialect=name line={line}");
                }
            }
        }

        if registry.is_empty() {
            error!(
                "event=particle_list_parse module=registry status=error dialect=name error_code=empty skipped={}",
                registry.skipped_lines
            );
            return Err(RegistryError::Empty {
                skipped_lines: registry.skipped_lines,
            });
        }

        info!(
            "event=particle_list_parse module=registry status=ok dialect=name names={} skipped={} duration_ms={}",
            registry.len(),
            registry.skipped_lines,
            started_at.elapsed().as_millis()
        );
        Ok(registry)
    }

    /// Registers one entry; a repeated name merges its codes into the first.
    pub fn register(&mut self, entry: NameEntry) {
        let name = canonicalize(&entry.name);
        if let Some(&idx) = self.by_name.get(&name) {
            let existing = &mut self.entries[idx];
            for code in entry.codes {
                if !existing.codes.contains(&code) {
                    existing.codes.push(code);
                }
            }
            return;
        }
        self.by_name.insert(name.clone(), self.entries.len());
        self.known_names.insert(name.clone());
        self.entries.push(NameEntry { name, ..entry });
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }

    /// Entry registered under exactly `canonical`.
    pub fn entry(&self, canonical: &str) -> Option<&NameEntry> {
        self.by_name.get(canonical).map(|&idx| &self.entries[idx])
    }

    /// True when any candidate spelling of `raw` is registered.
    pub fn is_known_name(&self, raw: &str) -> bool {
        names::is_known(raw, &self.known_names)
    }

    /// Resolves `raw` to its best registered spelling.
    pub fn resolve_name(&self, raw: &str) -> Option<NameMatch> {
        resolve_with(raw, |key| self.known_names.contains(key))
    }

    /// Codes registered for the name `raw` resolves to; empty if unknown.
    pub fn codes_for(&self, raw: &str) -> &[ParticleCode] {
        self.resolve_name(raw)
            .and_then(|found| self.entry(&found.key))
            .map(|entry| entry.codes.as_slice())
            .unwrap_or_default()
    }

    /// Name-indexed lists carry no stability flag; known names report
    /// `Unknown`.
    pub fn stability(&self, raw: &str) -> RegistryResult<Stability> {
        if self.is_known_name(raw) {
            Ok(Stability::Unknown)
        } else {
            Err(RegistryError::UnknownParticle(canonicalize(raw)))
        }
    }
}

impl ParticleLookup for NameRegistry {
    type Key = String;

    fn resolve(&self, key: &String) -> RegistryResult<Resolution> {
        self.resolve_name(key)
            .map(Resolution::from)
            .ok_or_else(|| RegistryError::UnknownParticle(key.clone()))
    }

    fn stability(&self, key: &String) -> RegistryResult<Stability> {
        NameRegistry::stability(self, key)
    }

    fn quantum_numbers(&self, _key: &String) -> Option<RegistryResult<QuantumNumbers>> {
        None
    }

    fn label(&self, key: &String) -> String {
        pretty_print(key)
    }

    fn duplicate_codes(&self) -> &[DuplicateCode] {
        &[]
    }
}

fn parse_name_line(content: &str, line: usize) -> Option<NameEntry> {
    let fields: Vec<&str> = content.split_whitespace().collect();
    if fields.len() < MIN_COLUMNS {
        return None;
    }
    let codes = fields[4..]
        .iter()
        .map(|token| token.parse::<ParticleCode>().ok())
        .collect::<Option<Vec<_>>>()?;

    Some(NameEntry {
        name: canonicalize(fields[0]),
        mass: parse_real(fields[1]),
        width: parse_real(fields[2]),
        parity: fields[3].parse::<i32>().ok(),
        codes,
        line,
    })
}

#[cfg(test)]
mod tests {
    use super::NameRegistry;
    use crate::model::particle::Stability;
    use crate::names::MatchKind;
    use crate::registry::{ParticleLookup, RegistryError};

    const LIST: &str = "\
# name   mass    width    parity  codes
π        0.1396  0        -1      211 111 -211
p        0.9383  0         1      2212
Ω        1.6725  0         1      3334
K₁(1270) 1.253   0.09      1      10323 10313
broken   1.0     0         1      12 x3
short    1.0     0
p        0.9383  0         1      2212 2214
";

    fn registry() -> NameRegistry {
        NameRegistry::parse(LIST).expect("name list should parse")
    }

    #[test]
    fn parses_multiplets_and_skips_bad_lines() {
        let registry = registry();
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.skipped_lines(), 2);
        assert_eq!(registry.codes_for("π"), &[211, 111, -211]);
        let kaon = registry.entry("K1(1270)").expect("kaon registered under its folded name");
        assert_eq!(kaon.width, Some(0.09));
        assert_eq!(kaon.parity, Some(1));
    }

    #[test]
    fn repeated_name_merges_codes() {
        let registry = registry();
        assert_eq!(registry.codes_for("p"), &[2212, 2214]);
        assert_eq!(registry.entry("p").map(|entry| entry.line), Some(3));
    }

    #[test]
    fn resolves_spelling_variants() {
        let registry = registry();
        assert!(registry.is_known_name("K1(1270)"));
        assert_eq!(registry.codes_for("K1(1270)"), &[10323, 10313]);

        let found = registry.resolve_name("p̄").expect("antiproton resolves");
        assert_eq!(found.key, "p");
        assert_eq!(found.kind, MatchKind::Variant);
    }

    #[test]
    fn default_and_flipped_charge_are_distinguishable() {
        let registry = registry();
        let minus = registry.resolve_name("Ω⁻").expect("Ω⁻ resolves");
        let plus = registry.resolve_name("Ω⁺").expect("Ω⁺ resolves");
        assert_eq!(minus.kind, MatchKind::DefaultCharge);
        assert_eq!(plus.kind, MatchKind::FlippedCharge);
        assert!(registry.is_known_name("Ω⁻"));
        assert!(registry.is_known_name("Ω⁺"));
    }

    #[test]
    fn stability_is_unknown_for_registered_names() {
        let registry = registry();
        assert_eq!(registry.stability("p"), Ok(Stability::Unknown));
        assert!(matches!(
            registry.stability("Ξ"),
            Err(RegistryError::UnknownParticle(_))
        ));
        assert!(ParticleLookup::quantum_numbers(&registry, &"p".to_string()).is_none());
    }

    #[test]
    fn empty_list_is_an_error() {
        assert!(matches!(
            NameRegistry::parse("only three fields\n"),
            Err(RegistryError::Empty { skipped_lines: 1 })
        ));
    }
}
