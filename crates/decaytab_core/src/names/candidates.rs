//! Candidate lookup keys and confidence-tagged name resolution.
//!
//! Candidates are generated in confidence order and de-duplicated keeping
//! the first occurrence, so resolving against a registry always reports the
//! most confident way a token matched.

use crate::names::charge::{
    charge_cluster_variants, default_charge, default_charge_variants,
    parse_trailing_charge_cluster,
};
use crate::names::normalize::{canonicalize, digit_variants, strip_overbar};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::{Display, Formatter};

/// Notations with several accepted spellings of the same particle.
const ALIAS_GROUPS: &[&[&str]] = &[
    &["νe", "ν_e", "nu_e", "nue"],
    &["νμ", "ν_μ", "nu_mu", "numu"],
    &["ντ", "ν_τ", "nu_tau", "nutau"],
    &["γ", "gamma", "photon"],
    &["J/ψ", "J/psi", "J/ψ(1S)", "J/psi(1S)"],
    &["η'", "η′"],
    &["η'(958)", "η′(958)"],
];

static CANONICAL_ALIAS_GROUPS: Lazy<Vec<Vec<String>>> = Lazy::new(|| {
    ALIAS_GROUPS
        .iter()
        .map(|group| group.iter().map(|alias| canonicalize(alias)).collect())
        .collect()
});

/// How a token matched a registered name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Canonical form itself is registered.
    Exact,
    /// Alias, overbar-stripped, digit-glyph or same-charge glyph spelling.
    Variant,
    /// Only the family default-charge heuristic matched.
    DefaultCharge,
    /// Only the opposite-charge spelling matched.
    FlippedCharge,
}

impl MatchKind {
    /// Whether the match relies on a charge heuristic rather than spelling.
    pub fn is_heuristic(self) -> bool {
        matches!(self, Self::DefaultCharge | Self::FlippedCharge)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Variant => "variant",
            Self::DefaultCharge => "default-charge",
            Self::FlippedCharge => "flipped-charge",
        }
    }
}

impl Display for MatchKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One generated lookup key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub key: String,
    pub kind: MatchKind,
}

/// Result of resolving a raw token against a set of registered names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameMatch {
    /// Canonical form of the queried token.
    pub query: String,
    /// Registered key that matched.
    pub key: String,
    pub kind: MatchKind,
}

#[derive(Default)]
struct CandidateSet {
    items: Vec<Candidate>,
    seen: HashSet<String>,
}

impl CandidateSet {
    fn push(&mut self, key: String, kind: MatchKind) {
        if key.is_empty() || self.seen.contains(&key) {
            return;
        }
        self.seen.insert(key.clone());
        self.items.push(Candidate { key, kind });
    }

    /// Pushes `key` followed by its digit-glyph variants.
    fn push_with_digits(&mut self, key: String, kind: MatchKind) {
        let variants = digit_variants_keeping_charge(&key);
        self.push(key, kind);
        for variant in variants {
            self.push(variant, kind);
        }
    }
}

/// Digit variants of the part before a trailing charge cluster, so a
/// neutral `0` is never mistaken for an excitation index.
fn digit_variants_keeping_charge(form: &str) -> Vec<String> {
    let (base, cluster) = parse_trailing_charge_cluster(form);
    if cluster.is_none() {
        return digit_variants(form);
    }
    let suffix = &form[base.len()..];
    digit_variants(base)
        .into_iter()
        .map(|variant| format!("{variant}{suffix}"))
        .collect()
}

fn aliases_of(key: &str) -> Vec<String> {
    CANONICAL_ALIAS_GROUPS
        .iter()
        .filter(|group| group.iter().any(|alias| alias == key))
        .flat_map(|group| group.iter().filter(|alias| *alias != key).cloned())
        .collect()
}

/// Generates every lookup key for `raw`, tagged with its match confidence.
pub fn candidates(raw: &str) -> Vec<Candidate> {
    let mut set = CandidateSet::default();

    let canonical = canonicalize(raw);
    set.push(canonical.clone(), MatchKind::Exact);
    for alias in aliases_of(&canonical) {
        set.push(alias, MatchKind::Variant);
    }

    let stripped = strip_overbar(&canonical);
    if stripped != canonical {
        set.push(stripped.clone(), MatchKind::Variant);
        for alias in aliases_of(&stripped) {
            set.push(alias, MatchKind::Variant);
        }
    }

    let forms: Vec<String> = set.items.iter().map(|c| c.key.clone()).collect();
    for form in &forms {
        for variant in digit_variants_keeping_charge(form) {
            set.push(variant, MatchKind::Variant);
        }
    }

    let mut charged = Vec::new();
    let mut uncharged = Vec::new();
    for form in &forms {
        match parse_trailing_charge_cluster(form) {
            (base, Some(cluster)) => charged.push((base.to_string(), cluster)),
            (base, None) => uncharged.push(base.to_string()),
        }
    }

    for (base, cluster) in &charged {
        for variant in charge_cluster_variants(base, *cluster) {
            set.push_with_digits(variant, MatchKind::Variant);
        }
    }

    for (base, cluster) in &charged {
        if default_charge(base) == Some(*cluster) {
            set.push_with_digits(base.clone(), MatchKind::DefaultCharge);
        }
    }
    for base in &uncharged {
        for variant in default_charge_variants(base) {
            set.push_with_digits(variant, MatchKind::DefaultCharge);
        }
    }

    for (base, cluster) in &charged {
        let flipped = cluster.flipped();
        if flipped == *cluster {
            continue;
        }
        for variant in charge_cluster_variants(base, flipped) {
            set.push_with_digits(variant, MatchKind::FlippedCharge);
        }
        if default_charge(base) == Some(flipped) {
            set.push_with_digits(base.clone(), MatchKind::FlippedCharge);
        }
    }

    set.items
}

/// Ordered, de-duplicated lookup keys for `raw`; the first is canonical.
pub fn candidate_keys(raw: &str) -> Vec<String> {
    candidates(raw).into_iter().map(|c| c.key).collect()
}

/// Resolves `raw` to the first candidate accepted by `is_registered`.
pub fn resolve_with<F>(raw: &str, is_registered: F) -> Option<NameMatch>
where
    F: Fn(&str) -> bool,
{
    let all = candidates(raw);
    let query = all.first().map(|c| c.key.clone()).unwrap_or_default();
    all.into_iter()
        .find(|candidate| is_registered(&candidate.key))
        .map(|candidate| NameMatch {
            query,
            key: candidate.key,
            kind: candidate.kind,
        })
}

/// True iff any candidate key of `raw` is in `known_names`.
pub fn is_known(raw: &str, known_names: &HashSet<String>) -> bool {
    candidates(raw)
        .iter()
        .any(|candidate| known_names.contains(&candidate.key))
}
