//! Particle-name normalization and fuzzy lookup keys.
//!
//! # Responsibility
//! - Fold free-form particle names into one canonical form.
//! - Enumerate the bounded set of spellings a registry may use for the same
//!   particle (antiparticle bars, charge glyphs, subscript digits, aliases).
//! - Render canonical names back into display form for diagnostics.
//!
//! # Invariants
//! - Every function here is pure and total; no input is rejected.
//! - A token is known only when one of its generated candidates is
//!   registered; nothing is assumed valid by default.
//! - The first candidate of `candidate_keys` is always the canonical form.

pub mod candidates;
pub mod charge;
pub mod normalize;

pub use candidates::{
    candidate_keys, candidates, is_known, resolve_with, Candidate, MatchKind, NameMatch,
};
pub use charge::{
    charge_cluster_variants, default_charge, default_charge_variants,
    parse_trailing_charge_cluster, ChargeCluster, ChargeSign,
};
pub use normalize::{canonicalize, digit_variants, pretty_print, strip_overbar};
