//! Trailing charge clusters (`+`, `−−`, `⁰`, ...) and their glyph families.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::names::normalize::canonicalize;

const UNICODE_MINUS: char = '\u{2212}';
const MAX_CLUSTER_MARKS: usize = 2;

/// Sign part of a charge cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeSign {
    Plus,
    Minus,
    Neutral,
}

impl ChargeSign {
    /// Opposite sign; `Neutral` stays neutral.
    pub fn flipped(self) -> Self {
        match self {
            Self::Plus => Self::Minus,
            Self::Minus => Self::Plus,
            Self::Neutral => Self::Neutral,
        }
    }
}

/// Charge state drawn at the end of a particle name.
///
/// `magnitude` is 1 or 2; neutral clusters always use 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChargeCluster {
    pub sign: ChargeSign,
    pub magnitude: u8,
}

impl ChargeCluster {
    pub const NEUTRAL: Self = Self::new(ChargeSign::Neutral, 1);

    pub const fn new(sign: ChargeSign, magnitude: u8) -> Self {
        Self { sign, magnitude }
    }

    pub fn flipped(self) -> Self {
        Self::new(self.sign.flipped(), self.magnitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GlyphFamily {
    Ascii,
    UnicodeMinus,
    Superscript,
}

const GLYPH_FAMILIES: [GlyphFamily; 3] = [
    GlyphFamily::Ascii,
    GlyphFamily::UnicodeMinus,
    GlyphFamily::Superscript,
];

impl GlyphFamily {
    fn mark(self, sign: ChargeSign) -> char {
        match (self, sign) {
            (Self::Ascii | Self::UnicodeMinus, ChargeSign::Plus) => '+',
            (Self::Ascii, ChargeSign::Minus) => '-',
            (Self::UnicodeMinus, ChargeSign::Minus) => UNICODE_MINUS,
            (Self::Ascii | Self::UnicodeMinus, ChargeSign::Neutral) => '0',
            (Self::Superscript, ChargeSign::Plus) => '⁺',
            (Self::Superscript, ChargeSign::Minus) => '⁻',
            (Self::Superscript, ChargeSign::Neutral) => '⁰',
        }
    }
}

pub(crate) fn render_cluster(cluster: ChargeCluster, family: GlyphFamily) -> String {
    let count = match cluster.sign {
        ChargeSign::Neutral => 1,
        _ => usize::from(cluster.magnitude),
    };
    std::iter::repeat(family.mark(cluster.sign))
        .take(count)
        .collect()
}

fn sign_of_mark(c: char) -> Option<ChargeSign> {
    match c {
        '+' | '⁺' => Some(ChargeSign::Plus),
        '-' | UNICODE_MINUS | '⁻' => Some(ChargeSign::Minus),
        _ => None,
    }
}

/// Splits a trailing charge cluster off `name`.
///
/// Recognizes up to two identical sign marks (ASCII, Unicode minus or
/// superscript) or a single zero glyph. An ASCII `0` directly after another
/// digit is part of a number, not a charge. Mixed or over-long mark runs and
/// a cluster with nothing before it yield `(name, None)`.
pub fn parse_trailing_charge_cluster(name: &str) -> (&str, Option<ChargeCluster>) {
    let mut rev = name.char_indices().rev();
    let Some((last_idx, last)) = rev.next() else {
        return (name, None);
    };

    if last == '⁰' || last == '0' {
        let base = &name[..last_idx];
        let after_digit = base.chars().next_back().is_some_and(|c| c.is_ascii_digit());
        let base = base.trim_end();
        if base.is_empty() || (last == '0' && after_digit) {
            return (name, None);
        }
        return (base, Some(ChargeCluster::NEUTRAL));
    }

    let Some(sign) = sign_of_mark(last) else {
        return (name, None);
    };
    let mut start = last_idx;
    let mut marks = 1;
    for (idx, c) in rev {
        if sign_of_mark(c).is_none() {
            break;
        }
        if c != last {
            return (name, None);
        }
        marks += 1;
        start = idx;
    }

    let base = name[..start].trim_end();
    if marks > MAX_CLUSTER_MARKS || base.is_empty() {
        return (name, None);
    }
    let magnitude = u8::try_from(marks).unwrap_or(1);
    (base, Some(ChargeCluster::new(sign, magnitude)))
}

/// Re-renders `base` with `cluster` in every supported glyph family.
pub fn charge_cluster_variants(base: &str, cluster: ChargeCluster) -> Vec<String> {
    let mut variants: Vec<String> = Vec::with_capacity(GLYPH_FAMILIES.len());
    for family in GLYPH_FAMILIES {
        let rendered = format!("{base}{}", render_cluster(cluster, family));
        if !variants.contains(&rendered) {
            variants.push(rendered);
        }
    }
    variants
}

/// Baryon families whose bare name conventionally denotes one charge state.
const DEFAULT_CHARGE_FAMILIES: &[(&str, ChargeCluster)] = &[
    ("Ω", ChargeCluster::new(ChargeSign::Minus, 1)),
    ("Ωb", ChargeCluster::new(ChargeSign::Minus, 1)),
    ("Ωc", ChargeCluster::NEUTRAL),
    ("Λ", ChargeCluster::NEUTRAL),
    ("Λb", ChargeCluster::NEUTRAL),
    ("Λc", ChargeCluster::new(ChargeSign::Plus, 1)),
];

static CANONICAL_DEFAULT_FAMILIES: Lazy<Vec<(String, ChargeCluster)>> = Lazy::new(|| {
    DEFAULT_CHARGE_FAMILIES
        .iter()
        .map(|(family, cluster)| (canonicalize(family), *cluster))
        .collect()
});

/// Family key of a base name: text before any `(mass)` suffix, without
/// underscores, so `Ω_c(3000)` belongs to `Ωc`.
fn family_of(base: &str) -> String {
    let head = base.split('(').next().unwrap_or(base);
    head.trim().chars().filter(|c| *c != '_').collect()
}

/// Default charge state of the family `base` belongs to, if it has one.
pub fn default_charge(base: &str) -> Option<ChargeCluster> {
    let family = family_of(base);
    CANONICAL_DEFAULT_FAMILIES
        .iter()
        .find(|(name, _)| *name == family)
        .map(|(_, cluster)| *cluster)
}

/// Charged spellings implied by the family default of an uncharged `base`.
pub fn default_charge_variants(base: &str) -> Vec<String> {
    default_charge(base)
        .map(|cluster| charge_cluster_variants(base, cluster))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{
        charge_cluster_variants, default_charge, default_charge_variants,
        parse_trailing_charge_cluster, ChargeCluster, ChargeSign,
    };

    #[test]
    fn parses_single_and_double_marks_in_every_family() {
        assert_eq!(
            parse_trailing_charge_cluster("π+"),
            ("π", Some(ChargeCluster::new(ChargeSign::Plus, 1)))
        );
        assert_eq!(
            parse_trailing_charge_cluster("Δ(1232)⁺⁺"),
            ("Δ(1232)", Some(ChargeCluster::new(ChargeSign::Plus, 2)))
        );
        assert_eq!(
            parse_trailing_charge_cluster("Ω\u{2212}"),
            ("Ω", Some(ChargeCluster::new(ChargeSign::Minus, 1)))
        );
        assert_eq!(
            parse_trailing_charge_cluster("Ξ⁰"),
            ("Ξ", Some(ChargeCluster::NEUTRAL))
        );
    }

    #[test]
    fn mixed_or_overlong_marks_are_not_a_cluster() {
        assert_eq!(parse_trailing_charge_cluster("X+-"), ("X+-", None));
        assert_eq!(parse_trailing_charge_cluster("X-⁻"), ("X-⁻", None));
        assert_eq!(parse_trailing_charge_cluster("X+++"), ("X+++", None));
        assert_eq!(parse_trailing_charge_cluster("+"), ("+", None));
        assert_eq!(parse_trailing_charge_cluster(""), ("", None));
    }

    #[test]
    fn space_before_cluster_is_not_part_of_the_base() {
        assert_eq!(
            parse_trailing_charge_cluster("Δ(1232) ++"),
            ("Δ(1232)", Some(ChargeCluster::new(ChargeSign::Plus, 2)))
        );
        assert_eq!(
            parse_trailing_charge_cluster("K 0"),
            ("K", Some(ChargeCluster::NEUTRAL))
        );
        assert_eq!(parse_trailing_charge_cluster(" +"), (" +", None));
    }

    #[test]
    fn zero_after_digit_is_part_of_a_number() {
        assert_eq!(parse_trailing_charge_cluster("X10"), ("X10", None));
        assert_eq!(
            parse_trailing_charge_cluster("N(1440)0"),
            ("N(1440)", Some(ChargeCluster::NEUTRAL))
        );
        assert_eq!(parse_trailing_charge_cluster("ρ(770)"), ("ρ(770)", None));
    }

    #[test]
    fn variants_cover_all_glyph_families_without_duplicates() {
        let minus = charge_cluster_variants("Σ", ChargeCluster::new(ChargeSign::Minus, 1));
        assert_eq!(minus, vec!["Σ-", "Σ\u{2212}", "Σ⁻"]);

        let plus = charge_cluster_variants("Δ", ChargeCluster::new(ChargeSign::Plus, 2));
        assert_eq!(plus, vec!["Δ++", "Δ⁺⁺"]);

        let neutral = charge_cluster_variants("K", ChargeCluster::NEUTRAL);
        assert_eq!(neutral, vec!["K0", "K⁰"]);
    }

    #[test]
    fn default_charge_families() {
        assert_eq!(
            default_charge("Ω"),
            Some(ChargeCluster::new(ChargeSign::Minus, 1))
        );
        assert_eq!(
            default_charge("Ω(2012)"),
            Some(ChargeCluster::new(ChargeSign::Minus, 1))
        );
        assert_eq!(
            default_charge("Λ_c"),
            Some(ChargeCluster::new(ChargeSign::Plus, 1))
        );
        assert_eq!(default_charge("Σ"), None);
        assert!(default_charge_variants("Ω").contains(&"Ω⁻".to_string()));
        assert!(default_charge_variants("p").is_empty());
    }

    #[test]
    fn flipping_keeps_magnitude() {
        let cluster = ChargeCluster::new(ChargeSign::Plus, 2);
        assert_eq!(cluster.flipped(), ChargeCluster::new(ChargeSign::Minus, 2));
        assert_eq!(ChargeCluster::NEUTRAL.flipped(), ChargeCluster::NEUTRAL);
    }
}
