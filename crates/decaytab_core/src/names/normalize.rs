//! Canonical folding, overbar removal and digit-glyph variants.

use crate::names::charge::{parse_trailing_charge_cluster, render_cluster, GlyphFamily};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use unicode_normalization::UnicodeNormalization;

const SUBSCRIPT_DIGITS: [char; 10] = [
    '₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉',
];

const COMBINING_MACRON: char = '\u{0304}';
const COMBINING_OVERLINE: char = '\u{0305}';

/// Spacing bar glyphs folded onto the combining macron before NFKC, so that
/// `p¯` and `p̄` canonicalize identically.
const SPACING_BARS: &[char] = &['\u{00AF}', '\u{203E}', '\u{FFE3}', '\u{02C9}'];

static ASCII_DIGITS_AFTER_LETTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\p{L})([0-9]+)").expect("valid ascii digit regex"));
static SUBSCRIPT_DIGITS_AFTER_LETTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\p{L})([₀-₉]+)").expect("valid subscript digit regex"));

/// Folds a raw token into canonical form.
///
/// Applies NFKC compatibility normalization and collapses whitespace runs
/// to single spaces (leading and trailing whitespace is dropped).
pub fn canonicalize(raw: &str) -> String {
    let bars_folded: String = raw
        .chars()
        .map(|c| {
            if SPACING_BARS.contains(&c) {
                COMBINING_MACRON
            } else {
                c
            }
        })
        .collect();
    let folded: String = bars_folded.nfkc().collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Removes antiparticle bar marks anywhere in `name` and re-canonicalizes.
///
/// Charge/baryon sign handling for the antiparticle is left to the caller.
pub fn strip_overbar(name: &str) -> String {
    let mut stripped = String::with_capacity(name.len());
    for c in name.nfd() {
        if is_bar_mark(c) {
            // NFKC turns a spacing macron into space + combining mark.
            while stripped.ends_with(' ') {
                stripped.pop();
            }
            continue;
        }
        stripped.push(c);
    }
    canonicalize(&stripped)
}

fn is_bar_mark(c: char) -> bool {
    c == COMBINING_MACRON || c == COMBINING_OVERLINE || SPACING_BARS.contains(&c)
}

/// Swaps post-letter digit runs between ASCII and subscript glyphs.
///
/// Digits not directly preceded by a letter are left alone, so a resonance
/// mass such as `(1270)` never changes while `K1` and `K₁` map onto each
/// other. Returns only variants that differ from `token`.
pub fn digit_variants(token: &str) -> Vec<String> {
    let mut variants = Vec::new();
    for candidate in [to_subscript_digits(token), to_ascii_digits(token)] {
        if candidate != token && !variants.contains(&candidate) {
            variants.push(candidate);
        }
    }
    variants
}

pub(crate) fn to_subscript_digits(token: &str) -> String {
    ASCII_DIGITS_AFTER_LETTER
        .replace_all(token, |caps: &Captures<'_>| {
            let digits: String = caps[2]
                .chars()
                .filter_map(|c| c.to_digit(10))
                .map(|d| SUBSCRIPT_DIGITS[d as usize])
                .collect();
            format!("{}{}", &caps[1], digits)
        })
        .into_owned()
}

pub(crate) fn to_ascii_digits(token: &str) -> String {
    SUBSCRIPT_DIGITS_AFTER_LETTER
        .replace_all(token, |caps: &Captures<'_>| {
            let digits: String = caps[2]
                .chars()
                .filter_map(|c| SUBSCRIPT_DIGITS.iter().position(|s| *s == c))
                .filter_map(|d| char::from_digit(d as u32, 10))
                .collect();
            format!("{}{}", &caps[1], digits)
        })
        .into_owned()
}

/// Renders a canonical name for human-readable diagnostics.
///
/// Post-letter digits become subscripts and a trailing charge cluster
/// becomes superscript, e.g. `K1(1270)+` renders as `K₁(1270)⁺`.
pub fn pretty_print(canonical: &str) -> String {
    let (base, cluster) = parse_trailing_charge_cluster(canonical);
    let mut rendered = to_subscript_digits(base);
    if let Some(cluster) = cluster {
        rendered.push_str(&render_cluster(cluster, GlyphFamily::Superscript));
    }
    rendered
}
