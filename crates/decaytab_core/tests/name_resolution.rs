use decaytab_core::names::{candidate_keys, canonicalize, pretty_print};
use decaytab_core::{
    parse_name_table, CheckerConfig, ConservationChecker, Dialect, MatchKind, NameRegistry,
};

const NAMES: &str = "\
# name      mass     width     parity  codes
Ω           1.67245  0          1      3334
Λ           1.11568  0          1      3122
K-          0.49368  0         -1     -321
K̄0          0.49761  0         -1     -311
Ξ0          1.31486  0          1      3322
π-          0.13957  0         -1     -211
π0          0.13498  0         -1      111
p           0.93827  0          1      2212
";

fn registry() -> NameRegistry {
    NameRegistry::parse(NAMES).expect("name list should parse")
}

#[test]
fn omega_minus_resolves_through_default_charge() {
    let registry = registry();
    assert!(registry.is_known_name("Ω⁻"));
    let found = registry.resolve_name("Ω⁻").expect("Ω⁻ resolves");
    assert_eq!(found.key, "Ω");
    assert_eq!(found.kind, MatchKind::DefaultCharge);
}

#[test]
fn omega_plus_resolves_but_is_marked_as_flipped() {
    let registry = registry();
    assert!(registry.is_known_name("Ω⁺"));
    let found = registry.resolve_name("Ω⁺").expect("Ω⁺ resolves");
    assert_eq!(found.key, "Ω");
    assert_eq!(found.kind, MatchKind::FlippedCharge);
    assert!(found.kind.is_heuristic());
}

#[test]
fn glyph_variants_resolve_as_variants() {
    let registry = registry();
    let minus = registry.resolve_name("K⁻").expect("superscript minus resolves");
    assert_eq!(minus.key, "K-");
    assert_eq!(minus.kind, MatchKind::Variant);

    let antiproton = registry.resolve_name("p̄").expect("barred name resolves");
    assert_eq!(antiproton.key, "p");

    assert!(!registry.is_known_name("Σ+"));
    assert!(registry.codes_for("Σ+").is_empty());
}

#[test]
fn first_candidate_is_canonical_and_stable() {
    for raw in ["Ω⁻", "  K̄⁰  ", "K1(1270)", "ν̄_e", "Δ(1232)⁺⁺", "J/ψ"] {
        let keys = candidate_keys(raw);
        assert_eq!(keys[0], canonicalize(raw), "raw {raw}");
        assert_eq!(canonicalize(&keys[0]), keys[0], "raw {raw}");
    }
}

#[test]
fn pretty_printed_names_resolve_back_to_themselves() {
    for name in ["K1(1270)", "Ξ0", "π-", "Δ(1232)++", "Ω"] {
        let canonical = canonicalize(name);
        let rendered = pretty_print(&canonical);
        assert!(
            candidate_keys(&rendered).contains(&canonical),
            "{canonical} -> {rendered}"
        );
    }
}

#[test]
fn spaced_charge_cluster_resolves_to_compact_spelling() {
    assert!(candidate_keys("Δ(1232) ++").contains(&"Δ(1232)++".to_string()));

    let registry =
        NameRegistry::parse("Δ(1232)++ 1.232 0.117 1 2224\n").expect("name list should parse");
    let found = registry.resolve_name("Δ(1232) ++").expect("spaced name resolves");
    assert_eq!(found.key, "Δ(1232)++");
    assert_eq!(found.kind, MatchKind::Variant);
}

#[test]
fn name_table_checks_flag_heuristic_matches() {
    let decays = "\
Ω⁻
0.678 1 Λ K⁻
0.236 1 Ξ⁰ π⁻
0.086 1 Ξ- π0
";
    let blocks = parse_name_table(decays).expect("decay table should parse");
    let report = ConservationChecker::new(&CheckerConfig::default())
        .check_name_table(&registry(), &blocks);

    assert_eq!(report.dialect(), Dialect::NameIndexed);
    assert_eq!(
        report.errors(),
        &["[Ω⁻] Channel 3: Unknown daughters [Ξ-]".to_string()]
    );
    assert_eq!(report.metrics().unknown_daughters, 1);
    assert_eq!(report.metrics().heuristic_matches, 1);
    assert_eq!(report.warnings().len(), 1);
    assert!(report.warnings()[0].contains("by default-charge heuristic"));
    assert_eq!(report.metrics().charge_violations, 0);
}

#[test]
fn heuristic_warnings_can_be_disabled() {
    let blocks = parse_name_table("Ω+\n1.0 1 Λ K⁻\n").expect("decay table should parse");
    let config = CheckerConfig {
        flag_heuristic_matches: false,
        ..CheckerConfig::default()
    };
    let report = ConservationChecker::new(&config).check_name_table(&registry(), &blocks);

    assert!(report.is_ok(), "{:?}", report.errors());
    assert!(report.warnings().is_empty());
    assert_eq!(report.metrics().heuristic_matches, 1);
}

#[test]
fn name_dialect_never_reports_conservation_violations() {
    // p -> π0 breaks baryon number, but names carry no quantum numbers.
    let blocks = parse_name_table("p\n1.0 0 π0\n").expect("decay table should parse");
    let report = ConservationChecker::new(&CheckerConfig::default())
        .check_name_table(&registry(), &blocks);
    assert!(report.is_ok(), "{:?}", report.errors());
    assert_eq!(report.metrics().baryon_violations, 0);
    assert_eq!(report.metrics().stable_but_decaying, 0);
}
