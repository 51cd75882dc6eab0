use decaytab_core::check::kahan_sum;
use decaytab_core::{
    parse_code_table, CheckerConfig, CodeRegistry, ConservationChecker, QuantumNumbers,
    ValidationReport,
};

const PARTICLES: &str = "\
# pdgid name stable mass deg stat B Q S C |S| |C| width threshold
22    gamma  1  0.0      2 -1  0  0  0  0  0  0  0      0
111   pi0    1  0.13498  1 -1  0  0  0  0  0  0  0      0
211   pi+    1  0.13957  1 -1  0  1  0  0  0  0  0      0
113   rho0   0  0.77526  3 -1  0  0  0  0  0  0  0.149  0.28
321   K+     1  0.49368  1 -1  0  1  1  0  1  0  0      0
411   D+     0  1.86966  1 -1  0  1  0  1  0  1  0      0
2212  p      1  0.93827  2  1  1  1  0  0  0  0  0      0
3122  Lambda 0  1.11568  2  1  1  0 -1  0  1  0  0      0
";

fn registry() -> CodeRegistry {
    CodeRegistry::parse(PARTICLES).expect("particle list should parse")
}

fn run(decays: &str, config: &CheckerConfig) -> ValidationReport {
    let blocks = parse_code_table(decays).expect("decay table should parse");
    ConservationChecker::new(config).check_code_table(&registry(), &blocks)
}

#[test]
fn proton_to_pion_violates_baryon_number_and_stability() {
    let report = run("2212\n1\n1.0 211\n", &CheckerConfig::default());

    assert!(!report.is_ok());
    assert_eq!(report.exit_code(), 1);
    assert_eq!(
        report.errors(),
        &["[PDG 2212] Channel 1: baryon number not conserved (parent B=1, daughters B=0)"
            .to_string()]
    );
    assert_eq!(
        report.warnings(),
        &["[PDG 2212] has decays listed but is marked stable in particle list.".to_string()]
    );
    assert_eq!(report.metrics().charge_violations, 0);
    assert_eq!(report.metrics().baryon_violations, 1);
    assert_eq!(report.metrics().stable_but_decaying, 1);
}

#[test]
fn unknown_parent_yields_exactly_one_finding() {
    let report = run("313\n2\n0.667 321 -211\n0.333 311 111\n", &CheckerConfig::default());

    assert_eq!(
        report.errors(),
        &["[PDG 313] Parent not found in particle list.".to_string()]
    );
    assert!(report.warnings().is_empty());
    assert_eq!(report.metrics().unknown_parents, 1);
    assert_eq!(report.metrics().unknown_daughters, 0);
    assert_eq!(report.metrics().channels_checked, 2);
}

#[test]
fn small_br_deficit_is_a_warning_only() {
    let config = CheckerConfig {
        br_error_tolerance: 0.01,
        br_warning_tolerance: 1e-6,
        ..CheckerConfig::default()
    };
    let report = run(
        "113\n3\n0.5 211 -211\n0.3 111 111\n0.1999 111 22\n",
        &config,
    );

    assert!(report.is_ok(), "{:?}", report.errors());
    assert_eq!(report.exit_code(), 0);
    assert_eq!(report.warnings().len(), 1);
    assert!(report.warnings()[0].starts_with("[PDG 113] Sum of BRs = 0.999900"));
    assert_eq!(report.metrics().br_sum_violations, 1);
    assert_eq!(report.metrics().br_sum_warnings, 1);
    assert_eq!(report.metrics().br_sum_errors, 0);
}

#[test]
fn large_br_deficit_is_an_error_with_sum() {
    let report = run("113\n2\n0.5 211 -211\n0.3 111 111\n", &CheckerConfig::default());
    assert_eq!(
        report.errors(),
        &["[PDG 113] Sum of BRs = 0.800000 (≠ 1.0)".to_string()]
    );
    assert_eq!(report.metrics().br_sum_errors, 1);
}

#[test]
fn antiparticle_quantum_numbers_are_exact_negations() {
    let registry = registry();
    for code in registry.codes() {
        let particle = registry.quantum_numbers(code).expect("registered code");
        let antiparticle = registry.quantum_numbers(-code).expect("inferred antiparticle");
        assert_eq!(antiparticle, particle.negated(), "code {code}");
        assert_eq!(antiparticle + particle, QuantumNumbers::ZERO);
    }
}

#[test]
fn br_sum_does_not_depend_on_channel_order() {
    let forward = [0.7, 0.2, 0.1];
    let backward = [0.1, 0.2, 0.7];
    assert_eq!(kahan_sum(forward), kahan_sum(backward));
    assert_eq!(kahan_sum(std::iter::repeat(0.1).take(10)), 1.0);

    let report = run(
        "113\n3\n0.1 111 22\n0.2 111 111\n0.7 211 -211\n",
        &CheckerConfig::default(),
    );
    assert!(report.is_ok(), "{:?}", report.errors());
    assert_eq!(report.metrics().br_sum_violations, 0);
}

#[test]
fn bscc_toggle_keeps_charge_checks() {
    // D+ -> K- pi+ pi+ conserves charge but not charm or strangeness.
    let decays = "411\n1\n1.0 -321 211 211\n";

    let full = run(decays, &CheckerConfig::default());
    assert_eq!(full.metrics().charm_violations, 1);
    assert_eq!(full.metrics().strangeness_violations, 1);
    assert_eq!(full.metrics().charge_violations, 0);

    let charge_only = run(decays, &CheckerConfig::default().without_bscc());
    assert!(charge_only.is_ok(), "{:?}", charge_only.errors());

    let wrong_charge = run("411\n1\n1.0 321 211 211\n", &CheckerConfig::default().without_bscc());
    assert_eq!(wrong_charge.metrics().charge_violations, 1);
    assert!(wrong_charge.errors()[0].contains("daughters=[321, 211, 211]"));
}

#[test]
fn findings_follow_block_then_channel_order() {
    let decays = "\
3122
2
0.6 2212 -211
0.4 2212 211
2212
1
1.0 211
";
    let report = run(decays, &CheckerConfig::default().without_bscc());
    assert_eq!(
        report.errors(),
        &[
            "[PDG 3122] Channel 2: charge not conserved (parent Q=0, daughters Q=2) daughters=[2212, 211]"
                .to_string(),
        ]
    );
    assert_eq!(report.metrics().parents_checked, 2);
    assert_eq!(report.metrics().channels_checked, 3);
}

#[test]
fn duplicate_particle_codes_surface_as_warnings() {
    let list = format!("{PARTICLES}211 pi+dup 1 0.13957 1 -1 0 1 0 0\n");
    let registry = CodeRegistry::parse(&list).expect("particle list should parse");
    let blocks = parse_code_table("113\n1\n1.0 211 -211\n").expect("decay table should parse");
    let report =
        ConservationChecker::new(&CheckerConfig::default()).check_code_table(&registry, &blocks);

    assert!(report.is_ok());
    assert_eq!(report.metrics().duplicate_codes, 1);
    assert!(report.warnings()[0].starts_with("[PDG 211] Duplicate code in particle list"));
}
