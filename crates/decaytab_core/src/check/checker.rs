//! Per-block conservation and normalization checks.

use crate::check::config::CheckerConfig;
use crate::check::report::{ReportBuilder, ValidationReport};
use crate::model::decay::{CodeBlock, DecayBlock, DecayChannel, Dialect, NameBlock};
use crate::model::particle::{QuantumNumbers, Stability};
use crate::registry::{CodeRegistry, NameRegistry, ParticleLookup};
use log::{info, warn};
use std::collections::BTreeMap;
use std::fmt::Display;
use std::time::Instant;

/// Validates decay blocks against a registry.
///
/// The configuration is resolved once at construction; a tolerance
/// adjustment notice becomes the first warning of every report.
#[derive(Debug, Clone)]
pub struct ConservationChecker {
    config: CheckerConfig,
    notice: Option<String>,
}

impl ConservationChecker {
    pub fn new(config: &CheckerConfig) -> Self {
        let (config, notice) = config.effective();
        if let Some(notice) = notice.as_deref() {
            warn!("event=config_adjust module=check status=ok notice=\"{notice}\"");
        }
        Self { config, notice }
    }

    /// Configuration after tolerance adjustment.
    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    pub fn check_code_table(
        &self,
        registry: &CodeRegistry,
        blocks: &[CodeBlock],
    ) -> ValidationReport {
        self.check(Dialect::CodeIndexed, registry, blocks)
    }

    pub fn check_name_table(
        &self,
        registry: &NameRegistry,
        blocks: &[NameBlock],
    ) -> ValidationReport {
        self.check(Dialect::NameIndexed, registry, blocks)
    }

    /// Runs every block check in source order and returns the finished
    /// report.
    pub fn check<L>(
        &self,
        dialect: Dialect,
        registry: &L,
        blocks: &[DecayBlock<L::Key>],
    ) -> ValidationReport
    where
        L: ParticleLookup,
        L::Key: Display + Ord,
    {
        let started_at = Instant::now();
        let mut report = ReportBuilder::new(dialect);

        if let Some(notice) = &self.notice {
            report.warning(notice.clone());
        }
        for duplicate in registry.duplicate_codes() {
            report.metrics.duplicate_codes += 1;
            report.warning(format!(
                "[PDG {}] Duplicate code in particle list: line {} ignored, first defined on line {}",
                duplicate.code, duplicate.duplicate_line, duplicate.first_line
            ));
        }

        for block in blocks {
            BlockCheck {
                config: &self.config,
                registry,
                block,
                label: registry.label(&block.parent),
            }
            .run(&mut report);
        }

        let report = report.finish();
        info!(
            "event=validation_run module=check status={} dialect={} parents={} channels={} errors={} warnings={} duration_ms={}",
            if report.is_ok() { "ok" } else { "error" },
            dialect,
            report.metrics().parents_checked,
            report.metrics().channels_checked,
            report.errors().len(),
            report.warnings().len(),
            started_at.elapsed().as_millis()
        );
        report
    }
}

struct BlockCheck<'a, L: ParticleLookup> {
    config: &'a CheckerConfig,
    registry: &'a L,
    block: &'a DecayBlock<L::Key>,
    label: String,
}

impl<L> BlockCheck<'_, L>
where
    L: ParticleLookup,
    L::Key: Display + Ord,
{
    fn run(&self, report: &mut ReportBuilder) {
        report.metrics.parents_checked += 1;

        let parent_known = self.check_parent(report);
        if parent_known {
            self.check_stability(report);
        }
        for (idx, channel) in self.block.channels.iter().enumerate() {
            self.check_channel_structure(idx + 1, channel, report);
        }
        self.check_br_sum(report);
        if self.config.check_duplicate_channels {
            self.check_duplicate_channels(report);
        }
        if !parent_known {
            return;
        }

        let parent_qn = match self.registry.quantum_numbers(&self.block.parent) {
            Some(Ok(qn)) => Some(qn),
            Some(Err(err)) => {
                report.error(format!("[{}] {err}", self.label));
                return;
            }
            None => None,
        };
        for (idx, channel) in self.block.channels.iter().enumerate() {
            self.check_daughters(idx + 1, channel, parent_qn, report);
        }
    }

    fn check_parent(&self, report: &mut ReportBuilder) -> bool {
        match self.registry.resolve(&self.block.parent) {
            Ok(resolution) => {
                if resolution.kind.is_heuristic() {
                    report.metrics.heuristic_matches += 1;
                    if self.config.flag_heuristic_matches {
                        report.warning(format!(
                            "[{}] Parent matched registry entry `{}` only by {} heuristic",
                            self.label, resolution.matched, resolution.kind
                        ));
                    }
                }
                true
            }
            Err(_) => {
                report.metrics.unknown_parents += 1;
                report.error(format!("[{}] Parent not found in particle list.", self.label));
                false
            }
        }
    }

    fn check_stability(&self, report: &mut ReportBuilder) {
        let stable = self
            .registry
            .stability(&self.block.parent)
            .is_ok_and(Stability::is_stable);
        if stable && !self.block.channels.is_empty() {
            report.metrics.stable_but_decaying += 1;
            report.finding(
                self.config.strict_stable,
                format!(
                    "[{}] has decays listed but is marked stable in particle list.",
                    self.label
                ),
            );
        }
    }

    fn check_channel_structure(
        &self,
        idx: usize,
        channel: &DecayChannel<L::Key>,
        report: &mut ReportBuilder,
    ) {
        report.metrics.channels_checked += 1;
        if !(0.0..=1.0).contains(&channel.branching_ratio) {
            report.metrics.br_out_of_range += 1;
            report.error(format!(
                "[{}] Channel {idx}: BR out of range: {}",
                self.label, channel.branching_ratio
            ));
        }
        if channel.daughters.is_empty() {
            report.metrics.empty_daughter_lists += 1;
            report.error(format!("[{}] Channel {idx}: no daughters listed", self.label));
        }
    }

    fn check_br_sum(&self, report: &mut ReportBuilder) {
        let sum = kahan_sum(self.block.channels.iter().map(|c| c.branching_ratio));
        let delta = (sum - 1.0).abs();
        if delta > self.config.br_error_threshold(sum) {
            report.metrics.br_sum_violations += 1;
            report.metrics.br_sum_errors += 1;
            report.error(format!(
                "[{}] Sum of BRs = {sum:.6} (≠ 1.0)",
                self.label
            ));
        } else if delta > self.config.br_warning_tolerance {
            report.metrics.br_sum_violations += 1;
            report.metrics.br_sum_warnings += 1;
            report.warning(format!(
                "[{}] Sum of BRs = {sum:.6} deviates from 1.0 by {delta:.3e}",
                self.label
            ));
        }
    }

    fn check_duplicate_channels(&self, report: &mut ReportBuilder) {
        let mut first_seen: BTreeMap<Vec<&L::Key>, usize> = BTreeMap::new();
        for (idx, channel) in self.block.channels.iter().enumerate() {
            let mut daughters: Vec<&L::Key> = channel.daughters.iter().collect();
            daughters.sort();
            if let Some(&first) = first_seen.get(&daughters) {
                report.metrics.duplicate_channels += 1;
                report.warning(format!(
                    "[{}] Channel {}: same daughters as channel {first}",
                    self.label,
                    idx + 1
                ));
            } else {
                first_seen.insert(daughters, idx + 1);
            }
        }
    }

    fn check_daughters(
        &self,
        idx: usize,
        channel: &DecayChannel<L::Key>,
        parent_qn: Option<QuantumNumbers>,
        report: &mut ReportBuilder,
    ) {
        if channel.daughters.is_empty() {
            return;
        }
        let mut unknowns: Vec<&L::Key> = Vec::new();
        let mut total = QuantumNumbers::ZERO;
        let mut totals_complete = parent_qn.is_some();

        for daughter in &channel.daughters {
            let resolution = match self.registry.resolve(daughter) {
                Ok(resolution) => resolution,
                Err(_) => {
                    unknowns.push(daughter);
                    continue;
                }
            };
            if resolution.kind.is_heuristic() {
                report.metrics.heuristic_matches += 1;
                if self.config.flag_heuristic_matches {
                    report.warning(format!(
                        "[{}] Channel {idx}: daughter `{daughter}` matched registry entry `{}` only by {} heuristic",
                        self.label, resolution.matched, resolution.kind
                    ));
                }
            }
            match self.registry.quantum_numbers(daughter) {
                Some(Ok(qn)) => total += qn,
                Some(Err(_)) => unknowns.push(daughter),
                None => totals_complete = false,
            }
        }

        if !unknowns.is_empty() {
            report.metrics.unknown_daughters += unknowns.len();
            report.error(format!(
                "[{}] Channel {idx}: Unknown daughters [{}]",
                self.label,
                join(&unknowns)
            ));
            return;
        }

        let Some(parent) = parent_qn.filter(|_| totals_complete) else {
            return;
        };
        if parent.charge != total.charge {
            report.metrics.charge_violations += 1;
            report.error(format!(
                "[{}] Channel {idx}: charge not conserved (parent Q={}, daughters Q={}) daughters=[{}]",
                self.label,
                parent.charge,
                total.charge,
                join(&channel.daughters.iter().collect::<Vec<_>>())
            ));
        }
        if self.config.check_baryon && parent.baryon != total.baryon {
            report.metrics.baryon_violations += 1;
            report.error(format!(
                "[{}] Channel {idx}: baryon number not conserved (parent B={}, daughters B={})",
                self.label, parent.baryon, total.baryon
            ));
        }
        if self.config.check_strangeness && parent.strangeness != total.strangeness {
            report.metrics.strangeness_violations += 1;
            report.error(format!(
                "[{}] Channel {idx}: strangeness not conserved (parent S={}, daughters S={})",
                self.label, parent.strangeness, total.strangeness
            ));
        }
        if self.config.check_charm && parent.charm != total.charm {
            report.metrics.charm_violations += 1;
            report.error(format!(
                "[{}] Channel {idx}: charm not conserved (parent C={}, daughters C={})",
                self.label, parent.charm, total.charm
            ));
        }
    }
}

fn join<T: Display>(items: &[&T]) -> String {
    items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Compensated summation; the result does not depend on accumulated
/// rounding from the order of channels.
pub fn kahan_sum<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let mut sum = 0.0_f64;
    let mut compensation = 0.0_f64;
    for value in values {
        let y = value - compensation;
        let t = sum + y;
        compensation = (t - sum) - y;
        sum = t;
    }
    sum
}
