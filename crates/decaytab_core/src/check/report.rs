//! Validation report and the builder that fills it during one pass.

use crate::model::decay::Dialect;
use serde::Serialize;

/// Per-category finding counters.
///
/// Counters are accumulated regardless of whether a finding was routed to
/// errors or warnings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationMetrics {
    pub parents_checked: usize,
    pub channels_checked: usize,
    /// Blocks whose BR sum deviates beyond the warning tolerance.
    pub br_sum_violations: usize,
    pub br_sum_errors: usize,
    pub br_sum_warnings: usize,
    pub unknown_parents: usize,
    /// Unresolvable daughter references, counted per occurrence.
    pub unknown_daughters: usize,
    pub br_out_of_range: usize,
    pub empty_daughter_lists: usize,
    pub baryon_violations: usize,
    pub charge_violations: usize,
    pub strangeness_violations: usize,
    pub charm_violations: usize,
    pub stable_but_decaying: usize,
    pub heuristic_matches: usize,
    pub duplicate_channels: usize,
    pub duplicate_codes: usize,
}

/// Outcome of one validation run. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    ok: bool,
    dialect: Dialect,
    errors: Vec<String>,
    warnings: Vec<String>,
    metrics: ValidationMetrics,
}

impl ValidationReport {
    /// True iff no error was found; warnings never fail a run.
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn metrics(&self) -> &ValidationMetrics {
        &self.metrics
    }

    /// Process exit status for this report: 0 iff ok.
    pub fn exit_code(&self) -> i32 {
        if self.ok {
            0
        } else {
            1
        }
    }
}

/// Accumulates findings for a single checking pass.
#[derive(Debug)]
pub(crate) struct ReportBuilder {
    dialect: Dialect,
    errors: Vec<String>,
    warnings: Vec<String>,
    pub(crate) metrics: ValidationMetrics,
}

impl ReportBuilder {
    pub(crate) fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            errors: Vec::new(),
            warnings: Vec::new(),
            metrics: ValidationMetrics::default(),
        }
    }

    pub(crate) fn error(&mut self, message: String) {
        self.errors.push(message);
    }

    pub(crate) fn warning(&mut self, message: String) {
        self.warnings.push(message);
    }

    /// Routes `message` to errors when `as_error`, otherwise to warnings.
    pub(crate) fn finding(&mut self, as_error: bool, message: String) {
        if as_error {
            self.error(message);
        } else {
            self.warning(message);
        }
    }

    pub(crate) fn finish(self) -> ValidationReport {
        ValidationReport {
            ok: self.errors.is_empty(),
            dialect: self.dialect,
            errors: self.errors,
            warnings: self.warnings,
            metrics: self.metrics,
        }
    }
}
