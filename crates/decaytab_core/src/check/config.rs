//! Checker configuration.

use serde::{Deserialize, Serialize};

pub const DEFAULT_BR_ERROR_TOLERANCE: f64 = 5e-4;
pub const DEFAULT_BR_RELATIVE_TOLERANCE: f64 = 1e-6;
pub const DEFAULT_BR_WARNING_TOLERANCE: f64 = 1e-6;

/// Tolerances and toggles for one validation run.
///
/// Missing JSON fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    /// Absolute error tolerance on `|sum(BR) - 1|`.
    pub br_error_tolerance: f64,
    /// Relative error tolerance, scaled by `max(1, |sum|)`.
    pub br_relative_tolerance: f64,
    /// Deviations above this but within the error tolerance are warnings.
    pub br_warning_tolerance: f64,
    /// Stable-but-decaying parents are errors instead of warnings.
    pub strict_stable: bool,
    pub check_baryon: bool,
    pub check_strangeness: bool,
    pub check_charm: bool,
    /// Warn when a name resolves only through a charge heuristic.
    pub flag_heuristic_matches: bool,
    pub check_duplicate_channels: bool,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            br_error_tolerance: DEFAULT_BR_ERROR_TOLERANCE,
            br_relative_tolerance: DEFAULT_BR_RELATIVE_TOLERANCE,
            br_warning_tolerance: DEFAULT_BR_WARNING_TOLERANCE,
            strict_stable: false,
            check_baryon: true,
            check_strangeness: true,
            check_charm: true,
            flag_heuristic_matches: true,
            check_duplicate_channels: true,
        }
    }
}

impl CheckerConfig {
    /// Turns off baryon, strangeness and charm checks; charge stays on.
    pub fn without_bscc(mut self) -> Self {
        self.check_baryon = false;
        self.check_strangeness = false;
        self.check_charm = false;
        self
    }

    /// Error threshold for a block whose BR sum is `sum`.
    pub fn br_error_threshold(&self, sum: f64) -> f64 {
        self.br_error_tolerance
            .max(self.br_relative_tolerance * sum.abs().max(1.0))
    }

    /// Returns the config actually used for checking plus a notice when a
    /// value had to be adjusted.
    ///
    /// A warning tolerance above the absolute error tolerance is lowered to
    /// it, so the warning tier can never swallow errors.
    pub fn effective(&self) -> (Self, Option<String>) {
        let mut adjusted = self.clone();
        if adjusted.br_warning_tolerance > adjusted.br_error_tolerance {
            adjusted.br_warning_tolerance = adjusted.br_error_tolerance;
            let notice = format!(
                "BR warning tolerance {:e} exceeds error tolerance {:e}; using {:e} for both",
                self.br_warning_tolerance, self.br_error_tolerance, self.br_error_tolerance
            );
            return (adjusted, Some(notice));
        }
        (adjusted, None)
    }
}
