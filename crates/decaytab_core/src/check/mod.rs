//! Conservation and normalization checking of parsed decay tables.
//!
//! # Responsibility
//! - Apply per-block and per-channel invariants against a registry.
//! - Accumulate every finding into one `ValidationReport`.
//!
//! # Invariants
//! - Findings are never fatal; a run reports everything it found.
//! - Message order follows block order, then channel order.
//! - A report is ok iff it has no errors.
//! - An unknown parent yields one error and skips stability and
//!   conservation checks for its block.

pub mod checker;
pub mod config;
pub mod report;

pub use checker::{kahan_sum, ConservationChecker};
pub use config::CheckerConfig;
pub use report::{ValidationMetrics, ValidationReport};
