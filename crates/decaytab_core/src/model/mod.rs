//! Typed records for particle lists and decay tables.
//!
//! # Responsibility
//! - Define the in-memory shapes produced by registry and table parsers.
//! - Keep the two table dialects distinct at the type level.
//!
//! # Invariants
//! - Antiparticle quantum numbers are the exact negation of the particle's.
//! - A `DecayBlock` keeps channels in source order.

pub mod decay;
pub mod particle;
