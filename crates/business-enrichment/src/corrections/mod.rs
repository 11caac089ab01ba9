//! Manual corrections keyed by record identifier.
//!
//! Corrections come from web lookups done by hand and are applied before
//! any analysis, so the worklist never asks for data we already have.

mod corrector;
pub mod known;

pub use corrector::Corrector;
pub use known::known_corrections;
