//! Analysis engine for turning commits into a release decision

pub mod bump;
pub mod engine;

pub use bump::BumpCalculator;
pub use engine::{ReleaseDecision, ReleaseDecisionEngine};
