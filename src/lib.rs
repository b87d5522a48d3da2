pub mod analyzer;
pub mod boundary;
pub mod changelog;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod hooks;
pub mod logging;
pub mod ui;

pub use analyzer::{BumpCalculator, ReleaseDecision, ReleaseDecisionEngine};
pub use error::{ReleaseError, Result};
