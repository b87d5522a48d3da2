//! User-facing terminal output.
//!
//! The release workflow is meant to run unattended in CI, so there are no
//! prompts; everything here only prints.

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_commit_analysis, display_decision, display_error,
    display_manual_push_instruction, display_status, display_success, format_commit_analysis,
    format_decision,
};
