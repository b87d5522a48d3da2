//! Domain logic - pure release rules independent of git operations

pub mod commit;
pub mod tag;
pub mod version;

pub use commit::{Commit, CommitParser, CommitType, DEFAULT_BREAKING_MARKERS};
pub use tag::{TagPattern, TagScan};
pub use version::{Version, VersionBump};
