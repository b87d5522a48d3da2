//! Git operations abstraction layer
//!
//! The release workflow depends on the [Repository] trait rather than on
//! `git2` directly, so it can run against an in-memory repository in tests.
//!
//! - [repository::Git2Repository]: real implementation using the `git2` crate
//! - [mock::MockRepository]: in-memory implementation for testing
//!
//! ```rust
//! # use git_release::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> git_release::Result<()> {
//! let head = repo.head_oid()?;
//! let commits = repo.get_commits_between(None, head)?;
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use git2::Oid;

/// Commit information for analysis
#[derive(Debug, Clone, PartialEq)]
pub struct CommitInfo {
    /// The full commit hash
    pub hash: String,
    /// The commit message
    pub message: String,
    /// The commit author
    pub author: String,
}

/// Git operations needed to read release history and publish a tag.
///
/// Implementations map underlying errors (like `git2::Error`) to the
/// appropriate [crate::error::ReleaseError] variants.
pub trait Repository {
    /// OID of the commit HEAD points at
    fn head_oid(&self) -> Result<Oid>;

    /// All tag names in the repository
    fn list_tags(&self) -> Result<Vec<String>>;

    /// Find a tag by name and get the OID of the commit it points to
    ///
    /// Handles both lightweight and annotated tags.
    ///
    /// # Returns
    /// * `Ok(Some(Oid))` - Commit the tag points at
    /// * `Ok(None)` - If the tag doesn't exist
    fn find_tag_oid(&self, tag_name: &str) -> Result<Option<Oid>>;

    /// Get commits reachable from `to_oid` but not from `from_oid`
    ///
    /// With `from_oid = None` the whole history up to `to_oid` is returned.
    ///
    /// # Returns
    /// * `Ok(Vec<CommitInfo>)` - Commits in chronological order (oldest first)
    fn get_commits_between(&self, from_oid: Option<Oid>, to_oid: Oid) -> Result<Vec<CommitInfo>>;

    /// Create a tag at `oid`
    ///
    /// Annotated when `message` is given, lightweight otherwise. Fails if the
    /// tag already exists.
    fn create_tag(&self, name: &str, oid: Oid, message: Option<&str>) -> Result<()>;

    /// Push tags to remote
    fn push_tags(&self, remote: &str, tag_names: &[&str]) -> Result<()>;

    /// Fetch all tags from remote
    fn fetch_tags(&self, remote: &str) -> Result<()>;
}
