use std::fmt;

/// Non-fatal conditions met while deciding a release.
/// These are reported to the user but don't stop the workflow.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// No new commits since the latest tag
    NoNewCommits {
        latest_tag: String,
        current_commit_hash: String,
    },
    /// Commits exist but none of them warrants a release
    NoReleasableCommits { commit_count: usize },
    /// Tag looks like a release tag but cannot be parsed as a semantic version
    UnparsableTag { tag: String, reason: String },
    /// Fetch operation failed due to authentication issues
    FetchAuthenticationFailed { remote: String },
    /// Fetch failed for another reason; local tags are used instead
    FetchFailed { remote: String, reason: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoNewCommits {
                latest_tag,
                current_commit_hash,
            } => {
                let short_hash = current_commit_hash
                    .get(..7)
                    .unwrap_or(current_commit_hash.as_str());
                write!(
                    f,
                    "No new commits since tag '{}' (current: {})",
                    latest_tag, short_hash
                )
            }
            BoundaryWarning::NoReleasableCommits { commit_count } => {
                write!(
                    f,
                    "None of the {} commit(s) since the last release warrant a new version",
                    commit_count
                )
            }
            BoundaryWarning::UnparsableTag { tag, reason } => {
                write!(f, "Cannot parse tag '{}': {}", tag, reason)
            }
            BoundaryWarning::FetchAuthenticationFailed { remote } => {
                write!(
                    f,
                    "Authentication failed when fetching from remote '{}'",
                    remote
                )
            }
            BoundaryWarning::FetchFailed { remote, reason } => {
                write!(
                    f,
                    "Could not fetch tags from remote '{}': {}. Using local tags",
                    remote, reason
                )
            }
        }
    }
}
