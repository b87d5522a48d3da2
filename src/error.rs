use thiserror::Error;

/// Unified error type for git-release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("Changelog error: {0}")]
    Changelog(String),

    #[error("Hook error: {0}")]
    Hook(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A `none` bump reached the version bumper. Callers must check
    /// `VersionBump::is_release` first, so this indicates an integration bug.
    #[error("Cannot bump a version without a release-worthy change")]
    NothingToBump,
}

/// Convenience type alias for Results in git-release
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ReleaseError::Version(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        ReleaseError::Tag(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        ReleaseError::Remote(msg.into())
    }

    pub fn changelog(msg: impl Into<String>) -> Self {
        ReleaseError::Changelog(msg.into())
    }

    pub fn hook(msg: impl Into<String>) -> Self {
        ReleaseError::Hook(msg.into())
    }

    /// Whether this looks like a credential problem talking to a remote.
    ///
    /// libgit2 reports these as `ErrorClass::Http`/`Ssh` with an `Auth` code,
    /// but wrapped remote errors only keep the message text.
    pub fn is_auth_failure(&self) -> bool {
        match self {
            ReleaseError::Git(e) => e.code() == git2::ErrorCode::Auth,
            ReleaseError::Remote(msg) => {
                let lower = msg.to_lowercase();
                lower.contains("auth") || lower.contains("permission")
            }
            _ => false,
        }
    }
}
