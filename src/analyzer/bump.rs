use crate::domain::{Commit, CommitType, VersionBump};

/// Reduces parsed commits to a single version bump
pub struct BumpCalculator;

impl BumpCalculator {
    /// Severity contributed by a single commit
    pub fn severity(commit: &Commit) -> VersionBump {
        if commit.breaking {
            return VersionBump::Major;
        }

        match commit.commit_type {
            CommitType::Feat => VersionBump::Minor,
            CommitType::Fix | CommitType::Perf => VersionBump::Patch,
            _ => VersionBump::None,
        }
    }

    /// Highest severity across `commits`, or `None` for an empty input.
    ///
    /// This is a max over the `VersionBump` ordering, so the order commits are
    /// listed in never changes the result. Stops at the first breaking commit.
    pub fn calculate<'a, I>(commits: I) -> VersionBump
    where
        I: IntoIterator<Item = &'a Commit>,
    {
        let mut bump = VersionBump::None;

        for commit in commits {
            bump = bump.max(Self::severity(commit));
            if bump == VersionBump::Major {
                break;
            }
        }

        bump
    }
}
