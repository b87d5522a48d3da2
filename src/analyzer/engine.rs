use crate::analyzer::BumpCalculator;
use crate::changelog::{ChangelogEntry, ChangelogRenderer};
use crate::config::CommitsConfig;
use crate::domain::{Commit, CommitParser, TagPattern, Version, VersionBump};
use crate::error::Result;
use serde::Serialize;
use tracing::debug;

/// Outcome of one release decision
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReleaseDecision {
    pub bump: VersionBump,
    pub previous_version: Option<Version>,
    /// Present iff `bump` is not `none`
    pub next_version: Option<Version>,
    pub changelog_entries: Vec<ChangelogEntry>,
    pub commit_count: usize,
}

impl ReleaseDecision {
    pub fn is_release(&self) -> bool {
        self.next_version.is_some()
    }

    /// Tag to create for the next version, if there is one
    pub fn tag(&self, pattern: &TagPattern) -> Option<String> {
        self.next_version.as_ref().map(|v| pattern.format(v))
    }

    /// Markdown changelog sections; `None` when there is nothing to release
    pub fn changelog_markdown(&self) -> Option<String> {
        if !self.is_release() {
            return None;
        }
        Some(ChangelogRenderer.render(&self.changelog_entries))
    }
}

/// Computes the next version and changelog from commits since the last release.
///
/// Holds no state between calls: each decision depends only on the messages
/// and the previous version passed in.
#[derive(Debug, Clone, Default)]
pub struct ReleaseDecisionEngine {
    parser: CommitParser,
    renderer: ChangelogRenderer,
}

impl ReleaseDecisionEngine {
    pub fn new(parser: CommitParser) -> Self {
        ReleaseDecisionEngine {
            parser,
            renderer: ChangelogRenderer,
        }
    }

    pub fn from_config(config: &CommitsConfig) -> Self {
        Self::new(CommitParser::new(config.breaking_change_indicators.clone()))
    }

    /// Decide from raw commit messages
    pub fn decide<S: AsRef<str>>(
        &self,
        messages: &[S],
        previous: Option<Version>,
    ) -> Result<ReleaseDecision> {
        let commits: Vec<Commit> = messages
            .iter()
            .map(|message| self.parser.parse(message.as_ref()))
            .collect();
        self.decide_commits(commits, previous)
    }

    /// Decide from already parsed commits
    pub fn decide_commits(
        &self,
        commits: Vec<Commit>,
        previous: Option<Version>,
    ) -> Result<ReleaseDecision> {
        let bump = BumpCalculator::calculate(&commits);
        debug!(
            commits = commits.len(),
            %bump,
            previous = ?previous.map(|v| v.to_string()),
            "computed bump"
        );

        if !bump.is_release() {
            return Ok(ReleaseDecision {
                bump,
                previous_version: previous,
                next_version: None,
                changelog_entries: Vec::new(),
                commit_count: commits.len(),
            });
        }

        let next_version = Version::next(previous, bump)?;
        let changelog_entries = self.renderer.entries(&commits);

        Ok(ReleaseDecision {
            bump,
            previous_version: previous,
            next_version: Some(next_version),
            changelog_entries,
            commit_count: commits.len(),
        })
    }
}
