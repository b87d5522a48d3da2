//! Changelog rendering and the CHANGELOG file writer.

use crate::domain::{Commit, CommitType};
use crate::error::{ReleaseError, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Write;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Changelog sections, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangelogSection {
    BreakingChanges,
    Features,
    BugFixes,
    PerformanceImprovements,
}

impl ChangelogSection {
    pub const ORDER: [ChangelogSection; 4] = [
        ChangelogSection::BreakingChanges,
        ChangelogSection::Features,
        ChangelogSection::BugFixes,
        ChangelogSection::PerformanceImprovements,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ChangelogSection::BreakingChanges => "Breaking Changes",
            ChangelogSection::Features => "Features",
            ChangelogSection::BugFixes => "Bug Fixes",
            ChangelogSection::PerformanceImprovements => "Performance Improvements",
        }
    }

    fn includes(&self, commit: &Commit) -> bool {
        match self {
            ChangelogSection::BreakingChanges => commit.breaking,
            ChangelogSection::Features => commit.commit_type == CommitType::Feat,
            ChangelogSection::BugFixes => commit.commit_type == CommitType::Fix,
            ChangelogSection::PerformanceImprovements => commit.commit_type == CommitType::Perf,
        }
    }
}

/// One rendered changelog bullet and the commit it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangelogEntry {
    pub section: ChangelogSection,
    pub commit: Commit,
    pub line: String,
}

/// Groups commits into changelog sections and renders them as markdown.
///
/// Only feat, fix and perf commits are listed, plus any breaking commit under
/// "Breaking Changes". A breaking feat also shows up under "Features".
#[derive(Debug, Clone, Copy, Default)]
pub struct ChangelogRenderer;

impl ChangelogRenderer {
    /// Build entries grouped by section; commit order is kept within a section.
    pub fn entries(&self, commits: &[Commit]) -> Vec<ChangelogEntry> {
        ChangelogSection::ORDER
            .iter()
            .flat_map(|section| {
                commits
                    .iter()
                    .filter(move |commit| section.includes(commit))
                    .map(move |commit| ChangelogEntry {
                        section: *section,
                        commit: commit.clone(),
                        line: render_line(*section, commit),
                    })
            })
            .collect()
    }

    /// Render the sections as markdown. Empty input renders as an empty string.
    pub fn render(&self, entries: &[ChangelogEntry]) -> String {
        let mut output = String::new();

        for section in ChangelogSection::ORDER {
            let mut lines = entries
                .iter()
                .filter(|entry| entry.section == section)
                .peekable();
            if lines.peek().is_none() {
                continue;
            }

            let _ = writeln!(output, "### {}\n", section.title());
            for entry in lines {
                let _ = writeln!(output, "{}", entry.line);
            }
            output.push('\n');
        }

        output
    }

    /// Render a full release block headed by the tag and date
    pub fn render_release(&self, tag: &str, date: NaiveDate, entries: &[ChangelogEntry]) -> String {
        format!(
            "## {} ({})\n\n{}",
            tag,
            date.format("%Y-%m-%d"),
            self.render(entries)
        )
    }
}

fn render_line(section: ChangelogSection, commit: &Commit) -> String {
    let text = match (section, &commit.breaking_note) {
        (ChangelogSection::BreakingChanges, Some(note)) => note.as_str(),
        _ => first_line(&commit.subject),
    };

    match &commit.scope {
        Some(scope) => format!("* **{}:** {}", scope, text),
        None => format!("* {}", text),
    }
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("")
}

/// A markdown changelog file that new releases are prepended to
#[derive(Debug, Clone)]
pub struct ChangelogFile {
    path: PathBuf,
}

impl ChangelogFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ChangelogFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current contents, `None` when the file does not exist yet
    pub fn snapshot(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ReleaseError::changelog(format!(
                "Cannot read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    /// Put back contents taken with [`ChangelogFile::snapshot`].
    ///
    /// `None` removes the file again.
    pub fn restore(&self, previous: Option<&str>) -> Result<()> {
        let restored = match previous {
            Some(content) => fs::write(&self.path, content),
            None => match fs::remove_file(&self.path) {
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                other => other,
            },
        };

        restored.map_err(|e| {
            ReleaseError::changelog(format!("Cannot restore {}: {}", self.path.display(), e))
        })?;
        tracing::debug!(path = %self.path.display(), "changelog restored");
        Ok(())
    }

    /// Insert `block` ahead of earlier releases.
    ///
    /// A leading `# ` title line stays at the top. Missing files are created.
    pub fn prepend(&self, block: &str) -> Result<()> {
        let existing = self.snapshot()?.unwrap_or_default();

        let block = block.trim_end();
        let updated = match split_title(&existing) {
            Some((title, rest)) => {
                format!("{}\n\n{}\n\n{}", title, block, rest.trim_start())
            }
            None if existing.trim().is_empty() => format!("{}\n", block),
            None => format!("{}\n\n{}", block, existing),
        };

        fs::write(&self.path, updated.trim_end().to_string() + "\n").map_err(|e| {
            ReleaseError::changelog(format!("Cannot write {}: {}", self.path.display(), e))
        })?;
        tracing::debug!(path = %self.path.display(), "changelog updated");
        Ok(())
    }
}

fn split_title(content: &str) -> Option<(&str, &str)> {
    if !content.starts_with("# ") {
        return None;
    }
    match content.split_once('\n') {
        Some((title, rest)) => Some((title.trim_end(), rest)),
        None => Some((content.trim_end(), "")),
    }
}
