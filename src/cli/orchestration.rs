//! Release workflow orchestration
//!
//! Ties the git collaborators, the decision engine, the changelog writer and
//! the hooks together. Kept free of clap so it can be driven programmatically
//! and tested against [`crate::git::MockRepository`].

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use crate::analyzer::{ReleaseDecision, ReleaseDecisionEngine};
use crate::boundary::BoundaryWarning;
use crate::changelog::{ChangelogFile, ChangelogRenderer};
use crate::config::Config;
use crate::error::Result;
use crate::git::Repository;
use crate::hooks::{HookContext, HookExecutor, HookType};

/// Arguments for the release workflow
///
/// Values here override the matching configuration entries.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReleaseWorkflowArgs {
    /// Root that relative changelog and hook paths resolve against
    pub base_dir: PathBuf,

    /// Remote to fetch from and push to, overriding `remote.name`
    pub remote: Option<String>,

    /// Fetch tags before deciding
    pub fetch: bool,

    /// Push the new tag after creating it
    pub push: bool,

    /// Decide and report only
    pub dry_run: bool,

    /// Skip tag creation (changelog is still written)
    pub no_tag: bool,

    /// Skip writing the changelog file
    pub no_changelog: bool,

    /// Changelog file overriding `changelog.path`
    pub changelog_path: Option<PathBuf>,

    /// Release date for the changelog header; today when unset
    pub date: Option<NaiveDate>,
}

/// Result of a release workflow run
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    pub decision: ReleaseDecision,

    /// Latest release tag found before this run
    pub previous_tag: Option<String>,

    /// Messages of the commits considered, oldest first
    pub commit_messages: Vec<String>,

    /// Tag for the new version, `None` when there is nothing to release
    pub tag: Option<String>,

    /// Changelog block for the new version
    pub changelog: Option<String>,

    pub tag_created: bool,
    pub pushed: bool,
    pub changelog_written: Option<PathBuf>,
    pub warnings: Vec<BoundaryWarning>,
}

impl WorkflowResult {
    pub fn is_release(&self) -> bool {
        self.decision.is_release()
    }
}

/// Main release workflow
///
/// 1. Optionally fetch tags from the remote
/// 2. Find the latest release tag and its version
/// 3. Collect commits since that tag
/// 4. Decide the bump, next version and changelog
/// 5. Unless nothing is released or this is a dry run: write the changelog,
///    create the tag, push it, running hooks around each step
///
/// When the pre-tag hook or tag creation fails, the changelog file is put back
/// as it was so a rerun does not repeat the release block.
pub fn run_release_workflow<R: Repository>(
    repo: &R,
    args: &ReleaseWorkflowArgs,
    config: &Config,
) -> Result<WorkflowResult> {
    let pattern = config.tag.tag_pattern()?;
    let remote = args
        .remote
        .clone()
        .unwrap_or_else(|| config.remote.name.clone());
    let mut warnings = Vec::new();

    if args.fetch || config.remote.fetch {
        info!(%remote, "fetching tags");
        if let Err(e) = repo.fetch_tags(&remote) {
            let warning = if e.is_auth_failure() {
                BoundaryWarning::FetchAuthenticationFailed {
                    remote: remote.clone(),
                }
            } else {
                BoundaryWarning::FetchFailed {
                    remote: remote.clone(),
                    reason: e.to_string(),
                }
            };
            warn!(%warning);
            warnings.push(warning);
        }
    }

    let scan = pattern.scan(repo.list_tags()?);
    for (tag, reason) in &scan.unparsable {
        warnings.push(BoundaryWarning::UnparsableTag {
            tag: tag.clone(),
            reason: reason.clone(),
        });
    }

    let (previous_tag, previous_version) = match scan.latest {
        Some((tag, version)) => (Some(tag), Some(version)),
        None => (None, None),
    };

    let head = repo.head_oid()?;
    let from = match &previous_tag {
        Some(tag) => repo.find_tag_oid(tag)?,
        None => None,
    };
    let commits = repo.get_commits_between(from, head)?;
    let messages: Vec<String> = commits.into_iter().map(|c| c.message).collect();
    debug!(
        previous_tag = previous_tag.as_deref().unwrap_or("<none>"),
        commits = messages.len(),
        "collected commits"
    );

    let engine = ReleaseDecisionEngine::from_config(&config.commits);
    let decision = engine.decide(&messages, previous_version)?;

    let (Some(next_version), Some(tag)) = (decision.next_version, decision.tag(&pattern)) else {
        warnings.push(match &previous_tag {
            Some(latest_tag) if messages.is_empty() => BoundaryWarning::NoNewCommits {
                latest_tag: latest_tag.clone(),
                current_commit_hash: head.to_string(),
            },
            _ => BoundaryWarning::NoReleasableCommits {
                commit_count: messages.len(),
            },
        });
        info!("no release");
        return Ok(WorkflowResult {
            decision,
            previous_tag,
            commit_messages: messages,
            tag: None,
            changelog: None,
            tag_created: false,
            pushed: false,
            changelog_written: None,
            warnings,
        });
    };

    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let changelog = ChangelogRenderer.render_release(&tag, date, &decision.changelog_entries);

    let commit_count = messages.len();
    let mut result = WorkflowResult {
        decision,
        previous_tag,
        commit_messages: messages,
        tag: Some(tag.clone()),
        changelog: Some(changelog.clone()),
        tag_created: false,
        pushed: false,
        changelog_written: None,
        warnings,
    };

    if args.dry_run {
        info!(%tag, "dry run, nothing written");
        return Ok(result);
    }

    // Contents before this run, put back if tagging fails
    let mut changelog_backup = None;
    if config.changelog.enabled && !args.no_changelog {
        let path = resolve(
            &args.base_dir,
            args.changelog_path.as_deref().unwrap_or(&config.changelog.path),
        );
        let file = ChangelogFile::new(&path);
        let previous = file.snapshot()?;
        file.prepend(&changelog)?;
        info!(path = %path.display(), "changelog updated");
        changelog_backup = Some((file, previous));
        result.changelog_written = Some(path);
    }

    if args.no_tag {
        return Ok(result);
    }

    let bump = result.decision.bump.to_string();
    let changelog_path = result
        .changelog_written
        .as_ref()
        .map(|p| p.display().to_string());
    let hook_context = |hook_type| HookContext {
        hook_type,
        tag: tag.clone(),
        version: next_version.to_string(),
        previous_version: previous_version.map(|v| v.to_string()),
        bump: bump.clone(),
        commit_count,
        remote: remote.clone(),
        changelog_path: changelog_path.clone(),
    };

    let tagged = HookType::PreTagCreate
        .script(&config.hooks)
        .map_or(Ok(()), |script| {
            HookExecutor::execute(script, &args.base_dir, &hook_context(HookType::PreTagCreate))
        })
        .and_then(|()| repo.create_tag(&tag, head, Some(&changelog)));

    if let Err(e) = tagged {
        if let Some((file, previous)) = &changelog_backup {
            match file.restore(previous.as_deref()) {
                Ok(()) => info!(path = %file.path().display(), "changelog reverted"),
                Err(restore_err) => warn!(error = %restore_err, "could not revert changelog"),
            }
        }
        return Err(e);
    }

    info!(%tag, "tag created");
    result.tag_created = true;

    if let Some(script) = HookType::PostTagCreate.script(&config.hooks) {
        HookExecutor::execute(script, &args.base_dir, &hook_context(HookType::PostTagCreate))?;
    }

    if args.push || config.remote.push {
        repo.push_tags(&remote, &[tag.as_str()])?;
        info!(%tag, %remote, "tag pushed");
        result.pushed = true;

        if let Some(script) = HookType::PostPush.script(&config.hooks) {
            HookExecutor::execute_permissive(script, &args.base_dir, &hook_context(HookType::PostPush));
        }
    }

    Ok(result)
}

fn resolve(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}
