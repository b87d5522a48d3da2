use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use serde::Serialize;

use git_release::analyzer::{ReleaseDecision, ReleaseDecisionEngine};
use git_release::boundary::BoundaryWarning;
use git_release::changelog::ChangelogRenderer;
use git_release::cli::{run_release_workflow, ReleaseWorkflowArgs, WorkflowResult};
use git_release::config::{self, Config};
use git_release::git::Git2Repository;
use git_release::{logging, ui};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(
    name = "git-release",
    version,
    about = "Decide the next semantic version from conventional commits, then tag and changelog it"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, default_value = ".", help = "Repository to release")]
    repo: PathBuf,

    #[arg(long, help = "Remote to fetch from and push to")]
    remote: Option<String>,

    #[arg(long, help = "Fetch tags from the remote first")]
    fetch: bool,

    #[arg(long, help = "Push the new tag to the remote")]
    push: bool,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,

    #[arg(long, help = "Do not create a tag")]
    no_tag: bool,

    #[arg(long, help = "Do not write the changelog file")]
    no_changelog: bool,

    #[arg(long, value_name = "PATH", help = "Changelog file to prepend to")]
    changelog: Option<PathBuf>,

    #[arg(
        long,
        conflicts_with_all = ["fetch", "push", "no_tag", "no_changelog", "changelog"],
        help = "Read NUL-separated commit messages from stdin and only print the decision"
    )]
    stdin: bool,

    #[arg(
        long,
        value_name = "TAG",
        requires = "stdin",
        help = "Last release tag when reading from stdin"
    )]
    current: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[arg(short, long, action = ArgAction::Count, help = "More diagnostics on stderr (repeatable)")]
    verbose: u8,
}

/// Machine-readable summary printed with `--format json`
#[derive(Serialize)]
struct Report<'a> {
    released: bool,
    #[serde(flatten)]
    decision: &'a ReleaseDecision,
    previous_tag: Option<&'a str>,
    tag: Option<&'a str>,
    changelog: Option<&'a str>,
    tag_created: bool,
    pushed: bool,
    changelog_written: Option<&'a PathBuf>,
    warnings: Vec<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    if let Err(e) = run(&args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

fn run(args: &Args) -> Result<()> {
    let config = config::load_config(args.config.as_deref()).context("Error loading config")?;

    if args.stdin {
        decide_from_stdin(args, &config)
    } else {
        release_repository(args, &config)
    }
}

fn decide_from_stdin(args: &Args, config: &Config) -> Result<()> {
    let pattern = config.tag.tag_pattern()?;
    let previous = args
        .current
        .as_deref()
        .map(|tag| pattern.parse_version(tag))
        .transpose()
        .context("Invalid --current tag")?;

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read commit messages from stdin")?;
    let messages: Vec<String> = input
        .split('\0')
        .filter(|m| !m.trim().is_empty())
        .map(str::to_string)
        .collect();

    let engine = ReleaseDecisionEngine::from_config(&config.commits);
    let decision = engine.decide(&messages, previous)?;
    let tag = decision.tag(&pattern);
    let changelog = decision.changelog_markdown();

    match args.format {
        OutputFormat::Json => {
            let report = Report {
                released: decision.is_release(),
                decision: &decision,
                previous_tag: args.current.as_deref(),
                tag: tag.as_deref(),
                changelog: changelog.as_deref(),
                tag_created: false,
                pushed: false,
                changelog_written: None,
                warnings: Vec::new(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            ui::display_commit_analysis(&messages, args.current.as_deref());
            ui::display_decision(&decision, tag.as_deref());
            if let Some(changelog) = changelog {
                println!("\n{}", changelog.trim_end());
            }
        }
    }

    Ok(())
}

fn release_repository(args: &Args, config: &Config) -> Result<()> {
    let repo = Git2Repository::open(&args.repo)
        .with_context(|| format!("Git repository error at {}", args.repo.display()))?;

    let workflow_args = ReleaseWorkflowArgs {
        base_dir: repo.workdir().unwrap_or_else(|| args.repo.clone()),
        remote: args.remote.clone(),
        fetch: args.fetch,
        push: args.push,
        dry_run: args.dry_run,
        no_tag: args.no_tag,
        no_changelog: args.no_changelog,
        changelog_path: args.changelog.clone(),
        date: None,
    };

    let result = run_release_workflow(&repo, &workflow_args, config)?;

    match args.format {
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Text => print_text(&result, args, config),
    }

    Ok(())
}

fn print_json(result: &WorkflowResult) -> Result<()> {
    let report = Report {
        released: result.is_release(),
        decision: &result.decision,
        previous_tag: result.previous_tag.as_deref(),
        tag: result.tag.as_deref(),
        changelog: result.changelog.as_deref(),
        tag_created: result.tag_created,
        pushed: result.pushed,
        changelog_written: result.changelog_written.as_ref(),
        warnings: result.warnings.iter().map(BoundaryWarning::to_string).collect(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn print_text(result: &WorkflowResult, args: &Args, config: &Config) {
    for warning in &result.warnings {
        ui::display_boundary_warning(warning);
    }

    ui::display_commit_analysis(&result.commit_messages, result.previous_tag.as_deref());
    ui::display_decision(&result.decision, result.tag.as_deref());

    let Some(tag) = result.tag.as_deref() else {
        return;
    };

    if args.dry_run {
        ui::display_status("Dry run, would write:");
        let sections = ChangelogRenderer.render(&result.decision.changelog_entries);
        println!("\n{}", sections.trim_end());
        return;
    }

    if let Some(path) = &result.changelog_written {
        ui::display_success(&format!("Updated {}", path.display()));
    }

    if result.tag_created {
        ui::display_success(&format!("Created tag: {}", tag));
    }

    let remote = args.remote.as_deref().unwrap_or(&config.remote.name);
    if result.pushed {
        ui::display_success(&format!("Pushed tag: {} to {}", tag, remote));
    } else if result.tag_created {
        ui::display_manual_push_instruction(tag, remote);
    }
}
