// tests/git_test.rs
//! Round trip through a real repository on disk.

use chrono::NaiveDate;
use git2::{Oid, Repository as Git2Repo, Signature};
use git_release::cli::{run_release_workflow, ReleaseWorkflowArgs};
use git_release::config::Config;
use git_release::git::{Git2Repository, Repository};
use std::fs;
use tempfile::TempDir;

fn init_repo(dir: &TempDir) -> Git2Repo {
    let repo = Git2Repo::init(dir.path()).unwrap();
    let mut config = repo.config().unwrap();
    config.set_str("user.name", "Test User").unwrap();
    config.set_str("user.email", "test@example.com").unwrap();
    repo
}

fn commit(repo: &Git2Repo, file: &str, message: &str) -> Oid {
    let workdir = repo.workdir().unwrap().to_path_buf();
    fs::write(workdir.join(file), message).unwrap();

    let mut index = repo.index().unwrap();
    index.add_path(std::path::Path::new(file)).unwrap();
    index.write().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();

    let signature = Signature::now("Test User", "test@example.com").unwrap();
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();

    repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
        .unwrap()
}

#[test]
fn test_commits_since_lightweight_tag() {
    let dir = TempDir::new().unwrap();
    let raw = init_repo(&dir);
    let first = commit(&raw, "a.txt", "feat: initial");
    raw.tag_lightweight("v1.0.0", &raw.find_object(first, None).unwrap(), false)
        .unwrap();
    commit(&raw, "b.txt", "fix: one");
    commit(&raw, "c.txt", "feat: two");

    let repo = Git2Repository::from_git2(raw);
    let head = repo.head_oid().unwrap();
    let from = repo.find_tag_oid("v1.0.0").unwrap();
    assert_eq!(from, Some(first));

    let messages: Vec<String> = repo
        .get_commits_between(from, head)
        .unwrap()
        .into_iter()
        .map(|c| c.message.trim().to_string())
        .collect();
    assert_eq!(messages, vec!["fix: one", "feat: two"]);
}

#[test]
fn test_full_history_without_tag() {
    let dir = TempDir::new().unwrap();
    let raw = init_repo(&dir);
    commit(&raw, "a.txt", "chore: one");
    commit(&raw, "b.txt", "chore: two");

    let repo = Git2Repository::from_git2(raw);
    let head = repo.head_oid().unwrap();
    assert_eq!(repo.get_commits_between(None, head).unwrap().len(), 2);
    assert_eq!(repo.find_tag_oid("v1.0.0").unwrap(), None);
}

#[test]
fn test_release_against_real_repository() {
    let dir = TempDir::new().unwrap();
    let raw = init_repo(&dir);
    let first = commit(&raw, "a.txt", "feat: initial");
    raw.tag_lightweight("v1.0.0", &raw.find_object(first, None).unwrap(), false)
        .unwrap();
    commit(&raw, "b.txt", "feat(cli): add --json");

    let repo = Git2Repository::open(dir.path()).unwrap();
    let args = ReleaseWorkflowArgs {
        base_dir: repo.workdir().unwrap(),
        date: NaiveDate::from_ymd_opt(2024, 5, 1),
        ..Default::default()
    };

    let result = run_release_workflow(&repo, &args, &Config::default()).unwrap();

    assert_eq!(result.tag.as_deref(), Some("v1.1.0"));
    assert!(result.tag_created);

    let head = repo.head_oid().unwrap();
    assert_eq!(repo.find_tag_oid("v1.1.0").unwrap(), Some(head));

    let reopened = Git2Repo::open(dir.path()).unwrap();
    let tag = reopened
        .revparse_single("v1.1.0")
        .unwrap()
        .into_tag()
        .expect("annotated tag");
    assert!(tag.message().unwrap().contains("* **cli:** add --json"));

    let changelog = fs::read_to_string(dir.path().join("CHANGELOG.md")).unwrap();
    assert!(changelog.starts_with("## v1.1.0 (2024-05-01)"));
}

#[test]
fn test_existing_tag_is_not_overwritten() {
    let dir = TempDir::new().unwrap();
    let raw = init_repo(&dir);
    let oid = commit(&raw, "a.txt", "feat: initial");

    let repo = Git2Repository::from_git2(raw);
    repo.create_tag("v0.1.0", oid, None).unwrap();
    assert!(repo.create_tag("v0.1.0", oid, Some("again")).is_err());
}
