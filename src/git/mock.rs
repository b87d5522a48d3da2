use crate::error::{ReleaseError, Result};
use crate::git::{CommitInfo, Repository};
use git2::Oid;
use std::cell::RefCell;
use std::collections::BTreeMap;

/// In-memory linear history for testing without actual git operations.
///
/// Commits are kept in the order they were added (oldest first) and HEAD is
/// the last one. Created tags and pushes are recorded so tests can inspect them.
#[derive(Debug, Default)]
pub struct MockRepository {
    commits: Vec<(Oid, CommitInfo)>,
    tags: RefCell<BTreeMap<String, (Oid, Option<String>)>>,
    pushed: RefCell<Vec<(String, String)>>,
    fetch_error: Option<String>,
    push_error: Option<String>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a commit on top of HEAD and return its OID
    pub fn add_commit(&mut self, message: impl Into<String>) -> Oid {
        let index = self.commits.len() + 1;
        let hash = format!("{:040x}", index);
        let oid = Oid::from_str(&hash).unwrap_or_else(|_| Oid::zero());

        self.commits.push((
            oid,
            CommitInfo {
                hash,
                message: message.into(),
                author: "Test User".to_string(),
            },
        ));
        oid
    }

    /// Add a lightweight tag pointing to an OID
    pub fn add_tag(&mut self, name: impl Into<String>, oid: Oid) {
        self.tags.get_mut().insert(name.into(), (oid, None));
    }

    /// Make `fetch_tags` fail with the given message
    pub fn fail_fetch(&mut self, message: impl Into<String>) {
        self.fetch_error = Some(message.into());
    }

    /// Make `push_tags` fail with the given message
    pub fn fail_push(&mut self, message: impl Into<String>) {
        self.push_error = Some(message.into());
    }

    /// Annotation message of a tag, `None` for lightweight or missing tags
    pub fn tag_message(&self, name: &str) -> Option<String> {
        self.tags.borrow().get(name).and_then(|(_, msg)| msg.clone())
    }

    /// (remote, tag) pairs pushed so far
    pub fn pushed(&self) -> Vec<(String, String)> {
        self.pushed.borrow().clone()
    }

    fn position(&self, oid: Oid) -> Result<usize> {
        self.commits
            .iter()
            .position(|(candidate, _)| *candidate == oid)
            .ok_or_else(|| ReleaseError::Git(git2::Error::from_str("commit not found")))
    }
}

impl Repository for MockRepository {
    fn head_oid(&self) -> Result<Oid> {
        self.commits
            .last()
            .map(|(oid, _)| *oid)
            .ok_or_else(|| ReleaseError::Git(git2::Error::from_str("reference 'HEAD' not found")))
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        Ok(self.tags.borrow().keys().cloned().collect())
    }

    fn find_tag_oid(&self, tag_name: &str) -> Result<Option<Oid>> {
        Ok(self.tags.borrow().get(tag_name).map(|(oid, _)| *oid))
    }

    fn get_commits_between(&self, from_oid: Option<Oid>, to_oid: Oid) -> Result<Vec<CommitInfo>> {
        let end = self.position(to_oid)?;
        let start = match from_oid {
            Some(from) => self.position(from)? + 1,
            None => 0,
        };

        if start > end {
            return Ok(Vec::new());
        }

        Ok(self.commits[start..=end]
            .iter()
            .map(|(_, info)| info.clone())
            .collect())
    }

    fn create_tag(&self, name: &str, oid: Oid, message: Option<&str>) -> Result<()> {
        let mut tags = self.tags.borrow_mut();
        if tags.contains_key(name) {
            return Err(ReleaseError::tag(format!("Tag '{}' already exists", name)));
        }
        tags.insert(name.to_string(), (oid, message.map(str::to_string)));
        Ok(())
    }

    fn push_tags(&self, remote: &str, tag_names: &[&str]) -> Result<()> {
        if let Some(message) = &self.push_error {
            return Err(ReleaseError::remote(message.clone()));
        }

        let mut pushed = self.pushed.borrow_mut();
        for tag in tag_names {
            pushed.push((remote.to_string(), tag.to_string()));
        }
        Ok(())
    }

    fn fetch_tags(&self, _remote: &str) -> Result<()> {
        match &self.fetch_error {
            Some(message) => Err(ReleaseError::remote(message.clone())),
            None => Ok(()),
        }
    }
}
