use crate::config::HooksConfig;
use std::collections::HashMap;

/// Points in the release workflow where user scripts can run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookType {
    PreTagCreate,
    PostTagCreate,
    PostPush,
}

impl HookType {
    /// Get the hook name as a string
    pub fn name(&self) -> &'static str {
        match self {
            HookType::PreTagCreate => "pre-tag-create",
            HookType::PostTagCreate => "post-tag-create",
            HookType::PostPush => "post-push",
        }
    }

    /// Script configured for this hook, if any
    pub fn script<'a>(&self, hooks: &'a HooksConfig) -> Option<&'a str> {
        let script = match self {
            HookType::PreTagCreate => hooks.pre_tag_create.as_deref(),
            HookType::PostTagCreate => hooks.post_tag_create.as_deref(),
            HookType::PostPush => hooks.post_push.as_deref(),
        };
        script.filter(|s| !s.trim().is_empty())
    }
}

/// Release details handed to a hook script
#[derive(Debug, Clone)]
pub struct HookContext {
    pub hook_type: HookType,
    /// Tag being created or pushed
    pub tag: String,
    /// New version without the tag prefix
    pub version: String,
    pub previous_version: Option<String>,
    pub bump: String,
    pub commit_count: usize,
    pub remote: String,
    /// Changelog file that was updated, if any
    pub changelog_path: Option<String>,
}

impl HookContext {
    /// Convert context to environment variables for the hook script
    ///
    /// Maps context fields to GIT_RELEASE_* environment variables
    pub fn to_env_vars(&self) -> HashMap<String, String> {
        let mut env = HashMap::new();

        env.insert("GIT_RELEASE_HOOK".to_string(), self.hook_type.name().to_string());
        env.insert("GIT_RELEASE_TAG".to_string(), self.tag.clone());
        env.insert("GIT_RELEASE_VERSION".to_string(), self.version.clone());
        env.insert("GIT_RELEASE_BUMP".to_string(), self.bump.clone());
        env.insert(
            "GIT_RELEASE_COMMIT_COUNT".to_string(),
            self.commit_count.to_string(),
        );
        env.insert("GIT_RELEASE_REMOTE".to_string(), self.remote.clone());

        if let Some(ref previous) = self.previous_version {
            env.insert("GIT_RELEASE_PREVIOUS_VERSION".to_string(), previous.clone());
        }

        if let Some(ref path) = self.changelog_path {
            env.insert("GIT_RELEASE_CHANGELOG".to_string(), path.clone());
        }

        env
    }
}
