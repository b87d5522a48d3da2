use crate::error::{ReleaseError, Result};
use crate::hooks::HookContext;
use std::path::Path;
use std::process::Command;
use tracing::{info, warn};

/// Executes git-release hook scripts
pub struct HookExecutor;

impl HookExecutor {
    /// Execute a hook script with the given context
    ///
    /// Relative script paths resolve against `base_dir`. The script runs with
    /// `base_dir` as its working directory and the context as environment
    /// variables. Any non-zero exit code is a failure.
    pub fn execute(script_path: &str, base_dir: &Path, context: &HookContext) -> Result<()> {
        let path = base_dir.join(script_path);

        if !path.exists() {
            return Err(ReleaseError::hook(format!(
                "Hook script not found: {}",
                path.display()
            )));
        }

        if !path.is_file() {
            return Err(ReleaseError::hook(format!(
                "Hook path is not a file: {}",
                path.display()
            )));
        }

        info!(hook = context.hook_type.name(), script = %path.display(), "running hook");

        let output = Command::new(&path)
            .current_dir(base_dir)
            .envs(context.to_env_vars())
            .output()
            .map_err(|e| {
                ReleaseError::hook(format!("Failed to execute hook {}: {}", path.display(), e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            return Err(ReleaseError::hook(format!(
                "Hook {} failed with exit code {}\nStdout: {}\nStderr: {}",
                path.display(),
                output.status.code().unwrap_or(-1),
                stdout,
                stderr
            )));
        }

        Ok(())
    }

    /// Try to execute a hook, logging errors but not failing
    ///
    /// Used for post-push hooks where the push has already succeeded and we
    /// don't want a hook failure to retroactively fail the release.
    pub fn execute_permissive(script_path: &str, base_dir: &Path, context: &HookContext) -> bool {
        match Self::execute(script_path, base_dir, context) {
            Ok(()) => true,
            Err(e) => {
                warn!(hook = context.hook_type.name(), error = %e, "hook failed");
                false
            }
        }
    }
}
