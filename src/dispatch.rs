//! Builds the notify script's environment and launches it fire-and-forget.

use crate::Config;
use crate::error::Result;
use crate::payload::PushEvent;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::info;

/// Derives the per-repository checkout directory and the environment the
/// notify script runs with.
///
/// Pure function of its inputs: the returned map is the given environment
/// snapshot with `REPO_DIR` set (or overwritten) to `repos_root/full_name`.
/// The path is not validated or created here; that is the script's job.
pub fn build_env<I>(
    snapshot: I,
    repos_root: &Path,
    full_name: &str,
) -> (PathBuf, HashMap<String, String>)
where
    I: IntoIterator<Item = (String, String)>,
{
    let repo_dir = repos_root.join(full_name);
    let mut env: HashMap<String, String> = snapshot.into_iter().collect();
    env.insert(
        "REPO_DIR".to_string(),
        repo_dir.to_string_lossy().into_owned(),
    );
    (repo_dir, env)
}

/// Starts the notify script for an accepted push and detaches from it.
///
/// The script receives `[ref, before, after, full_name]` as positional
/// arguments and the environment from [`build_env`]. The child handle is
/// dropped right after the spawn; the runtime reaps the process whenever it
/// exits, so its exit status is never observed. A push whose script fails
/// after starting is lost, which is the documented fire-and-forget trade-off.
pub fn spawn_notify(config: &Config, event: &PushEvent) -> Result<()> {
    let full_name = &event.repository.full_name;
    let (repo_dir, env) = build_env(std::env::vars(), &config.repos_root, full_name);

    let child = Command::new(&config.notify_script)
        .arg(&event.git_ref)
        .arg(&event.before)
        .arg(&event.after)
        .arg(full_name)
        .env_clear()
        .envs(&env)
        .spawn()?;

    info!(
        "Started '{}' (pid {:?}) for push to '{}', REPO_DIR={}",
        config.notify_script,
        child.id(),
        full_name,
        repo_dir.display()
    );
    // Dropping the child detaches it; completion is not awaited.
    drop(child);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> Vec<(String, String)> {
        vec![
            ("PATH".to_string(), "/usr/bin".to_string()),
            ("HOME".to_string(), "/home/relay".to_string()),
        ]
    }

    #[test]
    fn repo_dir_joins_root_and_full_name() {
        let (repo_dir, env) = build_env(snapshot(), Path::new("/srv/repos"), "acme/widgets");

        assert_eq!(repo_dir, PathBuf::from("/srv/repos/acme/widgets"));
        assert_eq!(
            env.get("REPO_DIR").map(String::as_str),
            Some("/srv/repos/acme/widgets")
        );
    }

    #[test]
    fn passes_snapshot_keys_through() {
        let (_, env) = build_env(snapshot(), Path::new("/srv/repos"), "acme/widgets");

        assert_eq!(env.get("PATH").map(String::as_str), Some("/usr/bin"));
        assert_eq!(env.get("HOME").map(String::as_str), Some("/home/relay"));
        assert_eq!(env.len(), 3);
    }

    #[test]
    fn overwrites_existing_repo_dir() {
        let mut vars = snapshot();
        vars.push(("REPO_DIR".to_string(), "/stale/value".to_string()));

        let (_, env) = build_env(vars, Path::new("/srv/repos"), "acme/widgets");
        assert_eq!(
            env.get("REPO_DIR").map(String::as_str),
            Some("/srv/repos/acme/widgets")
        );
    }

    #[test]
    fn same_inputs_same_result() {
        let a = build_env(snapshot(), Path::new("/srv/repos"), "acme/widgets");
        let b = build_env(snapshot(), Path::new("/srv/repos"), "acme/widgets");
        assert_eq!(a, b);
    }
}
