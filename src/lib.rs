pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod payload;
pub mod signature;

use crate::error::RelayError;
use std::path::PathBuf;
use std::sync::Arc;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_WEBHOOK_PATH: &str = "/webhook";
const DEFAULT_NOTIFY_SCRIPT: &str = "notify.sh";

/// Process-wide configuration, loaded once at startup and immutable afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    /// Shared HMAC secret. `None` means signature verification is skipped
    /// entirely (open mode) -- an operational fallback, not a recommendation.
    pub secret: Option<String>,
    /// Base directory under which checkouts live, keyed by `owner/name`.
    pub repos_root: PathBuf,
    /// Executable invoked once per accepted push.
    pub notify_script: String,
    /// Route the webhook POST is served on.
    pub webhook_path: String,
    pub bind_address: String,
}

impl Config {
    /// Reads configuration from the environment.
    ///
    /// `GITHUB_SECRET` unset or empty puts the server in open mode.
    /// `REPOS_DIR` falls back to a `git` subdirectory of the startup
    /// working directory.
    pub fn from_env() -> Result<Self, RelayError> {
        let secret = std::env::var("GITHUB_SECRET")
            .ok()
            .filter(|s| !s.is_empty());

        let repos_root = match std::env::var("REPOS_DIR") {
            Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => std::env::current_dir()
                .map_err(|e| {
                    RelayError::ConfigError(format!("Could not determine working directory: {}", e))
                })?
                .join("git"),
        };

        let notify_script =
            std::env::var("NOTIFY_SCRIPT").unwrap_or_else(|_| DEFAULT_NOTIFY_SCRIPT.to_string());

        let webhook_path =
            std::env::var("WEBHOOK_PATH").unwrap_or_else(|_| DEFAULT_WEBHOOK_PATH.to_string());
        if !webhook_path.starts_with('/') {
            return Err(RelayError::ConfigError(format!(
                "WEBHOOK_PATH must start with '/', got '{}'",
                webhook_path
            )));
        }

        let bind_address =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string());

        Ok(Self {
            secret,
            repos_root,
            notify_script,
            webhook_path,
            bind_address,
        })
    }

    /// Returns true if signature verification is enforced.
    pub fn requires_signature(&self) -> bool {
        self.secret.is_some()
    }
}

pub struct AppState {
    pub config: Config,
}

pub type SharedState = Arc<AppState>;
