//! actionctl - check a local actions file.
//!
//! Loads the file, builds every action and logs what a store would receive.

use mitigation_actions::ActionsConfig;
use std::time::UNIX_EPOCH;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "actions.toml".to_string());

    let config = ActionsConfig::load(&path).map_err(|e| {
        error!(path = %path, error = %e, "Failed to load actions");
        e
    })?;

    let loaded = config.build().map_err(|e| {
        error!(path = %path, error = %e, "Invalid action");
        e
    })?;

    for configured in &loaded.actions {
        let action = &configured.action;
        let location = action.as_redirect().map(|r| r.redirection_url());
        let expires_at = action
            .as_timed()
            .and_then(|t| t.deadline())
            .and_then(|d| d.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_secs());
        info!(
            id = %action.action_id(),
            kind = %configured.kind,
            location = ?location,
            expires_at = ?expires_at,
            "Action"
        );
    }

    for entry in &loaded.whitelist {
        info!(cidr = %entry.cidr(), "Whitelist");
    }

    info!(
        path = %path,
        actions = loaded.actions.len(),
        whitelist = loaded.whitelist.len(),
        skipped = loaded.skipped,
        "Actions file checked"
    );

    Ok(())
}
