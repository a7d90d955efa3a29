//! Loading locally configured actions from TOML.
//!
//! ```toml
//! whitelist = ["10.0.0.0/8"]
//!
//! [settings]
//! skip_invalid = true
//!
//! [[action]]
//! id = "r1"
//! kind = "redirect_user"
//! location = "/blocked"
//! user = { login = "alice" }
//! duration_secs = 3600
//! ```
//!
//! Uniqueness of IDs is not checked here; the store that receives the
//! actions owns that.

use crate::action::{
    Action, ActionKind, BlockAction, RedirectAction, TimedAction, UserRedirectAction,
    WhitelistAction,
};
use crate::error::ValidationError;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("action {id}: `{field}` is required for {kind}")]
    MissingField {
        id: String,
        kind: ActionKind,
        field: &'static str,
    },
    #[error("action {id}: {source}")]
    Validation {
        id: String,
        #[source]
        source: ValidationError,
    },
}

/// Actions file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActionsConfig {
    /// Loader behaviour.
    #[serde(default)]
    pub settings: Settings,
    /// CIDR ranges to trust.
    #[serde(default)]
    pub whitelist: Vec<String>,
    /// Block and redirect rules.
    #[serde(default, rename = "action")]
    pub actions: Vec<ActionEntry>,
}

/// Loader settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Log and skip entries that fail to build instead of failing the whole
    /// file (default: true).
    #[serde(default = "default_true")]
    pub skip_invalid: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self { skip_invalid: true }
    }
}

fn default_true() -> bool {
    true
}

/// One block or redirect rule.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionEntry {
    pub id: String,
    pub kind: ActionKind,
    /// Redirect target. Required for `redirect_*` kinds.
    #[serde(default)]
    pub location: Option<String>,
    /// Identity attributes. Required for `redirect_user`.
    #[serde(default)]
    pub user: Option<HashMap<String, String>>,
    /// Lifetime in seconds. Permanent when absent.
    #[serde(default)]
    pub duration_secs: Option<u64>,
}

/// An action built from config, with the tag it was declared under.
#[derive(Debug)]
pub struct ConfiguredAction {
    pub kind: ActionKind,
    pub action: Box<dyn Action>,
}

/// Result of building an [`ActionsConfig`].
#[derive(Debug, Default)]
pub struct LoadedActions {
    pub actions: Vec<ConfiguredAction>,
    pub whitelist: Vec<WhitelistAction>,
    /// Entries dropped because they failed to build.
    pub skipped: usize,
}

impl ActionsConfig {
    /// Load an actions file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse an actions file from a string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: ActionsConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Build every entry.
    ///
    /// With `skip_invalid` set, entries that fail are logged and counted in
    /// [`LoadedActions::skipped`]; otherwise the first failure is returned.
    pub fn build(&self) -> Result<LoadedActions, ConfigError> {
        let mut loaded = LoadedActions {
            whitelist: self
                .whitelist
                .iter()
                .map(|cidr| WhitelistAction::new(cidr.as_str()))
                .collect(),
            ..Default::default()
        };

        for entry in &self.actions {
            match entry.build() {
                Ok(action) => loaded.actions.push(ConfiguredAction {
                    kind: entry.kind,
                    action,
                }),
                Err(e) if self.settings.skip_invalid => {
                    warn!(id = %entry.id, kind = %entry.kind, error = %e, "Skipping invalid action");
                    loaded.skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        debug!(
            actions = loaded.actions.len(),
            whitelist = loaded.whitelist.len(),
            skipped = loaded.skipped,
            "Actions loaded"
        );

        Ok(loaded)
    }
}

impl ActionEntry {
    /// Build the action this entry describes.
    pub fn build(&self) -> Result<Box<dyn Action>, ConfigError> {
        let action: Box<dyn Action> = match self.kind {
            ActionKind::BlockIp | ActionKind::BlockUser => {
                Box::new(BlockAction::new(self.id.as_str()))
            }
            ActionKind::RedirectIp => Box::new(
                RedirectAction::new(self.id.as_str(), self.require_location()?)
                    .map_err(|source| self.invalid(source))?,
            ),
            ActionKind::RedirectUser => {
                let user = self.user.clone().ok_or_else(|| self.missing("user"))?;
                Box::new(
                    UserRedirectAction::new(self.id.as_str(), self.require_location()?, user)
                        .map_err(|source| self.invalid(source))?,
                )
            }
        };

        if let Some(secs) = self.duration_secs {
            return Ok(Box::new(TimedAction::new(
                action,
                Duration::from_secs(secs),
            )));
        }
        Ok(action)
    }

    fn require_location(&self) -> Result<&str, ConfigError> {
        self.location
            .as_deref()
            .ok_or_else(|| self.missing("location"))
    }

    fn missing(&self, field: &'static str) -> ConfigError {
        ConfigError::MissingField {
            id: self.id.clone(),
            kind: self.kind,
            field,
        }
    }

    fn invalid(&self, source: ValidationError) -> ConfigError {
        ConfigError::Validation {
            id: self.id.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(kind: ActionKind) -> ActionEntry {
        ActionEntry {
            id: "a1".to_string(),
            kind,
            location: None,
            user: None,
            duration_secs: None,
        }
    }

    #[test]
    fn empty_file_is_valid() {
        let config = ActionsConfig::from_toml("").unwrap();
        assert!(config.settings.skip_invalid);
        let loaded = config.build().unwrap();
        assert!(loaded.actions.is_empty());
        assert!(loaded.whitelist.is_empty());
        assert_eq!(loaded.skipped, 0);
    }

    #[test]
    fn block_ignores_redirect_fields() {
        let mut e = entry(ActionKind::BlockUser);
        e.location = Some("".to_string());
        let action = e.build().unwrap();
        assert_eq!(action.action_id(), "a1");
        assert!(action.as_redirect().is_none());
    }

    #[test]
    fn redirect_requires_location() {
        let err = entry(ActionKind::RedirectIp).build().unwrap_err();
        assert!(matches!(err, ConfigError::MissingField { field: "location", .. }));
    }

    #[test]
    fn user_redirect_requires_user() {
        let mut e = entry(ActionKind::RedirectUser);
        e.location = Some("/login".to_string());
        let err = e.build().unwrap_err();
        assert!(matches!(err, ConfigError::MissingField { field: "user", .. }));
    }

    #[test]
    fn invalid_location_is_a_validation_error() {
        let mut e = entry(ActionKind::RedirectIp);
        e.location = Some("".to_string());
        let err = e.build().unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref id, .. } if id == "a1"));
    }

    #[test]
    fn duration_wraps_in_timed_action() {
        let mut e = entry(ActionKind::RedirectIp);
        e.location = Some("/blocked".to_string());
        e.duration_secs = Some(600);
        let action = e.build().unwrap();
        assert!(action.as_timed().is_some_and(|t| !t.expired()));
        assert_eq!(action.as_redirect().unwrap().redirection_url(), "/blocked");
    }

    #[test]
    fn strict_mode_fails_on_first_bad_entry() {
        let config = ActionsConfig::from_toml(
            r#"
            [settings]
            skip_invalid = false

            [[action]]
            id = "ok"
            kind = "block_ip"

            [[action]]
            id = "bad"
            kind = "redirect_ip"
            location = ""
            "#,
        )
        .unwrap();
        assert!(matches!(config.build(), Err(ConfigError::Validation { .. })));
    }

    #[test]
    fn lenient_mode_skips_bad_entries() {
        let config = ActionsConfig::from_toml(
            r#"
            [[action]]
            id = "bad"
            kind = "redirect_user"
            location = "/login"

            [[action]]
            id = "ok"
            kind = "block_ip"
            "#,
        )
        .unwrap();
        let loaded = config.build().unwrap();
        assert_eq!(loaded.skipped, 1);
        assert_eq!(loaded.actions.len(), 1);
        assert_eq!(loaded.actions[0].action.action_id(), "ok");
    }

    #[test]
    fn unknown_kind_fails_to_parse() {
        let err = ActionsConfig::from_toml(
            r#"
            [[action]]
            id = "x"
            kind = "quarantine"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
