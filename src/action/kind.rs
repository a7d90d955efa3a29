//! Action kind discriminants used by rule feeds and config files.

use crate::error::UnknownActionKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Wire-level tag identifying which action a rule produces.
///
/// | Tag | Action |
/// |-----|--------|
/// | `block_ip` | [`BlockAction`](super::BlockAction) keyed by IP |
/// | `block_user` | [`BlockAction`](super::BlockAction) keyed by user |
/// | `redirect_ip` | [`RedirectAction`](super::RedirectAction) keyed by IP |
/// | `redirect_user` | [`UserRedirectAction`](super::UserRedirectAction) keyed by user |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    BlockIp,
    BlockUser,
    RedirectIp,
    RedirectUser,
}

impl ActionKind {
    pub const ALL: [ActionKind; 4] = [
        ActionKind::BlockIp,
        ActionKind::BlockUser,
        ActionKind::RedirectIp,
        ActionKind::RedirectUser,
    ];

    /// Get the wire tag for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::BlockIp => "block_ip",
            ActionKind::BlockUser => "block_user",
            ActionKind::RedirectIp => "redirect_ip",
            ActionKind::RedirectUser => "redirect_user",
        }
    }

    /// Whether rules of this kind produce a redirect.
    pub fn is_redirect(&self) -> bool {
        matches!(self, ActionKind::RedirectIp | ActionKind::RedirectUser)
    }

    /// Whether rules of this kind are keyed on user identity rather than IP.
    pub fn is_user_keyed(&self) -> bool {
        matches!(self, ActionKind::BlockUser | ActionKind::RedirectUser)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = UnknownActionKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownActionKind(s.to_string()))
    }
}
