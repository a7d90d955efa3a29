//! Whitelist action: mark an IP range as trusted.

use super::Action;

/// Marks requests from a CIDR range as trusted.
///
/// The CIDR text doubles as the action ID. It is not parsed here; the
/// matching layer that compares it against request addresses owns that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhitelistAction {
    cidr: String,
}

impl WhitelistAction {
    /// Create a whitelist action for `cidr`, which becomes its ID.
    ///
    /// ```
    /// use mitigation_actions::{Action, WhitelistAction};
    ///
    /// assert_eq!(WhitelistAction::new("10.0.0.0/8").action_id(), "10.0.0.0/8");
    /// ```
    pub fn new(cidr: impl Into<String>) -> Self {
        Self { cidr: cidr.into() }
    }

    /// The CIDR text this action was built from.
    pub fn cidr(&self) -> &str {
        &self.cidr
    }
}

impl Action for WhitelistAction {
    fn action_id(&self) -> &str {
        &self.cidr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cidr_is_the_id() {
        for cidr in ["10.0.0.0/8", "2001:db8::/32", "192.168.1.1/32"] {
            let action = WhitelistAction::new(cidr);
            assert_eq!(action.action_id(), cidr);
            assert_eq!(action.cidr(), cidr);
        }
    }

    #[test]
    fn cidr_text_is_not_validated() {
        assert_eq!(WhitelistAction::new("not-a-cidr").action_id(), "not-a-cidr");
    }
}
