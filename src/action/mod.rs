//! Action capability traits and concrete action kinds.
//!
//! Consumers receive actions as `dyn Action` and discover what they can do
//! through the capability probes instead of matching on a concrete type:
//!
//! ```
//! use mitigation_actions::{Action, RedirectAction, TimedAction};
//! use std::time::Duration;
//!
//! let action: Box<dyn Action> = Box::new(TimedAction::new(
//!     RedirectAction::new("r1", "/blocked").unwrap(),
//!     Duration::from_secs(60),
//! ));
//!
//! assert_eq!(action.action_id(), "r1");
//! assert_eq!(action.as_redirect().map(|r| r.redirection_url()), Some("/blocked"));
//! assert!(action.as_timed().is_some_and(|t| !t.expired()));
//! ```
//!
//! The [`ActionKind`] tags exist for (de)serialization only; nothing in this
//! crate branches on them.

mod block;
mod kind;
mod redirect;
mod timed;
mod whitelist;

pub use block::BlockAction;
pub use kind::ActionKind;
pub use redirect::{RedirectAction, UserRedirectAction};
pub use timed::TimedAction;
pub use whitelist::WhitelistAction;

use std::collections::HashMap;
use std::fmt;
use std::time::SystemTime;

/// Common interface of every action value.
///
/// The ID is fixed at construction. Uniqueness within a collection is the
/// owning store's concern.
pub trait Action: fmt::Debug + Send + Sync {
    /// The unique ID of the action.
    fn action_id(&self) -> &str;

    /// The redirect capability, if this action redirects.
    fn as_redirect(&self) -> Option<&dyn Redirect> {
        None
    }

    /// The user-redirect capability, if this action carries the identity
    /// that matched its rule.
    fn as_user_redirect(&self) -> Option<&dyn UserRedirect> {
        None
    }

    /// The expiration capability, if this action has a deadline.
    fn as_timed(&self) -> Option<&dyn Timed> {
        None
    }
}

/// An action sending the request elsewhere.
pub trait Redirect: Action {
    /// The location to redirect to, exactly as supplied at construction.
    fn redirection_url(&self) -> &str;
}

/// A redirect produced by a rule keyed on user identity.
pub trait UserRedirect: Redirect {
    /// Identity attributes (e.g. authentication claims) that matched the rule.
    fn user_id(&self) -> &HashMap<String, String>;
}

/// An action with a deadline after which it is considered expired.
pub trait Timed {
    /// The absolute deadline. `None` when the requested duration is beyond
    /// what the system clock can represent; such an action never expires.
    fn deadline(&self) -> Option<SystemTime>;

    /// Whether `now` is strictly after the deadline.
    fn expired_at(&self, now: SystemTime) -> bool {
        self.deadline().is_some_and(|deadline| now > deadline)
    }

    /// Whether the deadline has passed, reading the wall clock on every call.
    fn expired(&self) -> bool {
        self.expired_at(SystemTime::now())
    }
}

impl<A: Action + ?Sized> Action for Box<A> {
    fn action_id(&self) -> &str {
        (**self).action_id()
    }

    fn as_redirect(&self) -> Option<&dyn Redirect> {
        (**self).as_redirect()
    }

    fn as_user_redirect(&self) -> Option<&dyn UserRedirect> {
        (**self).as_user_redirect()
    }

    fn as_timed(&self) -> Option<&dyn Timed> {
        (**self).as_timed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn erased() -> Vec<Box<dyn Action>> {
        let user = HashMap::from([("login".to_string(), "alice".to_string())]);
        vec![
            Box::new(BlockAction::new("b1")),
            Box::new(RedirectAction::new("r1", "/blocked").unwrap()),
            Box::new(UserRedirectAction::new("u1", "https://example.com/", user).unwrap()),
            Box::new(WhitelistAction::new("10.0.0.0/8")),
        ]
    }

    #[test]
    fn block_and_whitelist_expose_no_extra_capability() {
        for action in [
            Box::new(BlockAction::new("b1")) as Box<dyn Action>,
            Box::new(WhitelistAction::new("::1/128")) as Box<dyn Action>,
        ] {
            assert!(action.as_redirect().is_none());
            assert!(action.as_user_redirect().is_none());
            assert!(action.as_timed().is_none());
        }
    }

    #[test]
    fn redirect_is_not_a_user_redirect() {
        let action: Box<dyn Action> = Box::new(RedirectAction::new("r1", "/blocked").unwrap());
        assert_eq!(action.as_redirect().unwrap().redirection_url(), "/blocked");
        assert!(action.as_user_redirect().is_none());
    }

    #[test]
    fn user_redirect_is_also_a_redirect() {
        let user = HashMap::from([("uid".to_string(), "42".to_string())]);
        let action: Box<dyn Action> =
            Box::new(UserRedirectAction::new("u1", "/login", user.clone()).unwrap());

        assert_eq!(action.as_redirect().unwrap().redirection_url(), "/login");
        let user_redirect = action.as_user_redirect().unwrap();
        assert_eq!(user_redirect.user_id(), &user);
        assert_eq!(user_redirect.redirection_url(), "/login");
    }

    #[test]
    fn boxed_action_forwards_id() {
        let ids: Vec<String> = erased()
            .iter()
            .map(|a| a.action_id().to_string())
            .collect();
        assert_eq!(ids, ["b1", "r1", "u1", "10.0.0.0/8"]);
    }

    #[test]
    fn timed_wrapper_keeps_id_of_every_kind() {
        for action in erased() {
            let id = action.action_id().to_string();
            let timed = TimedAction::new(action, Duration::from_secs(60));
            assert_eq!(timed.action_id(), id);
            assert!(timed.as_timed().is_some());
        }
    }
}
