//! Expiration decorator for actions.

use super::{Action, Redirect, Timed, UserRedirect};
use std::collections::HashMap;
use std::time::{Duration, SystemTime};

/// An action with a wall-clock deadline.
///
/// Adds the [`Timed`] capability and nothing else: the ID and every other
/// capability of the wrapped action are forwarded unchanged. The deadline is
/// fixed when the wrapper is built, so expiry is a pure comparison against
/// the clock and never flips back once reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedAction<A> {
    inner: A,
    deadline: Option<SystemTime>,
}

impl<A: Action> TimedAction<A> {
    /// Wrap `inner` so that it expires `duration` from now.
    pub fn new(inner: A, duration: Duration) -> Self {
        Self {
            inner,
            deadline: SystemTime::now().checked_add(duration),
        }
    }

    /// Wrap `inner` with an absolute deadline.
    pub fn with_deadline(inner: A, deadline: SystemTime) -> Self {
        Self {
            inner,
            deadline: Some(deadline),
        }
    }

    /// The wrapped action.
    pub fn inner(&self) -> &A {
        &self.inner
    }

    /// Unwrap, dropping the deadline.
    pub fn into_inner(self) -> A {
        self.inner
    }
}

impl<A: Action> Timed for TimedAction<A> {
    fn deadline(&self) -> Option<SystemTime> {
        self.deadline
    }
}

impl<A: Action> Action for TimedAction<A> {
    fn action_id(&self) -> &str {
        self.inner.action_id()
    }

    fn as_redirect(&self) -> Option<&dyn Redirect> {
        self.inner.as_redirect()
    }

    fn as_user_redirect(&self) -> Option<&dyn UserRedirect> {
        self.inner.as_user_redirect()
    }

    fn as_timed(&self) -> Option<&dyn Timed> {
        Some(self)
    }
}

impl<A: Redirect> Redirect for TimedAction<A> {
    fn redirection_url(&self) -> &str {
        self.inner.redirection_url()
    }
}

impl<A: UserRedirect> UserRedirect for TimedAction<A> {
    fn user_id(&self) -> &HashMap<String, String> {
        self.inner.user_id()
    }
}
