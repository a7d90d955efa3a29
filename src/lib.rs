//! Mitigation actions attached to requests whose source IP or identity
//! matched a security rule.
//!
//! An action is the smallest unit a decision engine reasons about: deny the
//! request, redirect it, or mark its origin as trusted. This crate only
//! models the values; selecting an action for a request and enforcing it
//! belong to the caller.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Actions                               │
//! ├────────────┬──────────────────────┬─────────────┬────────────┤
//! │   Block    │ Redirect / UserRedir │  Whitelist  │ TimedAction│
//! │  id only   │ id + validated URL   │ CIDR as id  │ + deadline │
//! └────────────┴──────────────────────┴─────────────┴────────────┘
//!         queried only through Action / Redirect / UserRedirect / Timed
//! ```
//!
//! Actions configured locally can be loaded from TOML with
//! [`ActionsConfig`].

pub mod action;
pub mod config;
pub mod error;

pub use action::{
    Action, ActionKind, BlockAction, Redirect, RedirectAction, Timed, TimedAction, UserRedirect,
    UserRedirectAction, WhitelistAction,
};
pub use config::{ActionEntry, ActionsConfig, ConfigError, ConfiguredAction, LoadedActions};
pub use error::{UnknownActionKind, ValidationError};
