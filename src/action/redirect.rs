//! Redirect actions: send the request to another location.
//!
//! The location is checked once, at construction, so enforcement never
//! attempts a redirect to something a client cannot follow. Accepted forms
//! are `*`, targets rooted at `/` (`/blocked?reason=ip`) and absolute URIs,
//! hierarchical (`https://example.com/denied`) or opaque
//! (`mailto:ops@example.com`). The string is stored as supplied; nothing
//! parsed is kept.

use super::{Action, Redirect, UserRedirect};
use crate::error::ValidationError;
use http::uri::Authority;
use std::collections::HashMap;

/// Check that `location` is usable as a request URI.
///
/// Only structure is checked: control bytes, the scheme, the authority of
/// `scheme://` locations and `%` escapes in the path. Spaces and other
/// unescaped printable bytes are let through, and there is no length limit.
fn validate_location(location: &str) -> Result<(), ValidationError> {
    if location.bytes().any(|b| b < b' ' || b == 0x7f) {
        return Err(ValidationError::ControlCharacter);
    }
    if location.is_empty() {
        return Err(ValidationError::Empty);
    }
    if location == "*" {
        return Ok(());
    }

    let (scheme, rest) = split_scheme(location)?;
    let rest = rest.split_once('?').map_or(rest, |(before, _query)| before);

    if !rest.starts_with('/') {
        return match scheme {
            // Opaque, e.g. `urn:isbn:123`.
            Some(_) => Ok(()),
            None => Err(ValidationError::NotRequestUri(location.to_string())),
        };
    }

    let path = match (scheme, rest.strip_prefix("//")) {
        (Some(_), Some(after)) => {
            let (authority, path) = after.split_at(after.find('/').unwrap_or(after.len()));
            // `https://` has an empty authority, which is allowed.
            if !authority.is_empty() {
                authority.parse::<Authority>()?;
            }
            path
        }
        _ => rest,
    };

    validate_escapes(path)
}

/// Split off a leading `scheme:`.
///
/// A scheme is `ALPHA *(ALPHA / DIGIT / "+" / "-" / ".")`; anything else
/// before the first `:` means the location has no scheme at all.
fn split_scheme(location: &str) -> Result<(Option<&str>, &str), ValidationError> {
    for (i, b) in location.bytes().enumerate() {
        match b {
            b'a'..=b'z' | b'A'..=b'Z' => {}
            b'0'..=b'9' | b'+' | b'-' | b'.' if i > 0 => {}
            b':' if i > 0 => return Ok((Some(&location[..i]), &location[i + 1..])),
            b':' => return Err(ValidationError::MissingScheme),
            _ => break,
        }
    }
    Ok((None, location))
}

fn validate_escapes(path: &str) -> Result<(), ValidationError> {
    for segment in path.split('%').skip(1) {
        let hex = segment.as_bytes().get(..2);
        if !hex.is_some_and(|h| h.iter().all(u8::is_ascii_hexdigit)) {
            let escape: String = segment.chars().take(2).collect();
            return Err(ValidationError::InvalidEscape(format!("%{escape}")));
        }
    }
    Ok(())
}

/// Redirects a matched request to a fixed location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectAction {
    id: String,
    url: String,
}

impl RedirectAction {
    /// Create a redirect action, validating `location`.
    pub fn new(id: impl Into<String>, location: impl Into<String>) -> Result<Self, ValidationError> {
        let url = location.into();
        validate_location(&url)?;
        Ok(Self { id: id.into(), url })
    }
}

impl Action for RedirectAction {
    fn action_id(&self) -> &str {
        &self.id
    }

    fn as_redirect(&self) -> Option<&dyn Redirect> {
        Some(self)
    }
}

impl Redirect for RedirectAction {
    fn redirection_url(&self) -> &str {
        &self.url
    }
}

/// Redirect produced by a user-keyed rule.
///
/// Keeps the identity attributes that matched so the enforcement layer can
/// log who was redirected. The map is stored verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRedirectAction {
    redirect: RedirectAction,
    user: HashMap<String, String>,
}

impl UserRedirectAction {
    /// Create a user redirect action, validating `location`.
    pub fn new(
        id: impl Into<String>,
        location: impl Into<String>,
        user: HashMap<String, String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            redirect: RedirectAction::new(id, location)?,
            user,
        })
    }
}

impl Action for UserRedirectAction {
    fn action_id(&self) -> &str {
        self.redirect.action_id()
    }

    fn as_redirect(&self) -> Option<&dyn Redirect> {
        Some(self)
    }

    fn as_user_redirect(&self) -> Option<&dyn UserRedirect> {
        Some(self)
    }
}

impl Redirect for UserRedirectAction {
    fn redirection_url(&self) -> &str {
        self.redirect.redirection_url()
    }
}

impl UserRedirect for UserRedirectAction {
    fn user_id(&self) -> &HashMap<String, String> {
        &self.user
    }
}
