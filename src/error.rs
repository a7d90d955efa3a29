//! Error types for action construction.

use http::uri::InvalidUri;
use thiserror::Error;

/// A redirect location was rejected at construction time.
///
/// No action is produced when this is returned; the caller (usually a
/// rule-feed or config loader) decides whether to skip the rule or abort.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("validation of the redirection location url: empty url")]
    Empty,

    #[error("validation of the redirection location url: invalid control character in url")]
    ControlCharacter,

    /// The location starts with `:`.
    #[error("validation of the redirection location url: missing protocol scheme")]
    MissingScheme,

    /// Neither absolute nor rooted at `/`.
    #[error("validation of the redirection location url: `{0}` is not a valid request uri")]
    NotRequestUri(String),

    /// A `%` in the path not followed by two hex digits.
    #[error("validation of the redirection location url: invalid escape `{0}`")]
    InvalidEscape(String),

    /// The `//host` part of an absolute location is malformed.
    #[error("validation of the redirection location url: {0}")]
    Authority(#[from] InvalidUri),
}

impl ValidationError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "empty_location",
            Self::ControlCharacter => "control_character",
            Self::MissingScheme => "missing_scheme",
            Self::NotRequestUri(_) => "not_request_uri",
            Self::InvalidEscape(_) => "invalid_escape",
            Self::Authority(_) => "invalid_authority",
        }
    }
}

/// An action kind discriminant that is not one of the known tags.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown action kind: {0}")]
pub struct UnknownActionKind(pub String);
