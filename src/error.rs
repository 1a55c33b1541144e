//! Error types for IIIF Content State handling

use thiserror::Error;

/// Crate-wide result type
pub type Result<T> = std::result::Result<T, Error>;

/// A content state could not be decoded, normalized or validated.
///
/// All variants are the same kind of failure. They only differ in the
/// message they carry, so callers can match on the condition they care about.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentStateError {
    #[error("URL provided is not a valid URL: {0}")]
    InvalidUrl(String),

    #[error("No iiif-content parameter in URL")]
    MissingParameter,

    #[error("Could not parse base64url string into JSON")]
    Unparseable,

    #[error("Input base64url string is the wrong length to determine padding ({0} characters)")]
    InvalidLength(usize),

    #[error("Malformed URI escape at byte {0}")]
    MalformedEscape(usize),

    #[error("Incorrect context present in annotation: {0}")]
    IncorrectContext(String),

    #[error("Incorrect contexts present in annotation")]
    IncorrectContexts,

    #[error("Context value is not valid JSON-LD")]
    InvalidContext,

    #[error("Annotation motivation does not include contentState")]
    MissingMotivation,

    #[error("No annotation target present")]
    MissingTarget,

    #[error("Annotation target is invalid")]
    InvalidTarget,

    #[error("Annotation is malformed: {0}")]
    MalformedAnnotation(String),

    #[error("No id available for Manifest target")]
    MissingManifestId,

    #[error("No partOf available for {0} target")]
    MissingPartOf(String),

    #[error("No id available for partOf entry of {0} target")]
    MissingPartOfId(String),

    #[error("Unknown target type: {0}")]
    UnknownTargetType(String),

    #[error("Resource at {0} is neither a Manifest nor an Annotation")]
    UnresolvableResource(String),
}

/// Any failure surfaced by this crate.
///
/// Only [`Error::ContentState`] describes an invalid content state. The other
/// variants are transport or parsing failures passed through untyped.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    ContentState(#[from] ContentStateError),

    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// The content state failure, if this is one
    pub fn as_content_state(&self) -> Option<&ContentStateError> {
        match self {
            Error::ContentState(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_content_state(&self) -> bool {
        self.as_content_state().is_some()
    }
}
