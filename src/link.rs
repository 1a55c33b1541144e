//! Content state links
//!
//! Entry points for reading content states from `iiif-content` links, tokens
//! and dereferenceable URLs, and for building links that carry one.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::annotation::{expand, extract_manifests, validate, Annotation};
use crate::codec::{decode_content_state, encode_content_state};
use crate::error::{ContentStateError, Result};
use crate::resolver::{HttpResolver, ResourceResolver};

/// Query parameter carrying a content state
pub const CONTENT_STATE_PARAM: &str = "iiif-content";

/// A validated content state and the manifests it references
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentState {
    /// Distinct manifest ids, in first-seen order
    pub manifests: Vec<String>,
    /// The canonical annotation
    pub annotation: Annotation,
}

impl ContentState {
    /// Expand, validate and extract manifests from decoded JSON
    pub fn from_json(value: Value) -> std::result::Result<Self, ContentStateError> {
        let annotation = validate(expand(value))?;
        let manifests = extract_manifests(&annotation)?;
        Ok(Self {
            manifests,
            annotation,
        })
    }
}

/// Reads content states, resolving URL inputs through a [`ResourceResolver`]
#[derive(Clone)]
pub struct ContentStateParser {
    resolver: Arc<dyn ResourceResolver>,
}

impl ContentStateParser {
    pub fn new(resolver: Arc<dyn ResourceResolver>) -> Self {
        Self { resolver }
    }

    /// Read the content state from the `iiif-content` parameter of `url`
    pub async fn parse_link(&self, url: &str) -> Result<ContentState> {
        let link = Url::parse(url).map_err(|e| ContentStateError::InvalidUrl(e.to_string()))?;

        let content = link
            .query_pairs()
            .find(|(key, _)| *key == CONTENT_STATE_PARAM)
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty())
            .ok_or(ContentStateError::MissingParameter)?;

        self.parse_content_state(&content).await
    }

    /// Read a content state given as a token or as a URL to fetch
    pub async fn parse_content_state(&self, input: &str) -> Result<ContentState> {
        let value = if input.starts_with("http") {
            self.resolver.resolve(input).await?
        } else {
            decode_json(input)?
        };

        Ok(ContentState::from_json(value)?)
    }
}

impl Default for ContentStateParser {
    fn default() -> Self {
        Self::new(Arc::new(HttpResolver::default()))
    }
}

fn decode_json(token: &str) -> std::result::Result<Value, ContentStateError> {
    let json = decode_content_state(token).map_err(|e| {
        tracing::warn!("Failed to decode content state token: {}", e);
        ContentStateError::Unparseable
    })?;

    let value = serde_json::from_str(&json).map_err(|e| {
        tracing::warn!("Decoded content state is not JSON: {}", e);
        ContentStateError::Unparseable
    })?;
    tracing::debug!("Decoded content state token ({} bytes of JSON)", json.len());
    Ok(value)
}

/// [`ContentStateParser::parse_link`] with the default HTTP resolver
pub async fn parse_link(url: &str) -> Result<ContentState> {
    ContentStateParser::default().parse_link(url).await
}

/// [`ContentStateParser::parse_content_state`] with the default HTTP resolver
pub async fn parse_content_state(input: &str) -> Result<ContentState> {
    ContentStateParser::default().parse_content_state(input).await
}

/// Append an `iiif-content` parameter carrying `annotation` to `url`.
///
/// Existing query parameters keep their order. The fragment and any
/// credentials in the authority are dropped.
pub fn encode_link<T: Serialize + ?Sized>(url: &str, annotation: &T) -> Result<String> {
    let mut link = Url::parse(url).map_err(|e| ContentStateError::InvalidUrl(e.to_string()))?;
    let token = encode_content_state(annotation)?;

    let existing: Vec<(String, String)> = link.query_pairs().into_owned().collect();
    // Only fails for URLs that cannot carry credentials, which have none to drop
    let _ = link.set_username("");
    let _ = link.set_password(None);
    link.set_fragment(None);
    link.set_query(None);
    link.query_pairs_mut()
        .extend_pairs(existing)
        .append_pair(CONTENT_STATE_PARAM, &token);

    Ok(link.into())
}
