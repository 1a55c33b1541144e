//! Resource resolution for dereferenceable content states
//!
//! A content state may be a plain URL instead of a token. The URL is fetched
//! once and classified: manifests become a minimal Manifest target, hosted
//! annotations are used as they are.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde_json::{json, Value};

use crate::annotation::LEGACY_MANIFEST_TYPE;
use crate::config::ResolverConfig;
use crate::error::{ContentStateError, Result};

/// Fetches the JSON body behind a dereferenceable content state
#[async_trait]
pub trait ResourceResolver: Send + Sync {
    /// Fetch `url` and parse its body as JSON
    async fn fetch(&self, url: &str) -> Result<Value>;

    /// Fetch `url` and classify the resource it points at
    async fn resolve(&self, url: &str) -> Result<Value> {
        let body = self.fetch(url).await?;
        Ok(classify(url, body)?)
    }
}

/// Turn a fetched body into something the expander understands.
///
/// Presentation 3 manifests (`type: Manifest`) and Presentation 2 manifests
/// (`@type: sc:Manifest`) become `{ id: url, type: Manifest }`. Annotations
/// are returned unchanged.
pub fn classify(url: &str, body: Value) -> std::result::Result<Value, ContentStateError> {
    let resource_type = body.get("type").and_then(Value::as_str);
    let legacy_type = body.get("@type").and_then(Value::as_str);

    if resource_type == Some("Manifest") || legacy_type == Some(LEGACY_MANIFEST_TYPE) {
        tracing::debug!("Resolved {} as a Manifest", url);
        return Ok(json!({ "id": url, "type": "Manifest" }));
    }

    if resource_type == Some("Annotation") {
        tracing::debug!("Resolved {} as an Annotation", url);
        return Ok(body);
    }

    tracing::warn!(
        "Resource at {} has unsupported type {:?}",
        url,
        resource_type.or(legacy_type)
    );
    Err(ContentStateError::UnresolvableResource(url.to_string()))
}

/// Resolver backed by a single HTTP GET per resolution
pub struct HttpResolver {
    client: reqwest::Client,
    config: ResolverConfig,
}

impl HttpResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Use an existing client (shared connection pool, proxies, etc.)
    pub fn with_client(client: reqwest::Client, config: ResolverConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }
}

impl Default for HttpResolver {
    fn default() -> Self {
        Self::new(ResolverConfig::default())
    }
}

#[async_trait]
impl ResourceResolver for HttpResolver {
    async fn fetch(&self, url: &str) -> Result<Value> {
        tracing::debug!("Fetching IIIF resource {}", url);

        let mut request = self
            .client
            .get(url)
            .header(ACCEPT, self.config.accept.as_str())
            .header(USER_AGENT, self.config.user_agent.as_str());
        if let Some(timeout) = self.config.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?.error_for_status()?;
        let body = response.json::<Value>().await?;
        Ok(body)
    }
}

/// Resolver serving canned bodies, for tests
#[cfg(test)]
pub struct MockResolver {
    pub bodies: std::collections::HashMap<String, Value>,
    pub calls: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl MockResolver {
    pub fn new(bodies: impl IntoIterator<Item = (&'static str, Value)>) -> Self {
        Self {
            bodies: bodies
                .into_iter()
                .map(|(url, body)| (url.to_string(), body))
                .collect(),
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl ResourceResolver for MockResolver {
    async fn fetch(&self, url: &str) -> Result<Value> {
        self.calls.lock().unwrap().push(url.to_string());
        match self.bodies.get(url) {
            Some(body) => Ok(body.clone()),
            None => Ok(serde_json::from_str("<html>not found</html>")?),
        }
    }
}
