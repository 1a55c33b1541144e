//! Content state annotations
//!
//! A content state is a W3C Web Annotation with the `contentState` motivation
//! whose target points at IIIF resources. Links may carry a bare target
//! instead of the full annotation, so every decoded value goes through three
//! steps:
//!
//! ```text
//! decoded JSON ──expand──▶ canonical JSON ──validate──▶ Annotation ──extract──▶ manifest ids
//! ```
//!
//! # Example
//!
//! ```ignore
//! use iiif_content_state::annotation::{expand, extract_manifests, validate};
//!
//! let bare = serde_json::json!({
//!     "id": "https://example.org/iiif/item1/manifest",
//!     "type": "Manifest"
//! });
//! let annotation = validate(expand(bare))?;
//! assert_eq!(
//!     extract_manifests(&annotation)?,
//!     vec!["https://example.org/iiif/item1/manifest"]
//! );
//! ```

use serde_json::Value;

mod expand;
mod manifests;
mod types;
mod validate;

pub use expand::{expand, is_content_state};
pub use manifests::extract_manifests;
pub use types::{Annotation, OneOrMany, PartOf, Target, TargetType};
pub use validate::validate;

/// JSON-LD context every content state annotation must declare
pub const PRESENTATION_3_CONTEXT: &str = "http://iiif.io/api/presentation/3/context.json";

/// Motivation identifying an annotation as a content state
pub const CONTENT_STATE_MOTIVATION: &str = "contentState";

/// `@type` used by Presentation 2 manifests
pub const LEGACY_MANIFEST_TYPE: &str = "sc:Manifest";

pub(crate) const CONTEXT_KEY: &str = "@context";

/// Mirrors JSON truthiness: null, false, 0 and "" count as absent.
pub(crate) fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
