//! Content state types following the IIIF Presentation 3 / Web Annotation model
//!
//! Reference: <https://iiif.io/api/content-state/>

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{expand, validate, CONTENT_STATE_MOTIVATION, PRESENTATION_3_CONTEXT};
use crate::error::ContentStateError;

/// A JSON-LD member that may hold a single value or an array of values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    /// Tried first so that arrays never land in `One` when `T` is `Value`
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            OneOrMany::One(item) => std::slice::from_ref(item).iter(),
            OneOrMany::Many(items) => items.iter(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            OneOrMany::One(_) => 1,
            OneOrMany::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether any of the values equals `needle`
    pub fn contains<Q>(&self, needle: &Q) -> bool
    where
        T: PartialEq<Q>,
        Q: ?Sized,
    {
        self.iter().any(|item| item == needle)
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }
}

impl OneOrMany<Value> {
    /// View a raw JSON member as a scalar-or-array union
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Array(items) => OneOrMany::Many(items.clone()),
            other => OneOrMany::One(other.clone()),
        }
    }
}

impl<T> From<T> for OneOrMany<T> {
    fn from(item: T) -> Self {
        OneOrMany::One(item)
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(items: Vec<T>) -> Self {
        OneOrMany::Many(items)
    }
}

/// A canonical content state annotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// JSON-LD context (a single IRI or an array of contexts)
    #[serde(rename = "@context")]
    pub context: OneOrMany<Value>,
    /// Optional annotation identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Always "Annotation" for synthesized annotations
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub annotation_type: Option<String>,
    /// Motivation(s); includes "contentState"
    pub motivation: OneOrMany<String>,
    /// The referenced IIIF resource(s)
    pub target: OneOrMany<Target>,
    /// Any other members, kept as they were received
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Annotation {
    /// Wrap target(s) in a content state annotation
    pub fn new(target: impl Into<OneOrMany<Target>>) -> Self {
        Self {
            context: OneOrMany::One(Value::String(PRESENTATION_3_CONTEXT.to_string())),
            id: None,
            annotation_type: Some("Annotation".to_string()),
            motivation: OneOrMany::Many(vec![CONTENT_STATE_MOTIVATION.to_string()]),
            target: target.into(),
            extra: Map::new(),
        }
    }

    /// Build an annotation from raw target JSON.
    ///
    /// Bare resources are wrapped the same way decoded content states are,
    /// so `{ "id": …, "type": "Manifest" }` and a full annotation both work.
    pub fn for_target(target: Value) -> Result<Self, ContentStateError> {
        validate(expand(target))
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }
}

/// IIIF resource types a content state may target
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TargetType {
    Annotation,
    Collection,
    Manifest,
    Canvas,
    Range,
    /// Any other type tag; never valid as a content state target
    Unrecognized(String),
}

impl TargetType {
    pub fn as_str(&self) -> &str {
        match self {
            TargetType::Annotation => "Annotation",
            TargetType::Collection => "Collection",
            TargetType::Manifest => "Manifest",
            TargetType::Canvas => "Canvas",
            TargetType::Range => "Range",
            TargetType::Unrecognized(tag) => tag,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, TargetType::Unrecognized(_))
    }
}

impl From<&str> for TargetType {
    fn from(tag: &str) -> Self {
        match tag {
            "Annotation" => TargetType::Annotation,
            "Collection" => TargetType::Collection,
            "Manifest" => TargetType::Manifest,
            "Canvas" => TargetType::Canvas,
            "Range" => TargetType::Range,
            other => TargetType::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for TargetType {
    fn from(tag: String) -> Self {
        match TargetType::from(tag.as_str()) {
            TargetType::Unrecognized(_) => TargetType::Unrecognized(tag),
            known => known,
        }
    }
}

impl From<TargetType> for String {
    fn from(target_type: TargetType) -> Self {
        match target_type {
            TargetType::Unrecognized(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reference to a IIIF resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub target_type: Option<TargetType>,
    /// Manifests a Canvas or Range belongs to
    #[serde(rename = "partOf", default, skip_serializing_if = "Option::is_none")]
    pub part_of: Option<Vec<PartOf>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Target {
    pub fn new(id: &str, target_type: TargetType) -> Self {
        Self {
            id: Some(id.to_string()),
            target_type: Some(target_type),
            part_of: None,
            extra: Map::new(),
        }
    }

    pub fn manifest(id: &str) -> Self {
        Self::new(id, TargetType::Manifest)
    }

    /// A canvas within the given manifest
    pub fn canvas(id: &str, manifest_id: &str) -> Self {
        Self::new(id, TargetType::Canvas).part_of(manifest_id)
    }

    /// A range within the given manifest
    pub fn range(id: &str, manifest_id: &str) -> Self {
        Self::new(id, TargetType::Range).part_of(manifest_id)
    }

    /// Add a containing manifest to `partOf`
    pub fn part_of(mut self, manifest_id: &str) -> Self {
        self.part_of
            .get_or_insert_with(Vec::new)
            .push(PartOf::manifest(manifest_id));
        self
    }
}

/// An entry of a target's `partOf` list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartOf {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub part_type: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PartOf {
    pub fn manifest(id: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            part_type: Some("Manifest".to_string()),
            extra: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_one_or_many_contains() {
        let one: OneOrMany<String> = OneOrMany::One("contentState".to_string());
        assert!(one.contains("contentState"));
        assert!(!one.contains("commenting"));

        let many = OneOrMany::from_json(&json!(["commenting", "contentState"]));
        assert!(many.contains("contentState"));
        assert_eq!(many.len(), 2);
    }

    #[test]
    fn test_one_or_many_prefers_many_for_arrays() {
        let parsed: OneOrMany<Value> = serde_json::from_value(json!(["a", "b"])).unwrap();
        assert!(matches!(parsed, OneOrMany::Many(ref items) if items.len() == 2));

        let parsed: OneOrMany<Value> = serde_json::from_value(json!("a")).unwrap();
        assert!(matches!(parsed, OneOrMany::One(_)));
    }

    #[test]
    fn test_target_type_tags() {
        assert_eq!(TargetType::from("Canvas"), TargetType::Canvas);
        assert_eq!(
            TargetType::from("SpecificResource"),
            TargetType::Unrecognized("SpecificResource".to_string())
        );
        assert!(!TargetType::from("manifest").is_recognized());
        assert_eq!(String::from(TargetType::Range), "Range");
    }

    #[test]
    fn test_target_keeps_unknown_members() {
        let raw = json!({
            "id": "https://example.org/object1/canvas7#xywh=1000,2000,1000,2000",
            "type": "Canvas",
            "label": { "en": ["Page 7"] },
            "partOf": [{ "id": "https://example.org/object1/manifest", "type": "Manifest" }]
        });
        let target: Target = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(target.target_type, Some(TargetType::Canvas));
        assert_eq!(target.extra.get("label"), raw.get("label"));
        assert_eq!(serde_json::to_value(&target).unwrap(), raw);
    }

    #[test]
    fn test_annotation_new_serializes_canonical_shape() {
        let annotation = Annotation::new(Target::manifest("https://example.org/iiif/item1/manifest"));
        assert_eq!(
            serde_json::to_value(&annotation).unwrap(),
            json!({
                "@context": PRESENTATION_3_CONTEXT,
                "type": "Annotation",
                "motivation": ["contentState"],
                "target": { "id": "https://example.org/iiif/item1/manifest", "type": "Manifest" }
            })
        );
    }

    #[test]
    fn test_for_target_wraps_bare_resource() {
        let annotation = Annotation::for_target(json!({
            "id": "https://example.org/iiif/item1/manifest",
            "type": "Manifest"
        }))
        .unwrap();
        assert_eq!(
            annotation,
            Annotation::new(Target::manifest("https://example.org/iiif/item1/manifest"))
        );
    }

    #[test]
    fn test_for_target_rejects_unknown_resource() {
        assert_eq!(
            Annotation::for_target(json!({ "id": "x", "type": "Book" })).unwrap_err(),
            ContentStateError::InvalidContext
        );
        assert!(Annotation::for_target(json!("https://example.org/manifest")).is_err());
    }

    #[test]
    fn test_canvas_builder() {
        let canvas = Target::canvas("https://example.org/c1", "https://example.org/m1")
            .part_of("https://example.org/m2");
        let part_of = canvas.part_of.unwrap();
        assert_eq!(part_of.len(), 2);
        assert_eq!(part_of[1].id.as_deref(), Some("https://example.org/m2"));
    }
}
