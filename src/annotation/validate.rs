//! Structural validation of canonical content state annotations

use serde_json::Value;

use super::expand::is_content_state;
use super::types::{Annotation, OneOrMany};
use super::{is_falsy, CONTEXT_KEY, PRESENTATION_3_CONTEXT};
use crate::error::ContentStateError;

/// Validate an expanded content state and convert it into an [`Annotation`].
///
/// Target types and their manifest references are checked later by
/// [`extract_manifests`](super::extract_manifests).
pub fn validate(value: Value) -> Result<Annotation, ContentStateError> {
    check_context(value.get(CONTEXT_KEY))?;
    check_target(value.get("target"))?;

    if !is_content_state(&value) {
        return Err(ContentStateError::MissingMotivation);
    }

    serde_json::from_value(value)
        .map_err(|e| ContentStateError::MalformedAnnotation(e.to_string()))
}

fn check_context(context: Option<&Value>) -> Result<(), ContentStateError> {
    match context {
        Some(Value::String(iri)) if iri == PRESENTATION_3_CONTEXT => Ok(()),
        Some(Value::String(iri)) => Err(ContentStateError::IncorrectContext(iri.clone())),
        Some(contexts @ Value::Array(_)) => {
            if OneOrMany::from_json(contexts).contains(PRESENTATION_3_CONTEXT) {
                Ok(())
            } else {
                Err(ContentStateError::IncorrectContexts)
            }
        }
        _ => Err(ContentStateError::InvalidContext),
    }
}

fn check_target(target: Option<&Value>) -> Result<(), ContentStateError> {
    match target {
        None => Err(ContentStateError::MissingTarget),
        Some(target) if is_falsy(target) => Err(ContentStateError::MissingTarget),
        Some(Value::Array(targets)) if targets.is_empty() => Err(ContentStateError::MissingTarget),
        Some(Value::Array(targets)) if targets.iter().all(Value::is_object) => Ok(()),
        Some(Value::Object(_)) => Ok(()),
        Some(_) => Err(ContentStateError::InvalidTarget),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::TargetType;
    use serde_json::json;

    fn basic_annotation() -> Value {
        json!({
            "@context": PRESENTATION_3_CONTEXT,
            "id": "https://example.org/Annotation-server/bookmarks/b1",
            "type": "Annotation",
            "motivation": ["contentState"],
            "target": {
                "id": "https://example.org/iiif/item1/manifest",
                "type": "Manifest"
            }
        })
    }

    #[test]
    fn test_valid_annotation() {
        let annotation = validate(basic_annotation()).unwrap();
        assert_eq!(annotation.id.as_deref(), Some("https://example.org/Annotation-server/bookmarks/b1"));
        assert!(annotation.motivation.contains("contentState"));
        let target = annotation.target.iter().next().unwrap();
        assert_eq!(target.target_type, Some(TargetType::Manifest));
        assert_eq!(serde_json::to_value(&annotation).unwrap(), basic_annotation());
    }

    #[test]
    fn test_multiple_contexts() {
        let mut annotation = basic_annotation();
        annotation["@context"] = json!([PRESENTATION_3_CONTEXT, "otherContext"]);
        assert!(validate(annotation).is_ok());
    }

    #[test]
    fn test_wrong_context() {
        let mut annotation = basic_annotation();
        annotation["@context"] = json!("banana");
        assert_eq!(
            validate(annotation).unwrap_err(),
            ContentStateError::IncorrectContext("banana".to_string())
        );
    }

    #[test]
    fn test_no_correct_context_in_array() {
        let mut annotation = basic_annotation();
        annotation["@context"] = json!(["banana", "apple"]);
        assert_eq!(validate(annotation).unwrap_err(), ContentStateError::IncorrectContexts);
    }

    #[test]
    fn test_context_object() {
        let mut annotation = basic_annotation();
        annotation["@context"] = json!({});
        assert_eq!(validate(annotation).unwrap_err(), ContentStateError::InvalidContext);
    }

    #[test]
    fn test_missing_context() {
        let mut annotation = basic_annotation();
        annotation.as_object_mut().unwrap().remove("@context");
        assert_eq!(validate(annotation).unwrap_err(), ContentStateError::InvalidContext);
    }

    #[test]
    fn test_missing_target() {
        let mut annotation = basic_annotation();
        annotation.as_object_mut().unwrap().remove("target");
        assert_eq!(validate(annotation).unwrap_err(), ContentStateError::MissingTarget);

        for falsy in [json!(null), json!(""), json!([])] {
            let mut annotation = basic_annotation();
            annotation["target"] = falsy;
            assert_eq!(validate(annotation).unwrap_err(), ContentStateError::MissingTarget);
        }
    }

    #[test]
    fn test_target_must_be_object_or_array_of_objects() {
        let mut annotation = basic_annotation();
        annotation["target"] = json!("https://example.org/iiif/item1/manifest");
        assert_eq!(validate(annotation).unwrap_err(), ContentStateError::InvalidTarget);

        let mut annotation = basic_annotation();
        annotation["target"] = json!([{ "id": "m", "type": "Manifest" }, "m2"]);
        assert_eq!(validate(annotation).unwrap_err(), ContentStateError::InvalidTarget);
    }

    #[test]
    fn test_missing_motivation() {
        let mut annotation = basic_annotation();
        annotation.as_object_mut().unwrap().remove("motivation");
        assert_eq!(validate(annotation).unwrap_err(), ContentStateError::MissingMotivation);
    }

    #[test]
    fn test_malformed_member() {
        let mut annotation = basic_annotation();
        annotation["target"]["id"] = json!(7);
        assert!(matches!(
            validate(annotation),
            Err(ContentStateError::MalformedAnnotation(_))
        ));
    }

    #[test]
    fn test_non_object_input() {
        assert_eq!(validate(json!(42)).unwrap_err(), ContentStateError::InvalidContext);
    }
}
