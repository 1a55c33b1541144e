//! Expansion of shorthand content states into canonical annotations

use serde_json::{json, Map, Value};

use super::types::{OneOrMany, TargetType};
use super::{is_falsy, CONTENT_STATE_MOTIVATION, CONTEXT_KEY, PRESENTATION_3_CONTEXT};

/// Whether `value` has a motivation (single or array) including "contentState"
pub fn is_content_state(value: &Value) -> bool {
    value
        .get("motivation")
        .map(|motivation| OneOrMany::from_json(motivation).contains(CONTENT_STATE_MOTIVATION))
        .unwrap_or(false)
}

/// Expand a decoded content state into the canonical annotation shape.
///
/// - A content state annotation is kept, with the Presentation 3 context
///   added when it has none.
/// - A bare Annotation, Collection, Manifest, Canvas or Range is wrapped
///   as the target of a new annotation.
/// - Anything else is returned unchanged and left for validation to reject.
pub fn expand(value: Value) -> Value {
    if is_content_state(&value) {
        return with_context(value);
    }

    let wrappable = value
        .get("type")
        .and_then(Value::as_str)
        .map(|tag| TargetType::from(tag).is_recognized())
        .unwrap_or(false);

    if wrappable {
        tracing::debug!("Wrapping bare target in a content state annotation");
        return json!({
            "@context": PRESENTATION_3_CONTEXT,
            "type": "Annotation",
            "motivation": [CONTENT_STATE_MOTIVATION],
            "target": value,
        });
    }

    value
}

fn with_context(value: Value) -> Value {
    let members = match value {
        Value::Object(members) => members,
        other => return other,
    };

    if !members.get(CONTEXT_KEY).map_or(true, is_falsy) {
        return Value::Object(members);
    }

    tracing::debug!("Adding missing context to content state annotation");
    let mut expanded = Map::with_capacity(members.len() + 1);
    expanded.insert(
        CONTEXT_KEY.to_string(),
        Value::String(PRESENTATION_3_CONTEXT.to_string()),
    );
    expanded.extend(members.into_iter().filter(|(key, _)| key != CONTEXT_KEY));
    Value::Object(expanded)
}
