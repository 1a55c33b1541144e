//! Manifest extraction from annotation targets

use std::collections::HashSet;

use super::types::{Annotation, Target, TargetType};
use crate::error::ContentStateError;

/// Collect the distinct manifest ids referenced by an annotation's targets.
///
/// Manifest targets contribute their own id, Canvas and Range targets the ids
/// of their `partOf` entries. Annotation and Collection targets contribute
/// nothing. Ids are returned in first-seen order without duplicates.
pub fn extract_manifests(annotation: &Annotation) -> Result<Vec<String>, ContentStateError> {
    let mut seen = HashSet::new();
    let mut manifests = Vec::new();

    for target in annotation.target.iter() {
        for id in target_manifests(target)? {
            if seen.insert(id) {
                manifests.push(id.to_string());
            }
        }
    }

    tracing::debug!(
        "Extracted {} manifest(s) from {} target(s)",
        manifests.len(),
        annotation.target.len()
    );
    Ok(manifests)
}

fn target_manifests(target: &Target) -> Result<Vec<&str>, ContentStateError> {
    match target.target_type.as_ref() {
        Some(TargetType::Annotation) | Some(TargetType::Collection) => Ok(Vec::new()),
        Some(TargetType::Manifest) => match target.id.as_deref() {
            Some(id) if !id.is_empty() => Ok(vec![id]),
            _ => Err(ContentStateError::MissingManifestId),
        },
        Some(kind @ (TargetType::Canvas | TargetType::Range)) => {
            let part_of = target
                .part_of
                .as_ref()
                .ok_or_else(|| ContentStateError::MissingPartOf(kind.to_string()))?;

            part_of
                .iter()
                .map(|part| {
                    part.id
                        .as_deref()
                        .filter(|id| !id.is_empty())
                        .ok_or_else(|| ContentStateError::MissingPartOfId(kind.to_string()))
                })
                .collect()
        }
        Some(TargetType::Unrecognized(tag)) => Err(ContentStateError::UnknownTargetType(tag.clone())),
        None => Err(ContentStateError::UnknownTargetType("(none)".to_string())),
    }
}
