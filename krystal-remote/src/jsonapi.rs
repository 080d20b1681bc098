// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The subset of JSON:API the lookup service speaks.

use krystal_core::{Action, Effect, Enlisted, EnlistedEffect, Target};
use krystal_error::{KrystalError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::warn;

/// Top level document
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    pub data: Resource,
    #[serde(default)]
    pub included: Vec<Resource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Resource {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub attributes: serde_json::Value,
    #[serde(default)]
    pub relationships: HashMap<String, Relationship>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Relationship {
    #[serde(default)]
    pub data: Linkage,
}

/// Resource linkage of a relationship
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(untagged)]
pub enum Linkage {
    #[default]
    Empty,
    One(Identifier),
    Many(Vec<Identifier>),
}

impl Linkage {
    #[must_use]
    pub fn identifiers(&self) -> &[Identifier] {
        match self {
            Linkage::Empty => &[],
            Linkage::One(identifier) => std::slice::from_ref(identifier),
            Linkage::Many(identifiers) => identifiers,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Identifier {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Deserialize)]
struct EnlistedAttributes {
    name: String,
    number: String,
}

#[derive(Debug, Deserialize)]
struct EffectAttributes {
    action: String,
    target: String,
    strength: i32,
}

impl Document {
    fn find_included(&self, identifier: &Identifier) -> Option<&Resource> {
        self.included
            .iter()
            .find(|resource| resource.id == identifier.id && resource.kind == identifier.kind)
    }
}

fn parse_effect(resource: &Resource) -> Result<EnlistedEffect> {
    let attributes: EffectAttributes = serde_json::from_value(resource.attributes.clone())
        .map_err(|e| KrystalError::decode(resource.id.clone(), e.to_string()))?;

    Ok(EnlistedEffect {
        effect: Effect::new(
            attributes.action.parse::<Action>()?,
            attributes.target.parse::<Target>()?,
        ),
        strength: attributes.strength,
    })
}

/// Build an enlisted record from its document.
///
/// Effects are taken in relationship order. An effect that is missing from
/// `included` or names an unknown action or target is logged and left out.
///
/// # Errors
/// Returns a decode failure if the primary resource is not an enlisted record.
pub fn enlisted_from_document(document: &Document) -> Result<Enlisted> {
    let data = &document.data;
    if data.kind != "enlisted" {
        return Err(KrystalError::decode(
            data.id.clone(),
            format!("expected an enlisted resource, got '{}'", data.kind),
        ));
    }

    let id = data
        .id
        .parse::<u64>()
        .map_err(|e| KrystalError::decode(data.id.clone(), e.to_string()))?;
    let attributes: EnlistedAttributes = serde_json::from_value(data.attributes.clone())
        .map_err(|e| KrystalError::decode(data.id.clone(), e.to_string()))?;

    let effects = data
        .relationships
        .get("effects")
        .map(|relationship| relationship.data.identifiers())
        .unwrap_or_default()
        .iter()
        .filter_map(|identifier| {
            let Some(resource) = document.find_included(identifier) else {
                warn!("Effect {} is not included in the document", identifier.id);
                return None;
            };
            match parse_effect(resource) {
                Ok(effect) => Some(effect),
                Err(e) => {
                    warn!("Skipping effect {}: {}", identifier.id, e);
                    None
                }
            }
        })
        .collect();

    Ok(Enlisted {
        id,
        name: attributes.name,
        number: attributes.number,
        effects,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linkage_shapes() {
        let one: Relationship =
            serde_json::from_str(r#"{"data": {"id": "1", "type": "effect"}}"#).unwrap();
        let many: Relationship =
            serde_json::from_str(r#"{"data": [{"id": "1", "type": "effect"}]}"#).unwrap();
        let empty: Relationship = serde_json::from_str(r#"{"data": null}"#).unwrap();

        assert_eq!(one.data.identifiers().len(), 1);
        assert_eq!(many.data.identifiers().len(), 1);
        assert!(empty.data.identifiers().is_empty());
    }

    #[test]
    fn rejects_other_resource_types() {
        let document: Document = serde_json::from_str(
            r#"{"data": {"id": "0", "type": "effect", "attributes": {}}}"#,
        )
        .unwrap();

        assert!(enlisted_from_document(&document)
            .unwrap_err()
            .is_decode_failure());
    }
}
