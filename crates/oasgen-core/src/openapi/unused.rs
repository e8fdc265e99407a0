//! Detection of models that are declared but never referenced.

use std::collections::BTreeSet;

use percent_encoding::percent_decode_str;
use serde_json::{Map as JsonMap, Value as JsonValue};

use super::document::{SpecDocument, SpecVersion};
use super::validate::{unescape_pointer, walk_refs, walk_section_refs};
use crate::{Error, Result};

/// Names of models not reachable from anything outside the model section.
///
/// A model counts as used when it is referenced from paths, from any other
/// component section, or from another used model. Fails when the sections the
/// analysis walks are not objects.
pub fn unused_schemas(document: &SpecDocument) -> Result<Vec<String>> {
    let version = document.spec_version().map_err(Error::openapi)?;
    let root = document
        .as_json()
        .as_object()
        .ok_or_else(|| Error::openapi("specification root is not an object"))?;

    if let Some(paths) = root.get("paths") {
        if !paths.is_object() {
            return Err(Error::openapi("paths is not an object"));
        }
    }

    let schemas = match version {
        SpecVersion::Swagger2 => match root.get("definitions") {
            None => return Ok(Vec::new()),
            Some(defs) => defs
                .as_object()
                .ok_or_else(|| Error::openapi("definitions is not an object"))?,
        },
        SpecVersion::OpenApi30 | SpecVersion::OpenApi31 => {
            let Some(components) = root.get("components") else {
                return Ok(Vec::new());
            };
            let components = components
                .as_object()
                .ok_or_else(|| Error::openapi("components is not an object"))?;
            match components.get("schemas") {
                None => return Ok(Vec::new()),
                Some(schemas) => schemas
                    .as_object()
                    .ok_or_else(|| Error::openapi("components.schemas is not an object"))?,
            }
        }
    };

    let prefix = version.schema_ref_prefix();
    let mut pending = Vec::new();
    for (key, value) in root {
        match (version, key.as_str()) {
            (SpecVersion::Swagger2, "definitions") => {}
            (SpecVersion::OpenApi30 | SpecVersion::OpenApi31, "components") => {
                if let Some(components) = value.as_object() {
                    for (section, entries) in components.iter().filter(|(s, _)| *s != "schemas") {
                        collect_section_refs(section, entries, prefix, &mut pending);
                    }
                }
            }
            _ => collect_section_refs(key, value, prefix, &mut pending),
        }
    }

    let mut used = BTreeSet::new();
    while let Some(name) = pending.pop() {
        if !used.insert(name.clone()) {
            continue;
        }
        if let Some(schema) = schemas.get(&name) {
            collect_model_refs(schema, prefix, &name, &mut pending);
        }
    }

    Ok(unreferenced(schemas, &used))
}

fn collect_model_refs(value: &JsonValue, prefix: &str, location: &str, out: &mut Vec<String>) {
    walk_refs(value, location, &mut |_, reference| push_model_name(reference, prefix, out));
}

fn collect_section_refs(section: &str, value: &JsonValue, prefix: &str, out: &mut Vec<String>) {
    walk_section_refs(section, value, &mut |_, reference| push_model_name(reference, prefix, out));
}

fn push_model_name(reference: &str, prefix: &str, out: &mut Vec<String>) {
    if let Some(rest) = reference.strip_prefix(prefix) {
        let segment = rest.split('/').next().unwrap_or(rest);
        let segment = percent_decode_str(segment).decode_utf8_lossy();
        out.push(unescape_pointer(&segment));
    }
}

fn unreferenced(schemas: &JsonMap<String, JsonValue>, used: &BTreeSet<String>) -> Vec<String> {
    schemas
        .keys()
        .filter(|name| !used.contains(*name))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn unused(json: JsonValue) -> Result<Vec<String>> {
        unused_schemas(&SpecDocument::from_json(json))
    }

    #[test]
    fn test_transitive_usage() -> Result<()> {
        let names = unused(json!({
            "openapi": "3.0.0",
            "paths": {"/pets": {"get": {"responses": {"200": {"content": {"application/json": {
                "schema": {"type": "array", "items": {"$ref": "#/components/schemas/Pet"}}
            }}}}}}},
            "components": {
                "schemas": {
                    "Pet": {"properties": {"owner": {"$ref": "#/components/schemas/Owner"}}},
                    "Owner": {"properties": {"pets": {"items": {"$ref": "#/components/schemas/Pet"}}}},
                    "Orphan": {"type": "object"},
                    "OrphanChild": {"type": "string"},
                    "OrphanParent": {"properties": {"c": {"$ref": "#/components/schemas/OrphanChild"}}}
                }
            }
        }))?;
        // OrphanChild is only reachable from another unused schema
        assert_eq!(
            names,
            vec![
                "Orphan".to_string(),
                "OrphanChild".to_string(),
                "OrphanParent".to_string()
            ]
        );
        Ok(())
    }

    #[test]
    fn test_other_component_sections_count_as_usage() -> Result<()> {
        let names = unused(json!({
            "openapi": "3.1.0",
            "components": {
                "responses": {"NotFound": {"content": {"application/json": {
                    "schema": {"$ref": "#/components/schemas/Error"}
                }}}},
                "schemas": {"Error": {}, "Unused": {}}
            }
        }))?;
        assert_eq!(names, vec!["Unused".to_string()]);
        Ok(())
    }

    #[test]
    fn test_property_named_example_counts_as_usage() -> Result<()> {
        let names = unused(json!({
            "openapi": "3.0.0",
            "paths": {"/pets": {"get": {"responses": {"200": {"content": {"application/json": {
                "schema": {"$ref": "#/components/schemas/Pet"}
            }}}}}}},
            "components": {
                "schemas": {
                    "Pet": {
                        "properties": {"example": {"$ref": "#/components/schemas/Sample"}},
                        "example": {"$ref": "#/components/schemas/Literal"}
                    },
                    "Sample": {"type": "string"},
                    "Literal": {"type": "string"}
                }
            }
        }))?;
        assert_eq!(names, vec!["Literal".to_string()]);
        Ok(())
    }

    #[test]
    fn test_swagger2_definitions() -> Result<()> {
        let names = unused(json!({
            "swagger": "2.0",
            "paths": {"/o": {"get": {"responses": {"200": {
                "schema": {"$ref": "#/definitions/Order"}
            }}}}},
            "definitions": {"Order": {}, "Stale": {}}
        }))?;
        assert_eq!(names, vec!["Stale".to_string()]);
        Ok(())
    }

    #[test]
    fn test_no_models() -> Result<()> {
        assert!(unused(json!({"openapi": "3.0.0", "paths": {}}))?.is_empty());
        Ok(())
    }

    #[test]
    fn test_malformed_sections_fail() {
        assert!(unused(json!({"openapi": "3.0.0", "components": []})).is_err());
        assert!(unused(json!({"openapi": "3.0.0", "components": {"schemas": "nope"}})).is_err());
        assert!(unused(json!({"swagger": "2.0", "definitions": 4})).is_err());
        assert!(unused(json!({"openapi": "3.0.0", "paths": [1]})).is_err());
    }
}
