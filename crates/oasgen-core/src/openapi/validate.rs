//! Structural and reference validation of a parsed document.
//!
//! Every check appends human-readable messages to a shared set; nothing here
//! fails. The loader decides what to do with the collected messages.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use percent_encoding::percent_decode_str;
use regex::Regex;
use serde_json::{Map as JsonMap, Value as JsonValue};

use super::document::{SpecDocument, SpecVersion, HTTP_METHODS};

/// Keys under `components.*` must match this pattern
static COMPONENT_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9.\-_]+$").expect("component key pattern is valid"));

/// Check required attributes, path keys, operations and component keys
pub fn validate_structure(
    document: &SpecDocument,
    version: SpecVersion,
    messages: &mut BTreeSet<String>,
) {
    let Some(root) = document.as_json().as_object() else {
        messages.insert("specification root is not an object".to_string());
        return;
    };

    check_info(root, messages);

    match root.get("paths") {
        None if version != SpecVersion::OpenApi31 => {
            messages.insert("attribute paths is missing".to_string());
        }
        None => {}
        Some(JsonValue::Object(paths)) => check_paths(paths, messages),
        Some(_) => {
            messages.insert("attribute paths is not of type `object`".to_string());
        }
    }

    if version != SpecVersion::Swagger2 {
        check_component_keys(root, messages);
    }

    // openapiv3 models 3.0 only
    if version == SpecVersion::OpenApi30 && messages.is_empty() {
        if let Err(e) = serde_json::from_value::<openapiv3::OpenAPI>(document.as_json().clone()) {
            messages.insert(format!("Failed to interpret document as OpenAPI 3.0: {}", e));
        }
    }
}

fn check_info(root: &JsonMap<String, JsonValue>, messages: &mut BTreeSet<String>) {
    let Some(info) = root.get("info") else {
        messages.insert("attribute info is missing".to_string());
        return;
    };
    let Some(info) = info.as_object() else {
        messages.insert("attribute info is not of type `object`".to_string());
        return;
    };
    for field in ["title", "version"] {
        match info.get(field) {
            None => {
                messages.insert(format!("attribute info.{} is missing", field));
            }
            Some(JsonValue::String(_)) => {}
            Some(_) => {
                messages.insert(format!("attribute info.{} is not of type `string`", field));
            }
        }
    }
}

fn check_paths(paths: &JsonMap<String, JsonValue>, messages: &mut BTreeSet<String>) {
    for (path, item) in paths {
        if path.starts_with("x-") {
            continue;
        }
        if !path.starts_with('/') {
            messages.insert(format!("path '{}' must start with '/'", path));
        }
        let Some(item) = item.as_object() else {
            messages.insert(format!("attribute paths.'{}' is not of type `object`", path));
            continue;
        };

        check_parameters(item.get("parameters"), &format!("paths.'{}'", path), messages);

        for method in HTTP_METHODS {
            let Some(op) = item.get(method) else {
                continue;
            };
            let location = format!("paths.'{}'({})", path, method);
            let Some(op) = op.as_object() else {
                messages.insert(format!("attribute {} is not of type `object`", location));
                continue;
            };
            if !op.contains_key("responses") {
                messages.insert(format!("attribute {}.responses is missing", location));
            }
            check_parameters(op.get("parameters"), &location, messages);
        }
    }
}

fn check_parameters(params: Option<&JsonValue>, location: &str, messages: &mut BTreeSet<String>) {
    let Some(params) = params else {
        return;
    };
    let Some(params) = params.as_array() else {
        messages.insert(format!("attribute {}.parameters is not of type `array`", location));
        return;
    };
    for param in params {
        if param.get("$ref").is_some() {
            continue;
        }
        for field in ["name", "in"] {
            if param.get(field).is_none() {
                messages.insert(format!("attribute {}.parameters.{} is missing", location, field));
            }
        }
    }
}

fn check_component_keys(root: &JsonMap<String, JsonValue>, messages: &mut BTreeSet<String>) {
    let Some(components) = root.get("components").and_then(JsonValue::as_object) else {
        return;
    };
    for (section, entries) in components {
        if section.starts_with("x-") {
            continue;
        }
        let Some(entries) = entries.as_object() else {
            continue;
        };
        for key in entries.keys().filter(|k| !COMPONENT_KEY.is_match(k)) {
            messages.insert(format!(
                "component key '{}' in components.{} does not match {}",
                key,
                section,
                COMPONENT_KEY.as_str()
            ));
        }
    }
}

/// Check that every `$ref` in the document resolves.
///
/// Internal pointers must resolve against the document itself. External
/// documents are not followed and are reported instead.
pub fn validate_references(document: &SpecDocument, messages: &mut BTreeSet<String>) {
    let root = document.as_json();
    walk_refs(root, "#", &mut |location, reference| {
        if let Some(pointer) = reference.strip_prefix('#') {
            let pointer = percent_decode_str(pointer).decode_utf8_lossy();
            if root.pointer(&pointer).is_none() {
                messages.insert(format!(
                    "Could not resolve reference: {} (at {})",
                    reference, location
                ));
            }
        } else {
            messages.insert(format!(
                "External reference not supported: {} (at {})",
                reference, location
            ));
        }
    });
}

/// Maps whose keys are user-chosen names rather than keywords
const NAME_MAPS: &[&str] = &[
    "properties",
    "patternProperties",
    "definitions",
    "schemas",
    "parameters",
    "responses",
    "headers",
    "requestBodies",
    "securitySchemes",
    "links",
    "callbacks",
    "pathItems",
    "examples",
    "content",
    "encoding",
    "variables",
];

/// Visit every string `$ref` with the JSON pointer of the object holding it.
///
/// Literal `example` payloads are skipped. A property or component that is
/// merely named `example` is still walked.
pub(crate) fn walk_refs<F>(value: &JsonValue, location: &str, visit: &mut F)
where
    F: FnMut(&str, &str),
{
    walk(value, location, false, visit);
}

/// Like [`walk_refs`], for the value stored under a document-level `section` key
pub(crate) fn walk_section_refs<F>(section: &str, value: &JsonValue, visit: &mut F)
where
    F: FnMut(&str, &str),
{
    walk(value, section, NAME_MAPS.contains(&section), visit);
}

fn walk<F>(value: &JsonValue, location: &str, in_name_map: bool, visit: &mut F)
where
    F: FnMut(&str, &str),
{
    match value {
        JsonValue::Object(map) => {
            if !in_name_map {
                if let Some(JsonValue::String(reference)) = map.get("$ref") {
                    visit(location, reference);
                }
            }
            for (key, child) in map {
                if !in_name_map && (key == "$ref" || key == "example") {
                    continue;
                }
                let child_is_name_map = !in_name_map && NAME_MAPS.contains(&key.as_str());
                let child_location = format!("{}/{}", location, escape_pointer(key));
                walk(child, &child_location, child_is_name_map, visit);
            }
        }
        JsonValue::Array(items) => {
            for (i, child) in items.iter().enumerate() {
                walk(child, &format!("{}/{}", location, i), false, visit);
            }
        }
        _ => {}
    }
}

/// Escape a key as a JSON pointer segment
pub(crate) fn escape_pointer(key: &str) -> String {
    key.replace('~', "~0").replace('/', "~1")
}

/// Undo [`escape_pointer`]
pub(crate) fn unescape_pointer(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}
