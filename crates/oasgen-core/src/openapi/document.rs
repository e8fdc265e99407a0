//! The parsed specification tree and read-only accessors over it.
//!
//! # Examples
//!
//! ```
//! use oasgen_core::openapi::{SpecDocument, SpecVersion};
//!
//! let doc = SpecDocument::parse_content(
//!     r#"{"openapi": "3.0.3", "info": {"title": "Pets", "version": "1.0.0"}, "paths": {}}"#,
//! )
//! .unwrap();
//! assert_eq!(doc.title(), Some("Pets"));
//! assert_eq!(doc.spec_version(), Ok(SpecVersion::OpenApi30));
//! ```

// Internal imports (std, crate)
use std::fmt;

// External imports (alphabetized)
use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue};

/// HTTP methods that may carry an operation inside a path item
pub const HTTP_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Supported specification dialects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecVersion {
    /// Swagger 2.0
    Swagger2,
    /// OpenAPI 3.0.x
    OpenApi30,
    /// OpenAPI 3.1.x
    OpenApi31,
}

impl SpecVersion {
    /// `$ref` prefix that points into the model section
    pub fn schema_ref_prefix(&self) -> &'static str {
        match self {
            Self::Swagger2 => "#/definitions/",
            Self::OpenApi30 | Self::OpenApi31 => "#/components/schemas/",
        }
    }
}

impl fmt::Display for SpecVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Swagger2 => "2.0",
            Self::OpenApi30 => "3.0",
            Self::OpenApi31 => "3.1",
        };
        write!(f, "{}", s)
    }
}

/// A parsed OpenAPI or Swagger document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SpecDocument {
    json: JsonValue,
}

impl SpecDocument {
    /// Wrap an already parsed JSON tree
    pub fn from_json(json: JsonValue) -> Self {
        Self { json }
    }

    /// Parse content as either JSON or YAML
    pub fn parse_content(content: &str) -> Result<Self, String> {
        if let Ok(json) = serde_json::from_str(content) {
            return Ok(Self { json });
        }

        match serde_yaml::from_str(content) {
            Ok(json) => Ok(Self { json }),
            Err(e) => Err(format!("content is neither valid JSON nor YAML ({})", e)),
        }
    }

    /// Get a reference to the raw JSON value
    pub fn as_json(&self) -> &JsonValue {
        &self.json
    }

    /// Detect the dialect from the `openapi` or `swagger` attribute.
    ///
    /// The error is a validation message ready to be reported.
    pub fn spec_version(&self) -> Result<SpecVersion, String> {
        if let Some(openapi) = self.json.get("openapi") {
            let Some(version) = openapi.as_str() else {
                return Err("attribute openapi is not of type `string`".to_string());
            };
            return if version.starts_with("3.0") {
                Ok(SpecVersion::OpenApi30)
            } else if version.starts_with("3.1") {
                Ok(SpecVersion::OpenApi31)
            } else {
                Err(format!("unsupported specification version: {}", version))
            };
        }

        match self.json.get("swagger") {
            Some(JsonValue::String(v)) if v == "2.0" => Ok(SpecVersion::Swagger2),
            Some(other) => Err(format!(
                "unsupported specification version: {}",
                other.as_str().map(String::from).unwrap_or_else(|| other.to_string())
            )),
            None => Err("attribute openapi is missing".to_string()),
        }
    }

    /// Get the title of the API
    pub fn title(&self) -> Option<&str> {
        self.json.get("info")?.get("title")?.as_str()
    }

    /// Get the version of the API
    pub fn version(&self) -> Option<&str> {
        self.json.get("info")?.get("version")?.as_str()
    }

    /// Model declarations, keyed by model name
    pub fn schemas(&self) -> Option<&JsonMap<String, JsonValue>> {
        match self.spec_version().ok()? {
            SpecVersion::Swagger2 => self.json.get("definitions")?.as_object(),
            SpecVersion::OpenApi30 | SpecVersion::OpenApi31 => {
                self.json.get("components")?.get("schemas")?.as_object()
            }
        }
    }

    /// Names of every declared model, sorted
    pub fn model_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .schemas()
            .map(|schemas| schemas.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }

    /// Every operation declared under `paths`, in path order then method order
    pub fn operations(&self) -> Vec<OpenApiOperation> {
        let Some(paths) = self.json.get("paths").and_then(JsonValue::as_object) else {
            return Vec::new();
        };

        let mut operations = Vec::new();
        for (path, item) in paths {
            for method in HTTP_METHODS {
                let Some(op) = item.get(method).and_then(JsonValue::as_object) else {
                    continue;
                };
                let id = op
                    .get("operationId")
                    .and_then(JsonValue::as_str)
                    .map(String::from)
                    .unwrap_or_else(|| {
                        format!(
                            "{}_{}",
                            method,
                            path.trim_start_matches('/').replace('/', "_")
                        )
                    });
                let tags = op
                    .get("tags")
                    .and_then(JsonValue::as_array)
                    .map(|arr| {
                        arr.iter()
                            .filter_map(JsonValue::as_str)
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default();
                operations.push(OpenApiOperation {
                    id,
                    path: path.clone(),
                    method: method.to_string(),
                    tags,
                });
            }
        }
        operations
    }
}

/// Summary of a single operation, enough to group operations into API files
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenApiOperation {
    /// `operationId`, or `<method>_<path>` when absent
    #[serde(rename = "operationId")]
    pub id: String,
    /// The path where this operation is defined (e.g., "/pet/findByStatus")
    pub path: String,
    /// Lowercase HTTP method
    pub method: String,
    pub tags: Vec<String>,
}

impl OpenApiOperation {
    /// API group this operation belongs to: its first tag, or `default`
    pub fn group(&self) -> &str {
        self.tags.first().map(String::as_str).unwrap_or("default")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_yaml_content() {
        let doc = SpecDocument::parse_content(
            "openapi: 3.1.0\ninfo:\n  title: Yaml API\n  version: 0.1.0\npaths: {}\n",
        )
        .unwrap();
        assert_eq!(doc.title(), Some("Yaml API"));
        assert_eq!(doc.version(), Some("0.1.0"));
        assert_eq!(doc.spec_version(), Ok(SpecVersion::OpenApi31));
    }

    #[test]
    fn test_parse_garbage_content() {
        let err = SpecDocument::parse_content("{ not: [valid").unwrap_err();
        assert!(err.starts_with("content is neither valid JSON nor YAML"));
    }

    #[test]
    fn test_spec_version_detection() {
        let v2 = SpecDocument::from_json(json!({"swagger": "2.0"}));
        assert_eq!(v2.spec_version(), Ok(SpecVersion::Swagger2));

        let missing = SpecDocument::from_json(json!({"info": {}}));
        assert_eq!(
            missing.spec_version(),
            Err("attribute openapi is missing".to_string())
        );

        let future = SpecDocument::from_json(json!({"openapi": "4.0.0"}));
        assert_eq!(
            future.spec_version(),
            Err("unsupported specification version: 4.0.0".to_string())
        );

        let numeric = SpecDocument::from_json(json!({"openapi": 3.0}));
        assert!(numeric.spec_version().unwrap_err().contains("not of type"));
    }

    #[test]
    fn test_operations_grouping() {
        let doc = SpecDocument::from_json(json!({
            "openapi": "3.0.0",
            "paths": {
                "/pets": {
                    "get": {"operationId": "listPets", "tags": ["pets"], "summary": "List pets"},
                    "post": {"tags": ["pets", "admin"]}
                },
                "/health": {"get": {}}
            }
        }));
        let ops = doc.operations();
        assert_eq!(ops.len(), 3);
        let health = ops.iter().find(|o| o.path == "/health").unwrap();
        assert_eq!(health.id, "get_health");
        assert_eq!(health.group(), "default");
        let create = ops.iter().find(|o| o.method == "post").unwrap();
        assert_eq!(create.id, "post_pets");
        assert_eq!(create.group(), "pets");

        // Only what grouping needs is carried over
        let list = ops.iter().find(|o| o.id == "listPets").unwrap();
        assert_eq!(
            serde_json::to_value(list).unwrap(),
            json!({"operationId": "listPets", "path": "/pets", "method": "get", "tags": ["pets"]})
        );
    }

    #[test]
    fn test_model_names_by_version() {
        let v3 = SpecDocument::from_json(json!({
            "openapi": "3.0.0",
            "components": {"schemas": {"Pet": {}, "Error": {}}}
        }));
        assert_eq!(v3.model_names(), vec!["Error".to_string(), "Pet".to_string()]);

        let v2 = SpecDocument::from_json(json!({
            "swagger": "2.0",
            "definitions": {"Order": {}}
        }));
        assert_eq!(v2.model_names(), vec!["Order".to_string()]);
    }
}
