//! Loading a specification from a path or URL.
//!
//! Loading never fails outright. Unreadable or unparseable input produces a
//! [`SpecParseResult`] without a document and with a message explaining why;
//! the caller inspects both.
//!
//! # Examples
//!
//! ```no_run
//! use oasgen_core::openapi::SpecLoader;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let result = SpecLoader::new().read_location("openapi.yaml", &[]).await;
//! for message in &result.messages {
//!     eprintln!("{}", message);
//! }
//! # }
//! ```

// Internal imports (std, crate)
use std::collections::BTreeSet;
use std::path::Path;

use super::document::SpecDocument;
use super::unused::unused_schemas;
use super::validate::{validate_references, validate_structure};
use crate::auth::{AuthPlacement, AuthorizationValue};
use crate::Error;

// External imports (alphabetized)
use reqwest::header::COOKIE;
use tokio::fs;
use url::Url;

/// Outcome of reading a location
#[derive(Debug, Clone, Default)]
pub struct SpecParseResult {
    /// The parsed tree, absent when the input could not be read or parsed
    pub document: Option<SpecDocument>,
    /// Validation messages; duplicates collapse
    pub messages: BTreeSet<String>,
    /// Models declared but never referenced
    pub unused_models: Vec<String>,
}

impl SpecParseResult {
    fn failed(message: String) -> Self {
        Self {
            document: None,
            messages: BTreeSet::from([message]),
            unused_models: Vec::new(),
        }
    }

    /// A document was produced and no validation messages were collected
    pub fn is_valid(&self) -> bool {
        self.document.is_some() && self.messages.is_empty()
    }

    /// Unused models rendered as warning messages
    pub fn warnings(&self) -> BTreeSet<String> {
        self.unused_models
            .iter()
            .map(|name| format!("Unused model: {}", name))
            .collect()
    }
}

/// Reads, parses and validates specification documents
#[derive(Debug, Clone, Default)]
pub struct SpecLoader {
    client: reqwest::Client,
}

impl SpecLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured HTTP client for remote locations
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Read a file path or `http(s)` URL and validate what it contains.
    ///
    /// Credentials are only applied to remote locations.
    pub async fn read_location(
        &self,
        location: &str,
        auth: &[AuthorizationValue],
    ) -> SpecParseResult {
        let content = if is_url(location) {
            self.fetch(location, auth).await
        } else {
            fs::read_to_string(Path::new(location))
                .await
                .map_err(Error::from)
        };

        match content {
            Ok(content) => Self::parse(location, &content),
            Err(e) => SpecParseResult::failed(format!(
                "Unable to read location `{}`: {}",
                location, e
            )),
        }
    }

    /// Parse and validate already loaded content.
    ///
    /// `location` is only used in diagnostics.
    pub fn parse(location: &str, content: &str) -> SpecParseResult {
        let document = match SpecDocument::parse_content(content) {
            Ok(document) => document,
            Err(e) => {
                return SpecParseResult::failed(format!(
                    "Failed to parse specification at {}: {}",
                    location, e
                ))
            }
        };
        let version = match document.spec_version() {
            Ok(version) => version,
            Err(message) => return SpecParseResult::failed(message),
        };
        log::debug!("Parsed {} as a {} document", location, version);

        let mut messages = BTreeSet::new();
        validate_structure(&document, version, &mut messages);
        validate_references(&document, &mut messages);

        let unused_models = match unused_schemas(&document) {
            Ok(names) => names,
            Err(e) => {
                log::debug!("Unused model analysis failed: {}", e);
                eprintln!(
                    "[error] There is an error with OpenAPI specification parsed from the input spec file: {}",
                    location
                );
                eprintln!(
                    "[error] Please make sure the spec file has correct format and all required fields are populated with valid value."
                );
                Vec::new()
            }
        };

        SpecParseResult {
            document: Some(document),
            messages,
            unused_models,
        }
    }

    async fn fetch(&self, location: &str, auth: &[AuthorizationValue]) -> crate::Result<String> {
        let mut url = Url::parse(location)
            .map_err(|e| Error::openapi(format!("Invalid URL {}: {}", location, e)))?;
        for value in auth.iter().filter(|a| a.placement == AuthPlacement::Query) {
            url.query_pairs_mut().append_pair(&value.name, &value.value);
        }

        let mut request = self.client.get(url);
        for value in auth.iter().filter(|a| a.placement == AuthPlacement::Header) {
            request = request.header(value.name.as_str(), value.value.as_str());
        }
        let cookies = auth
            .iter()
            .filter(|a| a.placement == AuthPlacement::Cookie)
            .map(|a| format!("{}={}", a.name, a.value))
            .collect::<Vec<_>>();
        if !cookies.is_empty() {
            request = request.header(COOKIE, cookies.join("; "));
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(Error::openapi(format!(
                "Failed to fetch OpenAPI spec from {}: HTTP {}",
                location,
                response.status()
            )));
        }
        Ok(response.text().await?)
    }
}

fn is_url(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const VALID: &str = r#"
openapi: 3.0.3
info:
  title: Pets
  version: 1.0.0
paths:
  /pets:
    get:
      operationId: listPets
      responses:
        '200':
          description: ok
          content:
            application/json:
              schema:
                $ref: '#/components/schemas/Pet'
components:
  schemas:
    Pet:
      type: object
      properties:
        name:
          type: string
    Leftover:
      type: string
"#;

    #[tokio::test]
    async fn test_read_valid_file() -> crate::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("openapi.yaml");
        tokio::fs::write(&path, VALID).await?;

        let result = SpecLoader::new()
            .read_location(path.to_str().unwrap(), &[AuthorizationValue::header("a", "b")])
            .await;
        assert!(result.is_valid(), "{:?}", result.messages);
        assert_eq!(result.unused_models, vec!["Leftover".to_string()]);
        assert_eq!(
            result.warnings(),
            BTreeSet::from(["Unused model: Leftover".to_string()])
        );
        assert_eq!(result.document.unwrap().title(), Some("Pets"));
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_file_is_a_message() {
        let result = SpecLoader::new()
            .read_location("/definitely/not/here/openapi.yaml", &[])
            .await;
        assert!(result.document.is_none());
        assert_eq!(result.messages.len(), 1);
        assert!(result
            .messages
            .iter()
            .next()
            .unwrap()
            .starts_with("Unable to read location `/definitely/not/here/openapi.yaml`"));
    }

    #[test]
    fn test_unsupported_version() {
        let result = SpecLoader::parse("inline", "openapi: 2.5.0\ninfo: {}\n");
        assert!(result.document.is_none());
        assert!(result
            .messages
            .contains("unsupported specification version: 2.5.0"));
    }

    #[test]
    fn test_unused_analysis_failure_is_not_a_message() {
        let result = SpecLoader::parse(
            "inline",
            r#"{"openapi": "3.1.0", "info": {"title": "t", "version": "1"}, "components": {"schemas": []}}"#,
        );
        assert!(result.document.is_some());
        assert!(result.unused_models.is_empty());
        assert!(result.messages.is_empty(), "{:?}", result.messages);
    }

    #[test]
    fn test_is_url() {
        assert!(is_url("https://petstore3.swagger.io/api/v3/openapi.json"));
        assert!(!is_url("specs/openapi.yaml"));
    }
}
