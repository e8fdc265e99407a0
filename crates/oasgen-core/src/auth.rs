//! Authorization credentials used when fetching remote specifications.
//!
//! Credentials are usually supplied as a single string of the form
//! `name:value,name:value`. Each pair becomes a header credential with a
//! URL-decoded name and value.

use std::fmt;
use std::str::FromStr;

use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};

/// Where a credential is attached to the outgoing request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthPlacement {
    #[default]
    Header,
    Query,
    Cookie,
}

impl AuthPlacement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Query => "query",
            Self::Cookie => "cookie",
        }
    }
}

impl FromStr for AuthPlacement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "header" => Ok(Self::Header),
            "query" => Ok(Self::Query),
            "cookie" => Ok(Self::Cookie),
            _ => Err(format!("Unknown authorization placement: {}", s)),
        }
    }
}

impl fmt::Display for AuthPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single credential: placement, name and value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationValue {
    pub placement: AuthPlacement,
    pub name: String,
    pub value: String,
}

impl AuthorizationValue {
    pub fn new(
        placement: AuthPlacement,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            placement,
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn header(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(AuthPlacement::Header, name, value)
    }
}

/// Parse a `name:value,name:value` string into header credentials.
///
/// Parts that do not split into exactly one name and one value are skipped.
pub fn parse_auth(auth: Option<&str>) -> Vec<AuthorizationValue> {
    let Some(auth) = auth.filter(|a| !a.trim().is_empty()) else {
        return Vec::new();
    };

    auth.split(',')
        .filter_map(|part| {
            let pair: Vec<&str> = part.split(':').collect();
            match pair.as_slice() {
                [name, value] => Some(AuthorizationValue::header(
                    url_decode(name),
                    url_decode(value),
                )),
                _ => {
                    log::debug!("Skipping malformed authorization entry");
                    None
                }
            }
        })
        .collect()
}

fn url_decode(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}
