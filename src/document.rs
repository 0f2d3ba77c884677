//! JSON:API wire envelopes.
//!
//! The API wraps everything in `{data, meta}` documents. The engine treats
//! record payloads as opaque: it deserializes the envelope and the `id`/`type`
//! of each resource, and carries `attributes`/`relationships` as raw JSON for
//! the typed model layer to interpret.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// Detail string the server uses to report an application-level timeout.
/// Distinct from a transport timeout: the HTTP exchange completes, but the
/// body says the backend gave up.
const TIMEOUT_DETAIL: &str = "took too long to process and timed out";

/// A single resource record as returned by the API.
///
/// The engine never interprets fields beyond `id` and `resource_type`;
/// `attributes` and `relationships` are opaque payloads deserialized by the
/// model layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    /// Resource id. The API emits ids as JSON strings or numbers depending
    /// on the endpoint; both are accepted.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    /// JSON:API resource type (e.g. `"organizations"`).
    #[serde(rename = "type")]
    pub resource_type: String,

    /// Server-defined attribute payload.
    #[serde(default)]
    pub attributes: serde_json::Value,

    /// Related-resource linkage, when the endpoint provides it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<serde_json::Value>,
}

/// Pagination metadata attached to list responses.
///
/// All fields are optional on the wire; which ones an endpoint populates
/// determines the applicable termination signal (see
/// [`Termination`](crate::fetch::Termination)).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Meta {
    /// Total records matching the query, across all pages.
    #[serde(rename = "total-count", default)]
    pub total_count: Option<u64>,

    /// Total pages at the requested page size.
    #[serde(rename = "total-pages", default)]
    pub total_pages: Option<u32>,

    /// Next page number, or absent/null on the last page.
    #[serde(rename = "next-page", default)]
    pub next_page: Option<u32>,
}

/// Response envelope for list endpoints: `{data: [...], meta: {...}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ListDocument {
    #[serde(default)]
    pub data: Vec<Resource>,
    #[serde(default)]
    pub meta: Meta,
}

/// Response envelope for single-resource endpoints: `{data: {...}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct SingleDocument {
    #[serde(default)]
    pub data: Option<Resource>,
}

/// Request envelope for mutations: `{data: {type, attributes}}`.
#[derive(Debug, Serialize)]
pub(crate) struct Envelope<'a, A: Serialize> {
    pub data: EnvelopeData<'a, A>,
}

#[derive(Debug, Serialize)]
pub(crate) struct EnvelopeData<'a, A: Serialize> {
    #[serde(rename = "type")]
    pub resource_type: &'a str,
    pub attributes: &'a A,
}

impl<'a, A: Serialize> Envelope<'a, A> {
    pub fn new(resource_type: &'a str, attributes: &'a A) -> Self {
        Self {
            data: EnvelopeData {
                resource_type,
                attributes,
            },
        }
    }
}

/// JSON:API error body: `{errors: [{title, detail, ...}]}`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorDocument {
    #[serde(default)]
    pub errors: Vec<ErrorObject>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorObject {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl ErrorDocument {
    /// Parse an error body, tolerating non-JSON and non-conforming payloads.
    pub fn from_body(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    /// Whether any error entry carries the server's timeout detail.
    pub fn is_timeout(&self) -> bool {
        self.errors
            .iter()
            .any(|e| e.detail.as_deref().is_some_and(|d| d.contains(TIMEOUT_DETAIL)))
    }

    pub fn title(&self) -> Option<String> {
        self.errors.first().and_then(|e| e.title.clone())
    }

    pub fn detail(&self) -> Option<String> {
        self.errors.first().and_then(|e| e.detail.clone())
    }
}

/// Accept a JSON string or number as a string id.
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Num(i64),
    }

    match Raw::deserialize(deserializer) {
        Ok(Raw::Str(s)) => Ok(s),
        Ok(Raw::Num(n)) => Ok(n.to_string()),
        Err(_) => Err(de::Error::custom("resource id must be a string or number")),
    }
}
