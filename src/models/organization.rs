//! Organization model and trait implementations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::GlueClient;
use crate::document::Resource;
use crate::error::Result;
use crate::filter::Filter;
use crate::traits::{ApiResource, Create, Delete, Get, List, Update};

/// An organization: the tenant-level container every other documented asset
/// hangs off.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    /// Resource id.
    pub id: String,
    /// Attribute payload.
    pub attributes: OrganizationAttributes,
}

/// Organization attributes as returned by the API (kebab-case on the wire).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OrganizationAttributes {
    /// Display name.
    pub name: String,

    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,

    /// Organization type, resolved to its display name.
    #[serde(default)]
    pub organization_type_name: Option<String>,

    /// Organization status, resolved to its display name.
    #[serde(default)]
    pub organization_status_name: Option<String>,

    /// Short operator notes.
    #[serde(default)]
    pub quick_notes: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Writable organization fields for create/update calls.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct OrganizationParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_type_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_status_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub quick_notes: Option<String>,
}

impl Organization {
    /// Fetch every configuration documented under this organization.
    pub async fn configurations(
        &self,
        client: &GlueClient,
    ) -> Result<Vec<crate::models::configuration::Configuration>> {
        crate::models::configuration::Configuration::list_all(
            client,
            &Filter::new().with("organization_id", &self.id),
        )
        .await
    }
}

impl ApiResource for Organization {
    const TYPE: &'static str = "organizations";
    const PATH: &'static str = "organizations";

    fn from_resource(resource: Resource) -> Result<Self> {
        Ok(Self {
            id: resource.id,
            attributes: serde_json::from_value(resource.attributes)?,
        })
    }
}

impl Get for Organization {}

impl List for Organization {
    const ALLOWED_FILTERS: &'static [&'static str] = &[
        "id",
        "name",
        "organization_type_id",
        "organization_status_id",
        "psa_id",
    ];
}

impl Create for Organization {
    type CreateAttributes = OrganizationParams;
}

impl Update for Organization {
    type UpdateAttributes = OrganizationParams;
}

impl Delete for Organization {}
