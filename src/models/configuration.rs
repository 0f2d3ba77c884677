//! Configuration (managed device) model and trait implementations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::Resource;
use crate::error::Result;
use crate::traits::{ApiResource, Create, Get, List, Update};

/// A configuration: a documented device or service instance belonging to an
/// organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Configuration {
    /// Resource id.
    pub id: String,
    /// Attribute payload.
    pub attributes: ConfigurationAttributes,
}

/// Configuration attributes as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigurationAttributes {
    /// Display name.
    pub name: String,

    /// Owning organization id.
    #[serde(default)]
    pub organization_id: Option<u64>,

    #[serde(default)]
    pub hostname: Option<String>,

    #[serde(default)]
    pub primary_ip: Option<String>,

    #[serde(default)]
    pub serial_number: Option<String>,

    /// Configuration type, resolved to its display name.
    #[serde(default)]
    pub configuration_type_name: Option<String>,

    /// Configuration status, resolved to its display name.
    #[serde(default)]
    pub configuration_status_name: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Writable configuration fields for create/update calls.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigurationParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_ip: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration_type_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration_status_id: Option<u64>,
}

impl ApiResource for Configuration {
    const TYPE: &'static str = "configurations";
    const PATH: &'static str = "configurations";

    fn from_resource(resource: Resource) -> Result<Self> {
        Ok(Self {
            id: resource.id,
            attributes: serde_json::from_value(resource.attributes)?,
        })
    }
}

impl Get for Configuration {}

impl List for Configuration {
    const ALLOWED_FILTERS: &'static [&'static str] = &[
        "id",
        "name",
        "organization_id",
        "configuration_type_id",
        "configuration_status_id",
        "serial_number",
    ];
}

impl Create for Configuration {
    type CreateAttributes = ConfigurationParams;
}

impl Update for Configuration {
    type UpdateAttributes = ConfigurationParams;
}
