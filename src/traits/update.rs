//! Update trait for modifying entities.

use async_trait::async_trait;
use serde::Serialize;

use crate::client::GlueClient;
use crate::error::Result;
use crate::traits::ApiResource;

/// Update an existing entity via PATCH.
///
/// # Example
///
/// ```ignore
/// use gluapi::{GlueClient, Organization, OrganizationParams, Update};
///
/// let client = GlueClient::from_env()?;
/// let updated = Organization::update(
///     &client,
///     "42",
///     &OrganizationParams {
///         name: Some("Acme Corp".into()),
///         ..Default::default()
///     },
/// ).await?;
/// ```
#[async_trait]
pub trait Update: ApiResource {
    /// Attribute payload accepted by the update endpoint.
    type UpdateAttributes: Serialize + Send + Sync;

    /// Update the entity and return the server's updated record.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found or the request fails.
    async fn update(
        client: &GlueClient,
        id: &str,
        attributes: &Self::UpdateAttributes,
    ) -> Result<Self> {
        let resource = client
            .update_resource(Self::PATH, id, Self::TYPE, attributes)
            .await?;
        Self::from_resource(resource)
    }
}
