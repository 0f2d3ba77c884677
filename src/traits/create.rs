//! Create trait for posting new entities.

use async_trait::async_trait;
use serde::Serialize;

use crate::client::GlueClient;
use crate::error::Result;
use crate::traits::ApiResource;

/// Create a new entity.
///
/// The attributes are serialized into the `{data: {type, attributes}}` wire
/// envelope; the request goes through the same retry/backoff policy as every
/// other call.
#[async_trait]
pub trait Create: ApiResource {
    /// Attribute payload accepted by the create endpoint.
    type CreateAttributes: Serialize + Send + Sync;

    /// Create the entity and return the server's record of it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns no
    /// record.
    async fn create(client: &GlueClient, attributes: &Self::CreateAttributes) -> Result<Self> {
        let resource = client
            .create_resource(Self::PATH, Self::TYPE, attributes)
            .await?;
        Self::from_resource(resource)
    }
}
