//! Delete trait for removing entities.

use async_trait::async_trait;

use crate::client::GlueClient;
use crate::error::Result;
use crate::traits::ApiResource;

/// Delete an entity by id.
#[async_trait]
pub trait Delete: ApiResource {
    /// Delete the entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails. Deleting an id the server does
    /// not know is whatever the server says it is, typically a 404 surfaced
    /// as [`GlueError::Unexpected`](crate::GlueError::Unexpected).
    async fn delete(client: &GlueClient, id: &str) -> Result<()> {
        client.delete_resource(Self::PATH, id).await
    }
}
