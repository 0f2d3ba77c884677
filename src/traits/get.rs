//! Get trait for fetching single entities.

use async_trait::async_trait;

use crate::client::GlueClient;
use crate::error::Result;
use crate::traits::ApiResource;

/// Fetch a single entity by id.
///
/// # Example
///
/// ```ignore
/// use gluapi::{Get, GlueClient, Organization};
///
/// let client = GlueClient::from_env()?;
/// let org = Organization::get(&client, "42").await?;
/// ```
#[async_trait]
pub trait Get: ApiResource {
    /// Fetch the entity by id.
    ///
    /// Uses the same retry/backoff policy as paginated fetches, without
    /// pagination or reconciliation.
    ///
    /// # Errors
    ///
    /// Returns [`GlueError::NotFound`](crate::GlueError::NotFound) when the
    /// server has no such record, or another error when the request fails.
    async fn get(client: &GlueClient, id: &str) -> Result<Self> {
        let resource = client.fetch_one(Self::PATH, id, Self::TYPE).await?;
        Self::from_resource(resource)
    }
}
