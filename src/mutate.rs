//! Mutation executor: create, update, and delete against single endpoints.
//!
//! Mutations ride the same per-request retry core as fetches (429 backoff,
//! timeout retry budget) but have no page size to degrade; a timeout that
//! survives the retry budget is terminal.

use reqwest::Method;
use serde::Serialize;

use crate::client::GlueClient;
use crate::document::{Envelope, Resource, SingleDocument};
use crate::error::{GlueError, Result};

impl GlueClient {
    /// POST a new record, serializing `attributes` into the
    /// `{data: {type, attributes}}` wire envelope.
    #[tracing::instrument(skip(self, attributes))]
    pub(crate) async fn create_resource<A: Serialize + Sync>(
        &self,
        path: &str,
        resource_type: &str,
        attributes: &A,
    ) -> Result<Resource> {
        let body = serde_json::to_value(Envelope::new(resource_type, attributes))?;
        let response = self
            .execute(Method::POST, path, &[], Some(&body))
            .await
            .map_err(|f| f.into_error())?;

        Self::into_resource(response, resource_type).await
    }

    /// PATCH an existing record with the same wire envelope.
    #[tracing::instrument(skip(self, attributes))]
    pub(crate) async fn update_resource<A: Serialize + Sync>(
        &self,
        path: &str,
        id: &str,
        resource_type: &str,
        attributes: &A,
    ) -> Result<Resource> {
        let full_path = format!("{path}/{}", urlencoding::encode(id));
        let body = serde_json::to_value(Envelope::new(resource_type, attributes))?;
        let response = self
            .execute(Method::PATCH, &full_path, &[], Some(&body))
            .await
            .map_err(|f| f.into_error())?;

        Self::into_resource(response, resource_type).await
    }

    /// DELETE a record by id.
    #[tracing::instrument(skip(self))]
    pub(crate) async fn delete_resource(&self, path: &str, id: &str) -> Result<()> {
        let full_path = format!("{path}/{}", urlencoding::encode(id));
        self.execute(Method::DELETE, &full_path, &[], None)
            .await
            .map_err(|f| f.into_error())?;
        Ok(())
    }

    /// Unwrap the server's `{data: {...}}` response for a mutation.
    async fn into_resource(response: reqwest::Response, resource_type: &str) -> Result<Resource> {
        let document: SingleDocument = response.json().await.map_err(GlueError::Http)?;
        document.data.ok_or_else(|| GlueError::Unexpected {
            title: Some("Empty mutation response".to_string()),
            detail: Some(format!(
                "server accepted the {resource_type} mutation but returned no record"
            )),
            status_code: None,
        })
    }
}
