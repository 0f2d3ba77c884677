//! List trait for fetching complete collections.

use async_trait::async_trait;

use crate::client::GlueClient;
use crate::error::Result;
use crate::fetch::Termination;
use crate::filter::Filter;
use crate::traits::ApiResource;

/// List entities with resilient, complete pagination.
///
/// `list_all` drives the paginated fetch engine: a count probe, the page
/// loop with rate-limit backoff and timeout-driven page-size degradation,
/// and a final reconciliation of retrieved records against the server's
/// reported total. Callers get the whole collection in server-send order or
/// a typed error — never a silently truncated result.
///
/// # Example
///
/// ```ignore
/// use gluapi::{Filter, GlueClient, List, Organization};
///
/// let client = GlueClient::from_env()?;
/// let orgs = Organization::list_all(&client, &Filter::new()).await?;
///
/// let filtered = Organization::list_all(
///     &client,
///     &Filter::new().with("name", "Acme"),
/// ).await?;
/// ```
#[async_trait]
pub trait List: ApiResource {
    /// Filter keys the endpoint documents. Anything else in the caller's
    /// filter is dropped before the request goes on the wire.
    const ALLOWED_FILTERS: &'static [&'static str];

    /// Which server signal ends the page loop for this endpoint.
    const TERMINATION: Termination = Termination::TotalCount;

    /// Fetch every entity matching the filter, across all pages.
    ///
    /// # Errors
    ///
    /// Returns an error when any page request fails terminally, when the
    /// page size degrades below the minimum, or when the retrieved count
    /// disagrees with the server's reported total.
    async fn list_all(client: &GlueClient, filter: &Filter) -> Result<Vec<Self>> {
        let resources = client
            .fetch_all(Self::PATH, filter, Self::ALLOWED_FILTERS, Self::TERMINATION)
            .await?;
        resources.into_iter().map(Self::from_resource).collect()
    }
}
