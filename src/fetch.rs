//! Paginated fetch engine and single-resource fetcher.
//!
//! [`GlueClient::fetch_all`] turns one "get everything" call into however
//! many page requests the server needs, surviving rate limits and
//! server-side timeouts, and returns the complete ordered collection or a
//! typed error. Records are appended in arrival order; page N's records
//! always precede page N+1's. The engine never deduplicates — a server that
//! paginates inconsistently is reported by reconciliation, not papered over.

use reqwest::Method;

use crate::client::{GlueClient, RequestFailure};
use crate::document::{ListDocument, Resource, SingleDocument};
use crate::error::{GlueError, Result};
use crate::filter::Filter;
use crate::reconcile;

/// Which server signal ends the page loop for an endpoint.
///
/// Some endpoints report an authoritative `total-count`; others only provide
/// a `next-page` cursor. The applicable signal is declared per endpoint on
/// the [`List`](crate::List) trait rather than inferred at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Probe the total first; stop once that many records are retrieved.
    TotalCount,
    /// Follow `meta."next-page"` until the server stops providing one.
    NextPage,
}

/// Page cursor threaded through the loop.
///
/// Immutable per iteration: each step produces a new state, which keeps the
/// degrade-and-resume arithmetic testable in isolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FetchState {
    /// 1-based page number.
    pub page: u32,
    /// Records requested per page.
    pub page_size: u32,
}

impl FetchState {
    pub(crate) fn start(page_size: u32) -> Self {
        Self { page: 1, page_size }
    }

    /// The state after a page was received.
    pub(crate) fn advance(self) -> Self {
        Self {
            page: self.page + 1,
            ..self
        }
    }

    /// The state after a persistent server-side timeout: half the page size,
    /// positioned so the next request starts right after the `retrieved`
    /// records already held. Returns `None` when the page size cannot shrink
    /// further.
    pub(crate) fn degrade(self, retrieved: usize) -> Option<Self> {
        let page_size = self.page_size / 2;
        if page_size == 0 {
            return None;
        }
        let page = u32::try_from((retrieved / page_size as usize).saturating_add(1))
            .unwrap_or(u32::MAX);
        Some(Self { page, page_size })
    }
}

impl GlueClient {
    /// Retrieve the complete collection behind a list endpoint.
    ///
    /// Drives the count probe, page loop, per-request retry/backoff,
    /// timeout-driven page-size degradation, and final reconciliation
    /// described on [`List::list_all`](crate::List::list_all). The filter is
    /// normalized against `allowed_filters` once, before the loop starts.
    #[tracing::instrument(skip(self, filter, allowed_filters))]
    pub(crate) async fn fetch_all(
        &self,
        path: &str,
        filter: &Filter,
        allowed_filters: &[&str],
        termination: Termination,
    ) -> Result<Vec<Resource>> {
        let filter_params = filter.normalize(allowed_filters);

        let expected = match termination {
            Termination::TotalCount => {
                let total = self.probe_total(path, &filter_params).await?;
                if total == 0 {
                    tracing::debug!("server reports zero matching records");
                    return Ok(Vec::new());
                }
                Some(total)
            }
            Termination::NextPage => None,
        };

        let mut records: Vec<Resource> = Vec::new();
        let mut state = FetchState::start(self.policy().page_size);
        // Cursor endpoints may still report a total on their final page;
        // reconcile against it when they do.
        let mut reported_total = expected;

        loop {
            if let Some(total) = expected {
                if records.len() as u64 >= total {
                    break;
                }
            }

            match self.get_page(path, &filter_params, state).await {
                Ok(document) => {
                    let received = document.data.len();
                    tracing::debug!(
                        page = state.page,
                        page_size = state.page_size,
                        received,
                        "page received"
                    );
                    records.extend(document.data);
                    if document.meta.total_count.is_some() {
                        reported_total = document.meta.total_count;
                    }

                    match termination {
                        Termination::NextPage => {
                            // An empty page is terminal even if the server
                            // still advertises a cursor; following it could
                            // loop forever.
                            if document.meta.next_page.is_none() || received == 0 {
                                break;
                            }
                        }
                        Termination::TotalCount => {
                            // An empty page before the total is reached means
                            // the server cannot deliver what it promised;
                            // reconciliation reports the undercount.
                            if received == 0 {
                                break;
                            }
                        }
                    }
                    state = state.advance();
                }
                Err(RequestFailure::TimedOut { .. }) => {
                    state = state
                        .degrade(records.len())
                        .ok_or(GlueError::PageSizeExhausted)?;
                    tracing::warn!(
                        page = state.page,
                        page_size = state.page_size,
                        retrieved = records.len(),
                        "server kept timing out; resuming with halved page size"
                    );
                }
                Err(RequestFailure::Terminal(err)) => return Err(err),
            }
        }

        if let Some(expected) = reported_total {
            reconcile::reconcile(records.len(), expected).into_result()?;
        }
        Ok(records)
    }

    /// Fetch exactly one record by id.
    ///
    /// Same retry/backoff policy as every other request, no pagination and
    /// no reconciliation. A response without a record, or an HTTP 404, is
    /// [`GlueError::NotFound`] — distinct from transport or server errors.
    #[tracing::instrument(skip(self))]
    pub(crate) async fn fetch_one(
        &self,
        path: &str,
        id: &str,
        entity_type: &'static str,
    ) -> Result<Resource> {
        let full_path = format!("{path}/{}", urlencoding::encode(id));

        let response = self
            .execute(Method::GET, &full_path, &[], None)
            .await
            .map_err(|failure| match failure {
                RequestFailure::Terminal(GlueError::Unexpected {
                    status_code: Some(404),
                    ..
                }) => GlueError::NotFound {
                    entity_type,
                    id: id.to_string(),
                },
                other => other.into_error(),
            })?;

        let document: SingleDocument = response.json().await.map_err(GlueError::Http)?;
        document.data.ok_or(GlueError::NotFound {
            entity_type,
            id: id.to_string(),
        })
    }

    /// Minimal request to learn the collection's total from response meta.
    async fn probe_total(&self, path: &str, filter_params: &[(String, String)]) -> Result<u64> {
        let probe = FetchState::start(1);
        match self.get_page(path, filter_params, probe).await {
            Ok(document) => document.meta.total_count.ok_or_else(|| GlueError::Unexpected {
                title: Some("Missing total-count".to_string()),
                detail: Some(
                    "list response meta did not include total-count; \
                     endpoint may require cursor termination"
                        .to_string(),
                ),
                status_code: None,
            }),
            // The probe already runs at the minimum page size; there is
            // nothing left to halve.
            Err(RequestFailure::TimedOut { .. }) => Err(GlueError::PageSizeExhausted),
            Err(RequestFailure::Terminal(err)) => Err(err),
        }
    }

    /// Request one page through the retry core.
    async fn get_page(
        &self,
        path: &str,
        filter_params: &[(String, String)],
        state: FetchState,
    ) -> std::result::Result<ListDocument, RequestFailure> {
        let mut query = vec![
            ("page[size]".to_string(), state.page_size.to_string()),
            ("page[number]".to_string(), state.page.to_string()),
        ];
        query.extend(filter_params.iter().cloned());

        let response = self.execute(Method::GET, path, &query, None).await?;
        response
            .json::<ListDocument>()
            .await
            .map_err(|e| RequestFailure::Terminal(GlueError::Http(e)))
    }
}
