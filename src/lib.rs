//! IT Glue API client library.
//!
//! A Rust library for IT Glue-style IT-documentation REST APIs (JSON:API
//! envelopes, per-tenant rate limiting). The heart of the crate is a
//! resilient paginated-fetch engine: one `list_all` call becomes however
//! many page requests the server needs, surviving HTTP 429 rate limits and
//! server-side timeouts (by halving the page size and resuming in place),
//! and returns a complete, ordered collection — or a typed error, never a
//! silently truncated result.
//!
//! # Quick Start
//!
//! ```no_run
//! use gluapi::{Filter, Get, GlueClient, List, Organization};
//!
//! #[tokio::main]
//! async fn main() -> gluapi::Result<()> {
//!     // Create client from environment variables
//!     let client = GlueClient::from_env()?;
//!
//!     // Get an organization by id
//!     let org = Organization::get(&client, "42").await?;
//!     println!("Organization: {}", org.attributes.name);
//!
//!     // List every organization, across all pages
//!     let orgs = Organization::list_all(&client, &Filter::new()).await?;
//!     println!("Found {} organizations", orgs.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! The library is organized around operation traits that entity types
//! implement:
//!
//! - [`Get`] - Fetch a single entity by id
//! - [`List`] - Fetch the complete collection behind a paginated endpoint
//! - [`Create`] / [`Update`] / [`Delete`] - Mutations
//!
//! All operations funnel through one retry core: 429 responses back off and
//! retry up to a configurable ceiling, server-reported timeouts retry up to
//! a budget (paginated fetches then degrade the page size), and anything
//! else fails fast with a typed [`GlueError`]. After a paginated fetch, the
//! retrieved count is reconciled against the server's reported total and a
//! mismatch is an error.
//!
//! Each operation is a sequential state machine over its own cursor and
//! collection; independent operations can run concurrently without shared
//! state. Dropping an operation's future cancels it, including mid-backoff.
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `GLUE_API_KEY` (required) - Your API key
//! - `GLUE_API_URL` (optional) - Base URL (defaults to `https://api.itglue.com`)
//!
//! Retry behavior is tuned via [`RetryPolicy`]:
//!
//! ```no_run
//! use std::time::Duration;
//! use gluapi::{GlueClient, RetryPolicy};
//!
//! # fn example() -> gluapi::Result<()> {
//! let client = GlueClient::from_env()?.with_policy(RetryPolicy {
//!     page_size: 500,
//!     rate_limit_backoff: Duration::from_secs(30),
//!     ..Default::default()
//! });
//! # Ok(())
//! # }
//! ```

mod auth;
mod client;
mod document;
mod error;
mod fetch;
mod filter;
mod models;
mod mutate;
mod reconcile;
mod traits;

// Re-export core types
pub use auth::Credential;
pub use client::{GlueClient, RetryPolicy};
pub use document::{Meta, Resource};
pub use error::{AuthFailure, GlueError, Result};
pub use fetch::Termination;
pub use filter::Filter;
pub use reconcile::{reconcile, Outcome};

// Re-export traits
pub use traits::{ApiResource, Create, Delete, Get, List, Update};

// Re-export models
pub use models::{
    Configuration,
    ConfigurationAttributes,
    ConfigurationParams,
    Organization,
    OrganizationAttributes,
    OrganizationParams,
};
