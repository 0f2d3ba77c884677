//! Operation traits implemented by entity types.
//!
//! Each API operation is a trait with a provided method that delegates to
//! the engine; an entity type opts into the operations its endpoint
//! supports by implementing the marker portion.

mod create;
mod delete;
mod get;
mod list;
mod update;

pub use create::Create;
pub use delete::Delete;
pub use get::Get;
pub use list::List;
pub use update::Update;

use crate::document::Resource;
use crate::error::Result;

/// An addressable resource type in the API.
///
/// Supplies the endpoint path, the JSON:API `type` string, and the mapping
/// from an opaque wire [`Resource`] into the typed entity.
pub trait ApiResource: Sized + Send {
    /// JSON:API resource type (e.g. `"organizations"`).
    const TYPE: &'static str;

    /// Endpoint path relative to the base URL (e.g. `"organizations"`).
    const PATH: &'static str;

    /// Build the typed entity from a wire record.
    ///
    /// # Errors
    ///
    /// Returns a parse error if the record's attributes do not match the
    /// entity's schema.
    fn from_resource(resource: Resource) -> Result<Self>;
}
