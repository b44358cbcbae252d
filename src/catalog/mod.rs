//! Catalog access — typed read-only client for the story backend.
//!
//! The assistant only ever reads three things from the catalog: keyword
//! search results, the hot list, and the category list. Everything else the
//! backend serves belongs to the reading screens, not to us.

mod gateway;
mod model;

pub use gateway::CatalogGateway;
pub use model::{CatalogItem, CategoryItem};

use async_trait::async_trait;

use crate::error::GatewayError;

/// The catalog operations the assistant may invoke for grounding.
///
/// Implementations are stateless and safe to share across sessions.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Search stories by keyword. A blank keyword is the caller's
    /// precondition to guard; the provider performs the call as given.
    async fn search_stories(&self, keyword: &str) -> Result<Vec<CatalogItem>, GatewayError>;

    /// Fetch the current hot list, in server-defined order.
    async fn trending_stories(&self) -> Result<Vec<CatalogItem>, GatewayError>;

    /// List all story categories.
    async fn list_categories(&self) -> Result<Vec<CategoryItem>, GatewayError>;
}
