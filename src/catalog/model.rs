//! Wire schemas for the catalog endpoints and the normalized projections
//! the rest of the pipeline consumes.
//!
//! Schemas are explicit: `title` (and `name` for categories) is required,
//! everything else is optional with a stated default. A body that does not
//! match decodes to a `GatewayError::Decode`, never to silent nulls.

use serde::Deserialize;

/// A story as the search/hot endpoints return it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StoryRecord {
    pub title: String,
    #[serde(default)]
    pub author: Option<AuthorRecord>,
    #[serde(default)]
    pub categories: Vec<CategoryRef>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub chapter_count: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AuthorRecord {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CategoryRef {
    pub name: String,
}

/// A category as the categories endpoint returns it.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CategoryRecord {
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
}

/// Normalized story projection used for grounding. Read-only, discarded
/// after the turn that fetched it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    pub title: String,
    pub author_name: Option<String>,
    pub category_names: Vec<String>,
    pub status: String,
    pub view_count: u64,
    pub chapter_count: u32,
}

impl From<StoryRecord> for CatalogItem {
    fn from(record: StoryRecord) -> Self {
        Self {
            title: record.title,
            author_name: record.author.map(|a| a.name),
            category_names: record.categories.into_iter().map(|c| c.name).collect(),
            status: record.status.unwrap_or_default(),
            view_count: record.view_count,
            chapter_count: record.chapter_count,
        }
    }
}

/// Normalized category projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryItem {
    pub name: String,
    pub slug: Option<String>,
}

impl From<CategoryRecord> for CategoryItem {
    fn from(record: CategoryRecord) -> Self {
        Self {
            name: record.name,
            slug: record.slug,
        }
    }
}
