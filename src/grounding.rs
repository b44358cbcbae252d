//! Context formatting — turns raw catalog results into compact grounding
//! text for the completion prompt.
//!
//! The formatter never re-sorts: item order is the server's relevance or
//! recency order. An empty result set must still produce text — the
//! `NO RESULTS` sentinel is what keeps the model from inventing titles when
//! the catalog had nothing to say.

use crate::catalog::{CatalogItem, CategoryItem};
use crate::intent::Intent;

/// Most stories ever rendered into one grounding block.
const MAX_STORY_ITEMS: usize = 5;

/// Most categories ever rendered into one grounding block.
const MAX_CATEGORY_ITEMS: usize = 8;

/// Literal marker appended to a block title when the catalog returned
/// nothing. Downstream prompt rules reference this exact string.
const NO_RESULTS_MARKER: &str = "NO RESULTS";

/// Formatted grounding text plus whether any real data backs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroundingBlock {
    pub text: String,
    pub has_data: bool,
}

/// Render story items (search / hot / author results) into a grounding block.
pub fn format_stories(intent: &Intent, items: &[CatalogItem]) -> GroundingBlock {
    let title = story_block_title(intent);

    if items.is_empty() {
        return GroundingBlock {
            text: format!("{title}: {NO_RESULTS_MARKER}"),
            has_data: false,
        };
    }

    let mut text = format!("{title}:\n");
    for item in items.iter().take(MAX_STORY_ITEMS) {
        text.push_str(&render_story(item));
        text.push('\n');
    }

    GroundingBlock {
        text: text.trim_end().to_string(),
        has_data: true,
    }
}

/// Render the category list into a grounding block.
pub fn format_categories(items: &[CategoryItem]) -> GroundingBlock {
    let title = "DANH SÁCH THỂ LOẠI";

    if items.is_empty() {
        return GroundingBlock {
            text: format!("{title}: {NO_RESULTS_MARKER}"),
            has_data: false,
        };
    }

    let mut text = format!("{title}:\n");
    for item in items.iter().take(MAX_CATEGORY_ITEMS) {
        match &item.slug {
            Some(slug) => text.push_str(&format!("- {} ({slug})\n", item.name)),
            None => text.push_str(&format!("- {}\n", item.name)),
        }
    }

    GroundingBlock {
        text: text.trim_end().to_string(),
        has_data: true,
    }
}

fn story_block_title(intent: &Intent) -> String {
    match intent {
        Intent::Search { keyword } => format!("KẾT QUẢ TÌM KIẾM \"{keyword}\""),
        Intent::Trending => "TRUYỆN ĐANG HOT".to_string(),
        Intent::Author { query } => format!("TRUYỆN CỦA TÁC GIẢ \"{query}\""),
        _ => "DỮ LIỆU TRUYỆN".to_string(),
    }
}

/// Fixed per-item template. Field fallbacks are literals so the model sees
/// a consistent shape for every item.
fn render_story(item: &CatalogItem) -> String {
    let author = item.author_name.as_deref().unwrap_or("Unknown");
    let categories = if item.category_names.is_empty() {
        "Uncategorized".to_string()
    } else {
        item.category_names.join(", ")
    };
    let status_glyph = if item.status == "COMPLETED" {
        "✅ hoàn thành"
    } else {
        "✍️ đang ra"
    };

    format!(
        "- {} | tác giả: {author} | thể loại: {categories} | {status_glyph} | {} lượt đọc | {} chương",
        item.title, item.view_count, item.chapter_count
    )
}
