//! Posts and categories

use serde::{Deserialize, Serialize};

/// Category assigned to new posts when no other category exists
pub const FALLBACK_CATEGORY_ID: &str = "general";

/// A blog post with a Markdown body.
///
/// Timestamps are epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category_id: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Post {
    /// Create an empty draft
    pub fn draft(id: String, title: String, category_id: String, now: i64) -> Self {
        Post {
            id,
            title,
            content: String::new(),
            category_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Append a Markdown image reference pointing at `url`
    pub fn with_image(&self, url: &str, now: i64) -> Self {
        Post {
            content: format!("{}\n![Image]({})\n", self.content, url),
            updated_at: now,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

impl Category {
    pub fn new(id: String, name: String) -> Self {
        Category { id, name }
    }

    /// Names are compared case-insensitively
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// Find a category by name (case-insensitive)
pub fn find_by_name<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
    categories.iter().find(|c| c.has_name(name))
}
