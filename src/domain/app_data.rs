//! Blog aggregate root

use crate::domain::{AppSettings, Category, Post, StoredImage};
use serde::{Deserialize, Serialize};

const WELCOME_CONTENT: &str = "# 欢迎来到 RoseTint\n\n这是一个支持 **Markdown** 的复古风格博客。\n\n点击标题即可开始编辑！\n\n支持图片上传、实时预览和暗色模式。";

/// Everything the blog persists, stored and loaded as one unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppData {
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub images: Vec<StoredImage>,
    pub settings: AppSettings,
}

impl AppData {
    /// The dataset written on first run
    pub fn initial(now: i64) -> Self {
        AppData {
            posts: vec![Post {
                id: "1".to_string(),
                title: "你好，世界".to_string(),
                content: WELCOME_CONTENT.to_string(),
                category_id: "general".to_string(),
                created_at: now,
                updated_at: now,
            }],
            categories: vec![
                Category::new("general".to_string(), "默认分类".to_string()),
                Category::new("tech".to_string(), "技术笔记".to_string()),
                Category::new("life".to_string(), "生活随想".to_string()),
            ],
            images: Vec::new(),
            settings: AppSettings::default(),
        }
    }

    pub fn post(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn image(&self, id: &str) -> Option<&StoredImage> {
        self.images.iter().find(|i| i.id == id)
    }

    /// Name of the post's category; `None` when the id dangles
    pub fn category_name(&self, post: &Post) -> Option<&str> {
        self.category(&post.category_id).map(|c| c.name.as_str())
    }

    /// Number of posts filed under a category
    pub fn post_count(&self, category_id: &str) -> usize {
        self.posts
            .iter()
            .filter(|p| p.category_id == category_id)
            .count()
    }

    /// Background image, if the setting resolves
    pub fn background_image(&self) -> Option<&StoredImage> {
        self.settings
            .background_image_id
            .as_deref()
            .and_then(|id| self.image(id))
    }

    /// Lock-screen image, falling back to the background image
    pub fn lock_screen_image(&self) -> Option<&StoredImage> {
        self.settings
            .lock_screen_image_id
            .as_deref()
            .and_then(|id| self.image(id))
            .or_else(|| self.background_image())
    }

    /// Category for a new post: the requested one, else the first, else
    /// the fallback id
    pub fn default_category_id(&self, requested: Option<&str>) -> String {
        requested
            .map(str::to_string)
            .or_else(|| self.categories.first().map(|c| c.id.clone()))
            .unwrap_or_else(|| crate::domain::post::FALLBACK_CATEGORY_ID.to_string())
    }
}
