//! Application settings and user-overridable UI labels

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Font size applied when none is stored, in percent
pub const DEFAULT_FONT_SIZE: u32 = 100;
/// Smallest and largest font size percentages
pub const MIN_FONT_SIZE: u32 = 50;
pub const MAX_FONT_SIZE: u32 = 200;

/// UI strings the author can override.
///
/// Keys missing from a stored record fall back to their default text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomLabels {
    pub blog_title: String,
    pub blog_subtitle: String,
    pub all_articles: String,
    pub untitled_draft: String,
    pub search_placeholder: String,
    pub new_post_button: String,
    pub file_manager_button: String,
    pub lock_screen_text: String,
    pub edit_placeholder: String,
    pub click_to_edit: String,
}

impl Default for CustomLabels {
    fn default() -> Self {
        CustomLabels {
            blog_title: "RoseTint".to_string(),
            blog_subtitle: "复古版".to_string(),
            all_articles: "所有文章".to_string(),
            untitled_draft: "未命名草稿".to_string(),
            search_placeholder: "搜索文章...".to_string(),
            new_post_button: "新建文章".to_string(),
            file_manager_button: "资源管理器".to_string(),
            lock_screen_text: "按任意键解锁".to_string(),
            edit_placeholder: "开始创作...".to_string(),
            click_to_edit: "双击此处开始编辑文章...".to_string(),
        }
    }
}

impl CustomLabels {
    /// Stored key names, in display order
    pub const KEYS: [&'static str; 10] = [
        "blogTitle",
        "blogSubtitle",
        "allArticles",
        "untitledDraft",
        "searchPlaceholder",
        "newPostButton",
        "fileManagerButton",
        "lockScreenText",
        "editPlaceholder",
        "clickToEdit",
    ];

    /// Look up a label by its stored key name
    pub fn get(&self, key: &str) -> Option<&str> {
        let value = match key {
            "blogTitle" => &self.blog_title,
            "blogSubtitle" => &self.blog_subtitle,
            "allArticles" => &self.all_articles,
            "untitledDraft" => &self.untitled_draft,
            "searchPlaceholder" => &self.search_placeholder,
            "newPostButton" => &self.new_post_button,
            "fileManagerButton" => &self.file_manager_button,
            "lockScreenText" => &self.lock_screen_text,
            "editPlaceholder" => &self.edit_placeholder,
            "clickToEdit" => &self.click_to_edit,
            _ => return None,
        };
        Some(value.as_str())
    }

    /// Return a copy with one label replaced, or `None` for an unknown key
    pub fn with(&self, key: &str, value: &str) -> Option<Self> {
        let mut labels = self.clone();
        let slot = match key {
            "blogTitle" => &mut labels.blog_title,
            "blogSubtitle" => &mut labels.blog_subtitle,
            "allArticles" => &mut labels.all_articles,
            "untitledDraft" => &mut labels.untitled_draft,
            "searchPlaceholder" => &mut labels.search_placeholder,
            "newPostButton" => &mut labels.new_post_button,
            "fileManagerButton" => &mut labels.file_manager_button,
            "lockScreenText" => &mut labels.lock_screen_text,
            "editPlaceholder" => &mut labels.edit_placeholder,
            "clickToEdit" => &mut labels.click_to_edit,
            _ => return None,
        };
        *slot = value.to_string();
        Some(labels)
    }
}

/// Which pane a font size applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontTarget {
    Editor,
    Preview,
}

impl FontTarget {
    /// Stored key of the matching settings field
    pub fn key(&self) -> &'static str {
        match self {
            FontTarget::Editor => "editorFontSize",
            FontTarget::Preview => "previewFontSize",
        }
    }
}

impl FromStr for FontTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "editor" | "editorFontSize" => Ok(FontTarget::Editor),
            "preview" | "previewFontSize" => Ok(FontTarget::Preview),
            _ => Err(format!(
                "Invalid font target: {}. Valid targets: editor, preview",
                s
            )),
        }
    }
}

/// Per-user application settings.
///
/// Image ids are weak references into the image list; an id with no
/// matching image resolves to "no image".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    pub background_image_id: Option<String>,
    pub lock_screen_image_id: Option<String>,
    pub labels: CustomLabels,
    pub editor_font_size: u32,
    pub preview_font_size: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            background_image_id: None,
            lock_screen_image_id: None,
            labels: CustomLabels::default(),
            editor_font_size: DEFAULT_FONT_SIZE,
            preview_font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl AppSettings {
    pub fn font_size(&self, target: FontTarget) -> u32 {
        match target {
            FontTarget::Editor => self.editor_font_size,
            FontTarget::Preview => self.preview_font_size,
        }
    }
}
