//! Output formatting utilities

use crate::application::{CategorySummary, CleanupReport, ImageEntry};
use crate::domain::markdown::{preview, TocEntry};
use crate::domain::reconcile::ImageUsage;
use crate::domain::{AppData, Post};
use chrono::{DateTime, Utc};

fn format_timestamp(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Format a list of posts for display
pub fn format_post_list(posts: &[&Post], data: &AppData) -> String {
    if posts.is_empty() {
        return "No posts found".to_string();
    }

    let mut output = String::new();
    for post in posts {
        output.push_str(&format!(
            "{}  {}  {}  [{}]\n",
            post.id,
            format_timestamp(post.created_at),
            post.title,
            data.category_name(post).unwrap_or("uncategorized")
        ));
        let summary = preview(&post.content).replace('\n', " ");
        output.push_str(&format!("    {}\n", summary.trim()));
    }
    output
}

/// Format categories with their post counts
pub fn format_category_list(categories: &[CategorySummary]) -> String {
    if categories.is_empty() {
        return "No categories found".to_string();
    }

    let mut output = String::new();
    for summary in categories {
        output.push_str(&format!(
            "{}  {} ({})\n",
            summary.category.id, summary.category.name, summary.post_count
        ));
    }
    output
}

/// Format the image library with usage markers
pub fn format_image_list(images: &[ImageEntry], usage: ImageUsage) -> String {
    if images.is_empty() {
        return "No images found".to_string();
    }

    let mut output = String::new();
    for entry in images {
        output.push_str(&format!(
            "{}  {}  {}  {}\n",
            entry.image.id,
            if entry.used { "used  " } else { "unused" },
            format_timestamp(entry.image.created_at),
            entry.image.name
        ));
    }
    output.push_str(&format!(
        "{} used, {} unreferenced\n",
        usage.used, usage.unreferenced
    ));
    output
}

pub fn format_cleanup_report(report: &CleanupReport) -> String {
    if report.removed.is_empty() {
        return "No unreferenced images".to_string();
    }

    let mut output = format!("Removed {} image(s):\n", report.removed.len());
    for image in &report.removed {
        output.push_str(&format!("  {}  {}\n", image.id, image.name));
    }
    if report.cleared_background {
        output.push_str("Background image cleared\n");
    }
    if report.cleared_lock_screen {
        output.push_str("Lock-screen image cleared\n");
    }
    output
}

pub fn format_settings(entries: &[(String, String)]) -> String {
    let mut output = String::new();
    for (key, value) in entries {
        output.push_str(&format!("{} = {}\n", key, value));
    }
    output
}

/// Format a table of contents, indented by heading level
pub fn format_toc(entries: &[TocEntry]) -> String {
    if entries.is_empty() {
        return "No headings found".to_string();
    }

    let mut output = String::new();
    for entry in entries {
        let indent = "  ".repeat(entry.level.saturating_sub(1));
        output.push_str(&format!("{}{}  #{}\n", indent, entry.text, entry.id));
    }
    output
}
