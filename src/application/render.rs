//! Render posts for reading

use crate::domain::markdown::{render_html, table_of_contents, TocEntry};
use crate::domain::{AppData, Post};

/// Render a post as a standalone HTML page, sized by the preview font
/// setting and headed by its title and category
pub fn render_post_page(data: &AppData, post: &Post) -> String {
    let category = data
        .category_name(post)
        .unwrap_or("uncategorized");

    format!(
        "<!DOCTYPE html>\n\
        <html>\n\
        <head>\n\
        <meta charset=\"utf-8\">\n\
        <title>{title} - {blog}</title>\n\
        </head>\n\
        <body>\n\
        <article class=\"markdown-body\" style=\"font-size: {size}%\">\n\
        <h1>{title}</h1>\n\
        <p class=\"category\">{category}</p>\n\
        {body}\
        </article>\n\
        </body>\n\
        </html>\n",
        title = escape_html(&post.title),
        blog = escape_html(&data.settings.labels.blog_title),
        size = data.settings.preview_font_size,
        category = escape_html(category),
        body = render_html(&post.content),
    )
}

/// Table of contents for a post
pub fn post_toc(post: &Post) -> Vec<TocEntry> {
    table_of_contents(&post.content)
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
