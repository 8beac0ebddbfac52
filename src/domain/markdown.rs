//! Markdown rendering, table of contents and list previews

use pulldown_cmark::{html, Event, Options, Parser, Tag, TagEnd};
use regex::Regex;
use std::sync::OnceLock;

const PREVIEW_LEN: usize = 150;

/// Regex for ATX headings of level 1-3 on a single line
fn heading_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^(#{1,3})\s+(.*)$").unwrap())
}

/// Runs of characters that do not survive into an anchor id
fn slug_separator_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"[^a-z0-9\x{4e00}-\x{9fa5}]+").unwrap())
}

fn image_tag_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"!\[.*?\]\(.*?\)").unwrap())
}

fn formatting_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"[#*`]").unwrap())
}

/// Anchor id for a heading: lowercase, everything outside ASCII
/// alphanumerics and CJK ideographs collapsed to `-`
pub fn slugify(text: &str) -> String {
    slug_separator_regex()
        .replace_all(&text.to_lowercase(), "-")
        .into_owned()
}

/// One entry in a post's table of contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub level: usize,
    pub text: String,
    pub id: String,
}

/// Build the table of contents from `#`, `##` and `###` lines
pub fn table_of_contents(markdown: &str) -> Vec<TocEntry> {
    markdown
        .lines()
        .filter_map(|line| {
            let captures = heading_regex().captures(line)?;
            let text = captures[2].to_string();
            Some(TocEntry {
                level: captures[1].len(),
                id: slugify(&text),
                text,
            })
        })
        .collect()
}

/// Short plain-text preview for list views
pub fn preview(markdown: &str) -> String {
    let without_images = image_tag_regex().replace_all(markdown, "");
    let plain = formatting_regex().replace_all(&without_images, "");
    let mut out: String = plain.chars().take(PREVIEW_LEN).collect();
    out.push_str("...");
    out
}

/// Render Markdown to an HTML fragment.
///
/// Headings without an explicit id get one from [`slugify`] so the table
/// of contents can link to them.
pub fn render_html(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;

    let mut events: Vec<Event> = Vec::new();
    let mut heading_start: Option<usize> = None;
    let mut heading_text = String::new();

    for event in Parser::new_ext(markdown, options) {
        match &event {
            Event::Start(Tag::Heading { .. }) => {
                heading_start = Some(events.len());
                heading_text.clear();
            }
            Event::Text(text) | Event::Code(text) if heading_start.is_some() => {
                heading_text.push_str(text);
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(index) = heading_start.take() {
                    if let Some(Event::Start(Tag::Heading { id, .. })) = events.get_mut(index) {
                        if id.is_none() {
                            *id = Some(slugify(&heading_text).into());
                        }
                    }
                }
            }
            _ => {}
        }
        events.push(event);
    }

    let mut output = String::new();
    html::push_html(&mut output, events.into_iter());
    output
}
