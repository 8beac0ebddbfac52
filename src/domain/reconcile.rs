//! Image reference reconciliation
//!
//! Images are referenced from post bodies by their encoded `data_url`, not by
//! id. A reference is any URL captured by the Markdown image pattern
//! `![alt](url)`; an image whose URL is never captured is orphaned.
//! The usage view is looser and counts any mention of the URL.

use crate::domain::{Post, StoredImage};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Regex for Markdown image syntax; the first group is the URL.
/// Lazy and single-line, so an unterminated tag never spans lines.
fn image_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"!\[.*?\]\((.*?)\)").unwrap())
}

/// Collect every image URL referenced from any post body
pub fn compute_used(posts: &[Post]) -> HashSet<&str> {
    let mut used = HashSet::new();
    for post in posts {
        for captures in image_regex().captures_iter(&post.content) {
            if let Some(url) = captures.get(1) {
                used.insert(url.as_str());
            }
        }
    }
    used
}

/// Keep only the images some post still references.
///
/// Order is preserved and the inputs are untouched. Clearing settings that
/// point at dropped images is the caller's job.
pub fn cleanup(posts: &[Post], images: &[StoredImage]) -> Vec<StoredImage> {
    let used = compute_used(posts);
    images
        .iter()
        .filter(|image| used.contains(image.data_url.as_str()))
        .cloned()
        .collect()
}

/// Whether any post body mentions the URL anywhere, inside an image tag
/// or not. Looser than [`compute_used`], so an image shown as in use may
/// still be removed by [`cleanup`].
pub fn is_mentioned(posts: &[Post], data_url: &str) -> bool {
    posts.iter().any(|post| post.content.contains(data_url))
}

/// Used / unreferenced counts for the image manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImageUsage {
    pub used: usize,
    pub unreferenced: usize,
}

pub fn image_usage(posts: &[Post], images: &[StoredImage]) -> ImageUsage {
    let in_use = images
        .iter()
        .filter(|image| is_mentioned(posts, &image.data_url))
        .count();
    ImageUsage {
        used: in_use,
        unreferenced: images.len() - in_use,
    }
}
