//! Stored image assets

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// An image kept inline in the aggregate.
///
/// `data_url` is what post bodies reference, so it doubles as the key the
/// reconciler matches against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredImage {
    pub id: String,
    pub data_url: String,
    pub name: String,
    pub created_at: i64,
}

impl StoredImage {
    pub fn new(id: String, data_url: String, name: String, created_at: i64) -> Self {
        StoredImage {
            id,
            data_url,
            name,
            created_at,
        }
    }
}

/// Guess a MIME type from a file extension
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("bmp") => "image/bmp",
        Some("avif") => "image/avif",
        _ => "application/octet-stream",
    }
}

/// Whether a path looks like an image we know how to embed
pub fn is_image_path(path: &Path) -> bool {
    mime_for_path(path).starts_with("image/")
}

/// Encode raw bytes as a `data:` URL
pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}
