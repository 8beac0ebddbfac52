//! State transitions over the aggregate root
//!
//! Every mutation is an [`Action`] applied to a snapshot, producing the next
//! snapshot. Snapshots are never modified in place.

use crate::domain::reconcile;
use crate::domain::{AppData, Category, CustomLabels, FontTarget, Post, StoredImage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Prepend an empty draft
    CreatePost {
        id: String,
        title: String,
        category_id: String,
        now: i64,
    },
    /// Replace the post carrying the same id
    SavePost(Post),
    /// Append a category unless one with the same name exists
    AddCategory { id: String, name: String },
    RenameCategory { id: String, name: String },
    AddImage(StoredImage),
    SetBackgroundImage(Option<String>),
    SetLockScreenImage(Option<String>),
    SetLabels(CustomLabels),
    SetFontSize { target: FontTarget, size: u32 },
    /// Drop unreferenced images and clear settings that pointed at them
    CleanupImages,
}

impl AppData {
    /// Apply an action, returning the next snapshot
    pub fn apply(&self, action: Action) -> AppData {
        let mut next = self.clone();

        match action {
            Action::CreatePost {
                id,
                title,
                category_id,
                now,
            } => {
                next.posts
                    .insert(0, Post::draft(id, title, category_id, now));
            }
            Action::SavePost(post) => {
                if let Some(slot) = next.posts.iter_mut().find(|p| p.id == post.id) {
                    *slot = post;
                }
            }
            Action::AddCategory { id, name } => {
                if crate::domain::post::find_by_name(&next.categories, &name).is_none() {
                    next.categories.push(Category::new(id, name));
                }
            }
            Action::RenameCategory { id, name } => {
                if let Some(slot) = next.categories.iter_mut().find(|c| c.id == id) {
                    slot.name = name;
                }
            }
            Action::AddImage(image) => next.images.push(image),
            Action::SetBackgroundImage(id) => next.settings.background_image_id = id,
            Action::SetLockScreenImage(id) => next.settings.lock_screen_image_id = id,
            Action::SetLabels(labels) => next.settings.labels = labels,
            Action::SetFontSize { target, size } => match target {
                FontTarget::Editor => next.settings.editor_font_size = size,
                FontTarget::Preview => next.settings.preview_font_size = size,
            },
            Action::CleanupImages => {
                next.images = reconcile::cleanup(&next.posts, &next.images);
                clear_dangling_image_ids(&mut next);
            }
        }

        next
    }
}

fn clear_dangling_image_ids(data: &mut AppData) {
    let retained = |id: &Option<String>| {
        id.as_deref()
            .map(|id| data.images.iter().any(|i| i.id == id))
            .unwrap_or(true)
    };

    let keep_background = retained(&data.settings.background_image_id);
    let keep_lock = retained(&data.settings.lock_screen_image_id);

    if !keep_background {
        data.settings.background_image_id = None;
    }
    if !keep_lock {
        data.settings.lock_screen_image_id = None;
    }
}
