//! Post use cases

use crate::application::Session;
use crate::domain::{generate_id, Action, Post, PostQuery};
use crate::error::{RosetintError, Result};
use crate::infrastructure::{EditorSession, KeyValueStore};
use chrono::Utc;
use std::path::Path;

/// Changes to apply to a post; `None` leaves a field as it is
#[derive(Debug, Clone, Default)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category_id: Option<String>,
}

impl PostUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.category_id.is_none()
    }
}

/// Service for creating, listing and editing posts
pub struct PostService<S> {
    session: Session<S>,
}

impl<S: KeyValueStore> PostService<S> {
    pub fn new(session: Session<S>) -> Self {
        PostService { session }
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    /// Create an empty draft titled with the "untitled" label, or `title`
    pub fn create(&mut self, category_id: Option<&str>, title: Option<&str>) -> Result<Post> {
        let data = self.session.data();
        if let Some(id) = category_id {
            if data.category(id).is_none() {
                return Err(RosetintError::CategoryNotFound(id.to_string()));
            }
        }

        let id = generate_id();
        let action = Action::CreatePost {
            id: id.clone(),
            title: title
                .map(str::to_string)
                .unwrap_or_else(|| data.settings.labels.untitled_draft.clone()),
            category_id: data.default_category_id(category_id),
            now: Utc::now().timestamp_millis(),
        };

        let data = self.session.dispatch(action)?;
        data.post(&id)
            .cloned()
            .ok_or(RosetintError::PostNotFound(id))
    }

    pub fn list(&self, query: &PostQuery) -> Vec<&Post> {
        query.apply(&self.session.data().posts)
    }

    pub fn get(&self, id: &str) -> Result<&Post> {
        self.session
            .data()
            .post(id)
            .ok_or_else(|| RosetintError::PostNotFound(id.to_string()))
    }

    /// Apply field changes and bump `updatedAt`
    pub fn update(&mut self, id: &str, update: PostUpdate) -> Result<Post> {
        if let Some(category_id) = &update.category_id {
            if self.session.data().category(category_id).is_none() {
                return Err(RosetintError::CategoryNotFound(category_id.clone()));
            }
        }

        let current = self.get(id)?;
        let post = Post {
            title: update.title.unwrap_or_else(|| current.title.clone()),
            content: update.content.unwrap_or_else(|| current.content.clone()),
            category_id: update
                .category_id
                .unwrap_or_else(|| current.category_id.clone()),
            updated_at: Utc::now().timestamp_millis(),
            ..current.clone()
        };

        self.session.dispatch(Action::SavePost(post.clone()))?;
        Ok(post)
    }

    /// Append a reference to a stored image at the end of the post body
    pub fn insert_image(&mut self, post_id: &str, image_id: &str) -> Result<Post> {
        let image = self
            .session
            .data()
            .image(image_id)
            .ok_or_else(|| RosetintError::ImageNotFound(image_id.to_string()))?;
        let post = self
            .get(post_id)?
            .with_image(&image.data_url, Utc::now().timestamp_millis());

        self.session.dispatch(Action::SavePost(post.clone()))?;
        Ok(post)
    }

    /// Edit the body in an external editor. Unchanged text is not saved.
    pub fn edit_content(
        &mut self,
        id: &str,
        editor: &EditorSession,
        scratch_dir: &Path,
    ) -> Result<Option<Post>> {
        let current = self.get(id)?.content.clone();
        let edited = editor.edit(scratch_dir, id, &current)?;

        if edited == current {
            return Ok(None);
        }

        self.update(
            id,
            PostUpdate {
                content: Some(edited),
                ..Default::default()
            },
        )
        .map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{DataStore, MemoryStore};

    fn service(store: &MemoryStore) -> PostService<&MemoryStore> {
        PostService::new(Session::open(DataStore::new(store)).unwrap())
    }

    #[test]
    fn test_create_uses_untitled_label_and_first_category() {
        let store = MemoryStore::new();
        let mut posts = service(&store);

        let post = posts.create(None, None).unwrap();

        assert_eq!(post.title, "未命名草稿");
        assert_eq!(post.category_id, "general");
        assert_eq!(post.content, "");
        assert_eq!(post.id.len(), 9);
        assert_eq!(posts.session().data().posts[0].id, post.id);
    }

    #[test]
    fn test_create_in_unknown_category_fails() {
        let store = MemoryStore::new();
        let mut posts = service(&store);

        assert!(matches!(
            posts.create(Some("nope"), None),
            Err(RosetintError::CategoryNotFound(_))
        ));
    }

    #[test]
    fn test_update_changes_fields_and_persists() {
        let store = MemoryStore::new();
        let mut posts = service(&store);

        let updated = posts
            .update(
                "1",
                PostUpdate {
                    title: Some("New title".to_string()),
                    category_id: Some("tech".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.title, "New title");
        assert_eq!(updated.category_id, "tech");
        assert!(updated.updated_at >= updated.created_at);

        let reopened = service(&store);
        assert_eq!(reopened.get("1").unwrap(), &updated);
    }

    #[test]
    fn test_update_missing_post() {
        let store = MemoryStore::new();
        let mut posts = service(&store);
        assert!(matches!(
            posts.update("missing", PostUpdate::default()),
            Err(RosetintError::PostNotFound(_))
        ));
    }

    #[test]
    fn test_insert_image_appends_reference() {
        let store = MemoryStore::new();
        let mut session = Session::open(DataStore::new(&store)).unwrap();
        session
            .dispatch(Action::AddImage(crate::domain::StoredImage::new(
                "img".to_string(),
                "data:image/png;base64,AAA".to_string(),
                "a.png".to_string(),
                0,
            )))
            .unwrap();
        let mut posts = PostService::new(session);

        let post = posts.insert_image("1", "img").unwrap();

        assert!(post.content.ends_with("\n![Image](data:image/png;base64,AAA)\n"));
        assert!(matches!(
            posts.insert_image("1", "nope"),
            Err(RosetintError::ImageNotFound(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_edit_content_unchanged_is_not_saved() {
        let store = MemoryStore::new();
        let mut posts = service(&store);
        let temp = tempfile::TempDir::new().unwrap();

        let result = posts
            .edit_content("1", &EditorSession::new("true".to_string()), temp.path())
            .unwrap();

        assert!(result.is_none());
    }
}
