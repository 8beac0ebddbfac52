//! Category use cases

use crate::application::Session;
use crate::domain::post::find_by_name;
use crate::domain::{generate_id, Action, Category};
use crate::error::{RosetintError, Result};
use crate::infrastructure::KeyValueStore;

/// A category with the number of posts filed under it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    pub category: Category,
    pub post_count: usize,
}

pub struct CategoryService<S> {
    session: Session<S>,
}

impl<S: KeyValueStore> CategoryService<S> {
    pub fn new(session: Session<S>) -> Self {
        CategoryService { session }
    }

    /// Add a category. An existing category with the same name
    /// (case-insensitive) is returned instead of creating a duplicate.
    pub fn add(&mut self, name: &str) -> Result<Category> {
        let name = validate_name(name)?;

        if let Some(existing) = find_by_name(&self.session.data().categories, &name) {
            return Ok(existing.clone());
        }

        let category = Category::new(generate_id(), name);
        self.session.dispatch(Action::AddCategory {
            id: category.id.clone(),
            name: category.name.clone(),
        })?;
        Ok(category)
    }

    pub fn rename(&mut self, id: &str, name: &str) -> Result<Category> {
        let name = validate_name(name)?;

        if self.session.data().category(id).is_none() {
            return Err(RosetintError::CategoryNotFound(id.to_string()));
        }

        let data = self.session.dispatch(Action::RenameCategory {
            id: id.to_string(),
            name,
        })?;
        data.category(id)
            .cloned()
            .ok_or_else(|| RosetintError::CategoryNotFound(id.to_string()))
    }

    pub fn list(&self) -> Vec<CategorySummary> {
        let data = self.session.data();
        data.categories
            .iter()
            .map(|category| CategorySummary {
                category: category.clone(),
                post_count: data.post_count(&category.id),
            })
            .collect()
    }
}

fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(RosetintError::InvalidValue(
            "Category name cannot be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{DataStore, MemoryStore};

    fn service(store: &MemoryStore) -> CategoryService<&MemoryStore> {
        CategoryService::new(Session::open(DataStore::new(store)).unwrap())
    }

    #[test]
    fn test_add_new_category() {
        let store = MemoryStore::new();
        let mut categories = service(&store);

        let added = categories.add("  Travel ").unwrap();

        assert_eq!(added.name, "Travel");
        assert_eq!(categories.list().len(), 4);
    }

    #[test]
    fn test_add_existing_name_returns_existing() {
        let store = MemoryStore::new();
        let mut categories = service(&store);

        let first = categories.add("Travel").unwrap();
        let second = categories.add("travel").unwrap();

        assert_eq!(first, second);
        assert_eq!(categories.list().len(), 4);
    }

    #[test]
    fn test_add_empty_name_rejected() {
        let store = MemoryStore::new();
        let mut categories = service(&store);
        assert!(matches!(
            categories.add("   "),
            Err(RosetintError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_rename_persists() {
        let store = MemoryStore::new();
        let mut categories = service(&store);

        let renamed = categories.rename("tech", "Engineering").unwrap();
        assert_eq!(renamed.name, "Engineering");

        let reopened = service(&store);
        let names: Vec<String> = reopened
            .list()
            .into_iter()
            .map(|s| s.category.name)
            .collect();
        assert!(names.contains(&"Engineering".to_string()));
    }

    #[test]
    fn test_rename_missing_category() {
        let store = MemoryStore::new();
        let mut categories = service(&store);
        assert!(matches!(
            categories.rename("nope", "x"),
            Err(RosetintError::CategoryNotFound(_))
        ));
    }

    #[test]
    fn test_list_counts_posts() {
        let store = MemoryStore::new();
        let categories = service(&store);

        let summaries = categories.list();

        let general = summaries
            .iter()
            .find(|s| s.category.id == "general")
            .unwrap();
        assert_eq!(general.post_count, 1);
        let tech = summaries.iter().find(|s| s.category.id == "tech").unwrap();
        assert_eq!(tech.post_count, 0);
    }
}
