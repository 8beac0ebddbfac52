//! Post list filtering and sorting

use crate::domain::Post;
use std::cmp::Ordering;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOption {
    /// Case-insensitive title order
    Title,
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "title" => Ok(SortOption::Title),
            "created" | "createdat" => Ok(SortOption::CreatedAt),
            "updated" | "updatedat" => Ok(SortOption::UpdatedAt),
            _ => Err(format!(
                "Invalid sort option: {}. Valid options: title, created, updated",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(format!("Invalid sort direction: {}. Use asc or desc", s)),
        }
    }
}

/// Filters and ordering for the post list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostQuery {
    pub category_id: Option<String>,
    pub search: Option<String>,
    pub sort: SortOption,
    pub direction: SortDirection,
}

impl PostQuery {
    /// Apply the query, returning matching posts in order.
    /// Ties keep their original relative order.
    pub fn apply<'a>(&self, posts: &'a [Post]) -> Vec<&'a Post> {
        let needle = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);

        let mut matches: Vec<&Post> = posts
            .iter()
            .filter(|p| match &self.category_id {
                Some(id) => &p.category_id == id,
                None => true,
            })
            .filter(|p| match &needle {
                Some(q) => {
                    p.title.to_lowercase().contains(q.as_str())
                        || p.content.to_lowercase().contains(q.as_str())
                }
                None => true,
            })
            .collect();

        matches.sort_by(|a, b| {
            let ordering = self.compare(a, b);
            match self.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        matches
    }

    fn compare(&self, a: &Post, b: &Post) -> Ordering {
        match self.sort {
            SortOption::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            SortOption::CreatedAt => a.created_at.cmp(&b.created_at),
            SortOption::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        }
    }
}
