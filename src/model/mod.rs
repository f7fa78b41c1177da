// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Domain models and core data structures.
//!
//! This module defines the records exchanged with the hosted document
//! store (blogs, user profiles) and the instant type the store uses for
//! every date field. Field names follow the document layout, hence the
//! camel-case serde renames.

pub mod feed;

use serde::{Deserialize, Serialize};

/// An absolute instant as the document store encodes it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamp {
    pub seconds: i64,
    pub nanoseconds: u32,
}

impl Timestamp {
    pub fn new(seconds: i64, nanoseconds: u32) -> Self {
        Self {
            seconds,
            nanoseconds,
        }
    }

    pub fn from_epoch_millis(millis: i64) -> Self {
        Self {
            seconds: millis.div_euclid(1000),
            nanoseconds: (millis.rem_euclid(1000) * 1_000_000) as u32,
        }
    }

    /// Collapses the pair into milliseconds since the Unix epoch.
    ///
    /// Sub-millisecond precision is truncated.
    pub fn to_epoch_millis(&self) -> i64 {
        self.seconds
            .saturating_mul(1000)
            .saturating_add(i64::from(self.nanoseconds / 1_000_000))
    }
}

/// Post categories offered by the compose form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "CategoryRecord", try_from = "CategoryRecord")]
pub enum Category {
    Beach,
    Mount,
    Diving,
    Food,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Beach,
        Category::Mount,
        Category::Diving,
        Category::Food,
    ];

    pub fn id(self) -> u32 {
        match self {
            Category::Beach => 1,
            Category::Mount => 2,
            Category::Diving => 3,
            Category::Food => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Beach => "Beach",
            Category::Mount => "Mount",
            Category::Diving => "Diving",
            Category::Food => "Food",
        }
    }

    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }
}

/// Stored shape of a category: `{ "id": 1, "name": "Beach" }`.
#[derive(Serialize, Deserialize)]
struct CategoryRecord {
    id: u32,
    name: String,
}

impl From<Category> for CategoryRecord {
    fn from(category: Category) -> Self {
        Self {
            id: category.id(),
            name: category.name().to_string(),
        }
    }
}

impl TryFrom<CategoryRecord> for Category {
    type Error = String;

    fn try_from(record: CategoryRecord) -> Result<Self, Self::Error> {
        Category::from_id(record.id)
            .or_else(|| Category::from_name(&record.name))
            .ok_or_else(|| format!("unknown category {} ({})", record.id, record.name))
    }
}

/// A published blog post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub image: Option<String>,
    pub content: String,
    #[serde(default)]
    pub total_comments: i64,
    #[serde(default)]
    pub total_likes: i64,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    pub author_id: String,
}

/// The editable part of a post, as filled in by the compose form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogDraft {
    pub title: String,
    pub content: String,
    pub category: Option<Category>,
    pub total_likes: i64,
    pub total_comments: i64,
}

/// A post ready to be written to the document store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBlog {
    pub title: String,
    pub category: Option<Category>,
    pub image: String,
    pub content: String,
    pub total_comments: i64,
    pub total_likes: i64,
    pub created_at: Timestamp,
    pub author_id: String,
}

impl NewBlog {
    /// Attaches an id assigned by the document store.
    pub fn into_blog(self, id: String) -> Blog {
        Blog {
            id,
            title: self.title,
            category: self.category,
            image: Some(self.image),
            content: self.content,
            total_comments: self.total_comments,
            total_likes: self.total_likes,
            created_at: Some(self.created_at),
            author_id: self.author_id,
        }
    }
}

/// Public profile document created at registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub full_name: String,
    pub email: String,
    pub photo_url: String,
    pub followers_count: i64,
    pub following_count: i64,
    pub total_post: i64,
    pub created_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis_combine_seconds_and_nanoseconds() {
        let ts = Timestamp::new(1_700_000_000, 987_654_321);
        assert_eq!(ts.to_epoch_millis(), 1_700_000_000_987);
    }

    #[test]
    fn from_epoch_millis_splits_remainder() {
        let ts = Timestamp::from_epoch_millis(1_700_000_000_250);
        assert_eq!(ts, Timestamp::new(1_700_000_000, 250_000_000));
    }

    #[test]
    fn category_uses_stored_id_and_name() {
        let json = serde_json::to_string(&Category::Diving).unwrap();
        assert_eq!(json, r#"{"id":3,"name":"Diving"}"#);

        let parsed: Category = serde_json::from_str(r#"{"id":4,"name":"Food"}"#).unwrap();
        assert_eq!(parsed, Category::Food);

        assert!(serde_json::from_str::<Category>(r#"{"id":9,"name":"Space"}"#).is_err());
    }

    #[test]
    fn blog_reads_document_field_names() {
        let json = r#"{
            "title": "Padar Island",
            "category": {"id": 2, "name": "Mount"},
            "image": "https://img/padar.jpg",
            "content": "Three bays seen from the ridge",
            "totalComments": 12,
            "totalLikes": 1500,
            "createdAt": {"seconds": 1700000000, "nanoseconds": 0},
            "authorId": "u1"
        }"#;

        let blog: Blog = serde_json::from_str(json).unwrap();
        assert_eq!(blog.category, Some(Category::Mount));
        assert_eq!(blog.total_likes, 1500);
        assert_eq!(blog.created_at, Some(Timestamp::new(1_700_000_000, 0)));
        assert!(blog.id.is_empty());
    }
}
