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

//! Posting and presenting blog entries.

use std::path::Path;

use chrono::{Local, TimeZone};
use tracing::{info, warn};

use crate::{
    backend::{AuthService, BlobStorage, DocumentStore},
    error::{BackendError, PublishError},
    model::{Blog, BlogDraft, NewBlog, Timestamp},
    session::Clock,
    util::format::{format_date_in, format_number, truncate_words},
};

/// Blob storage folder holding post images.
pub const IMAGE_FOLDER: &str = "blogimages";

/// Derives a unique object name for an image upload.
///
/// The upload time is spliced between the file stem and its extension, so
/// `/tmp/IMG_01.jpg` uploaded at `1700000000000` becomes
/// `blogimages/IMG_011700000000000.jpg`.
///
/// # Errors
///
/// Returns [`PublishError::InvalidImagePath`] if the path has no file name.
pub fn upload_object_name(image_path: &Path, now_millis: i64) -> Result<String, PublishError> {
    let invalid = || PublishError::InvalidImagePath(image_path.display().to_string());

    let stem = image_path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .ok_or_else(invalid)?;

    let name = match image_path.extension() {
        Some(ext) => format!("{stem}{now_millis}.{}", ext.to_string_lossy()),
        None => format!("{stem}{now_millis}"),
    };

    Ok(format!("{IMAGE_FOLDER}/{name}"))
}

/// Uploads the image and stores a new post authored by the signed-in user.
///
/// Returns the id of the new post.
pub fn publish(
    auth: &impl AuthService,
    docs: &impl DocumentStore,
    blobs: &impl BlobStorage,
    clock: &impl Clock,
    draft: &BlogDraft,
    image_path: &Path,
) -> Result<String, PublishError> {
    let author_id = auth
        .current_user_id()
        .ok_or_else(BackendError::unauthenticated)?;

    let now = clock.now_millis();
    let object_name = upload_object_name(image_path, now)?;
    let image = blobs.put_file(&object_name, image_path)?;

    let blog = NewBlog {
        title: draft.title.clone(),
        category: draft.category,
        image,
        content: draft.content.clone(),
        total_comments: draft.total_comments,
        total_likes: draft.total_likes,
        created_at: Timestamp::from_epoch_millis(now),
        author_id,
    };

    let id = docs.add_blog(blog)?;
    info!(%id, %object_name, "blog published");

    Ok(id)
}

/// Deletes a post, then its image.
pub fn delete(
    docs: &impl DocumentStore,
    blobs: &impl BlobStorage,
    id: &str,
) -> Result<(), PublishError> {
    let blog = docs
        .get_blog(id)?
        .ok_or_else(|| BackendError::not_found(format!("blog {id}")))?;

    docs.delete_blog(id)?;

    if let Some(url) = blog.image.as_deref().filter(|url| !url.is_empty()) {
        blobs.delete_url(url).inspect_err(|e| {
            warn!(%id, error = %e, "post deleted but its image was not");
        })?;
    }

    info!(%id, "blog deleted");
    Ok(())
}

/// Display strings for one post in a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogCard {
    pub id: String,
    pub title: String,
    pub category: Option<&'static str>,
    pub date: String,
    pub likes: String,
    pub comments: String,
    pub excerpt: String,
}

impl BlogCard {
    /// Builds the card using the device time zone for the date.
    pub fn from_blog(blog: &Blog, excerpt_words: usize) -> Self {
        Self::from_blog_in(blog, excerpt_words, &Local)
    }

    pub fn from_blog_in<Tz: TimeZone>(blog: &Blog, excerpt_words: usize, tz: &Tz) -> Self {
        Self {
            id: blog.id.clone(),
            title: blog.title.clone(),
            category: blog.category.map(|c| c.name()),
            date: format_date_in(blog.created_at.as_ref(), tz),
            likes: format_number(blog.total_likes).to_string(),
            comments: format_number(blog.total_comments).to_string(),
            excerpt: truncate_words(&blog.content, excerpt_words),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::{
        backend::memory::{MemoryAuth, MemoryBlobs, MemoryDocuments},
        model::Category,
        session::FixedClock,
    };

    const NOW: i64 = 1_700_000_000_000;

    fn draft() -> BlogDraft {
        BlogDraft {
            title: "Komodo at dawn".to_string(),
            content: "We reached Rinca before the heat".to_string(),
            category: Some(Category::Beach),
            total_likes: 0,
            total_comments: 0,
        }
    }

    #[test]
    fn object_name_splices_timestamp_before_extension() {
        assert_eq!(
            upload_object_name(Path::new("/tmp/picker/IMG_01.jpg"), NOW).unwrap(),
            "blogimages/IMG_011700000000000.jpg"
        );
        assert_eq!(
            upload_object_name(Path::new("archive.tar.gz"), 5).unwrap(),
            "blogimages/archive.tar5.gz"
        );
        assert_eq!(
            upload_object_name(Path::new("/tmp/photo"), 5).unwrap(),
            "blogimages/photo5"
        );
    }

    #[test]
    fn object_name_needs_a_file_name() {
        assert!(matches!(
            upload_object_name(Path::new("/"), NOW),
            Err(PublishError::InvalidImagePath(_))
        ));
    }

    #[test]
    fn publish_requires_signed_in_user() {
        let err = publish(
            &MemoryAuth::new(),
            &MemoryDocuments::new(),
            &MemoryBlobs::new(),
            &FixedClock(NOW),
            &draft(),
            Path::new("/tmp/a.jpg"),
        )
        .unwrap_err();

        assert!(matches!(err, PublishError::Backend(e) if e.code == "auth/no-current-user"));
    }

    #[test]
    fn publish_then_delete() {
        let auth = MemoryAuth::new();
        let docs = MemoryDocuments::new();
        let blobs = MemoryBlobs::new();
        let uid = auth.sign_up("ayu@example.com", "abc12345").unwrap();

        let id = publish(
            &auth,
            &docs,
            &blobs,
            &FixedClock(NOW),
            &draft(),
            Path::new("/tmp/a.jpg"),
        )
        .unwrap();

        let blog = docs.get_blog(&id).unwrap().unwrap();
        assert_eq!(blog.author_id, uid);
        assert_eq!(blog.image.as_deref(), Some("memory://blobs/blogimages/a1700000000000.jpg"));
        assert_eq!(blog.created_at, Some(Timestamp::from_epoch_millis(NOW)));
        assert_eq!(blobs.len(), 1);

        delete(&docs, &blobs, &id).unwrap();
        assert_eq!(docs.get_blog(&id).unwrap(), None);
        assert!(blobs.is_empty());
    }

    #[test]
    fn delete_unknown_post_fails() {
        let err = delete(&MemoryDocuments::new(), &MemoryBlobs::new(), "missing").unwrap_err();
        assert!(matches!(err, PublishError::Backend(e) if e.code == "not-found"));
    }

    #[test]
    fn card_composes_formatters() {
        let blog = Blog {
            id: "b1".to_string(),
            title: "Padar".to_string(),
            category: Some(Category::Mount),
            image: None,
            content: "one two three four five six seven eight nine ten eleven".to_string(),
            total_comments: 12,
            total_likes: 1500,
            created_at: Some(Timestamp::new(1_700_000_000, 0)),
            author_id: "u1".to_string(),
        };

        let card = BlogCard::from_blog_in(&blog, 10, &Utc);
        assert_eq!(card.category, Some("Mount"));
        assert_eq!(card.date, "Nov 14, 2023");
        assert_eq!(card.likes, "1.5K");
        assert_eq!(card.comments, "12");
        assert_eq!(card.excerpt, "one two three four five six seven eight nine ten ...");
    }
}
