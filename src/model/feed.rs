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

//! Feed slicing for the browse screens.
//!
//! The home screen shows the first few posts as a horizontal highlight strip
//! and everything else as a vertical list; the discover screen lists the
//! same tail as "recent".

use crate::{
    backend::DocumentStore,
    error::BackendError,
    model::{Blog, Category},
};

/// Number of posts in the highlight strip.
pub const HIGHLIGHT_COUNT: usize = 5;

pub struct Feed {
    blogs: Vec<Blog>,
}

impl Feed {
    pub fn new(blogs: Vec<Blog>) -> Self {
        Self { blogs }
    }

    /// Fetches every post from the document store.
    pub fn load(docs: &impl DocumentStore) -> Result<Self, BackendError> {
        Ok(Self::new(docs.list_blogs()?))
    }

    pub fn all(&self) -> &[Blog] {
        &self.blogs
    }

    /// The leading posts shown in the horizontal strip.
    pub fn highlights(&self) -> &[Blog] {
        &self.blogs[..HIGHLIGHT_COUNT.min(self.blogs.len())]
    }

    /// The posts after the highlights.
    ///
    /// Empty when there are no more posts than [`HIGHLIGHT_COUNT`].
    pub fn remainder(&self) -> &[Blog] {
        &self.blogs[HIGHLIGHT_COUNT.min(self.blogs.len())..]
    }

    pub fn recent(&self) -> &[Blog] {
        self.remainder()
    }

    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &Blog> {
        self.blogs
            .iter()
            .filter(move |blog| blog.category == Some(category))
    }

    pub fn len(&self) -> usize {
        self.blogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blogs.is_empty()
    }
}
