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

//! Contracts for the hosted backend.
//!
//! The app talks to three hosted services: authentication, a document store
//! holding posts and profiles, and blob storage for post images. Flows take
//! explicit handles implementing these traits, which keeps them testable
//! against the fakes in [`memory`].

pub mod memory;

use std::path::Path;

use crate::{
    error::BackendError,
    model::{Blog, NewBlog, UserProfile},
};

/// Auth error codes the client reacts to.
pub mod codes {
    pub const INVALID_EMAIL: &str = "auth/invalid-email";
    pub const WRONG_PASSWORD: &str = "auth/wrong-password";
    pub const INVALID_LOGIN: &str = "auth/invalid-login";
    pub const EMAIL_IN_USE: &str = "auth/email-already-in-use";
    pub const WEAK_PASSWORD: &str = "auth/weak-password";
}

pub trait AuthService {
    /// Id of the signed-in user, if any.
    fn current_user_id(&self) -> Option<String>;

    fn sign_in(&self, email: &str, password: &str) -> Result<(), BackendError>;

    /// Creates an account and signs it in, returning the new user id.
    fn sign_up(&self, email: &str, password: &str) -> Result<String, BackendError>;

    fn sign_out(&self) -> Result<(), BackendError>;

    /// Bearer token for the signed-in user.
    fn id_token(&self) -> Result<String, BackendError>;
}

pub trait DocumentStore {
    fn list_blogs(&self) -> Result<Vec<Blog>, BackendError>;

    fn get_blog(&self, id: &str) -> Result<Option<Blog>, BackendError>;

    /// Adds a post and returns the id the store assigned to it.
    fn add_blog(&self, blog: NewBlog) -> Result<String, BackendError>;

    fn delete_blog(&self, id: &str) -> Result<(), BackendError>;

    fn put_user(&self, uid: &str, profile: UserProfile) -> Result<(), BackendError>;
}

pub trait BlobStorage {
    /// Uploads `local_path` as `object_name`, returning its download URL.
    fn put_file(&self, object_name: &str, local_path: &Path) -> Result<String, BackendError>;

    /// Deletes the object behind a URL returned by [`BlobStorage::put_file`].
    fn delete_url(&self, url: &str) -> Result<(), BackendError>;
}
