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

//! In-process stand-ins for the hosted services.
//!
//! They follow the error codes of the real services closely enough for the
//! account and publishing flows to be exercised end to end.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{
        Mutex, MutexGuard,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
};

use crate::{
    backend::{AuthService, BlobStorage, DocumentStore, codes},
    error::BackendError,
    model::{Blog, NewBlog, UserProfile},
};

const MIN_PASSWORD_LEN: usize = 6;

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, BackendError> {
    mutex
        .lock()
        .map_err(|_| BackendError::new("unavailable", "service state poisoned"))
}

struct Account {
    uid: String,
    password: String,
}

#[derive(Default)]
pub struct MemoryAuth {
    accounts: Mutex<HashMap<String, Account>>,
    current: Mutex<Option<String>>,
    next_uid: AtomicU64,
    sign_out_fails: AtomicBool,
}

impl MemoryAuth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent [`AuthService::sign_out`] fail.
    pub fn fail_sign_out(&self) {
        self.sign_out_fails.store(true, Ordering::SeqCst);
    }
}

impl AuthService for MemoryAuth {
    fn current_user_id(&self) -> Option<String> {
        self.current.lock().ok().and_then(|current| current.clone())
    }

    fn sign_in(&self, email: &str, password: &str) -> Result<(), BackendError> {
        if !email.contains('@') {
            return Err(BackendError::new(codes::INVALID_EMAIL, "malformed email"));
        }

        let accounts = lock(&self.accounts)?;
        let account = accounts
            .get(email)
            .ok_or_else(|| BackendError::new(codes::INVALID_LOGIN, "unknown account"))?;

        if account.password != password {
            return Err(BackendError::new(codes::WRONG_PASSWORD, "password mismatch"));
        }

        *lock(&self.current)? = Some(account.uid.clone());
        Ok(())
    }

    fn sign_up(&self, email: &str, password: &str) -> Result<String, BackendError> {
        if !email.contains('@') {
            return Err(BackendError::new(codes::INVALID_EMAIL, "malformed email"));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(BackendError::new(codes::WEAK_PASSWORD, "password too short"));
        }

        let mut accounts = lock(&self.accounts)?;
        if accounts.contains_key(email) {
            return Err(BackendError::new(codes::EMAIL_IN_USE, "account exists"));
        }

        let uid = format!("user-{}", self.next_uid.fetch_add(1, Ordering::SeqCst) + 1);
        accounts.insert(
            email.to_string(),
            Account {
                uid: uid.clone(),
                password: password.to_string(),
            },
        );

        *lock(&self.current)? = Some(uid.clone());
        Ok(uid)
    }

    fn sign_out(&self) -> Result<(), BackendError> {
        if self.sign_out_fails.load(Ordering::SeqCst) {
            return Err(BackendError::new("unavailable", "sign-out failed"));
        }
        *lock(&self.current)? = None;
        Ok(())
    }

    fn id_token(&self) -> Result<String, BackendError> {
        lock(&self.current)?
            .as_ref()
            .map(|uid| format!("token-{uid}"))
            .ok_or_else(BackendError::unauthenticated)
    }
}

#[derive(Default)]
pub struct MemoryDocuments {
    blogs: Mutex<Vec<Blog>>,
    users: Mutex<HashMap<String, UserProfile>>,
    next_id: AtomicU64,
}

impl MemoryDocuments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(&self, uid: &str) -> Option<UserProfile> {
        self.users.lock().ok()?.get(uid).cloned()
    }
}

impl DocumentStore for MemoryDocuments {
    fn list_blogs(&self) -> Result<Vec<Blog>, BackendError> {
        Ok(lock(&self.blogs)?.clone())
    }

    fn get_blog(&self, id: &str) -> Result<Option<Blog>, BackendError> {
        Ok(lock(&self.blogs)?.iter().find(|b| b.id == id).cloned())
    }

    fn add_blog(&self, blog: NewBlog) -> Result<String, BackendError> {
        let id = format!("blog-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        lock(&self.blogs)?.push(blog.into_blog(id.clone()));
        Ok(id)
    }

    fn delete_blog(&self, id: &str) -> Result<(), BackendError> {
        let mut blogs = lock(&self.blogs)?;
        let before = blogs.len();
        blogs.retain(|b| b.id != id);
        if blogs.len() == before {
            return Err(BackendError::not_found(format!("blog {id}")));
        }
        Ok(())
    }

    fn put_user(&self, uid: &str, profile: UserProfile) -> Result<(), BackendError> {
        lock(&self.users)?.insert(uid.to_string(), profile);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryBlobs {
    objects: Mutex<HashMap<String, PathBuf>>,
}

impl MemoryBlobs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.objects.lock().map(|o| o.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BlobStorage for MemoryBlobs {
    fn put_file(&self, object_name: &str, local_path: &Path) -> Result<String, BackendError> {
        let url = format!("memory://blobs/{object_name}");
        lock(&self.objects)?.insert(url.clone(), local_path.to_path_buf());
        Ok(url)
    }

    fn delete_url(&self, url: &str) -> Result<(), BackendError> {
        lock(&self.objects)?
            .remove(url)
            .map(|_| ())
            .ok_or_else(|| BackendError::not_found(url.to_string()))
    }
}
