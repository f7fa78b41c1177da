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

//! Error types shared across the crate.
//!
//! Library code returns these typed errors so callers can decide which
//! failures are recoverable. The binary wraps them in [`anyhow::Error`].

use thiserror::Error;

/// Failures raised by a [`crate::store::KeyValueStore`] implementation.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(#[from] rusqlite::Error),

    #[error("storage is unavailable: {0}")]
    Unavailable(String),
}

/// Failures reported by one of the external services.
///
/// The `code` mirrors the namespaced error codes the hosted services emit,
/// e.g. `auth/wrong-password`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct BackendError {
    pub code: String,
    pub message: String,
}

impl BackendError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::new("not-found", what)
    }

    pub fn unauthenticated() -> Self {
        Self::new("auth/no-current-user", "no user is signed in")
    }
}

/// Reasons a persisted session record could not be used.
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("session record is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("session record has no token")]
    MissingToken,

    #[error("session record has no expiry")]
    MissingExpiry,
}

/// Failures writing or clearing the persisted session.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("failed to encode session record: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to persist session: {0}")]
    Store(#[from] StoreError),
}

/// Failures of the account flows (login, registration).
#[derive(Error, Debug)]
pub enum AccountError {
    #[error("{0}")]
    Invalid(#[from] crate::account::RegistrationError),

    #[error("backend rejected the request: {0}")]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Failures of the post publishing flows.
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("image path {0:?} has no file name")]
    InvalidImagePath(String),

    #[error("backend rejected the request: {0}")]
    Backend(#[from] BackendError),
}
