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

//! # Travel blog client core.
//!
//! The logic layer behind the travel blog app: display formatting for
//! posts, the start-up session check, and the account and posting flows
//! that sit on top of the hosted backend.
//!
//! ## Architecture
//!
//! Nothing here talks to a service directly. Every flow receives explicit
//! handles:
//!
//! * [`store::KeyValueStore`] for device storage ([`db::SqliteStore`] on
//!   disk, [`store::MemoryStore`] in tests).
//! * [`backend::AuthService`], [`backend::DocumentStore`] and
//!   [`backend::BlobStorage`] for the hosted services.
//! * [`session::Clock`] for the wall clock.
//!
//! Failures in the session check never surface: they resolve to the login
//! screen.

pub mod account;
pub mod backend;
pub mod blog;
pub mod config;
pub mod db;
pub mod error;
pub mod model;
pub mod session;
pub mod store;
pub mod util;
