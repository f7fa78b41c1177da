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

//! Durable device storage.
//!
//! This module backs [`KeyValueStore`] with a small SQLite database so the
//! session record survives restarts of the application.
//!
//! # Tables
//!
//! * `kv` - One row per key, holding an opaque string value and the time it
//!   was last written.
//!
//! # Performance
//!
//! All statements go through [`rusqlite::Connection::prepare_cached`]; the
//! store is read once per launch, so there is nothing else to tune.

use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};
use tracing::debug;

use crate::{error::StoreError, store::KeyValueStore};

/// Opens a connection to the SQLite database and configures it.
///
/// This function performs the following setup:
/// * **WAL Mode**: Enables Write-Ahead Logging so a crash mid-write never
///   leaves a torn value behind.
/// * **Synchronous**: Sets synchronous mode to `NORMAL`.
/// * **Schema**: Executes [`create_schema`] to ensure the table exists.
///
/// # Arguments
///
/// * `path` - The file system path to the SQLite database file.
///
/// # Errors
///
/// Returns an error if:
/// * The database file cannot be opened.
/// * The initial PRAGMA configurations fail.
/// * The schema initialization fails.
pub(crate) fn init_db(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)
        .with_context(|| format!("Failed to open database {}", path.display()))?;

    let journal_mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |r| r.get(0))?;
    if journal_mode != "wal" {
        anyhow::bail!(
            "Failed to switch to WAL mode. Current mode: {}",
            journal_mode
        );
    }

    conn.execute_batch("PRAGMA synchronous = NORMAL;")?;

    create_schema(&conn)?;

    Ok(conn)
}

/// Create the database schema.
///
/// # Errors
///
/// Returns an error if there are permission issues with the database file.
fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS kv (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL,
            updated_at INTEGER NOT NULL DEFAULT (unixepoch())
        );",
    )
    .context("Failed to create schema")
}

/// A [`KeyValueStore`] persisted in a SQLite file.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (creating if necessary) the store at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening device store");
        let conn = init_db(path)?;
        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut stmt = self.conn.prepare_cached("SELECT value FROM kv WHERE key = ?")?;
        let value = stmt.query_row([key], |row| row.get(0)).optional()?;

        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let sql = "
            INSERT INTO kv (key, value)
            VALUES (?1, ?2)
            ON CONFLICT (key)
            DO UPDATE SET value = ?2, updated_at = unixepoch()";

        let mut stmt = self.conn.prepare_cached(sql)?;
        stmt.execute(params![key, value])?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut stmt = self.conn.prepare_cached("DELETE FROM kv WHERE key = ?")?;
        stmt.execute([key])?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("device.db");

        {
            let store = SqliteStore::open(&path).unwrap();
            store.set("userData", "{\"userToken\":\"t\"}").unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(
            store.get("userData").unwrap().as_deref(),
            Some("{\"userToken\":\"t\"}")
        );
    }

    #[test]
    fn set_upserts_and_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::open(dir.path().join("device.db")).unwrap();

        assert_eq!(store.get("userData").unwrap(), None);

        store.set("userData", "first").unwrap();
        store.set("userData", "second").unwrap();
        assert_eq!(store.get("userData").unwrap().as_deref(), Some("second"));

        store.remove("userData").unwrap();
        store.remove("userData").unwrap();
        assert_eq!(store.get("userData").unwrap(), None);
    }
}
