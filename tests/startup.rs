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

use std::time::Duration;

use woco::{
    account,
    backend::{AuthService, memory::MemoryAuth},
    db::SqliteStore,
    session::{
        Decision, FixedClock, SESSION_KEY, SessionValidator, session_lifetime,
        splash::Splash,
    },
    store::KeyValueStore,
};

const NOW: i64 = 1_700_000_000_000;
const DAY_MILLIS: i64 = 24 * 60 * 60 * 1000;

fn splash_decision(store: SqliteStore, now: i64) -> Decision {
    let mut splash = Splash::new(Duration::from_millis(10));
    splash.start(SessionValidator::new(store, FixedClock(now)));
    splash.wait()
}

#[test]
fn login_survives_restart_until_expiry() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("device.db");

    let auth = MemoryAuth::new();
    auth.sign_up("traveller@example.com", "komodo2023").unwrap();
    auth.sign_out().unwrap();

    {
        let store = SqliteStore::open(&path).unwrap();
        account::login(
            &auth,
            &store,
            &FixedClock(NOW),
            "traveller@example.com",
            "komodo2023",
            session_lifetime(30),
        )
        .unwrap();
    }

    let next_week = NOW + 7 * DAY_MILLIS;
    assert_eq!(
        splash_decision(SqliteStore::open(&path).unwrap(), next_week),
        Decision::EnterApp
    );

    let next_quarter = NOW + 90 * DAY_MILLIS;
    assert_eq!(
        splash_decision(SqliteStore::open(&path).unwrap(), next_quarter),
        Decision::RequireLogin
    );
}

#[test]
fn logout_sends_next_start_to_login() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("device.db");

    let auth = MemoryAuth::new();
    auth.sign_up("traveller@example.com", "komodo2023").unwrap();

    let store = SqliteStore::open(&path).unwrap();
    account::login(
        &auth,
        &store,
        &FixedClock(NOW),
        "traveller@example.com",
        "komodo2023",
        session_lifetime(30),
    )
    .unwrap();
    account::logout(&auth, &store).unwrap();
    drop(store);

    assert_eq!(
        splash_decision(SqliteStore::open(&path).unwrap(), NOW),
        Decision::RequireLogin
    );
}

#[test]
fn corrupted_record_on_disk_sends_to_login() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("device.db");

    SqliteStore::open(&path)
        .unwrap()
        .set(SESSION_KEY, "{\"userToken\": \"abc\", \"expirationTi")
        .unwrap();

    assert_eq!(
        splash_decision(SqliteStore::open(&path).unwrap(), NOW),
        Decision::RequireLogin
    );
}
