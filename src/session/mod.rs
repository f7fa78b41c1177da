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

//! Locally persisted login session.
//!
//! A successful login stores a [`SessionRecord`] (bearer token plus an
//! absolute expiry) under [`SESSION_KEY`]. On start-up the
//! [`SessionValidator`] reads it back and decides whether the user goes
//! straight to the main app or to the login screen.
//!
//! Expiry is checked only against the device clock. There is no server-side
//! revocation check and no retry: anything ambiguous (a read failure, a
//! truncated record, a missing field) resolves to [`Decision::RequireLogin`].

pub mod splash;

use chrono::{TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    error::{RecordError, SessionError, StoreError},
    store::KeyValueStore,
};

/// Storage key holding the JSON-encoded [`SessionRecord`].
pub const SESSION_KEY: &str = "userData";

/// How long a login stays valid unless configured otherwise.
pub const DEFAULT_SESSION_DAYS: u32 = 30;

pub fn session_lifetime(days: u32) -> TimeDelta {
    TimeDelta::days(i64::from(days))
}

/// Source of the current wall-clock time.
pub trait Clock {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now_millis(&self) -> i64 {
        (**self).now_millis()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// A clock frozen at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

/// Proof of login persisted on the device.
///
/// The JSON field names are the ones the mobile client has always written;
/// the descriptive names are accepted when reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionRecord {
    #[serde(rename = "userToken")]
    pub token: String,
    #[serde(rename = "expirationTime")]
    pub expires_at_epoch_millis: i64,
}

/// Lenient view of a stored record, so missing fields can be told apart
/// from broken JSON.
#[derive(Deserialize)]
struct StoredRecord {
    #[serde(rename = "userToken", alias = "token", default)]
    token: Option<String>,
    #[serde(rename = "expirationTime", alias = "expiresAtEpochMillis", default)]
    expires: Option<serde_json::Number>,
}

impl SessionRecord {
    pub fn new(token: impl Into<String>, expires_at_epoch_millis: i64) -> Self {
        Self {
            token: token.into(),
            expires_at_epoch_millis,
        }
    }

    /// Decodes a stored record.
    ///
    /// An empty token or a zero expiry counts as missing. Fractional expiry
    /// values are floored, which leaves `now <= expiry` unchanged for whole
    /// millisecond clocks.
    pub fn parse(raw: &str) -> Result<Self, RecordError> {
        let stored: StoredRecord = serde_json::from_str(raw)?;

        let token = stored
            .token
            .filter(|t| !t.is_empty())
            .ok_or(RecordError::MissingToken)?;

        let expires = stored
            .expires
            .and_then(|n| n.as_i64().or_else(|| n.as_f64().map(|f| f.floor() as i64)))
            .filter(|&ms| ms != 0)
            .ok_or(RecordError::MissingExpiry)?;

        Ok(Self::new(token, expires))
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn is_valid_at(&self, now_millis: i64) -> bool {
        now_millis <= self.expires_at_epoch_millis
    }
}

/// What the stored session looked like when it was checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Well formed and not yet expired.
    Valid,
    /// Well formed but past its expiry.
    Expired,
    /// Nothing stored, or the store could not be read.
    Absent,
    /// Stored but unusable.
    Corrupt,
}

impl SessionStatus {
    pub fn decision(self) -> Decision {
        match self {
            SessionStatus::Valid => Decision::EnterApp,
            SessionStatus::Expired | SessionStatus::Absent | SessionStatus::Corrupt => {
                Decision::RequireLogin
            }
        }
    }
}

/// Where the app goes after the splash screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    EnterApp,
    RequireLogin,
}

impl Decision {
    /// Name of the navigation target for this decision.
    pub fn route(self) -> &'static str {
        match self {
            Decision::EnterApp => "MainApp",
            Decision::RequireLogin => "Login",
        }
    }
}

/// Start-up check of the persisted session.
pub struct SessionValidator<S, C> {
    store: S,
    clock: C,
}

impl<S: KeyValueStore, C: Clock> SessionValidator<S, C> {
    pub fn new(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    /// Classifies the stored session. Never fails: read errors are logged
    /// and reported as [`SessionStatus::Absent`].
    pub fn inspect(&self) -> SessionStatus {
        let raw = match self.store.get(SESSION_KEY) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => return SessionStatus::Absent,
            Err(e) => {
                warn!(error = %e, "failed to read session record");
                return SessionStatus::Absent;
            }
        };

        let record = match SessionRecord::parse(&raw) {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, "discarding unusable session record");
                return SessionStatus::Corrupt;
            }
        };

        let now = self.clock.now_millis();
        debug!(now, expires = record.expires_at_epoch_millis, "checking session expiry");

        if record.is_valid_at(now) {
            SessionStatus::Valid
        } else {
            SessionStatus::Expired
        }
    }

    pub fn check_session(&self) -> Decision {
        let status = self.inspect();
        let decision = status.decision();
        info!(?status, route = decision.route(), "session check resolved");
        decision
    }
}

/// Persists a fresh session for `token`, valid for `lifetime` from now.
pub fn begin_session(
    store: &impl KeyValueStore,
    clock: &impl Clock,
    token: &str,
    lifetime: TimeDelta,
) -> Result<SessionRecord, SessionError> {
    let expires = clock
        .now_millis()
        .saturating_add(lifetime.num_milliseconds());
    let record = SessionRecord::new(token, expires);

    store.set(SESSION_KEY, &record.to_json()?)?;
    debug!(expires, "session stored");

    Ok(record)
}

/// Forgets the persisted session.
pub fn end_session(store: &impl KeyValueStore) -> Result<(), StoreError> {
    store.remove(SESSION_KEY)?;
    debug!("session cleared");
    Ok(())
}
