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

//! Start-up splash sequencing.
//!
//! The splash screen stays up for a minimum dwell time while the stored
//! session is checked. The check runs on a background worker so a slow
//! storage read never stalls the caller; the result travels back over a
//! `std::sync::mpsc` channel.
//!
//! ```text
//! Idle -> Checking -> Checked(status) -> Resolved(decision)
//! ```
//!
//! `Resolved` is reached only when the check has reported **and** the dwell
//! time has elapsed since [`Splash::start`].

use std::{
    sync::mpsc::{self, Receiver, TryRecvError},
    thread,
    time::{Duration, Instant},
};

use tracing::{debug, warn};

use crate::{
    session::{Clock, Decision, SessionStatus, SessionValidator},
    store::KeyValueStore,
};

/// Splash dwell used when none is configured.
pub const DEFAULT_DWELL: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplashState {
    Idle,
    Checking,
    Checked(SessionStatus),
    Resolved(Decision),
}

pub struct Splash {
    dwell: Duration,
    state: SplashState,
    started: Option<Instant>,
    status_rx: Option<Receiver<SessionStatus>>,
}

impl Splash {
    pub fn new(dwell: Duration) -> Self {
        Self {
            dwell,
            state: SplashState::Idle,
            started: None,
            status_rx: None,
        }
    }

    pub fn state(&self) -> SplashState {
        self.state
    }

    /// Spawns a background thread to run the session check.
    ///
    /// Has no effect unless the splash is [`SplashState::Idle`].
    pub fn start<S, C>(&mut self, validator: SessionValidator<S, C>)
    where
        S: KeyValueStore + Send + 'static,
        C: Clock + Send + 'static,
    {
        if self.state != SplashState::Idle {
            warn!(state = ?self.state, "splash already started");
            return;
        }

        let (status_tx, status_rx) = mpsc::channel();

        thread::spawn(move || {
            let status = validator.inspect();
            // The splash may have been dropped while the check ran.
            let _ = status_tx.send(status);
        });

        self.started = Some(Instant::now());
        self.status_rx = Some(status_rx);
        self.state = SplashState::Checking;
    }

    /// Advances the state machine without blocking.
    pub fn poll(&mut self) -> SplashState {
        if self.state == SplashState::Checking {
            match self.status_rx.as_ref().map(Receiver::try_recv) {
                Some(Ok(status)) => self.record(status),
                Some(Err(TryRecvError::Empty)) => {}
                Some(Err(TryRecvError::Disconnected)) | None => self.record_lost_worker(),
            }
        }

        if let SplashState::Checked(status) = self.state {
            if self.remaining_dwell().is_zero() {
                self.state = SplashState::Resolved(status.decision());
            }
        }

        self.state
    }

    /// Blocks until the splash resolves and returns the decision.
    ///
    /// A splash that was never started resolves straight to
    /// [`Decision::RequireLogin`].
    pub fn wait(&mut self) -> Decision {
        loop {
            match self.state {
                SplashState::Idle => {
                    warn!("waiting on a splash that was never started");
                    self.state = SplashState::Resolved(Decision::RequireLogin);
                }
                SplashState::Checking => match self.status_rx.as_ref().map(Receiver::recv) {
                    Some(Ok(status)) => self.record(status),
                    Some(Err(_)) | None => self.record_lost_worker(),
                },
                SplashState::Checked(status) => {
                    thread::sleep(self.remaining_dwell());
                    self.state = SplashState::Resolved(status.decision());
                }
                SplashState::Resolved(decision) => return decision,
            }
        }
    }

    fn record(&mut self, status: SessionStatus) {
        debug!(?status, "session check finished");
        self.status_rx = None;
        self.state = SplashState::Checked(status);
    }

    fn record_lost_worker(&mut self) {
        warn!("session check worker exited without a result");
        self.record(SessionStatus::Absent);
    }

    fn remaining_dwell(&self) -> Duration {
        let elapsed = self
            .started
            .map(|started| started.elapsed())
            .unwrap_or(self.dwell);
        self.dwell.saturating_sub(elapsed)
    }
}

impl Default for Splash {
    fn default() -> Self {
        Self::new(DEFAULT_DWELL)
    }
}
