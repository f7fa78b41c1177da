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

//! Login, registration and logout.
//!
//! These flows sit between the auth service and the device store: a login
//! persists the session checked at the next start-up, a logout removes it.

use chrono::TimeDelta;
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    backend::{AuthService, DocumentStore, codes},
    error::{AccountError, BackendError, StoreError},
    model::{Timestamp, UserProfile},
    session::{self, Clock, SessionRecord},
    store::KeyValueStore,
};

pub const MIN_PASSWORD_LEN: usize = 8;

/// Avatar assigned to new accounts until the user uploads one.
pub const DEFAULT_PHOTO_URL: &str = "https://images.unsplash.com/photo-1522075469751-3a6694fb2f61?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=2680&q=80";

/// Client-side rejection of a registration form.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Password and confirmation do not match.")]
    PasswordMismatch,

    #[error("Password must be at least 8 characters long.")]
    PasswordTooShort,

    #[error("Password must contain both letters and numbers.")]
    PasswordNotMixed,
}

#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Whether the login button should be enabled.
pub fn login_ready(email: &str, password: &str) -> bool {
    !email.trim().is_empty() && !password.trim().is_empty()
}

/// Whether the sign-up button should be enabled.
pub fn signup_ready(form: &RegistrationForm) -> bool {
    [
        &form.full_name,
        &form.email,
        &form.password,
        &form.confirm_password,
    ]
    .iter()
    .all(|field| !field.trim().is_empty())
}

/// Checks the password rules before anything is sent to the auth service.
pub fn validate_registration(password: &str, confirm: &str) -> Result<(), RegistrationError> {
    if password != confirm {
        return Err(RegistrationError::PasswordMismatch);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(RegistrationError::PasswordTooShort);
    }

    let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !(has_letter && has_digit) {
        return Err(RegistrationError::PasswordNotMixed);
    }

    Ok(())
}

/// Message shown to the user when a login attempt fails.
pub fn login_error_message(error: &AccountError) -> &'static str {
    match error {
        AccountError::Backend(e) => match e.code.as_str() {
            codes::INVALID_EMAIL => "Invalid email address.",
            codes::WRONG_PASSWORD => "Wrong password.",
            codes::INVALID_LOGIN => "Incorrect email or password, please check again.",
            _ => "Something went wrong while logging in.",
        },
        _ => "Something went wrong while logging in.",
    }
}

/// Message shown to the user when registration fails.
pub fn registration_error_message(error: &AccountError) -> String {
    match error {
        AccountError::Invalid(e) => e.to_string(),
        AccountError::Backend(e) => match e.code.as_str() {
            codes::EMAIL_IN_USE => "Email is already registered!".to_string(),
            codes::INVALID_EMAIL => "Invalid email address.".to_string(),
            codes::WEAK_PASSWORD => "Password is too weak.".to_string(),
            _ => "Something went wrong while signing up.".to_string(),
        },
        AccountError::Session(_) => "Something went wrong while signing up.".to_string(),
    }
}

/// Signs in and persists a session valid for `lifetime`.
///
/// Nothing is written to `store` unless both the sign-in and the token fetch
/// succeed.
pub fn login(
    auth: &impl AuthService,
    store: &impl KeyValueStore,
    clock: &impl Clock,
    email: &str,
    password: &str,
    lifetime: TimeDelta,
) -> Result<SessionRecord, AccountError> {
    auth.sign_in(email, password).inspect_err(|e| {
        warn!(code = %e.code, "login rejected");
    })?;

    let token = auth.id_token()?;
    let record = session::begin_session(store, clock, &token, lifetime)?;
    info!("logged in");

    Ok(record)
}

/// Creates an account and its profile document. Returns the new user id.
pub fn register(
    auth: &impl AuthService,
    docs: &impl DocumentStore,
    clock: &impl Clock,
    form: &RegistrationForm,
) -> Result<String, AccountError> {
    validate_registration(&form.password, &form.confirm_password)?;

    let uid = auth.sign_up(&form.email, &form.password).inspect_err(|e| {
        warn!(code = %e.code, "registration rejected");
    })?;

    let profile = UserProfile {
        full_name: form.full_name.clone(),
        email: form.email.clone(),
        photo_url: DEFAULT_PHOTO_URL.to_string(),
        followers_count: 0,
        following_count: 0,
        total_post: 0,
        created_at: Timestamp::from_epoch_millis(clock.now_millis()),
    };
    docs.put_user(&uid, profile)?;
    info!(%uid, "account registered");

    Ok(uid)
}

/// Signs out and forgets the persisted session.
///
/// The session is removed even when the auth service fails to sign out, so
/// the next start-up always lands on the login screen. If both steps fail,
/// both errors are returned.
pub fn logout(auth: &impl AuthService, store: &impl KeyValueStore) -> Result<(), LogoutError> {
    let signed_out = auth.sign_out();
    if let Err(e) = &signed_out {
        warn!(error = %e, "sign-out failed, clearing local session anyway");
    }

    match (signed_out, session::end_session(store)) {
        (Ok(()), Ok(())) => Ok(()),
        (Err(e), Ok(())) => Err(LogoutError::Backend(e)),
        (Ok(()), Err(e)) => Err(LogoutError::Store(e)),
        (Err(sign_out), Err(clear)) => Err(LogoutError::Both { sign_out, clear }),
    }
}

#[derive(Error, Debug)]
pub enum LogoutError {
    #[error("sign-out failed: {0}")]
    Backend(#[from] BackendError),

    #[error("failed to clear session: {0}")]
    Store(#[from] StoreError),

    #[error("sign-out failed: {sign_out}; failed to clear session: {clear}")]
    Both {
        sign_out: BackendError,
        clear: StoreError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        backend::memory::{MemoryAuth, MemoryDocuments},
        session::{
            Decision, FixedClock, SESSION_KEY, SessionValidator, session_lifetime,
            tests::BrokenStore,
        },
        store::MemoryStore,
    };

    const NOW: i64 = 1_700_000_000_000;

    fn form(password: &str, confirm: &str) -> RegistrationForm {
        RegistrationForm {
            full_name: "Ayu Lestari".to_string(),
            email: "ayu@example.com".to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn login_button_needs_both_fields() {
        assert!(login_ready("a@b.c", "pw"));
        assert!(!login_ready("  ", "pw"));
        assert!(!login_ready("a@b.c", "   "));
    }

    #[test]
    fn signup_button_needs_every_field() {
        assert!(signup_ready(&form("abc12345", "abc12345")));
        let mut incomplete = form("abc12345", "abc12345");
        incomplete.full_name = " ".to_string();
        assert!(!signup_ready(&incomplete));
    }

    #[test]
    fn password_rules() {
        assert_eq!(
            validate_registration("abc12345", "abc12346"),
            Err(RegistrationError::PasswordMismatch)
        );
        assert_eq!(
            validate_registration("abc123", "abc123"),
            Err(RegistrationError::PasswordTooShort)
        );
        assert_eq!(
            validate_registration("abcdefgh", "abcdefgh"),
            Err(RegistrationError::PasswordNotMixed)
        );
        assert_eq!(
            validate_registration("12345678", "12345678"),
            Err(RegistrationError::PasswordNotMixed)
        );
        assert_eq!(validate_registration("abc12345", "abc12345"), Ok(()));
    }

    #[test]
    fn register_then_login_persists_session() {
        let auth = MemoryAuth::new();
        let docs = MemoryDocuments::new();
        let store = MemoryStore::new();
        let clock = FixedClock(NOW);

        let uid = register(&auth, &docs, &clock, &form("abc12345", "abc12345")).unwrap();
        let profile = docs.user(&uid).unwrap();
        assert_eq!(profile.full_name, "Ayu Lestari");
        assert_eq!(profile.total_post, 0);
        assert_eq!(profile.created_at, Timestamp::from_epoch_millis(NOW));

        auth.sign_out().unwrap();
        let record = login(
            &auth,
            &store,
            &clock,
            "ayu@example.com",
            "abc12345",
            session_lifetime(30),
        )
        .unwrap();

        assert_eq!(record.token, format!("token-{uid}"));
        assert_eq!(
            SessionValidator::new(&store, clock).check_session(),
            Decision::EnterApp
        );
    }

    #[test]
    fn invalid_registration_never_reaches_auth() {
        let auth = MemoryAuth::new();
        let docs = MemoryDocuments::new();

        let err = register(&auth, &docs, &FixedClock(NOW), &form("short1", "short1")).unwrap_err();
        assert_eq!(
            registration_error_message(&err),
            "Password must be at least 8 characters long."
        );
        assert_eq!(auth.current_user_id(), None);
    }

    #[test]
    fn duplicate_registration_reports_email_in_use() {
        let auth = MemoryAuth::new();
        let docs = MemoryDocuments::new();
        let clock = FixedClock(NOW);

        register(&auth, &docs, &clock, &form("abc12345", "abc12345")).unwrap();
        let err = register(&auth, &docs, &clock, &form("abc12345", "abc12345")).unwrap_err();
        assert_eq!(registration_error_message(&err), "Email is already registered!");
    }

    #[test]
    fn failed_login_stores_nothing() {
        let auth = MemoryAuth::new();
        let store = MemoryStore::new();
        auth.sign_up("ayu@example.com", "abc12345").unwrap();
        auth.sign_out().unwrap();

        let err = login(
            &auth,
            &store,
            &FixedClock(NOW),
            "ayu@example.com",
            "nope",
            session_lifetime(30),
        )
        .unwrap_err();

        assert_eq!(login_error_message(&err), "Wrong password.");
        assert_eq!(store.get(SESSION_KEY).unwrap(), None);
    }

    #[test]
    fn logout_clears_session_even_if_sign_out_fails() {
        let auth = MemoryAuth::new();
        let store = MemoryStore::new();
        auth.sign_up("ayu@example.com", "abc12345").unwrap();
        login(
            &auth,
            &store,
            &FixedClock(NOW),
            "ayu@example.com",
            "abc12345",
            session_lifetime(30),
        )
        .unwrap();

        auth.fail_sign_out();
        assert!(matches!(logout(&auth, &store), Err(LogoutError::Backend(_))));
        assert_eq!(store.get(SESSION_KEY).unwrap(), None);
    }

    #[test]
    fn logout_reports_both_failures() {
        let auth = MemoryAuth::new();
        auth.sign_up("ayu@example.com", "abc12345").unwrap();
        auth.fail_sign_out();

        let err = logout(&auth, &BrokenStore).unwrap_err();
        let LogoutError::Both { sign_out, clear } = &err else {
            panic!("expected both failures, got {err:?}");
        };
        assert_eq!(sign_out.code, "unavailable");
        assert!(matches!(clear, StoreError::Unavailable(_)));
    }

    #[test]
    fn logout_reports_store_failure_alone() {
        let auth = MemoryAuth::new();
        auth.sign_up("ayu@example.com", "abc12345").unwrap();

        assert!(matches!(
            logout(&auth, &BrokenStore),
            Err(LogoutError::Store(_))
        ));
    }
}
