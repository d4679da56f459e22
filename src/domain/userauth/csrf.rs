//! One-time CSRF tokens for the authorization handshake.
//!
//! A token is issued when the broadcaster starts the flow and travels through
//! the identity provider as the opaque `state` parameter. It must come back
//! unchanged within [`TOKEN_LIFETIME_MINUTES`] and is accepted only once.
//!
//! Tokens live in memory only; they are dropped with the store.

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};
use rand::rngs::OsRng;
use rand::RngCore;

/// How long an issued token remains valid.
pub const TOKEN_LIFETIME_MINUTES: i64 = 15;

const TOKEN_BYTES: usize = 16;

#[derive(Debug, Clone)]
struct CsrfToken {
    value: String,
    expires_at: DateTime<Utc>,
}

/// Process-wide buffer of outstanding CSRF tokens.
#[derive(Debug, Default)]
pub struct CsrfTokenStore {
    tokens: Mutex<Vec<CsrfToken>>,
}

impl CsrfTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a fresh token: 128 random bits, hex-encoded.
    ///
    /// Expired tokens are purged before the new one is stored.
    pub fn issue(&self) -> String {
        self.issue_at(Utc::now())
    }

    /// Verifies and consumes a token.
    ///
    /// Returns true at most once per issued token, and never after it has
    /// expired. Expired tokens are purged as a side effect.
    pub fn consume(&self, value: &str) -> bool {
        self.consume_at(value, Utc::now())
    }

    pub(crate) fn issue_at(&self, now: DateTime<Utc>) -> String {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        let value = hex::encode(bytes);

        let mut tokens = self.tokens.lock().unwrap_or_else(PoisonError::into_inner);
        tokens.retain(|token| token.expires_at >= now);
        tokens.push(CsrfToken {
            value: value.clone(),
            expires_at: now + Duration::minutes(TOKEN_LIFETIME_MINUTES),
        });
        value
    }

    pub(crate) fn consume_at(&self, value: &str, now: DateTime<Utc>) -> bool {
        let mut tokens = self.tokens.lock().unwrap_or_else(PoisonError::into_inner);

        let mut found = false;
        tokens.retain(|token| {
            if token.expires_at < now {
                return false;
            }
            if !found && token.value == value {
                found = true;
                return false;
            }
            true
        });
        found
    }

    /// Number of tokens currently held, expired or not.
    pub fn len(&self) -> usize {
        self.tokens.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
