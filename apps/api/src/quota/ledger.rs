//! Token ledger: owns every issued token and its daily word budget.
//!
//! # Concurrency
//! Tokens and windows live in `DashMap`s. `reserve` does its check-and-commit while holding the
//! entry's shard guard, so two reservations on the same token serialize, while reservations on
//! tokens in other shards never contend. Nothing inside a guard awaits or does I/O.
//!
//! # Admission rule
//! A reservation is admitted when `used + words <= limit`. Landing exactly on the limit is
//! allowed; every later positive reservation in that window is then rejected. A rejected
//! reservation leaves the window untouched.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use tracing::{debug, info};

use crate::quota::clock::{Clock, SystemClock};
use crate::quota::token::{Token, TokenRecord};
use crate::quota::window::QuotaWindow;

/// Outcome of a single `reserve` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reservation {
    pub admitted: bool,
    /// Budget left after this call. Floored at zero.
    pub remaining: u64,
    pub limit: u64,
    pub resets_at: DateTime<Utc>,
}

/// Read-only snapshot of a token's current window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    pub used: u64,
    pub limit: u64,
    pub remaining: u64,
    pub resets_at: DateTime<Utc>,
}

pub struct QuotaLedger {
    limit: u64,
    clock: Arc<dyn Clock>,
    tokens: DashMap<Token, TokenRecord>,
    windows: DashMap<Token, QuotaWindow>,
}

impl QuotaLedger {
    /// Ledger on wall-clock time with a daily budget of `limit` words per token.
    pub fn new(limit: u64) -> Self {
        Self::with_clock(limit, Arc::new(SystemClock))
    }

    pub fn with_clock(limit: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            limit,
            clock,
            tokens: DashMap::new(),
            windows: DashMap::new(),
        }
    }

    /// Issues a new token for `owner`. Every call yields a distinct token, even for the same owner.
    pub fn issue(&self, owner: impl Into<String>) -> Token {
        let owner = owner.into();
        let token = Token::generate();
        info!(token = %token.short(), owner = %owner, "Issued access token");

        self.tokens.insert(
            token,
            TokenRecord {
                owner,
                created_at: self.clock.now(),
            },
        );
        token
    }

    /// Returns the record for `token`, or `None` if it was never issued.
    pub fn lookup(&self, token: &Token) -> Option<TokenRecord> {
        self.tokens.get(token).map(|record| record.clone())
    }

    /// Charges `words` against the token's current window if the whole amount fits.
    ///
    /// Opens the window on first use and replaces it once the clock reaches its reset instant.
    pub fn reserve(&self, token: &Token, words: u64) -> Reservation {
        let now = self.clock.now();
        let mut window = self
            .windows
            .entry(*token)
            .or_insert_with(|| QuotaWindow::open(now));

        if window.roll_over_if_expired(now) {
            debug!(token = %token.short(), resets_at = %window.resets_at, "Quota window rolled over");
        }

        let admitted = window.used.saturating_add(words) <= self.limit;
        if admitted {
            window.used += words;
        }

        Reservation {
            admitted,
            remaining: window.remaining(self.limit),
            limit: self.limit,
            resets_at: window.resets_at,
        }
    }

    /// Current usage for `token`. Applies the same lazy rollover as `reserve` but charges nothing.
    pub fn usage(&self, token: &Token) -> Usage {
        let now = self.clock.now();
        let mut window = self
            .windows
            .entry(*token)
            .or_insert_with(|| QuotaWindow::open(now));
        window.roll_over_if_expired(now);

        Usage {
            used: window.used,
            limit: self.limit,
            remaining: window.remaining(self.limit),
            resets_at: window.resets_at,
        }
    }
}
