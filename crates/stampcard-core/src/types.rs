//! # Domain Types
//!
//! Core domain types used throughout Stampcard.
//!
//! ## Dual-Key Identity Pattern
//! Every customer has:
//! - `id`: auto-incrementing row identity - immutable, used for store relations
//! - `member_code`: `MSC####` - human-facing, printed on the membership card

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ledger::StampLedger;
use crate::rank::{rank_for, Tier};
use crate::STAMPS_PER_REWARD;

// =============================================================================
// Customer
// =============================================================================

/// A loyalty-program customer record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    /// Row identity assigned by the store.
    pub id: i64,

    /// Human-facing member code (`MSC0001`), unique, printed on the card.
    pub member_code: String,

    /// Display name.
    pub name: String,

    /// Mobile number; usable as a card-login credential.
    pub mobile: String,

    /// Stamps toward the current reward cycle. Always in `0..=5`.
    pub stamps: i64,

    /// Cumulative stamp-grants ever issued. Uncapped, never decreases.
    pub lifetime_stamps: i64,

    /// Rewards redeemed to date. Never decreases; drives the rank.
    pub redeems: i64,

    /// Soft-delete flag; archived ("vault") records stay queryable.
    pub is_deleted: bool,

    /// When the customer was enrolled. Active listings sort on this, newest
    /// first.
    pub created_at: DateTime<Utc>,

    /// When the record was last mutated.
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    /// Returns the customer's counters as a stamp ledger.
    ///
    /// The ledger is the value the transition rules operate on; write the
    /// result back through the repository afterwards.
    #[inline]
    pub fn ledger(&self) -> StampLedger {
        StampLedger {
            stamps: self.stamps,
            lifetime_stamps: self.lifetime_stamps,
            redeems: self.redeems,
        }
    }

    /// Current loyalty tier, derived from cumulative redemptions.
    #[inline]
    pub fn tier(&self) -> Tier {
        rank_for(self.redeems)
    }

    /// Whether the stamp wheel is full and a redeem may be offered.
    ///
    /// Derived, never stored.
    #[inline]
    pub fn reward_unlocked(&self) -> bool {
        self.stamps == STAMPS_PER_REWARD
    }
}

// =============================================================================
// Admin
// =============================================================================

/// A staff account.
///
/// Credentials are stored hashed; this type never carries plaintext secrets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Admin {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    /// Question shown during credential recovery.
    pub security_question: String,
    /// Hash of the recovery answer; compared the same way as a password.
    pub security_answer_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Input for registering a staff account. Hashes are produced by the app
/// layer before this reaches the repository.
#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub security_question: String,
    pub security_answer_hash: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
