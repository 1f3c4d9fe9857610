//! # stampcard-core: Pure Business Logic for Stampcard
//!
//! This crate is the heart of the loyalty program. It contains all business
//! rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  HTTP routes (apps/server)                                          │
//! │    enroll, adjust_stamps, redeem, card view, CSV export, ...        │
//! └───────────────────────────────┬─────────────────────────────────────┘
//! │
//! ┌───────────────────────────────▼─────────────────────────────────────┐
//! │  ★ stampcard-core (THIS CRATE) ★                                    │
//! │                                                                     │
//! │   ┌─────────┐ ┌────────┐ ┌──────┐ ┌───────────┐ ┌────────────┐     │
//! │   │  types  │ │ ledger │ │ rank │ │ member_id │ │ validation │     │
//! │   └─────────┘ └────────┘ └──────┘ └───────────┘ └────────────┘     │
//! │                                                                     │
//! │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS                │
//! └───────────────────────────────┬─────────────────────────────────────┘
//! │
//! ┌───────────────────────────────▼─────────────────────────────────────┐
//! │  stampcard-db (SQLite queries, migrations, repositories)            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Customer, Admin)
//! - [`ledger`] - Stamp ledger transitions (grant, revoke, redeem)
//! - [`rank`] - Loyalty tier derived from cumulative redemptions
//! - [`member_id`] - `MSC####` member-code assignment and parsing
//! - [`lookup`] - Card-login credential classification
//! - [`validation`] - Field validation
//! - [`export`] - CSV flattening of customer lists
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output, no side effects
//! 2. **No I/O**: database, network and file system access are forbidden here
//! 3. **Explicit Errors**: all errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod export;
pub mod ledger;
pub mod lookup;
pub mod member_id;
pub mod rank;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use ledger::{StampAdjustment, StampLedger};
pub use rank::{rank_for, Tier};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Stamps required to unlock one reward.
///
/// The visible progress wheel is capped here; `lifetime_stamps` is not.
pub const STAMPS_PER_REWARD: i64 = 5;

/// Prefix of every human-facing member code (`MSC0001`, `MSC0042`, ...).
pub const MEMBER_CODE_PREFIX: &str = "MSC";
