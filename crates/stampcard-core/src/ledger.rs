//! # Stamp Ledger
//!
//! The rules governing how a customer's stamp counters change in response to
//! staff actions.
//!
//! ## Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Grant    stamps ← min(stamps + 1, 5)   lifetime ← lifetime + 1     │
//! │  Revoke   stamps ← max(stamps − 1, 0)   lifetime unchanged          │
//! │  Redeem   requires stamps == 5          stamps ← 0, redeems + 1     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Grant is deliberately asymmetric: the 5-stamp ceiling bounds the visible
//! progress wheel, not the historical count, so `lifetime_stamps` advances
//! even when the wheel is already full.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::STAMPS_PER_REWARD;

// =============================================================================
// Stamp Adjustment
// =============================================================================

/// A staff stamp adjustment: one stamp at a time, up or down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StampAdjustment {
    /// Delta = +1.
    Grant,
    /// Delta = -1.
    Revoke,
}

// =============================================================================
// Stamp Ledger
// =============================================================================

/// Per-customer stamp state: `(stamps, lifetime_stamps, redeems)`.
///
/// A plain value: load it from a [`crate::types::Customer`], apply
/// transitions, write it back through the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StampLedger {
    /// Stamps toward the current reward cycle, `0..=5`.
    pub stamps: i64,
    /// Cumulative grants ever issued, uncapped.
    pub lifetime_stamps: i64,
    /// Rewards redeemed to date.
    pub redeems: i64,
}

impl StampLedger {
    /// Grants one stamp.
    ///
    /// The wheel saturates at the ceiling; the lifetime count advances
    /// unconditionally.
    pub fn grant_stamp(&mut self) {
        self.stamps = (self.stamps + 1).min(STAMPS_PER_REWARD);
        self.lifetime_stamps += 1;
    }

    /// Revokes one stamp. No underflow below zero; the lifetime count is
    /// untouched.
    pub fn revoke_stamp(&mut self) {
        self.stamps = (self.stamps - 1).max(0);
    }

    /// Applies a staff adjustment.
    pub fn adjust(&mut self, adjustment: StampAdjustment) {
        match adjustment {
            StampAdjustment::Grant => self.grant_stamp(),
            StampAdjustment::Revoke => self.revoke_stamp(),
        }
    }

    /// Converts a full stamp wheel into one reward.
    ///
    /// ## Errors
    /// [`CoreError::RewardLocked`] when the wheel is not full. The gate lives
    /// here so every caller enforces it, not just the screen that hides the
    /// redeem button.
    pub fn redeem(&mut self) -> CoreResult<()> {
        if !self.reward_unlocked() {
            return Err(CoreError::RewardLocked {
                stamps: self.stamps,
                required: STAMPS_PER_REWARD,
            });
        }

        self.stamps = 0;
        self.redeems += 1;
        Ok(())
    }

    /// Whether the redeem transition may be offered. Derived, never stored.
    #[inline]
    pub fn reward_unlocked(&self) -> bool {
        self.stamps == STAMPS_PER_REWARD
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger(stamps: i64, lifetime_stamps: i64, redeems: i64) -> StampLedger {
        StampLedger {
            stamps,
            lifetime_stamps,
            redeems,
        }
    }

    #[test]
    fn test_grant_below_ceiling_bumps_both_counters() {
        for stamps in 0..STAMPS_PER_REWARD {
            let mut l = ledger(stamps, 10, 2);
            l.grant_stamp();
            assert_eq!(l.stamps, stamps + 1);
            assert_eq!(l.lifetime_stamps, 11);
            assert_eq!(l.redeems, 2);
        }
    }

    #[test]
    fn test_grant_at_ceiling_still_advances_lifetime() {
        let mut l = ledger(5, 10, 2);
        l.grant_stamp();
        assert_eq!(l.stamps, 5);
        assert_eq!(l.lifetime_stamps, 11);
    }

    #[test]
    fn test_revoke_no_underflow() {
        let mut l = ledger(0, 10, 2);
        l.revoke_stamp();
        assert_eq!(l.stamps, 0);
        assert_eq!(l.lifetime_stamps, 10);
    }

    #[test]
    fn test_revoke_leaves_lifetime_unchanged() {
        let mut l = ledger(3, 10, 2);
        l.revoke_stamp();
        assert_eq!(l.stamps, 2);
        assert_eq!(l.lifetime_stamps, 10);
    }

    #[test]
    fn test_redeem_requires_full_wheel() {
        for stamps in 0..STAMPS_PER_REWARD {
            let mut l = ledger(stamps, 10, 2);
            let err = l.redeem().unwrap_err();
            assert!(matches!(err, CoreError::RewardLocked { .. }));
            // Failed redeem must not mutate anything.
            assert_eq!(l, ledger(stamps, 10, 2));
        }
    }

    #[test]
    fn test_redeem_resets_wheel_and_counts_reward() {
        let mut l = ledger(5, 12, 2);
        l.redeem().unwrap();
        assert_eq!(l, ledger(0, 12, 3));
    }

    #[test]
    fn test_worked_example() {
        // {4,10,2} → grant → {5,11,2} → grant → {5,12,2} → redeem → {0,12,3}
        let mut l = ledger(4, 10, 2);
        l.grant_stamp();
        assert_eq!(l, ledger(5, 11, 2));
        l.grant_stamp();
        assert_eq!(l, ledger(5, 12, 2));
        l.redeem().unwrap();
        assert_eq!(l, ledger(0, 12, 3));
    }

    #[test]
    fn test_adjust_dispatch() {
        let mut l = ledger(2, 2, 0);
        l.adjust(StampAdjustment::Grant);
        assert_eq!(l.stamps, 3);
        l.adjust(StampAdjustment::Revoke);
        assert_eq!(l.stamps, 2);
        assert_eq!(l.lifetime_stamps, 3);
    }
}
