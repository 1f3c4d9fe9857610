//! # Rank Engine
//!
//! Maps a customer's cumulative redemption count to a loyalty tier.
//!
//! ## Threshold Table
//! ```text
//! redeems:   0    3    6    11    21    51
//! tier:      Bronze Silver Gold Platinum Diamond Titan
//! ```
//!
//! The tier is cosmetic: a status label and badge color on the membership
//! card, derived solely from `redeems`. It is computed on demand and never
//! stored.

use serde::{Deserialize, Serialize};

// =============================================================================
// Tier
// =============================================================================

/// Loyalty tier, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
    Titan,
}

/// Ascending threshold table. Must stay sorted by `min_redeems`; `rank_for`
/// scans it from the top down.
const TIER_TABLE: [(Tier, i64); 6] = [
    (Tier::Bronze, 0),
    (Tier::Silver, 3),
    (Tier::Gold, 6),
    (Tier::Platinum, 11),
    (Tier::Diamond, 21),
    (Tier::Titan, 51),
];

impl Tier {
    /// Minimum cumulative redemptions for this tier.
    pub fn min_redeems(self) -> i64 {
        TIER_TABLE
            .iter()
            .find(|(tier, _)| *tier == self)
            .map(|(_, min)| *min)
            .unwrap_or(0)
    }

    /// Display label shown on the card.
    pub fn label(self) -> &'static str {
        match self {
            Tier::Bronze => "Bronze",
            Tier::Silver => "Silver",
            Tier::Gold => "Gold",
            Tier::Platinum => "Platinum",
            Tier::Diamond => "Diamond",
            Tier::Titan => "Titan",
        }
    }

    /// Badge color rendered behind the label.
    pub fn color(self) -> &'static str {
        match self {
            Tier::Bronze => "#cd7f32",
            Tier::Silver => "#c0c0c0",
            Tier::Gold => "#ffd700",
            Tier::Platinum => "#e5e4e2",
            Tier::Diamond => "#b9f2ff",
            Tier::Titan => "#4a4a4a",
        }
    }

    /// The next tier up, or `None` at the top of the table.
    pub fn next(self) -> Option<Tier> {
        let idx = TIER_TABLE.iter().position(|(tier, _)| *tier == self)?;
        TIER_TABLE.get(idx + 1).map(|(tier, _)| *tier)
    }
}

// =============================================================================
// Rank Lookup
// =============================================================================

/// Returns the highest tier whose threshold is at or below `redeems`.
///
/// Scans the table from highest to lowest and returns the first match.
/// Anything below every threshold falls back to the lowest tier; with the
/// 0-floor entry that only happens for negative input, which is not
/// clamped or rejected here.
pub fn rank_for(redeems: i64) -> Tier {
    for (tier, min) in TIER_TABLE.iter().rev() {
        if redeems >= *min {
            return *tier;
        }
    }
    TIER_TABLE[0].0
}

/// Redemptions remaining until the next tier, or `None` at the top tier.
///
/// Used by the card view to render "2 more rewards to Gold".
pub fn redeems_to_next_tier(redeems: i64) -> Option<i64> {
    rank_for(redeems)
        .next()
        .map(|next| next.min_redeems() - redeems)
}

// =============================================================================
// Unit Tests
// =============================================================================
