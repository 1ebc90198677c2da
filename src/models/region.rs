//! Region standings model.

use serde::{Deserialize, Serialize};

/// A competing region with its aggregate score and battle counters.
///
/// Counters arrive precomputed and are only displayed, never re-derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    /// Region name (unique within a snapshot)
    pub name: String,

    /// Aggregate score, the sole sort key
    #[serde(default)]
    pub battle_score: i64,

    /// Number of battles fought
    #[serde(default)]
    pub total_battles: u32,

    /// Group wins
    #[serde(default)]
    pub wins: u32,

    /// Group second places
    #[serde(default)]
    pub second_places: u32,

    /// Group third places
    #[serde(default)]
    pub third_places: u32,
}

impl Region {
    /// Create a region with a score and all counters at zero.
    pub fn new(name: impl Into<String>, battle_score: i64) -> Self {
        Self {
            name: name.into(),
            battle_score,
            total_battles: 0,
            wins: 0,
            second_places: 0,
            third_places: 0,
        }
    }

    /// Builder method to set total battles.
    pub fn with_total_battles(mut self, total: u32) -> Self {
        self.total_battles = total;
        self
    }

    /// Builder method to set the placement counters.
    pub fn with_placements(mut self, wins: u32, second: u32, third: u32) -> Self {
        self.wins = wins;
        self.second_places = second;
        self.third_places = third;
        self
    }
}
