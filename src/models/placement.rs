//! Podium placements within a completed group.

use serde::{Deserialize, Serialize};

/// A podium position in a completed group.
///
/// Points are display annotations only; they are never added back into a
/// region's battle score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Podium {
    First,
    Second,
    Third,
}

impl Podium {
    /// All podium positions, winner first.
    pub const ALL: [Podium; 3] = [Podium::First, Podium::Second, Podium::Third];

    /// Points awarded for this position.
    pub fn points(&self) -> u32 {
        match self {
            Podium::First => 5,
            Podium::Second => 3,
            Podium::Third => 1,
        }
    }

    /// Rank equivalent of this position (1 = winner).
    pub fn rank(&self) -> usize {
        match self {
            Podium::First => 1,
            Podium::Second => 2,
            Podium::Third => 3,
        }
    }

    /// Points annotation shown next to the region, e.g. `+5 pts`.
    pub fn points_label(&self) -> String {
        match self.points() {
            1 => "+1 pt".to_string(),
            n => format!("+{} pts", n),
        }
    }
}

impl std::fmt::Display for Podium {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Podium::First => write!(f, "first"),
            Podium::Second => write!(f, "second"),
            Podium::Third => write!(f, "third"),
        }
    }
}
