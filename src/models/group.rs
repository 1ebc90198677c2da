//! Group (sub-tournament bracket) models.

use serde::{Deserialize, Serialize};

use super::Podium;

/// A finished group with its final podium.
///
/// Podium names are not checked against the snapshot's region list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedGroup {
    pub name: String,
    pub first: String,
    pub second: String,
    pub third: String,

    /// Completion date (ISO-8601 string, formatted at render time)
    pub date: String,
}

impl CompletedGroup {
    /// Region name holding the given podium position.
    pub fn region_at(&self, position: Podium) -> &str {
        match position {
            Podium::First => &self.first,
            Podium::Second => &self.second,
            Podium::Third => &self.third,
        }
    }

    /// Podium in display order.
    pub fn podium(&self) -> impl Iterator<Item = (Podium, &str)> + '_ {
        Podium::ALL.into_iter().map(move |p| (p, self.region_at(p)))
    }
}

/// The group currently in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentGroup {
    pub name: String,

    /// Free-form state, used verbatim as a style class
    pub status: String,

    /// Participating region names, in display order
    #[serde(default)]
    pub regions: Vec<String>,

    /// Start date (ISO-8601 string, formatted at render time)
    pub start_date: String,
}
