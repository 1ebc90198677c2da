//! Overall standings table.

use serde::Serialize;
use tracing::{debug, warn};

use super::{medal_for_rank, BRONZE_MEDAL, SILVER_MEDAL, TROPHY};
use crate::dom::{Document, Element, Node, Surface};
use crate::models::Region;

/// A region with its position in the standings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing<'a> {
    /// 1-based position after sorting; ties get consecutive distinct ranks
    pub rank: usize,
    pub medal: &'static str,
    #[serde(flatten)]
    pub region: &'a Region,
}

/// Rank regions by battle score, highest first.
///
/// The sort is stable, so equal scores keep their input order.
pub fn rank_regions(regions: &[Region]) -> Vec<Standing<'_>> {
    let mut sorted: Vec<&Region> = regions.iter().collect();
    sorted.sort_by(|a, b| b.battle_score.cmp(&a.battle_score));

    sorted
        .into_iter()
        .enumerate()
        .map(|(i, region)| Standing {
            rank: i + 1,
            medal: medal_for_rank(i + 1),
            region,
        })
        .collect()
}

/// Placement badges for a region, omitting any zero count.
pub fn stat_badges(region: &Region) -> Vec<String> {
    [
        (TROPHY, region.wins),
        (SILVER_MEDAL, region.second_places),
        (BRONZE_MEDAL, region.third_places),
    ]
    .into_iter()
    .filter(|(_, count)| *count > 0)
    .map(|(glyph, count)| format!("{}{}", glyph, count))
    .collect()
}

/// Build one `tr.standings-row`.
pub fn standings_row(standing: &Standing<'_>) -> Element {
    let region = standing.region;

    let rank_cell = Element::new("td")
        .class("rank-cell")
        .child(
            Element::new("span")
                .class("rank-number")
                .text(standing.rank.to_string()),
        )
        .child(Element::new("span").class("rank-medal").text(standing.medal));

    let region_cell = Element::new("td").class("region-cell").child(
        Element::new("div")
            .class("region-info")
            .child(Element::new("strong").text(region.name.as_str())),
    );

    let score_cell = Element::new("td").class("score-cell").child(
        Element::new("strong")
            .class("score-value")
            .text(region.battle_score.to_string()),
    );

    let battles_cell = Element::new("td")
        .class("battles-cell")
        .text(format!("{} ", region.total_battles))
        .child(Element::new("small").text("battles"));

    let badges = stat_badges(region);
    let mut breakdown = Element::new("small").class("stats-breakdown");
    if !badges.is_empty() {
        breakdown = breakdown.text(badges.join(" "));
    }
    let stats_cell = Element::new("td").class("stats-cell").child(breakdown);

    Element::new("tr")
        .class("standings-row")
        .child(rank_cell)
        .child(region_cell)
        .child(score_cell)
        .child(battles_cell)
        .child(stats_cell)
}

/// Replace the standings table body with one row per ranked region.
///
/// Returns `true` if the table body was written.
pub fn render_standings(doc: &mut Document, regions: Option<&[Region]>) -> bool {
    let Some(regions) = regions else {
        warn!("No regions data found");
        return false;
    };

    let Some(tbody) = doc.surface_mut(Surface::StandingsBody) else {
        warn!("Surface {} not found", Surface::StandingsBody);
        return false;
    };

    let rows: Vec<Node> = rank_regions(regions)
        .iter()
        .map(|s| Node::Element(standings_row(s)))
        .collect();

    debug!("Rendering {} standings rows", rows.len());
    tbody.replace_children(rows);
    true
}
