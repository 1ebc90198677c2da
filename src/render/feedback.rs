//! Error banner and placeholder row shown when loading fails.

use tracing::debug;

use super::GOLD_MEDAL;
use crate::dom::{Document, Element, Node, Surface};

/// User-facing message for any load failure.
pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load tournament data. Please try again later.";

pub const WARNING_ICON: &str = "⚠️";

/// Build an error banner.
pub fn error_banner(message: &str) -> Element {
    Element::new("div").class("error-message").child(
        Element::new("div")
            .class("error-content")
            .child(Element::new("span").class("error-icon").text(WARNING_ICON))
            .child(Element::new("span").class("error-text").text(message)),
    )
}

/// Prepend an error banner to the main content area.
///
/// Earlier banners are left in place, so repeated failures stack with the
/// newest on top. Returns `true` if a banner was inserted.
pub fn show_error(doc: &mut Document, message: &str) -> bool {
    let Some(main) = doc.surface_mut(Surface::MainContent) else {
        debug!("Surface {} not found, banner dropped", Surface::MainContent);
        return false;
    };

    main.prepend(error_banner(message));
    true
}

/// Placeholder row shown in place of the standings.
pub fn placeholder_row() -> Element {
    Element::new("tr")
        .class("standings-row")
        .child(
            Element::new("td")
                .class("rank-cell")
                .child(Element::new("span").class("rank-number").text("1"))
                .child(Element::new("span").class("rank-medal").text(GOLD_MEDAL)),
        )
        .child(
            Element::new("td").class("region-cell").child(
                Element::new("div")
                    .class("region-info")
                    .child(Element::new("strong").text("Loading...")),
            ),
        )
        .child(
            Element::new("td")
                .class("score-cell")
                .child(Element::new("strong").class("score-value").text("-")),
        )
        .child(
            Element::new("td")
                .class("battles-cell")
                .text("- ")
                .child(Element::new("small").text("battles")),
        )
        .child(
            Element::new("td")
                .class("stats-cell")
                .child(Element::new("small").class("stats-breakdown").text("-")),
        )
}

/// Replace the standings body with the placeholder row so the table is
/// never left blank. Returns `true` if the table body was written.
pub fn show_fallback_table(doc: &mut Document) -> bool {
    let Some(tbody) = doc.surface_mut(Surface::StandingsBody) else {
        return false;
    };

    tbody.replace_children(vec![Node::Element(placeholder_row())]);
    true
}
