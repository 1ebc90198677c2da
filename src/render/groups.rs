//! Completed-group and current-group cards.

use tracing::debug;

use super::{format_date, medal_for_rank};
use crate::dom::{Document, Element, Node, Surface};
use crate::models::{CompletedGroup, CurrentGroup};

/// Visible status text of the current group card, whatever its status.
pub const CURRENT_STATUS_LABEL: &str = "Active";

fn group_header(name: &str, status_class: &str, status_label: &str) -> Element {
    Element::new("div")
        .class("group-header")
        .child(Element::new("h3").class("group-name").text(name))
        .child(
            Element::new("span")
                .class("group-status")
                .class(status_class)
                .text(status_label),
        )
}

fn group_date(prefix: &str, date: &str) -> Element {
    Element::new("div")
        .class("group-date")
        .child(Element::new("small").text(format!("{} {}", prefix, format_date(date))))
}

/// Build the card for one completed group.
pub fn completed_group_card(group: &CompletedGroup) -> Element {
    let placements = group.podium().map(|(position, region)| {
        Element::new("div")
            .class("group-placement")
            .child(
                Element::new("span")
                    .class("placement-medal")
                    .text(medal_for_rank(position.rank())),
            )
            .child(Element::new("span").class("placement-region").text(region))
            .child(
                Element::new("span")
                    .class("placement-points")
                    .text(position.points_label()),
            )
    });

    let results = Element::new("div")
        .class("group-results")
        .children(placements)
        .child(group_date("Completed", &group.date));

    Element::new("div")
        .class("group-card completed")
        .child(group_header(&group.name, "completed", "Completed"))
        .child(results)
}

/// Build the card for the group in progress.
///
/// The raw status only drives the style classes; the badge text is always
/// [`CURRENT_STATUS_LABEL`].
pub fn current_group_card(group: &CurrentGroup) -> Element {
    let regions = group.regions.iter().map(|name| {
        Element::new("div")
            .class("current-region")
            .child(Element::new("span").class("region-name").text(name.as_str()))
    });

    Element::new("div")
        .class("group-card")
        .class(&group.status)
        .child(group_header(&group.name, &group.status, CURRENT_STATUS_LABEL))
        .child(
            Element::new("div")
                .class("current-group-regions")
                .children(regions),
        )
        .child(group_date("Started", &group.start_date))
}

/// Replace the groups container with one card per completed group, in
/// input order. Returns `true` if the container was written.
pub fn render_completed_groups(doc: &mut Document, groups: Option<&[CompletedGroup]>) -> bool {
    let Some(groups) = groups else {
        debug!("No completed groups in snapshot");
        return false;
    };

    let Some(container) = doc.surface_mut(Surface::GroupsContainer) else {
        debug!("Surface {} not found", Surface::GroupsContainer);
        return false;
    };

    let cards: Vec<Node> = groups
        .iter()
        .map(|g| Node::Element(completed_group_card(g)))
        .collect();

    debug!("Rendering {} completed group cards", cards.len());
    container.replace_children(cards);
    true
}

/// Replace the current-group container with a single card.
/// Returns `true` if the container was written.
pub fn render_current_group(doc: &mut Document, group: Option<&CurrentGroup>) -> bool {
    let Some(group) = group else {
        debug!("No current group in snapshot");
        return false;
    };

    let Some(container) = doc.surface_mut(Surface::CurrentGroupContainer) else {
        debug!("Surface {} not found", Surface::CurrentGroupContainer);
        return false;
    };

    container.replace_children(vec![Node::Element(current_group_card(group))]);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scraper::{Html, Selector};

    fn completed(name: &str, podium: [&str; 3], date: &str) -> CompletedGroup {
        CompletedGroup {
            name: name.to_string(),
            first: podium[0].to_string(),
            second: podium[1].to_string(),
            third: podium[2].to_string(),
            date: date.to_string(),
        }
    }

    fn current(status: &str, regions: &[&str]) -> CurrentGroup {
        CurrentGroup {
            name: "Group C".to_string(),
            status: status.to_string(),
            regions: regions.iter().map(|r| r.to_string()).collect(),
            start_date: "2024-04-01".to_string(),
        }
    }

    fn select_texts(doc: &Document, selector: &str) -> Vec<String> {
        let html = Html::parse_document(&doc.to_html());
        let sel = Selector::parse(selector).unwrap();
        html.select(&sel).map(|el| el.text().collect()).collect()
    }

    #[test]
    fn test_completed_card_structure() {
        let card = completed_group_card(&completed(
            "Group A",
            ["North", "South", "East"],
            "2024-03-05",
        ));

        assert_eq!(
            card.outer_html(),
            concat!(
                r#"<div class="group-card completed">"#,
                r#"<div class="group-header"><h3 class="group-name">Group A</h3>"#,
                r#"<span class="group-status completed">Completed</span></div>"#,
                r#"<div class="group-results">"#,
                r#"<div class="group-placement"><span class="placement-medal">🥇</span>"#,
                r#"<span class="placement-region">North</span><span class="placement-points">+5 pts</span></div>"#,
                r#"<div class="group-placement"><span class="placement-medal">🥈</span>"#,
                r#"<span class="placement-region">South</span><span class="placement-points">+3 pts</span></div>"#,
                r#"<div class="group-placement"><span class="placement-medal">🥉</span>"#,
                r#"<span class="placement-region">East</span><span class="placement-points">+1 pt</span></div>"#,
                r#"<div class="group-date"><small>Completed Mar 5, 2024</small></div>"#,
                "</div></div>"
            )
        );
    }

    #[test]
    fn test_completed_groups_keep_input_order() {
        let mut doc = Document::default_page();
        let groups = vec![
            completed("Group Z", ["A", "B", "C"], "2024-01-01"),
            completed("Group A", ["C", "B", "A"], "2024-02-01"),
        ];

        assert!(render_completed_groups(&mut doc, Some(groups.as_slice())));
        assert_eq!(
            select_texts(&doc, "#groups-container .group-name"),
            vec!["Group Z", "Group A"]
        );
    }

    #[test]
    fn test_completed_placements_not_validated() {
        let mut doc = Document::default_page();
        let groups = vec![completed("Group A", ["Atlantis", "", "Nowhere"], "2024-01-01")];

        assert!(render_completed_groups(&mut doc, Some(groups.as_slice())));
        assert_eq!(
            select_texts(&doc, ".placement-region"),
            vec!["Atlantis", "", "Nowhere"]
        );
    }

    #[test]
    fn test_completed_invalid_date() {
        let card = completed_group_card(&completed("G", ["A", "B", "C"], "soon"));
        assert!(card.text_content().contains("Completed Invalid Date"));
    }

    #[test]
    fn test_completed_groups_replace_content() {
        let mut doc = Document::default_page();
        let groups = vec![completed("Group A", ["A", "B", "C"], "2024-01-01")];

        render_completed_groups(&mut doc, Some(groups.as_slice()));
        render_completed_groups(&mut doc, Some(groups.as_slice()));

        assert_eq!(select_texts(&doc, "#groups-container > .group-card").len(), 1);
    }

    #[test]
    fn test_missing_completed_groups_is_noop() {
        let mut doc = Document::parse(
            r#"<main class="main-content"><div id="groups-container"><p>keep</p></div></main>"#,
        );
        let before = doc.clone();

        assert!(!render_completed_groups(&mut doc, None));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_missing_groups_container_is_noop() {
        let mut doc = Document::parse("<p>no containers</p>");
        let before = doc.clone();
        let groups = vec![completed("Group A", ["A", "B", "C"], "2024-01-01")];

        assert!(!render_completed_groups(&mut doc, Some(groups.as_slice())));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_current_card_structure() {
        let card = current_group_card(&current("in-progress", &["West", "Central"]));

        assert_eq!(
            card.outer_html(),
            concat!(
                r#"<div class="group-card in-progress">"#,
                r#"<div class="group-header"><h3 class="group-name">Group C</h3>"#,
                r#"<span class="group-status in-progress">Active</span></div>"#,
                r#"<div class="current-group-regions">"#,
                r#"<div class="current-region"><span class="region-name">West</span></div>"#,
                r#"<div class="current-region"><span class="region-name">Central</span></div>"#,
                "</div>",
                r#"<div class="group-date"><small>Started Apr 1, 2024</small></div>"#,
                "</div>"
            )
        );
    }

    #[test]
    fn test_current_status_label_is_always_active() {
        for status in ["active", "paused", "finished", ""] {
            let card = current_group_card(&current(status, &[]));
            let badge = card
                .find(&|el| el.has_class("group-status"))
                .unwrap();
            assert_eq!(badge.text_content(), "Active");
            if !status.is_empty() {
                assert!(badge.has_class(status));
                assert!(card.has_class(status));
            }
        }
    }

    #[test]
    fn test_current_regions_keep_given_order() {
        let mut doc = Document::default_page();
        let group = current("active", &["Zulu", "Alpha", "Mike"]);

        assert!(render_current_group(&mut doc, Some(&group)));
        assert_eq!(
            select_texts(&doc, "#current-group-container .region-name"),
            vec!["Zulu", "Alpha", "Mike"]
        );
    }

    #[test]
    fn test_current_group_replaces_content() {
        let mut doc = Document::default_page();
        render_current_group(&mut doc, Some(&current("active", &["A"])));
        render_current_group(&mut doc, Some(&current("active", &["B"])));

        assert_eq!(select_texts(&doc, "#current-group-container > .group-card").len(), 1);
        assert_eq!(select_texts(&doc, ".region-name"), vec!["B"]);
    }

    #[test]
    fn test_missing_current_group_is_noop() {
        let mut doc = Document::default_page();
        let before = doc.clone();

        assert!(!render_current_group(&mut doc, None));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_missing_current_container_is_noop() {
        let mut doc = Document::parse(r#"<div id="groups-container"></div>"#);
        let before = doc.clone();

        assert!(!render_current_group(&mut doc, Some(&current("active", &["A"]))));
        assert_eq!(doc, before);
    }
}
