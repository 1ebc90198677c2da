//! Host page document.
//!
//! The host page is parsed once with `scraper` into an owned element tree.
//! Renderers locate their target [`Surface`] and replace its children
//! wholesale; the tree is then serialized back to HTML.

mod element;

pub use element::*;

use std::path::Path;

use scraper::{ElementRef, Html};
use thiserror::Error;

/// Built-in page providing every surface.
pub const DEFAULT_PAGE: &str = include_str!("default_page.html");

/// Errors that can occur while loading a page template.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Failed to read page template: {0}")]
    Io(#[from] std::io::Error),
}

/// Addressable insertion points in the host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    /// First `tbody` inside `#overall-standings`
    StandingsBody,
    /// `#groups-container`
    GroupsContainer,
    /// `#current-group-container`
    CurrentGroupContainer,
    /// First `.main-content`, where error banners are prepended
    MainContent,
}

impl Surface {
    pub const ALL: [Surface; 4] = [
        Surface::StandingsBody,
        Surface::GroupsContainer,
        Surface::CurrentGroupContainer,
        Surface::MainContent,
    ];
}

impl std::fmt::Display for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Surface::StandingsBody => write!(f, "#overall-standings tbody"),
            Surface::GroupsContainer => write!(f, "#groups-container"),
            Surface::CurrentGroupContainer => write!(f, "#current-group-container"),
            Surface::MainContent => write!(f, ".main-content"),
        }
    }
}

/// An owned, mutable HTML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Element,
}

impl Document {
    /// Parse a full HTML document. Parsing never fails; malformed markup is
    /// repaired the way browsers do.
    pub fn parse(html: &str) -> Self {
        let parsed = Html::parse_document(html);
        Self {
            root: convert_element(parsed.root_element()),
        }
    }

    /// The built-in page.
    pub fn default_page() -> Self {
        Self::parse(DEFAULT_PAGE)
    }

    /// Load a page template from disk.
    pub fn from_file(path: &Path) -> Result<Self, DocumentError> {
        let html = std::fs::read_to_string(path)?;
        Ok(Self::parse(&html))
    }

    /// Load a template if a path is given, otherwise the built-in page.
    pub fn from_template(path: Option<&Path>) -> Result<Self, DocumentError> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default_page()),
        }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn surface(&self, surface: Surface) -> Option<&Element> {
        match surface {
            Surface::StandingsBody => self
                .root
                .find(&|el| el.id() == Some("overall-standings"))?
                .child_elements()
                .find_map(|c| c.find(&|el| el.tag == "tbody")),
            Surface::GroupsContainer => self.root.find(&|el| el.id() == Some("groups-container")),
            Surface::CurrentGroupContainer => self
                .root
                .find(&|el| el.id() == Some("current-group-container")),
            Surface::MainContent => self.root.find(&|el| el.has_class("main-content")),
        }
    }

    pub fn surface_mut(&mut self, surface: Surface) -> Option<&mut Element> {
        match surface {
            Surface::StandingsBody => self
                .root
                .find_mut(&|el| el.id() == Some("overall-standings"))?
                .find_descendant_mut(&|el| el.tag == "tbody"),
            Surface::GroupsContainer => self
                .root
                .find_mut(&|el| el.id() == Some("groups-container")),
            Surface::CurrentGroupContainer => self
                .root
                .find_mut(&|el| el.id() == Some("current-group-container")),
            Surface::MainContent => self.root.find_mut(&|el| el.has_class("main-content")),
        }
    }

    /// Serialize the whole document.
    pub fn to_html(&self) -> String {
        let mut out = String::from("<!DOCTYPE html>\n");
        self.root.write_html(&mut out);
        out
    }
}

fn convert_element(el: ElementRef<'_>) -> Element {
    let value = el.value();
    let mut element = Element::new(value.name());
    for (name, attr) in value.attrs.iter() {
        let name = match &name.prefix {
            Some(prefix) => format!("{}:{}", &**prefix, &*name.local),
            None => name.local.to_string(),
        };
        element.attrs.push((name, attr.to_string()));
    }

    for child in el.children() {
        match child.value() {
            scraper::Node::Text(text) => element.children.push(Node::Text(text.text.to_string())),
            scraper::Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    element.children.push(Node::Element(convert_element(child_el)));
                }
            }
            scraper::Node::Comment(comment) => {
                element.children.push(Node::Comment(comment.comment.to_string()))
            }
            // Doctypes and processing instructions are dropped; `to_html`
            // writes its own doctype.
            _ => {}
        }
    }

    element
}
