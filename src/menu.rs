//! Menu markup flattening.
//!
//! The calendar site renders its tournament list as a nested `<ul>` menu:
//! each top-level `<li>` holds a series label anchor followed by a `<ul>`
//! of event anchors. The tree is walked exactly once here, pairing every
//! anchor with its owning series label, so the rest of the pipeline works
//! on plain values and never touches the document again.

use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

const MENU_SELECTOR: &str = "div#cssmenu";

/// One anchor lifted out of the menu tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuAnchor {
    /// Label of the series list this anchor sits under, when the markup
    /// has the expected li > ul > li ancestry. Series label anchors
    /// themselves, and anchors in malformed markup, get `None`.
    pub series: Option<String>,
    /// The anchor's own text content, trimmed. May be empty.
    pub text: String,
}

#[derive(Debug, Error)]
pub enum MenuError {
    #[error("page has no element matching {0:?}")]
    MissingMenu(&'static str),
}

/// Collect every anchor under the menu element in document order,
/// each paired with its series label.
pub fn flatten_menu(html: &str) -> Result<Vec<MenuAnchor>, MenuError> {
    let document = Html::parse_document(html);
    let menu_selector = Selector::parse(MENU_SELECTOR).expect("menu selector");
    let anchor_selector = Selector::parse("a").expect("anchor selector");

    let menu = document
        .select(&menu_selector)
        .next()
        .ok_or(MenuError::MissingMenu(MENU_SELECTOR))?;

    let mut anchors = Vec::new();
    for anchor in menu.select(&anchor_selector) {
        anchors.push(MenuAnchor {
            series: series_label(anchor, &anchor_selector),
            text: own_text(anchor),
        });
    }
    Ok(anchors)
}

/// Text directly inside an element, descendants excluded, trimmed.
fn own_text(element: ElementRef) -> String {
    let text: String = element
        .children()
        .filter_map(|node| node.value().as_text().map(|t| &**t))
        .collect();
    text.trim().to_string()
}

/// Walk an event anchor's ancestry to the series label: the enclosing
/// list item, its enclosing list, the item enclosing *that* list, and
/// finally that item's own (first) anchor.
fn series_label(anchor: ElementRef, anchor_selector: &Selector) -> Option<String> {
    let item = nearest_ancestor(anchor, "li")?;
    let list = nearest_ancestor(item, "ul")?;
    let series_item = nearest_ancestor(list, "li")?;
    let label = own_text(series_item.select(anchor_selector).next()?);
    if label.is_empty() { None } else { Some(label) }
}

fn nearest_ancestor<'a>(element: ElementRef<'a>, name: &str) -> Option<ElementRef<'a>> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == name)
}
