//! HTML card markup, the same structure the browser page uses

use super::{Card, CardsView, ControlKind, PaginationControls};
use std::fmt::Write;

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn card(card: &Card) -> String {
    let mut out = String::new();
    out.push_str("<div class=\"card\">\n");
    let _ = writeln!(
        out,
        "  <img class=\"character-image\" src=\"{}\" alt=\"{}\"/>",
        escape(&card.sprite_url),
        escape(&card.alt)
    );
    let _ = writeln!(out, "  <h2>{}</h2>", escape(&card.name));
    let _ = writeln!(out, "  <p>ID: {}</p>", card.id);
    let _ = writeln!(out, "  <p>Type(s): {}</p>", escape(&card.types));
    let _ = writeln!(out, "  <p>Abilities: {}</p>", escape(&card.abilities));
    let _ = writeln!(out, "  <p>Stats: {}</p>", card.stats_line());
    out.push_str("</div>\n");
    out
}

/// Contents of the cards container
pub fn cards(view: &CardsView) -> String {
    match view {
        CardsView::Loading => String::new(),
        CardsView::Cards(cards) => cards.iter().map(card).collect(),
        CardsView::Error(message) => format!("<p>{}</p>\n", escape(message)),
    }
}

/// Contents of the pagination container
pub fn pagination(controls: &PaginationControls) -> String {
    let mut out = String::from("<nav id=\"pagination\">\n");

    for control in controls.controls() {
        let mut attrs = String::new();
        if control.active {
            attrs.push_str(" class=\"active\"");
        }
        if !control.enabled {
            attrs.push_str(" disabled");
        }
        if let ControlKind::Page(page) = control.kind {
            let _ = write!(attrs, " data-page=\"{}\"", page);
        }
        let _ = writeln!(out, "  <button{}>{}</button>", attrs, escape(&control.label));
    }

    out.push_str("</nav>\n");
    out
}
