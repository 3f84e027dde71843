//! Plain-text rendering for terminals without the TUI

use super::{Card, CardsView, PaginationControls};

pub fn card(card: &Card) -> String {
    format!(
        "#{} {}\n  Sprite: {}\n  Type(s): {}\n  Abilities: {}\n  Stats: {}\n",
        card.id,
        card.name,
        card.sprite_url,
        card.types,
        card.abilities,
        card.stats_line()
    )
}

pub fn cards(view: &CardsView) -> String {
    match view {
        CardsView::Loading => String::new(),
        CardsView::Cards(cards) => cards.iter().map(card).collect::<Vec<_>>().join("\n"),
        CardsView::Error(message) => format!("{}\n", message),
    }
}

/// `(Previous) [1] 2 3 Next` with disabled controls in parentheses and the
/// active page in brackets
pub fn pagination(controls: &PaginationControls) -> String {
    let parts: Vec<String> = controls
        .controls()
        .iter()
        .map(|control| {
            if control.active {
                format!("[{}]", control.label)
            } else if !control.enabled {
                format!("({})", control.label)
            } else {
                control.label.clone()
            }
        })
        .collect();

    format!(
        "{}\nPage {} of {}\n",
        parts.join(" "),
        controls.current_page,
        controls.total_pages
    )
}
