//! Card and pagination-control construction
//!
//! Everything here is pure data: the TUI draws it, the `page` command prints
//! it through [`markup`] or [`text`]. No network access happens here and the
//! page state only arrives as explicit arguments.

pub mod markup;
pub mod text;

use crate::api::{ItemDetail, LoadFailure};
use std::ops::RangeInclusive;

/// Maximum number of page-number controls shown at once
pub const MAX_WINDOW: u32 = 9;

/// Requests produced by activating a control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    RequestPage(u32),
}

/// Display-ready form of one [`ItemDetail`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub sprite_url: String,
    pub alt: String,
    pub name: String,
    pub id: u32,
    pub types: String,
    pub abilities: String,
    pub hp: Option<u32>,
    pub attack: Option<u32>,
    pub defense: Option<u32>,
}

impl From<&ItemDetail> for Card {
    fn from(item: &ItemDetail) -> Self {
        Self {
            sprite_url: item.sprite_url.clone().unwrap_or_default(),
            alt: item.name.clone(),
            name: item.name.clone(),
            id: item.id,
            types: item.types.join(", "),
            abilities: item.abilities.join(", "),
            hp: item.hp(),
            attack: item.attack(),
            defense: item.defense(),
        }
    }
}

impl Card {
    /// "HP: 45, Attack: 49, Defense: 49"; absent stats stay blank
    pub fn stats_line(&self) -> String {
        format!(
            "HP: {}, Attack: {}, Defense: {}",
            blank(self.hp),
            blank(self.attack),
            blank(self.defense)
        )
    }
}

fn blank(value: Option<u32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Contents of the card area
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardsView {
    /// Nothing has been rendered yet
    Loading,
    Cards(Vec<Card>),
    Error(String),
}

/// Range of page numbers to show, `max_window` wide when enough pages exist.
///
/// Centered on `current` and shifted left near the last page so the window
/// never runs past `total`.
pub fn page_window(current: u32, total: u32, max_window: u32) -> RangeInclusive<u32> {
    let max_window = max_window.max(1);
    let start = current.saturating_sub(max_window / 2).max(1);
    let end = total.min(start.saturating_add(max_window - 1));
    let start = end.saturating_sub(max_window - 1).max(1);
    start..=end
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Previous,
    Page(u32),
    Next,
}

/// One button of the pagination bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub kind: ControlKind,
    pub label: String,
    pub enabled: bool,
    pub active: bool,
    target: Option<u32>,
}

impl Control {
    /// Command issued when the control is clicked, if any
    pub fn activate(&self) -> Option<Command> {
        if !self.enabled {
            return None;
        }
        self.target.map(Command::RequestPage)
    }
}

/// Previous control, the page window, then the next control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationControls {
    pub current_page: u32,
    pub total_pages: u32,
    controls: Vec<Control>,
}

impl PaginationControls {
    pub fn build(current_page: u32, total_pages: u32) -> Self {
        let mut controls = Vec::with_capacity(MAX_WINDOW as usize + 2);

        controls.push(Control {
            kind: ControlKind::Previous,
            label: "Previous".to_string(),
            enabled: current_page != 1,
            active: false,
            target: (current_page > 1).then(|| current_page - 1),
        });

        for page in page_window(current_page, total_pages, MAX_WINDOW) {
            controls.push(Control {
                kind: ControlKind::Page(page),
                label: page.to_string(),
                enabled: true,
                active: page == current_page,
                target: Some(page),
            });
        }

        controls.push(Control {
            kind: ControlKind::Next,
            label: "Next".to_string(),
            enabled: current_page != total_pages,
            active: false,
            target: (current_page < total_pages).then(|| current_page + 1),
        });

        Self {
            current_page,
            total_pages,
            controls,
        }
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn previous(&self) -> &Control {
        &self.controls[0]
    }

    pub fn next(&self) -> &Control {
        &self.controls[self.controls.len() - 1]
    }

    /// The page-number controls between previous and next
    pub fn pages(&self) -> &[Control] {
        &self.controls[1..self.controls.len() - 1]
    }

    /// Index of the current page's control; only page controls are ever active
    pub fn active_index(&self) -> Option<usize> {
        self.pages()
            .iter()
            .position(|control| control.active)
            .map(|index| index + 1)
    }
}

/// Holds what is currently rendered and which control has keyboard focus
#[derive(Debug)]
pub struct Renderer {
    cards: CardsView,
    pagination: Option<PaginationControls>,
    focus: usize,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            cards: CardsView::Loading,
            pagination: None,
            focus: 0,
        }
    }

    pub fn cards(&self) -> &CardsView {
        &self.cards
    }

    pub fn pagination(&self) -> Option<&PaginationControls> {
        self.pagination.as_ref()
    }

    /// Replace the card area with one card per item, in order
    pub fn render_items(&mut self, items: &[ItemDetail]) {
        // Built off to the side and swapped in with a single assignment
        let cards = items.iter().map(Card::from).collect();
        self.cards = CardsView::Cards(cards);
    }

    /// Rebuild the pagination bar; focus moves to the current page
    pub fn render_pagination(&mut self, current_page: u32, total_pages: u32) {
        let controls = PaginationControls::build(current_page, total_pages);
        self.focus = controls.active_index().unwrap_or(0);
        self.pagination = Some(controls);
    }

    /// Replace the card area with an error message. The pagination bar is
    /// left as it was.
    pub fn render_error(&mut self, error: &LoadFailure) {
        self.cards = CardsView::Error(format!("Error loading Pokémon: {}", error));
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn focused(&self) -> Option<&Control> {
        self.pagination.as_ref()?.controls.get(self.focus)
    }

    pub fn focus_left(&mut self) {
        self.focus = self.focus.saturating_sub(1);
    }

    pub fn focus_right(&mut self) {
        if let Some(pagination) = &self.pagination {
            self.focus = (self.focus + 1).min(pagination.controls.len() - 1);
        }
    }

    pub fn activate_focused(&self) -> Option<Command> {
        self.focused()?.activate()
    }

    /// Activate the control at `index`, as a mouse click would
    pub fn activate_at(&mut self, index: usize) -> Option<Command> {
        let control = self.pagination.as_ref()?.controls.get(index)?;
        let command = control.activate();
        self.focus = index;
        command
    }

    pub fn activate_previous(&self) -> Option<Command> {
        self.pagination.as_ref()?.previous().activate()
    }

    pub fn activate_next(&self) -> Option<Command> {
        self.pagination.as_ref()?.next().activate()
    }
}
