//! Card grid for the current page

use crate::render::{Card, CardsView};
use crate::tui::{styles::Theme, Frame};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Minimum width of one card including borders
pub const CARD_WIDTH: u16 = 36;

/// Height of one card: five content lines plus borders
pub const CARD_HEIGHT: u16 = 7;

/// Columns and fully or partly visible rows that fit in `area`
pub fn grid_shape(area: Rect) -> (usize, usize) {
    let columns = (area.width / CARD_WIDTH).max(1) as usize;
    let rows = (area.height / CARD_HEIGHT).max(1) as usize;
    (columns, rows)
}

/// Largest useful row offset for `count` cards in `area`
pub fn max_scroll(count: usize, area: Rect) -> usize {
    let (columns, rows) = grid_shape(area);
    let total_rows = count.div_ceil(columns);
    total_rows.saturating_sub(rows)
}

pub fn draw(frame: &mut Frame, area: Rect, view: &CardsView, scroll: usize, theme: &Theme) {
    match view {
        CardsView::Loading => {
            let loading = Paragraph::new("Loading Pokémon...")
                .alignment(Alignment::Center)
                .style(theme.dim_style());
            frame.render_widget(loading, area);
        }
        CardsView::Error(message) => {
            let error = Paragraph::new(message.as_str())
                .wrap(Wrap { trim: true })
                .style(theme.error_style());
            frame.render_widget(error, area);
        }
        CardsView::Cards(cards) if cards.is_empty() => {
            let empty = Paragraph::new("No Pokémon on this page")
                .alignment(Alignment::Center)
                .style(theme.dim_style());
            frame.render_widget(empty, area);
        }
        CardsView::Cards(cards) => draw_grid(frame, area, cards, scroll, theme),
    }
}

fn draw_grid(frame: &mut Frame, area: Rect, cards: &[Card], scroll: usize, theme: &Theme) {
    let (columns, rows) = grid_shape(area);
    let scroll = scroll.min(max_scroll(cards.len(), area));

    for (row_index, row) in cards.chunks(columns).skip(scroll).take(rows).enumerate() {
        let top = area.y + row_index as u16 * CARD_HEIGHT;
        let row_area = Rect::new(area.x, top, area.width, CARD_HEIGHT.min(area.bottom() - top));

        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
            .split(row_area);

        for (card, cell) in row.iter().zip(cells.iter()) {
            frame.render_widget(card_widget(card, theme), *cell);
        }
    }
}

fn card_widget(card: &Card, theme: &Theme) -> Paragraph<'static> {
    let field = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(label, theme.dim_style()),
            Span::styled(value, theme.text_style()),
        ])
    };

    let lines = vec![
        field("ID: ", card.id.to_string()),
        field("Sprite: ", card.sprite_url.clone()),
        field("Type(s): ", card.types.clone()),
        field("Abilities: ", card.abilities.clone()),
        field("Stats: ", card.stats_line()),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .title(Span::styled(format!(" {} ", card.name), theme.title_style()));

    Paragraph::new(lines).block(block)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_shape() {
        assert_eq!(grid_shape(Rect::new(0, 0, 120, 30)), (3, 4));
        assert_eq!(grid_shape(Rect::new(0, 0, 20, 5)), (1, 1));
    }

    #[test]
    fn test_max_scroll() {
        let area = Rect::new(0, 0, 72, 14);
        // 2 columns, 2 rows visible, 20 cards = 10 rows
        assert_eq!(max_scroll(20, area), 8);
        assert_eq!(max_scroll(3, area), 0);
        assert_eq!(max_scroll(0, area), 0);
    }
}
