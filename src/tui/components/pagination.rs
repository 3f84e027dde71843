//! Pagination bar: `< Previous  1 2 [3] 4 5  Next >`
//!
//! Drawing also reports where each control landed so mouse clicks can be
//! mapped back to the control they hit.

use crate::render::{Control, ControlKind, PaginationControls};
use crate::tui::{styles::Theme, Frame};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Screen cell range of one drawn control and its index in the bar
pub type ControlHit = (Rect, usize);

fn label(control: &Control) -> String {
    match control.kind {
        ControlKind::Previous => format!(" < {} ", control.label),
        ControlKind::Next => format!(" {} > ", control.label),
        ControlKind::Page(_) => format!(" {} ", control.label),
    }
}

fn control_style(control: &Control, focused: bool, theme: &Theme) -> Style {
    let style = if control.active {
        theme.selection_style()
    } else if !control.enabled {
        theme.disabled_style()
    } else {
        theme.text_style()
    };

    if focused {
        style.add_modifier(Modifier::UNDERLINED | Modifier::BOLD)
    } else {
        style
    }
}

pub fn draw(
    frame: &mut Frame,
    area: Rect,
    pagination: Option<&PaginationControls>,
    focus: usize,
    theme: &Theme,
) -> Vec<ControlHit> {
    let title = match pagination {
        Some(controls) => format!(" Page {} of {} ", controls.current_page, controls.total_pages),
        None => " Pages ".to_string(),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.focused_border_style())
        .title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(controls) = pagination else {
        return Vec::new();
    };

    let (spans, hits) = layout_controls(controls, focus, inner, theme);
    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
    hits
}

/// Lay controls out left to right, dropping any that do not fit
fn layout_controls(
    controls: &PaginationControls,
    focus: usize,
    inner: Rect,
    theme: &Theme,
) -> (Vec<Span<'static>>, Vec<ControlHit>) {
    let mut spans = Vec::new();
    let mut hits = Vec::new();
    let mut x = inner.x;

    for (index, control) in controls.controls().iter().enumerate() {
        let text = label(control);
        let width = text.chars().count() as u16;
        if x.saturating_add(width) > inner.right() {
            break;
        }

        hits.push((Rect::new(x, inner.y, width, 1), index));
        spans.push(Span::styled(text, control_style(control, index == focus, theme)));
        spans.push(Span::raw(" "));
        x = x.saturating_add(width + 1);
    }

    (spans, hits)
}

/// Index of the control under a mouse position, if any
pub fn hit_test(hits: &[ControlHit], column: u16, row: u16) -> Option<usize> {
    hits.iter()
        .find(|(rect, _)| {
            column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
        })
        .map(|(_, index)| *index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_positions() {
        let controls = PaginationControls::build(1, 3);
        let inner = Rect::new(1, 10, 100, 1);
        let (_, hits) = layout_controls(&controls, 1, inner, &Theme::default());

        // " < Previous " is 12 wide, page labels 3 wide, one space apart
        assert_eq!(hits.len(), 5);
        assert_eq!(hits[0], (Rect::new(1, 10, 12, 1), 0));
        assert_eq!(hits[1], (Rect::new(14, 10, 3, 1), 1));
        assert_eq!(hits[2], (Rect::new(18, 10, 3, 1), 2));

        assert_eq!(hit_test(&hits, 15, 10), Some(1));
        assert_eq!(hit_test(&hits, 17, 10), None);
        assert_eq!(hit_test(&hits, 15, 11), None);
    }

    #[test]
    fn test_layout_truncates_narrow_bars() {
        let controls = PaginationControls::build(50, 100);
        let inner = Rect::new(0, 0, 20, 1);
        let (_, hits) = layout_controls(&controls, 0, inner, &Theme::default());

        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|(rect, _)| rect.right() <= 20));
    }
}
