//! Ratatui view that windows the render payload onto the screen.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{List, ListItem, ListState, Paragraph, Wrap};

use crate::ui::render::RenderPayload;

/// Draws a [`RenderPayload`]: question header on top, the body list bounded
/// to `page_size` rows, and the validation error underneath. Scrolling the
/// viewport around the pointed row is delegated to the list state.
#[derive(Debug, Default)]
pub struct RangeSelectView;

impl RangeSelectView {
    pub fn render(
        &self,
        frame: &mut Frame<'_>,
        area: Rect,
        payload: &RenderPayload,
        page_size: usize,
    ) {
        let body_height = (payload.body.len() as u16).min(page_size.max(1) as u16);
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(body_height),
                Constraint::Length(1),
            ])
            .split(area);

        let header = Paragraph::new(payload.header.clone()).wrap(Wrap { trim: false });
        frame.render_widget(header, layout[0]);

        if !payload.body.is_empty() {
            let items: Vec<ListItem<'_>> = payload
                .body
                .iter()
                .map(|line| ListItem::new(line.clone()))
                .collect();
            let mut state = ListState::default();
            state.select(payload.cursor_row);

            // No highlight style: the pointer glyph already marks the row;
            // the selection only drives viewport scrolling.
            let list = List::new(items);
            frame.render_stateful_widget(list, layout[1], &mut state);
        }

        if let Some(error) = &payload.error {
            let paragraph = Paragraph::new(error.clone()).wrap(Wrap { trim: true });
            frame.render_widget(paragraph, layout[2]);
        }
    }
}
