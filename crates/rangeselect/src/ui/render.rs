//! Pure rendering of prompt state into a display payload.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::app::router::Controller;
use crate::domain::model::Entry;
use crate::infra::config::Glyphs;

/// Everything a host needs to draw one frame of the prompt: the question
/// header, one body line per absolute row, an optional validation error, and
/// the pointed row for viewport windowing.
#[derive(Debug, Clone, Default)]
pub struct RenderPayload {
    pub header: Line<'static>,
    pub body: Vec<Line<'static>>,
    pub error: Option<Line<'static>>,
    /// Index into `body` of the row the pointer is on.
    pub cursor_row: Option<usize>,
    pub done: bool,
}

impl RenderPayload {
    /// The payload with styling stripped, one row per line. Used for the
    /// final answered echo and by tests.
    pub fn plain_text(&self) -> String {
        let mut lines = vec![flatten(&self.header)];
        lines.extend(self.body.iter().map(flatten));
        if let Some(error) = &self.error {
            lines.push(flatten(error));
        }
        lines.join("\n")
    }
}

fn flatten(line: &Line<'_>) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect()
}

/// Maps prompt state to a [`RenderPayload`]. Stateless apart from the
/// configured glyph set.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    glyphs: Glyphs,
    show_help: bool,
}

impl Renderer {
    pub fn new(glyphs: Glyphs, show_help: bool) -> Self {
        Self { glyphs, show_help }
    }

    /// Build the display payload for the controller's current state.
    pub fn render<T: Clone + PartialEq>(&self, controller: &Controller<T>) -> RenderPayload {
        if controller.answered() {
            return self.render_answered(controller);
        }

        let pointer_abs = controller
            .list()
            .abs_of(controller.anchors().pointer());

        let body: Vec<Line<'static>> = controller
            .list()
            .entries()
            .iter()
            .enumerate()
            .map(|(abs, entry)| self.render_row(controller, entry, abs, pointer_abs))
            .collect();

        let error = controller.error().map(|message| {
            Line::from(vec![
                Span::styled(">> ".to_owned(), Style::default().fg(Color::Red)),
                Span::raw(message.to_owned()),
            ])
        });

        RenderPayload {
            header: self.render_header(controller.message()),
            body,
            error,
            cursor_row: pointer_abs,
            done: false,
        }
    }

    fn render_header(&self, message: &str) -> Line<'static> {
        let mut spans = vec![
            Span::styled("? ".to_owned(), Style::default().fg(Color::Green)),
            Span::styled(
                message.to_owned(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ];
        if self.show_help {
            spans.push(Span::styled(
                " (Press ← or → to change anchors, ↑ or ↓ to move anchors, <a> to select all)"
                    .to_owned(),
                Style::default().fg(Color::DarkGray),
            ));
        }
        Line::from(spans)
    }

    fn render_row<T: Clone + PartialEq>(
        &self,
        controller: &Controller<T>,
        entry: &Entry<T>,
        abs: usize,
        pointer_abs: Option<usize>,
    ) -> Line<'static> {
        let choice = match entry {
            Entry::Separator(separator) => {
                return Line::styled(
                    separator.label().to_owned(),
                    Style::default().fg(Color::DarkGray),
                );
            }
            Entry::Choice(choice) => choice,
        };

        if let Some(reason) = &choice.disabled {
            return Line::from(vec![
                Span::raw(format!(" {} ", self.glyphs.disabled_marker)),
                Span::styled(
                    format!("{} ({})", choice.name, reason.display()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]);
        }

        let pointed = pointer_abs == Some(abs);
        let pointer = if pointed {
            Span::styled(
                self.glyphs.pointer.clone(),
                Style::default().fg(Color::Cyan),
            )
        } else {
            Span::raw(" ".to_owned())
        };

        let bracket = match controller.checked().run_index(abs) {
            Some(run_index) => Span::styled(
                self.bracket_glyph(run_index, controller.checked().len()),
                Style::default().fg(Color::Green),
            ),
            None => Span::raw(" ".to_owned()),
        };

        Line::from(vec![
            pointer,
            bracket,
            Span::raw(format!(" {}", choice.name)),
        ])
    }

    // The bracket opens at the top of the checked run, closes at the bottom,
    // and collapses to a single square bracket for a one-item run.
    fn bracket_glyph(&self, run_index: usize, run_len: usize) -> String {
        if run_len <= 1 {
            self.glyphs.bracket_single.clone()
        } else if run_index == 0 {
            self.glyphs.bracket_open.clone()
        } else if run_index == run_len - 1 {
            self.glyphs.bracket_close.clone()
        } else {
            self.glyphs.bracket_mid.clone()
        }
    }

    fn render_answered<T: Clone + PartialEq>(&self, controller: &Controller<T>) -> RenderPayload {
        let labels = controller.selected_labels().join(", ");
        let header = Line::from(vec![
            Span::styled("? ".to_owned(), Style::default().fg(Color::Green)),
            Span::styled(
                format!("{} ", controller.message()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(labels, Style::default().fg(Color::Cyan)),
        ]);

        RenderPayload {
            header,
            body: Vec::new(),
            error: None,
            cursor_row: None,
            done: true,
        }
    }
}
