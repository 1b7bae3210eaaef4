//! Terminal host: event decoding, the drive loop, and screen lifecycle.

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::debug;

use crate::app::router::{Controller, PromptEvent, Step};
use crate::domain::errors::PromptError;
use crate::infra::config::Keybindings;
use crate::ui::render::{RenderPayload, Renderer};
use crate::ui::view::RangeSelectView;

/// Ordered source of normalized prompt events.
pub trait EventSource {
    fn next_event(&mut self) -> Result<PromptEvent, PromptError>;
}

/// Destination for render payloads, one per applied transition.
pub trait RenderSink {
    fn render(&mut self, payload: &RenderPayload) -> Result<(), PromptError>;
}

/// Run the prompt loop against any event source and render sink.
///
/// One event is consumed and fully applied before the next is read; every
/// state change is followed by exactly one render. Returns the answer on
/// finalize and [`PromptError::Interrupted`] on cancellation.
pub fn drive<T, E, S>(
    controller: &mut Controller<T>,
    renderer: &Renderer,
    events: &mut E,
    sink: &mut S,
) -> Result<Vec<T>, PromptError>
where
    T: Clone + PartialEq,
    E: EventSource,
    S: RenderSink,
{
    sink.render(&renderer.render(controller))?;
    loop {
        let event = events.next_event()?;
        match controller.handle(event) {
            Step::Continue => sink.render(&renderer.render(controller))?,
            Step::Done(values) => {
                sink.render(&renderer.render(controller))?;
                return Ok(values);
            }
            Step::Cancelled => return Err(PromptError::Interrupted),
        }
    }
}

/// Blocking crossterm-backed event source.
pub struct CrosstermEvents {
    bindings: Keybindings,
}

impl CrosstermEvents {
    pub fn new(bindings: Keybindings) -> Self {
        Self { bindings }
    }

    fn decode(&self, key: &KeyEvent) -> Option<PromptEvent> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => Some(PromptEvent::Cancel),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Up => Some(PromptEvent::Up),
            KeyCode::Down => Some(PromptEvent::Down),
            KeyCode::Left | KeyCode::Right => Some(PromptEvent::SwapAnchor),
            KeyCode::Enter => Some(PromptEvent::Submit),
            KeyCode::Esc => Some(PromptEvent::Cancel),
            KeyCode::Char(ch) => self.decode_char(ch),
            _ => None,
        }
    }

    fn decode_char(&self, ch: char) -> Option<PromptEvent> {
        let pressed = ch.to_string();
        if pressed == self.bindings.up {
            Some(PromptEvent::Up)
        } else if pressed == self.bindings.down {
            Some(PromptEvent::Down)
        } else if pressed == self.bindings.select_all {
            Some(PromptEvent::SelectAll)
        } else {
            None
        }
    }
}

impl EventSource for CrosstermEvents {
    fn next_event(&mut self) -> Result<PromptEvent, PromptError> {
        loop {
            if let Event::Key(key) = event::read()?
                && key.kind != KeyEventKind::Release
                && let Some(decoded) = self.decode(&key)
            {
                debug!(?decoded, "key event");
                return Ok(decoded);
            }
        }
    }
}

/// Render sink drawing frames onto the terminal.
pub struct TerminalSink {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    view: RangeSelectView,
    page_size: usize,
}

impl RenderSink for TerminalSink {
    fn render(&mut self, payload: &RenderPayload) -> Result<(), PromptError> {
        let view = &self.view;
        let page_size = self.page_size;
        self.terminal.draw(|frame| {
            let area = frame.size();
            view.render(frame, area, payload, page_size);
        })?;
        Ok(())
    }
}

/// Own the terminal for the prompt's lifetime and run the loop.
///
/// Raw mode and the alternate screen are restored on every exit path; on a
/// successful answer, the summary line is echoed to stdout afterwards so the
/// answer stays visible.
pub fn interact<T: Clone + PartialEq>(
    controller: &mut Controller<T>,
    renderer: &Renderer,
    bindings: Keybindings,
    page_size: usize,
) -> Result<Vec<T>, PromptError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(err) = execute!(stdout, EnterAlternateScreen) {
        disable_raw_mode().ok();
        return Err(err.into());
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor().ok();

    let mut events = CrosstermEvents::new(bindings);
    let mut sink = TerminalSink {
        terminal,
        view: RangeSelectView,
        page_size,
    };
    let result = drive(controller, renderer, &mut events, &mut sink);

    disable_raw_mode().ok();
    let _ = execute!(sink.terminal.backend_mut(), LeaveAlternateScreen);
    let _ = sink.terminal.show_cursor();

    if result.is_ok() {
        println!("{}", renderer.render(controller).plain_text());
    }
    result
}
