//! Builder front door for running a range-selection prompt.

use crate::app::router::{Controller, Validator};
use crate::domain::errors::PromptError;
use crate::domain::model::{Choice, Entry, Separator};
use crate::infra::config::Config;
use crate::ui::app::{self, EventSource, RenderSink};
use crate::ui::render::Renderer;

/// Interactive prompt selecting a contiguous range of items with two
/// movable anchors.
///
/// ```no_run
/// use rangeselect::RangeSelect;
///
/// let steps = RangeSelect::new("Steps for cooking")
///     .choice("Gather ingredients", "gather".to_owned())
///     .choice("Preheat oven", "pre-heat".to_owned())
///     .choice("Serve", "serve".to_owned())
///     .default_values(vec!["serve".to_owned()])
///     .interact()?;
/// # Ok::<(), rangeselect::PromptError>(())
/// ```
pub struct RangeSelect<T> {
    message: String,
    entries: Vec<Entry<T>>,
    defaults: Option<Vec<T>>,
    page_size: Option<usize>,
    validate: Option<Validator<T>>,
}

impl<T: Clone + PartialEq> RangeSelect<T> {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            entries: Vec::new(),
            defaults: None,
            page_size: None,
            validate: None,
        }
    }

    /// Append a selectable choice.
    pub fn choice(mut self, name: impl Into<String>, value: T) -> Self {
        self.entries.push(Entry::Choice(Choice::new(name, value)));
        self
    }

    /// Append any entry: a prepared choice, a disabled choice, a separator.
    pub fn entry(mut self, entry: impl Into<Entry<T>>) -> Self {
        self.entries.push(entry.into());
        self
    }

    /// Append a batch of entries in order.
    pub fn entries<I>(mut self, entries: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Entry<T>>,
    {
        self.entries.extend(entries.into_iter().map(Into::into));
        self
    }

    /// Append a separator row.
    pub fn separator(mut self, label: impl Into<String>) -> Self {
        self.entries.push(Entry::Separator(Separator::new(label)));
        self
    }

    /// Values checked when the prompt opens. Without this, every selectable
    /// choice starts checked.
    pub fn default_values(mut self, values: Vec<T>) -> Self {
        self.defaults = Some(values);
        self
    }

    /// Viewport height for the host's windowing; the configured default
    /// applies otherwise.
    pub fn page_size(mut self, rows: usize) -> Self {
        self.page_size = Some(rows);
        self
    }

    /// Validate the answer on submit. A returned message is rendered below
    /// the list and the prompt keeps accepting input, with no retry limit.
    pub fn validate_with<F>(mut self, validate: F) -> Self
    where
        F: Fn(&[T]) -> Result<(), String> + 'static,
    {
        self.validate = Some(Box::new(validate));
        self
    }

    /// Take over the terminal and run the prompt to completion.
    pub fn interact(self) -> Result<Vec<T>, PromptError> {
        let config = Config::load().map_err(|err| PromptError::Config(err.to_string()))?;
        let page_size = self.page_size.unwrap_or(config.defaults.page_size);
        let renderer = Renderer::new(config.glyphs.clone(), config.defaults.show_help);

        let mut controller =
            Controller::new(self.message, self.entries, self.defaults, self.validate)?;
        app::interact(&mut controller, &renderer, config.keybindings, page_size)
    }

    /// Run against an explicit event source and render sink instead of the
    /// terminal. This is the embedding and testing seam.
    pub fn run_with<E, S>(self, events: &mut E, sink: &mut S) -> Result<Vec<T>, PromptError>
    where
        E: EventSource,
        S: RenderSink,
    {
        let renderer = Renderer::default();
        let mut controller =
            Controller::new(self.message, self.entries, self.defaults, self.validate)?;
        app::drive(&mut controller, &renderer, events, sink)
    }
}
