//! Domain models for list entries and checked selections.

const DEFAULT_SEPARATOR_RULE: &str = "──────────────";

/// Why a choice cannot be selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisabledReason {
    /// Disabled without an explanation; rendered as a generic placeholder.
    Unspecified,
    /// Disabled with a human-readable explanation shown next to the label.
    Message(String),
}

impl DisabledReason {
    /// Text shown in parentheses after a disabled row's label.
    pub fn display(&self) -> &str {
        match self {
            DisabledReason::Unspecified => "Disabled",
            DisabledReason::Message(text) => text,
        }
    }
}

/// A list entry the user can select.
///
/// Identity is the `value`, compared by equality rather than by position,
/// because absolute positions shift as separators and disabled rows are
/// skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice<T> {
    pub name: String,
    pub value: T,
    pub disabled: Option<DisabledReason>,
}

impl<T> Choice<T> {
    /// Create an enabled choice with a display label and identity value.
    pub fn new(name: impl Into<String>, value: T) -> Self {
        Self {
            name: name.into(),
            value,
            disabled: None,
        }
    }

    /// Mark the choice disabled with an explanatory message.
    pub fn disabled_because(mut self, reason: impl Into<String>) -> Self {
        self.disabled = Some(DisabledReason::Message(reason.into()));
        self
    }

    /// Mark the choice disabled without an explanation.
    pub fn disabled(mut self) -> Self {
        self.disabled = Some(DisabledReason::Unspecified);
        self
    }

    /// Whether the choice can be selected.
    pub fn is_enabled(&self) -> bool {
        self.disabled.is_none()
    }
}

/// A non-interactive divider row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Separator {
    label: Option<String>,
}

impl Separator {
    /// Separator carrying free text.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
        }
    }

    /// Separator rendered as a plain horizontal rule.
    pub fn line() -> Self {
        Self::default()
    }

    /// Text rendered for this separator.
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(DEFAULT_SEPARATOR_RULE)
    }
}

/// One row of the prompt list: a selectable choice or a separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry<T> {
    Choice(Choice<T>),
    Separator(Separator),
}

impl<T> Entry<T> {
    /// The contained choice, if this row is one.
    pub fn as_choice(&self) -> Option<&Choice<T>> {
        match self {
            Entry::Choice(choice) => Some(choice),
            Entry::Separator(_) => None,
        }
    }

    /// Whether this row divides sections rather than offering a choice.
    pub fn is_separator(&self) -> bool {
        matches!(self, Entry::Separator(_))
    }

    /// Whether this row can be pointed at and checked.
    pub fn is_selectable(&self) -> bool {
        self.as_choice().map(Choice::is_enabled).unwrap_or(false)
    }
}

impl<T> From<Choice<T>> for Entry<T> {
    fn from(choice: Choice<T>) -> Self {
        Entry::Choice(choice)
    }
}

impl<T> From<Separator> for Entry<T> {
    fn from(separator: Separator) -> Self {
        Entry::Separator(separator)
    }
}

impl From<&str> for Entry<String> {
    fn from(label: &str) -> Self {
        Entry::Choice(Choice::new(label, label.to_owned()))
    }
}

impl From<String> for Entry<String> {
    fn from(label: String) -> Self {
        Entry::Choice(Choice::new(label.clone(), label))
    }
}

/// A checked choice, addressed by its absolute row and its position in the
/// selectable-only ("real") index space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckedEntry {
    pub abs: usize,
    pub real: usize,
}
