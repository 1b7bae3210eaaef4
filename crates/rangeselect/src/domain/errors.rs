//! Prompt error taxonomy.

use thiserror::Error;

/// Errors surfaced by a range-selection prompt.
///
/// Validation failures are deliberately absent: a rejected submission is
/// user-facing render data, not a fault, and the prompt keeps running.
#[derive(Debug, Error)]
pub enum PromptError {
    /// The prompt was configured without any entries.
    #[error("a range selection needs at least one choice")]
    EmptyChoices,

    /// The user tore the prompt down before answering.
    #[error("prompt interrupted")]
    Interrupted,

    /// The configuration layers could not be loaded or parsed.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Terminal I/O failed in the host layer.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
