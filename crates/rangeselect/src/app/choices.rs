//! Normalized choice list and the absolute↔real index tables.

use crate::domain::errors::PromptError;
use crate::domain::model::{Choice, Entry};

/// The prompt's list of entries, immutable once constructed.
///
/// Anchors and the pointer move through the "real" index space, a zero-based
/// contiguous numbering over entries that are neither separators nor
/// disabled. Both directions of the mapping are computed once here and
/// reused by every other component.
#[derive(Debug, Clone)]
pub struct ChoiceList<T> {
    entries: Vec<Entry<T>>,
    real_by_abs: Vec<Option<usize>>,
    abs_by_real: Vec<usize>,
}

impl<T> ChoiceList<T> {
    /// Normalize a raw entry list.
    ///
    /// An empty list is a configuration error: a range-selection control is
    /// meaningless with zero rows. A list whose rows are all separators or
    /// disabled is accepted; it simply has an empty selectable space.
    pub fn new(entries: Vec<Entry<T>>) -> Result<Self, PromptError> {
        if entries.is_empty() {
            return Err(PromptError::EmptyChoices);
        }

        let mut real_by_abs = Vec::with_capacity(entries.len());
        let mut abs_by_real = Vec::new();
        for (abs, entry) in entries.iter().enumerate() {
            if entry.is_selectable() {
                real_by_abs.push(Some(abs_by_real.len()));
                abs_by_real.push(abs);
            } else {
                real_by_abs.push(None);
            }
        }

        Ok(Self {
            entries,
            real_by_abs,
            abs_by_real,
        })
    }

    /// All rows in display order.
    pub fn entries(&self) -> &[Entry<T>] {
        &self.entries
    }

    /// Number of rows, separators and disabled entries included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list has no rows at all. Construction rejects an empty
    /// list, so this never holds for a built instance.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of selectable entries.
    pub fn selectable_len(&self) -> usize {
        self.abs_by_real.len()
    }

    /// Highest valid real index, or `None` when nothing is selectable.
    pub fn max_real(&self) -> Option<usize> {
        self.selectable_len().checked_sub(1)
    }

    /// Real index of the row at `abs`, if that row is selectable.
    pub fn real_of(&self, abs: usize) -> Option<usize> {
        self.real_by_abs.get(abs).copied().flatten()
    }

    /// Absolute row of the selectable entry at `real`.
    pub fn abs_of(&self, real: usize) -> Option<usize> {
        self.abs_by_real.get(real).copied()
    }

    /// The choice at an absolute row, separators excluded.
    pub fn choice_at(&self, abs: usize) -> Option<&Choice<T>> {
        self.entries.get(abs).and_then(Entry::as_choice)
    }

    /// The choice at a real index.
    pub fn choice_at_real(&self, real: usize) -> Option<&Choice<T>> {
        self.abs_of(real).and_then(|abs| self.choice_at(abs))
    }
}
