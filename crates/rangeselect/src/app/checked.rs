//! Ordered tracker for the currently checked choices.

use crate::app::choices::ChoiceList;
use crate::domain::model::CheckedEntry;

/// The set of checked choices, kept sorted by absolute row.
///
/// Selection state lives here rather than on the choices themselves; the two
/// are joined by value equality. While the anchor machine drives mutations,
/// the entries always form one contiguous run in real-index space, so the
/// first and last entries are the anchor extremes.
#[derive(Debug, Clone, Default)]
pub struct CheckedSet {
    entries: Vec<CheckedEntry>,
}

impl CheckedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries in absolute-row order.
    pub fn entries(&self) -> &[CheckedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First checked entry by absolute order.
    pub fn first(&self) -> Option<CheckedEntry> {
        self.entries.first().copied()
    }

    /// Last checked entry by absolute order.
    pub fn last(&self) -> Option<CheckedEntry> {
        self.entries.last().copied()
    }

    /// Position of the row at `abs` within the checked run, if checked.
    pub fn run_index(&self, abs: usize) -> Option<usize> {
        self.entries.iter().position(|entry| entry.abs == abs)
    }

    /// Whether a choice with an equal value is checked.
    pub fn contains_value<T: PartialEq>(&self, list: &ChoiceList<T>, value: &T) -> bool {
        self.entries
            .iter()
            .filter_map(|entry| list.choice_at(entry.abs))
            .any(|choice| choice.value == *value)
    }

    /// Clear everything, then check the default subset.
    ///
    /// `defaults = None` means every selectable choice starts checked. An
    /// explicit list is matched by value equality; because the selection must
    /// be one contiguous run, any gap between the first and last match is
    /// filled in, and a list matching nothing falls back to checking all
    /// selectable choices so the anchors always have a seed.
    pub fn reset<T: PartialEq>(&mut self, list: &ChoiceList<T>, defaults: Option<&[T]>) {
        self.entries.clear();

        let mut matched: Vec<CheckedEntry> = Vec::new();
        for (abs, entry) in list.entries().iter().enumerate() {
            let (Some(real), Some(choice)) = (list.real_of(abs), entry.as_choice()) else {
                continue;
            };
            let is_default = match defaults {
                None => true,
                Some(values) => values.contains(&choice.value),
            };
            if is_default {
                matched.push(CheckedEntry { abs, real });
            }
        }

        if matched.is_empty() {
            if defaults.is_some() && list.selectable_len() > 0 {
                // Unmatched or empty default list: fall back to the
                // default-default so the anchors always have a seed.
                self.reset(list, None);
            }
            return;
        }

        let first_real = matched[0].real;
        let last_real = matched[matched.len() - 1].real;
        self.entries = (first_real..=last_real)
            .filter_map(|real| {
                list.abs_of(real).map(|abs| CheckedEntry { abs, real })
            })
            .collect();
    }

    /// Set the checked state of the choice at `abs`.
    ///
    /// Any existing entry with an equal value is removed first, so checking
    /// is idempotent and no two entries ever reference the same value. The
    /// caller supplies `real_hint` because only the anchor machine knows the
    /// pointer position the insertion corresponds to.
    pub fn set_checked<T: PartialEq>(
        &mut self,
        list: &ChoiceList<T>,
        abs: usize,
        is_checked: bool,
        real_hint: usize,
    ) {
        let Some(target) = list.choice_at(abs) else {
            return;
        };

        self.entries.retain(|entry| {
            list.choice_at(entry.abs)
                .map(|choice| choice.value != target.value)
                .unwrap_or(true)
        });

        if is_checked {
            self.entries.push(CheckedEntry {
                abs,
                real: real_hint,
            });
            self.entries.sort_by_key(|entry| entry.abs);
        }
    }

    /// Ordered values of the checked, non-disabled choices.
    ///
    /// Disabled rows can never be checked, but the filter guards against a
    /// previously checked choice becoming disabled and leaking into the
    /// answer.
    pub fn values<T: Clone>(&self, list: &ChoiceList<T>) -> Vec<T> {
        self.entries
            .iter()
            .filter_map(|entry| list.choice_at(entry.abs))
            .filter(|choice| choice.is_enabled())
            .map(|choice| choice.value.clone())
            .collect()
    }

    /// Ordered display labels of the checked, non-disabled choices.
    pub fn labels<T>(&self, list: &ChoiceList<T>) -> Vec<String> {
        self.entries
            .iter()
            .filter_map(|entry| list.choice_at(entry.abs))
            .filter(|choice| choice.is_enabled())
            .map(|choice| choice.name.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::domain::model::{Choice, Entry, Separator};

    fn plain_list() -> ChoiceList<String> {
        ChoiceList::new(vec![
            Entry::from("a"),
            Entry::from("b"),
            Entry::from("c"),
            Entry::from("d"),
        ])
        .expect("valid list")
    }

    fn reals(set: &CheckedSet) -> Vec<usize> {
        set.entries().iter().map(|entry| entry.real).collect()
    }

    #[test]
    fn absent_defaults_check_every_selectable_choice() {
        let list = plain_list();
        let mut set = CheckedSet::new();
        set.reset(&list, None);
        assert_eq!(reals(&set), vec![0, 1, 2, 3]);
    }

    #[test]
    fn explicit_defaults_check_the_matching_suffix() {
        let list = plain_list();
        let mut set = CheckedSet::new();
        set.reset(&list, Some(&["c".to_owned(), "d".to_owned()]));
        assert_eq!(reals(&set), vec![2, 3]);
    }

    #[test]
    fn non_contiguous_defaults_are_gap_filled() {
        let list = plain_list();
        let mut set = CheckedSet::new();
        set.reset(&list, Some(&["a".to_owned(), "d".to_owned()]));
        assert_eq!(reals(&set), vec![0, 1, 2, 3]);
    }

    #[test]
    fn unmatched_defaults_fall_back_to_all_selectable() {
        let list = plain_list();
        let mut set = CheckedSet::new();
        set.reset(&list, Some(&["nope".to_owned()]));
        assert_eq!(reals(&set), vec![0, 1, 2, 3]);
    }

    #[test]
    fn defaults_skip_separators_and_disabled_rows() {
        let list = ChoiceList::new(vec![
            Entry::Separator(Separator::new("Prep")),
            Entry::Choice(Choice::new("x", "x".to_owned()).disabled()),
            Entry::from("y"),
            Entry::from("z"),
        ])
        .expect("valid list");
        let mut set = CheckedSet::new();
        set.reset(&list, None);
        assert_eq!(
            set.entries(),
            &[
                CheckedEntry { abs: 2, real: 0 },
                CheckedEntry { abs: 3, real: 1 }
            ]
        );
    }

    #[test]
    fn set_checked_is_idempotent_and_deduplicates_by_value() {
        let list = plain_list();
        let mut set = CheckedSet::new();
        set.set_checked(&list, 1, true, 1);
        set.set_checked(&list, 1, true, 1);
        assert_eq!(set.len(), 1);
        assert!(set.contains_value(&list, &"b".to_owned()));
        assert!(!set.contains_value(&list, &"a".to_owned()));

        set.set_checked(&list, 1, false, 1);
        set.set_checked(&list, 1, false, 1);
        assert!(set.is_empty());
    }

    #[test]
    fn entries_stay_sorted_by_absolute_row() {
        let list = plain_list();
        let mut set = CheckedSet::new();
        set.set_checked(&list, 3, true, 3);
        set.set_checked(&list, 1, true, 1);
        set.set_checked(&list, 2, true, 2);
        let abs: Vec<usize> = set.entries().iter().map(|entry| entry.abs).collect();
        assert_eq!(abs, vec![1, 2, 3]);
        assert_eq!(set.first().map(|entry| entry.abs), Some(1));
        assert_eq!(set.last().map(|entry| entry.abs), Some(3));
    }

    #[test]
    fn values_exclude_disabled_entries() {
        let list = ChoiceList::new(vec![
            Entry::from("a"),
            Entry::Choice(Choice::new("x", "x".to_owned()).disabled_because("later")),
        ])
        .expect("valid list");
        let mut set = CheckedSet::new();
        set.reset(&list, None);
        assert_eq!(set.values(&list), vec!["a".to_owned()]);
        assert_eq!(set.labels(&list), vec!["a".to_owned()]);
    }
}
