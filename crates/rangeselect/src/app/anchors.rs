//! Anchor state machine driving the contiguous selection.

use tracing::trace;

use crate::app::checked::CheckedSet;
use crate::app::choices::ChoiceList;

/// The two boundary roles of the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    End,
}

/// Positions of both anchors in real-index space plus the active role.
///
/// The pointer is derived: it always equals the active anchor's position.
/// Each anchor grows the selection when moved in its own outward direction
/// (start up, end down) and shrinks it when moved toward the other anchor;
/// those four rules keep `start <= end` and the checked set equal to the
/// closed interval `[start, end]` over selectable indices at all times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorMachine {
    start: usize,
    end: usize,
    active: Anchor,
}

impl AnchorMachine {
    /// Seed both anchors from the extremes of the current checked run.
    ///
    /// With nothing checked (only possible when the list has no selectable
    /// entries) both anchors degenerate to zero and every movement is a
    /// no-op.
    pub fn seeded(checked: &CheckedSet) -> Self {
        let start = checked.first().map(|entry| entry.real).unwrap_or(0);
        let end = checked.last().map(|entry| entry.real).unwrap_or(0);
        Self {
            start,
            end,
            active: Anchor::Start,
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn active(&self) -> Anchor {
        self.active
    }

    /// The visible cursor position: the active anchor's real index.
    pub fn pointer(&self) -> usize {
        match self.active {
            Anchor::Start => self.start,
            Anchor::End => self.end,
        }
    }

    /// Toggle which anchor the pointer tracks. Checked state is untouched.
    pub fn swap(&mut self) {
        self.active = match self.active {
            Anchor::Start => Anchor::End,
            Anchor::End => Anchor::Start,
        };
        trace!(active = ?self.active, "anchor swapped");
    }

    /// Re-derive both anchor positions from the checked run, keeping the
    /// active role so the pointer lands on the same anchor.
    pub fn reseed(&mut self, checked: &CheckedSet) {
        self.start = checked.first().map(|entry| entry.real).unwrap_or(0);
        self.end = checked.last().map(|entry| entry.real).unwrap_or(0);
    }

    /// Move the active anchor one step up (toward real index zero).
    pub fn move_up<T: PartialEq>(&mut self, list: &ChoiceList<T>, checked: &mut CheckedSet) {
        if list.max_real().is_none() {
            return;
        }
        match self.active {
            Anchor::Start => self.grow_start_up(list, checked),
            Anchor::End => self.shrink_end_up(list, checked),
        }
    }

    /// Move the active anchor one step down (toward the last real index).
    pub fn move_down<T: PartialEq>(&mut self, list: &ChoiceList<T>, checked: &mut CheckedSet) {
        let Some(max_real) = list.max_real() else {
            return;
        };
        match self.active {
            Anchor::Start => self.shrink_start_down(list, checked, max_real),
            Anchor::End => self.grow_end_down(list, checked, max_real),
        }
    }

    /// Reset to the default checked set (all selectable choices) and re-seed
    /// the anchors to its extremes.
    pub fn select_all<T: PartialEq>(&mut self, list: &ChoiceList<T>, checked: &mut CheckedSet) {
        checked.reset(list, None);
        self.reseed(checked);
        trace!(start = self.start, end = self.end, "selection reset to all");
    }

    // Start moving up extends the lower boundary outward: check first.
    fn grow_start_up<T: PartialEq>(&mut self, list: &ChoiceList<T>, checked: &mut CheckedSet) {
        if self.start == 0 {
            return;
        }
        self.start -= 1;
        if let Some(abs) = list.abs_of(self.start) {
            checked.set_checked(list, abs, true, self.start);
        }
    }

    // End moving up walks toward the start anchor: uncheck the current row,
    // then step. Refuses to cross below the first checked index, which
    // coincides with the start anchor while the run stays contiguous.
    fn shrink_end_up<T: PartialEq>(&mut self, list: &ChoiceList<T>, checked: &mut CheckedSet) {
        let Some(first) = checked.first() else {
            return;
        };
        if self.end == 0 || self.end - 1 < first.real {
            return;
        }
        if let Some(abs) = list.abs_of(self.end) {
            checked.set_checked(list, abs, false, self.end);
        }
        self.end -= 1;
    }

    // Mirror of `shrink_end_up`, bounded by the last checked index.
    fn shrink_start_down<T: PartialEq>(
        &mut self,
        list: &ChoiceList<T>,
        checked: &mut CheckedSet,
        max_real: usize,
    ) {
        let Some(last) = checked.last() else {
            return;
        };
        if self.start >= max_real || self.start + 1 > last.real {
            return;
        }
        if let Some(abs) = list.abs_of(self.start) {
            checked.set_checked(list, abs, false, self.start);
        }
        self.start += 1;
    }

    // Mirror of `grow_start_up`: extend the upper boundary downward.
    fn grow_end_down<T: PartialEq>(
        &mut self,
        list: &ChoiceList<T>,
        checked: &mut CheckedSet,
        max_real: usize,
    ) {
        if self.end >= max_real {
            return;
        }
        self.end += 1;
        if let Some(abs) = list.abs_of(self.end) {
            checked.set_checked(list, abs, true, self.end);
        }
    }
}
