//! Routes normalized prompt events into anchor transitions.

use tracing::debug;

use crate::app::anchors::AnchorMachine;
use crate::app::checked::CheckedSet;
use crate::app::choices::ChoiceList;
use crate::domain::errors::PromptError;
use crate::domain::model::Entry;

/// A normalized key event. Events carry no payload beyond their kind; the
/// host layer owns the mapping from raw terminal input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptEvent {
    Up,
    Down,
    SwapAnchor,
    SelectAll,
    Submit,
    Cancel,
}

/// What the controller decided after consuming one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step<T> {
    /// Keep reading events; re-render first.
    Continue,
    /// The answer was accepted; the event stream is exhausted.
    Done(Vec<T>),
    /// Host-level teardown was requested.
    Cancelled,
}

/// Validates a candidate answer, returning a user-facing message on reject.
pub type Validator<T> = Box<dyn Fn(&[T]) -> Result<(), String>>;

/// Owns the full prompt state and applies exactly one transition per event.
///
/// Strictly single-threaded and cooperative: an event is processed to
/// completion before the next one is read, so rendering always observes
/// fully-applied state.
pub struct Controller<T> {
    message: String,
    list: ChoiceList<T>,
    checked: CheckedSet,
    anchors: AnchorMachine,
    validate: Option<Validator<T>>,
    error: Option<String>,
    answered: bool,
}

impl<T: Clone + PartialEq> Controller<T> {
    /// Build the prompt state: normalize the list, seed the checked set from
    /// the defaults, and place the anchors at its extremes.
    pub fn new(
        message: impl Into<String>,
        entries: Vec<Entry<T>>,
        defaults: Option<Vec<T>>,
        validate: Option<Validator<T>>,
    ) -> Result<Self, PromptError> {
        let list = ChoiceList::new(entries)?;
        let mut checked = CheckedSet::new();
        checked.reset(&list, defaults.as_deref());
        let anchors = AnchorMachine::seeded(&checked);

        Ok(Self {
            message: message.into(),
            list,
            checked,
            anchors,
            validate,
            error: None,
            answered: false,
        })
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn list(&self) -> &ChoiceList<T> {
        &self.list
    }

    pub fn checked(&self) -> &CheckedSet {
        &self.checked
    }

    pub fn anchors(&self) -> &AnchorMachine {
        &self.anchors
    }

    /// The validation message from the most recent rejected submit, if the
    /// user has not pressed another key since.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the prompt has been finalized.
    pub fn answered(&self) -> bool {
        self.answered
    }

    /// Ordered values of the current selection.
    pub fn current_values(&self) -> Vec<T> {
        self.checked.values(&self.list)
    }

    /// Ordered labels of the current selection, for the answered summary.
    pub fn selected_labels(&self) -> Vec<String> {
        self.checked.labels(&self.list)
    }

    /// Apply exactly one transition for the event.
    ///
    /// Finalization is one-shot: once answered, further events fall through
    /// as no-ops (the host stops reading the stream anyway).
    pub fn handle(&mut self, event: PromptEvent) -> Step<T> {
        if self.answered {
            return Step::Continue;
        }

        // Any keypress clears a previously displayed validation message.
        self.error = None;

        match event {
            PromptEvent::Up => {
                self.anchors.move_up(&self.list, &mut self.checked);
                Step::Continue
            }
            PromptEvent::Down => {
                self.anchors.move_down(&self.list, &mut self.checked);
                Step::Continue
            }
            PromptEvent::SwapAnchor => {
                self.anchors.swap();
                Step::Continue
            }
            PromptEvent::SelectAll => {
                self.anchors.select_all(&self.list, &mut self.checked);
                Step::Continue
            }
            PromptEvent::Submit => self.submit(),
            PromptEvent::Cancel => Step::Cancelled,
        }
    }

    fn submit(&mut self) -> Step<T> {
        let values = self.current_values();
        if let Some(validate) = &self.validate
            && let Err(message) = validate(&values)
        {
            debug!(%message, "submission rejected by validator");
            self.error = Some(message);
            return Step::Continue;
        }

        debug!(count = values.len(), "prompt answered");
        self.answered = true;
        Step::Done(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::domain::model::{Choice, Separator};

    fn entries(names: &[&str]) -> Vec<Entry<String>> {
        names.iter().map(|name| Entry::from(*name)).collect()
    }

    fn owned(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_owned()).collect()
    }

    #[test]
    fn empty_entry_list_fails_construction() {
        let result = Controller::<String>::new("Steps", Vec::new(), None, None);
        assert!(matches!(result, Err(PromptError::EmptyChoices)));
    }

    #[test]
    fn submit_without_validator_returns_the_checked_values() {
        let mut controller =
            Controller::new("Steps", entries(&["a", "b", "c"]), None, None).expect("valid prompt");
        match controller.handle(PromptEvent::Submit) {
            Step::Done(values) => assert_eq!(values, owned(&["a", "b", "c"])),
            other => panic!("expected Done, got {other:?}"),
        }
        assert!(controller.answered());
    }

    #[test]
    fn rejected_submit_keeps_the_prompt_interactive() {
        let validate: Validator<String> = Box::new(|values| {
            if values.len() < 2 {
                Err("You must choose at least two steps.".to_owned())
            } else {
                Ok(())
            }
        });
        let defaults = owned(&["d"]);
        let mut controller = Controller::new(
            "Steps",
            entries(&["a", "b", "c", "d"]),
            Some(defaults),
            Some(validate),
        )
        .expect("valid prompt");

        match controller.handle(PromptEvent::Submit) {
            Step::Continue => {}
            other => panic!("expected Continue, got {other:?}"),
        }
        assert_eq!(
            controller.error(),
            Some("You must choose at least two steps.")
        );
        assert!(!controller.answered());
        assert_eq!(controller.current_values(), owned(&["d"]));

        // Growing the selection and resubmitting succeeds, and the error is
        // cleared by the intervening keypress.
        controller.handle(PromptEvent::Up);
        assert_eq!(controller.error(), None);
        match controller.handle(PromptEvent::Submit) {
            Step::Done(values) => assert_eq!(values, owned(&["c", "d"])),
            other => panic!("expected Done, got {other:?}"),
        }
    }

    #[test]
    fn events_after_finalize_are_ignored() {
        let mut controller =
            Controller::new("Steps", entries(&["a", "b"]), None, None).expect("valid prompt");
        assert!(matches!(
            controller.handle(PromptEvent::Submit),
            Step::Done(_)
        ));

        let values_before = controller.current_values();
        assert!(matches!(
            controller.handle(PromptEvent::Down),
            Step::Continue
        ));
        assert_eq!(controller.current_values(), values_before);
    }

    #[test]
    fn cancel_requests_teardown_without_finalizing() {
        let mut controller =
            Controller::new("Steps", entries(&["a"]), None, None).expect("valid prompt");
        assert!(matches!(
            controller.handle(PromptEvent::Cancel),
            Step::Cancelled
        ));
        assert!(!controller.answered());
    }

    #[test]
    fn submit_on_a_fully_unselectable_list_yields_an_empty_answer() {
        let list: Vec<Entry<String>> = vec![
            Entry::Separator(Separator::line()),
            Entry::Choice(Choice::new("x", "x".to_owned()).disabled()),
        ];
        let mut controller = Controller::new("Steps", list, None, None).expect("valid prompt");
        controller.handle(PromptEvent::Up);
        controller.handle(PromptEvent::Down);
        match controller.handle(PromptEvent::Submit) {
            Step::Done(values) => assert!(values.is_empty()),
            other => panic!("expected Done, got {other:?}"),
        }
    }
}
