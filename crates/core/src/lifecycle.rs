//! Task list lifecycle state machine.
//!
//! A list is persisted as two independent flags (`is_submitted`,
//! `is_closed`), but every rule in the system reasons about the three states
//! below. [`ListState::from_flags`] is the only place the flags are
//! interpreted: `closed` dominates, so `(submitted=false, closed=true)` and
//! `(submitted=true, closed=true)` are the same state.
//!
//! ```text
//! Open      --submit--> Submitted
//! Open      --close---> Closed
//! Submitted --close---> Closed      (submitted flag kept)
//! Submitted --reopen--> Open        (both flags and timestamps cleared)
//! Closed    --reopen--> Open
//! ```

use serde::{Deserialize, Serialize};

/// Lifecycle state of a task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListState {
    Open,
    Submitted,
    Closed,
}

/// A user- or system-requested lifecycle transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    Submit,
    Close,
    Reopen,
}

/// Why a lifecycle transition or a gated mutation was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    #[error("Task list already submitted")]
    AlreadySubmitted,

    #[error("Task list already closed")]
    AlreadyClosed,

    #[error("Task list is already open")]
    AlreadyOpen,

    /// Content and structure can only change while the list is open.
    #[error("Cannot modify tasks in a {state} task list")]
    NotEditable { state: ListState },

    /// Completion marking stops once the list is closed.
    #[error("Cannot modify tasks in a closed task list")]
    Frozen,
}

impl ListState {
    /// Derive the state from the two persisted flags.
    pub fn from_flags(is_submitted: bool, is_closed: bool) -> Self {
        match (is_submitted, is_closed) {
            (_, true) => ListState::Closed,
            (true, false) => ListState::Submitted,
            (false, false) => ListState::Open,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ListState::Open => "open",
            ListState::Submitted => "submitted",
            ListState::Closed => "closed",
        }
    }

    /// Create, edit, delete and reorder are allowed only while open.
    pub fn ensure_editable(self) -> Result<(), LifecycleError> {
        match self {
            ListState::Open => Ok(()),
            state => Err(LifecycleError::NotEditable { state }),
        }
    }

    /// Completion can be toggled while open or submitted, not once closed.
    pub fn ensure_completable(self) -> Result<(), LifecycleError> {
        match self {
            ListState::Open | ListState::Submitted => Ok(()),
            ListState::Closed => Err(LifecycleError::Frozen),
        }
    }

    /// Apply `transition`, returning the resulting state.
    ///
    /// Repeating a transition that would not change anything is an error, not
    /// a silent success.
    pub fn apply(self, transition: Transition) -> Result<ListState, LifecycleError> {
        use ListState::*;
        use Transition::*;

        match (self, transition) {
            (Open, Submit) => Ok(Submitted),
            (Submitted, Submit) => Err(LifecycleError::AlreadySubmitted),
            (Closed, Submit) => Err(LifecycleError::AlreadyClosed),

            (Open | Submitted, Close) => Ok(Closed),
            (Closed, Close) => Err(LifecycleError::AlreadyClosed),

            (Submitted | Closed, Reopen) => Ok(Open),
            (Open, Reopen) => Err(LifecycleError::AlreadyOpen),
        }
    }

    /// Transitions permitted from this state.
    pub fn permitted_transitions(self) -> &'static [Transition] {
        match self {
            ListState::Open => &[Transition::Submit, Transition::Close],
            ListState::Submitted => &[Transition::Close, Transition::Reopen],
            ListState::Closed => &[Transition::Reopen],
        }
    }
}

impl std::fmt::Display for ListState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Transition {
    pub fn as_str(self) -> &'static str {
        match self {
            Transition::Submit => "submit",
            Transition::Close => "close",
            Transition::Reopen => "reopen",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const ALL_STATES: [ListState; 3] = [ListState::Open, ListState::Submitted, ListState::Closed];
    const ALL_TRANSITIONS: [Transition; 3] =
        [Transition::Submit, Transition::Close, Transition::Reopen];

    #[test]
    fn flags_map_to_states() {
        assert_eq!(ListState::from_flags(false, false), ListState::Open);
        assert_eq!(ListState::from_flags(true, false), ListState::Submitted);
        assert_eq!(ListState::from_flags(true, true), ListState::Closed);
    }

    #[test]
    fn closed_flag_dominates_submitted_flag() {
        assert_eq!(
            ListState::from_flags(false, true),
            ListState::from_flags(true, true)
        );
    }

    #[test]
    fn submit_succeeds_once_then_fails() {
        let submitted = ListState::Open.apply(Transition::Submit).unwrap();
        assert_eq!(submitted, ListState::Submitted);
        assert_matches!(
            submitted.apply(Transition::Submit),
            Err(LifecycleError::AlreadySubmitted)
        );
    }

    #[test]
    fn submit_on_closed_list_reports_closed() {
        assert_matches!(
            ListState::Closed.apply(Transition::Submit),
            Err(LifecycleError::AlreadyClosed)
        );
    }

    #[test]
    fn close_is_allowed_from_open_and_submitted() {
        assert_eq!(ListState::Open.apply(Transition::Close), Ok(ListState::Closed));
        assert_eq!(
            ListState::Submitted.apply(Transition::Close),
            Ok(ListState::Closed)
        );
        assert_matches!(
            ListState::Closed.apply(Transition::Close),
            Err(LifecycleError::AlreadyClosed)
        );
    }

    #[test]
    fn reopen_requires_a_non_open_state() {
        assert_eq!(ListState::Closed.apply(Transition::Reopen), Ok(ListState::Open));
        assert_eq!(
            ListState::Submitted.apply(Transition::Reopen),
            Ok(ListState::Open)
        );
        assert_matches!(
            ListState::Open.apply(Transition::Reopen),
            Err(LifecycleError::AlreadyOpen)
        );
    }

    #[test]
    fn permitted_table_agrees_with_apply() {
        for state in ALL_STATES {
            for transition in ALL_TRANSITIONS {
                let permitted = state.permitted_transitions().contains(&transition);
                assert_eq!(
                    permitted,
                    state.apply(transition).is_ok(),
                    "{state} --{}-->",
                    transition.as_str()
                );
            }
        }
    }

    #[test]
    fn only_open_lists_are_editable() {
        assert!(ListState::Open.ensure_editable().is_ok());
        assert_matches!(
            ListState::Submitted.ensure_editable(),
            Err(LifecycleError::NotEditable {
                state: ListState::Submitted
            })
        );
        assert_matches!(
            ListState::Closed.ensure_editable(),
            Err(LifecycleError::NotEditable {
                state: ListState::Closed
            })
        );
    }

    #[test]
    fn completion_is_allowed_until_closed() {
        assert!(ListState::Open.ensure_completable().is_ok());
        assert!(ListState::Submitted.ensure_completable().is_ok());
        assert_matches!(
            ListState::Closed.ensure_completable(),
            Err(LifecycleError::Frozen)
        );
    }

    #[test]
    fn state_serializes_as_snake_case() {
        assert_eq!(
            serde_json::to_string(&ListState::Submitted).unwrap(),
            "\"submitted\""
        );
    }

    #[test]
    fn not_editable_message_names_the_state() {
        let err = ListState::Submitted.ensure_editable().unwrap_err();
        assert_eq!(err.to_string(), "Cannot modify tasks in a submitted task list");
    }
}
