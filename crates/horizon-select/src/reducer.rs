//! The reducer pipeline.
//!
//! Each action flows through one serialized path: the default
//! [`transition`](crate::transition::transition) proposes [`Changes`], an
//! optional caller-supplied [`StateReducer`] may replace the proposal, the
//! result is applied, externally controlled fields overwrite their computed
//! values, and invariants are re-validated before the next state is
//! published. No other code writes to [`SelectState`].

use std::sync::Arc;

use crate::action::{Action, ActionTag};
use crate::config::SelectConfig;
use crate::model::ItemModel;
use crate::state::{Changes, ControlledState, NO_HIGHLIGHT, SelectState};
use crate::transition::transition;

/// What an override reducer sees for one action: the symbolic tag and the
/// changes the default table proposed.
#[derive(Debug, Clone)]
pub struct StateChange<T> {
    /// Which action produced the proposal.
    pub tag: ActionTag,
    /// The default table's proposed changes.
    pub changes: Changes<T>,
}

/// A caller-supplied override for the default transition table.
///
/// Called exactly once per action with the current state and the proposed
/// [`StateChange`]; the returned changes replace the proposal in full —
/// nothing is merged implicitly, so an override that wants the default
/// behavior for a tag returns `change.changes` untouched. Overrides must
/// treat unrecognized tags as pass-through ([`ActionTag`] is
/// `#[non_exhaustive]`).
///
/// ```
/// use horizon_select::{ActionTag, Changes, SelectState, StateChange, StateReducer};
/// use std::sync::Arc;
///
/// // Suppress closing the menu on Escape; everything else passes through.
/// let reducer: StateReducer<String> =
///     Arc::new(|_state: &SelectState<String>, change: StateChange<String>| {
///         match change.tag {
///             ActionTag::Escape => Changes::default(),
///             _ => change.changes,
///         }
///     });
/// # let _ = reducer;
/// ```
pub type StateReducer<T> =
    Arc<dyn Fn(&SelectState<T>, StateChange<T>) -> Changes<T> + Send + Sync>;

/// Clamp an index into `[-1, len - 1]`.
///
/// Any negative value and any index into an empty catalog collapse to
/// [`NO_HIGHLIGHT`]; an index past the end clamps to the last item.
pub(crate) fn clamp_index(index: i32, len: usize) -> i32 {
    if len == 0 || index < 0 {
        NO_HIGHLIGHT
    } else {
        index.min(len as i32 - 1)
    }
}

/// Run the full pipeline for one action and produce the next state.
pub(crate) fn reduce<T: Clone + PartialEq>(
    state: &SelectState<T>,
    action: &Action<T>,
    model: &dyn ItemModel<T>,
    config: &SelectConfig,
    initial: &SelectState<T>,
    override_reducer: Option<&StateReducer<T>>,
    controlled: &ControlledState<T>,
) -> SelectState<T> {
    let tag = action.tag();
    let mut changes = transition(state, action, model, config, initial);

    if let Some(reducer) = override_reducer {
        changes = reducer(state, StateChange { tag, changes });
    }

    let mut next = changes.apply(state);

    // Controlled overwrite happens after the override step and is not
    // visible to the override function.
    if let Some(is_open) = controlled.is_open {
        next.is_open = is_open;
    }
    if let Some(highlighted_index) = controlled.highlighted_index {
        next.highlighted_index = highlighted_index;
    }
    if let Some(selected_item) = &controlled.selected_item {
        next.selected_item = selected_item.clone();
    }
    if let Some(keys_so_far) = &controlled.keys_so_far {
        next.keys_so_far = keys_so_far.clone();
    }

    validate(&mut next, model.row_count());
    next
}

/// Re-establish the state invariants before publication.
pub(crate) fn validate<T>(state: &mut SelectState<T>, len: usize) {
    state.highlighted_index = clamp_index(state.highlighted_index, len);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StringListModel;

    fn model() -> StringListModel {
        StringListModel::from(["banana", "blueberry", "cherry"])
    }

    fn reduce_default(
        state: &SelectState<String>,
        action: Action<String>,
        override_reducer: Option<&StateReducer<String>>,
        controlled: &ControlledState<String>,
    ) -> SelectState<String> {
        reduce(
            state,
            &action,
            &model(),
            &SelectConfig::default(),
            &SelectState::default(),
            override_reducer,
            controlled,
        )
    }

    #[test]
    fn test_clamp_index() {
        assert_eq!(clamp_index(-5, 3), NO_HIGHLIGHT);
        assert_eq!(clamp_index(-1, 3), NO_HIGHLIGHT);
        assert_eq!(clamp_index(0, 3), 0);
        assert_eq!(clamp_index(2, 3), 2);
        assert_eq!(clamp_index(3, 3), 2);
        assert_eq!(clamp_index(0, 0), NO_HIGHLIGHT);
    }

    #[test]
    fn test_pass_through_override_is_identity() {
        let pass_through: StateReducer<String> =
            Arc::new(|_state, change: StateChange<String>| change.changes);

        let actions = [
            Action::ToggleMenu,
            Action::ArrowDown,
            Action::CharacterKey('b'),
            Action::ArrowDown,
            Action::Enter,
            Action::OpenMenu,
            Action::Escape,
        ];

        let mut with_override = SelectState::default();
        let mut without_override = SelectState::default();
        let controlled = ControlledState::default();

        for action in actions {
            with_override = reduce_default(
                &with_override,
                action.clone(),
                Some(&pass_through),
                &controlled,
            );
            without_override = reduce_default(&without_override, action, None, &controlled);
            assert_eq!(with_override, without_override);
        }
    }

    #[test]
    fn test_override_replaces_changes_in_full() {
        // Rewrite Enter to keep the menu open after committing.
        let keep_open: StateReducer<String> =
            Arc::new(|_state, change: StateChange<String>| match change.tag {
                ActionTag::Enter => Changes {
                    is_open: None,
                    highlighted_index: None,
                    ..change.changes
                },
                _ => change.changes,
            });

        let state = SelectState {
            is_open: true,
            highlighted_index: 1,
            ..SelectState::default()
        };
        let next = reduce_default(
            &state,
            Action::Enter,
            Some(&keep_open),
            &ControlledState::default(),
        );

        assert!(next.is_open);
        assert_eq!(next.highlighted_index, 1);
        assert_eq!(next.selected_item, Some("blueberry".to_string()));
    }

    #[test]
    fn test_override_can_suppress_a_transition() {
        let no_escape: StateReducer<String> =
            Arc::new(|_state, change: StateChange<String>| match change.tag {
                ActionTag::Escape => Changes::default(),
                _ => change.changes,
            });

        let state = SelectState {
            is_open: true,
            highlighted_index: 2,
            ..SelectState::default()
        };
        let next = reduce_default(
            &state,
            Action::Escape,
            Some(&no_escape),
            &ControlledState::default(),
        );
        assert_eq!(next, state);
    }

    #[test]
    fn test_controlled_field_wins_over_computed() {
        let controlled = ControlledState {
            selected_item: Some(Some("banana".to_string())),
            ..ControlledState::default()
        };

        let state = SelectState {
            is_open: true,
            highlighted_index: 2,
            selected_item: Some("banana".to_string()),
            ..SelectState::default()
        };

        // Enter computes "cherry", but the controlled value is published.
        let next = reduce_default(&state, Action::Enter, None, &controlled);
        assert_eq!(next.selected_item, Some("banana".to_string()));
        assert!(!next.is_open); // uncontrolled fields still transition
    }

    #[test]
    fn test_controlled_overwrite_is_invisible_to_override() {
        let controlled = ControlledState {
            is_open: Some(false),
            ..ControlledState::default()
        };

        let saw_open: StateReducer<String> = Arc::new(|_state, change: StateChange<String>| {
            // The override still sees the table's proposal, not the
            // controlled value.
            assert_eq!(change.changes.is_open, Some(true));
            change.changes
        });

        let next = reduce_default(
            &SelectState::default(),
            Action::OpenMenu,
            Some(&saw_open),
            &controlled,
        );
        assert!(!next.is_open);
    }

    #[test]
    fn test_validation_clamps_override_output() {
        let wild: StateReducer<String> = Arc::new(|_state, _change| Changes {
            highlighted_index: Some(999),
            ..Changes::default()
        });

        let next = reduce_default(
            &SelectState::default(),
            Action::ArrowDown,
            Some(&wild),
            &ControlledState::default(),
        );
        assert_eq!(next.highlighted_index, 2);
    }

    #[test]
    fn test_validation_clamps_controlled_values() {
        let controlled = ControlledState {
            highlighted_index: Some(-42),
            ..ControlledState::default()
        };
        let next = reduce_default(
            &SelectState::default(),
            Action::OpenMenu,
            None,
            &controlled,
        );
        assert_eq!(next.highlighted_index, NO_HIGHLIGHT);
    }
}
