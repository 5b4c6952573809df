//! The default transition table.
//!
//! [`transition`] maps `(state, action)` to a proposed [`Changes`] value.
//! It is pure and side-effect free: nothing is applied here, so an override
//! reducer can inspect or replace the proposal before it ever touches state.

use crate::action::Action;
use crate::config::SelectConfig;
use crate::model::ItemModel;
use crate::reducer::clamp_index;
use crate::state::{Changes, NO_HIGHLIGHT, SelectState};

/// Compute the default policy outcome for one action.
///
/// `initial` is the state snapshot [`Action::Reset`] restores. The returned
/// changes are a proposal only; invariant re-validation happens when the
/// reducer pipeline publishes the next state.
pub fn transition<T: Clone + PartialEq>(
    state: &SelectState<T>,
    action: &Action<T>,
    model: &dyn ItemModel<T>,
    config: &SelectConfig,
    initial: &SelectState<T>,
) -> Changes<T> {
    let n = model.row_count();
    let mut changes = Changes::default();

    // Any action other than a character key clears the typeahead buffer.
    // Blur is the one exception: it leaves the buffer to the idle timeout.
    let clears_keys = !matches!(
        action,
        Action::CharacterKey(_) | Action::Blur | Action::TypeaheadTimeout
    );
    if clears_keys && !state.keys_so_far.is_empty() {
        changes.keys_so_far = Some(String::new());
    }

    match action {
        Action::ToggleMenu => {
            if state.is_open {
                close_menu(&mut changes);
            } else {
                open_menu(&mut changes, state, model, n);
            }
        }
        Action::OpenMenu => {
            if !state.is_open {
                open_menu(&mut changes, state, model, n);
            }
        }
        Action::CloseMenu => {
            if state.is_open {
                close_menu(&mut changes);
            }
        }
        Action::ArrowDown => {
            if !state.is_open {
                open_menu(&mut changes, state, model, n);
            } else if n > 0 {
                changes.highlighted_index = Some(step(
                    state.highlighted_index,
                    1,
                    n,
                    config.circular_navigation,
                ));
            }
        }
        Action::ArrowUp => {
            if !state.is_open {
                open_menu(&mut changes, state, model, n);
            } else if n > 0 {
                changes.highlighted_index = Some(step(
                    state.highlighted_index,
                    -1,
                    n,
                    config.circular_navigation,
                ));
            }
        }
        Action::Home => {
            if n > 0 {
                changes.highlighted_index = Some(0);
            }
        }
        Action::End => {
            if n > 0 {
                changes.highlighted_index = Some(n as i32 - 1);
            }
        }
        Action::Escape => {
            changes.is_open = Some(false);
            changes.highlighted_index = Some(NO_HIGHLIGHT);
        }
        Action::Enter => {
            if state.is_open {
                commit_highlight(&mut changes, state, model);
            }
        }
        Action::Space => {
            if state.is_open {
                commit_highlight(&mut changes, state, model);
            } else {
                open_menu(&mut changes, state, model, n);
            }
        }
        Action::CharacterKey(c) => {
            typeahead(&mut changes, state, *c, model, config, n);
        }
        Action::ItemHover(index) => {
            changes.highlighted_index = Some(clamp_index(*index as i32, n));
        }
        Action::ItemClick(index) => {
            // A stale index (catalog shrank since the render) still closes
            // the menu, but commits nothing.
            if let Some(item) = model.item(*index) {
                changes.selected_item = Some(Some(item));
            }
            close_menu(&mut changes);
        }
        Action::Blur => {
            if state.is_open {
                close_menu(&mut changes);
            }
        }
        Action::SetHighlightedIndex(index) => {
            changes.highlighted_index = Some(clamp_index(*index, n));
        }
        Action::SelectItem(item) => {
            // Only catalog values may become the selection.
            if model.find_item(item).is_some() {
                changes.selected_item = Some(Some(item.clone()));
            }
        }
        Action::Reset => {
            changes.is_open = Some(initial.is_open);
            changes.highlighted_index = Some(initial.highlighted_index);
            changes.selected_item = Some(initial.selected_item.clone());
            changes.keys_so_far = Some(initial.keys_so_far.clone());
        }
        Action::TypeaheadTimeout => {
            // Stale fires against an already-empty buffer are no-ops.
            if !state.keys_so_far.is_empty() {
                changes.keys_so_far = Some(String::new());
            }
        }
    }

    changes
}

/// Opening highlights the selection when it is still in the catalog, else
/// the first item, else nothing.
fn open_menu<T: Clone + PartialEq>(
    changes: &mut Changes<T>,
    state: &SelectState<T>,
    model: &dyn ItemModel<T>,
    n: usize,
) {
    changes.is_open = Some(true);
    let highlight = state
        .selected_item
        .as_ref()
        .and_then(|item| model.find_item(item))
        .map(|index| index as i32)
        .unwrap_or(if n > 0 { 0 } else { NO_HIGHLIGHT });
    changes.highlighted_index = Some(highlight);
}

fn close_menu<T: Clone>(changes: &mut Changes<T>) {
    changes.is_open = Some(false);
    changes.highlighted_index = Some(NO_HIGHLIGHT);
}

/// Commit the highlighted item: select it, close, clear the highlight.
/// No-op when nothing valid is highlighted.
fn commit_highlight<T: Clone + PartialEq>(
    changes: &mut Changes<T>,
    state: &SelectState<T>,
    model: &dyn ItemModel<T>,
) {
    if state.highlighted_index < 0 {
        return;
    }
    if let Some(item) = model.item(state.highlighted_index as usize) {
        changes.selected_item = Some(Some(item));
        close_menu(changes);
    }
}

/// Advance an index by `delta`, wrapping or clamping at the ends.
fn step(current: i32, delta: i32, n: usize, circular: bool) -> i32 {
    let last = n as i32 - 1;
    let next = current + delta;
    if circular {
        if next > last {
            0
        } else if next < 0 {
            last
        } else {
            next
        }
    } else {
        next.clamp(0, last)
    }
}

/// Append a typed character and move the highlight to the first match.
///
/// A sequence of one character — or the same character repeated — searches by
/// that single character starting just after the current highlight, which is
/// what makes repeated presses of one letter cycle through its matches. A
/// mixed sequence searches by the full buffer starting at the current
/// highlight, so refining a prefix keeps the current item while it still
/// matches. No match retains the previous highlight.
fn typeahead<T: Clone + PartialEq>(
    changes: &mut Changes<T>,
    state: &SelectState<T>,
    c: char,
    model: &dyn ItemModel<T>,
    config: &SelectConfig,
    n: usize,
) {
    if c.is_control() {
        return;
    }

    let mut keys = state.keys_so_far.clone();
    keys.push(c);
    changes.keys_so_far = Some(keys.clone());

    if n == 0 {
        return;
    }

    let mut chars = keys.chars();
    let first = chars.next().unwrap_or(c);
    let repeated = chars.all(|k| k == first);

    let (needle, start) = if repeated {
        (first.to_string(), state.highlighted_index + 1)
    } else {
        (keys, state.highlighted_index.max(0))
    };
    let start = start.max(0) as usize % n;

    if let Some(index) = model.match_prefix(&needle, start, config.case_sensitivity) {
        changes.highlighted_index = Some(index as i32);
    }
}
