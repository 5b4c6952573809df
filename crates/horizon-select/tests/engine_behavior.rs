//! End-to-end behavior of the select engine.
//!
//! These tests drive the public API only: actions in, directives and
//! published state out. Typeahead timing is driven with explicit instants so
//! every scenario is deterministic.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use horizon_select::prelude::*;
use horizon_select::{NO_HIGHLIGHT, SelectConfig, StaleSelectionPolicy};

fn fruit_engine() -> SelectEngine<String> {
    SelectEngine::new(Box::new(StringListModel::from([
        "banana",
        "blueberry",
        "cherry",
    ])))
}

// ============================================================================
// Arrow navigation
// ============================================================================

#[test]
fn test_arrow_down_sequence_wraps_modulo_catalog_size() {
    // k ArrowDown actions from nothing highlighted: the first opens and
    // highlights 0, each further press advances by one modulo n.
    let n = 3;
    for k in 1..=8 {
        let mut select = fruit_engine();
        for _ in 0..k {
            select.dispatch(Action::ArrowDown);
        }
        assert!(select.is_open());
        assert_eq!(
            select.highlighted_index(),
            ((k - 1) % n) as i32,
            "after {k} presses"
        );
    }
}

#[test]
fn test_arrow_up_from_first_item_wraps_to_last() {
    let mut select = fruit_engine();
    select.dispatch(Action::ArrowDown); // open at 0
    select.dispatch(Action::ArrowUp);
    assert_eq!(select.highlighted_index(), 2);
}

#[test]
fn test_non_circular_navigation_clamps_at_ends() {
    let mut select = fruit_engine().with_config(SelectConfig {
        circular_navigation: false,
        ..SelectConfig::default()
    });

    select.dispatch(Action::ArrowDown); // open at 0
    select.dispatch(Action::ArrowUp);
    assert_eq!(select.highlighted_index(), 0);

    select.dispatch(Action::End);
    select.dispatch(Action::ArrowDown);
    assert_eq!(select.highlighted_index(), 2);
}

#[test]
fn test_home_and_end_jump_to_catalog_bounds() {
    let mut select = fruit_engine();
    select.open_menu();
    select.dispatch(Action::End);
    assert_eq!(select.highlighted_index(), 2);
    select.dispatch(Action::Home);
    assert_eq!(select.highlighted_index(), 0);
}

// ============================================================================
// Escape / commit
// ============================================================================

#[test]
fn test_escape_closes_without_touching_selection() {
    let mut select = fruit_engine();

    // From a closed, empty state.
    select.dispatch(Action::Escape);
    assert!(!select.is_open());
    assert_eq!(select.highlighted_index(), NO_HIGHLIGHT);
    assert!(select.selected_item().is_none());

    // From an open state with a selection.
    select.select_item("banana".to_string());
    select.open_menu();
    select.dispatch(Action::ArrowDown);
    select.dispatch(Action::Escape);
    assert!(!select.is_open());
    assert_eq!(select.highlighted_index(), NO_HIGHLIGHT);
    assert_eq!(select.selected_item(), Some(&"banana".to_string()));
}

#[test]
fn test_enter_commits_highlighted_item() {
    let mut select = fruit_engine();
    select.open_menu();
    select.dispatch(Action::ArrowDown); // 1
    select.dispatch(Action::Enter);

    assert_eq!(select.selected_item(), Some(&"blueberry".to_string()));
    assert!(!select.is_open());
    assert_eq!(select.highlighted_index(), NO_HIGHLIGHT);
}

#[test]
fn test_commit_emits_announcement_directive() {
    let mut select = fruit_engine();
    select.open_menu();
    let directives = select.dispatch(Action::ItemClick(0));
    assert!(directives.contains(&Directive::AnnounceSelection(
        "banana has been selected".to_string()
    )));
}

// ============================================================================
// Typeahead
// ============================================================================

#[test]
fn test_typeahead_cycles_matches_and_resets_after_idle() {
    let mut select = fruit_engine();
    let t0 = Instant::now();

    select.dispatch_at(Action::OpenMenu, t0);

    // "b" finds banana.
    select.dispatch_at(Action::CharacterKey('b'), t0);
    assert_eq!(select.highlighted_index(), 0);

    // A second "b" inside the idle window cycles to the next "b" match.
    select.dispatch_at(Action::CharacterKey('b'), t0 + Duration::from_millis(200));
    assert_eq!(select.highlighted_index(), 1);

    // After the idle window elapses, "c" starts a fresh sequence.
    select.dispatch_at(Action::CharacterKey('c'), t0 + Duration::from_millis(900));
    assert_eq!(select.highlighted_index(), 2);
    assert_eq!(select.keys_so_far(), "c");
}

#[test]
fn test_typeahead_matches_are_case_insensitive() {
    let mut select = fruit_engine();
    select.open_menu();
    select.dispatch(Action::CharacterKey('C'));
    assert_eq!(select.highlighted_index(), 2);
}

#[test]
fn test_typeahead_buffer_empties_after_idle_window() {
    let mut select = fruit_engine();
    let t0 = Instant::now();

    select.dispatch_at(Action::CharacterKey('b'), t0);
    assert_eq!(select.keys_so_far(), "b");

    // Just a poll — no user action — past the window.
    select.poll_at(t0 + Duration::from_millis(501));
    assert_eq!(select.keys_so_far(), "");
}

#[test]
fn test_typeahead_reset_is_visible_to_overrides() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = seen.clone();
    let spy: StateReducer<String> = Arc::new(move |_state, change: StateChange<String>| {
        seen_clone.lock().push(change.tag);
        change.changes
    });

    let mut select = fruit_engine().with_reducer(spy);
    let t0 = Instant::now();
    select.dispatch_at(Action::CharacterKey('b'), t0);
    select.poll_at(t0 + Duration::from_secs(1));

    assert_eq!(
        *seen.lock(),
        vec![ActionTag::CharacterKey, ActionTag::TypeaheadTimeout]
    );
}

#[test]
fn test_typeahead_works_while_closed_without_scroll_directives() {
    let mut select = fruit_engine();
    let directives = select.dispatch(Action::CharacterKey('c'));

    // Highlight moves, but a closed menu never requests scrolling.
    assert_eq!(select.highlighted_index(), 2);
    assert!(directives.is_empty());
}

// ============================================================================
// Controlled fields
// ============================================================================

#[test]
fn test_controlled_selection_survives_any_commit_sequence() {
    let pinned = Some("banana".to_string());
    let mut select = fruit_engine().with_controlled(ControlledState {
        selected_item: Some(pinned.clone()),
        ..ControlledState::default()
    });

    select.open_menu();
    select.dispatch(Action::ItemClick(2));
    assert_eq!(select.selected_item(), pinned.as_ref());

    select.open_menu();
    select.dispatch(Action::End);
    select.dispatch(Action::Enter);
    assert_eq!(select.selected_item(), pinned.as_ref());

    select.select_item("cherry".to_string());
    assert_eq!(select.selected_item(), pinned.as_ref());
}

#[test]
fn test_controlled_open_state_pins_menu() {
    let mut select = fruit_engine().with_controlled(ControlledState {
        is_open: Some(false),
        ..ControlledState::default()
    });

    select.dispatch(Action::ArrowDown);
    assert!(!select.is_open());

    // Releasing control lets the internal transition take over again.
    select.set_controlled(ControlledState::default());
    select.dispatch(Action::ArrowDown);
    assert!(select.is_open());
}

// ============================================================================
// Override reducer
// ============================================================================

#[test]
fn test_pass_through_override_changes_nothing() {
    let pass_through: StateReducer<String> =
        Arc::new(|_state, change: StateChange<String>| change.changes);

    let script = |select: &mut SelectEngine<String>| {
        let t0 = Instant::now();
        select.dispatch_at(Action::ArrowDown, t0);
        select.dispatch_at(Action::CharacterKey('b'), t0);
        select.dispatch_at(Action::CharacterKey('b'), t0 + Duration::from_millis(100));
        select.dispatch_at(Action::Enter, t0 + Duration::from_millis(200));
        select.dispatch_at(Action::OpenMenu, t0 + Duration::from_millis(300));
        select.dispatch_at(Action::Escape, t0 + Duration::from_millis(400));
    };

    let mut plain = fruit_engine();
    let mut overridden = fruit_engine().with_reducer(pass_through);
    script(&mut plain);
    script(&mut overridden);

    assert_eq!(plain.state(), overridden.state());
}

#[test]
fn test_override_implements_alternate_arrow_binding() {
    // Windows-style: arrows while closed change the selection directly
    // instead of opening the menu.
    let windows_style: StateReducer<String> =
        Arc::new(|state, change: StateChange<String>| match change.tag {
            ActionTag::ArrowDown if !state.is_open => Changes {
                is_open: Some(false),
                ..change.changes
            },
            _ => change.changes,
        });

    let mut select = fruit_engine().with_reducer(windows_style);
    select.dispatch(Action::ArrowDown);
    assert!(!select.is_open());
    assert_eq!(select.highlighted_index(), 0);
}

// ============================================================================
// Catalog replacement
// ============================================================================

#[test]
fn test_keep_policy_preserves_vanished_selection() {
    let mut select = fruit_engine();
    select.select_item("blueberry".to_string());

    select.set_model(Box::new(StringListModel::from(["kiwi"])));
    assert_eq!(select.selected_item(), Some(&"blueberry".to_string()));
    assert_eq!(select.selected_index(), NO_HIGHLIGHT);

    // Opening falls back to the first item since the selection has no index.
    select.open_menu();
    assert_eq!(select.highlighted_index(), 0);
}

#[test]
fn test_clear_policy_drops_vanished_selection() {
    let mut select = fruit_engine().with_config(SelectConfig {
        stale_selection: StaleSelectionPolicy::Clear,
        ..SelectConfig::default()
    });
    select.select_item("blueberry".to_string());

    let cleared = Arc::new(Mutex::new(Vec::new()));
    let cleared_clone = cleared.clone();
    select.selected_index_changed.connect(move |&index| {
        cleared_clone.lock().push(index);
    });

    select.set_model(Box::new(StringListModel::from(["kiwi"])));
    assert!(select.selected_item().is_none());
    assert_eq!(*cleared.lock(), vec![NO_HIGHLIGHT]);
}

#[test]
fn test_shrinking_catalog_clamps_open_highlight() {
    let mut select = fruit_engine();
    select.open_menu();
    select.dispatch(Action::End);

    select.set_model(Box::new(StringListModel::from(["kiwi", "mango"])));
    assert_eq!(select.highlighted_index(), 1);
}

// ============================================================================
// Empty catalog
// ============================================================================

#[test]
fn test_empty_catalog_absorbs_all_navigation() {
    let mut select: SelectEngine<String> = SelectEngine::new(Box::new(StringListModel::empty()));

    select.dispatch(Action::ArrowDown);
    assert!(select.is_open());
    assert_eq!(select.highlighted_index(), NO_HIGHLIGHT);

    for action in [
        Action::ArrowDown,
        Action::ArrowUp,
        Action::Home,
        Action::End,
        Action::CharacterKey('a'),
        Action::Enter,
    ] {
        select.dispatch(action);
        assert_eq!(select.highlighted_index(), NO_HIGHLIGHT);
        assert!(select.selected_item().is_none());
    }
}

// ============================================================================
// Directives
// ============================================================================

#[test]
fn test_focus_directives_track_open_transitions() {
    let mut select = fruit_engine();

    let directives = select.dispatch(Action::ToggleMenu);
    assert_eq!(directives.first(), Some(&Directive::FocusMenu));

    let directives = select.dispatch(Action::ToggleMenu);
    assert_eq!(directives.first(), Some(&Directive::FocusToggle));
}

#[test]
fn test_highlight_movement_emits_scroll_directives_only_while_open() {
    let mut select = fruit_engine();
    select.open_menu();

    let directives = select.dispatch(Action::ArrowDown);
    assert_eq!(directives, vec![Directive::ScrollItemIntoView(1)]);

    // Closing emits focus movement but no scroll for the cleared highlight.
    let directives = select.dispatch(Action::Escape);
    assert_eq!(directives, vec![Directive::FocusToggle]);
}

// ============================================================================
// Accessibility projection
// ============================================================================

#[test]
fn test_projection_exposes_listbox_pattern() {
    let mut select = fruit_engine();
    select.open_menu();
    select.dispatch(Action::ArrowDown);
    select.dispatch(Action::Enter);
    select.open_menu();

    let attrs = select.attributes();
    assert!(attrs.toggle.expanded);
    assert_eq!(attrs.toggle.controls.as_ref(), Some(&attrs.list.id));
    assert_eq!(
        attrs.list.active_descendant.as_ref(),
        Some(&attrs.options[1].id)
    );
    assert!(attrs.options[1].selected);
    assert!(attrs.options[1].highlighted);
    assert_eq!(attrs.options.len(), 3);
    assert_eq!(attrs.options[2].position_in_set, 3);
}
