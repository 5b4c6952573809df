//! The Windows-style arrow binding, implemented purely as an override
//! reducer: while the menu is closed, ArrowUp/ArrowDown change the selection
//! directly instead of opening the list. Every other action keeps its
//! default behavior.

use std::sync::Arc;

use horizon_select::prelude::*;
use horizon_select::NO_HIGHLIGHT;

fn main() {
    let items = vec![
        "Small".to_string(),
        "Medium".to_string(),
        "Large".to_string(),
        "Extra Large".to_string(),
    ];

    let reducer_items = items.clone();
    let windows_style: StateReducer<String> =
        Arc::new(move |state: &SelectState<String>, change: StateChange<String>| {
            let stepped = |delta: i32| -> Changes<String> {
                let current = state
                    .selected_item
                    .as_ref()
                    .and_then(|item| reducer_items.iter().position(|i| i == item))
                    .map(|index| index as i32)
                    .unwrap_or(NO_HIGHLIGHT);
                let last = reducer_items.len() as i32 - 1;
                let next = (current + delta).clamp(0, last);
                Changes {
                    is_open: Some(false),
                    highlighted_index: Some(NO_HIGHLIGHT),
                    selected_item: Some(reducer_items.get(next as usize).cloned()),
                    keys_so_far: None,
                }
            };

            match change.tag {
                ActionTag::ArrowDown if !state.is_open => stepped(1),
                ActionTag::ArrowUp if !state.is_open => stepped(-1),
                _ => change.changes,
            }
        });

    let mut select = SelectEngine::new(Box::new(StringListModel::new(items)))
        .with_reducer(windows_style);

    select.selected_text_changed.connect(|text: &String| {
        println!("selection: {text}");
    });

    // Arrows walk the selection without ever opening the menu.
    select.dispatch(Action::ArrowDown); // Small
    select.dispatch(Action::ArrowDown); // Medium
    select.dispatch(Action::ArrowDown); // Large
    select.dispatch(Action::ArrowUp); // Medium
    assert!(!select.is_open());

    // The toggle still opens the menu, highlighting the selection.
    select.dispatch(Action::ToggleMenu);
    assert!(select.is_open());
    println!(
        "menu open, highlighted index = {}",
        select.highlighted_index()
    );
}
