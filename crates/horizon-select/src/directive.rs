//! Post-transition directives.
//!
//! The engine never moves focus, scrolls, or speaks. Instead it derives,
//! from each state transition, a small set of advisory [`Directive`]s and
//! leaves their execution to a platform adapter. This keeps the state
//! machine pure and testable without simulating a rendering surface.

use crate::model::ItemModel;
use crate::state::SelectState;

/// An advisory instruction for an external collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Return input focus to the toggle control (the menu just closed).
    FocusToggle,
    /// Move input focus to the list container (the menu just opened).
    FocusMenu,
    /// Bring the item at this index into view.
    ScrollItemIntoView(usize),
    /// Announce the new selection to assistive technology.
    AnnounceSelection(String),
}

/// Derive the directives for one state transition.
///
/// Pure in the state delta:
/// - closed → open emits [`Directive::FocusMenu`];
/// - open → closed emits [`Directive::FocusToggle`];
/// - a highlight change emits [`Directive::ScrollItemIntoView`], but only
///   while the menu is open and something is highlighted — a closed menu
///   never requests scrolling;
/// - a selection change to a non-empty value emits
///   [`Directive::AnnounceSelection`] with the item's display text.
pub fn emit_directives<T: Clone + PartialEq>(
    prev: &SelectState<T>,
    next: &SelectState<T>,
    model: &dyn ItemModel<T>,
) -> Vec<Directive> {
    let mut directives = Vec::new();

    if !prev.is_open && next.is_open {
        directives.push(Directive::FocusMenu);
    } else if prev.is_open && !next.is_open {
        directives.push(Directive::FocusToggle);
    }

    if next.is_open
        && next.highlighted_index != prev.highlighted_index
        && next.highlighted_index >= 0
    {
        directives.push(Directive::ScrollItemIntoView(next.highlighted_index as usize));
    }

    if next.selected_item != prev.selected_item
        && let Some(selected) = &next.selected_item
    {
        // A selection pinned by a controlled value may not be a catalog
        // member; without display text there is nothing to announce.
        if let Some(text) = model.item_text(selected) {
            directives.push(Directive::AnnounceSelection(format!(
                "{text} has been selected"
            )));
        }
    }

    directives
}
