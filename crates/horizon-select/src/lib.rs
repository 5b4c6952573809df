//! Headless, accessible single-selection dropdown engine.
//!
//! This crate implements the interaction engine behind a keyboard-navigable
//! dropdown following the listbox accessibility pattern: open/close
//! semantics, highlighted-item navigation with wrap-around, typeahead by
//! character, explicit selection, and coexistence of internally-managed and
//! externally-controlled state. It renders nothing and reads no raw input —
//! a host classifies events into [`Action`]s, feeds them to a
//! [`SelectEngine`], executes the returned [`Directive`]s, and projects
//! [`attributes`](SelectEngine::attributes) into its accessibility surface.
//!
//! # Architecture
//!
//! Every action flows through one serialized pipeline:
//!
//! 1. the pure transition table proposes [`Changes`];
//! 2. an optional caller-supplied [`StateReducer`] may replace the proposal
//!    per action tag;
//! 3. the proposal is applied, and externally controlled fields
//!    ([`ControlledState`]) overwrite their computed values;
//! 4. invariants are re-validated against the current [`ItemModel`];
//! 5. the published delta yields directives and change signals.
//!
//! The typeahead idle timer is not special-cased: its expiry re-enters the
//! pipeline as [`Action::TypeaheadTimeout`], so even the buffer reset is
//! observable and overridable.
//!
//! # Example
//!
//! ```
//! use horizon_select::{Action, SelectEngine, StringListModel};
//!
//! let model = StringListModel::from(["banana", "blueberry", "cherry"]);
//! let mut select = SelectEngine::new(Box::new(model));
//!
//! select.selected_text_changed.connect(|text| {
//!     println!("picked: {text}");
//! });
//!
//! select.dispatch(Action::ArrowDown); // opens, highlights "banana"
//! select.dispatch(Action::CharacterKey('c')); // typeahead to "cherry"
//! select.dispatch(Action::Enter); // commits and closes
//! assert_eq!(select.selected_item(), Some(&"cherry".to_string()));
//! ```

pub mod accessibility;
mod action;
mod config;
mod directive;
mod engine;
mod model;
mod reducer;
mod state;
mod transition;
mod typeahead;

pub use accessibility::{
    AccessibleRole, ElementIds, LabelAttributes, ListAttributes, OptionAttributes,
    SelectAttributes, ToggleAttributes, project,
};
pub use action::{Action, ActionTag};
pub use config::{DEFAULT_TYPEAHEAD_TIMEOUT, SelectConfig, StaleSelectionPolicy};
pub use directive::{Directive, emit_directives};
pub use engine::SelectEngine;
pub use model::{CaseSensitivity, ItemModel, MappedListModel, StringListModel};
pub use reducer::{StateChange, StateReducer};
pub use state::{Changes, ControlledState, NO_HIGHLIGHT, SelectState};
pub use transition::transition;

// Re-export the core types a host interacts with directly.
pub use horizon_select_core::{ConnectionGuard, ConnectionId, ControlId, Signal};

/// Commonly used types, for glob import.
pub mod prelude {
    pub use crate::{
        Action, ActionTag, Changes, ControlledState, Directive, ItemModel, SelectConfig,
        SelectEngine, SelectState, StateChange, StateReducer, StringListModel,
    };
}
