//! The select engine.

use std::time::Instant;

use horizon_select_core::{ControlId, PerfSpan, Signal, select_debug, select_trace};

use crate::accessibility::{ElementIds, SelectAttributes, project};
use crate::action::Action;
use crate::config::{SelectConfig, StaleSelectionPolicy};
use crate::directive::{Directive, emit_directives};
use crate::model::ItemModel;
use crate::reducer::{StateReducer, reduce, validate};
use crate::state::{ControlledState, NO_HIGHLIGHT, SelectState};
use crate::typeahead::TypeaheadTracker;

/// The interaction engine for a single-selection dropdown.
///
/// `SelectEngine` owns the control's state and processes one [`Action`] at a
/// time: the default transition table proposes changes, an optional override
/// reducer may rewrite them, externally controlled fields win the merge, and
/// the published result is re-validated against the current item model. Each
/// dispatch returns the [`Directive`]s a host must execute (focus, scroll,
/// announce); rendering and input classification stay entirely outside.
///
/// # Features
///
/// - Keyboard navigation: arrows (with wrap-around), Home/End, Escape,
///   Enter/Space commit
/// - Typeahead: case-insensitive prefix matching with an idle-reset window
/// - Controlled state: any field may be caller-owned per cycle
/// - Override reducer: every default transition can be replaced per action
/// - Accessibility: attribute projection for label, toggle, list, and items
///
/// # Signals
///
/// - `open_changed(bool)`: the menu opened or closed
/// - `highlighted_changed(i32)`: the highlighted index changed
/// - `selected_index_changed(i32)`: the committed selection changed
///   (`-1` when cleared or no longer in the catalog)
/// - `selected_text_changed(String)`: display text of the new selection
///   (empty when cleared)
///
/// Signals fire only when the published value actually changed.
///
/// # Example
///
/// ```
/// use horizon_select::{Action, Directive, SelectEngine, StringListModel};
///
/// let model = StringListModel::from(["Apple", "Banana", "Cherry"]);
/// let mut select = SelectEngine::new(Box::new(model));
///
/// let directives = select.dispatch(Action::ArrowDown);
/// assert!(select.is_open());
/// assert_eq!(select.highlighted_index(), 0);
/// assert!(directives.contains(&Directive::FocusMenu));
///
/// select.dispatch(Action::ArrowDown);
/// select.dispatch(Action::Enter);
/// assert_eq!(select.selected_item(), Some(&"Banana".to_string()));
/// assert!(!select.is_open());
/// ```
pub struct SelectEngine<T: Clone + PartialEq + Send + 'static> {
    /// Process-unique identity; seeds the element identifiers.
    id: ControlId,
    /// Derived element identifiers.
    ids: ElementIds,
    /// The item catalog.
    model: Box<dyn ItemModel<T>>,
    /// Engine configuration.
    config: SelectConfig,
    /// The published state.
    state: SelectState<T>,
    /// Snapshot restored by [`Action::Reset`].
    initial: SelectState<T>,
    /// Externally controlled fields for the current cycle.
    controlled: ControlledState<T>,
    /// Optional override for the default transition table.
    reducer: Option<StateReducer<T>>,
    /// Typeahead idle-reset deadline.
    typeahead: TypeaheadTracker,

    // Signals
    /// Signal emitted when the menu opens or closes.
    pub open_changed: Signal<bool>,
    /// Signal emitted when the highlighted index changes.
    pub highlighted_changed: Signal<i32>,
    /// Signal emitted when the committed selection changes.
    pub selected_index_changed: Signal<i32>,
    /// Signal emitted with the display text of a new selection.
    pub selected_text_changed: Signal<String>,
}

impl<T: Clone + PartialEq + Send + 'static> SelectEngine<T> {
    /// Create an engine over the given item model with default configuration.
    pub fn new(model: Box<dyn ItemModel<T>>) -> Self {
        let id = ControlId::next();
        let config = SelectConfig::default();
        let typeahead = TypeaheadTracker::new(config.typeahead_timeout);

        Self {
            id,
            ids: ElementIds::new(id),
            model,
            config,
            state: SelectState::default(),
            initial: SelectState::default(),
            controlled: ControlledState::default(),
            reducer: None,
            typeahead,
            open_changed: Signal::new(),
            highlighted_changed: Signal::new(),
            selected_index_changed: Signal::new(),
            selected_text_changed: Signal::new(),
        }
    }

    // =========================================================================
    // Builders
    // =========================================================================

    /// Set the configuration using the builder pattern.
    pub fn with_config(mut self, config: SelectConfig) -> Self {
        self.set_config(config);
        self
    }

    /// Set the initial state using the builder pattern.
    ///
    /// The state is validated against the current model and also becomes the
    /// snapshot that [`Action::Reset`] restores.
    pub fn with_initial_state(mut self, mut state: SelectState<T>) -> Self {
        validate(&mut state, self.model.row_count());
        self.initial = state.clone();
        self.state = state;
        self
    }

    /// Set the initially selected item using the builder pattern.
    ///
    /// Values not present in the catalog are ignored.
    pub fn with_initial_selected(self, item: T) -> Self {
        if self.model.find_item(&item).is_none() {
            return self;
        }
        let state = SelectState {
            selected_item: Some(item),
            ..SelectState::default()
        };
        self.with_initial_state(state)
    }

    /// Set the override reducer using the builder pattern.
    pub fn with_reducer(mut self, reducer: StateReducer<T>) -> Self {
        self.reducer = Some(reducer);
        self
    }

    /// Set the controlled fields using the builder pattern.
    pub fn with_controlled(mut self, controlled: ControlledState<T>) -> Self {
        self.controlled = controlled;
        self
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Get the current configuration.
    pub fn config(&self) -> &SelectConfig {
        &self.config
    }

    /// Replace the configuration.
    pub fn set_config(&mut self, config: SelectConfig) {
        self.typeahead.set_window(config.typeahead_timeout);
        self.config = config;
    }

    /// Register the override reducer, replacing any previous one.
    pub fn set_reducer(&mut self, reducer: StateReducer<T>) {
        self.reducer = Some(reducer);
    }

    /// Remove the override reducer.
    pub fn clear_reducer(&mut self) {
        self.reducer = None;
    }

    /// Replace the externally controlled fields for subsequent cycles.
    pub fn set_controlled(&mut self, controlled: ControlledState<T>) {
        self.controlled = controlled;
    }

    /// Get the externally controlled fields.
    pub fn controlled(&self) -> &ControlledState<T> {
        &self.controlled
    }

    // =========================================================================
    // Model
    // =========================================================================

    /// Get the item model.
    pub fn model(&self) -> &dyn ItemModel<T> {
        self.model.as_ref()
    }

    /// Replace the item model.
    ///
    /// The highlight is re-clamped against the new catalog. A committed
    /// selection whose value is no longer present is kept or cleared per
    /// [`SelectConfig::stale_selection`]; change signals fire for whatever
    /// actually changed.
    pub fn set_model(&mut self, model: Box<dyn ItemModel<T>>) {
        self.model = model;
        let prev = self.state.clone();

        let selection_vanished = self
            .state
            .selected_item
            .as_ref()
            .is_some_and(|selected| self.model.find_item(selected).is_none());
        if selection_vanished && self.config.stale_selection == StaleSelectionPolicy::Clear {
            self.state.selected_item = None;
        }
        validate(&mut self.state, self.model.row_count());

        select_debug!(rows = self.model.row_count(), "item model replaced");
        self.notify(&prev);
    }

    /// Get the number of items.
    pub fn item_count(&self) -> usize {
        self.model.row_count()
    }

    /// Get the display text at an index.
    pub fn item_text(&self, index: usize) -> Option<String> {
        self.model.text(index)
    }

    // =========================================================================
    // State accessors
    // =========================================================================

    /// Whether the list is currently presented.
    pub fn is_open(&self) -> bool {
        self.state.is_open
    }

    /// The highlighted index (`-1` if none).
    pub fn highlighted_index(&self) -> i32 {
        self.state.highlighted_index
    }

    /// The committed selection.
    pub fn selected_item(&self) -> Option<&T> {
        self.state.selected_item.as_ref()
    }

    /// The catalog index of the committed selection (`-1` if there is no
    /// selection or its value is no longer in the catalog).
    pub fn selected_index(&self) -> i32 {
        self.state
            .selected_item
            .as_ref()
            .and_then(|item| self.model.find_item(item))
            .map_or(NO_HIGHLIGHT, |index| index as i32)
    }

    /// The accumulated typeahead buffer.
    pub fn keys_so_far(&self) -> &str {
        &self.state.keys_so_far
    }

    /// The complete published state.
    pub fn state(&self) -> &SelectState<T> {
        &self.state
    }

    /// The control's process-unique id.
    pub fn control_id(&self) -> ControlId {
        self.id
    }

    /// The control's element identifiers.
    pub fn element_ids(&self) -> &ElementIds {
        &self.ids
    }

    /// Project the current state into accessibility attribute sets.
    pub fn attributes(&self) -> SelectAttributes {
        project(&self.state, self.model.as_ref(), &self.ids)
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Process one action at the current wall-clock instant.
    ///
    /// Returns the directives the host must execute.
    pub fn dispatch(&mut self, action: Action<T>) -> Vec<Directive> {
        self.dispatch_at(action, Instant::now())
    }

    /// Process one action at an explicit instant.
    ///
    /// If the typeahead idle window elapsed before `now`, its timeout fires
    /// first — ordering is total, and the timer's fire is just another
    /// arriving action. Tests use this to drive simulated time.
    pub fn dispatch_at(&mut self, action: Action<T>, now: Instant) -> Vec<Directive> {
        let mut directives = self.pump_typeahead(now);
        directives.extend(self.process(&action, now));
        directives
    }

    /// Fire the typeahead timeout if its deadline has passed, without
    /// dispatching any other action.
    ///
    /// Hosts call this from their timer wake-up; see [`pending_timeout`].
    ///
    /// [`pending_timeout`]: Self::pending_timeout
    pub fn poll_at(&mut self, now: Instant) -> Vec<Directive> {
        self.pump_typeahead(now)
    }

    /// [`poll_at`](Self::poll_at) with the current wall-clock instant.
    pub fn poll(&mut self) -> Vec<Directive> {
        self.poll_at(Instant::now())
    }

    /// The instant at which the pending typeahead deadline fires, if any.
    ///
    /// A host schedules a wake-up for this instant and then calls
    /// [`poll_at`](Self::poll_at).
    pub fn pending_timeout(&mut self) -> Option<Instant> {
        self.typeahead.deadline()
    }

    fn pump_typeahead(&mut self, now: Instant) -> Vec<Directive> {
        if self.typeahead.expired(now) {
            self.process(&Action::TypeaheadTimeout, now)
        } else {
            Vec::new()
        }
    }

    /// Run the pipeline for one action and publish the result.
    fn process(&mut self, action: &Action<T>, now: Instant) -> Vec<Directive> {
        let _perf = PerfSpan::new("select_dispatch");
        let tag = action.tag();
        select_trace!(?tag, "dispatching action");

        let next = reduce(
            &self.state,
            action,
            self.model.as_ref(),
            &self.config,
            &self.initial,
            self.reducer.as_ref(),
            &self.controlled,
        );

        // Deadline bookkeeping mirrors the keys_so_far policy: character
        // keys restart the idle window, Blur leaves it running, and every
        // other action cancels it along with the buffer it guards.
        match action {
            Action::CharacterKey(c) if !c.is_control() => self.typeahead.arm(now),
            Action::CharacterKey(_) | Action::Blur | Action::TypeaheadTimeout => {}
            _ => self.typeahead.cancel(),
        }

        let directives = emit_directives(&self.state, &next, self.model.as_ref());

        let prev = std::mem::replace(&mut self.state, next);
        self.notify(&prev);

        directives
    }

    /// Emit change signals for every field whose published value differs
    /// from `prev`.
    fn notify(&self, prev: &SelectState<T>) {
        if self.state.is_open != prev.is_open {
            self.open_changed.emit(self.state.is_open);
        }
        if self.state.highlighted_index != prev.highlighted_index {
            self.highlighted_changed.emit(self.state.highlighted_index);
        }
        if self.state.selected_item != prev.selected_item {
            self.selected_index_changed.emit(self.selected_index());
            let text = self
                .state
                .selected_item
                .as_ref()
                .and_then(|item| self.model.item_text(item))
                .unwrap_or_default();
            self.selected_text_changed.emit(text);
        }
    }

    // =========================================================================
    // Programmatic setters
    // =========================================================================

    /// Toggle the menu open/closed.
    pub fn toggle_menu(&mut self) -> Vec<Directive> {
        self.dispatch(Action::ToggleMenu)
    }

    /// Open the menu.
    pub fn open_menu(&mut self) -> Vec<Directive> {
        self.dispatch(Action::OpenMenu)
    }

    /// Close the menu.
    pub fn close_menu(&mut self) -> Vec<Directive> {
        self.dispatch(Action::CloseMenu)
    }

    /// Set the highlighted index (clamped into the catalog).
    pub fn set_highlighted_index(&mut self, index: i32) -> Vec<Directive> {
        self.dispatch(Action::SetHighlightedIndex(index))
    }

    /// Commit an item as the selection (must be a catalog value).
    pub fn select_item(&mut self, item: T) -> Vec<Directive> {
        self.dispatch(Action::SelectItem(item))
    }

    /// Restore the initial state.
    pub fn reset(&mut self) -> Vec<Directive> {
        self.dispatch(Action::Reset)
    }
}

static_assertions::assert_impl_all!(SelectEngine<String>: Send);
