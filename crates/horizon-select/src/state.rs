//! Select state, partial updates, and controlled fields.

/// Index value meaning "no item is highlighted".
pub const NO_HIGHLIGHT: i32 = -1;

/// The complete mutable state of one select control.
///
/// State is created once per engine instance, mutated only by the reducer
/// pipeline one action at a time, and dropped with the engine. After every
/// transition `highlighted_index` is either [`NO_HIGHLIGHT`] or a valid index
/// into the current item model, and `selected_item` (when present) is a value
/// the catalog supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectState<T> {
    /// Whether the list is currently presented.
    pub is_open: bool,
    /// Currently navigated item; [`NO_HIGHLIGHT`] means none.
    pub highlighted_index: i32,
    /// The committed selection.
    pub selected_item: Option<T>,
    /// Accumulated typed characters for typeahead.
    pub keys_so_far: String,
}

impl<T> Default for SelectState<T> {
    fn default() -> Self {
        Self {
            is_open: false,
            highlighted_index: NO_HIGHLIGHT,
            selected_item: None,
            keys_so_far: String::new(),
        }
    }
}

impl<T> SelectState<T> {
    /// Whether any item is currently highlighted.
    pub fn has_highlight(&self) -> bool {
        self.highlighted_index != NO_HIGHLIGHT
    }
}

/// A partial state update proposed as the outcome of handling one action.
///
/// Every field mirrors [`SelectState`] as an `Option`; `None` means "leave
/// unchanged". `selected_item` is doubly wrapped so that clearing the
/// selection (`Some(None)`) is distinct from not touching it (`None`).
///
/// `Changes` is plain data: the default transition table produces one, an
/// override reducer may replace it wholesale, and only then is it applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Changes<T> {
    /// New open state, if changing.
    pub is_open: Option<bool>,
    /// New highlighted index, if changing.
    pub highlighted_index: Option<i32>,
    /// New selection, if changing (`Some(None)` clears it).
    pub selected_item: Option<Option<T>>,
    /// New typeahead buffer, if changing.
    pub keys_so_far: Option<String>,
}

impl<T> Default for Changes<T> {
    fn default() -> Self {
        Self {
            is_open: None,
            highlighted_index: None,
            selected_item: None,
            keys_so_far: None,
        }
    }
}

impl<T: Clone> Changes<T> {
    /// Whether this update proposes no change at all.
    pub fn is_empty(&self) -> bool {
        self.is_open.is_none()
            && self.highlighted_index.is_none()
            && self.selected_item.is_none()
            && self.keys_so_far.is_none()
    }

    /// Apply the update to a state, producing the provisional next state.
    pub fn apply(&self, state: &SelectState<T>) -> SelectState<T> {
        SelectState {
            is_open: self.is_open.unwrap_or(state.is_open),
            highlighted_index: self.highlighted_index.unwrap_or(state.highlighted_index),
            selected_item: match &self.selected_item {
                Some(selection) => selection.clone(),
                None => state.selected_item.clone(),
            },
            keys_so_far: self
                .keys_so_far
                .clone()
                .unwrap_or_else(|| state.keys_so_far.clone()),
        }
    }
}

/// Per-field external ownership for one cycle.
///
/// A `Some` field means the caller owns that field's published value: after
/// the transition table and any override have run, the controlled value
/// overwrites the internally computed one. The overwrite is not visible to
/// the override reducer. If the caller stops controlling a field, it simply
/// continues from the last published value.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlledState<T> {
    /// Caller-owned open state.
    pub is_open: Option<bool>,
    /// Caller-owned highlighted index.
    pub highlighted_index: Option<i32>,
    /// Caller-owned selection (`Some(None)` pins "no selection").
    pub selected_item: Option<Option<T>>,
    /// Caller-owned typeahead buffer.
    pub keys_so_far: Option<String>,
}

impl<T> Default for ControlledState<T> {
    fn default() -> Self {
        Self {
            is_open: None,
            highlighted_index: None,
            selected_item: None,
            keys_so_far: None,
        }
    }
}

impl<T> ControlledState<T> {
    /// Whether no field is externally controlled.
    pub fn is_empty(&self) -> bool {
        self.is_open.is_none()
            && self.highlighted_index.is_none()
            && self.selected_item.is_none()
            && self.keys_so_far.is_none()
    }
}
