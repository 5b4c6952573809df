//! Accessibility attribute projection.
//!
//! [`project`] is a pure function from engine state to the attribute sets
//! each visual element of a select control must expose: the label, the
//! toggle, the list container, and every list item. Values are computed from
//! state on every call — nothing here is cached or hard-coded — so a host
//! re-projects after each transition and writes the results into whatever
//! accessibility surface it renders to.
//!
//! With the `accesskit` feature enabled (the default), every attribute set
//! also converts to an [`accesskit::Node`] for hosts that push a tree to
//! platform accessibility APIs through [AccessKit](https://accesskit.dev/).

use horizon_select_core::ControlId;

use crate::model::ItemModel;
use crate::state::SelectState;

// ============================================================================
// Roles
// ============================================================================

/// The accessibility role of a select control element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum AccessibleRole {
    /// A generic element with no specific role.
    #[default]
    Unknown,

    /// The static text label of the control.
    Label,

    /// The toggle that opens and closes the list.
    Button,

    /// The list container presenting the options.
    ListBox,

    /// A single option within the list.
    Option,
}

#[cfg(feature = "accesskit")]
impl AccessibleRole {
    /// Convert to AccessKit's Role enum.
    pub fn to_accesskit_role(self) -> accesskit::Role {
        match self {
            Self::Unknown => accesskit::Role::Unknown,
            Self::Label => accesskit::Role::Label,
            Self::Button => accesskit::Role::Button,
            Self::ListBox => accesskit::Role::ListBox,
            Self::Option => accesskit::Role::ListBoxOption,
        }
    }
}

#[cfg(feature = "accesskit")]
impl From<AccessibleRole> for accesskit::Role {
    fn from(role: AccessibleRole) -> Self {
        role.to_accesskit_role()
    }
}

// ============================================================================
// Element identity
// ============================================================================

/// Stable element identifiers for one control instance.
///
/// All identifiers derive from the engine's [`ControlId`], so several
/// controls on one surface never collide and every id is stable for the
/// lifetime of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementIds {
    control: ControlId,
}

/// Numeric part codes for AccessKit node ids (label/toggle/list below,
/// options from [`OPTION_PART_BASE`] up).
#[cfg(feature = "accesskit")]
const LABEL_PART: u64 = 0;
#[cfg(feature = "accesskit")]
const TOGGLE_PART: u64 = 1;
#[cfg(feature = "accesskit")]
const LIST_PART: u64 = 2;
#[cfg(feature = "accesskit")]
const OPTION_PART_BASE: u64 = 3;

impl ElementIds {
    /// Create the identifier set for a control.
    pub fn new(control: ControlId) -> Self {
        Self { control }
    }

    /// The owning control's id.
    pub fn control(&self) -> ControlId {
        self.control
    }

    /// Identifier of the label element.
    pub fn label(&self) -> String {
        format!("{}-label", self.control)
    }

    /// Identifier of the toggle element.
    pub fn toggle(&self) -> String {
        format!("{}-toggle", self.control)
    }

    /// Identifier of the list container element.
    pub fn list(&self) -> String {
        format!("{}-listbox", self.control)
    }

    /// Identifier of the list item element at `index`.
    pub fn option(&self, index: usize) -> String {
        format!("{}-option-{index}", self.control)
    }

    /// AccessKit node id for a part of this control.
    ///
    /// The low 16 bits carry the part code, which caps a single control at
    /// 65 533 options.
    #[cfg(feature = "accesskit")]
    fn node_id(&self, part: u64) -> accesskit::NodeId {
        accesskit::NodeId((self.control.as_raw() << 16) | part)
    }

    /// AccessKit node id of the label element.
    #[cfg(feature = "accesskit")]
    pub fn label_node_id(&self) -> accesskit::NodeId {
        self.node_id(LABEL_PART)
    }

    /// AccessKit node id of the toggle element.
    #[cfg(feature = "accesskit")]
    pub fn toggle_node_id(&self) -> accesskit::NodeId {
        self.node_id(TOGGLE_PART)
    }

    /// AccessKit node id of the list container element.
    #[cfg(feature = "accesskit")]
    pub fn list_node_id(&self) -> accesskit::NodeId {
        self.node_id(LIST_PART)
    }

    /// AccessKit node id of the list item element at `index`.
    #[cfg(feature = "accesskit")]
    pub fn option_node_id(&self, index: usize) -> accesskit::NodeId {
        self.node_id(OPTION_PART_BASE + index as u64)
    }
}

// ============================================================================
// Attribute sets
// ============================================================================

/// Attributes for the control's label element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelAttributes {
    /// Stable identifier of this element.
    pub id: String,
    /// The element's role.
    pub role: AccessibleRole,
    /// Identifier of the toggle this label names.
    pub labels_toggle: String,
    /// Identifier of the list container this label names.
    pub labels_list: String,
}

/// Attributes for the toggle element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleAttributes {
    /// Stable identifier of this element.
    pub id: String,
    /// The element's role.
    pub role: AccessibleRole,
    /// Whether the list is currently presented.
    pub expanded: bool,
    /// Identifier of the list container, present only while open.
    pub controls: Option<String>,
    /// Identifier of the label element.
    pub labelled_by: String,
}

/// Attributes for the list container element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListAttributes {
    /// Stable identifier of this element.
    pub id: String,
    /// The element's role.
    pub role: AccessibleRole,
    /// Whether the container is reachable by keyboard (only while open).
    pub keyboard_reachable: bool,
    /// Identifier of the highlighted item, present only while open with a
    /// valid highlight.
    pub active_descendant: Option<String>,
    /// Identifier of the label element.
    pub labelled_by: String,
}

/// Attributes for one list item element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionAttributes {
    /// Stable identifier of this element.
    pub id: String,
    /// The element's role.
    pub role: AccessibleRole,
    /// Whether this item is the committed selection.
    pub selected: bool,
    /// Whether this item is currently highlighted.
    pub highlighted: bool,
    /// 1-based position within the list.
    pub position_in_set: usize,
    /// Total number of items in the list.
    pub set_size: usize,
    /// Identifier of the list container owning this item.
    pub owned_by: String,
}

/// The complete attribute projection for one control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectAttributes {
    /// The label element.
    pub label: LabelAttributes,
    /// The toggle element.
    pub toggle: ToggleAttributes,
    /// The list container element.
    pub list: ListAttributes,
    /// One entry per catalog item, in catalog order.
    pub options: Vec<OptionAttributes>,
}

/// Project the current state into attribute sets.
pub fn project<T: Clone + PartialEq>(
    state: &SelectState<T>,
    model: &dyn ItemModel<T>,
    ids: &ElementIds,
) -> SelectAttributes {
    let n = model.row_count();
    let selected_index = state
        .selected_item
        .as_ref()
        .and_then(|item| model.find_item(item));

    let active_descendant = (state.is_open && state.highlighted_index >= 0)
        .then(|| ids.option(state.highlighted_index as usize));

    let options = (0..n)
        .map(|index| OptionAttributes {
            id: ids.option(index),
            role: AccessibleRole::Option,
            selected: selected_index == Some(index),
            highlighted: state.highlighted_index == index as i32,
            position_in_set: index + 1,
            set_size: n,
            owned_by: ids.list(),
        })
        .collect();

    SelectAttributes {
        label: LabelAttributes {
            id: ids.label(),
            role: AccessibleRole::Label,
            labels_toggle: ids.toggle(),
            labels_list: ids.list(),
        },
        toggle: ToggleAttributes {
            id: ids.toggle(),
            role: AccessibleRole::Button,
            expanded: state.is_open,
            controls: state.is_open.then(|| ids.list()),
            labelled_by: ids.label(),
        },
        list: ListAttributes {
            id: ids.list(),
            role: AccessibleRole::ListBox,
            keyboard_reachable: state.is_open,
            active_descendant,
            labelled_by: ids.label(),
        },
        options,
    }
}

// ============================================================================
// AccessKit conversion
// ============================================================================

#[cfg(feature = "accesskit")]
impl SelectAttributes {
    /// Build the AccessKit nodes for this projection.
    ///
    /// Returns `(node_id, node)` pairs for the label, toggle, list container,
    /// and every list item. The list node owns the item nodes as children;
    /// parenting the label, toggle, and list into the host's tree is the
    /// host's job.
    pub fn to_accesskit_nodes(&self, ids: &ElementIds) -> Vec<(accesskit::NodeId, accesskit::Node)> {
        let mut nodes = Vec::with_capacity(3 + self.options.len());

        let label_id = ids.label_node_id();
        let list_id = ids.list_node_id();

        let label = accesskit::Node::new(self.label.role.into());
        nodes.push((label_id, label));

        let mut toggle = accesskit::Node::new(self.toggle.role.into());
        toggle.set_expanded(self.toggle.expanded);
        toggle.set_labelled_by(vec![label_id]);
        toggle.add_action(accesskit::Action::Click);
        toggle.add_action(accesskit::Action::Focus);
        nodes.push((ids.toggle_node_id(), toggle));

        let mut list = accesskit::Node::new(self.list.role.into());
        list.set_labelled_by(vec![label_id]);
        if let Some(highlighted) = self
            .options
            .iter()
            .position(|option| option.highlighted)
            .filter(|_| self.list.active_descendant.is_some())
        {
            list.set_active_descendant(ids.option_node_id(highlighted));
        }
        if self.list.keyboard_reachable {
            list.add_action(accesskit::Action::Focus);
        }
        list.set_children(
            (0..self.options.len())
                .map(|index| ids.option_node_id(index))
                .collect::<Vec<_>>(),
        );
        nodes.push((list_id, list));

        for (index, option) in self.options.iter().enumerate() {
            let mut node = accesskit::Node::new(option.role.into());
            node.set_selected(option.selected);
            node.set_position_in_set(option.position_in_set);
            node.set_size_of_set(option.set_size);
            node.add_action(accesskit::Action::Click);
            nodes.push((ids.option_node_id(index), node));
        }

        nodes
    }
}
