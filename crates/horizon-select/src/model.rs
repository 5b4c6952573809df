//! Item catalogs for select controls.
//!
//! The engine never owns item data directly; it consults an [`ItemModel`],
//! an ordered, caller-supplied catalog of opaque item values with a text
//! projection. The text projection is used for typeahead matching and for
//! selection announcements — nothing else reads it.
//!
//! # Example
//!
//! ```
//! use horizon_select::{CaseSensitivity, ItemModel, StringListModel};
//!
//! let model = StringListModel::from(["Apple", "Banana", "Cherry"]);
//! assert_eq!(model.row_count(), 3);
//! assert_eq!(model.text(1), Some("Banana".to_string()));
//! assert_eq!(
//!     model.match_prefix("ch", 0, CaseSensitivity::CaseInsensitive),
//!     Some(2)
//! );
//! ```

use std::fmt;
use std::sync::Arc;

// ============================================================================
// Case Sensitivity
// ============================================================================

/// Controls how typeahead matching handles letter case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseSensitivity {
    /// Case-sensitive matching (e.g., "App" won't match "apple").
    CaseSensitive,
    /// Case-insensitive matching (e.g., "App" will match "apple").
    #[default]
    CaseInsensitive,
}

// ============================================================================
// Item Model Trait
// ============================================================================

/// Trait for providing items to a select control.
///
/// Item identity is positional for the lifetime of a given model snapshot;
/// the engine revalidates indices on every transition, so a model may be
/// replaced at any time via
/// [`SelectEngine::set_model`](crate::SelectEngine::set_model).
///
/// Implement this trait to provide custom data sources.
pub trait ItemModel<T: PartialEq>: Send + Sync {
    /// Get the number of items in the model.
    fn row_count(&self) -> usize;

    /// Get the item at the given index.
    ///
    /// Returns `None` if the index is out of bounds.
    fn item(&self, index: usize) -> Option<T>;

    /// Get the display text at the given index.
    ///
    /// Returns `None` if the index is out of bounds.
    fn text(&self, index: usize) -> Option<String>;

    /// Find the index of an item by value.
    ///
    /// Returns the first matching index, or `None` if the value is not in
    /// the catalog.
    fn find_item(&self, item: &T) -> Option<usize> {
        (0..self.row_count()).find(|&i| self.item(i).as_ref() == Some(item))
    }

    /// Get the display text for an item by value.
    ///
    /// Returns `None` when the value is not in the catalog.
    fn item_text(&self, item: &T) -> Option<String> {
        self.find_item(item).and_then(|i| self.text(i))
    }

    /// Find the first item whose text starts with `prefix`, searching from
    /// `start` and wrapping around the end of the catalog.
    ///
    /// `start` must already be reduced modulo the row count. Returns `None`
    /// on an empty model, an empty prefix, or when nothing matches.
    fn match_prefix(&self, prefix: &str, start: usize, case: CaseSensitivity) -> Option<usize> {
        let n = self.row_count();
        if n == 0 || prefix.is_empty() {
            return None;
        }

        let needle = match case {
            CaseSensitivity::CaseSensitive => prefix.to_string(),
            CaseSensitivity::CaseInsensitive => prefix.to_lowercase(),
        };

        for offset in 0..n {
            let index = (start + offset) % n;
            if let Some(text) = self.text(index) {
                let haystack = match case {
                    CaseSensitivity::CaseSensitive => text,
                    CaseSensitivity::CaseInsensitive => text.to_lowercase(),
                };
                if haystack.starts_with(&needle) {
                    return Some(index);
                }
            }
        }
        None
    }
}

// ============================================================================
// String List Model
// ============================================================================

/// A simple item model backed by a list of strings.
///
/// The item value and its display text are the same string.
#[derive(Debug, Clone, Default)]
pub struct StringListModel {
    items: Vec<String>,
}

impl StringListModel {
    /// Create a new model with the given items.
    pub fn new(items: Vec<String>) -> Self {
        Self { items }
    }

    /// Create an empty model.
    pub fn empty() -> Self {
        Self { items: Vec::new() }
    }

    /// Get a reference to the items.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Set the items.
    pub fn set_items(&mut self, items: Vec<String>) {
        self.items = items;
    }

    /// Add an item.
    pub fn add_item(&mut self, item: impl Into<String>) {
        self.items.push(item.into());
    }

    /// Remove an item by index.
    pub fn remove_item(&mut self, index: usize) {
        if index < self.items.len() {
            self.items.remove(index);
        }
    }

    /// Clear all items.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl ItemModel<String> for StringListModel {
    fn row_count(&self) -> usize {
        self.items.len()
    }

    fn item(&self, index: usize) -> Option<String> {
        self.items.get(index).cloned()
    }

    fn text(&self, index: usize) -> Option<String> {
        self.items.get(index).cloned()
    }
}

impl From<Vec<String>> for StringListModel {
    fn from(items: Vec<String>) -> Self {
        Self::new(items)
    }
}

impl From<Vec<&str>> for StringListModel {
    fn from(items: Vec<&str>) -> Self {
        Self::new(items.into_iter().map(String::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for StringListModel {
    fn from(items: [&str; N]) -> Self {
        Self::new(items.into_iter().map(String::from).collect())
    }
}

// ============================================================================
// Mapped List Model
// ============================================================================

/// An item model over arbitrary values with a caller-supplied text projection.
///
/// Use this when items are richer than plain strings:
///
/// ```
/// use horizon_select::{ItemModel, MappedListModel};
///
/// #[derive(Clone, PartialEq)]
/// struct Fruit {
///     name: &'static str,
///     price: u32,
/// }
///
/// let model = MappedListModel::new(
///     vec![
///         Fruit { name: "Apple", price: 120 },
///         Fruit { name: "Banana", price: 80 },
///     ],
///     |fruit: &Fruit| fruit.name.to_string(),
/// );
/// assert_eq!(model.text(1), Some("Banana".to_string()));
/// ```
#[derive(Clone)]
pub struct MappedListModel<T> {
    items: Vec<T>,
    to_text: Arc<dyn Fn(&T) -> String + Send + Sync>,
}

impl<T: Clone + PartialEq + Send + Sync> MappedListModel<T> {
    /// Create a new model from items and a text projection.
    pub fn new<F>(items: Vec<T>, to_text: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        Self {
            items,
            to_text: Arc::new(to_text),
        }
    }

    /// Create a model whose text projection is the item's `Display` form.
    pub fn with_display(items: Vec<T>) -> Self
    where
        T: fmt::Display,
    {
        Self::new(items, |item: &T| item.to_string())
    }

    /// Get a reference to the items.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Set the items.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
    }
}

impl<T> fmt::Debug for MappedListModel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappedListModel")
            .field("len", &self.items.len())
            .finish_non_exhaustive()
    }
}

impl<T: Clone + PartialEq + Send + Sync> ItemModel<T> for MappedListModel<T> {
    fn row_count(&self) -> usize {
        self.items.len()
    }

    fn item(&self, index: usize) -> Option<T> {
        self.items.get(index).cloned()
    }

    fn text(&self, index: usize) -> Option<String> {
        self.items.get(index).map(|item| (self.to_text)(item))
    }
}

// ============================================================================
// Tests
// ============================================================================
