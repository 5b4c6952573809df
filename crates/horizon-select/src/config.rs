//! Engine configuration.

use std::time::Duration;

use crate::model::CaseSensitivity;

/// Default idle window after which the typeahead buffer resets.
pub const DEFAULT_TYPEAHEAD_TIMEOUT: Duration = Duration::from_millis(500);

/// What to do with a committed selection whose value is no longer present
/// after the item model is replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StaleSelectionPolicy {
    /// Keep the selection; value identity, not index, is authoritative.
    #[default]
    Keep,
    /// Clear the selection when its value vanishes from the catalog.
    Clear,
}

/// Configuration for a select engine.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectConfig {
    /// Whether arrow navigation wraps around at the first/last item.
    pub circular_navigation: bool,
    /// Idle window after which the typeahead buffer resets.
    pub typeahead_timeout: Duration,
    /// How typeahead matching handles letter case.
    pub case_sensitivity: CaseSensitivity,
    /// What happens to a selection orphaned by a model replacement.
    pub stale_selection: StaleSelectionPolicy,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            circular_navigation: true,
            typeahead_timeout: DEFAULT_TYPEAHEAD_TIMEOUT,
            case_sensitivity: CaseSensitivity::CaseInsensitive,
            stale_selection: StaleSelectionPolicy::Keep,
        }
    }
}
