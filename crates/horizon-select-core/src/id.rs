//! Control identity.
//!
//! Every select engine instance owns a process-unique [`ControlId`]. The id
//! seeds the element identifiers that assistive technology uses to
//! cross-reference the label, toggle, list container, and list items of one
//! control, so two engines on the same surface never collide.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic source for control ids. Starts at 1 so 0 can never be observed.
static NEXT_CONTROL_ID: AtomicU64 = AtomicU64::new(1);

/// A process-unique identifier for a select control instance.
///
/// Ids are never reused within a process. The `Display` form
/// (`hsel-<n>`) is the prefix from which per-element identifiers are
/// derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(u64);

impl ControlId {
    /// Allocate the next control id.
    pub fn next() -> Self {
        Self(NEXT_CONTROL_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Convert the id to a raw u64 value.
    ///
    /// This is useful for interop with external systems that need a numeric
    /// ID. The raw value can be converted back using [`ControlId::from_raw`].
    #[inline]
    pub fn as_raw(self) -> u64 {
        self.0
    }

    /// Create a `ControlId` from a raw u64 value.
    ///
    /// Note: this does not check that the value was produced by
    /// [`ControlId::next`] in this process.
    #[inline]
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsel-{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_ids_are_unique() {
        let a = ControlId::next();
        let b = ControlId::next();
        assert_ne!(a, b);
        assert!(b.as_raw() > a.as_raw());
    }

    #[test]
    fn test_raw_round_trip() {
        let id = ControlId::next();
        assert_eq!(ControlId::from_raw(id.as_raw()), id);
    }

    #[test]
    fn test_display_prefix() {
        let id = ControlId::from_raw(7);
        assert_eq!(id.to_string(), "hsel-7");
    }
}
