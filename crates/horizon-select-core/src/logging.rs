//! Logging helpers.
//!
//! Thin wrappers over the `tracing` crate with consistent target naming,
//! so hosts can filter the engine's output with directives like
//! `horizon_select=debug,horizon_select::perf=info`.

/// RAII guard that times an operation under the `horizon_select::perf` target.
///
/// The span is entered on construction and closed (with its elapsed time
/// recorded by the subscriber) when the guard is dropped.
///
/// # Example
///
/// ```
/// use horizon_select_core::PerfSpan;
///
/// fn process() {
///     let _span = PerfSpan::new("dispatch");
///     // ... work measured by the span ...
/// }
/// ```
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "horizon_select::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

/// Macros for common tracing patterns.
///
/// These are just wrappers around the `tracing` crate macros with consistent
/// target naming.
#[macro_export]
macro_rules! select_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: "horizon_select", $($arg)*)
    };
}

#[macro_export]
macro_rules! select_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "horizon_select", $($arg)*)
    };
}

#[macro_export]
macro_rules! select_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "horizon_select", $($arg)*)
    };
}
