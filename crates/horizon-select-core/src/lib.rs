//! Core systems for Horizon Select.
//!
//! This crate provides the foundational components of the Horizon Select
//! headless control library:
//!
//! - **Signal/Slot System**: Type-safe, synchronous change notification
//! - **Control Identity**: Process-unique ids for control instances
//! - **Deterministic Timers**: Cancellable one-shot deadlines driven by an
//!   explicit clock, so hosts supply real time and tests supply simulated time
//! - **Logging Helpers**: Consistent `tracing` targets and a perf-span guard
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_select_core::Signal;
//!
//! // Create a signal that notifies when a value changes
//! let value_changed = Signal::<i32>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // Emit the signal
//! value_changed.emit(42);
//!
//! // Disconnect when done
//! value_changed.disconnect(conn_id);
//! ```
//!
//! # Timer Example
//!
//! ```
//! use horizon_select_core::DeadlineTimers;
//! use std::time::{Duration, Instant};
//!
//! let mut timers = DeadlineTimers::new();
//! let now = Instant::now();
//!
//! let id = timers.start_one_shot(now, Duration::from_millis(500));
//!
//! // Nothing due yet...
//! assert!(timers.process_expired(now).is_empty());
//!
//! // ...but half a second later the deadline fires.
//! let fired = timers.process_expired(now + Duration::from_millis(500));
//! assert_eq!(fired, vec![id]);
//! ```

mod error;
mod id;
pub mod logging;
pub mod signal;
mod timer;

pub use error::{Result, SelectCoreError, TimerError};
pub use id::ControlId;
pub use logging::PerfSpan;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use timer::{DeadlineTimers, TimerId};
