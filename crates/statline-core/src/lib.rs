//! statline core: metric primitives shared by the push subsystem.
//!
//! This crate defines the metric name scheme, the accumulator handles
//! (counter / gauge / timing), and the error surface shared by the push
//! crate and tooling. It intentionally carries no transport or runtime
//! dependencies so it can be reused in multiple contexts.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `StatlineError`/`Result` so the host
//! process never crashes because of the metrics subsystem.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod handle;
pub mod name;

/// Shared result type.
pub use error::{Result, StatlineError};
pub use handle::{Counter, Gauge, MetricHandle, Timing};
pub use name::{MetricName, NameScheme};
