#![forbid(unsafe_code)]

//! Core: geometry, canonical input events, and logging for resplit.
//!
//! # Role in resplit
//! `resplit-core` is the input layer. It owns the pixel geometry types the
//! layout engine measures with and the normalized pointer/keyboard events the
//! drag controller consumes.
//!
//! # Primary responsibilities
//! - **Geometry**: CSS-pixel [`geometry::Point`], [`geometry::Size`] and
//!   [`geometry::Rect`].
//! - **Event**: canonical pointer and key events, plus DOM key normalization.
//! - **Logging**: `tracing` macros when the `tracing` feature is enabled,
//!   silent stand-ins otherwise.

pub mod event;
pub mod geometry;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, error, info, trace, warn};
