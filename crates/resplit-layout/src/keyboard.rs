#![forbid(unsafe_code)]

//! Arrow-key mapping for a focused handle.
//!
//! An arrow key moves the *handle* in the arrow's direction, the same way a
//! drag would:
//!
//! | axis         | toward trailing edge | toward leading edge | ignored        |
//! |--------------|----------------------|---------------------|----------------|
//! | `Horizontal` | `Right`              | `Left`              | `Up`, `Down`   |
//! | `Vertical`   | `Down`               | `Up`                | `Left`, `Right`|
//!
//! Moving toward the trailing edge grows the first region, so it increases a
//! first-anchored extent and decreases a second-anchored one.

use resplit_core::event::KeyCode;

use crate::engine::StepDirection;
use crate::extent::{Anchor, SplitAxis};

/// Step direction for `code`, or `None` if the key does not apply.
#[must_use]
pub const fn key_step(axis: SplitAxis, anchor: Anchor, code: KeyCode) -> Option<StepDirection> {
    let toward_trailing = match (axis, code) {
        (SplitAxis::Horizontal, KeyCode::Right) | (SplitAxis::Vertical, KeyCode::Down) => true,
        (SplitAxis::Horizontal, KeyCode::Left) | (SplitAxis::Vertical, KeyCode::Up) => false,
        _ => return None,
    };
    Some(match (anchor, toward_trailing) {
        (Anchor::First, true) | (Anchor::Second, false) => StepDirection::Increase,
        (Anchor::First, false) | (Anchor::Second, true) => StepDirection::Decrease,
    })
}
