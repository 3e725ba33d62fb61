#![forbid(unsafe_code)]

//! Transient record of one pointer resize gesture.

use resplit_core::geometry::Point;

use crate::engine::LayoutEngine;

/// Origin of an in-progress drag.
///
/// Created on pointer-down and dropped on pointer-up or cancel; each gesture
/// gets a fresh value. Whether a session is active is expressed by the owner
/// holding one at all, not by a flag inside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pointer_id: u32,
    origin_coordinate: f64,
    origin_extent: f64,
}

impl DragSession {
    /// Capture the origin of a gesture starting at `position`.
    #[must_use]
    pub fn begin(engine: &LayoutEngine, pointer_id: u32, position: Point) -> Self {
        Self {
            pointer_id,
            origin_coordinate: engine.axis().coordinate(position),
            origin_extent: engine.value(),
        }
    }

    /// Build a session from raw parts.
    #[must_use]
    pub const fn from_parts(pointer_id: u32, origin_coordinate: f64, origin_extent: f64) -> Self {
        Self {
            pointer_id,
            origin_coordinate,
            origin_extent,
        }
    }

    /// Pointer that owns this gesture.
    #[must_use]
    pub const fn pointer_id(&self) -> u32 {
        self.pointer_id
    }

    /// Axis coordinate of the pointer at gesture start.
    #[must_use]
    pub const fn origin_coordinate(&self) -> f64 {
        self.origin_coordinate
    }

    /// Extent value at gesture start.
    #[must_use]
    pub const fn origin_extent(&self) -> f64 {
        self.origin_extent
    }
}
