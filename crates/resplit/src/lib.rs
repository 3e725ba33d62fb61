#![forbid(unsafe_code)]

//! Resizable split-pane layout.
//!
//! This crate re-exports the public surface of the resplit crates and offers
//! a prelude for day-to-day use.
//!
//! ```
//! use resplit::prelude::*;
//!
//! let config = SplitViewConfig::right_sidebar();
//! let mut view = SplitView::new("main", "sidebar", config, MemoryPage::new());
//! view.key_down(&KeyEvent::new(KeyCode::Left));
//! assert_eq!(view.extent(), Extent::Pixels(384));
//! ```

// --- Core re-exports -------------------------------------------------------

pub use resplit_core::event::{
    KeyCode, KeyEvent, KeyEventKind, Modifiers, PointerButton, PointerEvent,
};
pub use resplit_core::geometry::{Point, Rect, Size};

// --- Layout re-exports -----------------------------------------------------

pub use resplit_layout::{
    Allocation, Anchor, Bounds, DragSession, Extent, ExtentConfig, ExtentKind, ExtentOutcome,
    ExtentUpdate, HandleValue, LayoutConfig, LayoutEngine, SplitAxis, StepDirection, clamp,
    key_step,
};

// --- Web re-exports --------------------------------------------------------

pub use resplit_web::{
    CancelReason, ConfigAdjustment, ConfigError, DragController, DragDispatch, DragEffect,
    DragIgnoredReason, DragPhase, DragScope, FrameSnapshot, HandleFrame, HostCommand, KeyDispatch,
    KeyEffect, KeyIgnoredReason, MemoryPage, PageHold, PageHost, RegionFrame, RegionSizing,
    RegionSlot, SplitFrame, SplitView, SplitViewConfig,
};

#[cfg(target_arch = "wasm32")]
pub use resplit_web::{DomPage, WebSplitView};

pub mod prelude {
    pub use crate::{
        Anchor, CancelReason, Extent, ExtentConfig, KeyCode, KeyEvent, LayoutEngine, MemoryPage,
        PageHost, PointerEvent, Size, SplitAxis, SplitView, SplitViewConfig,
    };

    pub use crate::{core, layout, web};
}

pub use resplit_core as core;
pub use resplit_layout as layout;
pub use resplit_web as web;
