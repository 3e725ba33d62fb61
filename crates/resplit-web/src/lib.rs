#![forbid(unsafe_code)]

//! Drag controller and composed split view for web hosts.
//!
//! # Role in resplit
//! `resplit-web` turns pointer and keyboard events on a handle into
//! [`resplit_layout::LayoutEngine`] updates and describes the resulting
//! layout as render frames. It is host-driven: the page calls in with
//! events and a freshly measured container size, and applies what comes
//! back.
//!
//! # Primary responsibilities
//! - **Drag**: [`DragController`], the Idle/Dragging state machine.
//! - **Page**: [`PageHost`] and [`DragScope`], the cursor, text-selection
//!   and listener changes a drag makes to the whole page.
//! - **View**: [`SplitView`], two regions plus a handle, with keyboard
//!   stepping, collapse and accessibility values.
//! - **Config**: [`SplitViewConfig`] loaded from JSON.
//!
//! On `wasm32` the `dom` module exports `WebSplitView` to JavaScript.

pub mod config;
pub mod drag;
pub mod page;
pub mod view;

#[cfg(target_arch = "wasm32")]
pub mod dom;

pub use config::{ConfigAdjustment, ConfigError, SplitViewConfig};
pub use drag::{
    CancelReason, DragController, DragDispatch, DragEffect, DragIgnoredReason, DragPhase,
};
pub use page::{DragScope, HostCommand, MemoryPage, PageHold, PageHost};
pub use view::{
    FrameSnapshot, HandleFrame, KeyDispatch, KeyEffect, KeyIgnoredReason, RegionFrame,
    RegionSizing, RegionSlot, RegionSnapshot, SplitFrame, SplitView,
};

#[cfg(target_arch = "wasm32")]
pub use dom::{DomPage, WebSplitView};
