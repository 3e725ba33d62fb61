#![forbid(unsafe_code)]

//! Layout engine for a two-region split.
//!
//! A split divides a container along one [`SplitAxis`] into a *first* and a
//! *second* region separated by a handle. The size allocation is stored as an
//! extent, either a ratio of the container or an absolute pixel size, and is
//! clamped into its [`Bounds`] on every update.
//!
//! ```
//! use resplit_layout::{ExtentConfig, LayoutConfig, LayoutEngine, SplitAxis, StepDirection};
//!
//! let mut engine = LayoutEngine::initialize(&LayoutConfig {
//!     axis: SplitAxis::Horizontal,
//!     extent: ExtentConfig::pixels(360.0, 120.0, 640.0),
//! });
//! engine.step_from_keyboard(StepDirection::Decrease);
//! assert_eq!(engine.value(), 336.0);
//! ```

pub mod engine;
pub mod extent;
pub mod keyboard;
pub mod session;

pub use engine::{
    Allocation, ExtentOutcome, ExtentUpdate, HandleValue, LayoutConfig, LayoutEngine,
    StepDirection,
};
pub use extent::{
    Anchor, Bounds, DEFAULT_PIXEL_STEP, DEFAULT_RATIO_STEP, Extent, ExtentConfig, ExtentKind,
    MAX_RATIO_MINIMUM, SplitAxis, clamp,
};
pub use keyboard::key_step;
pub use session::DragSession;

pub use resplit_core::geometry::{Point, Rect, Size};
