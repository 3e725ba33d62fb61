#![forbid(unsafe_code)]

//! Composed split view: two regions, a handle, and the wiring between the
//! layout engine and the drag controller.
//!
//! The view owns its region contents for its whole lifetime. Rendering hands
//! out borrowed [`SplitFrame`]s describing how much space each region gets;
//! a resize only ever changes the frame, never the contents, so region state
//! survives every resize.

use resplit_core::event::{KeyEvent, KeyEventKind, PointerEvent};
use resplit_core::geometry::{Rect, Size};
use resplit_layout::{
    Anchor, Extent, ExtentKind, HandleValue, LayoutEngine, SplitAxis, StepDirection, key_step,
};
use serde::Serialize;

use crate::config::SplitViewConfig;
use crate::drag::{CancelReason, DragController, DragDispatch};
use crate::page::PageHost;

/// Why a key press was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyIgnoredReason {
    Released,
    /// The handle is not rendered while collapsed.
    Collapsed,
    /// A pointer drag owns the extent.
    Dragging,
    UnhandledKey,
}

/// What a key press did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyEffect {
    Stepped {
        direction: StepDirection,
        extent: Extent,
    },
    Ignored(KeyIgnoredReason),
}

/// Result of one key dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyDispatch {
    pub effect: KeyEffect,
    /// Set for handled arrows so the page does not scroll.
    pub prevent_default: bool,
}

impl KeyDispatch {
    const fn ignored(reason: KeyIgnoredReason) -> Self {
        Self {
            effect: KeyEffect::Ignored(reason),
            prevent_default: false,
        }
    }

    #[must_use]
    pub const fn is_ignored(&self) -> bool {
        matches!(self.effect, KeyEffect::Ignored(_))
    }
}

/// Which side of the handle a region is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionSlot {
    First,
    Second,
}

/// How a region is sized along the split axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RegionSizing {
    /// Share of the free space, proportional to `weight`.
    Weighted { weight: f64 },
    /// Exactly `pixels` along the axis.
    Fixed { pixels: f64 },
    /// Whatever is left.
    Fill,
    /// Content's own size (a collapsed region).
    Natural,
}

impl RegionSizing {
    /// CSS `flex` shorthand.
    #[must_use]
    pub fn css_flex(&self) -> String {
        match self {
            Self::Weighted { weight } => format!("{weight} 1 0"),
            Self::Fixed { pixels } => format!("0 0 {pixels}px"),
            Self::Fill => "1 1 auto".to_owned(),
            Self::Natural => "0 0 auto".to_owned(),
        }
    }
}

/// One region in a rendered frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionFrame<'a, T> {
    pub slot: RegionSlot,
    pub content: &'a T,
    pub sizing: RegionSizing,
    /// Pixels along the axis, when the container was measured and the region
    /// is not collapsed.
    pub pixels: Option<f64>,
}

/// The handle in a rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandleFrame<'a> {
    pub role: &'static str,
    pub orientation: &'static str,
    pub label: &'a str,
    pub value: HandleValue,
    pub tab_index: i32,
    pub thickness: f64,
    /// Space between the handle and each region.
    pub margin: f64,
    pub dragging: bool,
    pub cursor: &'static str,
}

impl HandleFrame<'_> {
    /// Attributes for the handle element, in a stable order.
    #[must_use]
    pub fn aria_attributes(&self) -> Vec<(&'static str, String)> {
        vec![
            ("role", self.role.to_owned()),
            ("aria-orientation", self.orientation.to_owned()),
            ("aria-label", self.label.to_owned()),
            ("aria-valuenow", self.value.now.to_string()),
            ("aria-valuemin", self.value.min.to_string()),
            ("aria-valuemax", self.value.max.to_string()),
            ("tabindex", self.tab_index.to_string()),
        ]
    }

    /// Inline style declarations for the handle element.
    #[must_use]
    pub fn css_declarations(&self, axis: SplitAxis) -> Vec<(&'static str, String)> {
        let (size_property, margin) = match axis {
            SplitAxis::Horizontal => ("width", format!("0 {}px", self.margin)),
            SplitAxis::Vertical => ("height", format!("{}px 0", self.margin)),
        };
        vec![
            ("flex", "0 0 auto".to_owned()),
            (size_property, format!("{}px", self.thickness)),
            ("margin", margin),
            ("cursor", self.cursor.to_owned()),
        ]
    }
}

/// Render description of a split view for one container measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitFrame<'a, F, S> {
    pub axis: SplitAxis,
    pub first: RegionFrame<'a, F>,
    pub second: RegionFrame<'a, S>,
    /// `None` while the second region is collapsed.
    pub handle: Option<HandleFrame<'a>>,
}

impl<'a, F, S> SplitFrame<'a, F, S> {
    /// Handle bounds inside `container`, for hit testing.
    ///
    /// `None` when the handle is hidden or the frame was rendered without a
    /// container measurement.
    #[must_use]
    pub fn handle_rect(&self, container: Rect) -> Option<Rect> {
        let handle = self.handle.as_ref()?;
        let offset = self.first.pixels? + handle.margin;
        Some(match self.axis {
            SplitAxis::Horizontal => Rect::new(
                container.left() + offset,
                container.top(),
                handle.thickness,
                container.height,
            ),
            SplitAxis::Vertical => Rect::new(
                container.left(),
                container.top() + offset,
                container.width,
                handle.thickness,
            ),
        })
    }

    /// Content-free copy for hosts that render from JSON.
    #[must_use]
    pub fn snapshot(&self) -> FrameSnapshot<'a> {
        FrameSnapshot {
            axis: self.axis,
            collapsed: self.handle.is_none(),
            first: RegionSnapshot::of(&self.first),
            second: RegionSnapshot::of(&self.second),
            handle: self.handle,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionSnapshot {
    pub slot: RegionSlot,
    pub sizing: RegionSizing,
    pub flex: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pixels: Option<f64>,
}

impl RegionSnapshot {
    fn of<T>(region: &RegionFrame<'_, T>) -> Self {
        Self {
            slot: region.slot,
            sizing: region.sizing,
            flex: region.sizing.css_flex(),
            pixels: region.pixels,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameSnapshot<'a> {
    pub axis: SplitAxis,
    pub collapsed: bool,
    pub first: RegionSnapshot,
    pub second: RegionSnapshot,
    pub handle: Option<HandleFrame<'a>>,
}

/// Two regions separated by a draggable, keyboard-operable handle.
#[derive(Debug)]
pub struct SplitView<F, S, H: PageHost> {
    first: F,
    second: S,
    engine: LayoutEngine,
    drag: DragController<H>,
    gap: f64,
    handle_thickness: f64,
    handle_margin: f64,
    handle_label: String,
    collapsed: bool,
}

impl<F, S, H: PageHost> SplitView<F, S, H> {
    /// Build a view. Out-of-range configuration is normalized, never
    /// rejected.
    pub fn new(first: F, second: S, mut config: SplitViewConfig, host: H) -> Self {
        let adjustments = config.normalize();
        if !adjustments.is_empty() {
            resplit_core::debug!(
                message = "split.config.adjusted",
                adjustments = ?adjustments
            );
        }
        let engine = LayoutEngine::initialize(&config.layout());
        Self {
            first,
            second,
            engine,
            drag: DragController::new(host),
            gap: config.gap,
            handle_thickness: config.handle_thickness,
            handle_margin: config.handle_margin(),
            handle_label: config.handle_label,
            collapsed: config.collapsed,
        }
    }

    #[must_use]
    pub const fn first(&self) -> &F {
        &self.first
    }

    pub fn first_mut(&mut self) -> &mut F {
        &mut self.first
    }

    #[must_use]
    pub const fn second(&self) -> &S {
        &self.second
    }

    pub fn second_mut(&mut self) -> &mut S {
        &mut self.second
    }

    #[must_use]
    pub const fn engine(&self) -> &LayoutEngine {
        &self.engine
    }

    /// Stored extent. Unaffected by collapse.
    #[must_use]
    pub fn extent(&self) -> Extent {
        self.engine.extent()
    }

    #[must_use]
    pub const fn axis(&self) -> SplitAxis {
        self.engine.axis()
    }

    #[must_use]
    pub const fn gap(&self) -> f64 {
        self.gap
    }

    #[must_use]
    pub fn handle_label(&self) -> &str {
        &self.handle_label
    }

    #[must_use]
    pub const fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    #[must_use]
    pub const fn host(&self) -> &H {
        self.drag.host()
    }

    pub fn host_mut(&mut self) -> &mut H {
        self.drag.host_mut()
    }

    /// Collapse or expand the second region.
    ///
    /// Collapsing cancels an active drag; the dispatch for that cancel is
    /// returned. The stored extent is kept either way.
    pub fn set_collapsed(&mut self, collapsed: bool) -> Option<DragDispatch> {
        if self.collapsed == collapsed {
            return None;
        }
        self.collapsed = collapsed;
        resplit_core::debug!(message = "split.collapse", collapsed);
        if collapsed && self.drag.is_dragging() {
            Some(self.drag.cancel(CancelReason::Programmatic))
        } else {
            None
        }
    }

    pub fn pointer_down(&mut self, event: &PointerEvent) -> DragDispatch {
        self.drag.pointer_down(&self.engine, event, self.collapsed)
    }

    /// `container` is the container size measured for this event.
    pub fn pointer_move(&mut self, event: &PointerEvent, container: Option<Size>) -> DragDispatch {
        self.drag.pointer_move(&mut self.engine, event, container)
    }

    pub fn pointer_up(&mut self, event: &PointerEvent) -> DragDispatch {
        self.drag.pointer_up(event)
    }

    pub fn cancel(&mut self, reason: CancelReason) -> DragDispatch {
        self.drag.cancel(reason)
    }

    /// Release any active drag, restoring the page.
    pub fn teardown(&mut self) -> bool {
        self.drag.teardown()
    }

    /// Handle a key press on the focused handle.
    pub fn key_down(&mut self, event: &KeyEvent) -> KeyDispatch {
        if event.kind == KeyEventKind::Release {
            return KeyDispatch::ignored(KeyIgnoredReason::Released);
        }
        if self.collapsed {
            return KeyDispatch::ignored(KeyIgnoredReason::Collapsed);
        }
        if self.drag.is_dragging() {
            return KeyDispatch::ignored(KeyIgnoredReason::Dragging);
        }
        let Some(direction) = key_step(self.engine.axis(), self.engine.anchor(), event.code) else {
            return KeyDispatch::ignored(KeyIgnoredReason::UnhandledKey);
        };

        let extent = self.engine.step_from_keyboard(direction);
        resplit_core::debug!(
            message = "split.key.step",
            key = ?event.code,
            direction = ?direction,
            extent = extent.value()
        );
        KeyDispatch {
            effect: KeyEffect::Stepped { direction, extent },
            prevent_default: true,
        }
    }

    /// Describe the current layout for `container`.
    ///
    /// Pass the container size measured now; `None` renders from the stored
    /// extent alone. Pixel sizes are re-clamped against the container so a
    /// shrunken window never squeezes a region below its minimum.
    #[must_use]
    pub fn frame(&self, container: Option<Size>) -> SplitFrame<'_, F, S> {
        let axis = self.engine.axis();
        if self.collapsed {
            return SplitFrame {
                axis,
                first: RegionFrame {
                    slot: RegionSlot::First,
                    content: &self.first,
                    sizing: RegionSizing::Fill,
                    pixels: None,
                },
                second: RegionFrame {
                    slot: RegionSlot::Second,
                    content: &self.second,
                    sizing: RegionSizing::Natural,
                    pixels: None,
                },
                handle: None,
            };
        }

        let allocation = container
            .filter(|size| !size.is_empty())
            .map(|size| self.engine.allocation(size, self.gap));

        let (first_sizing, second_sizing) = match self.engine.kind() {
            ExtentKind::Ratio => {
                let ratio = self.engine.value();
                (
                    RegionSizing::Weighted { weight: ratio },
                    RegionSizing::Weighted {
                        weight: 1.0 - ratio,
                    },
                )
            }
            ExtentKind::Pixels => {
                let anchored = match (allocation, self.engine.anchor()) {
                    (Some(alloc), Anchor::First) => alloc.first,
                    (Some(alloc), Anchor::Second) => alloc.second,
                    (None, _) => self.engine.value(),
                };
                let fixed = RegionSizing::Fixed { pixels: anchored };
                match self.engine.anchor() {
                    Anchor::First => (fixed, RegionSizing::Fill),
                    Anchor::Second => (RegionSizing::Fill, fixed),
                }
            }
        };

        SplitFrame {
            axis,
            first: RegionFrame {
                slot: RegionSlot::First,
                content: &self.first,
                sizing: first_sizing,
                pixels: allocation.map(|alloc| alloc.first),
            },
            second: RegionFrame {
                slot: RegionSlot::Second,
                content: &self.second,
                sizing: second_sizing,
                pixels: allocation.map(|alloc| alloc.second),
            },
            handle: Some(HandleFrame {
                role: "separator",
                orientation: axis.separator_orientation(),
                label: &self.handle_label,
                value: self.engine.handle_value(),
                tab_index: 0,
                thickness: self.handle_thickness,
                margin: self.handle_margin,
                dragging: self.drag.is_dragging(),
                cursor: axis.resize_cursor(),
            }),
        }
    }
}
