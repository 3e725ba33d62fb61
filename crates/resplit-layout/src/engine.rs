#![forbid(unsafe_code)]

//! Authoritative extent of one split and the operations that mutate it.
//!
//! The stored value only changes through [`LayoutEngine::set`] and the two
//! helpers built on it ([`LayoutEngine::set_from_pointer`] and
//! [`LayoutEngine::step_from_keyboard`]); every one of them clamps before
//! storing. Rendering reads the value through [`LayoutEngine::allocation`],
//! which re-clamps against the current container without mutating anything.

use resplit_core::geometry::Size;
use serde::{Deserialize, Serialize};

use crate::extent::{
    Anchor, Bounds, DEFAULT_PIXEL_STEP, DEFAULT_RATIO_STEP, Extent, ExtentConfig, ExtentKind,
    SplitAxis, clamp,
};
use crate::session::DragSession;

/// Axis plus extent configuration for one split.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default)]
    pub axis: SplitAxis,
    #[serde(default)]
    pub extent: ExtentConfig,
}

/// Direction of a discrete keyboard adjustment, relative to the stored extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepDirection {
    Increase,
    Decrease,
}

/// How an update request was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtentOutcome {
    /// A clamped value was computed and stored.
    Applied,
    /// The container had no measurable size; the previous extent was kept.
    ContainerUnmeasured,
    /// The computation produced `NaN`/`Infinity`; the previous extent was kept.
    NonFinite,
}

/// Result of an update request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtentUpdate {
    pub extent: Extent,
    pub outcome: ExtentOutcome,
}

impl ExtentUpdate {
    /// Whether the update was discarded.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        !matches!(self.outcome, ExtentOutcome::Applied)
    }
}

/// Pixel sizes handed to the two regions for one container measurement.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Allocation {
    pub first: f64,
    pub second: f64,
}

/// Handle position for assistive technology, in whole percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct HandleValue {
    pub now: u32,
    pub min: u32,
    pub max: u32,
}

/// Owner of one split's extent.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutEngine {
    axis: SplitAxis,
    kind: ExtentKind,
    anchor: Anchor,
    bounds: Bounds,
    step: f64,
    min_opposite: f64,
    value: f64,
}

impl LayoutEngine {
    /// Build an engine whose extent starts at `config`'s initial value,
    /// clamped into its bounds.
    ///
    /// Never fails: an out-of-range or non-finite initial value falls back to
    /// the nearest bound (or `min` when there is no nearest one).
    #[must_use]
    pub fn initialize(config: &LayoutConfig) -> Self {
        let bounds = config.extent.bounds();
        let kind = config.extent.kind();
        let (initial, step, anchor, min_opposite) = match config.extent {
            ExtentConfig::Ratio { initial, step, .. } => {
                (initial, sanitize_step(step, DEFAULT_RATIO_STEP), Anchor::First, 0.0)
            }
            ExtentConfig::Pixels {
                initial,
                step,
                anchor,
                min_opposite,
                ..
            } => (
                initial,
                sanitize_step(step, DEFAULT_PIXEL_STEP),
                anchor,
                if min_opposite.is_finite() {
                    min_opposite.max(0.0)
                } else {
                    0.0
                },
            ),
        };
        let value = clamp(quantize(kind, initial), bounds, bounds.min());
        Self {
            axis: config.axis,
            kind,
            anchor,
            bounds,
            step,
            min_opposite,
            value,
        }
    }

    #[inline]
    #[must_use]
    pub const fn axis(&self) -> SplitAxis {
        self.axis
    }

    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ExtentKind {
        self.kind
    }

    /// Region sized by the stored extent. Always `First` for ratio extents.
    #[inline]
    #[must_use]
    pub const fn anchor(&self) -> Anchor {
        self.anchor
    }

    #[inline]
    #[must_use]
    pub const fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Keyboard step size (a ratio or a pixel count).
    #[inline]
    #[must_use]
    pub const fn step(&self) -> f64 {
        self.step
    }

    /// Raw stored value.
    #[inline]
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Stored value as a typed extent.
    #[must_use]
    pub fn extent(&self) -> Extent {
        match self.kind {
            ExtentKind::Ratio => Extent::Ratio(self.value),
            // Bounds are non-negative and rounded, so this cast is lossless
            // up to u32::MAX.
            ExtentKind::Pixels => Extent::Pixels(self.value.min(f64::from(u32::MAX)) as u32),
        }
    }

    /// Clamp-and-set.
    pub fn set(&mut self, value: f64) -> ExtentUpdate {
        let candidate = quantize(self.kind, value);
        if !candidate.is_finite() {
            resplit_core::trace!(message = "split.extent.non_finite", requested = value);
            return self.noop(ExtentOutcome::NonFinite);
        }
        self.value = clamp(candidate, self.bounds, self.value);
        ExtentUpdate {
            extent: self.extent(),
            outcome: ExtentOutcome::Applied,
        }
    }

    /// Recompute the extent for a pointer at `coordinate` during `session`.
    ///
    /// The result depends only on the session origin, the coordinate and the
    /// container size passed in, so repeating a call yields the same extent.
    /// Ratio extents need the container's current size along the axis; pass
    /// a fresh measurement each time. `None` or an empty size keeps the
    /// previous extent. Pixel extents ignore `container`.
    pub fn set_from_pointer(
        &mut self,
        coordinate: f64,
        session: &DragSession,
        container: Option<Size>,
    ) -> ExtentUpdate {
        let delta = coordinate - session.origin_coordinate();
        let candidate = match self.kind {
            ExtentKind::Ratio => {
                let Some(length) = container
                    .filter(|size| !size.is_empty())
                    .map(|size| self.axis.length(size))
                else {
                    return self.noop(ExtentOutcome::ContainerUnmeasured);
                };
                session.origin_extent() + delta / length
            }
            ExtentKind::Pixels => session.origin_extent() + self.anchor.sign() * delta,
        };
        self.set(candidate)
    }

    /// Apply one keyboard step in `direction`.
    pub fn step_from_keyboard(&mut self, direction: StepDirection) -> Extent {
        let delta = match direction {
            StepDirection::Increase => self.step,
            StepDirection::Decrease => -self.step,
        };
        self.set(self.value + delta).extent
    }

    /// Pixel allocation of both regions inside `container`, `gap` pixels
    /// reserved for the handle.
    ///
    /// Re-clamps against the current container so a shrinking window never
    /// renders a region below its minimum. When the container is too small
    /// for both minimums, the anchored region keeps its minimum and the
    /// other region gets what is left.
    #[must_use]
    pub fn allocation(&self, container: Size, gap: f64) -> Allocation {
        let length = self.axis.length(container);
        let gap = if gap.is_finite() { gap.max(0.0) } else { 0.0 };
        let available = if length.is_finite() {
            (length - gap).max(0.0)
        } else {
            0.0
        };

        match self.kind {
            ExtentKind::Ratio => {
                let ratio = clamp(self.value, self.bounds, self.bounds.min());
                let first = available * ratio;
                Allocation {
                    first,
                    second: available - first,
                }
            }
            ExtentKind::Pixels => {
                let anchored = self
                    .value
                    .min(available - self.min_opposite)
                    .max(self.bounds.min())
                    .min(available);
                let other = available - anchored;
                match self.anchor {
                    Anchor::First => Allocation {
                        first: anchored,
                        second: other,
                    },
                    Anchor::Second => Allocation {
                        first: other,
                        second: anchored,
                    },
                }
            }
        }
    }

    /// Current position for `aria-valuenow`/`valuemin`/`valuemax`.
    ///
    /// Ratio extents report percent of the container; pixel extents report
    /// percent of the `[min, max]` range.
    #[must_use]
    pub fn handle_value(&self) -> HandleValue {
        match self.kind {
            ExtentKind::Ratio => HandleValue {
                now: percent(self.value),
                min: percent(self.bounds.min()),
                max: percent(self.bounds.max()),
            },
            ExtentKind::Pixels => {
                let span = self.bounds.span();
                let now = if span > 0.0 && span.is_finite() {
                    percent((self.value - self.bounds.min()) / span)
                } else {
                    0
                };
                HandleValue { now, min: 0, max: 100 }
            }
        }
    }

    fn noop(&self, outcome: ExtentOutcome) -> ExtentUpdate {
        ExtentUpdate {
            extent: self.extent(),
            outcome,
        }
    }
}

fn quantize(kind: ExtentKind, value: f64) -> f64 {
    match kind {
        ExtentKind::Ratio => value,
        ExtentKind::Pixels => value.round(),
    }
}

fn sanitize_step(step: f64, fallback: f64) -> f64 {
    if step.is_finite() && step > 0.0 {
        step
    } else {
        fallback
    }
}

fn percent(fraction: f64) -> u32 {
    (fraction * 100.0).round().clamp(0.0, 100.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use resplit_core::geometry::Point;

    fn ratio_engine(initial: f64) -> LayoutEngine {
        LayoutEngine::initialize(&LayoutConfig {
            axis: SplitAxis::Horizontal,
            extent: ExtentConfig::ratio(initial, 0.2, 0.2),
        })
    }

    fn pixel_engine(anchor: Anchor) -> LayoutEngine {
        LayoutEngine::initialize(&LayoutConfig {
            axis: SplitAxis::Horizontal,
            extent: ExtentConfig::pixels(360.0, 120.0, 640.0).with_anchor(anchor),
        })
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn initialize_clamps_out_of_range_initial() {
        assert!(approx(ratio_engine(0.95).value(), 0.8));
        assert!(approx(ratio_engine(-2.0).value(), 0.2));
        assert!(approx(ratio_engine(f64::NAN).value(), 0.2));
        assert!(approx(ratio_engine(0.65).value(), 0.65));
    }

    #[test]
    fn initialize_rounds_pixels_and_sanitizes_step() {
        let engine = LayoutEngine::initialize(&LayoutConfig {
            axis: SplitAxis::Vertical,
            extent: ExtentConfig::pixels(300.6, 100.0, 400.0).with_step(f64::NAN),
        });
        assert_eq!(engine.extent(), Extent::Pixels(301));
        assert_eq!(engine.step(), DEFAULT_PIXEL_STEP);
    }

    #[test]
    fn ratio_drag_scenario() {
        let mut engine = ratio_engine(0.65);
        let container = Some(Size::new(800.0, 600.0));
        let session = DragSession::begin(&engine, 1, Point::new(100.0, 10.0));

        let update = engine.set_from_pointer(180.0, &session, container);
        assert_eq!(update.outcome, ExtentOutcome::Applied);
        assert!(approx(update.extent.value(), 0.75));

        let update = engine.set_from_pointer(500.0, &session, container);
        assert!(approx(update.extent.value(), 0.8));
    }

    #[test]
    fn set_from_pointer_is_idempotent() {
        let mut engine = ratio_engine(0.5);
        let container = Some(Size::new(640.0, 480.0));
        let session = DragSession::begin(&engine, 1, Point::new(320.0, 0.0));
        let a = engine.set_from_pointer(350.0, &session, container);
        let b = engine.set_from_pointer(350.0, &session, container);
        assert_eq!(a, b);
    }

    #[test]
    fn unmeasured_container_keeps_previous_extent() {
        let mut engine = ratio_engine(0.5);
        let session = DragSession::begin(&engine, 1, Point::new(0.0, 0.0));
        let update = engine.set_from_pointer(200.0, &session, None);
        assert_eq!(update.outcome, ExtentOutcome::ContainerUnmeasured);
        assert!(approx(update.extent.value(), 0.5));

        let update = engine.set_from_pointer(200.0, &session, Some(Size::new(0.0, 0.0)));
        assert_eq!(update.outcome, ExtentOutcome::ContainerUnmeasured);
        assert!(update.is_noop());
    }

    #[test]
    fn non_finite_pointer_keeps_previous_extent() {
        let mut engine = ratio_engine(0.5);
        let session = DragSession::begin(&engine, 1, Point::new(0.0, 0.0));
        let update = engine.set_from_pointer(f64::NAN, &session, Some(Size::new(100.0, 100.0)));
        assert_eq!(update.outcome, ExtentOutcome::NonFinite);
        assert!(approx(engine.value(), 0.5));
    }

    #[test]
    fn container_resize_mid_drag_is_absorbed() {
        let mut engine = ratio_engine(0.5);
        let session = DragSession::begin(&engine, 1, Point::new(100.0, 0.0));
        engine.set_from_pointer(160.0, &session, Some(Size::new(600.0, 400.0)));
        assert!(approx(engine.value(), 0.6));
        // Window grew; same pointer position now means a smaller ratio delta.
        engine.set_from_pointer(160.0, &session, Some(Size::new(1200.0, 400.0)));
        assert!(approx(engine.value(), 0.55));
    }

    #[test]
    fn pixel_drag_follows_anchor() {
        let mut first = pixel_engine(Anchor::First);
        let session = DragSession::begin(&first, 1, Point::new(500.0, 0.0));
        first.set_from_pointer(540.0, &session, None);
        assert_eq!(first.extent(), Extent::Pixels(400));

        let mut second = pixel_engine(Anchor::Second);
        let session = DragSession::begin(&second, 1, Point::new(500.0, 0.0));
        second.set_from_pointer(540.0, &session, None);
        assert_eq!(second.extent(), Extent::Pixels(320));
        second.set_from_pointer(-1000.0, &session, None);
        assert_eq!(second.extent(), Extent::Pixels(640));
    }

    #[test]
    fn keyboard_steps_clamp_at_bounds() {
        let mut engine = pixel_engine(Anchor::First);
        assert_eq!(engine.step_from_keyboard(StepDirection::Decrease), Extent::Pixels(336));
        assert_eq!(engine.step_from_keyboard(StepDirection::Decrease), Extent::Pixels(312));
        assert_eq!(engine.step_from_keyboard(StepDirection::Decrease), Extent::Pixels(288));

        engine.set(640.0);
        assert_eq!(engine.step_from_keyboard(StepDirection::Increase), Extent::Pixels(640));
    }

    #[test]
    fn ratio_keyboard_step() {
        let mut engine = ratio_engine(0.5);
        let extent = engine.step_from_keyboard(StepDirection::Increase);
        assert!(approx(extent.value(), 0.52));
    }

    #[test]
    fn allocation_ratio_splits_available_space() {
        let engine = ratio_engine(0.75);
        let alloc = engine.allocation(Size::new(812.0, 300.0), 12.0);
        assert!(approx(alloc.first, 600.0));
        assert!(approx(alloc.second, 200.0));
    }

    #[test]
    fn allocation_pixels_respects_min_opposite_on_small_containers() {
        let engine = LayoutEngine::initialize(&LayoutConfig {
            axis: SplitAxis::Horizontal,
            extent: ExtentConfig::pixels(600.0, 260.0, 640.0)
                .with_anchor(Anchor::Second)
                .with_min_opposite(300.0),
        });
        let alloc = engine.allocation(Size::new(812.0, 500.0), 12.0);
        assert_eq!(alloc.second, 500.0);
        assert_eq!(alloc.first, 300.0);
        // Stored extent is untouched by rendering.
        assert_eq!(engine.extent(), Extent::Pixels(600));

        // Too small for both minimums: anchored region keeps its minimum.
        let alloc = engine.allocation(Size::new(400.0, 500.0), 0.0);
        assert_eq!(alloc.second, 260.0);
        assert_eq!(alloc.first, 140.0);

        let alloc = engine.allocation(Size::new(100.0, 500.0), 0.0);
        assert_eq!(alloc.second, 100.0);
        assert_eq!(alloc.first, 0.0);
    }

    #[test]
    fn handle_value_percentages() {
        let engine = ratio_engine(0.65);
        assert_eq!(
            engine.handle_value(),
            HandleValue {
                now: 65,
                min: 20,
                max: 80
            }
        );

        let mut engine = LayoutEngine::initialize(&LayoutConfig {
            axis: SplitAxis::Horizontal,
            extent: ExtentConfig::pixels(360.0, 260.0, 640.0),
        });
        // (360 - 260) / 380 = 26.3%
        assert_eq!(engine.handle_value().now, 26);
        engine.set(640.0);
        assert_eq!(engine.handle_value().now, 100);

        let engine = LayoutEngine::initialize(&LayoutConfig {
            axis: SplitAxis::Horizontal,
            extent: ExtentConfig::pixels(300.0, 300.0, 300.0),
        });
        assert_eq!(engine.handle_value(), HandleValue { now: 0, min: 0, max: 100 });
    }
}
