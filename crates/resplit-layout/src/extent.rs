#![forbid(unsafe_code)]

//! Extents, bounds, and the clamp primitive.

use resplit_core::geometry::{Point, Size};
use serde::{Deserialize, Serialize};

/// Default keyboard step for ratio extents (2% of the container).
pub const DEFAULT_RATIO_STEP: f64 = 0.02;

/// Default keyboard step for pixel extents.
pub const DEFAULT_PIXEL_STEP: f64 = 24.0;

/// Largest minimum either side of a ratio split may claim.
pub const MAX_RATIO_MINIMUM: f64 = 0.9;

/// Orientation of a split.
///
/// `Horizontal` places the regions side by side (the handle moves along x);
/// `Vertical` stacks them (the handle moves along y).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitAxis {
    #[default]
    Horizontal,
    Vertical,
}

impl SplitAxis {
    /// Coordinate of `point` along this axis.
    #[inline]
    #[must_use]
    pub const fn coordinate(self, point: Point) -> f64 {
        match self {
            Self::Horizontal => point.x,
            Self::Vertical => point.y,
        }
    }

    /// Length of `size` along this axis.
    #[inline]
    #[must_use]
    pub const fn length(self, size: Size) -> f64 {
        match self {
            Self::Horizontal => size.width,
            Self::Vertical => size.height,
        }
    }

    /// CSS cursor shown while dragging a handle on this axis.
    #[must_use]
    pub const fn resize_cursor(self) -> &'static str {
        match self {
            Self::Horizontal => "col-resize",
            Self::Vertical => "row-resize",
        }
    }

    /// Orientation of the separator itself, as `aria-orientation` spells it.
    ///
    /// A horizontal split has a vertical separator and vice versa.
    #[must_use]
    pub const fn separator_orientation(self) -> &'static str {
        match self {
            Self::Horizontal => "vertical",
            Self::Vertical => "horizontal",
        }
    }
}

/// Which representation an extent uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtentKind {
    /// Fraction of the container assigned to the first region.
    Ratio,
    /// Absolute pixel size of the anchored region.
    Pixels,
}

/// Region whose size a pixel extent stores.
///
/// Ratio extents always describe the first region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    #[default]
    First,
    /// The trailing region, e.g. a right-hand sidebar. Moving the handle
    /// toward the trailing edge shrinks it.
    Second,
}

impl Anchor {
    /// Sign applied to handle movement (positive = toward the trailing edge).
    #[inline]
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::First => 1.0,
            Self::Second => -1.0,
        }
    }
}

/// A stored size allocation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Extent {
    Ratio(f64),
    Pixels(u32),
}

impl Extent {
    /// Numeric value (a fraction or a pixel count).
    #[must_use]
    pub fn value(self) -> f64 {
        match self {
            Self::Ratio(ratio) => ratio,
            Self::Pixels(px) => f64::from(px),
        }
    }

    /// Representation of this extent.
    #[must_use]
    pub const fn kind(self) -> ExtentKind {
        match self {
            Self::Ratio(_) => ExtentKind::Ratio,
            Self::Pixels(_) => ExtentKind::Pixels,
        }
    }
}

/// Inclusive `[min, max]` range for an extent.
///
/// Always satisfies `min <= max`; constructors repair inverted or non-finite
/// input instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawBounds")]
pub struct Bounds {
    min: f64,
    max: f64,
}

#[derive(Deserialize)]
struct RawBounds {
    min: f64,
    max: f64,
}

impl From<RawBounds> for Bounds {
    fn from(raw: RawBounds) -> Self {
        Self::new(raw.min, raw.max)
    }
}

impl Bounds {
    /// Build bounds, repairing bad input.
    ///
    /// A non-finite `min` becomes `0`, a `NaN` `max` becomes unbounded, and
    /// `max < min` collapses the range onto `min`.
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        let min = if min.is_finite() { min } else { 0.0 };
        let max = if max.is_nan() { f64::INFINITY } else { max };
        Self {
            min,
            max: max.max(min),
        }
    }

    /// Ratio bounds from the minimum share each region must keep.
    ///
    /// Each minimum is clamped into `[0, 0.9]`; the first region may then
    /// range over `[min_first, 1 - min_second]`.
    #[must_use]
    pub fn ratio(min_first: f64, min_second: f64) -> Self {
        let min_first = sanitize_ratio_minimum(min_first);
        let min_second = sanitize_ratio_minimum(min_second);
        Self::new(min_first, 1.0 - min_second)
    }

    /// Pixel bounds. Negative values are raised to `0` and both ends rounded.
    #[must_use]
    pub fn pixels(min: f64, max: f64) -> Self {
        let min = if min.is_finite() { min.max(0.0).round() } else { 0.0 };
        let max = if max.is_finite() { max.max(0.0).round() } else { max };
        Self::new(min, max)
    }

    #[inline]
    #[must_use]
    pub const fn min(self) -> f64 {
        self.min
    }

    #[inline]
    #[must_use]
    pub const fn max(self) -> f64 {
        self.max
    }

    /// Width of the range.
    #[inline]
    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    /// Whether `value` lies inside the range.
    #[inline]
    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

fn sanitize_ratio_minimum(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, MAX_RATIO_MINIMUM)
    } else {
        0.0
    }
}

/// Clamp `value` into `bounds`.
///
/// Non-finite input is rejected: `previous` (the last valid extent) is
/// returned unchanged so a corrupt measurement never reaches the layout.
#[inline]
#[must_use]
pub fn clamp(value: f64, bounds: Bounds, previous: f64) -> f64 {
    if !value.is_finite() {
        return previous;
    }
    value.max(bounds.min).min(bounds.max)
}

fn default_ratio_initial() -> f64 {
    0.65
}

fn default_ratio_minimum() -> f64 {
    0.2
}

fn default_ratio_step() -> f64 {
    DEFAULT_RATIO_STEP
}

fn default_pixel_initial() -> f64 {
    360.0
}

fn default_pixel_min() -> f64 {
    260.0
}

fn default_pixel_max() -> f64 {
    640.0
}

fn default_pixel_step() -> f64 {
    DEFAULT_PIXEL_STEP
}

/// Initial value, bounds and keyboard step of a split's extent.
///
/// Serialized with a `kind` tag, e.g.
/// `{"kind":"ratio","initial":0.65,"minFirst":0.2,"minSecond":0.2}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ExtentConfig {
    Ratio {
        #[serde(default = "default_ratio_initial")]
        initial: f64,
        /// Minimum share of the first region.
        #[serde(default = "default_ratio_minimum")]
        min_first: f64,
        /// Minimum share of the second region.
        #[serde(default = "default_ratio_minimum")]
        min_second: f64,
        #[serde(default = "default_ratio_step")]
        step: f64,
    },
    Pixels {
        #[serde(default = "default_pixel_initial")]
        initial: f64,
        #[serde(default = "default_pixel_min")]
        min: f64,
        #[serde(default = "default_pixel_max")]
        max: f64,
        #[serde(default = "default_pixel_step")]
        step: f64,
        /// Space the non-anchored region keeps when the container is small.
        #[serde(default)]
        min_opposite: f64,
        #[serde(default)]
        anchor: Anchor,
    },
}

impl ExtentConfig {
    /// Ratio extent with the default keyboard step.
    #[must_use]
    pub const fn ratio(initial: f64, min_first: f64, min_second: f64) -> Self {
        Self::Ratio {
            initial,
            min_first,
            min_second,
            step: DEFAULT_RATIO_STEP,
        }
    }

    /// Pixel extent anchored to the first region, default keyboard step.
    #[must_use]
    pub const fn pixels(initial: f64, min: f64, max: f64) -> Self {
        Self::Pixels {
            initial,
            min,
            max,
            step: DEFAULT_PIXEL_STEP,
            min_opposite: 0.0,
            anchor: Anchor::First,
        }
    }

    /// Replace the keyboard step.
    #[must_use]
    pub fn with_step(mut self, new_step: f64) -> Self {
        match &mut self {
            Self::Ratio { step, .. } | Self::Pixels { step, .. } => *step = new_step,
        }
        self
    }

    /// Anchor a pixel extent. No effect on ratio extents.
    #[must_use]
    pub fn with_anchor(mut self, new_anchor: Anchor) -> Self {
        if let Self::Pixels { anchor, .. } = &mut self {
            *anchor = new_anchor;
        }
        self
    }

    /// Minimum size of the non-anchored region. No effect on ratio extents.
    #[must_use]
    pub fn with_min_opposite(mut self, value: f64) -> Self {
        if let Self::Pixels { min_opposite, .. } = &mut self {
            *min_opposite = value;
        }
        self
    }

    #[must_use]
    pub const fn kind(&self) -> ExtentKind {
        match self {
            Self::Ratio { .. } => ExtentKind::Ratio,
            Self::Pixels { .. } => ExtentKind::Pixels,
        }
    }

    /// Bounds implied by this configuration.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        match *self {
            Self::Ratio {
                min_first,
                min_second,
                ..
            } => Bounds::ratio(min_first, min_second),
            Self::Pixels { min, max, .. } => Bounds::pixels(min, max),
        }
    }
}

impl Default for ExtentConfig {
    fn default() -> Self {
        Self::ratio(
            default_ratio_initial(),
            default_ratio_minimum(),
            default_ratio_minimum(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialized_bounds_are_repaired() {
        let b: Bounds = serde_json::from_str(r#"{"min":0.8,"max":0.2}"#).expect("parse");
        assert_eq!(b, Bounds::new(0.8, 0.8));
        assert_eq!(clamp(0.1, b, 0.5), 0.8);
    }

    #[test]
    fn clamp_keeps_values_inside() {
        let b = Bounds::new(0.2, 0.8);
        assert_eq!(clamp(0.5, b, 0.5), 0.5);
        assert_eq!(clamp(1.15, b, 0.5), 0.8);
        assert_eq!(clamp(-3.0, b, 0.5), 0.2);
    }

    #[test]
    fn clamp_rejects_non_finite() {
        let b = Bounds::new(0.2, 0.8);
        assert_eq!(clamp(f64::NAN, b, 0.42), 0.42);
        assert_eq!(clamp(f64::INFINITY, b, 0.42), 0.42);
        assert_eq!(clamp(f64::NEG_INFINITY, b, 0.42), 0.42);
    }

    #[test]
    fn inverted_bounds_collapse_onto_min() {
        let b = Bounds::new(500.0, 100.0);
        assert_eq!(b.min(), 500.0);
        assert_eq!(b.max(), 500.0);
        assert_eq!(b.span(), 0.0);
    }

    #[test]
    fn non_finite_bounds_are_repaired() {
        let b = Bounds::new(f64::NAN, f64::NAN);
        assert_eq!(b.min(), 0.0);
        assert_eq!(b.max(), f64::INFINITY);
    }

    #[test]
    fn ratio_bounds_cap_each_minimum() {
        let b = Bounds::ratio(0.2, 0.2);
        assert_eq!(b.min(), 0.2);
        assert!((b.max() - 0.8).abs() < 1e-12);

        // 0.95 is capped at 0.9; 0.9 + 0.9 > 1 collapses onto min_first.
        let b = Bounds::ratio(0.95, 0.9);
        assert_eq!(b.min(), 0.9);
        assert_eq!(b.max(), 0.9);

        let b = Bounds::ratio(-1.0, f64::NAN);
        assert_eq!(b.min(), 0.0);
        assert_eq!(b.max(), 1.0);
    }

    #[test]
    fn pixel_bounds_round_and_floor_at_zero() {
        let b = Bounds::pixels(-10.0, 640.4);
        assert_eq!(b.min(), 0.0);
        assert_eq!(b.max(), 640.0);
    }

    #[test]
    fn axis_projection() {
        let p = Point::new(3.0, 7.0);
        assert_eq!(SplitAxis::Horizontal.coordinate(p), 3.0);
        assert_eq!(SplitAxis::Vertical.coordinate(p), 7.0);
        let s = Size::new(800.0, 600.0);
        assert_eq!(SplitAxis::Horizontal.length(s), 800.0);
        assert_eq!(SplitAxis::Vertical.length(s), 600.0);
        assert_eq!(SplitAxis::Horizontal.resize_cursor(), "col-resize");
        assert_eq!(SplitAxis::Vertical.separator_orientation(), "horizontal");
    }

    #[test]
    fn extent_config_from_json_uses_defaults() {
        let cfg: ExtentConfig = serde_json::from_str(r#"{"kind":"ratio"}"#).expect("parse");
        assert_eq!(cfg, ExtentConfig::default());

        let cfg: ExtentConfig =
            serde_json::from_str(r#"{"kind":"pixels","minOpposite":200,"anchor":"second"}"#)
                .expect("parse");
        assert_eq!(
            cfg,
            ExtentConfig::pixels(360.0, 260.0, 640.0)
                .with_anchor(Anchor::Second)
                .with_min_opposite(200.0)
        );
    }

    #[test]
    fn builder_methods_only_touch_their_kind() {
        let ratio = ExtentConfig::ratio(0.5, 0.1, 0.1).with_anchor(Anchor::Second);
        assert_eq!(ratio, ExtentConfig::ratio(0.5, 0.1, 0.1));
        let stepped = ratio.with_step(0.05);
        assert!(matches!(stepped, ExtentConfig::Ratio { step, .. } if step == 0.05));
    }

    #[test]
    fn extent_value_and_kind() {
        assert_eq!(Extent::Pixels(360).value(), 360.0);
        assert_eq!(Extent::Ratio(0.5).kind(), ExtentKind::Ratio);
    }
}
