#![forbid(unsafe_code)]

//! Split view configuration.
//!
//! Keys are camelCase so a JS host can pass the object it already builds for
//! its component props:
//!
//! ```json
//! {
//!   "axis": "horizontal",
//!   "extent": { "kind": "pixels", "initial": 360, "min": 260, "max": 640, "anchor": "second" },
//!   "gap": 12,
//!   "handleThickness": 12,
//!   "handleLabel": "Resize right sidebar"
//! }
//! ```
//!
//! Missing keys take the [`SplitViewConfig::stacked_panels`] defaults.

use std::fmt;

use resplit_layout::{Anchor, Bounds, ExtentConfig, LayoutConfig, MAX_RATIO_MINIMUM, SplitAxis};
use serde::{Deserialize, Serialize};

/// Default gap between the two regions, in pixels. The handle sits inside it.
pub const DEFAULT_GAP: f64 = 12.0;

/// Default handle thickness for stacked panels.
pub const DEFAULT_HANDLE_THICKNESS: f64 = 6.0;

pub const DEFAULT_HANDLE_LABEL: &str = "Resize panels";

/// Configuration of one split view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SplitViewConfig {
    pub axis: SplitAxis,
    pub extent: ExtentConfig,
    pub gap: f64,
    pub handle_thickness: f64,
    /// Accessible name of the handle.
    pub handle_label: String,
    /// Whether the second region starts collapsed.
    pub collapsed: bool,
}

impl Default for SplitViewConfig {
    fn default() -> Self {
        Self::stacked_panels()
    }
}

impl SplitViewConfig {
    /// Two vertically stacked panels sharing the container by ratio
    /// (65% / 35%, each side at least 20%).
    #[must_use]
    pub fn stacked_panels() -> Self {
        Self {
            axis: SplitAxis::Vertical,
            extent: ExtentConfig::default(),
            gap: DEFAULT_GAP,
            handle_thickness: DEFAULT_HANDLE_THICKNESS,
            handle_label: DEFAULT_HANDLE_LABEL.to_owned(),
            collapsed: false,
        }
    }

    /// Main content with a fixed-width sidebar on the right (260..640 px,
    /// starting at 360).
    #[must_use]
    pub fn right_sidebar() -> Self {
        Self {
            axis: SplitAxis::Horizontal,
            extent: ExtentConfig::pixels(360.0, 260.0, 640.0).with_anchor(Anchor::Second),
            gap: DEFAULT_GAP,
            handle_thickness: 12.0,
            handle_label: "Resize right sidebar".to_owned(),
            collapsed: false,
        }
    }

    /// Parse from JSON. Values that parse but are out of range are left for
    /// [`normalize`](Self::normalize).
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(ConfigError::Parse)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string(self).map_err(ConfigError::Serialize)
    }

    /// Layout part of the configuration.
    #[must_use]
    pub fn layout(&self) -> LayoutConfig {
        LayoutConfig {
            axis: self.axis,
            extent: self.extent,
        }
    }

    /// Space on each side of the handle inside the gap.
    #[must_use]
    pub fn handle_margin(&self) -> f64 {
        ((self.gap - self.handle_thickness) / 2.0).max(0.0)
    }

    /// Rewrite out-of-range values to the values the layout will actually
    /// use, returning one entry per change.
    pub fn normalize(&mut self) -> Vec<ConfigAdjustment> {
        let mut adjustments = Vec::new();

        if let Some(gap) = non_negative(self.gap, DEFAULT_GAP) {
            adjustments.push(ConfigAdjustment::Gap {
                from: self.gap,
                to: gap,
            });
            self.gap = gap;
        }
        if let Some(thickness) = non_negative(self.handle_thickness, DEFAULT_HANDLE_THICKNESS) {
            adjustments.push(ConfigAdjustment::HandleThickness {
                from: self.handle_thickness,
                to: thickness,
            });
            self.handle_thickness = thickness;
        }

        let bounds = self.extent.bounds();
        match &mut self.extent {
            ExtentConfig::Ratio {
                initial,
                min_first,
                min_second,
                ..
            } => {
                let first = ratio_minimum(*min_first);
                let second = ratio_minimum(*min_second);
                if first != *min_first || second != *min_second {
                    adjustments.push(ConfigAdjustment::Bounds {
                        from: (*min_first, 1.0 - *min_second),
                        to: (bounds.min(), bounds.max()),
                    });
                    *min_first = first;
                    *min_second = second;
                }
                adjust_initial(initial, bounds, &mut adjustments);
            }
            ExtentConfig::Pixels {
                initial, min, max, ..
            } => {
                if *min != bounds.min() || *max != bounds.max() {
                    adjustments.push(ConfigAdjustment::Bounds {
                        from: (*min, *max),
                        to: (bounds.min(), bounds.max()),
                    });
                    *min = bounds.min();
                    *max = bounds.max();
                }
                adjust_initial(initial, bounds, &mut adjustments);
            }
        }

        adjustments
    }
}

/// `Some(replacement)` if `value` is not a finite non-negative number.
fn non_negative(value: f64, fallback: f64) -> Option<f64> {
    if !value.is_finite() {
        Some(fallback)
    } else if value < 0.0 {
        Some(0.0)
    } else {
        None
    }
}

fn ratio_minimum(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, MAX_RATIO_MINIMUM)
    } else {
        0.0
    }
}

fn adjust_initial(initial: &mut f64, bounds: Bounds, adjustments: &mut Vec<ConfigAdjustment>) {
    let clamped = resplit_layout::clamp(*initial, bounds, bounds.min());
    if clamped != *initial {
        adjustments.push(ConfigAdjustment::Initial {
            from: *initial,
            to: clamped,
        });
        *initial = clamped;
    }
}

/// One value rewritten by [`SplitViewConfig::normalize`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigAdjustment {
    Gap { from: f64, to: f64 },
    HandleThickness { from: f64, to: f64 },
    /// Extent range as `(min, max)` of the stored value.
    Bounds { from: (f64, f64), to: (f64, f64) },
    Initial { from: f64, to: f64 },
}

impl fmt::Display for ConfigAdjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gap { from, to } => write!(f, "gap {from} -> {to}"),
            Self::HandleThickness { from, to } => write!(f, "handle thickness {from} -> {to}"),
            Self::Bounds { from, to } => write!(
                f,
                "extent bounds [{}, {}] -> [{}, {}]",
                from.0, from.1, to.0, to.1
            ),
            Self::Initial { from, to } => write!(f, "initial extent {from} -> {to}"),
        }
    }
}

/// Error loading or saving a [`SplitViewConfig`].
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    Serialize(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid split view config: {err}"),
            Self::Serialize(err) => write!(f, "cannot serialize split view config: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) | Self::Serialize(err) => Some(err),
        }
    }
}
