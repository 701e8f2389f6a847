use serde::{Deserialize, Serialize};

use crate::core::{SurfaceSize, ViewportTuning};
use crate::interaction::{DragBodyMode, HitTolerance};

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load chart setup
/// without inventing their own ad-hoc format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartEngineConfig {
    pub surface: SurfaceSize,
    #[serde(default = "default_viewport_tuning")]
    pub viewport_tuning: ViewportTuning,
    #[serde(default = "default_hit_tolerance")]
    pub hit_tolerance: HitTolerance,
    /// Scale multiplier per zoom step (button, key or wheel notch).
    #[serde(default = "default_zoom_step_factor")]
    pub zoom_step_factor: f64,
    #[serde(default = "default_keyboard_pan_bars")]
    pub keyboard_pan_bars: usize,
    /// Fraction of the visible price span added above and below.
    #[serde(default = "default_price_padding_ratio")]
    pub price_padding_ratio: f64,
    #[serde(default)]
    pub drag_body_mode: DragBodyMode,
}

impl ChartEngineConfig {
    #[must_use]
    pub fn new(surface: SurfaceSize) -> Self {
        Self {
            surface,
            viewport_tuning: default_viewport_tuning(),
            hit_tolerance: default_hit_tolerance(),
            zoom_step_factor: default_zoom_step_factor(),
            keyboard_pan_bars: default_keyboard_pan_bars(),
            price_padding_ratio: default_price_padding_ratio(),
            drag_body_mode: DragBodyMode::default(),
        }
    }

    #[must_use]
    pub fn with_viewport_tuning(mut self, tuning: ViewportTuning) -> Self {
        self.viewport_tuning = tuning;
        self
    }

    /// Sets the bar cap applied by view resets.
    #[must_use]
    pub fn with_max_display_bars(mut self, max_display_bars: usize) -> Self {
        self.viewport_tuning.max_display_bars = max_display_bars;
        self
    }

    #[must_use]
    pub fn with_hit_tolerance(mut self, tolerance: HitTolerance) -> Self {
        self.hit_tolerance = tolerance;
        self
    }

    #[must_use]
    pub fn with_zoom_step_factor(mut self, factor: f64) -> Self {
        self.zoom_step_factor = factor;
        self
    }

    #[must_use]
    pub fn with_keyboard_pan_bars(mut self, bars: usize) -> Self {
        self.keyboard_pan_bars = bars;
        self
    }

    #[must_use]
    pub fn with_price_padding_ratio(mut self, ratio: f64) -> Self {
        self.price_padding_ratio = ratio;
        self
    }

    #[must_use]
    pub fn with_drag_body_mode(mut self, mode: DragBodyMode) -> Self {
        self.drag_body_mode = mode;
        self
    }
}

fn default_viewport_tuning() -> ViewportTuning {
    ViewportTuning::default()
}

fn default_hit_tolerance() -> HitTolerance {
    HitTolerance::default()
}

fn default_zoom_step_factor() -> f64 {
    1.25
}

fn default_keyboard_pan_bars() -> usize {
    10
}

fn default_price_padding_ratio() -> f64 {
    0.05
}
