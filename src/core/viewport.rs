use serde::{Deserialize, Serialize};

use crate::core::{Bar, BarSignature};
use crate::error::{ChartError, ChartResult};

const SCALE_EPSILON: f64 = 1e-12;

/// Bar geometry and window limits shared by the viewport and the transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportTuning {
    /// Bar body width at `scale == 1.0`.
    pub base_bar_width_px: f64,
    /// Gap between bar slots. Not affected by zoom.
    pub bar_spacing_px: f64,
    pub min_bar_width_px: f64,
    pub max_bar_width_px: f64,
    /// Space kept free on the right edge (price axis).
    pub reserved_margin_px: f64,
    /// Upper bound on bars shown after a reset.
    pub max_display_bars: usize,
}

impl Default for ViewportTuning {
    fn default() -> Self {
        Self {
            base_bar_width_px: 8.0,
            bar_spacing_px: 2.0,
            min_bar_width_px: 1.0,
            max_bar_width_px: 40.0,
            reserved_margin_px: 60.0,
            max_display_bars: 1_000,
        }
    }
}

impl ViewportTuning {
    pub fn validate(self) -> ChartResult<Self> {
        for (value, name) in [
            (self.base_bar_width_px, "base_bar_width_px"),
            (self.min_bar_width_px, "min_bar_width_px"),
            (self.max_bar_width_px, "max_bar_width_px"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "viewport tuning `{name}` must be finite and > 0"
                )));
            }
        }
        for (value, name) in [
            (self.bar_spacing_px, "bar_spacing_px"),
            (self.reserved_margin_px, "reserved_margin_px"),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "viewport tuning `{name}` must be finite and >= 0"
                )));
            }
        }
        if self.min_bar_width_px > self.base_bar_width_px
            || self.base_bar_width_px > self.max_bar_width_px
        {
            return Err(ChartError::InvalidData(
                "viewport tuning requires min_bar_width <= base_bar_width <= max_bar_width"
                    .to_owned(),
            ));
        }
        if self.max_display_bars == 0 {
            return Err(ChartError::InvalidData(
                "viewport tuning `max_display_bars` must be >= 1".to_owned(),
            ));
        }
        Ok(self)
    }

    #[must_use]
    pub fn min_scale(self) -> f64 {
        self.min_bar_width_px / self.base_bar_width_px
    }

    #[must_use]
    pub fn max_scale(self) -> f64 {
        self.max_bar_width_px / self.base_bar_width_px
    }

    #[must_use]
    pub fn clamp_scale(self, scale: f64) -> f64 {
        if !scale.is_finite() {
            return 1.0_f64.clamp(self.min_scale(), self.max_scale());
        }
        scale.clamp(self.min_scale(), self.max_scale())
    }

    #[must_use]
    pub fn unit_px(self, scale: f64) -> f64 {
        self.base_bar_width_px * scale + self.bar_spacing_px
    }

    #[must_use]
    pub fn drawable_width(self, surface_width: f64) -> f64 {
        (surface_width - self.reserved_margin_px).max(0.0)
    }

    /// Whole bar slots that fit in the drawable width; never less than one.
    #[must_use]
    pub fn bars_that_fit(self, surface_width: f64, scale: f64) -> usize {
        let fit = (self.drawable_width(surface_width) / self.unit_px(scale)).floor();
        if fit.is_finite() && fit >= 1.0 {
            fit as usize
        } else {
            1
        }
    }

    /// Empty slots allowed past the newest bar: half a surface width.
    #[must_use]
    pub fn max_empty_bars(self, surface_width: f64, scale: f64) -> usize {
        let empty = (surface_width.max(0.0) / 2.0 / self.unit_px(scale)).floor();
        if empty.is_finite() && empty > 0.0 {
            empty as usize
        } else {
            0
        }
    }
}

/// Scale and window remembered for reconciliation across data replacement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportSnapshot {
    pub scale: f64,
    pub start_index: usize,
    pub end_index: usize,
}

/// What `update_data` did with the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataUpdateOutcome {
    /// Signature matched the current sequence; nothing changed.
    Unchanged,
    /// The new sequence is empty; the window collapsed to `0..0`.
    Emptied,
    /// The window was reset to the trailing bars.
    Reset,
    /// The recorded window was restored and reconciled.
    Preserved { followed_latest: bool },
}

/// Visible window (`start_index..end_index`) and zoom over a bar sequence.
///
/// `end_index` may run past `bar_count` to leave empty room on the right.
/// With bars present `start_index < end_index` always holds; with no bars the
/// window is `0..0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    start_index: usize,
    end_index: usize,
    scale: f64,
    bar_count: usize,
    surface_width: f64,
    tuning: ViewportTuning,
    signature: Option<BarSignature>,
    recorded: Option<ViewportSnapshot>,
}

impl Viewport {
    #[must_use]
    pub fn new(tuning: ViewportTuning, surface_width: f64) -> Self {
        Self {
            start_index: 0,
            end_index: 0,
            scale: tuning.clamp_scale(1.0),
            bar_count: 0,
            surface_width,
            tuning,
            signature: None,
            recorded: None,
        }
    }

    #[must_use]
    pub fn start_index(&self) -> usize {
        self.start_index
    }

    #[must_use]
    pub fn end_index(&self) -> usize {
        self.end_index
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn bar_count(&self) -> usize {
        self.bar_count
    }

    #[must_use]
    pub fn surface_width(&self) -> f64 {
        self.surface_width
    }

    #[must_use]
    pub fn tuning(&self) -> ViewportTuning {
        self.tuning
    }

    #[must_use]
    pub fn signature(&self) -> Option<BarSignature> {
        self.signature
    }

    #[must_use]
    pub fn recorded(&self) -> Option<ViewportSnapshot> {
        self.recorded
    }

    #[must_use]
    pub fn snapshot(&self) -> ViewportSnapshot {
        ViewportSnapshot {
            scale: self.scale,
            start_index: self.start_index,
            end_index: self.end_index,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bar_count == 0
    }

    #[must_use]
    pub fn visible_len(&self) -> usize {
        self.end_index - self.start_index
    }

    #[must_use]
    pub fn bar_width_px(&self) -> f64 {
        self.tuning.base_bar_width_px * self.scale
    }

    #[must_use]
    pub fn unit_px(&self) -> f64 {
        self.tuning.unit_px(self.scale)
    }

    /// Indices of real bars drawn on the surface.
    ///
    /// A reset window may hold more bars than fit; only the trailing slots
    /// that fit the drawable width are on screen.
    #[must_use]
    pub fn data_range(&self) -> (usize, usize) {
        let end = self.end_index.min(self.bar_count);
        let on_screen = self.end_index.saturating_sub(self.bars_that_fit());
        (self.start_index.max(on_screen).min(end), end)
    }

    #[must_use]
    pub fn bars_that_fit(&self) -> usize {
        self.tuning.bars_that_fit(self.surface_width, self.scale)
    }

    #[must_use]
    pub fn is_following_latest(&self) -> bool {
        self.bar_count > 0 && self.end_index >= self.bar_count
    }

    /// Multiplies the zoom scale by `factor`.
    ///
    /// Without a pivot the right edge stays put. With a pivot, the bar at
    /// `pivot_index` keeps its pixel position; the clamped scale is snapped so
    /// the integer window lands the pivot exactly where it was.
    /// Returns `false` when the clamped scale does not change.
    pub fn zoom(&mut self, factor: f64, pivot_index: Option<f64>) -> bool {
        if self.is_empty() || !factor.is_finite() || factor <= 0.0 {
            return false;
        }
        let old_scale = self.scale;
        let mut new_scale = self.tuning.clamp_scale(old_scale * factor);
        if (new_scale - old_scale).abs() <= SCALE_EPSILON {
            return false;
        }

        let pivot = pivot_index
            .filter(|pivot| pivot.is_finite() && *pivot < self.end_index as f64);
        let end = match pivot {
            Some(pivot) => {
                let distance = self.end_index as f64 - pivot;
                let ratio = self.tuning.unit_px(old_scale) / self.tuning.unit_px(new_scale);
                let target_end = (pivot + distance * ratio).round().max(1.0);
                let new_distance = target_end - pivot;
                if new_distance > 0.0 {
                    let snapped_unit = distance * self.tuning.unit_px(old_scale) / new_distance;
                    let snapped_scale =
                        (snapped_unit - self.tuning.bar_spacing_px) / self.tuning.base_bar_width_px;
                    if snapped_scale >= self.tuning.min_scale()
                        && snapped_scale <= self.tuning.max_scale()
                    {
                        new_scale = snapped_scale;
                    }
                }
                target_end as i64
            }
            None => self.end_index as i64,
        };

        self.scale = new_scale;
        let fit = self.tuning.bars_that_fit(self.surface_width, new_scale);
        if pivot.is_some() {
            self.place_window(end, fit);
        } else {
            let end = self.end_index;
            self.start_index = end.saturating_sub(fit);
        }
        self.record();
        true
    }

    /// Pans by a pixel delta. Dragging right (`dx > 0`) reveals older bars.
    pub fn pan(&mut self, pixel_delta_x: f64) -> bool {
        if !pixel_delta_x.is_finite() {
            return false;
        }
        let bars = (pixel_delta_x / self.unit_px()).round();
        if bars == 0.0 {
            return false;
        }
        self.pan_bars(-(bars as i64))
    }

    /// Shifts the window by whole bars; positive moves toward newer bars.
    ///
    /// A window wider than the surface is narrowed to the slots that fit, so
    /// bars left of the screen can be panned into view.
    pub fn pan_bars(&mut self, delta: i64) -> bool {
        if self.is_empty() || delta == 0 {
            return false;
        }
        let before = (self.start_index, self.end_index);
        let len = self.visible_len().min(self.bars_that_fit());
        self.place_window(self.end_index as i64 + delta, len);
        self.record();
        before != (self.start_index, self.end_index)
    }

    /// Applies a new surface width keeping the right edge fixed.
    pub fn resize(&mut self, surface_width: f64) -> bool {
        if !surface_width.is_finite() || surface_width < 0.0 {
            return false;
        }
        self.surface_width = surface_width;
        if self.is_empty() {
            return false;
        }
        let fit = self.tuning.bars_that_fit(surface_width, self.scale);
        let before = self.start_index;
        self.start_index = self.end_index.saturating_sub(fit);
        self.record();
        before != self.start_index
    }

    /// Shows the trailing bars, at most `max_display_bars` of them, and
    /// optionally restores the default scale.
    pub fn reset_view(&mut self, surface_width: f64, preserve_scale: bool) -> bool {
        let before = self.snapshot();
        if surface_width.is_finite() && surface_width >= 0.0 {
            self.surface_width = surface_width;
        }
        if !preserve_scale {
            self.scale = self.tuning.clamp_scale(1.0);
        }
        if self.is_empty() {
            self.start_index = 0;
            self.end_index = 0;
        } else {
            let count = self.bar_count.min(self.tuning.max_display_bars).max(1);
            self.end_index = self.bar_count;
            self.start_index = self.bar_count - count;
        }
        self.record();
        before != self.snapshot()
    }

    /// Moves the window so its right edge sits on the newest bar.
    pub fn scroll_to_latest(&mut self) -> bool {
        if self.is_empty() {
            return false;
        }
        let delta = self.bar_count as i64 - self.end_index as i64;
        self.pan_bars(delta)
    }

    /// Reconciles the window after the bar sequence was replaced.
    ///
    /// Never leaves the window out of bounds or empty while bars exist.
    pub fn update_data(&mut self, bars: &[Bar], preserve_view: bool) -> DataUpdateOutcome {
        let signature = BarSignature::of(bars);
        if self.signature == Some(signature) {
            return DataUpdateOutcome::Unchanged;
        }

        let old_count = self.bar_count;
        let new_count = bars.len();
        self.signature = Some(signature);
        self.bar_count = new_count;

        if new_count == 0 {
            self.start_index = 0;
            self.end_index = 0;
            self.record();
            return DataUpdateOutcome::Emptied;
        }

        if !preserve_view || old_count == 0 {
            self.reset_view(self.surface_width, false);
            return DataUpdateOutcome::Reset;
        }

        let recorded = self.recorded.unwrap_or_else(|| self.snapshot());
        self.scale = self.tuning.clamp_scale(recorded.scale);
        let followed_latest = recorded.end_index >= old_count;

        let mut start = recorded.start_index as i64;
        let mut end = recorded.end_index as i64;
        if followed_latest && new_count != old_count {
            let delta = new_count as i64 - old_count as i64;
            start += delta;
            end += delta;
        }

        let len = (end - start).max(1);
        let end = end.clamp(1, new_count as i64);
        let start = (end - len).clamp(0, end - 1);
        self.start_index = start as usize;
        self.end_index = end as usize;
        self.record();
        DataUpdateOutcome::Preserved { followed_latest }
    }

    /// Remembers the current scale/window as the reconciliation baseline.
    pub fn record(&mut self) {
        self.recorded = Some(self.snapshot());
    }

    fn max_end(&self) -> usize {
        self.bar_count + self.tuning.max_empty_bars(self.surface_width, self.scale)
    }

    /// Places a window of `len` bars ending at `end`, shifting it (never
    /// shrinking it unless it cannot fit at all) into `[0, max_end]`.
    fn place_window(&mut self, end: i64, len: usize) {
        let max_end = self.max_end() as i64;
        let len = (len.max(1) as i64).min(max_end.max(1));
        let end = end.clamp(len, max_end.max(len));
        self.end_index = end as usize;
        self.start_index = (end - len) as usize;
    }
}
