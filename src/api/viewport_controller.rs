use tracing::trace;

use crate::core::SurfaceSize;
use crate::error::ChartResult;
use crate::render::Renderer;

use super::ChartEngine;
use super::validation::validate_surface;

impl<R: Renderer> ChartEngine<R> {
    /// Zooms keeping the right edge anchored.
    pub fn zoom(&mut self, factor: f64) -> bool {
        let changed = self.viewport.zoom(factor, None);
        self.after_viewport_change(changed, "zoom")
    }

    /// Zooms keeping the bar under pixel `x` in place.
    pub fn zoom_at(&mut self, factor: f64, x: f64) -> bool {
        let pivot = self.coordinate_transform().x_to_fractional_index(x);
        self.zoom_around_index(factor, pivot)
    }

    /// Zooms keeping bar `pivot_index` at its current pixel position.
    pub fn zoom_around_index(&mut self, factor: f64, pivot_index: f64) -> bool {
        let changed = self.viewport.zoom(factor, Some(pivot_index));
        self.after_viewport_change(changed, "zoom around pivot")
    }

    /// Pans by a pixel delta; positive `dx` reveals older bars.
    pub fn pan(&mut self, pixel_delta_x: f64) -> bool {
        let changed = self.viewport.pan(pixel_delta_x);
        self.after_viewport_change(changed, "pan")
    }

    /// Pans by whole bars; positive moves toward newer bars.
    pub fn pan_bars(&mut self, delta: i64) -> bool {
        let changed = self.viewport.pan_bars(delta);
        self.after_viewport_change(changed, "pan bars")
    }

    /// Applies a new surface size. The right edge of the window stays put.
    pub fn resize(&mut self, surface: SurfaceSize) -> ChartResult<bool> {
        let surface = validate_surface(surface)?;
        self.surface = surface;
        let changed = self.viewport.resize(surface.width_px());
        Ok(self.after_viewport_change(changed, "resize"))
    }

    /// Shows the newest bars, optionally keeping the zoom scale.
    pub fn reset_view(&mut self, preserve_scale: bool) -> bool {
        let changed = self
            .viewport
            .reset_view(self.surface.width_px(), preserve_scale);
        self.after_viewport_change(changed, "reset view")
    }

    pub fn scroll_to_latest(&mut self) -> bool {
        let changed = self.viewport.scroll_to_latest();
        self.after_viewport_change(changed, "scroll to latest")
    }

    fn after_viewport_change(&mut self, changed: bool, operation: &'static str) -> bool {
        if changed {
            trace!(
                operation,
                start_index = self.viewport.start_index(),
                end_index = self.viewport.end_index(),
                scale = self.viewport.scale(),
                "viewport changed"
            );
            self.emit_viewport_changed();
        }
        changed
    }
}
