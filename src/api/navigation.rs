use crate::render::Renderer;

use super::ChartEngine;

/// Navigation commands an outside controller (toolbar, menu, shortcut layer)
/// may issue. Hand such controllers `&mut dyn ChartNavigator` instead of the
/// whole engine.
pub trait ChartNavigator {
    fn zoom_in(&mut self) -> bool;
    fn zoom_out(&mut self) -> bool;
    /// Positive moves toward newer bars.
    fn pan_by_bars(&mut self, bars: i64) -> bool;
    fn reset_view(&mut self) -> bool;
    fn scroll_to_latest(&mut self) -> bool;
}

impl<R: Renderer> ChartNavigator for ChartEngine<R> {
    fn zoom_in(&mut self) -> bool {
        self.zoom(self.config.zoom_step_factor)
    }

    fn zoom_out(&mut self) -> bool {
        self.zoom(1.0 / self.config.zoom_step_factor)
    }

    fn pan_by_bars(&mut self, bars: i64) -> bool {
        self.pan_bars(bars)
    }

    fn reset_view(&mut self) -> bool {
        ChartEngine::reset_view(self, false)
    }

    fn scroll_to_latest(&mut self) -> bool {
        ChartEngine::scroll_to_latest(self)
    }
}
