use tracing::{debug, trace, warn};

use crate::core::{Bar, DataUpdateOutcome};
use crate::error::ChartResult;
use crate::extensions::{IndicatorFeed, IndicatorOverlays};
use crate::render::Renderer;

use super::{ChartEngine, PluginEvent};

impl<R: Renderer> ChartEngine<R> {
    /// Replaces the bar sequence and reconciles the viewport.
    ///
    /// With `preserve_view` the last recorded window is restored and, when it
    /// was following the newest bar, shifted so it keeps following. A sequence
    /// with the same signature (length and first/last timestamp) leaves the
    /// window untouched; its bars still replace the stored ones.
    pub fn update_data(&mut self, bars: Vec<Bar>, preserve_view: bool) -> DataUpdateOutcome {
        let old_count = self.bars.len();
        let outcome = self.viewport.update_data(&bars, preserve_view);
        self.bars = bars;

        if outcome == DataUpdateOutcome::Unchanged {
            trace!(count = self.bars.len(), "bar signature unchanged");
            return outcome;
        }

        debug!(
            old_count,
            new_count = self.bars.len(),
            preserve_view,
            ?outcome,
            start_index = self.viewport.start_index(),
            end_index = self.viewport.end_index(),
            scale = self.viewport.scale(),
            first = ?self.bars.first().and_then(Bar::datetime),
            last = ?self.bars.last().and_then(Bar::datetime),
            "update data"
        );

        if let Err(err) = self.indicators.validate_len(self.bars.len()) {
            warn!(error = %err, "dropping indicator feed that no longer matches the bars");
            self.indicators = IndicatorFeed::new();
        }
        if self.bars.is_empty() && self.interaction.drag().is_some() {
            self.interaction.on_drag_end();
        }

        self.emit_plugin_event(PluginEvent::DataUpdated {
            bar_count: self.bars.len(),
        });
        self.emit_viewport_changed();
        outcome
    }

    /// Installs indicator series; every series must match the bar count.
    pub fn set_indicator_feed(&mut self, feed: IndicatorFeed) -> ChartResult<()> {
        feed.validate_len(self.bars.len())?;
        debug!(series = feed.len(), "set indicator feed");
        self.indicators = feed;
        Ok(())
    }

    #[must_use]
    pub fn indicator_feed(&self) -> &IndicatorFeed {
        &self.indicators
    }

    pub fn set_indicator_overlays(&mut self, overlays: IndicatorOverlays) {
        trace!(
            waves = overlays.wave_points.len(),
            trend_rays = overlays.trend_rays.len(),
            signals = overlays.signals.len(),
            "set indicator overlays"
        );
        self.overlays = overlays;
    }

    #[must_use]
    pub fn indicator_overlays(&self) -> &IndicatorOverlays {
        &self.overlays
    }

    /// Whether the engine has no bars and renders its empty state.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}
