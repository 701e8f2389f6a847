use crate::core::{Bar, SurfaceSize, Viewport};
use crate::error::ChartResult;
use crate::extensions::{ChartPlugin, DrawingPersistence, IndicatorFeed, IndicatorOverlays};
use crate::interaction::{DrawingSession, InteractionMode, InteractionState, Selection};
use crate::objects::UserDrawingStore;
use crate::render::Renderer;

use super::{ChartEngineConfig, PluginEvent};

/// Main orchestration facade consumed by host applications.
///
/// `ChartEngine` owns the bar sequence, the viewport, the user drawing store,
/// the drawing session and pointer interaction state. Each concern lives in
/// its own `impl` block (viewport, interaction, drawing, frame building) and
/// they share state only through these fields.
pub struct ChartEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: ChartEngineConfig,
    pub(super) surface: SurfaceSize,
    pub(super) bars: Vec<Bar>,
    pub(super) viewport: Viewport,
    pub(super) indicators: IndicatorFeed,
    pub(super) overlays: IndicatorOverlays,
    pub(super) drawings: UserDrawingStore,
    pub(super) session: DrawingSession,
    pub(super) interaction: InteractionState,
    pub(super) persistence: Box<dyn DrawingPersistence>,
    pub(super) plugins: Vec<Box<dyn ChartPlugin>>,
}

impl<R: Renderer> ChartEngine<R> {
    /// Assembles the current frame and hands it to the renderer.
    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_render_frame();
        self.renderer.render(&frame)?;
        self.emit_plugin_event(PluginEvent::Rendered);
        Ok(())
    }

    #[must_use]
    pub fn config(&self) -> ChartEngineConfig {
        self.config
    }

    #[must_use]
    pub fn surface(&self) -> SurfaceSize {
        self.surface
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[must_use]
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    #[must_use]
    pub fn drawings(&self) -> &UserDrawingStore {
        &self.drawings
    }

    #[must_use]
    pub fn session(&self) -> &DrawingSession {
        &self.session
    }

    #[must_use]
    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.interaction.mode()
    }

    #[must_use]
    pub fn selection(&self) -> Option<&Selection> {
        self.interaction.selection()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
