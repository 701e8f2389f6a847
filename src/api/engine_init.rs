use tracing::{debug, warn};

use crate::core::Viewport;
use crate::error::ChartResult;
use crate::extensions::{DrawingPersistence, IndicatorFeed, IndicatorOverlays, NoopPersistence};
use crate::interaction::{DrawingSession, InteractionState};
use crate::objects::UserDrawingStore;
use crate::render::Renderer;

use super::validation::validate_engine_config;
use super::{ChartEngine, ChartEngineConfig};

impl<R: Renderer> ChartEngine<R> {
    /// Creates an engine without persistence.
    pub fn new(renderer: R, config: ChartEngineConfig) -> ChartResult<Self> {
        Self::with_persistence(renderer, config, Box::new(NoopPersistence))
    }

    /// Creates an engine and loads user drawings from `persistence`.
    ///
    /// A failed load, or individual drawings the store refuses, are logged and
    /// skipped; the engine still starts.
    pub fn with_persistence(
        renderer: R,
        config: ChartEngineConfig,
        mut persistence: Box<dyn DrawingPersistence>,
    ) -> ChartResult<Self> {
        let config = validate_engine_config(config)?;

        let mut drawings = UserDrawingStore::new();
        match persistence.load() {
            Ok(objects) => {
                for object in objects {
                    let id = object.id().clone();
                    if let Err(err) = drawings.add(object) {
                        warn!(error = %err, %id, "skipping persisted drawing");
                    }
                }
            }
            Err(err) => warn!(error = %err, "drawing load failed; starting empty"),
        }
        debug!(count = drawings.len(), "loaded user drawings");

        Ok(Self {
            renderer,
            config,
            surface: config.surface,
            bars: Vec::new(),
            viewport: Viewport::new(config.viewport_tuning, config.surface.width_px()),
            indicators: IndicatorFeed::new(),
            overlays: IndicatorOverlays::default(),
            drawings,
            session: DrawingSession::new(),
            interaction: InteractionState::default(),
            persistence,
            plugins: Vec::new(),
        })
    }
}
