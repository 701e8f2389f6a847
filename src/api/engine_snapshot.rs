use serde::{Deserialize, Serialize};

use crate::core::{PriceRange, SurfaceSize, ViewportSnapshot};
use crate::interaction::{DragTarget, DrawingSession, InteractionMode, Selection};
use crate::objects::{ChartObject, ObjectId};
use crate::render::Renderer;

use super::ChartEngine;

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub surface: SurfaceSize,
    pub viewport: ViewportSnapshot,
    pub recorded_viewport: Option<ViewportSnapshot>,
    pub bar_count: usize,
    pub data_range: (usize, usize),
    pub price_range: PriceRange,
    pub interaction_mode: InteractionMode,
    pub selection: Option<Selection>,
    pub dragging: Option<(ObjectId, DragTarget)>,
    pub session: DrawingSession,
    pub drawings: Vec<ChartObject>,
}

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            surface: self.surface,
            viewport: self.viewport.snapshot(),
            recorded_viewport: self.viewport.recorded(),
            bar_count: self.bars.len(),
            data_range: self.viewport.data_range(),
            price_range: self.price_range(),
            interaction_mode: self.interaction.mode(),
            selection: self.interaction.selection().cloned(),
            dragging: self
                .interaction
                .drag()
                .map(|drag| (drag.id.clone(), drag.target)),
            session: self.session.clone(),
            drawings: self.drawings.as_slice().to_vec(),
        }
    }
}
