use serde::{Deserialize, Serialize};

use crate::core::{PriceRange, ViewportSnapshot};
use crate::interaction::{DragTarget, DrawingTool, InteractionMode, SessionPhase};
use crate::objects::{ObjectId, ObjectKind};

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginContext {
    pub viewport: ViewportSnapshot,
    pub bar_count: usize,
    pub price_range: PriceRange,
    pub interaction_mode: InteractionMode,
    pub selected: Option<ObjectId>,
    pub active_tool: Option<DrawingTool>,
    pub session_phase: SessionPhase,
    pub drawing_count: usize,
}

/// Event stream exposed to plugins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PluginEvent {
    DataUpdated { bar_count: usize },
    ViewportChanged { start_index: usize, end_index: usize, scale: f64 },
    PointerMoved { x: f64, y: f64 },
    PointerLeft,
    PanStarted,
    PanEnded,
    SelectionChanged { selected: Option<ObjectId> },
    DragStarted { id: ObjectId, target: DragTarget },
    DragEnded { id: ObjectId, moved: bool },
    ObjectCreated { id: ObjectId, kind: ObjectKind },
    ObjectRemoved { id: ObjectId, kind: ObjectKind },
    ToolChanged { tool: Option<DrawingTool>, vertical_line_mode: bool },
    Rendered,
}

/// Extension hook interface for bounded custom logic.
///
/// Plugins observe events and read engine context without mutating engine
/// internals directly.
pub trait ChartPlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &PluginEvent, context: &PluginContext);
}
