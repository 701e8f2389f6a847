//! Collaborator boundaries around the engine: indicator output, plugin
//! observers and drawing persistence.

pub mod indicators;
pub mod persistence;
pub mod plugins;

pub use indicators::{
    IndicatorFeed, IndicatorOverlays, SignalPoint, SignalSide, TrendRay, WavePoint,
};
pub use persistence::{
    DRAWING_DOCUMENT_SCHEMA_V1, DrawingDocument, DrawingPersistence, MemoryPersistence,
    NoopPersistence,
};
pub use plugins::{ChartPlugin, PluginContext, PluginEvent};
