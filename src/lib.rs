//! kline-board: headless candlestick viewport and drawing-object engine.
//!
//! The crate maps a scrollable window of OHLCV bars to screen space, keeps a
//! layered model of everything drawn over the price board, and turns pointer
//! input into hit-tests, drags and new drawings. Rendering backends consume a
//! fully materialized `RenderFrame`.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod objects;
pub mod render;
pub mod telemetry;

pub use api::{ChartEngine, ChartEngineConfig, ChartNavigator};
pub use error::{ChartError, ChartResult};
