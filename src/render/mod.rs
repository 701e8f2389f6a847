mod frame;
mod null_renderer;

pub use frame::{RenderFrame, UiState};
pub use null_renderer::NullRenderer;

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized `RenderFrame` (layered objects plus
/// the transform that places them) so drawing code stays isolated from
/// viewport and interaction logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}
