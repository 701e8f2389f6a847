use crate::error::ChartResult;
use crate::objects::ObjectLayer;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates frames and records what the last one contained.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_object_count: usize,
    pub last_layer_counts: [usize; 3],
    pub last_visible_bars: usize,
    pub last_was_empty: bool,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_object_count = frame.objects.len();
        self.last_layer_counts =
            ObjectLayer::all().map(|layer| frame.objects.count_in_layer(layer));
        self.last_visible_bars = frame.visible_bar_count();
        self.last_was_empty = frame.is_empty;
        Ok(())
    }
}
