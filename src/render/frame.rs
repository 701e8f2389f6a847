use serde::{Deserialize, Serialize};

use crate::core::{Bar, CoordinateTransform, PriceRange, SurfaceSize, ViewportSnapshot};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{DragTarget, DrawingTool, InteractionMode, SessionPhase};
use crate::objects::{ObjectId, ObjectModel};

/// Selection, drag and tool state a backend needs for cursor and highlight
/// feedback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiState {
    pub mode: InteractionMode,
    pub selected: Option<ObjectId>,
    pub dragging: Option<(ObjectId, DragTarget)>,
    pub cursor: Option<(f64, f64)>,
    pub active_tool: Option<DrawingTool>,
    pub vertical_line_mode: bool,
    pub session_phase: SessionPhase,
}

/// Backend-agnostic scene for one chart draw pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub surface: SurfaceSize,
    pub viewport: ViewportSnapshot,
    pub transform: CoordinateTransform,
    pub price_range: PriceRange,
    /// Real bar indices inside the window, `start..end`.
    pub data_range: (usize, usize),
    /// Bars in `data_range`, for candles and vertical-line placement.
    pub bars: Vec<Bar>,
    pub objects: ObjectModel,
    pub ui: UiState,
    /// No bars loaded; the backend should draw its empty state.
    pub is_empty: bool,
}

impl RenderFrame {
    pub fn validate(&self) -> ChartResult<()> {
        if !self.surface.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.surface.width,
                height: self.surface.height,
            });
        }
        let (start, end) = self.data_range;
        if start > end {
            return Err(ChartError::InvalidData(format!(
                "frame data range is inverted: {start}..{end}"
            )));
        }
        if self.bars.len() != end - start {
            return Err(ChartError::InvalidData(format!(
                "frame carries {} bars for data range {start}..{end}",
                self.bars.len()
            )));
        }
        if !self.price_range.min.is_finite() || !self.price_range.max.is_finite() {
            return Err(ChartError::InvalidData(
                "frame price range must be finite".to_owned(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn visible_bar_count(&self) -> usize {
        self.bars.len()
    }

    /// Bar index of the visible bar with `timestamp`.
    #[must_use]
    pub fn index_of_timestamp(&self, timestamp: i64) -> Option<usize> {
        self.bars
            .binary_search_by_key(&timestamp, |bar| bar.timestamp)
            .ok()
            .map(|offset| self.data_range.0 + offset)
    }
}
