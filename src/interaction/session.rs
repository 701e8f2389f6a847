use serde::{Deserialize, Serialize};

use crate::core::Anchor;
use crate::objects::ShapeDraft;

/// Shape tools. Vertical lines are a separate toggle mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrawingTool {
    TrendLine,
    Circle,
    Rectangle,
    Fibonacci,
    Polyline,
}

impl DrawingTool {
    #[must_use]
    pub fn is_two_click(self) -> bool {
        self != DrawingTool::Polyline
    }

    fn two_point_draft(self, first: Anchor, second: Anchor) -> ShapeDraft {
        match self {
            DrawingTool::TrendLine => ShapeDraft::TrendLine {
                start: first,
                end: second,
            },
            DrawingTool::Circle => ShapeDraft::Circle {
                center: first,
                rim: second,
            },
            DrawingTool::Rectangle => ShapeDraft::Rectangle {
                corner1: first,
                corner2: second,
            },
            DrawingTool::Fibonacci => ShapeDraft::Fibonacci {
                start: first,
                end: second,
            },
            DrawingTool::Polyline => ShapeDraft::Polyline {
                points: vec![first, second],
            },
        }
    }
}

/// Observable phase of the drawing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    Idle,
    VerticalLineMode,
    ToolSelected,
    Anchoring,
    Previewing,
    PolylineDraft,
}

/// Result of feeding one tap (or finish signal) into the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionOutcome {
    /// No tool is active; the tap is not for the session.
    Ignored,
    /// First anchor of a two-click shape recorded.
    Anchored,
    /// Polyline draft grew to `points` entries.
    PointAppended { points: usize },
    /// Second tap coincided with the first; still waiting for a real one.
    Degenerate,
    /// Vertical-line mode tap at the given bar.
    VerticalLineTap { index: usize },
    /// A shape is ready; the session is back to idle.
    Completed(ShapeDraft),
}

/// Turns taps and pointer motion into shapes, one shape per tool selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawingSession {
    active_tool: Option<DrawingTool>,
    vertical_line_mode: bool,
    pending_start: Option<Anchor>,
    polyline_points: Vec<Anchor>,
    preview: Option<Anchor>,
}

impl DrawingSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn active_tool(&self) -> Option<DrawingTool> {
        self.active_tool
    }

    #[must_use]
    pub fn vertical_line_mode(&self) -> bool {
        self.vertical_line_mode
    }

    #[must_use]
    pub fn pending_start(&self) -> Option<Anchor> {
        self.pending_start
    }

    #[must_use]
    pub fn polyline_points(&self) -> &[Anchor] {
        &self.polyline_points
    }

    #[must_use]
    pub fn preview_anchor(&self) -> Option<Anchor> {
        self.preview
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.vertical_line_mode {
            return SessionPhase::VerticalLineMode;
        }
        match self.active_tool {
            None => SessionPhase::Idle,
            Some(DrawingTool::Polyline) if !self.polyline_points.is_empty() => {
                SessionPhase::PolylineDraft
            }
            Some(_) => match (self.pending_start, self.preview) {
                (Some(_), Some(_)) => SessionPhase::Previewing,
                (Some(_), None) => SessionPhase::Anchoring,
                (None, _) => SessionPhase::ToolSelected,
            },
        }
    }

    /// Anchors are pending, so taps belong to the session.
    #[must_use]
    pub fn is_collecting(&self) -> bool {
        self.pending_start.is_some() || !self.polyline_points.is_empty()
    }

    /// Whether a tap would be consumed instead of hit-testing existing objects.
    #[must_use]
    pub fn captures_taps(&self) -> bool {
        self.vertical_line_mode || self.is_collecting()
    }

    fn clear_pending(&mut self) {
        self.pending_start = None;
        self.polyline_points.clear();
        self.preview = None;
    }

    /// Selects (or clears) the active tool, dropping any half-finished shape.
    pub fn select_tool(&mut self, tool: Option<DrawingTool>) {
        self.clear_pending();
        self.active_tool = tool;
        if tool.is_some() {
            self.vertical_line_mode = false;
        }
    }

    pub fn set_vertical_line_mode(&mut self, enabled: bool) {
        self.clear_pending();
        self.vertical_line_mode = enabled;
        if enabled {
            self.active_tool = None;
        }
    }

    /// Back to idle: no tool, nothing pending.
    pub fn reset(&mut self) {
        self.clear_pending();
        self.active_tool = None;
        self.vertical_line_mode = false;
    }

    /// Feeds a tap resolved to a chart anchor.
    pub fn tap(&mut self, anchor: Anchor) -> SessionOutcome {
        if self.vertical_line_mode {
            return SessionOutcome::VerticalLineTap {
                index: anchor.index.max(0.0).round() as usize,
            };
        }
        let Some(tool) = self.active_tool else {
            return SessionOutcome::Ignored;
        };

        if tool == DrawingTool::Polyline {
            if self
                .polyline_points
                .last()
                .is_none_or(|last| !last.coincides_with(anchor))
            {
                self.polyline_points.push(anchor);
            }
            return SessionOutcome::PointAppended {
                points: self.polyline_points.len(),
            };
        }

        match self.pending_start {
            None => {
                self.pending_start = Some(anchor);
                self.preview = None;
                SessionOutcome::Anchored
            }
            Some(start) if start.coincides_with(anchor) => {
                self.preview = None;
                SessionOutcome::Degenerate
            }
            Some(start) => {
                let draft = tool.two_point_draft(start, anchor);
                self.reset();
                SessionOutcome::Completed(draft)
            }
        }
    }

    /// Updates the preview anchor while something is pending.
    pub fn pointer_moved(&mut self, anchor: Anchor) -> bool {
        if !self.is_collecting() {
            return false;
        }
        self.preview = Some(anchor);
        true
    }

    /// Completes a polyline draft with at least two points.
    pub fn finish_polyline(&mut self) -> SessionOutcome {
        if self.active_tool != Some(DrawingTool::Polyline) || self.polyline_points.len() < 2 {
            return SessionOutcome::Ignored;
        }
        let points = std::mem::take(&mut self.polyline_points);
        self.reset();
        SessionOutcome::Completed(ShapeDraft::Polyline { points })
    }

    /// Shape to show while the user is still placing anchors.
    #[must_use]
    pub fn preview_draft(&self) -> Option<ShapeDraft> {
        let tool = self.active_tool?;
        let preview = self.preview?;
        if tool == DrawingTool::Polyline {
            if self.polyline_points.is_empty() {
                return None;
            }
            let mut points = self.polyline_points.clone();
            points.push(preview);
            return Some(ShapeDraft::Polyline { points });
        }
        let start = self.pending_start?;
        Some(tool.two_point_draft(start, preview))
    }
}
