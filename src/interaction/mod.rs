mod drag;
mod hit_test;
mod input;
mod session;

pub use drag::{DragBodyMode, DragState, apply_drag_move};
pub use hit_test::{HitTarget, HitTolerance, hit_object, hit_test};
pub use input::{KeyCommand, PointerButtons, PointerEvent, PointerEventKind};
pub use session::{DrawingSession, DrawingTool, SessionOutcome, SessionPhase};

use serde::{Deserialize, Serialize};

use crate::objects::{HandleSide, ObjectId, ObjectKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    Panning,
    Dragging,
}

/// Part of a line-like object a drag manipulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DragTarget {
    Start,
    End,
    Body,
}

impl DragTarget {
    #[must_use]
    pub fn handle_side(self) -> Option<HandleSide> {
        match self {
            DragTarget::Start => Some(HandleSide::Start),
            DragTarget::End => Some(HandleSide::End),
            DragTarget::Body => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub id: ObjectId,
    pub kind: ObjectKind,
}

/// Transient pointer state: selection, active drag and panning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionState {
    mode: InteractionMode,
    selection: Option<Selection>,
    drag: Option<DragState>,
    cursor: Option<(f64, f64)>,
    pan_last_x: f64,
    pan_remainder_px: f64,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            mode: InteractionMode::Idle,
            selection: None,
            drag: None,
            cursor: None,
            pan_last_x: 0.0,
            pan_remainder_px: 0.0,
        }
    }
}

impl InteractionState {
    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    #[must_use]
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    #[must_use]
    pub fn selected_id(&self) -> Option<&ObjectId> {
        self.selection.as_ref().map(|selection| &selection.id)
    }

    #[must_use]
    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    pub fn drag_mut(&mut self) -> Option<&mut DragState> {
        self.drag.as_mut()
    }

    #[must_use]
    pub fn cursor(&self) -> Option<(f64, f64)> {
        self.cursor
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.cursor = Some((x, y));
    }

    pub fn on_pointer_leave(&mut self) {
        self.cursor = None;
    }

    /// Sets the selection; returns `true` when it changed.
    pub fn select(&mut self, selection: Option<Selection>) -> bool {
        if self.selection == selection {
            return false;
        }
        self.selection = selection;
        true
    }

    pub fn on_drag_start(&mut self, drag: DragState) {
        self.selection = Some(Selection {
            id: drag.id.clone(),
            kind: drag.kind,
        });
        self.drag = Some(drag);
        self.mode = InteractionMode::Dragging;
    }

    /// Ends the drag but keeps the selection.
    pub fn on_drag_end(&mut self) -> Option<DragState> {
        self.mode = InteractionMode::Idle;
        self.drag.take()
    }

    pub fn on_pan_start(&mut self, x: f64) {
        self.mode = InteractionMode::Panning;
        self.pan_last_x = x;
        self.pan_remainder_px = 0.0;
    }

    /// Accumulates horizontal motion and returns whole-bar pixel steps to pan.
    pub fn on_pan_move(&mut self, x: f64, unit_px: f64) -> Option<f64> {
        if self.mode != InteractionMode::Panning || unit_px <= 0.0 {
            return None;
        }
        self.pan_remainder_px += x - self.pan_last_x;
        self.pan_last_x = x;
        let bars = (self.pan_remainder_px / unit_px).trunc();
        if bars == 0.0 {
            return None;
        }
        let step = bars * unit_px;
        self.pan_remainder_px -= step;
        Some(step)
    }

    pub fn on_pan_end(&mut self) {
        if self.mode == InteractionMode::Panning {
            self.mode = InteractionMode::Idle;
        }
        self.pan_remainder_px = 0.0;
    }

    /// Drops selection/drag state that points at `id`.
    pub fn forget(&mut self, id: &ObjectId) {
        if self.selected_id() == Some(id) {
            self.selection = None;
        }
        if self.drag.as_ref().is_some_and(|drag| &drag.id == id) {
            self.drag = None;
            self.mode = InteractionMode::Idle;
        }
    }

    pub fn clear(&mut self) {
        self.selection = None;
        self.drag = None;
        self.mode = InteractionMode::Idle;
    }
}
