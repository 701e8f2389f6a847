use tracing::trace;

use crate::interaction::{
    DragState, HitTarget, InteractionMode, KeyCommand, PointerButtons, PointerEvent,
    PointerEventKind, Selection, apply_drag_move, hit_test,
};
use crate::render::Renderer;

use super::{ChartEngine, PluginEvent};

impl<R: Renderer> ChartEngine<R> {
    /// Routes one pointer event to the matching handler.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event.kind {
            PointerEventKind::Down => self.pointer_down(event.x, event.y, event.buttons),
            PointerEventKind::Move => self.pointer_move(event.x, event.y),
            PointerEventKind::Up => self.pointer_up(event.x, event.y),
            PointerEventKind::Scroll { delta } => {
                self.scroll(event.x, delta);
            }
            PointerEventKind::DoubleTap => {
                self.double_tap(event.x, event.y);
            }
            PointerEventKind::Leave => self.pointer_leave(),
        }
    }

    /// Press: pending drawing taps first, then hit-testing, then a new
    /// drawing tap, and finally panning on empty chart space.
    ///
    /// A secondary-button press cancels the drawing session.
    pub fn pointer_down(&mut self, x: f64, y: f64, buttons: PointerButtons) {
        self.interaction.on_pointer_move(x, y);
        if buttons.secondary && !buttons.primary {
            self.cancel_drawing();
            return;
        }
        if self.bars.is_empty() {
            return;
        }

        let transform = self.coordinate_transform();
        if self.session.captures_taps() {
            self.session_tap(transform.point_to_anchor(x, y));
            return;
        }
        if let Some(hit) = hit_test(
            self.drawings.as_slice(),
            &transform,
            x,
            y,
            self.config.hit_tolerance,
        ) {
            self.begin_drag(hit, x, y);
            return;
        }
        if self.session.active_tool().is_some() {
            self.session_tap(transform.point_to_anchor(x, y));
            return;
        }

        self.set_selection(None);
        self.interaction.on_pan_start(x);
        self.emit_plugin_event(PluginEvent::PanStarted);
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.interaction.on_pointer_move(x, y);
        self.emit_plugin_event(PluginEvent::PointerMoved { x, y });

        match self.interaction.mode() {
            InteractionMode::Dragging => self.drag_to(x, y),
            InteractionMode::Panning => {
                if let Some(step) = self.interaction.on_pan_move(x, self.viewport.unit_px()) {
                    self.pan(step);
                }
            }
            InteractionMode::Idle => {
                if self.session.is_collecting() && !self.bars.is_empty() {
                    let anchor = self.coordinate_transform().point_to_anchor(x, y);
                    self.session.pointer_moved(anchor);
                }
            }
        }
    }

    /// Release: ends a drag (keeping the selection) or a pan.
    pub fn pointer_up(&mut self, x: f64, y: f64) {
        self.interaction.on_pointer_move(x, y);
        self.finish_gesture();
    }

    pub fn pointer_leave(&mut self) {
        self.finish_gesture();
        self.interaction.on_pointer_leave();
        self.emit_plugin_event(PluginEvent::PointerLeft);
    }

    /// Wheel zoom around the pointer; `delta < 0` zooms in.
    pub fn scroll(&mut self, x: f64, delta: f64) -> bool {
        if !delta.is_finite() || delta == 0.0 {
            return false;
        }
        let factor = self.config.zoom_step_factor.powf(-delta);
        self.zoom_at(factor, x)
    }

    /// Finishes a polyline draft, if one is in progress.
    pub fn double_tap(&mut self, x: f64, y: f64) -> bool {
        self.interaction.on_pointer_move(x, y);
        self.finish_polyline().is_some()
    }

    /// Applies a keyboard shortcut. Returns `true` when something changed.
    pub fn handle_key(&mut self, command: KeyCommand) -> bool {
        let step = self.config.zoom_step_factor;
        let pan_bars = i64::try_from(self.config.keyboard_pan_bars).unwrap_or(i64::MAX);
        match command {
            KeyCommand::ZoomIn => self.zoom(step),
            KeyCommand::ZoomOut => self.zoom(1.0 / step),
            KeyCommand::PanLeft => self.pan_bars(-pan_bars),
            KeyCommand::PanRight => self.pan_bars(pan_bars),
            KeyCommand::ResetView => self.reset_view(false),
            KeyCommand::DeleteSelected => self.delete_selected().is_some(),
            KeyCommand::Cancel => {
                let had_session = self.session.active_tool().is_some()
                    || self.session.vertical_line_mode()
                    || self.session.is_collecting();
                let had_selection = self.interaction.selection().is_some();
                self.cancel_drawing();
                self.clear_selection();
                had_session || had_selection
            }
            KeyCommand::FinishPolyline => self.finish_polyline().is_some(),
        }
    }

    fn begin_drag(&mut self, hit: HitTarget, x: f64, y: f64) {
        let Some(object) = self.drawings.get(&hit.id) else {
            return;
        };
        let drag = DragState::begin(hit, object, x, y);
        let (id, kind, target) = (drag.id.clone(), drag.kind, drag.target);
        self.set_selection(Some(Selection {
            id: id.clone(),
            kind,
        }));
        self.interaction.on_drag_start(drag);
        trace!(%id, ?target, "drag started");
        self.emit_plugin_event(PluginEvent::DragStarted { id, target });
    }

    fn drag_to(&mut self, x: f64, y: f64) {
        let transform = self.coordinate_transform();
        let mode = self.config.drag_body_mode;
        let Some(drag) = self.interaction.drag_mut() else {
            return;
        };
        let Some(object) = self.drawings.get_mut(&drag.id) else {
            // Removed while being dragged.
            self.interaction.on_drag_end();
            return;
        };
        if apply_drag_move(object, drag, &transform, x, y, mode) {
            trace!(id = %drag.id, x, y, "drag moved");
        }
    }

    fn finish_gesture(&mut self) {
        match self.interaction.mode() {
            InteractionMode::Dragging => {
                let Some(drag) = self.interaction.on_drag_end() else {
                    return;
                };
                trace!(id = %drag.id, moved = drag.moved, "drag ended");
                if drag.moved {
                    self.persist_drawings();
                }
                self.emit_plugin_event(PluginEvent::DragEnded {
                    id: drag.id,
                    moved: drag.moved,
                });
            }
            InteractionMode::Panning => {
                self.interaction.on_pan_end();
                self.emit_plugin_event(PluginEvent::PanEnded);
            }
            InteractionMode::Idle => {}
        }
    }
}
