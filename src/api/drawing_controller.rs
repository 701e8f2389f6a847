use tracing::{debug, warn};

use crate::core::Anchor;
use crate::error::ChartResult;
use crate::interaction::{DrawingTool, SessionOutcome, Selection};
use crate::objects::{ChartObject, ObjectId, ObjectKind, ShapeDraft};
use crate::render::Renderer;

use super::{ChartEngine, PluginEvent};

impl<R: Renderer> ChartEngine<R> {
    /// Selects (or clears) the drawing tool. Any half-finished shape is
    /// dropped and vertical-line mode is turned off.
    pub fn select_tool(&mut self, tool: Option<DrawingTool>) {
        self.session.select_tool(tool);
        debug!(?tool, "select drawing tool");
        self.emit_tool_changed();
    }

    #[must_use]
    pub fn active_tool(&self) -> Option<DrawingTool> {
        self.session.active_tool()
    }

    /// Toggles vertical-line mode; enabling it clears the active tool.
    pub fn set_vertical_line_mode(&mut self, enabled: bool) {
        self.session.set_vertical_line_mode(enabled);
        debug!(enabled, "vertical line mode");
        self.emit_tool_changed();
    }

    #[must_use]
    pub fn vertical_line_mode(&self) -> bool {
        self.session.vertical_line_mode()
    }

    /// Abandons the current drawing session and returns to idle.
    pub fn cancel_drawing(&mut self) {
        let was_active =
            self.session.active_tool().is_some() || self.session.vertical_line_mode();
        self.session.reset();
        if was_active {
            self.emit_tool_changed();
        }
    }

    /// Completes a polyline draft with at least two points.
    pub fn finish_polyline(&mut self) -> Option<ObjectId> {
        let outcome = self.session.finish_polyline();
        self.apply_session_outcome(outcome)
    }

    /// Feeds a tap at chart coordinates into the drawing session.
    pub(super) fn session_tap(&mut self, anchor: Anchor) -> Option<ObjectId> {
        let outcome = self.session.tap(anchor);
        self.apply_session_outcome(outcome)
    }

    fn apply_session_outcome(&mut self, outcome: SessionOutcome) -> Option<ObjectId> {
        match outcome {
            SessionOutcome::Anchored | SessionOutcome::PointAppended { points: 1 } => {
                self.set_selection(None);
                None
            }
            SessionOutcome::VerticalLineTap { index } => self.toggle_vertical_line(index),
            SessionOutcome::Completed(draft) => {
                let created = self.add_drawing(draft);
                self.emit_tool_changed();
                created
                    .inspect_err(|err| warn!(error = %err, "finished drawing was not stored"))
                    .ok()
            }
            SessionOutcome::Degenerate => {
                debug!("second anchor coincides with the first; waiting for another tap");
                None
            }
            SessionOutcome::Ignored | SessionOutcome::PointAppended { .. } => None,
        }
    }

    fn toggle_vertical_line(&mut self, index: usize) -> Option<ObjectId> {
        let timestamp = self.bars.get(index)?.timestamp;
        let existing = self
            .drawings
            .of_kind(ObjectKind::VerticalLine)
            .find(|object| {
                matches!(object, ChartObject::VerticalLine(line) if line.timestamp == timestamp)
            })
            .map(|object| object.id().clone());
        match existing {
            Some(id) => {
                self.remove_object(&id);
                None
            }
            None => self
                .add_drawing(ShapeDraft::VerticalLine { timestamp })
                .inspect_err(|err| warn!(error = %err, "vertical line was not stored"))
                .ok(),
        }
    }

    /// Stores a new user drawing, assigns its id and saves.
    pub fn add_drawing(&mut self, draft: ShapeDraft) -> ChartResult<ObjectId> {
        let kind = draft.kind();
        let id = self.drawings.insert(draft)?;
        debug!(%id, ?kind, count = self.drawings.len(), "drawing created");
        self.emit_plugin_event(PluginEvent::ObjectCreated {
            id: id.clone(),
            kind,
        });
        self.persist_drawings();
        Ok(id)
    }

    /// Removes one drawing. Unknown ids are a no-op.
    pub fn remove_object(&mut self, id: &ObjectId) -> Option<ChartObject> {
        let removed = self.drawings.remove(id)?;
        let was_selected = self.interaction.selected_id() == Some(id);
        self.interaction.forget(id);
        debug!(%id, kind = ?removed.kind(), "drawing removed");
        self.emit_plugin_event(PluginEvent::ObjectRemoved {
            id: id.clone(),
            kind: removed.kind(),
        });
        if was_selected {
            self.emit_plugin_event(PluginEvent::SelectionChanged { selected: None });
        }
        self.persist_drawings();
        Some(removed)
    }

    /// Removes the selected drawing, if any.
    pub fn delete_selected(&mut self) -> Option<ChartObject> {
        let id = self.interaction.selected_id()?.clone();
        self.remove_object(&id)
    }

    /// Removes every user drawing; returns how many were dropped.
    pub fn clear_drawings(&mut self) -> usize {
        let removed = self.drawings.clear();
        if removed > 0 {
            self.set_selection(None);
            self.interaction.clear();
            debug!(removed, "cleared drawings");
            self.persist_drawings();
        }
        removed
    }

    pub fn clear_drawings_of_kind(&mut self, kind: ObjectKind) -> usize {
        if self
            .interaction
            .selection()
            .is_some_and(|selection| selection.kind == kind)
        {
            self.set_selection(None);
            self.interaction.clear();
        }
        let removed = self.drawings.clear_kind(kind);
        if removed > 0 {
            debug!(removed, ?kind, "cleared drawings of kind");
            self.persist_drawings();
        }
        removed
    }

    /// Selects a stored drawing by id. Returns `false` for unknown ids.
    pub fn select_object(&mut self, id: &ObjectId) -> bool {
        let Some(kind) = self.drawings.get(id).map(ChartObject::kind) else {
            return false;
        };
        self.set_selection(Some(Selection {
            id: id.clone(),
            kind,
        }));
        true
    }

    pub fn clear_selection(&mut self) {
        self.set_selection(None);
    }

    pub(super) fn set_selection(&mut self, selection: Option<Selection>) {
        if self.interaction.select(selection) {
            let selected = self.interaction.selected_id().cloned();
            self.emit_plugin_event(PluginEvent::SelectionChanged { selected });
        }
    }

    /// Mirrors the store to the persistence collaborator. Failures are
    /// logged; the in-memory drawings stay as they are.
    pub(super) fn persist_drawings(&mut self) {
        if let Err(err) = self.persistence.save(self.drawings.as_slice()) {
            warn!(
                error = %err,
                count = self.drawings.len(),
                "drawing save failed; keeping in-memory drawings"
            );
        }
    }
}
