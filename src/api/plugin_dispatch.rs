use crate::extensions::PluginContext;
use crate::render::Renderer;

use super::{ChartEngine, PluginEvent};

impl<R: Renderer> ChartEngine<R> {
    pub(super) fn plugin_context(&self) -> PluginContext {
        PluginContext {
            viewport: self.viewport.snapshot(),
            bar_count: self.bars.len(),
            price_range: self.price_range(),
            interaction_mode: self.interaction.mode(),
            selected: self.interaction.selected_id().cloned(),
            active_tool: self.session.active_tool(),
            session_phase: self.session.phase(),
            drawing_count: self.drawings.len(),
        }
    }

    pub(super) fn emit_plugin_event(&mut self, event: PluginEvent) {
        if self.plugins.is_empty() {
            return;
        }
        let context = self.plugin_context();
        for plugin in &mut self.plugins {
            plugin.on_event(&event, &context);
        }
    }

    pub(super) fn emit_viewport_changed(&mut self) {
        let snapshot = self.viewport.snapshot();
        self.emit_plugin_event(PluginEvent::ViewportChanged {
            start_index: snapshot.start_index,
            end_index: snapshot.end_index,
            scale: snapshot.scale,
        });
    }

    pub(super) fn emit_tool_changed(&mut self) {
        self.emit_plugin_event(PluginEvent::ToolChanged {
            tool: self.session.active_tool(),
            vertical_line_mode: self.session.vertical_line_mode(),
        });
    }
}
