use crate::core::{CoordinateTransform, PriceRange};
use crate::objects::{
    ChartObject, FrameObject, ObjectId, ObjectModel, ObjectOrigin, SelectionRect,
};
use crate::render::{RenderFrame, Renderer, UiState};

use super::ChartEngine;

impl<R: Renderer> ChartEngine<R> {
    /// Price span of the on-screen bars and indicator values, padded.
    #[must_use]
    pub fn price_range(&self) -> PriceRange {
        let (start, end) = self.viewport.data_range();
        let Some(range) = PriceRange::from_bars(&self.bars, start, end) else {
            return PriceRange::EMPTY;
        };
        let range = match self.indicators.visible_extent(start, end) {
            Some(extent) => range.including(extent.min).including(extent.max),
            None => range,
        };
        range.padded(self.config.price_padding_ratio)
    }

    #[must_use]
    pub fn coordinate_transform(&self) -> CoordinateTransform {
        CoordinateTransform::new(
            &self.viewport,
            self.config.viewport_tuning,
            self.surface,
            self.price_range(),
        )
    }

    /// Assembles this frame's objects: system, then user, then preview.
    ///
    /// Empty when no bars are loaded.
    #[must_use]
    pub fn build_object_model(&self) -> ObjectModel {
        let mut model = ObjectModel::new();
        if self.bars.is_empty() {
            return model;
        }

        let (start, end) = self.viewport.data_range();
        model.extend(
            self.overlays
                .build_system_objects(start, end)
                .into_iter()
                .map(|object| FrameObject::new(object, ObjectOrigin::System)),
        );

        let selected = self.interaction.selected_id();
        model.extend(self.drawings.iter().map(|object| {
            FrameObject::new(object.clone(), ObjectOrigin::User)
                .selected(Some(object.id()) == selected)
        }));

        if let Some(highlight) = selected
            .and_then(|id| self.drawings.get(id))
            .and_then(selection_highlight)
        {
            model.push(FrameObject::new(highlight, ObjectOrigin::System));
        }

        if let Some(draft) = self.session.preview_draft() {
            model.push(FrameObject::new(
                draft.into_object(ObjectId::preview()),
                ObjectOrigin::Preview,
            ));
        }
        model
    }

    #[must_use]
    pub fn build_render_frame(&self) -> RenderFrame {
        let (start, end) = self.viewport.data_range();
        let transform = self.coordinate_transform();
        RenderFrame {
            surface: self.surface,
            viewport: self.viewport.snapshot(),
            transform,
            price_range: transform.price_range,
            data_range: (start, end),
            bars: self.bars[start..end].to_vec(),
            objects: self.build_object_model(),
            ui: UiState {
                mode: self.interaction.mode(),
                selected: self.interaction.selected_id().cloned(),
                dragging: self
                    .interaction
                    .drag()
                    .map(|drag| (drag.id.clone(), drag.target)),
                cursor: self.interaction.cursor(),
                active_tool: self.session.active_tool(),
                vertical_line_mode: self.session.vertical_line_mode(),
                session_phase: self.session.phase(),
            },
            is_empty: self.bars.is_empty(),
        }
    }
}

fn selection_highlight(object: &ChartObject) -> Option<ChartObject> {
    let (min, max) = object.bounds()?;
    Some(ChartObject::SelectionRect(SelectionRect {
        id: ObjectId::new(format!("selection-{}", object.id())),
        target: object.id().clone(),
        min,
        max,
    }))
}
