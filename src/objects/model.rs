use serde::{Deserialize, Serialize};

use crate::objects::{ChartObject, ObjectId, ObjectLayer};

/// Where a frame object came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectOrigin {
    /// Rebuilt from indicator output or UI state each frame.
    System,
    /// Persisted user drawing.
    User,
    /// In-progress drawing that follows the pointer.
    Preview,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameObject {
    pub object: ChartObject,
    pub layer: ObjectLayer,
    pub origin: ObjectOrigin,
    pub selected: bool,
}

impl FrameObject {
    #[must_use]
    pub fn new(object: ChartObject, origin: ObjectOrigin) -> Self {
        Self {
            layer: object.layer(),
            object,
            origin,
            selected: false,
        }
    }

    #[must_use]
    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

/// Everything painted above/below the price board for one frame.
///
/// Entries keep assembly order (system, user, preview); `in_paint_order`
/// groups them by layer without reordering inside a layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectModel {
    objects: Vec<FrameObject>,
}

impl ObjectModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, object: FrameObject) {
        self.objects.push(object);
    }

    pub fn extend(&mut self, objects: impl IntoIterator<Item = FrameObject>) {
        self.objects.extend(objects);
    }

    #[must_use]
    pub fn objects(&self) -> &[FrameObject] {
        &self.objects
    }

    pub fn layer(&self, layer: ObjectLayer) -> impl Iterator<Item = &FrameObject> {
        self.objects.iter().filter(move |object| object.layer == layer)
    }

    #[must_use]
    pub fn count_in_layer(&self, layer: ObjectLayer) -> usize {
        self.layer(layer).count()
    }

    pub fn in_paint_order(&self) -> impl Iterator<Item = &FrameObject> {
        ObjectLayer::all()
            .into_iter()
            .flat_map(move |layer| self.layer(layer))
    }

    #[must_use]
    pub fn find(&self, id: &ObjectId) -> Option<&FrameObject> {
        self.objects.iter().find(|object| object.object.id() == id)
    }

    #[must_use]
    pub fn preview(&self) -> Option<&FrameObject> {
        self.objects
            .iter()
            .find(|object| object.origin == ObjectOrigin::Preview)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
