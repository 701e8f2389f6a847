use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Anchor, CoordinateTransform};
use crate::interaction::{DragTarget, HitTarget};
use crate::objects::{ChartObject, ObjectId, ObjectKind};

/// How a body drag turns pointer motion into an anchor offset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragBodyMode {
    /// Offset measured from the grab point and applied to the anchors captured
    /// at gesture start. Rounding never accumulates.
    #[default]
    GrabOffset,
    /// Offset measured between consecutive move events and applied to the
    /// current anchors. Each step rounds the index delta independently.
    Incremental,
}

/// Active drag gesture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragState {
    pub id: ObjectId,
    pub kind: ObjectKind,
    pub target: DragTarget,
    pub last_pointer: (f64, f64),
    pub grab_pointer: (f64, f64),
    pub grab_anchors: SmallVec<[Anchor; 4]>,
    /// Whether any move event changed the object.
    pub moved: bool,
}

impl DragState {
    #[must_use]
    pub fn begin(hit: HitTarget, object: &ChartObject, x: f64, y: f64) -> Self {
        Self {
            id: hit.id,
            kind: hit.kind,
            target: hit.target,
            last_pointer: (x, y),
            grab_pointer: (x, y),
            grab_anchors: object.anchors(),
            moved: false,
        }
    }
}

/// Applies one pointer move to the dragged object.
///
/// Handle drags place that handle at the pointer; body drags translate every
/// anchor. Indices always end up in `[0, bar_count - 1]`. Returns `true` when
/// the object changed.
pub fn apply_drag_move(
    object: &mut ChartObject,
    drag: &mut DragState,
    transform: &CoordinateTransform,
    x: f64,
    y: f64,
    mode: DragBodyMode,
) -> bool {
    let before = object.anchors();
    match drag.target.handle_side() {
        Some(side) => {
            let anchor = Anchor::new(transform.x_to_index(x) as f64, transform.y_to_price(y));
            object.set_handle(side, anchor);
        }
        None => match mode {
            DragBodyMode::GrabOffset => {
                let (gx, gy) = drag.grab_pointer;
                let index_delta = transform.index_delta_for_dx(x - gx).round();
                let price_delta = transform.price_delta_for_dy(y - gy);
                object.assign_anchors(&drag.grab_anchors);
                object.translate(index_delta, price_delta);
            }
            DragBodyMode::Incremental => {
                let (lx, ly) = drag.last_pointer;
                let index_delta = transform.index_delta_for_dx(x - lx).round();
                let price_delta = transform.price_delta_for_dy(y - ly);
                object.translate(index_delta, price_delta);
            }
        },
    }
    object.clamp_indices(transform.bar_count);
    drag.last_pointer = (x, y);

    let changed = object.anchors() != before;
    drag.moved |= changed;
    changed
}
