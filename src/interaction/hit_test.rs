use serde::{Deserialize, Serialize};

use crate::core::{Anchor, CoordinateTransform, distance_to_segment};
use crate::interaction::DragTarget;
use crate::objects::{ChartObject, ObjectId, ObjectKind};

/// Pixel tolerances used when picking objects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitTolerance {
    /// Half-size of the square region around each handle.
    pub handle_px: f64,
    /// Maximum distance from a body outline.
    pub body_px: f64,
}

impl Default for HitTolerance {
    fn default() -> Self {
        Self {
            handle_px: 10.0,
            body_px: 6.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitTarget {
    pub id: ObjectId,
    pub kind: ObjectKind,
    pub target: DragTarget,
}

/// Finds the drawing under `(x, y)`.
///
/// Kinds are scanned in [`ObjectKind::HIT_TEST_PRIORITY`] order and, inside a
/// kind, newest first. Each object tests its handles before its body. The first
/// match wins, so an earlier kind beats a later one regardless of recency.
#[must_use]
pub fn hit_test(
    objects: &[ChartObject],
    transform: &CoordinateTransform,
    x: f64,
    y: f64,
    tolerance: HitTolerance,
) -> Option<HitTarget> {
    ObjectKind::HIT_TEST_PRIORITY.iter().find_map(|kind| {
        objects
            .iter()
            .rev()
            .filter(|object| object.kind() == *kind)
            .find_map(|object| {
                hit_object(object, transform, x, y, tolerance).map(|target| HitTarget {
                    id: object.id().clone(),
                    kind: *kind,
                    target,
                })
            })
    })
}

/// Tests one object: start handle, end handle, then body.
#[must_use]
pub fn hit_object(
    object: &ChartObject,
    transform: &CoordinateTransform,
    x: f64,
    y: f64,
    tolerance: HitTolerance,
) -> Option<DragTarget> {
    if !object.kind().is_draggable() {
        return None;
    }

    let (start, end) = object.handles()?;
    if within_handle(transform, start, x, y, tolerance.handle_px) {
        return Some(DragTarget::Start);
    }
    if within_handle(transform, end, x, y, tolerance.handle_px) {
        return Some(DragTarget::End);
    }

    body_hit(object, transform, x, y, tolerance.body_px).then_some(DragTarget::Body)
}

fn within_handle(
    transform: &CoordinateTransform,
    anchor: Anchor,
    x: f64,
    y: f64,
    half_size: f64,
) -> bool {
    let (hx, hy) = transform.anchor_to_point(anchor);
    (x - hx).abs() <= half_size && (y - hy).abs() <= half_size
}

fn segment_distance(
    transform: &CoordinateTransform,
    a: Anchor,
    b: Anchor,
    x: f64,
    y: f64,
) -> f64 {
    let (x1, y1) = transform.anchor_to_point(a);
    let (x2, y2) = transform.anchor_to_point(b);
    distance_to_segment(x, y, x1, y1, x2, y2)
}

fn body_hit(
    object: &ChartObject,
    transform: &CoordinateTransform,
    x: f64,
    y: f64,
    tol: f64,
) -> bool {
    match object {
        ChartObject::TrendLine(line) => {
            segment_distance(transform, line.start, line.end, x, y) <= tol
        }
        ChartObject::Circle(circle) => {
            let (cx, cy) = transform.anchor_to_point(circle.center);
            (x - cx).hypot(y - cy) <= circle.radius_px(transform) + tol
        }
        ChartObject::Rectangle(rect) => {
            let (x1, y1) = transform.anchor_to_point(rect.corner1);
            let (x2, y2) = transform.anchor_to_point(rect.corner2);
            x >= x1.min(x2) - tol
                && x <= x1.max(x2) + tol
                && y >= y1.min(y2) - tol
                && y <= y1.max(y2) + tol
        }
        ChartObject::Fibonacci(fib) => {
            segment_distance(transform, fib.start, fib.end, x, y) <= tol
                || fib
                    .fan_targets()
                    .iter()
                    .any(|target| segment_distance(transform, fib.start, *target, x, y) <= tol)
        }
        ChartObject::Polyline(polyline) => polyline
            .points
            .windows(2)
            .any(|pair| segment_distance(transform, pair[0], pair[1], x, y) <= tol),
        ChartObject::VerticalLine(_)
        | ChartObject::SelectionRect(_)
        | ChartObject::Marker(_)
        | ChartObject::IndicatorLine(_) => false,
    }
}
