use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Anchor, CoordinateTransform, clamp_index};
use crate::objects::ObjectLayer;

/// Opaque, stable object identifier. Never reused within a store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    pub const PREVIEW: &'static str = "preview";

    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn preview() -> Self {
        Self(Self::PREVIEW.to_owned())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric suffix of `"<prefix>-<n>"` ids, if any.
    #[must_use]
    pub fn serial(&self) -> Option<u64> {
        self.0
            .rsplit_once('-')
            .and_then(|(_, tail)| tail.parse().ok())
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    VerticalLine,
    TrendLine,
    Circle,
    Rectangle,
    Fibonacci,
    Polyline,
    SelectionRect,
    Marker,
    IndicatorLine,
}

impl ObjectKind {
    /// Kinds considered by drag hit-testing, highest priority first.
    pub const HIT_TEST_PRIORITY: [ObjectKind; 5] = [
        ObjectKind::TrendLine,
        ObjectKind::Circle,
        ObjectKind::Rectangle,
        ObjectKind::Fibonacci,
        ObjectKind::Polyline,
    ];

    #[must_use]
    pub const fn id_prefix(self) -> &'static str {
        match self {
            ObjectKind::VerticalLine => "vline",
            ObjectKind::TrendLine => "trend",
            ObjectKind::Circle => "circle",
            ObjectKind::Rectangle => "rect",
            ObjectKind::Fibonacci => "fib",
            ObjectKind::Polyline => "poly",
            ObjectKind::SelectionRect => "selection",
            ObjectKind::Marker => "marker",
            ObjectKind::IndicatorLine => "indicator",
        }
    }

    /// Kinds a user can create and persist.
    #[must_use]
    pub const fn is_user_drawing(self) -> bool {
        matches!(
            self,
            ObjectKind::VerticalLine
                | ObjectKind::TrendLine
                | ObjectKind::Circle
                | ObjectKind::Rectangle
                | ObjectKind::Fibonacci
                | ObjectKind::Polyline
        )
    }

    #[must_use]
    pub fn is_draggable(self) -> bool {
        Self::HIT_TEST_PRIORITY.contains(&self)
    }
}

/// Which of the two handles of a line-like object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleSide {
    Start,
    End,
}

pub const FIBONACCI_LEVEL_COUNT: usize = 7;

/// Retracement ratios drawn by the Fibonacci fan.
pub const FIBONACCI_RATIOS: [f64; FIBONACCI_LEVEL_COUNT] =
    [0.0, 0.236, 0.382, 0.5, 0.618, 0.786, 1.0];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerticalLine {
    pub id: ObjectId,
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendLine {
    pub id: ObjectId,
    pub start: Anchor,
    pub end: Anchor,
}

/// Circle given by its center and a point on the rim; the pixel radius
/// follows zoom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub id: ObjectId,
    pub center: Anchor,
    pub rim: Anchor,
}

impl Circle {
    /// Radius in chart space: the rim's bar offset and price offset from the
    /// center. Survives zoom and body drags unchanged.
    #[must_use]
    pub fn radius(&self) -> Anchor {
        Anchor::new(
            self.rim.index - self.center.index,
            self.rim.price - self.center.price,
        )
    }

    #[must_use]
    pub fn radius_px(&self, transform: &CoordinateTransform) -> f64 {
        let (cx, cy) = transform.anchor_to_point(self.center);
        let (rx, ry) = transform.anchor_to_point(self.rim);
        (rx - cx).hypot(ry - cy)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub id: ObjectId,
    pub corner1: Anchor,
    pub corner2: Anchor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fibonacci {
    pub id: ObjectId,
    pub start: Anchor,
    pub end: Anchor,
}

impl Fibonacci {
    #[must_use]
    pub fn level_price(&self, ratio: f64) -> f64 {
        self.end.price + (self.start.price - self.end.price) * ratio
    }

    /// Far ends of the fan rays, one per ratio, on the vertical through `end`.
    #[must_use]
    pub fn fan_targets(&self) -> [Anchor; FIBONACCI_LEVEL_COUNT] {
        FIBONACCI_RATIOS.map(|ratio| Anchor::new(self.end.index, self.level_price(ratio)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub id: ObjectId,
    pub points: Vec<Anchor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkerStyle {
    WavePeak,
    WaveTrough,
    BuySignal,
    SellSignal,
}

/// System marker derived from indicator output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub id: ObjectId,
    pub anchor: Anchor,
    pub style: MarkerStyle,
    pub label: Option<String>,
    pub layer: ObjectLayer,
}

/// Indicator-derived line, e.g. one ray of a detected trend fan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorLine {
    pub id: ObjectId,
    pub start: Anchor,
    pub end: Anchor,
}

/// Highlight box around the currently selected drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionRect {
    pub id: ObjectId,
    pub target: ObjectId,
    pub min: Anchor,
    pub max: Anchor,
}

/// Everything that can appear in the object model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartObject {
    VerticalLine(VerticalLine),
    TrendLine(TrendLine),
    Circle(Circle),
    Rectangle(Rectangle),
    Fibonacci(Fibonacci),
    Polyline(Polyline),
    SelectionRect(SelectionRect),
    Marker(Marker),
    IndicatorLine(IndicatorLine),
}

impl ChartObject {
    #[must_use]
    pub fn id(&self) -> &ObjectId {
        match self {
            ChartObject::VerticalLine(o) => &o.id,
            ChartObject::TrendLine(o) => &o.id,
            ChartObject::Circle(o) => &o.id,
            ChartObject::Rectangle(o) => &o.id,
            ChartObject::Fibonacci(o) => &o.id,
            ChartObject::Polyline(o) => &o.id,
            ChartObject::SelectionRect(o) => &o.id,
            ChartObject::Marker(o) => &o.id,
            ChartObject::IndicatorLine(o) => &o.id,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ObjectKind {
        match self {
            ChartObject::VerticalLine(_) => ObjectKind::VerticalLine,
            ChartObject::TrendLine(_) => ObjectKind::TrendLine,
            ChartObject::Circle(_) => ObjectKind::Circle,
            ChartObject::Rectangle(_) => ObjectKind::Rectangle,
            ChartObject::Fibonacci(_) => ObjectKind::Fibonacci,
            ChartObject::Polyline(_) => ObjectKind::Polyline,
            ChartObject::SelectionRect(_) => ObjectKind::SelectionRect,
            ChartObject::Marker(_) => ObjectKind::Marker,
            ChartObject::IndicatorLine(_) => ObjectKind::IndicatorLine,
        }
    }

    #[must_use]
    pub fn layer(&self) -> ObjectLayer {
        match self {
            ChartObject::Marker(marker) => marker.layer,
            ChartObject::IndicatorLine(_) => ObjectLayer::AboveIndicators,
            ChartObject::VerticalLine(_)
            | ChartObject::TrendLine(_)
            | ChartObject::Circle(_)
            | ChartObject::Rectangle(_)
            | ChartObject::Fibonacci(_)
            | ChartObject::Polyline(_)
            | ChartObject::SelectionRect(_) => ObjectLayer::Interaction,
        }
    }

    /// Start/end handles of line-like objects.
    #[must_use]
    pub fn handles(&self) -> Option<(Anchor, Anchor)> {
        match self {
            ChartObject::TrendLine(o) => Some((o.start, o.end)),
            ChartObject::Circle(o) => Some((o.center, o.rim)),
            ChartObject::Rectangle(o) => Some((o.corner1, o.corner2)),
            ChartObject::Fibonacci(o) => Some((o.start, o.end)),
            ChartObject::Polyline(o) => match (o.points.first(), o.points.last()) {
                (Some(first), Some(last)) if o.points.len() >= 2 => Some((*first, *last)),
                _ => None,
            },
            ChartObject::VerticalLine(_)
            | ChartObject::SelectionRect(_)
            | ChartObject::Marker(_)
            | ChartObject::IndicatorLine(_) => None,
        }
    }

    /// Every anchor of the object, in declaration order.
    #[must_use]
    pub fn anchors(&self) -> SmallVec<[Anchor; 4]> {
        match self {
            ChartObject::VerticalLine(_) => SmallVec::new(),
            ChartObject::TrendLine(o) => SmallVec::from_slice(&[o.start, o.end]),
            ChartObject::Circle(o) => SmallVec::from_slice(&[o.center, o.rim]),
            ChartObject::Rectangle(o) => SmallVec::from_slice(&[o.corner1, o.corner2]),
            ChartObject::Fibonacci(o) => SmallVec::from_slice(&[o.start, o.end]),
            ChartObject::Polyline(o) => o.points.iter().copied().collect(),
            ChartObject::SelectionRect(o) => SmallVec::from_slice(&[o.min, o.max]),
            ChartObject::Marker(o) => SmallVec::from_slice(&[o.anchor]),
            ChartObject::IndicatorLine(o) => SmallVec::from_slice(&[o.start, o.end]),
        }
    }

    fn for_each_anchor_mut(&mut self, mut apply: impl FnMut(&mut Anchor)) {
        match self {
            ChartObject::VerticalLine(_) => {}
            ChartObject::TrendLine(o) => {
                apply(&mut o.start);
                apply(&mut o.end);
            }
            ChartObject::Circle(o) => {
                apply(&mut o.center);
                apply(&mut o.rim);
            }
            ChartObject::Rectangle(o) => {
                apply(&mut o.corner1);
                apply(&mut o.corner2);
            }
            ChartObject::Fibonacci(o) => {
                apply(&mut o.start);
                apply(&mut o.end);
            }
            ChartObject::Polyline(o) => o.points.iter_mut().for_each(apply),
            ChartObject::SelectionRect(o) => {
                apply(&mut o.min);
                apply(&mut o.max);
            }
            ChartObject::Marker(o) => apply(&mut o.anchor),
            ChartObject::IndicatorLine(o) => {
                apply(&mut o.start);
                apply(&mut o.end);
            }
        }
    }

    /// Moves one handle to `anchor`. Returns `false` for objects without handles.
    pub fn set_handle(&mut self, side: HandleSide, anchor: Anchor) -> bool {
        let slot = match (self, side) {
            (ChartObject::TrendLine(o), HandleSide::Start) => &mut o.start,
            (ChartObject::TrendLine(o), HandleSide::End) => &mut o.end,
            (ChartObject::Circle(o), HandleSide::Start) => &mut o.center,
            (ChartObject::Circle(o), HandleSide::End) => &mut o.rim,
            (ChartObject::Rectangle(o), HandleSide::Start) => &mut o.corner1,
            (ChartObject::Rectangle(o), HandleSide::End) => &mut o.corner2,
            (ChartObject::Fibonacci(o), HandleSide::Start) => &mut o.start,
            (ChartObject::Fibonacci(o), HandleSide::End) => &mut o.end,
            (ChartObject::Polyline(o), HandleSide::Start) if o.points.len() >= 2 => {
                &mut o.points[0]
            }
            (ChartObject::Polyline(o), HandleSide::End) if o.points.len() >= 2 => {
                let last = o.points.len() - 1;
                &mut o.points[last]
            }
            _ => return false,
        };
        *slot = anchor;
        true
    }

    /// Translates every anchor by the same chart-space delta.
    pub fn translate(&mut self, index_delta: f64, price_delta: f64) {
        self.for_each_anchor_mut(|anchor| *anchor = anchor.translated(index_delta, price_delta));
    }

    /// Overwrites anchors in order; used to re-apply a captured shape.
    pub fn assign_anchors(&mut self, anchors: &[Anchor]) {
        let mut source = anchors.iter();
        self.for_each_anchor_mut(|anchor| {
            if let Some(next) = source.next() {
                *anchor = *next;
            }
        });
    }

    pub fn clamp_indices(&mut self, bar_count: usize) {
        self.for_each_anchor_mut(|anchor| anchor.index = clamp_index(anchor.index, bar_count));
    }

    /// Chart-space bounding box over all anchors.
    #[must_use]
    pub fn bounds(&self) -> Option<(Anchor, Anchor)> {
        let mut anchors = self.anchors().into_iter();
        let first = anchors.next()?;
        let (min, max) = anchors.fold((first, first), |(min, max), anchor| {
            (
                Anchor::new(min.index.min(anchor.index), min.price.min(anchor.price)),
                Anchor::new(max.index.max(anchor.index), max.price.max(anchor.price)),
            )
        });
        let (min, max) = match self {
            ChartObject::Fibonacci(fib) => fib.fan_targets().iter().fold((min, max), |acc, t| {
                (
                    Anchor::new(acc.0.index, acc.0.price.min(t.price)),
                    Anchor::new(acc.1.index, acc.1.price.max(t.price)),
                )
            }),
            _ => (min, max),
        };
        Some((min, max))
    }
}

/// A user shape before the store assigns it an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShapeDraft {
    VerticalLine { timestamp: i64 },
    TrendLine { start: Anchor, end: Anchor },
    Circle { center: Anchor, rim: Anchor },
    Rectangle { corner1: Anchor, corner2: Anchor },
    Fibonacci { start: Anchor, end: Anchor },
    Polyline { points: Vec<Anchor> },
}

impl ShapeDraft {
    #[must_use]
    pub fn kind(&self) -> ObjectKind {
        match self {
            ShapeDraft::VerticalLine { .. } => ObjectKind::VerticalLine,
            ShapeDraft::TrendLine { .. } => ObjectKind::TrendLine,
            ShapeDraft::Circle { .. } => ObjectKind::Circle,
            ShapeDraft::Rectangle { .. } => ObjectKind::Rectangle,
            ShapeDraft::Fibonacci { .. } => ObjectKind::Fibonacci,
            ShapeDraft::Polyline { .. } => ObjectKind::Polyline,
        }
    }

    #[must_use]
    pub fn into_object(self, id: ObjectId) -> ChartObject {
        match self {
            ShapeDraft::VerticalLine { timestamp } => {
                ChartObject::VerticalLine(VerticalLine { id, timestamp })
            }
            ShapeDraft::TrendLine { start, end } => {
                ChartObject::TrendLine(TrendLine { id, start, end })
            }
            ShapeDraft::Circle { center, rim } => ChartObject::Circle(Circle { id, center, rim }),
            ShapeDraft::Rectangle { corner1, corner2 } => ChartObject::Rectangle(Rectangle {
                id,
                corner1,
                corner2,
            }),
            ShapeDraft::Fibonacci { start, end } => {
                ChartObject::Fibonacci(Fibonacci { id, start, end })
            }
            ShapeDraft::Polyline { points } => ChartObject::Polyline(Polyline { id, points }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ChartObject, HandleSide, ObjectId, ObjectKind, ShapeDraft};
    use crate::core::Anchor;

    fn trend() -> ChartObject {
        ShapeDraft::TrendLine {
            start: Anchor::new(1.0, 10.0),
            end: Anchor::new(5.0, 20.0),
        }
        .into_object(ObjectId::new("trend-1"))
    }

    #[test]
    fn serial_parses_numeric_suffix() {
        assert_eq!(ObjectId::new("trend-42").serial(), Some(42));
        assert_eq!(ObjectId::preview().serial(), None);
    }

    #[test]
    fn circle_radius_is_kept_by_translation() {
        let mut object = ShapeDraft::Circle {
            center: Anchor::new(10.0, 100.0),
            rim: Anchor::new(13.0, 104.0),
        }
        .into_object(ObjectId::new("circle-1"));
        object.translate(5.0, -20.0);

        let ChartObject::Circle(circle) = object else {
            panic!("expected a circle");
        };
        assert_eq!(circle.center, Anchor::new(15.0, 80.0));
        assert_eq!(circle.radius(), Anchor::new(3.0, 4.0));
    }

    #[test]
    fn translate_moves_all_anchors() {
        let mut object = trend();
        object.translate(2.0, -1.0);
        assert_eq!(
            object.handles(),
            Some((Anchor::new(3.0, 9.0), Anchor::new(7.0, 19.0)))
        );
    }

    #[test]
    fn set_handle_only_touches_one_side() {
        let mut object = trend();
        assert!(object.set_handle(HandleSide::End, Anchor::new(9.0, 1.0)));
        assert_eq!(
            object.handles(),
            Some((Anchor::new(1.0, 10.0), Anchor::new(9.0, 1.0)))
        );
    }

    #[test]
    fn vertical_lines_are_not_draggable() {
        assert!(!ObjectKind::VerticalLine.is_draggable());
        assert!(ObjectKind::Polyline.is_draggable());
    }

    #[test]
    fn polyline_json_is_tagged_by_type() {
        let object = ShapeDraft::Polyline {
            points: vec![Anchor::new(0.0, 1.0), Anchor::new(1.0, 2.0)],
        }
        .into_object(ObjectId::new("poly-3"));
        let json = serde_json::to_string(&object).expect("serialize");
        assert!(json.contains("\"type\":\"polyline\""));
        let back: ChartObject = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, object);
    }
}
