//! Drawable chart objects, their layers, and the user drawing store.

mod layer;
mod model;
mod shapes;
mod store;

pub use layer::{ObjectLayer, PaintPass};
pub use model::{FrameObject, ObjectModel, ObjectOrigin};
pub use shapes::{
    ChartObject, Circle, FIBONACCI_LEVEL_COUNT, FIBONACCI_RATIOS, Fibonacci, HandleSide,
    IndicatorLine, Marker, MarkerStyle, ObjectId, ObjectKind, Polyline, Rectangle,
    SelectionRect, ShapeDraft, TrendLine, VerticalLine,
};
pub use store::UserDrawingStore;
