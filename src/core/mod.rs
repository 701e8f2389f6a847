pub mod primitives;
pub mod transform;
pub mod types;
pub mod viewport;

pub use primitives::distance_to_segment;
pub use transform::{CoordinateTransform, PriceRange};
pub use types::{Anchor, Bar, BarSignature, SurfaceSize, clamp_index};
pub use viewport::{DataUpdateOutcome, Viewport, ViewportSnapshot, ViewportTuning};
