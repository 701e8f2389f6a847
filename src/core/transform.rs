use serde::{Deserialize, Serialize};

use crate::core::{Anchor, Bar, SurfaceSize, Viewport, ViewportTuning};

/// Price interval mapped onto the surface height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    /// Range used when nothing is on screen.
    pub const EMPTY: Self = Self { min: 0.0, max: 1.0 };

    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Fits low/high of `bars[start..end]` (clamped to the slice).
    ///
    /// Returns `None` when the range is empty.
    #[must_use]
    pub fn from_bars(bars: &[Bar], start: usize, end: usize) -> Option<Self> {
        let end = end.min(bars.len());
        let start = start.min(end);
        bars[start..end].iter().fold(None, |range: Option<Self>, bar| {
            Some(match range {
                Some(range) => Self::new(range.min.min(bar.low), range.max.max(bar.high)),
                None => Self::new(bar.low, bar.high),
            })
        })
    }

    /// Extends the range to cover `value`; non-finite values are ignored.
    #[must_use]
    pub fn including(self, value: f64) -> Self {
        if !value.is_finite() {
            return self;
        }
        Self::new(self.min.min(value), self.max.max(value))
    }

    /// Pads both ends by `ratio` of the span.
    #[must_use]
    pub fn padded(self, ratio: f64) -> Self {
        let pad = (self.max - self.min) * ratio.max(0.0);
        Self::new(self.min - pad, self.max + pad)
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn is_flat(self) -> bool {
        self.span() == 0.0
    }
}

/// Pure mapping between chart space (bar index, price) and surface pixels.
///
/// Bars are laid out right-to-left from `end_index`, whose slot ends at the
/// right edge of the drawable region (`surface_width - reserved_margin`).
/// Everything here is total: out-of-range input is clamped, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateTransform {
    pub start_index: usize,
    pub end_index: usize,
    pub bar_count: usize,
    pub base_bar_width_px: f64,
    pub scale: f64,
    pub bar_spacing_px: f64,
    pub reserved_margin_px: f64,
    pub surface_width: f64,
    pub surface_height: f64,
    pub price_range: PriceRange,
}

impl CoordinateTransform {
    #[must_use]
    pub fn new(
        viewport: &Viewport,
        tuning: ViewportTuning,
        surface: SurfaceSize,
        price_range: PriceRange,
    ) -> Self {
        Self {
            start_index: viewport.start_index(),
            end_index: viewport.end_index(),
            bar_count: viewport.bar_count(),
            base_bar_width_px: tuning.base_bar_width_px,
            scale: viewport.scale(),
            bar_spacing_px: tuning.bar_spacing_px,
            reserved_margin_px: tuning.reserved_margin_px,
            surface_width: surface.width_px(),
            surface_height: surface.height_px(),
            price_range,
        }
    }

    #[must_use]
    pub fn bar_width_px(&self) -> f64 {
        self.base_bar_width_px * self.scale
    }

    /// Horizontal distance between two consecutive bar slots.
    #[must_use]
    pub fn unit_px(&self) -> f64 {
        self.bar_width_px() + self.bar_spacing_px
    }

    #[must_use]
    pub fn drawable_width(&self) -> f64 {
        (self.surface_width - self.reserved_margin_px).max(0.0)
    }

    /// Left edge of the slot occupied by `index`.
    #[must_use]
    pub fn index_to_x(&self, index: f64) -> f64 {
        self.drawable_width() - (self.end_index as f64 - index) * self.unit_px()
    }

    #[must_use]
    pub fn bar_center_x(&self, index: f64) -> f64 {
        self.index_to_x(index) + self.unit_px() / 2.0
    }

    /// Exact inverse of [`Self::index_to_x`], neither rounded nor clamped.
    #[must_use]
    pub fn x_to_fractional_index(&self, x: f64) -> f64 {
        self.end_index as f64 - (self.drawable_width() - x) / self.unit_px()
    }

    /// Nearest bar index under `x`, clamped to `[0, bar_count - 1]`.
    #[must_use]
    pub fn x_to_index(&self, x: f64) -> usize {
        if self.bar_count == 0 {
            return 0;
        }
        let rounded = self.x_to_fractional_index(x).round();
        if !rounded.is_finite() || rounded <= 0.0 {
            return 0;
        }
        (rounded as usize).min(self.bar_count - 1)
    }

    #[must_use]
    pub fn price_to_y(&self, price: f64) -> f64 {
        let height = self.surface_height;
        if self.price_range.is_flat() {
            return height / 2.0;
        }
        height - ((price - self.price_range.min) / self.price_range.span()) * height
    }

    #[must_use]
    pub fn y_to_price(&self, y: f64) -> f64 {
        let height = self.surface_height;
        if self.price_range.is_flat() || height <= 0.0 {
            return self.price_range.min;
        }
        let y = if y.is_finite() { y.clamp(0.0, height) } else { height };
        self.price_range.min + ((height - y) / height) * self.price_range.span()
    }

    /// Price change represented by a vertical pixel delta (down is negative).
    #[must_use]
    pub fn price_delta_for_dy(&self, dy: f64) -> f64 {
        if self.surface_height <= 0.0 {
            return 0.0;
        }
        -dy / self.surface_height * self.price_range.span()
    }

    /// Bar-index change represented by a horizontal pixel delta.
    #[must_use]
    pub fn index_delta_for_dx(&self, dx: f64) -> f64 {
        dx / self.unit_px()
    }

    #[must_use]
    pub fn anchor_to_point(&self, anchor: Anchor) -> (f64, f64) {
        (self.index_to_x(anchor.index), self.price_to_y(anchor.price))
    }

    /// Anchor under a screen point, snapped to the nearest bar.
    #[must_use]
    pub fn point_to_anchor(&self, x: f64, y: f64) -> Anchor {
        Anchor::new(self.x_to_index(x) as f64, self.y_to_price(y))
    }
}

#[cfg(test)]
mod tests {
    use super::PriceRange;
    use crate::core::Bar;

    #[test]
    fn price_range_fits_requested_slice_only() {
        let bars = vec![
            Bar::new(0, 5.0, 9.0, 1.0, 5.0, 0.0).expect("bar"),
            Bar::new(1, 5.0, 6.0, 4.0, 5.0, 0.0).expect("bar"),
            Bar::new(2, 5.0, 7.0, 3.0, 5.0, 0.0).expect("bar"),
        ];
        let range = PriceRange::from_bars(&bars, 1, 10).expect("range");
        assert_eq!(range, PriceRange::new(3.0, 7.0));
        assert!(PriceRange::from_bars(&bars, 3, 3).is_none());
    }

    #[test]
    fn padding_and_inclusion_extend_range() {
        let range = PriceRange::new(10.0, 20.0).padded(0.1).including(f64::NAN);
        assert_eq!(range, PriceRange::new(9.0, 21.0));
        assert_eq!(range.including(30.0).max, 30.0);
    }
}
