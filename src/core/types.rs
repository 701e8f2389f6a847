use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::decimal_to_f64;
use crate::error::{ChartError, ChartResult};

/// Pixel size of the drawing surface handed to the engine each frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    #[must_use]
    pub fn width_px(self) -> f64 {
        f64::from(self.width)
    }

    #[must_use]
    pub fn height_px(self) -> f64 {
        f64::from(self.height)
    }
}

/// One immutable OHLCV record. `timestamp` is UTC milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    /// Builds a validated bar.
    ///
    /// Invariants:
    /// - all prices and the volume are finite
    /// - `low <= open <= high` and `low <= close <= high`
    /// - `volume >= 0`
    pub fn new(
        timestamp: i64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> ChartResult<Self> {
        if !open.is_finite()
            || !high.is_finite()
            || !low.is_finite()
            || !close.is_finite()
            || !volume.is_finite()
        {
            return Err(ChartError::InvalidData(
                "bar prices and volume must be finite".to_owned(),
            ));
        }
        if low > high {
            return Err(ChartError::InvalidData("bar low must be <= high".to_owned()));
        }
        if !(low..=high).contains(&open) || !(low..=high).contains(&close) {
            return Err(ChartError::InvalidData(
                "bar open and close must lie within low..=high".to_owned(),
            ));
        }
        if volume < 0.0 {
            return Err(ChartError::InvalidData("bar volume must be >= 0".to_owned()));
        }

        Ok(Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        })
    }

    /// Flat bar where every price equals `price`. Handy for synthetic series.
    #[must_use]
    pub fn flat(timestamp: i64, price: f64) -> Self {
        Self {
            timestamp,
            open: price,
            high: price,
            low: price,
            close: price,
            volume: 0.0,
        }
    }

    /// Converts strongly-typed temporal/decimal input into a validated bar.
    pub fn from_decimal_time(
        time: DateTime<Utc>,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: Decimal,
    ) -> ChartResult<Self> {
        Self::new(
            time.timestamp_millis(),
            decimal_to_f64(open, "open")?,
            decimal_to_f64(high, "high")?,
            decimal_to_f64(low, "low")?,
            decimal_to_f64(close, "close")?,
            decimal_to_f64(volume, "volume")?,
        )
    }

    /// Bar time as a UTC instant; `None` when out of chrono's range.
    #[must_use]
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }

    #[must_use]
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }
}

/// Cheap fingerprint used to detect a bar sequence that did not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BarSignature {
    pub len: usize,
    pub first_timestamp: Option<i64>,
    pub last_timestamp: Option<i64>,
}

impl BarSignature {
    #[must_use]
    pub fn of(bars: &[Bar]) -> Self {
        Self {
            len: bars.len(),
            first_timestamp: bars.first().map(|bar| bar.timestamp),
            last_timestamp: bars.last().map(|bar| bar.timestamp),
        }
    }
}

/// Chart-space coordinate used by every drawable object.
///
/// `index` is a bar index and may be fractional while a preview or drag is
/// interpolating between bars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub index: f64,
    pub price: f64,
}

impl Anchor {
    pub const EPSILON: f64 = 1e-9;

    #[must_use]
    pub const fn new(index: f64, price: f64) -> Self {
        Self { index, price }
    }

    /// Same bar index and price within floating epsilon.
    #[must_use]
    pub fn coincides_with(self, other: Anchor) -> bool {
        (self.index - other.index).abs() <= Self::EPSILON
            && (self.price - other.price).abs() <= Self::EPSILON * self.price.abs().max(1.0)
    }

    #[must_use]
    pub fn translated(self, index_delta: f64, price_delta: f64) -> Self {
        Self {
            index: self.index + index_delta,
            price: self.price + price_delta,
        }
    }

    #[must_use]
    pub fn with_index_clamped(self, bar_count: usize) -> Self {
        Self {
            index: clamp_index(self.index, bar_count),
            price: self.price,
        }
    }
}

/// Clamps a (possibly fractional) index into `[0, bar_count - 1]`.
#[must_use]
pub fn clamp_index(index: f64, bar_count: usize) -> f64 {
    if bar_count == 0 || !index.is_finite() {
        return 0.0;
    }
    index.clamp(0.0, (bar_count - 1) as f64)
}

#[cfg(test)]
mod tests {
    use super::{Anchor, Bar, BarSignature, clamp_index};

    #[test]
    fn signature_tracks_length_and_edges() {
        let bars = vec![Bar::flat(10, 1.0), Bar::flat(20, 1.0), Bar::flat(30, 1.0)];
        let signature = BarSignature::of(&bars);
        assert_eq!(signature.len, 3);
        assert_eq!(signature.first_timestamp, Some(10));
        assert_eq!(signature.last_timestamp, Some(30));
        assert_eq!(BarSignature::of(&[]).first_timestamp, None);
    }

    #[test]
    fn bar_rejects_inverted_range() {
        assert!(Bar::new(0, 1.0, 1.0, 2.0, 1.0, 0.0).is_err());
        assert!(Bar::new(0, 1.0, f64::NAN, 0.5, 1.0, 0.0).is_err());
    }

    #[test]
    fn anchors_coincide_within_epsilon() {
        let a = Anchor::new(12.0, 100.0);
        assert!(a.coincides_with(Anchor::new(12.0, 100.0 + 1e-12)));
        assert!(!a.coincides_with(Anchor::new(13.0, 100.0)));
    }

    #[test]
    fn clamp_index_handles_empty_sequences() {
        assert_eq!(clamp_index(5.0, 0), 0.0);
        assert_eq!(clamp_index(-3.0, 10), 0.0);
        assert_eq!(clamp_index(42.0, 10), 9.0);
    }
}
