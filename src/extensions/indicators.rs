use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::{Anchor, PriceRange};
use crate::error::{ChartError, ChartResult};
use crate::objects::{ChartObject, IndicatorLine, Marker, MarkerStyle, ObjectId, ObjectLayer};

/// Named indicator series aligned with the bar sequence.
///
/// `NaN` marks an index where a series is undefined. Insertion order is kept
/// so renderers and snapshots see series in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorFeed {
    series: IndexMap<String, Vec<f64>>,
}

impl IndicatorFeed {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_series(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.insert(name, values);
        self
    }

    /// Inserts or replaces a series; returns the replaced values.
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<f64>) -> Option<Vec<f64>> {
        self.series.insert(name.into(), values)
    }

    pub fn remove(&mut self, name: &str) -> Option<Vec<f64>> {
        self.series.shift_remove(name)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[f64]> {
        self.series.get(name).map(Vec::as_slice)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Checks every series has exactly `bar_count` entries.
    pub fn validate_len(&self, bar_count: usize) -> ChartResult<()> {
        for (name, values) in &self.series {
            if values.len() != bar_count {
                return Err(ChartError::InvalidData(format!(
                    "indicator series `{name}` has {} values, expected {bar_count}",
                    values.len()
                )));
            }
        }
        Ok(())
    }

    /// Lowest and highest finite value across all series in `start..end`.
    #[must_use]
    pub fn visible_extent(&self, start: usize, end: usize) -> Option<PriceRange> {
        let values = self.series.values().flat_map(|values| {
            let end = end.min(values.len());
            values[start.min(end)..end]
                .iter()
                .copied()
                .filter(|value| value.is_finite())
        });
        let mut extent: Option<(OrderedFloat<f64>, OrderedFloat<f64>)> = None;
        for value in values.map(OrderedFloat) {
            extent = Some(match extent {
                Some((min, max)) => (min.min(value), max.max(value)),
                None => (value, value),
            });
        }
        let (min, max) = extent?;
        Some(PriceRange::new(min.0, max.0))
    }
}

/// Detected swing point of the wave filter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WavePoint {
    pub index: usize,
    pub price: f64,
    pub is_peak: bool,
}

/// One ray of a detected trend fan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendRay {
    pub start: Anchor,
    pub end: Anchor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalSide {
    Buy,
    Sell,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalPoint {
    pub index: usize,
    pub price: f64,
    pub side: SignalSide,
    #[serde(default)]
    pub label: Option<String>,
}

/// Pre-computed indicator decorations turned into system objects each frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorOverlays {
    #[serde(default)]
    pub wave_points: Vec<WavePoint>,
    #[serde(default)]
    pub trend_rays: Vec<TrendRay>,
    #[serde(default)]
    pub signals: Vec<SignalPoint>,
}

impl IndicatorOverlays {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.wave_points.is_empty() && self.trend_rays.is_empty() && self.signals.is_empty()
    }

    /// Builds system objects touching the window `start..end`.
    ///
    /// Ids derive from the source position (`wave-<bar>`, `signal-<bar>`,
    /// `trend-ray-<ordinal>`), so they are stable between rebuilds.
    #[must_use]
    pub fn build_system_objects(&self, start: usize, end: usize) -> Vec<ChartObject> {
        let in_window = |index: usize| index >= start && index < end;
        let mut objects = Vec::new();

        for signal in self.signals.iter().filter(|signal| in_window(signal.index)) {
            let style = match signal.side {
                SignalSide::Buy => MarkerStyle::BuySignal,
                SignalSide::Sell => MarkerStyle::SellSignal,
            };
            objects.push(ChartObject::Marker(Marker {
                id: ObjectId::new(format!("signal-{}", signal.index)),
                anchor: Anchor::new(signal.index as f64, signal.price),
                style,
                label: signal.label.clone(),
                layer: ObjectLayer::BelowIndicators,
            }));
        }

        for point in self.wave_points.iter().filter(|point| in_window(point.index)) {
            let style = if point.is_peak {
                MarkerStyle::WavePeak
            } else {
                MarkerStyle::WaveTrough
            };
            objects.push(ChartObject::Marker(Marker {
                id: ObjectId::new(format!("wave-{}", point.index)),
                anchor: Anchor::new(point.index as f64, point.price),
                style,
                label: None,
                layer: ObjectLayer::AboveIndicators,
            }));
        }

        let (start_f, end_f) = (start as f64, end as f64);
        for (ordinal, ray) in self.trend_rays.iter().enumerate() {
            let lo = ray.start.index.min(ray.end.index);
            let hi = ray.start.index.max(ray.end.index);
            if hi < start_f || lo >= end_f {
                continue;
            }
            objects.push(ChartObject::IndicatorLine(IndicatorLine {
                id: ObjectId::new(format!("trend-ray-{ordinal}")),
                start: ray.start,
                end: ray.end,
            }));
        }

        objects
    }
}
