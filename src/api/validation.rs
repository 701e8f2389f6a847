use crate::core::SurfaceSize;
use crate::error::{ChartError, ChartResult};
use crate::interaction::HitTolerance;

use super::ChartEngineConfig;

pub(super) fn validate_surface(surface: SurfaceSize) -> ChartResult<SurfaceSize> {
    if !surface.is_valid() {
        return Err(ChartError::InvalidViewport {
            width: surface.width,
            height: surface.height,
        });
    }
    Ok(surface)
}

pub(super) fn validate_hit_tolerance(tolerance: HitTolerance) -> ChartResult<HitTolerance> {
    if !tolerance.handle_px.is_finite() || tolerance.handle_px <= 0.0 {
        return Err(ChartError::InvalidData(
            "hit tolerance `handle_px` must be finite and > 0".to_owned(),
        ));
    }
    if !tolerance.body_px.is_finite() || tolerance.body_px <= 0.0 {
        return Err(ChartError::InvalidData(
            "hit tolerance `body_px` must be finite and > 0".to_owned(),
        ));
    }
    Ok(tolerance)
}

pub(super) fn validate_zoom_step_factor(factor: f64) -> ChartResult<f64> {
    if !factor.is_finite() || factor <= 1.0 {
        return Err(ChartError::InvalidData(
            "zoom step factor must be finite and > 1".to_owned(),
        ));
    }
    Ok(factor)
}

pub(super) fn validate_engine_config(config: ChartEngineConfig) -> ChartResult<ChartEngineConfig> {
    validate_surface(config.surface)?;
    config.viewport_tuning.validate()?;
    validate_hit_tolerance(config.hit_tolerance)?;
    validate_zoom_step_factor(config.zoom_step_factor)?;
    if config.keyboard_pan_bars == 0 {
        return Err(ChartError::InvalidData(
            "keyboard pan step must be >= 1 bar".to_owned(),
        ));
    }
    if !config.price_padding_ratio.is_finite() || config.price_padding_ratio < 0.0 {
        return Err(ChartError::InvalidData(
            "price padding ratio must be finite and >= 0".to_owned(),
        ));
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::validate_engine_config;
    use crate::api::ChartEngineConfig;
    use crate::core::SurfaceSize;
    use crate::error::ChartError;

    #[test]
    fn zero_sized_surface_is_an_invalid_viewport() {
        let config = ChartEngineConfig::new(SurfaceSize::new(0, 300));
        assert!(matches!(
            validate_engine_config(config),
            Err(ChartError::InvalidViewport { width: 0, height: 300 })
        ));
    }

    #[test]
    fn zoom_step_must_grow_the_scale() {
        let config = ChartEngineConfig::new(SurfaceSize::new(800, 600)).with_zoom_step_factor(1.0);
        assert!(matches!(
            validate_engine_config(config),
            Err(ChartError::InvalidData(_))
        ));
    }
}
