#![forbid(unsafe_code)]

use crate::EngineError;
use qm_core::{Color, LabelFont, ShapeKind, Stroke};
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_GEOMETRY_KEY: &str = "geojson";
pub const DEFAULT_GEOMETRY_TYPE_KEY: &str = "geom_type";
pub const DEFAULT_MARKER_SIZE: f64 = 10.0;

/// Layer defaults and result-set conventions. Loaded from YAML; every key is optional.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Column holding the serialized GeoJSON payload.
    pub geometry_key: String,
    /// Computed geometry-type annotation column; dropped from feature info.
    pub geometry_type_key: String,
    pub default_color: Color,
    pub default_shape: ShapeKind,
    pub default_size: f64,
    pub default_stroke_color: Color,
    pub default_stroke_width: f64,
    pub default_label_color: Color,
    pub default_label_font: LabelFont,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            geometry_key: DEFAULT_GEOMETRY_KEY.to_string(),
            geometry_type_key: DEFAULT_GEOMETRY_TYPE_KEY.to_string(),
            default_color: Color::rgb(0x33, 0x99, 0xcc),
            default_shape: ShapeKind::Square,
            default_size: DEFAULT_MARKER_SIZE,
            default_stroke_color: Color::BLACK,
            default_stroke_width: 1.0,
            default_label_color: Color::BLACK,
            default_label_font: LabelFont::new(12, "sans-serif"),
        }
    }
}

impl EngineConfig {
    pub fn from_yaml_str(raw: &str) -> Result<Self, EngineError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self =
            serde_yaml::from_str(raw).map_err(|err| EngineError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&raw)
    }

    pub fn default_stroke(&self) -> Stroke {
        Stroke {
            color: self.default_stroke_color,
            width: self.default_stroke_width,
        }
    }

    fn validate(&self) -> Result<(), EngineError> {
        if self.geometry_key.trim().is_empty() {
            return Err(EngineError::Config(
                "geometry_key must not be empty".to_string(),
            ));
        }
        if !(self.default_size.is_finite() && self.default_size > 0.0) {
            return Err(EngineError::Config(
                "default_size must be a positive number".to_string(),
            ));
        }
        if !(self.default_stroke_width.is_finite() && self.default_stroke_width >= 0.0) {
            return Err(EngineError::Config(
                "default_stroke_width must be a non-negative number".to_string(),
            ));
        }
        Ok(())
    }
}
