#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_4;

/// Marker radius range offered by the size control. Not enforced here.
pub const MARKER_SIZE_RANGE: std::ops::RangeInclusive<f64> = 5.0..=15.0;
/// Stroke width range offered by the stroke control. Not enforced here.
pub const STROKE_WIDTH_RANGE: std::ops::RangeInclusive<f64> = 1.0..=5.0;

const CIRCLE_POINTS: u32 = 100;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Square,
    Triangle,
    Star,
    Circle,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 4] = [Self::Square, Self::Triangle, Self::Star, Self::Circle];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Square => "square",
            Self::Triangle => "triangle",
            Self::Star => "star",
            Self::Circle => "circle",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(value))
    }
}

/// Regular-polygon marker parameters (the shape of a point symbol).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeProfile {
    pub points: u32,
    pub radius: f64,
    pub rotation: f64,
    /// Inner radius; only stars have one.
    pub radius2: Option<f64>,
    pub angle: f64,
}

impl ShapeProfile {
    pub fn resolve(kind: ShapeKind, size: f64) -> Self {
        let base = Self {
            points: 0,
            radius: size,
            rotation: 0.0,
            radius2: None,
            angle: 0.0,
        };
        match kind {
            ShapeKind::Square => Self {
                points: 4,
                angle: FRAC_PI_4,
                ..base
            },
            ShapeKind::Triangle => Self {
                points: 3,
                rotation: FRAC_PI_4,
                ..base
            },
            ShapeKind::Star => Self {
                points: 5,
                radius2: Some(size / 3.0),
                ..base
            },
            ShapeKind::Circle => Self {
                points: CIRCLE_POINTS,
                ..base
            },
        }
    }

    /// Name-based lookup. An unrecognized name yields no profile; callers leave the marker as is.
    pub fn resolve_named(name: &str, size: f64) -> Option<Self> {
        ShapeKind::parse(name).map(|kind| Self::resolve(kind, size))
    }
}
