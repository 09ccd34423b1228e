#![forbid(unsafe_code)]

use crate::color::Color;
use crate::shape::ShapeProfile;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

/// CSS-like `"<n>px <family>"` font, e.g. `12px sans-serif`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelFont {
    size_px: u32,
    family: String,
}

impl LabelFont {
    pub const MIN_SIZE_PX: u32 = 1;

    pub fn new(size_px: u32, family: impl Into<String>) -> Self {
        Self {
            size_px: size_px.max(Self::MIN_SIZE_PX),
            family: family.into(),
        }
    }

    pub fn parse(value: &str) -> Result<Self, LabelFontError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(LabelFontError::Empty);
        }
        let (size, family) = match value.split_once(char::is_whitespace) {
            Some((size, family)) => (size, family.trim()),
            None => (value, ""),
        };
        let Some(raw) = size.strip_suffix("px") else {
            return Err(LabelFontError::MissingPx);
        };
        let size_px = raw
            .parse::<f64>()
            .map_err(|_| LabelFontError::InvalidSize)?;
        if !size_px.is_finite() || size_px < 0.0 {
            return Err(LabelFontError::InvalidSize);
        }
        if family.is_empty() {
            return Err(LabelFontError::MissingFamily);
        }
        Ok(Self::new(size_px.round() as u32, family))
    }

    pub fn size_px(&self) -> u32 {
        self.size_px
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn adjusted(&self, delta: i32) -> Self {
        let size = i64::from(self.size_px) + i64::from(delta);
        let size = size.clamp(i64::from(Self::MIN_SIZE_PX), i64::from(u32::MAX)) as u32;
        Self::new(size, self.family.clone())
    }
}

impl std::fmt::Display for LabelFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}px {}", self.size_px, self.family)
    }
}

impl Serialize for LabelFont {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LabelFont {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        LabelFont::parse(&raw).map_err(|err| serde::de::Error::custom(err.message()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LabelFontError {
    Empty,
    MissingPx,
    InvalidSize,
    MissingFamily,
}

impl LabelFontError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "font must not be empty",
            Self::MissingPx => "font size must be given in px",
            Self::InvalidSize => "font size is not a valid number",
            Self::MissingFamily => "font family is missing",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabelStyle {
    pub text: String,
    pub font: LabelFont,
    pub color: Color,
}

/// A feature's complete visual style. Never edited in place: every change builds a new value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Style {
    fill: Color,
    stroke: Stroke,
    marker: Option<ShapeProfile>,
    label: LabelStyle,
}

impl Style {
    pub fn new(
        fill: Color,
        stroke: Stroke,
        marker: Option<ShapeProfile>,
        label: LabelStyle,
    ) -> Self {
        Self {
            fill,
            stroke,
            marker,
            label,
        }
    }

    pub fn fill(&self) -> Color {
        self.fill
    }

    pub fn stroke(&self) -> Stroke {
        self.stroke
    }

    pub fn marker(&self) -> Option<&ShapeProfile> {
        self.marker.as_ref()
    }

    pub fn label(&self) -> &LabelStyle {
        &self.label
    }

    pub fn with_fill(&self, fill: Color) -> Self {
        Self {
            fill,
            ..self.clone()
        }
    }

    pub fn with_marker(&self, marker: Option<ShapeProfile>) -> Self {
        Self {
            marker,
            ..self.clone()
        }
    }

    pub fn with_stroke(&self, stroke: Stroke) -> Self {
        Self {
            stroke,
            ..self.clone()
        }
    }

    pub fn with_label(&self, label: LabelStyle) -> Self {
        Self {
            label,
            ..self.clone()
        }
    }
}
