#![forbid(unsafe_code)]

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Accepts `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r,g,b)` and `rgba(r,g,b,a)` with `a` in 0..=1.
    pub fn parse(value: &str) -> Result<Self, ColorError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(ColorError::Empty);
        }
        if let Some(hex) = value.strip_prefix('#') {
            return parse_hex(hex);
        }
        let lower = value.to_ascii_lowercase();
        if let Some(body) = lower
            .strip_prefix("rgba(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_functional(body, true);
        }
        if let Some(body) = lower
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_functional(body, false);
        }
        Err(ColorError::UnknownFormat)
    }

    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Color::parse(&raw).map_err(|err| serde::de::Error::custom(err.message()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColorError {
    Empty,
    UnknownFormat,
    InvalidHex,
    InvalidComponent,
}

impl ColorError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "color must not be empty",
            Self::UnknownFormat => "color must be #hex, rgb() or rgba()",
            Self::InvalidHex => "color hex must have 3, 6 or 8 hex digits",
            Self::InvalidComponent => "color component out of range",
        }
    }
}

fn parse_hex(hex: &str) -> Result<Color, ColorError> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidHex);
    }
    let byte = |s: &str| u8::from_str_radix(s, 16).map_err(|_| ColorError::InvalidHex);
    match hex.len() {
        3 => {
            let mut out = [0u8; 3];
            for (slot, ch) in out.iter_mut().zip(hex.chars()) {
                let digit = ch.to_digit(16).ok_or(ColorError::InvalidHex)? as u8;
                *slot = digit * 17;
            }
            Ok(Color::rgb(out[0], out[1], out[2]))
        }
        6 => Ok(Color::rgb(byte(&hex[0..2])?, byte(&hex[2..4])?, byte(&hex[4..6])?)),
        8 => Ok(Color::rgba(
            byte(&hex[0..2])?,
            byte(&hex[2..4])?,
            byte(&hex[4..6])?,
            byte(&hex[6..8])?,
        )),
        _ => Err(ColorError::InvalidHex),
    }
}

fn parse_functional(body: &str, with_alpha: bool) -> Result<Color, ColorError> {
    let parts = body.split(',').map(str::trim).collect::<Vec<_>>();
    let expected = if with_alpha { 4 } else { 3 };
    if parts.len() != expected {
        return Err(ColorError::UnknownFormat);
    }
    let channel = |raw: &str| {
        raw.parse::<u8>()
            .map_err(|_| ColorError::InvalidComponent)
    };
    let r = channel(parts[0])?;
    let g = channel(parts[1])?;
    let b = channel(parts[2])?;
    if !with_alpha {
        return Ok(Color::rgb(r, g, b));
    }
    let alpha = parts[3]
        .parse::<f64>()
        .map_err(|_| ColorError::InvalidComponent)?;
    if !(0.0..=1.0).contains(&alpha) {
        return Err(ColorError::InvalidComponent);
    }
    Ok(Color::rgba(r, g, b, (alpha * 255.0).round() as u8))
}
