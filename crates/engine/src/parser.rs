#![forbid(unsafe_code)]

use qm_core::{Geometry, GeometryError, Position};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Turns one row's geometry payload into a renderable geometry.
pub trait GeometryParser {
    fn parse(&self, payload: &Value) -> Result<Geometry, GeometryError>;
}

/// GeoJSON geometries or single features, given as an object or as its serialized text.
/// Coordinates are taken as already being in the map projection.
#[derive(Clone, Copy, Debug, Default)]
pub struct GeoJsonParser;

impl GeometryParser for GeoJsonParser {
    fn parse(&self, payload: &Value) -> Result<Geometry, GeometryError> {
        match payload {
            Value::String(text) => {
                let decoded: Value = serde_json::from_str(text)
                    .map_err(|err| GeometryError::InvalidJson(err.to_string()))?;
                match decoded {
                    Value::Object(obj) => parse_object(&obj),
                    _ => Err(GeometryError::NotAnObject),
                }
            }
            Value::Object(obj) => parse_object(obj),
            _ => Err(GeometryError::NotAnObject),
        }
    }
}

fn parse_object(obj: &Map<String, Value>) -> Result<Geometry, GeometryError> {
    let kind = obj
        .get("type")
        .and_then(Value::as_str)
        .ok_or(GeometryError::MissingType)?;
    match kind {
        "Feature" => match obj.get("geometry") {
            Some(Value::Object(geometry)) => parse_object(geometry),
            _ => Err(GeometryError::FeatureWithoutGeometry),
        },
        "GeometryCollection" => {
            let Some(Value::Array(items)) = obj.get("geometries") else {
                return Err(GeometryError::MissingCoordinates);
            };
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                let Value::Object(item) = item else {
                    return Err(GeometryError::NotAnObject);
                };
                out.push(parse_object(item)?);
            }
            Ok(Geometry::GeometryCollection(out))
        }
        "Point" => Ok(Geometry::Point(position(coordinates(obj)?)?)),
        "MultiPoint" => Ok(Geometry::MultiPoint(positions(coordinates(obj)?)?)),
        "LineString" => Ok(Geometry::LineString(positions(coordinates(obj)?)?)),
        "MultiLineString" => Ok(Geometry::MultiLineString(rings(coordinates(obj)?)?)),
        "Polygon" => Ok(Geometry::Polygon(rings(coordinates(obj)?)?)),
        "MultiPolygon" => {
            let raw: Vec<Vec<Vec<Vec<f64>>>> = coordinates(obj)?;
            let polygons = raw
                .into_iter()
                .map(rings)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Geometry::MultiPolygon(polygons))
        }
        other => Err(GeometryError::UnsupportedType(other.to_string())),
    }
}

fn coordinates<T: DeserializeOwned>(obj: &Map<String, Value>) -> Result<T, GeometryError> {
    let raw = obj
        .get("coordinates")
        .ok_or(GeometryError::MissingCoordinates)?;
    serde_json::from_value(raw.clone()).map_err(|_| GeometryError::InvalidCoordinates)
}

fn position(raw: Vec<f64>) -> Result<Position, GeometryError> {
    match raw.as_slice() {
        [x, y, ..] if x.is_finite() && y.is_finite() => Ok([*x, *y]),
        _ => Err(GeometryError::InvalidCoordinates),
    }
}

fn positions(raw: Vec<Vec<f64>>) -> Result<Vec<Position>, GeometryError> {
    raw.into_iter().map(position).collect()
}

fn rings(raw: Vec<Vec<Vec<f64>>>) -> Result<Vec<Vec<Position>>, GeometryError> {
    raw.into_iter().map(positions).collect()
}
