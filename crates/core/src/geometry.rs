#![forbid(unsafe_code)]

/// `[x, y]` in the map's projection. Extra ordinates (z, m) are dropped on decode.
pub type Position = [f64; 2];

#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Point(Position),
    MultiPoint(Vec<Position>),
    LineString(Vec<Position>),
    MultiLineString(Vec<Vec<Position>>),
    Polygon(Vec<Vec<Position>>),
    MultiPolygon(Vec<Vec<Vec<Position>>>),
    GeometryCollection(Vec<Geometry>),
}

impl Geometry {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Point(_) => "Point",
            Self::MultiPoint(_) => "MultiPoint",
            Self::LineString(_) => "LineString",
            Self::MultiLineString(_) => "MultiLineString",
            Self::Polygon(_) => "Polygon",
            Self::MultiPolygon(_) => "MultiPolygon",
            Self::GeometryCollection(_) => "GeometryCollection",
        }
    }

    /// `[min_x, min_y, max_x, max_y]`, or `None` when the geometry has no positions.
    pub fn bbox(&self) -> Option<[f64; 4]> {
        let mut acc: Option<[f64; 4]> = None;
        self.for_each_position(&mut |[x, y]| {
            acc = Some(match acc {
                None => [x, y, x, y],
                Some([x0, y0, x1, y1]) => [x0.min(x), y0.min(y), x1.max(x), y1.max(y)],
            });
        });
        acc
    }

    fn for_each_position(&self, f: &mut impl FnMut(Position)) {
        match self {
            Self::Point(p) => f(*p),
            Self::MultiPoint(ps) | Self::LineString(ps) => ps.iter().copied().for_each(f),
            Self::MultiLineString(rings) | Self::Polygon(rings) => {
                rings.iter().flatten().copied().for_each(f)
            }
            Self::MultiPolygon(polys) => polys.iter().flatten().flatten().copied().for_each(f),
            Self::GeometryCollection(items) => {
                for item in items {
                    item.for_each_position(f);
                }
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GeometryError {
    NotAnObject,
    MissingType,
    UnsupportedType(String),
    MissingCoordinates,
    InvalidCoordinates,
    FeatureWithoutGeometry,
    InvalidJson(String),
}

impl GeometryError {
    pub fn message(&self) -> String {
        match self {
            Self::NotAnObject => "geometry payload must be a JSON object".to_string(),
            Self::MissingType => "geometry payload has no \"type\"".to_string(),
            Self::UnsupportedType(kind) => format!("unsupported geometry type: {kind}"),
            Self::MissingCoordinates => "geometry has no \"coordinates\"".to_string(),
            Self::InvalidCoordinates => "geometry coordinates are malformed".to_string(),
            Self::FeatureWithoutGeometry => "feature has a null geometry".to_string(),
            Self::InvalidJson(detail) => format!("geometry payload is not valid JSON: {detail}"),
        }
    }
}
