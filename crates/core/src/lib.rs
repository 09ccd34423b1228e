#![forbid(unsafe_code)]

pub mod color;
pub mod filter;
pub mod geometry;
pub mod ids;
pub mod shape;
pub mod style;
pub mod value;

pub use color::{Color, ColorError};
pub use filter::{FilterType, FilterValue, Operator, OperatorError, Predicate};
pub use geometry::{Geometry, GeometryError, Position};
pub use ids::{FilterId, IdCounter, LayerId};
pub use shape::{MARKER_SIZE_RANGE, STROKE_WIDTH_RANGE, ShapeKind, ShapeProfile};
pub use style::{LabelFont, LabelFontError, LabelStyle, Stroke, Style};
pub use value::{AttrValue, Info, format_number};
