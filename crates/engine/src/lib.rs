#![forbid(unsafe_code)]

//! Query-to-layer construction and attribute-filter styling.
//!
//! A [`Session`] owns every [`Layer`] and [`Filter`]. Layers are built from query results
//! that carry a GeoJSON column; style mutators and filter edits then restyle the layer's
//! features, and every filter edit recomposes the layer's fills from its filter list.

mod config;
mod error;
mod model;
mod parser;
mod query;
mod render;
mod session;
mod source;

pub use config::{DEFAULT_GEOMETRY_KEY, DEFAULT_GEOMETRY_TYPE_KEY, DEFAULT_MARKER_SIZE, EngineConfig};
pub use error::EngineError;
pub use model::{Feature, Filter, Layer};
pub use parser::{GeoJsonParser, GeometryParser};
pub use query::{QueryOutcome, QueryRow};
pub use render::{NoopRedraw, Redraw};
pub use session::{RecomposeSummary, Session};
pub use source::SqliteQuerySource;
