#![forbid(unsafe_code)]

use qm_core::{FilterId, LayerId};

#[derive(Debug)]
pub enum EngineError {
    Io(std::io::Error),
    Sql(rusqlite::Error),
    InvalidInput(&'static str),
    UnknownLayer(LayerId),
    UnknownFilter(FilterId),
    /// Style mutators read their template from the first feature; a layer without one is rejected.
    EmptyLayer(LayerId),
    Geometry {
        row: usize,
        message: String,
    },
    /// A row whose attribute columns differ from the first row's.
    Schema {
        row: usize,
        message: String,
    },
    Config(String),
}

impl EngineError {
    /// Stable machine-readable code for tool responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io(_) | Self::Sql(_) => "STORE_ERROR",
            Self::InvalidInput(_) | Self::Config(_) => "INVALID_INPUT",
            Self::UnknownLayer(_) | Self::UnknownFilter(_) => "UNKNOWN_ID",
            Self::EmptyLayer(_) => "PRECONDITION_FAILED",
            Self::Geometry { .. } => "GEOMETRY",
            Self::Schema { .. } => "SCHEMA_MISMATCH",
        }
    }
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io: {err}"),
            Self::Sql(err) => write!(f, "sqlite: {err}"),
            Self::InvalidInput(message) => write!(f, "invalid input: {message}"),
            Self::UnknownLayer(id) => write!(f, "unknown layer (id={id})"),
            Self::UnknownFilter(id) => write!(f, "unknown filter (id={id})"),
            Self::EmptyLayer(id) => write!(f, "layer has no features (id={id})"),
            Self::Geometry { row, message } => {
                write!(f, "geometry payload rejected (row={row}): {message}")
            }
            Self::Schema { row, message } => {
                write!(f, "row columns differ from the first row (row={row}): {message}")
            }
            Self::Config(message) => write!(f, "config: {message}"),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<std::io::Error> for EngineError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<rusqlite::Error> for EngineError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sql(value)
    }
}
