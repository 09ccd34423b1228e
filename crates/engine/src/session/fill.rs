#![forbid(unsafe_code)]

use super::{Session, restyle};
use crate::EngineError;
use qm_core::{Color, LayerId, ShapeKind, ShapeProfile};

impl Session {
    /// Sets the layer's base fill. Features owned by a filter keep that filter's color.
    pub fn set_layer_color(&mut self, id: LayerId, color: Color) -> Result<(), EngineError> {
        let owners = self
            .filters_for(id)
            .map(|filter| (filter.id, filter.color))
            .collect::<Vec<_>>();
        let layer = self.styled_layer_mut(id)?;
        layer.color = color;
        restyle(&mut layer.features, |feature| {
            let fill = feature
                .filter_id
                .and_then(|owner| owners.iter().find(|(fid, _)| *fid == owner))
                .map(|(_, color)| *color)
                .unwrap_or(color);
            feature.style.with_fill(fill)
        });
        self.redraw(id);
        Ok(())
    }

    /// Marker radius; the input control keeps it within `MARKER_SIZE_RANGE`.
    pub fn set_layer_size(&mut self, id: LayerId, size: f64) -> Result<(), EngineError> {
        if !size.is_finite() {
            return Err(EngineError::InvalidInput("size must be a finite number"));
        }
        let layer = self.styled_layer_mut(id)?;
        layer.size = size;
        let marker = ShapeProfile::resolve(layer.shape, size);
        restyle(&mut layer.features, |feature| {
            feature.style.with_marker(Some(marker))
        });
        self.redraw(id);
        Ok(())
    }

    pub fn set_layer_shape(&mut self, id: LayerId, shape: ShapeKind) -> Result<(), EngineError> {
        let layer = self.styled_layer_mut(id)?;
        layer.shape = shape;
        let marker = ShapeProfile::resolve(shape, layer.size);
        restyle(&mut layer.features, |feature| {
            feature.style.with_marker(Some(marker))
        });
        self.redraw(id);
        Ok(())
    }

    /// Shape by name. An unrecognized name changes nothing and returns `Ok(false)`.
    pub fn set_layer_shape_named(&mut self, id: LayerId, name: &str) -> Result<bool, EngineError> {
        self.styled_layer_mut(id)?;
        match ShapeKind::parse(name) {
            Some(shape) => {
                self.set_layer_shape(id, shape)?;
                Ok(true)
            }
            None => {
                tracing::debug!(layer = %id, shape = name, "unknown shape; marker unchanged");
                Ok(false)
            }
        }
    }
}
