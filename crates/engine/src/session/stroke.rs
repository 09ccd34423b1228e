#![forbid(unsafe_code)]

use super::{Session, restyle};
use crate::EngineError;
use qm_core::{Color, LayerId, Stroke};

impl Session {
    pub fn set_stroke_color(&mut self, id: LayerId, color: Color) -> Result<(), EngineError> {
        let layer = self.styled_layer_mut(id)?;
        let stroke = Stroke {
            color,
            width: layer.stroke.width,
        };
        apply_stroke(self, id, stroke)
    }

    /// Stroke width; the input control keeps it within `STROKE_WIDTH_RANGE`.
    pub fn set_stroke_width(&mut self, id: LayerId, width: f64) -> Result<(), EngineError> {
        if !width.is_finite() || width < 0.0 {
            return Err(EngineError::InvalidInput(
                "stroke width must be a non-negative number",
            ));
        }
        let layer = self.styled_layer_mut(id)?;
        let stroke = Stroke {
            color: layer.stroke.color,
            width,
        };
        apply_stroke(self, id, stroke)
    }
}

fn apply_stroke(session: &mut Session, id: LayerId, stroke: Stroke) -> Result<(), EngineError> {
    let layer = session.styled_layer_mut(id)?;
    layer.stroke = stroke;
    restyle(&mut layer.features, |feature| feature.style.with_stroke(stroke));
    session.redraw(id);
    Ok(())
}
