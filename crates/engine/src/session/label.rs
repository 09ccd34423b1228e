#![forbid(unsafe_code)]

use super::{Session, restyle};
use crate::EngineError;
use qm_core::{Color, Info, LabelStyle, LayerId};

impl Session {
    /// Grows or shrinks every feature's label font by `delta` px (never below 1px).
    pub fn set_label_font(&mut self, id: LayerId, delta: i32) -> Result<(), EngineError> {
        let layer = self.styled_layer_mut(id)?;
        restyle(&mut layer.features, |feature| {
            let label = feature.style.label();
            feature.style.with_label(LabelStyle {
                font: label.font.adjusted(delta),
                ..label.clone()
            })
        });
        if let Some(first) = layer.features.first() {
            layer.label_font = first.style.label().font.clone();
        }
        self.redraw(id);
        Ok(())
    }

    pub fn set_label_color(&mut self, id: LayerId, color: Color) -> Result<(), EngineError> {
        let layer = self.styled_layer_mut(id)?;
        layer.label_color = color;
        restyle(&mut layer.features, |feature| {
            feature.style.with_label(LabelStyle {
                color,
                ..feature.style.label().clone()
            })
        });
        self.redraw(id);
        Ok(())
    }

    /// Chooses the attribute shown as label text. `None` or an empty name clears labels.
    pub fn set_label_field(&mut self, id: LayerId, field: Option<&str>) -> Result<(), EngineError> {
        let field = field.map(str::trim).filter(|f| !f.is_empty());
        let layer = self.styled_layer_mut(id)?;
        layer.label_field = field.map(str::to_string);
        restyle(&mut layer.features, |feature| {
            feature.style.with_label(LabelStyle {
                text: label_text(&feature.info, field),
                ..feature.style.label().clone()
            })
        });
        self.redraw(id);
        Ok(())
    }
}

fn label_text(info: &Info, field: Option<&str>) -> String {
    field
        .and_then(|field| info.get(field))
        .and_then(|value| value.display_text())
        .unwrap_or_default()
}
