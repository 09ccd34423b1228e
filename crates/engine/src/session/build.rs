#![forbid(unsafe_code)]

use super::Session;
use crate::{EngineError, Feature, Layer, QueryOutcome};
use qm_core::{AttrValue, Info, LabelStyle, LayerId, ShapeProfile, Style};

impl Session {
    /// Turns a query result into a new layer appended to the session.
    ///
    /// `Ok(None)` when there is nothing to map: an error result, no rows, or no geometry
    /// column on the first row. A malformed payload on any row is an error, and so is a
    /// row whose attribute columns differ from the first row's. In every
    /// non-`Some` case the session is left untouched and no id is consumed.
    pub fn build_layer(
        &mut self,
        outcome: &QueryOutcome,
        query: &str,
    ) -> Result<Option<LayerId>, EngineError> {
        let rows = match outcome {
            QueryOutcome::Rows(rows) => rows,
            QueryOutcome::Error(text) => {
                tracing::debug!(error = %text, "query returned an error; no layer");
                return Ok(None);
            }
        };
        let Some(first) = rows.first() else {
            tracing::debug!("query returned no rows; no layer");
            return Ok(None);
        };

        let geometry_key = self.config.geometry_key.as_str();
        let type_key = self.config.geometry_type_key.as_str();
        if !first.contains_key(geometry_key) {
            tracing::debug!(geometry_key, "result has no geometry column; no layer");
            return Ok(None);
        }

        let columns = first
            .keys()
            .filter(|key| *key != geometry_key && *key != type_key)
            .map(str::to_string)
            .collect::<Vec<_>>();

        let marker = ShapeProfile::resolve(self.config.default_shape, self.config.default_size);
        let style = Style::new(
            self.config.default_color,
            self.config.default_stroke(),
            Some(marker),
            LabelStyle {
                text: String::new(),
                font: self.config.default_label_font.clone(),
                color: self.config.default_label_color,
            },
        );

        let mut features = Vec::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            let payload = match row.get(geometry_key) {
                Some(payload) if !payload.is_null() => payload,
                _ => {
                    tracing::warn!(row = index, "row has no geometry payload");
                    return Err(EngineError::Geometry {
                        row: index,
                        message: format!("missing \"{geometry_key}\" payload"),
                    });
                }
            };
            let geometry = self.parser.parse(payload).map_err(|err| {
                tracing::warn!(row = index, error = %err.message(), "geometry payload rejected");
                EngineError::Geometry {
                    row: index,
                    message: err.message(),
                }
            })?;
            let info = row
                .iter()
                .filter(|(key, _)| *key != geometry_key && *key != type_key)
                .map(|(key, value)| (key.to_string(), AttrValue::from_json(value)))
                .collect::<Info>();
            if let Some(message) = column_mismatch(&columns, &info) {
                tracing::warn!(row = index, %message, "row columns differ from the first row");
                return Err(EngineError::Schema {
                    row: index,
                    message,
                });
            }
            features.push(Feature {
                geometry,
                info,
                filter_id: None,
                style: style.clone(),
            });
        }

        let id = self.layer_ids.next_layer();
        self.layers.push(Layer {
            id,
            query: query.to_string(),
            shape: self.config.default_shape,
            size: self.config.default_size,
            color: self.config.default_color,
            stroke: self.config.default_stroke(),
            label_field: None,
            label_color: self.config.default_label_color,
            label_font: self.config.default_label_font.clone(),
            labels: columns,
            features,
        });
        tracing::debug!(layer = %id, features = rows.len(), "layer built");
        self.redraw(id);
        Ok(Some(id))
    }
}

/// Every feature of a layer carries the same `info` keys as the first row.
fn column_mismatch(columns: &[String], info: &Info) -> Option<String> {
    let missing = columns
        .iter()
        .filter(|column| !info.contains_key(column.as_str()))
        .map(String::as_str)
        .collect::<Vec<_>>();
    let extra = info
        .keys()
        .filter(|key| !columns.contains(key))
        .map(String::as_str)
        .collect::<Vec<_>>();
    match (missing.is_empty(), extra.is_empty()) {
        (true, true) => None,
        (false, true) => Some(format!("missing [{}]", missing.join(", "))),
        (true, false) => Some(format!("unexpected [{}]", extra.join(", "))),
        (false, false) => Some(format!(
            "missing [{}], unexpected [{}]",
            missing.join(", "),
            extra.join(", ")
        )),
    }
}
