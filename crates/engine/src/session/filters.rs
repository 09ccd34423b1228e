#![forbid(unsafe_code)]

use super::Session;
use crate::{EngineError, Filter, Layer};
use qm_core::{Color, FilterId, FilterType, FilterValue, LayerId, Operator};

/// Outcome of one recomposition pass over a layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RecomposeSummary {
    pub filters: usize,
    /// Sum of every filter's matches; a feature matched twice counts twice.
    pub matches: usize,
    /// Features whose fill is owned by a filter after tie-breaking.
    pub owned: usize,
}

impl Session {
    /// Appends an empty `=` filter whose color starts as the layer's base color.
    pub fn add_filter(&mut self, layer: LayerId) -> Result<FilterId, EngineError> {
        let color = self
            .layer(layer)
            .map(Layer::color)
            .ok_or(EngineError::UnknownLayer(layer))?;
        let id = self.filter_ids.next_filter();
        self.filters.push(Filter {
            id,
            layer,
            label: None,
            value_type: None,
            value: None,
            operator: Operator::default(),
            color,
            filtered: Vec::new(),
        });
        tracing::debug!(filter = %id, layer = %layer, "filter added");
        self.recompose(layer)?;
        Ok(id)
    }

    /// Attribute to test. `None` or an empty name unsets it.
    pub fn set_filter_label(
        &mut self,
        id: FilterId,
        label: Option<&str>,
    ) -> Result<RecomposeSummary, EngineError> {
        let label = label.map(str::trim).filter(|l| !l.is_empty()).map(str::to_string);
        self.edit_filter(id, |filter| filter.label = label)
    }

    pub fn set_filter_operator(
        &mut self,
        id: FilterId,
        operator: Operator,
    ) -> Result<RecomposeSummary, EngineError> {
        self.edit_filter(id, |filter| filter.operator = operator)
    }

    /// Raw operand text; numeric input is stored as a number, empty input clears it.
    pub fn set_filter_value(
        &mut self,
        id: FilterId,
        raw: &str,
    ) -> Result<RecomposeSummary, EngineError> {
        let value = FilterValue::coerce(raw);
        self.edit_filter(id, |filter| filter.value = value)
    }

    pub fn set_filter_color(
        &mut self,
        id: FilterId,
        color: Color,
    ) -> Result<RecomposeSummary, EngineError> {
        self.edit_filter(id, |filter| filter.color = color)
    }

    /// Removes a filter and recomposes its former layer. Unknown ids are a no-op.
    pub fn delete_filter(&mut self, id: FilterId) -> Result<bool, EngineError> {
        let Some(index) = self.filters.iter().position(|filter| filter.id == id) else {
            return Ok(false);
        };
        let removed = self.filters.remove(index);
        tracing::debug!(filter = %id, layer = %removed.layer, "filter deleted");
        if self.layer(removed.layer).is_some() {
            self.recompose(removed.layer)?;
        }
        Ok(true)
    }

    /// Recomputes every feature's owning filter and fill from the layer's filter list.
    ///
    /// Each filter's matches are re-evaluated from its predicate, every feature is reset to
    /// unowned, then filters are applied in list order so that when several match, the one
    /// added last owns the feature. Fills resolve to the owner's color or the layer's base color.
    pub fn recompose(&mut self, id: LayerId) -> Result<RecomposeSummary, EngineError> {
        let Session {
            layers,
            filters,
            renderer,
            ..
        } = self;
        let layer = layers
            .iter_mut()
            .find(|layer| layer.id == id)
            .ok_or(EngineError::UnknownLayer(id))?;

        let mut summary = RecomposeSummary::default();
        for filter in filters.iter_mut().filter(|filter| filter.layer == id) {
            let predicate = filter.predicate();
            let matched = layer
                .features
                .iter()
                .enumerate()
                .filter(|(_, feature)| predicate.matches(&feature.info))
                .map(|(index, _)| index)
                .collect::<Vec<_>>();
            summary.filters += 1;
            summary.matches += matched.len();
            filter.filtered = matched;
        }

        for feature in &mut layer.features {
            feature.filter_id = None;
        }
        for filter in filters.iter().filter(|filter| filter.layer == id) {
            for &index in &filter.filtered {
                if let Some(feature) = layer.features.get_mut(index) {
                    feature.filter_id = Some(filter.id);
                }
            }
        }

        for feature in &mut layer.features {
            let fill = match feature.filter_id {
                Some(owner) => filters
                    .iter()
                    .find(|filter| filter.id == owner)
                    .map(|filter| filter.color)
                    .unwrap_or(layer.color),
                None => layer.color,
            };
            if feature.filter_id.is_some() {
                summary.owned += 1;
            }
            feature.style = feature.style.with_fill(fill);
        }

        tracing::debug!(
            layer = %id,
            filters = summary.filters,
            matches = summary.matches,
            owned = summary.owned,
            "layer recomposed"
        );
        renderer.redraw(layer);
        Ok(summary)
    }

    /// Applies one field edit, re-infers the operand type from the layer's first feature,
    /// and recomposes the filter's layer.
    fn edit_filter(
        &mut self,
        id: FilterId,
        edit: impl FnOnce(&mut Filter),
    ) -> Result<RecomposeSummary, EngineError> {
        let filter = self.filter_mut(id)?;
        edit(&mut *filter);
        let layer_id = filter.layer;
        let label = filter.label.clone();

        let value_type = self.sample_type(layer_id, label.as_deref());
        self.filter_mut(id)?.value_type = value_type;

        tracing::debug!(filter = %id, layer = %layer_id, "filter edited");
        self.recompose(layer_id)
    }

    fn sample_type(&self, layer: LayerId, label: Option<&str>) -> Option<FilterType> {
        let first = self.layer(layer)?.features.first()?;
        FilterType::infer(first.info.get(label?))
    }
}
