#![forbid(unsafe_code)]

mod build;
mod fill;
mod filters;
mod label;
mod stroke;

pub use filters::RecomposeSummary;

use crate::{
    EngineConfig, EngineError, Feature, Filter, GeoJsonParser, GeometryParser, Layer, NoopRedraw,
    Redraw,
};
use qm_core::{FilterId, IdCounter, LayerId};

/// The single owner of every layer and filter. All writes go through `&mut self`,
/// and everything else refers to layers and filters by id.
pub struct Session {
    config: EngineConfig,
    layers: Vec<Layer>,
    filters: Vec<Filter>,
    layer_ids: IdCounter,
    filter_ids: IdCounter,
    parser: Box<dyn GeometryParser>,
    renderer: Box<dyn Redraw>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("layers", &self.layers.len())
            .field("filters", &self.filters.len())
            .field("next_layer_id", &self.layer_ids.peek())
            .field("next_filter_id", &self.filter_ids.peek())
            .finish()
    }
}

impl Session {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            layers: Vec::new(),
            filters: Vec::new(),
            layer_ids: IdCounter::default(),
            filter_ids: IdCounter::default(),
            parser: Box::new(GeoJsonParser),
            renderer: Box::new(NoopRedraw),
        }
    }

    pub fn with_parser(mut self, parser: impl GeometryParser + 'static) -> Self {
        self.parser = Box::new(parser);
        self
    }

    pub fn with_renderer(mut self, renderer: impl Redraw + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.id == id)
    }

    pub fn filter(&self, id: FilterId) -> Option<&Filter> {
        self.filters.iter().find(|filter| filter.id == id)
    }

    /// Filters attached to `layer`, in list order (oldest first).
    pub fn filters_for(&self, layer: LayerId) -> impl Iterator<Item = &Filter> {
        self.filters.iter().filter(move |filter| filter.layer == layer)
    }

    /// Removes the layer together with every filter attached to it. Unknown ids are a no-op.
    pub fn remove_layer(&mut self, id: LayerId) -> bool {
        let Some(index) = self.layer_index(id) else {
            return false;
        };
        self.layers.remove(index);
        let before = self.filters.len();
        self.filters.retain(|filter| filter.layer != id);
        tracing::debug!(
            layer = %id,
            filters_dropped = before - self.filters.len(),
            "layer removed"
        );
        true
    }

    fn layer_index(&self, id: LayerId) -> Option<usize> {
        self.layers.iter().position(|layer| layer.id == id)
    }

    fn layer_mut(&mut self, id: LayerId) -> Result<&mut Layer, EngineError> {
        self.layers
            .iter_mut()
            .find(|layer| layer.id == id)
            .ok_or(EngineError::UnknownLayer(id))
    }

    /// Mutators read the first feature as their template, so an empty layer fails fast.
    fn styled_layer_mut(&mut self, id: LayerId) -> Result<&mut Layer, EngineError> {
        let layer = self.layer_mut(id)?;
        if layer.features.is_empty() {
            return Err(EngineError::EmptyLayer(id));
        }
        Ok(layer)
    }

    fn filter_mut(&mut self, id: FilterId) -> Result<&mut Filter, EngineError> {
        self.filters
            .iter_mut()
            .find(|filter| filter.id == id)
            .ok_or(EngineError::UnknownFilter(id))
    }

    fn redraw(&self, id: LayerId) {
        if let Some(layer) = self.layer(id) {
            self.renderer.redraw(layer);
        }
    }
}

fn restyle(features: &mut [Feature], mut f: impl FnMut(&Feature) -> qm_core::Style) {
    for feature in features {
        feature.style = f(feature);
    }
}

#[cfg(test)]
mod tests;
