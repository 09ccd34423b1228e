#![forbid(unsafe_code)]

use crate::Layer;

/// The rendering substrate. Called once per layer after its feature styles change.
pub trait Redraw {
    fn redraw(&self, layer: &Layer);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopRedraw;

impl Redraw for NoopRedraw {
    fn redraw(&self, _layer: &Layer) {}
}
