use std::collections::HashMap;
use std::hash::Hash;

use crate::layer::model::Layer;

/// Maps each source to the layer it belongs to.
///
/// Implementations may read live viewer state, but must return a stable answer for the duration
/// of one [`AccumIndex::build`](crate::AccumIndex::build) call, which queries each source exactly
/// once. A change of grouping is applied by building a new index.
pub trait LayerAssigner<S> {
    /// Layer of `source`.
    fn layer_of(&self, source: &S) -> Layer;
}

impl<S, F> LayerAssigner<S> for F
where
    F: Fn(&S) -> Layer,
{
    fn layer_of(&self, source: &S) -> Layer {
        self(source)
    }
}

/// Puts every source into the same layer.
///
/// With an opaque, non-skipped layer this reduces the engine to a plain sum-and-clamp compositor.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SingleLayer(pub Layer);

impl<S> LayerAssigner<S> for SingleLayer {
    fn layer_of(&self, _source: &S) -> Layer {
        self.0
    }
}

/// Explicit source-to-layer table with a fallback for unlisted sources.
#[derive(Clone, Debug)]
pub struct GroupedLayers<S> {
    layers: HashMap<S, Layer>,
    fallback: Layer,
}

impl<S: Eq + Hash> GroupedLayers<S> {
    /// Empty table; every source maps to `fallback` until assigned.
    pub fn new(fallback: Layer) -> Self {
        Self {
            layers: HashMap::new(),
            fallback,
        }
    }

    /// Assign `source` to `layer`, returning the previous assignment if any.
    pub fn assign(&mut self, source: S, layer: Layer) -> Option<Layer> {
        self.layers.insert(source, layer)
    }

    /// Assign every source yielded by `sources` to `layer`.
    pub fn assign_all(&mut self, sources: impl IntoIterator<Item = S>, layer: Layer) {
        for s in sources {
            self.layers.insert(s, layer);
        }
    }

    /// Drop the explicit assignment of `source`.
    pub fn unassign(&mut self, source: &S) -> Option<Layer> {
        self.layers.remove(source)
    }

    /// Layer used for sources without an explicit assignment.
    pub fn fallback(&self) -> Layer {
        self.fallback
    }
}

impl<S: Eq + Hash> LayerAssigner<S> for GroupedLayers<S> {
    fn layer_of(&self, source: &S) -> Layer {
        self.layers.get(source).copied().unwrap_or(self.fallback)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layer/assign.rs"]
mod tests;
