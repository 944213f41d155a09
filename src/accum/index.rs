use crate::layer::assign::LayerAssigner;
use crate::layer::model::{BlendMode, Layer};
use crate::source::classify::{SourceClassifier, classify};

/// Per-source lookup tables for one render session.
///
/// Built once from the source list, a [`SourceClassifier`] and a [`LayerAssigner`], then only
/// read. All per-source tables are indexed by the source's position in the list it was built
/// from; [`sorted_order`](Self::sorted_order) lists those positions bottom layer first.
#[derive(Clone, Debug, Default)]
pub struct AccumIndex {
    pub(crate) sorted_order: Vec<usize>,
    pub(crate) boundary: Vec<bool>,
    pub(crate) is_transparency: Vec<bool>,
    pub(crate) linked: Vec<Option<usize>>,
    pub(crate) opacity: Vec<f32>,
    pub(crate) blend_mode: Vec<BlendMode>,
    pub(crate) skip: Vec<bool>,
    pub(crate) layer_count: usize,
}

impl AccumIndex {
    /// Build the tables for `sources`.
    ///
    /// `assigner` is queried exactly once per source. Sources are stably sorted by layer key, so
    /// sources sharing a layer keep their list order and stay contiguous.
    #[tracing::instrument(level = "debug", skip_all, fields(sources = sources.len()))]
    pub fn build<S, C, A>(sources: &[S], classifier: &C, assigner: &A) -> Self
    where
        S: PartialEq,
        C: SourceClassifier<S> + ?Sized,
        A: LayerAssigner<S> + ?Sized,
    {
        let n = sources.len();
        let layers: Vec<Layer> = sources.iter().map(|s| assigner.layer_of(s)).collect();

        let mut sorted_order: Vec<usize> = (0..n).collect();
        sorted_order.sort_by_key(|&i| layers[i].key);

        let mut boundary = vec![false; n];
        let mut layer_count = 0;
        for (k, &src) in sorted_order.iter().enumerate() {
            let last = match sorted_order.get(k + 1) {
                Some(&next) => !layers[src].same_layer(&layers[next]),
                None => true,
            };
            if last {
                boundary[src] = true;
                layer_count += 1;
            }
        }

        let (is_transparency, linked) = classify(sources, classifier).into_parts();

        let index = Self {
            sorted_order,
            boundary,
            is_transparency,
            linked,
            opacity: layers.iter().map(|l| l.opacity).collect(),
            blend_mode: layers.iter().map(|l| l.blend_mode).collect(),
            skip: layers.iter().map(|l| l.skip).collect(),
            layer_count,
        };
        tracing::debug!(
            layers = index.layer_count,
            linked = index.linked.iter().filter(|l| l.is_some()).count(),
            masks = index.is_transparency.iter().filter(|t| **t).count(),
            "built accumulation index"
        );
        index
    }

    /// Number of sources.
    pub fn len(&self) -> usize {
        self.sorted_order.len()
    }

    /// Return `true` when built from an empty source list.
    pub fn is_empty(&self) -> bool {
        self.sorted_order.is_empty()
    }

    /// Number of distinct layers.
    pub fn layer_count(&self) -> usize {
        self.layer_count
    }

    /// Source positions, bottom layer first.
    pub fn sorted_order(&self) -> &[usize] {
        &self.sorted_order
    }

    /// `true` when `source` is the last source of its layer in sorted order.
    pub fn is_layer_boundary(&self, source: usize) -> bool {
        self.boundary[source]
    }

    /// `true` when `source` only carries a transparency mask.
    pub fn is_transparency_source(&self, source: usize) -> bool {
        self.is_transparency[source]
    }

    /// `true` when `source` has a transparency companion in this list.
    pub fn has_linked_transparency(&self, source: usize) -> bool {
        self.linked[source].is_some()
    }

    /// Position of the transparency companion of `source`.
    pub fn linked_index(&self, source: usize) -> Option<usize> {
        self.linked[source]
    }

    /// Opacity of the layer `source` belongs to.
    pub fn opacity(&self, source: usize) -> f32 {
        self.opacity[source]
    }

    /// Blend mode of the layer `source` belongs to.
    pub fn blend_mode(&self, source: usize) -> BlendMode {
        self.blend_mode[source]
    }

    /// `true` when the layer `source` belongs to is skipped.
    pub fn skip(&self, source: usize) -> bool {
        self.skip[source]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/accum/index.rs"]
mod tests;
