use std::cmp::Ordering;

/// How the sources of one layer are combined before the layer is composited.
///
/// Only additive accumulation exists today. The tag is kept explicit on every [`Layer`] so new
/// modes can be added without changing how layers are described.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Channel-wise sum of all contributing sources.
    #[default]
    Sum,
}

/// Explicit stacking key of a layer. Lower keys render first (bottom).
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct LayerKey(pub i64);

/// A group of sources that are summed together and composited as one.
///
/// Two layers are the same layer exactly when their [`LayerKey`]s are equal. The remaining fields
/// are snapshotted per source when an [`AccumIndex`](crate::AccumIndex) is built.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Layer {
    /// Stacking position.
    pub key: LayerKey,
    /// Layer opacity; 1.0 is fully opaque, 0.0 fully transparent.
    pub opacity: f32,
    /// How sources within the layer are combined.
    pub blend_mode: BlendMode,
    /// Exclude every source of this layer from accumulation.
    pub skip: bool,
}

impl Default for Layer {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Layer {
    /// An opaque, visible [`BlendMode::Sum`] layer at stacking position `key`.
    pub fn new(key: i64) -> Self {
        Self {
            key: LayerKey(key),
            opacity: 1.0,
            blend_mode: BlendMode::Sum,
            skip: false,
        }
    }

    /// Replace the opacity.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Replace the blend mode.
    pub fn with_blend_mode(mut self, blend_mode: BlendMode) -> Self {
        self.blend_mode = blend_mode;
        self
    }

    /// Mark the layer as skipped.
    pub fn skipped(mut self) -> Self {
        self.skip = true;
        self
    }

    /// Stacking order relative to `other`.
    pub fn stacking_cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }

    /// Return `true` when both values describe the same layer.
    pub fn same_layer(&self, other: &Self) -> bool {
        self.stacking_cmp(other) == Ordering::Equal
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layer/model.rs"]
mod tests;
