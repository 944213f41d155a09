use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::hash::Hash;

use crate::foundation::error::{StackcompError, StackcompResult};
use crate::source::classify::SourceClassifier;

/// Encode a transparency value as the packed sample of a companion raster.
///
/// Companion rasters travel through the same packed-color pipeline as color sources, so the
/// `f32` is stored bit-for-bit in the 32-bit sample rather than as channels.
pub fn float_to_channel_bits(alpha: f32) -> u32 {
    alpha.to_bits()
}

/// Decode a companion sample produced by [`float_to_channel_bits`].
pub fn channel_bits_to_float(bits: u32) -> f32 {
    f32::from_bits(bits)
}

/// Session-scoped table of transparency companions.
///
/// Owned by the display session that created the companions. Entries are added lazily while
/// sources are prepared and dropped all at once with [`invalidate`](Self::invalidate) when the
/// session ends. Any source registered as a companion counts as a transparency source.
#[derive(Clone, Debug)]
pub struct CompanionRegistry<S> {
    companions: HashMap<S, S>,
}

impl<S> Default for CompanionRegistry<S> {
    fn default() -> Self {
        Self {
            companions: HashMap::new(),
        }
    }
}

impl<S: Eq + Hash + Clone> CompanionRegistry<S> {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `companion` as the transparency companion of `source`.
    ///
    /// Returns the companion previously linked to `source`. A source cannot be its own companion.
    pub fn link(&mut self, source: S, companion: S) -> StackcompResult<Option<S>> {
        if source == companion {
            return Err(StackcompError::validation(
                "a source cannot be its own transparency companion",
            ));
        }
        Ok(self.companions.insert(source, companion))
    }

    /// Companion of `source`, creating and linking one with `make` on first request.
    pub fn companion_or_insert_with(
        &mut self,
        source: S,
        make: impl FnOnce(&S) -> S,
    ) -> StackcompResult<&S> {
        match self.companions.entry(source) {
            Entry::Occupied(e) => Ok(&*e.into_mut()),
            Entry::Vacant(e) => {
                let companion = make(e.key());
                if companion == *e.key() {
                    return Err(StackcompError::validation(
                        "a source cannot be its own transparency companion",
                    ));
                }
                Ok(&*e.insert(companion))
            }
        }
    }

    /// Companion of `source`, if linked.
    pub fn companion(&self, source: &S) -> Option<&S> {
        self.companions.get(source)
    }

    /// Remove the companion link of `source`.
    pub fn unlink(&mut self, source: &S) -> Option<S> {
        self.companions.remove(source)
    }

    /// Drop every link. Called when the owning display session ends.
    pub fn invalidate(&mut self) {
        if !self.companions.is_empty() {
            tracing::debug!(links = self.companions.len(), "invalidating companion registry");
        }
        self.companions.clear();
    }

    /// Number of linked sources.
    pub fn len(&self) -> usize {
        self.companions.len()
    }

    /// Return `true` when no source is linked.
    pub fn is_empty(&self) -> bool {
        self.companions.is_empty()
    }
}

impl<S: Eq + Hash + Clone> SourceClassifier<S> for CompanionRegistry<S> {
    fn is_transparency_source(&self, source: &S) -> bool {
        self.companions.values().any(|c| c == source)
    }

    fn has_transparency_companion(&self, source: &S) -> bool {
        self.companions.contains_key(source)
    }

    fn transparency_companion_of(&self, source: &S) -> Option<S> {
        self.companions.get(source).cloned()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/transparency.rs"]
mod tests;
