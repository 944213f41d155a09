/// Answers the per-source transparency questions needed to build an index.
pub trait SourceClassifier<S> {
    /// `true` when `source` only carries an opacity mask and is never drawn directly.
    fn is_transparency_source(&self, source: &S) -> bool;

    /// `true` when `source` declares a transparency companion.
    fn has_transparency_companion(&self, source: &S) -> bool;

    /// The declared transparency companion of `source`, if any.
    fn transparency_companion_of(&self, source: &S) -> Option<S>;
}

/// Classifier for source lists that carry no transparency masks at all.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTransparency;

impl<S> SourceClassifier<S> for NoTransparency {
    fn is_transparency_source(&self, _source: &S) -> bool {
        false
    }

    fn has_transparency_companion(&self, _source: &S) -> bool {
        false
    }

    fn transparency_companion_of(&self, _source: &S) -> Option<S> {
        None
    }
}

/// Per-source transparency facts, indexed by position in the source list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceLinks {
    is_transparency: Vec<bool>,
    linked: Vec<Option<usize>>,
}

impl SourceLinks {
    /// Number of classified sources.
    pub fn len(&self) -> usize {
        self.linked.len()
    }

    /// Return `true` when no sources were classified.
    pub fn is_empty(&self) -> bool {
        self.linked.is_empty()
    }

    /// `true` when source `i` is itself a transparency source.
    pub fn is_transparency_source(&self, i: usize) -> bool {
        self.is_transparency[i]
    }

    /// `true` when source `i` has a companion present in the list.
    pub fn has_linked_transparency(&self, i: usize) -> bool {
        self.linked[i].is_some()
    }

    /// Position of the companion of source `i`, when present in the list.
    pub fn linked_index(&self, i: usize) -> Option<usize> {
        self.linked[i]
    }

    pub(crate) fn into_parts(self) -> (Vec<bool>, Vec<Option<usize>>) {
        (self.is_transparency, self.linked)
    }
}

/// Classify every source of `sources`.
///
/// Transparency sources are never paired with a companion. A declared companion that is not part
/// of `sources` is not an error: the source is treated as having no transparency.
pub fn classify<S, C>(sources: &[S], classifier: &C) -> SourceLinks
where
    S: PartialEq,
    C: SourceClassifier<S> + ?Sized,
{
    let mut is_transparency = vec![false; sources.len()];
    let mut linked = vec![None; sources.len()];

    for (i, source) in sources.iter().enumerate() {
        if classifier.is_transparency_source(source) {
            is_transparency[i] = true;
            continue;
        }
        if !classifier.has_transparency_companion(source) {
            continue;
        }
        let Some(companion) = classifier.transparency_companion_of(source) else {
            continue;
        };
        match sources.iter().position(|s| *s == companion) {
            Some(j) => linked[i] = Some(j),
            None => tracing::trace!(source = i, "transparency companion not in source list"),
        }
    }

    SourceLinks {
        is_transparency,
        linked,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/classify.rs"]
mod tests;
