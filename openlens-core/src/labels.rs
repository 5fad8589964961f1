//! Ordered, duplicate-free label accumulation

use ahash::AHashSet;

/// Labels collected from detector output, in first-occurrence order.
///
/// A label is appended at most once per sequence; later sightings of the
/// same string are ignored. The live capture path keeps one sequence for
/// the whole session, the still-image path builds a fresh one per image.
#[derive(Debug, Clone, Default)]
pub struct LabelSequence {
    labels: Vec<String>,
    seen: AHashSet<String>,
}

impl LabelSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `label` unless it is already present. Returns whether the
    /// sequence grew.
    pub fn push(&mut self, label: impl Into<String>) -> bool {
        let label = label.into();
        if self.seen.contains(&label) {
            return false;
        }
        self.seen.insert(label.clone());
        self.labels.push(label);
        true
    }

    /// Fold one frame's labels into the sequence, in input order.
    pub fn extend_labels<I, S>(&mut self, labels: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for label in labels {
            self.push(label);
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// All labels joined with `", "`, in sequence order.
    pub fn join(&self) -> String {
        self.labels.join(", ")
    }

    /// Reset the sequence; used by the per-image entry point.
    pub fn clear(&mut self) {
        self.labels.clear();
        self.seen.clear();
    }
}

impl<S: Into<String>> FromIterator<S> for LabelSequence {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut labels = Self::new();
        labels.extend_labels(iter);
        labels
    }
}
