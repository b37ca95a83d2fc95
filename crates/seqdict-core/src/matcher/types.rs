use std::ops::Range;

use serde::Serialize;

/// An exact occurrence of a stored key in a queried sequence.
///
/// `value` is `None` for gap segments produced by `segment`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Match<T, V> {
    pub key: Vec<T>,
    pub value: Option<V>,
    /// Start position (token index, inclusive)
    pub start: usize,
    /// End position (token index, exclusive)
    pub end: usize,
}

impl<T, V> Match<T, V> {
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn is_gap(&self) -> bool {
        self.value.is_none()
    }
}

/// An approximate occurrence with its total edit cost.
///
/// A single-key match has no `components`. A cover built from several
/// entries lists them in order; its `key` is their concatenation and its
/// `value` is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApproxMatch<T, V> {
    pub key: Vec<T>,
    pub value: Option<V>,
    pub start: usize,
    pub end: usize,
    pub cost: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Match<T, V>>,
}

impl<T, V> ApproxMatch<T, V> {
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn is_exact(&self) -> bool {
        self.cost == 0
    }

    pub fn is_composite(&self) -> bool {
        !self.components.is_empty()
    }

    /// Values of the matched entries, in input order.
    pub fn values(&self) -> Vec<&V> {
        if self.components.is_empty() {
            self.value.iter().collect()
        } else {
            self.components
                .iter()
                .filter_map(|m| m.value.as_ref())
                .collect()
        }
    }
}
