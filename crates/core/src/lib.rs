//! Core types for streaming top-N selection.

use serde::{Deserialize, Serialize};

pub type Width = usize;

/// Descending-ordered view of the retained set at one point in a
/// sequence. Owned: later accumulator updates do not affect it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Snapshot<T> {
    values: Vec<T>,
}

impl<T> Snapshot<T> {
    pub fn empty() -> Self {
        Self { values: Vec::new() }
    }

    /// Retained values, largest first.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Largest retained value.
    pub fn max(&self) -> Option<&T> {
        self.values.first()
    }

    /// Smallest retained value, the current eviction candidate.
    pub fn floor(&self) -> Option<&T> {
        self.values.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }

    pub fn into_values(self) -> Vec<T> {
        self.values
    }
}

impl<T: Ord> Snapshot<T> {
    /// Build a snapshot from values in any order.
    pub fn from_unordered(mut values: Vec<T>) -> Self {
        values.sort_unstable_by(|a, b| b.cmp(a));
        Self { values }
    }
}

impl<T: Serialize> Snapshot<T> {
    pub fn to_json_line(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string(&self.values)?)
    }
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Self::empty()
    }
}

#[derive(thiserror::Error, Debug)]
pub enum CoreError {
    #[error("snapshot encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

pub mod accumulator;

pub use accumulator::{Admission, Phase, TopN};
