use std::collections::{BTreeMap, BTreeSet};

use super::model::{Dimension, SalesDataset, SalesRow};

// ---------------------------------------------------------------------------
// Filter predicate: which values are selected per dimension
// ---------------------------------------------------------------------------

/// Per-dimension selection state.
///
/// A row passes when its value for every dimension is in that dimension's
/// set. An empty set means nothing is selected, so nothing passes; values
/// that never occur in the dataset simply match no row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    selected: BTreeMap<Dimension, BTreeSet<String>>,
}

impl FilterSelection {
    /// Selection with every observed value chosen (i.e., show everything).
    pub fn all(dataset: &SalesDataset) -> Self {
        let selected = Dimension::ALL
            .iter()
            .map(|&dim| {
                let values: BTreeSet<String> = dataset.distinct_values(dim).iter().cloned().collect();
                (dim, values)
            })
            .collect();
        FilterSelection { selected }
    }

    /// Replace the chosen values of one dimension.
    pub fn with<I, S>(mut self, dim: Dimension, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected
            .insert(dim, values.into_iter().map(Into::into).collect());
        self
    }

    pub fn is_selected(&self, dim: Dimension, value: &str) -> bool {
        self.selected
            .get(&dim)
            .is_some_and(|set| set.contains(value))
    }

    pub fn set_selected(&mut self, dim: Dimension, value: &str, selected: bool) {
        let set = self.selected.entry(dim).or_default();
        if selected {
            set.insert(value.to_string());
        } else {
            set.remove(value);
        }
    }

    /// Flip a single value in or out of a dimension's set.
    pub fn toggle(&mut self, dim: Dimension, value: &str) {
        let selected = self.is_selected(dim, value);
        self.set_selected(dim, value, !selected);
    }

    pub fn clear(&mut self, dim: Dimension) {
        self.selected.insert(dim, BTreeSet::new());
    }

    /// Three membership checks, ANDed.
    pub fn matches(&self, row: &SalesRow) -> bool {
        Dimension::ALL
            .iter()
            .all(|&dim| self.is_selected(dim, dim.value_of(row)))
    }

    /// Indices of rows that pass the selection, in dataset order.
    pub fn filtered_indices(&self, dataset: &SalesDataset) -> Vec<usize> {
        dataset
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, row)| self.matches(row))
            .map(|(i, _)| i)
            .collect()
    }
}
