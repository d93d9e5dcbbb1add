use std::collections::{BTreeMap, BTreeSet};

use super::model::{Dimension, SalesDataset};

// ---------------------------------------------------------------------------
// Filter selection: which values are selected per dimension
// ---------------------------------------------------------------------------

/// Per-dimension selection state: maps dimension → set of selected values.
/// A dimension that is absent, or whose set is empty, imposes no
/// restriction (show all) — the multiselect convention.
pub type FilterSelection = BTreeMap<Dimension, BTreeSet<String>>;

/// Return indices of records that pass all active filters, in dataset order.
///
/// A record passes when, for every dimension with a non-empty selected set,
/// its value for that dimension is a member of the set: a conjunction
/// across dimensions, a disjunction within each set. Never fails; zero
/// matches is a valid result.
pub fn filtered_indices(dataset: &SalesDataset, selection: &FilterSelection) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, record)| {
            selection
                .iter()
                .filter(|(_, selected)| !selected.is_empty())
                .all(|(dim, selected)| selected.contains(dim.value_of(record)))
        })
        .map(|(i, _)| i)
        .collect()
}
