use std::collections::BTreeMap;

use crate::model::{PairKey, Relationship};

/// Reconcile two relationship sets into one.
///
/// Identity is the unordered person pair. On collision the `incoming` side
/// (freshly confirmed or fetched state) wins; relationships present only in
/// `existing` (unconfirmed local edits) are carried forward unchanged.
/// Duplicate pair keys *within* either input collapse last-write-wins, so
/// the output never contains two effective edges for one pair.
///
/// Output is sorted by pair key. Pure function:
/// `merge(merge(x, y), y) == merge(x, y)`.
pub fn merge_relationships(
    existing: &[Relationship],
    incoming: &[Relationship],
) -> Vec<Relationship> {
    let mut merged: BTreeMap<PairKey, Relationship> = BTreeMap::new();

    for rel in existing {
        merged.insert(rel.pair_key(), rel.clone());
    }
    for rel in incoming {
        merged.insert(rel.pair_key(), rel.clone());
    }

    merged.into_values().collect()
}
