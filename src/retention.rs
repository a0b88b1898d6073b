//! Bounded history retention.
//!
//! After each upload the store may exceed the retention bound; an eviction
//! pass deletes the oldest datasets beyond it. Membership is always re-read
//! from the store at call time, never taken from cached state, so racing
//! upload/eviction passes converge to the bound instead of double-deleting.

use crate::error::DatasetResult;
use crate::store::DatasetStore;
use crate::types::DatasetId;

/// Maximum number of datasets retained in the store.
pub const RETAIN_LIMIT: usize = 5;

/// Evict datasets beyond [`RETAIN_LIMIT`], returning the evicted ids.
///
/// Idempotent: a second pass with no intervening upload deletes nothing.
pub fn enforce(store: &dyn DatasetStore) -> DatasetResult<Vec<DatasetId>> {
    enforce_limit(store, RETAIN_LIMIT)
}

/// [`enforce`] with an explicit limit.
///
/// Reads current membership, orders it by creation time descending (ties
/// broken by id, descending), and deletes every dataset ranked strictly
/// beyond `limit`.
pub fn enforce_limit(store: &dyn DatasetStore, limit: usize) -> DatasetResult<Vec<DatasetId>> {
    let mut summaries = store.list()?;
    // Stores promise newest-first ordering, but eviction correctness should
    // not depend on it.
    summaries.sort_by(|a, b| (b.uploaded_at, b.id).cmp(&(a.uploaded_at, a.id)));

    let mut evicted = Vec::new();
    for summary in summaries.iter().skip(limit) {
        store.delete(summary.id)?;
        evicted.push(summary.id);
    }
    Ok(evicted)
}
