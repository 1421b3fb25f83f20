use std::collections::HashSet;

use crate::writer::Store;

/// Candidate item names not yet stored for the restaurant. Read-only.
pub fn non_existing<'a, S: Store + ?Sized>(
    store: &S,
    restaurant: &str,
    candidates: &[&'a str],
) -> rusqlite::Result<HashSet<&'a str>> {
    let existing = store.existing_item_names(restaurant, candidates)?;
    Ok(candidates
        .iter()
        .copied()
        .filter(|name| !existing.contains(*name))
        .collect())
}
