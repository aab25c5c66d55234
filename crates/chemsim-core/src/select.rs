//! Entity selection: filter the vocabulary down to the identifiers of
//! interest by prefix, in a deterministic order.

use std::collections::BTreeMap;

/// Select the identifiers starting with any accepted prefix.
///
/// Matching is case-sensitive and exact-prefix. The result is sorted
/// lexicographically and deduplicated, so it can serve as the ordered
/// identifier sequence for pair enumeration. An empty result is valid.
pub fn select_by_prefix(vocabulary: &[String], prefixes: &[String]) -> Vec<String> {
    let mut selected: Vec<String> = vocabulary
        .iter()
        .filter(|id| prefixes.iter().any(|prefix| id.starts_with(prefix)))
        .cloned()
        .collect();
    selected.sort_unstable();
    selected.dedup();
    selected
}

/// Count selected identifiers per CURIE prefix (the part before `:`,
/// or the whole identifier if it has no colon).
///
/// Ordered by descending count, ties by prefix. Used for the summary
/// table logged at the start of a run.
pub fn prefix_counts(ids: &[String]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for id in ids {
        let prefix = id.split(':').next().unwrap_or(id);
        *counts.entry(prefix).or_insert(0) += 1;
    }
    let mut table: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(prefix, count)| (prefix.to_string(), count))
        .collect();
    table.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    table
}
