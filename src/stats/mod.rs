//! Summary-card aggregation. Always computed from the unfiltered
//! collection, from scratch on every call; collections are tens to low
//! hundreds of records, so recomputation is noise next to the fetch.

/// Count of records per bucket label.
pub type BucketCounts = Vec<(String, usize)>;

/// Group records by an arbitrary categorical key, sorted descending by
/// count (ties broken by label so output is deterministic).
pub fn count_by<T>(items: &[T], key: impl Fn(&T) -> String) -> BucketCounts {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for item in items {
        let label = key(item);
        match counts.iter_mut().find(|(l, _)| *l == label) {
            Some((_, n)) => *n += 1,
            None => counts.push((label, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

/// Top N records by a numeric field, descending. Returns at most `n`
/// references into the input.
pub fn top_n_by<T>(items: &[T], n: usize, value: impl Fn(&T) -> f64) -> Vec<&T> {
    let mut rows: Vec<&T> = items.iter().collect();
    rows.sort_by(|a, b| value(b).total_cmp(&value(a)));
    rows.truncate(n);
    rows
}

pub fn sum_by<T>(items: &[T], value: impl Fn(&T) -> f64) -> f64 {
    items.iter().map(value).sum()
}

/// Histogram over a continuous field. `bounds` are inclusive upper edges;
/// values above the last bound land in the final overflow bucket, so
/// `labels.len()` must be `bounds.len() + 1`. The event-frequency cards
/// use bounds `[1, 5, 10]` with labels `≤1`, `1–5`, `5–10`, `>10`.
pub fn bucket_counts<T>(
    items: &[T],
    value: impl Fn(&T) -> f64,
    bounds: &[f64],
    labels: &[&str],
) -> BucketCounts {
    debug_assert_eq!(labels.len(), bounds.len() + 1);
    let mut counts = vec![0usize; labels.len()];
    for item in items {
        let v = value(item);
        let idx = bounds
            .iter()
            .position(|bound| v <= *bound)
            .unwrap_or(bounds.len());
        counts[idx] += 1;
    }
    labels
        .iter()
        .zip(counts)
        .map(|(label, n)| (label.to_string(), n))
        .collect()
}
