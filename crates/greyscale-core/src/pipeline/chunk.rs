//! Static partitioning of the discovered image list across workers.

/// Split `items` into exactly `count` contiguous chunks.
///
/// Every chunk but the last holds `items.len() / count` elements; the last
/// one also absorbs the remainder. With more chunks than items, all chunks
/// except the last are empty. Boundaries depend only on the two lengths.
/// A `count` of zero is treated as one.
pub fn split_chunks<T: Clone>(items: &[T], count: usize) -> Vec<Vec<T>> {
    chunk_ranges(items.len(), count)
        .into_iter()
        .map(|range| items[range].to_vec())
        .collect()
}

/// Index ranges of the chunks produced by [`split_chunks`].
pub fn chunk_ranges(len: usize, count: usize) -> Vec<std::ops::Range<usize>> {
    let count = count.max(1);
    let base = len / count;

    let mut ranges: Vec<_> = (0..count - 1).map(|i| i * base..(i + 1) * base).collect();
    ranges.push((count - 1) * base..len);
    ranges
}
