//! Sorted-list merge utilities: `spec.md` §4.3.
//!
//! `merge_k` uses the min-heap-keyed-by-`(value, list index)` shape the
//! spec calls for. Values here are always finite or `+inf` (never `NaN`,
//! since they are sums of non-negative edge lengths), so a total order over
//! `f64` via `partial_cmp().unwrap()` is safe — the usual approach for
//! putting floats in a `BinaryHeap` (the idiom the standard library's own
//! Dijkstra example uses, via a small `Ord`-wrapping struct).

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Stable merge of two ascending sequences into one ascending sequence of
/// length `x.len() + y.len()`.
pub fn merge_two(x: &[f64], y: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(x.len() + y.len());
    let mut i = 0;
    let mut j = 0;
    while i < x.len() && j < y.len() {
        if x[i] < y[j] {
            out.push(x[i]);
            i += 1;
        } else {
            out.push(y[j]);
            j += 1;
        }
    }
    out.extend_from_slice(&x[i..]);
    out.extend_from_slice(&y[j..]);
    out
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct HeapEntry {
    value: f64,
    list: usize,
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Ascending on value; ties broken by list index for determinism.
        // `BinaryHeap` is a max-heap, so this type is always wrapped in
        // `std::cmp::Reverse` to get min-heap behavior.
        self.value
            .partial_cmp(&other.value)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.list.cmp(&other.list))
    }
}

/// k-way merge of ascending sequences into one ascending sequence whose
/// length equals the sum of the inputs' lengths.
pub fn merge_k(lists: Vec<Vec<f64>>) -> Vec<f64> {
    let total_len: usize = lists.iter().map(Vec::len).sum();
    let mut cursors = vec![0usize; lists.len()];
    let mut heap = BinaryHeap::with_capacity(lists.len());

    for (list, seq) in lists.iter().enumerate() {
        if let Some(&value) = seq.first() {
            heap.push(std::cmp::Reverse(HeapEntry { value, list }));
        }
    }

    let mut out = Vec::with_capacity(total_len);
    while let Some(std::cmp::Reverse(HeapEntry { value, list })) = heap.pop() {
        out.push(value);
        cursors[list] += 1;
        if let Some(&next) = lists[list].get(cursors[list]) {
            heap.push(std::cmp::Reverse(HeapEntry { value: next, list }));
        }
    }

    out
}

/// The median of an ascending sequence: the middle element for odd length,
/// the mean of the two middle elements for even length.
///
/// This is the plain mathematical definition; the "`+inf` tail forces an
/// `+inf` median" rule from `spec.md` §4.5.2 is a `med_clade`-specific
/// pre-check on the full `pair_dists` array, applied by the driver before
/// it calls this function, not a special case of the median itself.
pub fn median(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    assert!(n > 0, "median of an empty sequence is undefined");
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}
