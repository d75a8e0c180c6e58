//! Per-solve scratch state for amortized-O(1) bracket lookups.
//!
//! Both the drag curve and the wind field are looked up by a value that
//! moves monotonically (decreasing Mach, increasing down-range distance)
//! over the course of a single solve. A [`BracketCursor`] remembers the
//! last bracket index so a lookup can usually start its search there
//! instead of from scratch, without requiring the shared, immutable curve
//! or wind field to hold any mutable state itself.

/// Caches the last bracket index found by an ordered lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct BracketCursor {
    last_index: usize,
}

impl BracketCursor {
    pub fn new() -> Self {
        Self { last_index: 0 }
    }

    /// Find the index `i` such that `values[i] <= key < values[i + 1]`,
    /// starting the search near the previously found index. `values` must
    /// be sorted ascending and non-empty.
    pub fn bracket(&mut self, values: &[f64], key: f64) -> usize {
        let len = values.len();
        debug_assert!(len > 0);
        let start = self.last_index.min(len - 1);

        // Fast path: key still in [start, start+1) or the adjacent bracket,
        // which covers the common case of a monotonically moving key.
        if key >= values[start] && (start + 1 >= len || key < values[start + 1]) {
            self.last_index = start;
            return start;
        }

        let idx = match values.binary_search_by(|v| v.partial_cmp(&key).unwrap()) {
            Ok(i) => i.min(len - 1),
            Err(0) => 0,
            Err(i) if i >= len => len - 1,
            Err(i) => i - 1,
        };
        self.last_index = idx;
        idx
    }

    /// Find the smallest index `i` such that `key < values[i]`, starting the
    /// search near the previously found index. `values` must be sorted
    /// ascending and non-empty. Unlike [`bracket`](Self::bracket), which
    /// returns the segment a key falls *in* (a floor lookup), this returns
    /// the segment a key falls *under* (a ceiling lookup) — the right
    /// semantics for an upper-bound table like a wind field's range bands.
    pub fn ceiling(&mut self, values: &[f64], key: f64) -> usize {
        let len = values.len();
        debug_assert!(len > 0);
        let start = self.last_index.min(len - 1);

        let prev_bound = if start == 0 { f64::NEG_INFINITY } else { values[start - 1] };
        if key >= prev_bound && key < values[start] {
            self.last_index = start;
            return start;
        }

        let idx = values.partition_point(|&v| v <= key).min(len - 1);
        self.last_index = idx;
        idx
    }
}
