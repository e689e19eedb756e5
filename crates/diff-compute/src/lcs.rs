//! Longest-common-subsequence aligner reporting side-unique regions.
//!
//! Unlike [`crate::LevenshteinDiff`] this does not classify matched or
//! replaced pairs: every natural character not on the LCS is reported as a
//! [`Region`] (absolute byte offset + length) unique to its side.
//!
//! Backtrack from `(N, M)`:
//! * equal elements are consumed diagonally;
//! * otherwise consume the right element when
//!   `j > 0 && (i == 0 || lcs[i][j-1] >= lcs[i-1][j])`;
//! * otherwise consume the left element.
//!
//! The walk is a loop rather than recursion so very long lines cannot
//! exhaust the stack.

use diff_text::{GraphemeSegmenter, Segment, Segmenter};
use tracing::trace;

/// A half-open span `[start, start + length)` of byte offsets on one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    pub start: usize,
    pub length: usize,
}

impl Region {
    pub fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    pub fn end(&self) -> usize {
        self.start + self.length
    }
}

/// Regions unique to each side, in ascending offset order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlignmentCatalog {
    pub left_unique_regions: Vec<Region>,
    pub right_unique_regions: Vec<Region>,
}

impl AlignmentCatalog {
    pub fn is_empty(&self) -> bool {
        self.left_unique_regions.is_empty() && self.right_unique_regions.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct LcsDiff<S = GraphemeSegmenter> {
    segmenter: S,
}

impl<S: Segmenter> LcsDiff<S> {
    pub fn new(segmenter: S) -> Self {
        Self { segmenter }
    }

    pub fn compute(&self, left: &str, right: &str) -> AlignmentCatalog {
        let left = self.segmenter.segment(left);
        let right = self.segmenter.segment(right);
        unique_regions_by(&left, &right, |s| s.cluster)
    }
}

/// LCS over already segmented lines, comparing elements by `key` (such
/// as a normalized form of each cluster). Regions still refer to the
/// segments' own byte offsets.
pub fn unique_regions_by<'t, K, F>(
    left: &[Segment<'t>],
    right: &[Segment<'t>],
    mut key: F,
) -> AlignmentCatalog
where
    K: PartialEq,
    F: FnMut(&Segment<'t>) -> K,
{
    let left_keys: Vec<K> = left.iter().map(&mut key).collect();
    let right_keys: Vec<K> = right.iter().map(&mut key).collect();
    let table = LcsTable::build(&left_keys, &right_keys);
    let catalog = backtrack(&table, left, right, &left_keys, &right_keys);
    trace!(
        target: "diff.align",
        left = left.len(),
        right = right.len(),
        lcs = table.get(left.len(), right.len()),
        "lcs_computed"
    );
    catalog
}

struct LcsTable {
    width: usize,
    cells: Vec<u32>,
}

impl LcsTable {
    fn build<K: PartialEq>(left: &[K], right: &[K]) -> Self {
        let width = right.len() + 1;
        let mut t = Self {
            width,
            cells: vec![0; (left.len() + 1) * width],
        };
        for i in 1..=left.len() {
            for j in 1..=right.len() {
                let v = if left[i - 1] == right[j - 1] {
                    t.get(i - 1, j - 1) + 1
                } else {
                    t.get(i, j - 1).max(t.get(i - 1, j))
                };
                t.cells[i * width + j] = v;
            }
        }
        t
    }

    fn get(&self, i: usize, j: usize) -> u32 {
        self.cells[i * self.width + j]
    }
}

fn backtrack<K: PartialEq>(
    t: &LcsTable,
    left: &[Segment<'_>],
    right: &[Segment<'_>],
    left_keys: &[K],
    right_keys: &[K],
) -> AlignmentCatalog {
    let mut catalog = AlignmentCatalog::default();
    let (mut i, mut j) = (left.len(), right.len());
    while i > 0 || j > 0 {
        if i > 0 && j > 0 && left_keys[i - 1] == right_keys[j - 1] {
            i -= 1;
            j -= 1;
        } else if j > 0 && (i == 0 || t.get(i, j - 1) >= t.get(i - 1, j)) {
            let seg = right[j - 1];
            catalog
                .right_unique_regions
                .push(Region::new(seg.start, seg.len()));
            j -= 1;
        } else {
            let seg = left[i - 1];
            catalog
                .left_unique_regions
                .push(Region::new(seg.start, seg.len()));
            i -= 1;
        }
    }
    catalog.left_unique_regions.reverse();
    catalog.right_unique_regions.reverse();
    catalog
}
