//! Grapheme segmentation adapter.
//!
//! Contract:
//! - Input: a single line of text, exactly as it appears in the diff.
//! - Output: `Vec<Segment>` where each segment is one extended grapheme
//!   cluster with absolute byte offsets into the *unmodified* input.
//! - Guarantees: clusters are in order, non-overlapping, and cover the whole
//!   input when concatenated. Offsets are never shifted by normalization;
//!   callers that want canonical comparison use [`nfc_key`] on each cluster.

use std::borrow::Cow;
use std::ops::Range;

use unicode_normalization::{IsNormalized, UnicodeNormalization, is_nfc_quick};
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'t> {
    pub cluster: &'t str,
    pub start: usize, // byte offset in input (inclusive)
    pub end: usize,   // byte offset in input (exclusive)
}

impl<'t> Segment<'t> {
    pub fn new(cluster: &'t str, start: usize) -> Self {
        Self {
            cluster,
            start,
            end: start + cluster.len(),
        }
    }

    /// Byte length of the cluster.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Segment into extended grapheme clusters with byte ranges.
pub fn segment(input: &str) -> Vec<Segment<'_>> {
    input
        .grapheme_indices(true)
        .map(|(start, g)| Segment::new(g, start))
        .collect()
}

/// Segment into Unicode scalar values. Not user-facing; useful when callers
/// need code point granularity (and in tests pinning per-char behavior).
pub fn segment_chars(input: &str) -> Vec<Segment<'_>> {
    input
        .char_indices()
        .map(|(start, c)| Segment::new(&input[start..start + c.len_utf8()], start))
        .collect()
}

/// Comparison key for a cluster: its NFC form, borrowed when already NFC.
pub fn nfc_key(cluster: &str) -> Cow<'_, str> {
    match is_nfc_quick(cluster.chars()) {
        IsNormalized::Yes => Cow::Borrowed(cluster),
        _ => Cow::Owned(cluster.nfc().collect()),
    }
}
