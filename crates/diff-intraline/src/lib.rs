//! Character-level highlighting for changed line pairs.
//!
//! [`IntralineProcessor`] takes a [`diff_unified::PairedLine`] and marks the
//! byte ranges that differ: removed ranges on the left, added ranges on the
//! right. The default pipeline segments both sides into natural characters,
//! aligns them with a weighted edit distance (replace costs twice an
//! insert or delete), smooths coincidental short matches away and walks the
//! resulting script.

pub mod options;
pub mod processor;
pub mod span;

pub use options::{Algorithm, IntralineOptions, UnknownAlgorithm};
pub use processor::IntralineProcessor;
pub use span::{AnnotatedLine, Span, SpanKind};
