//! Sequence alignment for intraline diffs.
//!
//! Two aligners with different output shapes live here:
//! * [`LevenshteinDiff`]: minimum-cost edit script with configurable
//!   insert/delete/replace costs. This is the primary aligner.
//! * [`LcsDiff`]: longest-common-subsequence backtrack reporting only the
//!   regions unique to each side.
//!
//! Both are O(N·M) in time and space, allocate their own tables per call and
//! run to completion once started.

pub mod edit;
pub mod error;
pub mod lcs;
pub mod levenshtein;
pub mod postprocess;

pub use edit::EditOp;
pub use error::AlignmentStateError;
pub use lcs::{AlignmentCatalog, LcsDiff, Region, unique_regions_by};
pub use levenshtein::LevenshteinDiff;
pub use postprocess::{
    SHORT_UNCHANGED_RUN_MAX, Trimmed, smooth_short_unchanged_runs, smooth_unchanged_runs,
    trim_common_affixes,
};
