use std::fmt;
use std::str::FromStr;

use diff_compute::SHORT_UNCHANGED_RUN_MAX;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    /// Weighted Levenshtein script, smoothed.
    #[default]
    EditDistance,
    /// LCS regions; no smoothing or cost weights apply.
    Lcs,
}

impl Algorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::EditDistance => "edit-distance",
            Algorithm::Lcs => "lcs",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown intraline algorithm {0:?}")]
pub struct UnknownAlgorithm(pub String);

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "edit-distance" | "levenshtein" => Ok(Algorithm::EditDistance),
            "lcs" => Ok(Algorithm::Lcs),
            other => Err(UnknownAlgorithm(other.to_owned())),
        }
    }
}

/// Tuning for [`crate::IntralineProcessor`]. The defaults reproduce the
/// plain pipeline: costs 1/1/2, smoothing of runs up to three, no trimming,
/// no normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct IntralineOptions {
    pub algorithm: Algorithm,
    pub insert_cost: f32,
    pub delete_cost: f32,
    pub replace_cost: f32,
    /// Longest unchanged run between edits that is folded into a replace.
    /// Zero disables smoothing.
    pub smoothing_max_run: usize,
    /// Strip the common prefix and suffix before aligning.
    pub trim_affixes: bool,
    /// Compare clusters by their NFC form.
    pub normalize: bool,
}

impl IntralineOptions {
    pub const DEFAULT_INSERT_COST: f32 = 1.0;
    pub const DEFAULT_DELETE_COST: f32 = 1.0;
    pub const DEFAULT_REPLACE_COST: f32 = 2.0;
}

impl Default for IntralineOptions {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            insert_cost: Self::DEFAULT_INSERT_COST,
            delete_cost: Self::DEFAULT_DELETE_COST,
            replace_cost: Self::DEFAULT_REPLACE_COST,
            smoothing_max_run: SHORT_UNCHANGED_RUN_MAX,
            trim_affixes: false,
            normalize: false,
        }
    }
}
