use thiserror::Error;

/// A result was requested from an aligner before `compute()` ran.
///
/// This is a usage error on the caller's side, not a recoverable condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("must compute the diff before requesting {requested}")]
pub struct AlignmentStateError {
    pub requested: &'static str,
}
