use std::num::ParseIntError;

use thiserror::Error;

use crate::line::Side;

/// Malformed unified diff text.
#[derive(Debug, Error)]
pub enum DiffParseError {
    #[error("expected a line diff starting with ' ', '-' or '+', but got {text:?}")]
    UnexpectedChunkLine { text: String },

    #[error("failed to parse line numbers in chunk header {text:?}")]
    InvalidChunkHeader {
        text: String,
        #[source]
        source: ParseIntError,
    },

    #[error("chunk header {text:?} declares lines past the largest line number")]
    LineNumberOverflow { text: String },

    #[error("can't set the {side} filename again")]
    FilenameSetTwice { side: Side },

    #[error("must set both filenames before adding chunks")]
    MissingFilenamesForChunk,

    #[error("missing filename")]
    MissingFilename,

    #[error("more {side} lines than the chunk header declared ({declared})")]
    ChunkOverflow { side: Side, declared: usize },

    #[error(
        "chunk isn't complete: expected {left_expected} left lines but got {left_actual}, \
         expected {right_expected} right lines but got {right_actual}"
    )]
    IncompleteChunk {
        left_expected: usize,
        left_actual: usize,
        right_expected: usize,
        right_actual: usize,
    },

    /// Wraps any of the above with the 1-based input line that triggered it.
    #[error("line {line}: {source}")]
    AtLine {
        line: usize,
        source: Box<DiffParseError>,
    },
}

impl DiffParseError {
    pub(crate) fn at_line(self, line: usize) -> Self {
        match self {
            already @ DiffParseError::AtLine { .. } => already,
            other => DiffParseError::AtLine {
                line,
                source: Box::new(other),
            },
        }
    }

    /// The underlying error with any line wrapper removed.
    pub fn kind(&self) -> &DiffParseError {
        match self {
            DiffParseError::AtLine { source, .. } => source.kind(),
            other => other,
        }
    }

    /// Input line the error was detected on, when known.
    pub fn line(&self) -> Option<usize> {
        match self {
            DiffParseError::AtLine { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Failure reading the next base-file line.
#[derive(Debug, Error)]
pub enum LineSourceError {
    #[error("no line available")]
    Exhausted,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// The base file does not match what the diff expects. Fatal for the replay
/// call that raised it; retrying against the same base cannot succeed.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("base file mismatch at left line {line}: expected {expected:?} but got {actual:?}")]
    Mismatch {
        line: usize,
        expected: String,
        actual: String,
    },

    #[error("could not read left line {line} from the base file")]
    Source {
        line: usize,
        #[source]
        source: LineSourceError,
    },
}

/// A paired line was constructed with neither side present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("a paired line needs at least one side")]
pub struct EmptyLineError;
