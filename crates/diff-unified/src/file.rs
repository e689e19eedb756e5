use std::fmt;

use tracing::debug;

use crate::chunk::Chunk;
use crate::error::{DiffParseError, ReplayError};
use crate::line::{PairedLine, Side};
use crate::source::LineSource;

/// Name used on one side of a diff that creates or deletes a file.
pub const NULL_DEVICE: &str = "/dev/null";

/// The diff of a single file: its two header names and its chunks in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    left_filename: String,
    right_filename: String,
    chunks: Vec<Chunk>,
}

impl FileDiff {
    pub fn left_filename(&self) -> &str {
        &self.left_filename
    }

    pub fn right_filename(&self) -> &str {
        &self.right_filename
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Name to show for this file. Creations use the right name, everything
    /// else the left, with git's `a/`/`b/` prefix removed.
    pub fn display_filename(&self) -> &str {
        if self.is_creation() {
            strip_git_prefix(&self.right_filename, "b/")
        } else {
            strip_git_prefix(&self.left_filename, "a/")
        }
    }

    pub fn is_creation(&self) -> bool {
        self.left_filename == NULL_DEVICE
    }

    pub fn is_deletion(&self) -> bool {
        self.right_filename == NULL_DEVICE
    }

    /// Rows of every chunk, without a base file and without the lines
    /// between chunks.
    pub fn lines(&self) -> Vec<PairedLine> {
        self.chunks.iter().flat_map(Chunk::lines).collect()
    }

    /// Replay the whole file. Base lines before and between chunks become
    /// unchanged rows; lines after the last chunk are left unread.
    pub fn apply_forward<S>(&self, base: &mut S) -> Result<Vec<PairedLine>, ReplayError>
    where
        S: LineSource + ?Sized,
    {
        let mut rows = Vec::new();
        let (mut left_done, mut right_done) = (0usize, 0usize);
        for chunk in &self.chunks {
            let gap_end = chunk.left_lines_before();
            while left_done < gap_end {
                let number = left_done + 1;
                let text = base
                    .consume_line()
                    .map_err(|source| ReplayError::Source {
                        line: number,
                        source,
                    })?;
                rows.push(PairedLine::unchanged(number, right_done + 1, text));
                left_done += 1;
                right_done += 1;
            }
            rows.extend(chunk.apply_forward(base)?);
            left_done += chunk.left_len();
            right_done += chunk.right_len();
        }
        debug!(
            target: "diff.replay",
            chunks = self.chunks.len(),
            rows = rows.len(),
            "file_replayed"
        );
        Ok(rows)
    }
}

fn strip_git_prefix<'a>(name: &'a str, prefix: &str) -> &'a str {
    name.strip_prefix(prefix).unwrap_or(name)
}

impl fmt::Display for FileDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- {}", self.left_filename)?;
        writeln!(f, "+++ {}", self.right_filename)?;
        for chunk in &self.chunks {
            write!(f, "{chunk}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub(crate) struct FileDiffBuilder {
    left_filename: Option<String>,
    right_filename: Option<String>,
    chunks: Vec<Chunk>,
}

impl FileDiffBuilder {
    pub(crate) fn set_filename(&mut self, side: Side, name: &str) -> Result<(), DiffParseError> {
        let slot = match side {
            Side::Left => &mut self.left_filename,
            Side::Right => &mut self.right_filename,
        };
        if slot.is_some() {
            return Err(DiffParseError::FilenameSetTwice { side });
        }
        *slot = Some(name.to_owned());
        Ok(())
    }

    /// Both names are known, so a new header line starts the next file.
    pub(crate) fn is_potentially_complete(&self) -> bool {
        self.left_filename.is_some() && self.right_filename.is_some()
    }

    pub(crate) fn add_chunk(&mut self, chunk: Chunk) -> Result<(), DiffParseError> {
        if !self.is_potentially_complete() {
            return Err(DiffParseError::MissingFilenamesForChunk);
        }
        self.chunks.push(chunk);
        Ok(())
    }

    pub(crate) fn build(self) -> Result<FileDiff, DiffParseError> {
        match (self.left_filename, self.right_filename) {
            (Some(left_filename), Some(right_filename)) => Ok(FileDiff {
                left_filename,
                right_filename,
                chunks: self.chunks,
            }),
            _ => Err(DiffParseError::MissingFilename),
        }
    }
}
