//! Chunks and the blocks they are made of.
//!
//! A chunk is one `@@ ... @@` region. Its body is split into maximal runs of
//! context lines (`Block::Unchanged`) and maximal runs of removed/added lines
//! (`Block::Delta`). Replay walks the blocks against the base file and emits
//! side-by-side rows; a delta with unequal removed/added counts produces the
//! staggered rendering where the shorter side runs out first.

use std::convert::Infallible;
use std::fmt;

use tracing::debug;

use crate::error::{DiffParseError, ReplayError};
use crate::line::{LineSide, PairedLine, Side};
use crate::source::LineSource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Lines present on both sides; numbers advance together.
    Unchanged {
        left_start: usize,
        right_start: usize,
        lines: Vec<String>,
    },
    /// A replace/insert/delete region. Pure insert has no `removed`, pure
    /// delete no `added`.
    Delta {
        left_start: usize,
        right_start: usize,
        removed: Vec<String>,
        added: Vec<String>,
    },
}

impl Block {
    pub fn left_start(&self) -> usize {
        match self {
            Block::Unchanged { left_start, .. } | Block::Delta { left_start, .. } => *left_start,
        }
    }

    pub fn right_start(&self) -> usize {
        match self {
            Block::Unchanged { right_start, .. } | Block::Delta { right_start, .. } => *right_start,
        }
    }

    /// Left lines consumed by this block.
    pub fn left_len(&self) -> usize {
        match self {
            Block::Unchanged { lines, .. } => lines.len(),
            Block::Delta { removed, .. } => removed.len(),
        }
    }

    /// Right lines produced by this block.
    pub fn right_len(&self) -> usize {
        match self {
            Block::Unchanged { lines, .. } => lines.len(),
            Block::Delta { added, .. } => added.len(),
        }
    }

    /// Rows of this block without checking them against a base file.
    pub fn lines(&self) -> Vec<PairedLine> {
        match self.rows(|_, _| Ok::<(), Infallible>(())) {
            Ok(rows) => rows,
            Err(never) => match never {},
        }
    }

    /// Replay against the base file, verifying every left line consumed.
    pub fn apply_forward<S>(&self, base: &mut S) -> Result<Vec<PairedLine>, ReplayError>
    where
        S: LineSource + ?Sized,
    {
        self.rows(|number, expected| {
            let actual = base
                .consume_line()
                .map_err(|source| ReplayError::Source {
                    line: number,
                    source,
                })?;
            if actual != expected {
                debug!(target: "diff.replay", line = number, "replay_mismatch");
                return Err(ReplayError::Mismatch {
                    line: number,
                    expected: expected.to_owned(),
                    actual,
                });
            }
            Ok(())
        })
    }

    /// Emit rows, calling `consume(left_number, text)` for each left line in
    /// order before the row holding it is emitted.
    fn rows<E>(
        &self,
        mut consume: impl FnMut(usize, &str) -> Result<(), E>,
    ) -> Result<Vec<PairedLine>, E> {
        match self {
            Block::Unchanged {
                left_start,
                right_start,
                lines,
            } => {
                let mut out = Vec::with_capacity(lines.len());
                for (k, line) in lines.iter().enumerate() {
                    consume(left_start + k, line)?;
                    out.push(PairedLine::unchanged(left_start + k, right_start + k, line.as_str()));
                }
                Ok(out)
            }
            Block::Delta {
                left_start,
                right_start,
                removed,
                added,
            } => {
                let rows = removed.len().max(added.len());
                let mut out = Vec::with_capacity(rows);
                let (mut left_line, mut right_line) = (*left_start, *right_start);
                for i in 0..rows {
                    let left = match removed.get(i) {
                        Some(text) => {
                            consume(left_line, text)?;
                            let side = LineSide::new(left_line, text.as_str());
                            left_line += 1;
                            Some(side)
                        }
                        None => None,
                    };
                    let right = added.get(i).map(|text| {
                        let side = LineSide::new(right_line, text.as_str());
                        right_line += 1;
                        side
                    });
                    out.push(PairedLine::from_sides(left, right));
                }
                Ok(out)
            }
        }
    }
}

/// One `@@ -L,LL +R,RR @@` region of a file diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    left_start_line: usize,
    right_start_line: usize,
    context: Option<String>,
    blocks: Vec<Block>,
}

impl Chunk {
    pub fn left_start_line(&self) -> usize {
        self.left_start_line
    }

    pub fn right_start_line(&self) -> usize {
        self.right_start_line
    }

    /// Trailing text of the header line (often the enclosing function).
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn left_len(&self) -> usize {
        self.blocks.iter().map(Block::left_len).sum()
    }

    pub fn right_len(&self) -> usize {
        self.blocks.iter().map(Block::right_len).sum()
    }

    /// Base-file lines that precede this chunk. A zero-length range names
    /// the line *after* which the change applies, so it is not subtracted.
    pub fn left_lines_before(&self) -> usize {
        if self.left_len() == 0 {
            self.left_start_line
        } else {
            self.left_start_line.saturating_sub(1)
        }
    }

    /// Header line reconstructed from the blocks, always with explicit lengths.
    pub fn header(&self) -> String {
        let mut h = format!(
            "@@ -{},{} +{},{} @@",
            self.left_start_line,
            self.left_len(),
            self.right_start_line,
            self.right_len()
        );
        if let Some(ctx) = &self.context {
            h.push(' ');
            h.push_str(ctx);
        }
        h
    }

    /// Rows of the chunk without a base file.
    pub fn lines(&self) -> Vec<PairedLine> {
        self.blocks.iter().flat_map(Block::lines).collect()
    }

    pub fn apply_forward<S>(&self, base: &mut S) -> Result<Vec<PairedLine>, ReplayError>
    where
        S: LineSource + ?Sized,
    {
        let mut out = Vec::new();
        for block in &self.blocks {
            out.extend(block.apply_forward(base)?);
        }
        Ok(out)
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header())?;
        for block in &self.blocks {
            match block {
                Block::Unchanged { lines, .. } => {
                    for l in lines {
                        writeln!(f, " {l}")?;
                    }
                }
                Block::Delta { removed, added, .. } => {
                    for l in removed {
                        writeln!(f, "-{l}")?;
                    }
                    for l in added {
                        writeln!(f, "+{l}")?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Accumulates chunk body lines. At most one block is open at a time; a
/// line of the other kind flushes it into `blocks`.
#[derive(Debug)]
pub(crate) struct ChunkBuilder {
    left_start: usize,
    left_len: usize,
    right_start: usize,
    right_len: usize,
    context: Option<String>,
    blocks: Vec<Block>,
    open: Option<Block>,
    left_done: usize,
    right_done: usize,
}

impl ChunkBuilder {
    pub(crate) fn new(
        left_start: usize,
        left_len: usize,
        right_start: usize,
        right_len: usize,
        context: Option<String>,
    ) -> Self {
        Self {
            left_start,
            left_len,
            right_start,
            right_len,
            context,
            blocks: Vec::new(),
            open: None,
            left_done: 0,
            right_done: 0,
        }
    }

    pub(crate) fn is_complete(&self) -> bool {
        self.left_done == self.left_len && self.right_done == self.right_len
    }

    fn ensure_room(&self, side: Side) -> Result<(), DiffParseError> {
        let (done, declared) = match side {
            Side::Left => (self.left_done, self.left_len),
            Side::Right => (self.right_done, self.right_len),
        };
        if done >= declared {
            return Err(DiffParseError::ChunkOverflow { side, declared });
        }
        Ok(())
    }

    fn flush(&mut self) {
        if let Some(block) = self.open.take() {
            self.blocks.push(block);
        }
    }

    pub(crate) fn append_unchanged(&mut self, line: &str) -> Result<(), DiffParseError> {
        self.ensure_room(Side::Left)?;
        self.ensure_room(Side::Right)?;
        match &mut self.open {
            Some(Block::Unchanged { lines, .. }) => lines.push(line.to_owned()),
            _ => {
                self.flush();
                self.open = Some(Block::Unchanged {
                    left_start: self.left_start + self.left_done,
                    right_start: self.right_start + self.right_done,
                    lines: vec![line.to_owned()],
                });
            }
        }
        self.left_done += 1;
        self.right_done += 1;
        Ok(())
    }

    pub(crate) fn append_removed(&mut self, line: &str) -> Result<(), DiffParseError> {
        self.ensure_room(Side::Left)?;
        self.open_delta().0.push(line.to_owned());
        self.left_done += 1;
        Ok(())
    }

    pub(crate) fn append_added(&mut self, line: &str) -> Result<(), DiffParseError> {
        self.ensure_room(Side::Right)?;
        self.open_delta().1.push(line.to_owned());
        self.right_done += 1;
        Ok(())
    }

    /// The open delta's (removed, added) lists, opening one if needed.
    fn open_delta(&mut self) -> (&mut Vec<String>, &mut Vec<String>) {
        if !matches!(self.open, Some(Block::Delta { .. })) {
            self.flush();
            self.open = Some(Block::Delta {
                left_start: self.left_start + self.left_done,
                right_start: self.right_start + self.right_done,
                removed: Vec::new(),
                added: Vec::new(),
            });
        }
        match &mut self.open {
            Some(Block::Delta { removed, added, .. }) => (removed, added),
            _ => unreachable!("delta block opened above"),
        }
    }

    pub(crate) fn build(mut self) -> Result<Chunk, DiffParseError> {
        self.flush();
        if !self.is_complete() {
            return Err(DiffParseError::IncompleteChunk {
                left_expected: self.left_len,
                left_actual: self.left_done,
                right_expected: self.right_len,
                right_actual: self.right_done,
            });
        }
        Ok(Chunk {
            left_start_line: self.left_start,
            right_start_line: self.right_start,
            context: self.context,
            blocks: self.blocks,
        })
    }
}
