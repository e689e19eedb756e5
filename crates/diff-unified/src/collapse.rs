//! Viewer rows with the unchanged stretches between chunks folded away.

use crate::file::FileDiff;
use crate::line::PairedLine;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    /// `lines` base-file lines outside any chunk.
    Collapsed { lines: usize },
    Line(PairedLine),
}

impl Row {
    pub fn as_line(&self) -> Option<&PairedLine> {
        match self {
            Row::Line(line) => Some(line),
            Row::Collapsed { .. } => None,
        }
    }
}

impl FileDiff {
    /// Chunk rows with a `Collapsed` marker for each run of lines skipped
    /// before a chunk. Nothing is emitted after the last chunk since its
    /// length is unknown without the base file.
    pub fn collapsed_rows(&self) -> Vec<Row> {
        let mut rows = Vec::new();
        let mut left_done = 0usize;
        for chunk in self.chunks() {
            let before = chunk.left_lines_before();
            if before > left_done {
                rows.push(Row::Collapsed {
                    lines: before - left_done,
                });
            }
            rows.extend(chunk.lines().into_iter().map(Row::Line));
            left_done = left_done.max(before) + chunk.left_len();
        }
        rows
    }
}
