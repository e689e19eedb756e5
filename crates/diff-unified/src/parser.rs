//! Line-oriented unified diff parser.
//!
//! Outside a chunk the parser looks for `---`/`+++` file headers and `@@`
//! chunk headers and skips everything else (git's `diff`/`index` lines,
//! commit messages). Inside a chunk every line must be a body line until
//! both declared lengths are consumed.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

use crate::chunk::ChunkBuilder;
use crate::error::DiffParseError;
use crate::file::{FileDiff, FileDiffBuilder};
use crate::line::Side;

static CHUNK_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@(?: (.*))?$")
        .expect("chunk header pattern is valid")
});

/// Parse unified diff lines (without terminators) into per-file diffs.
pub fn parse<I, S>(lines: I) -> Result<Vec<FileDiff>, DiffParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parser = Parser::default();
    let mut count = 0usize;
    for (idx, line) in lines.into_iter().enumerate() {
        parser
            .feed(line.as_ref())
            .map_err(|e| e.at_line(idx + 1))?;
        count = idx + 1;
    }
    parser.finish().map_err(|e| match count {
        0 => e,
        n => e.at_line(n),
    })
}

/// Parse a whole diff held in memory. Accepts `\n` and `\r\n` endings.
pub fn parse_str(text: &str) -> Result<Vec<FileDiff>, DiffParseError> {
    parse(text.lines())
}

#[derive(Debug, Default)]
struct Parser {
    files: Vec<FileDiff>,
    current: FileDiffBuilder,
    chunk: Option<ChunkBuilder>,
    chunks: usize,
    ignored: usize,
}

impl Parser {
    fn feed(&mut self, line: &str) -> Result<(), DiffParseError> {
        if let Some(chunk) = self.chunk.as_mut() {
            let mut chars = line.chars();
            match chars.next() {
                Some(' ') => chunk.append_unchanged(chars.as_str())?,
                Some('-') => chunk.append_removed(chars.as_str())?,
                Some('+') => chunk.append_added(chars.as_str())?,
                _ => {
                    return Err(DiffParseError::UnexpectedChunkLine {
                        text: line.to_owned(),
                    });
                }
            }
            if chunk.is_complete() {
                self.close_chunk()?;
            }
            return Ok(());
        }

        if let Some(name) = line.strip_prefix("--- ") {
            return self.file_header(Side::Left, name);
        }
        if let Some(name) = line.strip_prefix("+++ ") {
            return self.file_header(Side::Right, name);
        }
        if let Some(caps) = CHUNK_HEADER.captures(line) {
            let number = |i: usize, default: usize| -> Result<usize, DiffParseError> {
                match caps.get(i) {
                    Some(m) => m
                        .as_str()
                        .parse()
                        .map_err(|source| DiffParseError::InvalidChunkHeader {
                            text: line.to_owned(),
                            source,
                        }),
                    None => Ok(default),
                }
            };
            let (left_start, left_len) = (number(1, 0)?, number(2, 1)?);
            let (right_start, right_len) = (number(3, 0)?, number(4, 1)?);
            // Row numbers run up to `start + len` on each side.
            if left_start.checked_add(left_len).is_none()
                || right_start.checked_add(right_len).is_none()
            {
                return Err(DiffParseError::LineNumberOverflow {
                    text: line.to_owned(),
                });
            }
            let builder = ChunkBuilder::new(
                left_start,
                left_len,
                right_start,
                right_len,
                caps.get(5).map(|m| m.as_str().to_owned()),
            );
            // A `0,0` header has no body at all.
            if builder.is_complete() {
                self.chunk = Some(builder);
                return self.close_chunk();
            }
            self.chunk = Some(builder);
            return Ok(());
        }

        self.ignored += 1;
        trace!(target: "diff.parse", len = line.len(), "line_ignored");
        Ok(())
    }

    fn file_header(&mut self, side: Side, name: &str) -> Result<(), DiffParseError> {
        if self.current.is_potentially_complete() {
            let done = std::mem::take(&mut self.current);
            self.files.push(done.build()?);
        }
        // GNU diff appends a tab and a timestamp.
        let name = name.split('\t').next().unwrap_or(name);
        self.current.set_filename(side, name)
    }

    fn close_chunk(&mut self) -> Result<(), DiffParseError> {
        if let Some(builder) = self.chunk.take() {
            self.current.add_chunk(builder.build()?)?;
            self.chunks += 1;
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<FileDiff>, DiffParseError> {
        self.close_chunk()?;
        self.files.push(self.current.build()?);
        debug!(
            target: "diff.parse",
            files = self.files.len(),
            chunks = self.chunks,
            ignored = self.ignored,
            "parse_complete"
        );
        Ok(self.files)
    }
}
