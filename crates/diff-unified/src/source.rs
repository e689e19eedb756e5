//! Base-file line sources consumed by forward replay.

use std::io::BufRead;

use crate::error::LineSourceError;

/// Supplies the lines of the pre-diff (left) file, one at a time.
pub trait LineSource {
    /// Next line without its terminator; fails once no line remains.
    fn consume_line(&mut self) -> Result<String, LineSourceError>;
}

/// Line source over any iterator of strings.
#[derive(Debug, Clone)]
pub struct LinesSource<I> {
    iter: I,
}

impl<I> LinesSource<I> {
    pub fn new<T>(lines: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self {
            iter: lines.into_iter(),
        }
    }
}

impl<I, S> LineSource for LinesSource<I>
where
    I: Iterator<Item = S>,
    S: Into<String>,
{
    fn consume_line(&mut self) -> Result<String, LineSourceError> {
        self.iter
            .next()
            .map(Into::into)
            .ok_or(LineSourceError::Exhausted)
    }
}

/// Line source reading from a buffered reader, stripping `\n` or `\r\n`.
#[derive(Debug)]
pub struct ReaderLineSource<R> {
    reader: R,
    buf: String,
}

impl<R: BufRead> ReaderLineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
        }
    }
}

impl<R: BufRead> LineSource for ReaderLineSource<R> {
    fn consume_line(&mut self) -> Result<String, LineSourceError> {
        self.buf.clear();
        if self.reader.read_line(&mut self.buf)? == 0 {
            return Err(LineSourceError::Exhausted);
        }
        if self.buf.ends_with('\n') {
            self.buf.pop();
            if self.buf.ends_with('\r') {
                self.buf.pop();
            }
        }
        Ok(self.buf.clone())
    }
}
