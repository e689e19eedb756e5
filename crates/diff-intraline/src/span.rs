use std::ops::Range;

use diff_unified::PairedLine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    /// Only on the left side.
    Removed,
    /// Only on the right side.
    Added,
}

/// A highlighted byte range of one side's text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Span {
    pub range: Range<usize>,
    pub kind: SpanKind,
}

impl Span {
    pub fn new(range: Range<usize>, kind: SpanKind) -> Self {
        Self { range, kind }
    }

    /// The highlighted slice of `text`.
    pub fn slice<'t>(&self, text: &'t str) -> &'t str {
        &text[self.range.clone()]
    }
}

/// Append a span, extending the previous one when they touch and share a kind.
pub(crate) fn push_merged(spans: &mut Vec<Span>, range: Range<usize>, kind: SpanKind) {
    if range.is_empty() {
        return;
    }
    if let Some(last) = spans.last_mut() {
        if last.kind == kind && last.range.end == range.start {
            last.range.end = range.end;
            return;
        }
    }
    spans.push(Span::new(range, kind));
}

/// A paired line with its intraline highlights.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedLine {
    pub line: PairedLine,
    pub left_spans: Vec<Span>,
    pub right_spans: Vec<Span>,
}

impl AnnotatedLine {
    pub fn plain(line: PairedLine) -> Self {
        Self {
            line,
            left_spans: Vec::new(),
            right_spans: Vec::new(),
        }
    }

    pub fn has_highlights(&self) -> bool {
        !self.left_spans.is_empty() || !self.right_spans.is_empty()
    }

    /// Highlighted text of the left side, one slice per span.
    pub fn removed_text(&self) -> Vec<&str> {
        let text = self.line.left_text().unwrap_or_default();
        self.left_spans.iter().map(|s| s.slice(text)).collect()
    }

    pub fn added_text(&self) -> Vec<&str> {
        let text = self.line.right_text().unwrap_or_default();
        self.right_spans.iter().map(|s| s.slice(text)).collect()
    }
}
