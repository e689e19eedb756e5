use std::borrow::Cow;
use std::iter;

use diff_compute::{
    EditOp, LevenshteinDiff, smooth_unchanged_runs, trim_common_affixes, unique_regions_by,
};
use diff_text::{GraphemeSegmenter, Segment, Segmenter, nfc_key};
use diff_unified::PairedLine;
use tracing::{debug, trace};

use crate::options::{Algorithm, IntralineOptions};
use crate::span::{AnnotatedLine, Span, SpanKind, push_merged};

/// Computes intraline highlights for paired lines.
///
/// Stateless between calls; one processor can annotate any number of lines.
#[derive(Debug, Clone)]
pub struct IntralineProcessor<S = GraphemeSegmenter> {
    segmenter: S,
    options: IntralineOptions,
}

impl Default for IntralineProcessor<GraphemeSegmenter> {
    fn default() -> Self {
        Self::new(GraphemeSegmenter::default(), IntralineOptions::default())
    }
}

impl<S: Segmenter> IntralineProcessor<S> {
    pub fn new(segmenter: S, options: IntralineOptions) -> Self {
        Self { segmenter, options }
    }

    pub fn segmenter(&self) -> &S {
        &self.segmenter
    }

    pub fn options(&self) -> &IntralineOptions {
        &self.options
    }

    /// Annotate one line.
    ///
    /// Only a line with both sides present and different texts is aligned.
    /// A one-sided line is highlighted whole; an unchanged line gets no spans.
    pub fn compute(&self, line: &PairedLine) -> AnnotatedLine {
        let (left_spans, right_spans) = match (line.left_text(), line.right_text()) {
            (Some(left), Some(right)) if left != right => self.align(left, right),
            (Some(left), None) => (whole(left, SpanKind::Removed), Vec::new()),
            (None, Some(right)) => (Vec::new(), whole(right, SpanKind::Added)),
            _ => (Vec::new(), Vec::new()),
        };
        AnnotatedLine {
            line: line.clone(),
            left_spans,
            right_spans,
        }
    }

    pub fn process_all<'a, I>(&self, lines: I) -> Vec<AnnotatedLine>
    where
        I: IntoIterator<Item = &'a PairedLine>,
    {
        let out: Vec<AnnotatedLine> = lines.into_iter().map(|l| self.compute(l)).collect();
        debug!(
            target: "diff.intraline",
            lines = out.len(),
            highlighted = out.iter().filter(|a| a.has_highlights()).count(),
            algorithm = %self.options.algorithm,
            "intraline_batch"
        );
        out
    }

    fn key<'t>(&self, cluster: &'t str) -> Cow<'t, str> {
        if self.options.normalize {
            nfc_key(cluster)
        } else {
            Cow::Borrowed(cluster)
        }
    }

    fn align(&self, left: &str, right: &str) -> (Vec<Span>, Vec<Span>) {
        let left = self.segmenter.segment(left);
        let right = self.segmenter.segment(right);
        match self.options.algorithm {
            Algorithm::EditDistance => self.edit_spans(&left, &right),
            Algorithm::Lcs => self.lcs_spans(&left, &right),
        }
    }

    fn edit_spans(&self, left: &[Segment<'_>], right: &[Segment<'_>]) -> (Vec<Span>, Vec<Span>) {
        let left_keys: Vec<Cow<'_, str>> = left.iter().map(|s| self.key(s.cluster)).collect();
        let right_keys: Vec<Cow<'_, str>> = right.iter().map(|s| self.key(s.cluster)).collect();

        let (prefix, suffix, first, second) = if self.options.trim_affixes {
            let t = trim_common_affixes(&left_keys, &right_keys);
            (t.prefix, t.suffix, t.first, t.second)
        } else {
            (0, 0, &left_keys[..], &right_keys[..])
        };

        let core = LevenshteinDiff::new(first, second)
            .insert_cost(self.options.insert_cost)
            .delete_cost(self.options.delete_cost)
            .replace_cost(self.options.replace_cost)
            .compute_script();

        let mut script = Vec::with_capacity(prefix + core.len() + suffix);
        script.extend(iter::repeat_n(EditOp::Unchanged, prefix));
        script.extend(core);
        script.extend(iter::repeat_n(EditOp::Unchanged, suffix));
        let smoothed = smooth_unchanged_runs(&mut script, self.options.smoothing_max_run);

        trace!(
            target: "diff.intraline",
            left = left.len(),
            right = right.len(),
            trimmed = prefix + suffix,
            smoothed,
            "intraline_aligned"
        );
        walk_script(&script, left, right)
    }

    fn lcs_spans(&self, left: &[Segment<'_>], right: &[Segment<'_>]) -> (Vec<Span>, Vec<Span>) {
        let catalog = unique_regions_by(left, right, |s| self.key(s.cluster));
        let mut left_spans = Vec::new();
        for r in &catalog.left_unique_regions {
            push_merged(&mut left_spans, r.start..r.end(), SpanKind::Removed);
        }
        let mut right_spans = Vec::new();
        for r in &catalog.right_unique_regions {
            push_merged(&mut right_spans, r.start..r.end(), SpanKind::Added);
        }
        (left_spans, right_spans)
    }
}

fn whole(text: &str, kind: SpanKind) -> Vec<Span> {
    if text.is_empty() {
        Vec::new()
    } else {
        vec![Span::new(0..text.len(), kind)]
    }
}

/// Delete/Replace mark the left element removed, Insert/Replace mark the
/// right element added; Unchanged only advances both cursors.
fn walk_script(
    script: &[EditOp],
    left: &[Segment<'_>],
    right: &[Segment<'_>],
) -> (Vec<Span>, Vec<Span>) {
    let (mut left_spans, mut right_spans) = (Vec::new(), Vec::new());
    let (mut li, mut ri) = (0usize, 0usize);
    for op in script {
        if op.consumes_left() {
            if op.is_change() {
                push_merged(&mut left_spans, left[li].range(), SpanKind::Removed);
            }
            li += 1;
        }
        if op.consumes_right() {
            if op.is_change() {
                push_merged(&mut right_spans, right[ri].range(), SpanKind::Added);
            }
            ri += 1;
        }
    }
    (left_spans, right_spans)
}
