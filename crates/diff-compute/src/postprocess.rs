//! Edit-script smoothing and alignment input trimming.

use crate::edit::EditOp;

/// Longest unchanged island (in elements) that smoothing turns into a replace.
pub const SHORT_UNCHANGED_RUN_MAX: usize = 3;

/// Rewrite short unchanged islands between edits as `Replace`.
///
/// Consider "View has requested" -> "Special constant", edit script
/// `RRURRDURURRRDDUURRI`:
///
/// ```text
///     RR-RRD-R-RRRDD--RR       RR-RR-R-RRR--RRI
///     View has requested   |   Special constant
/// ```
///
/// The one and two character matches are coincidence. After smoothing the
/// script is `RRRRRDRRRRRRDDRRRRI`, which renders as one highlighted region.
/// Leading and trailing unchanged runs are never touched.
pub fn smooth_short_unchanged_runs(script: &mut [EditOp]) -> usize {
    smooth_unchanged_runs(script, SHORT_UNCHANGED_RUN_MAX)
}

/// Same as [`smooth_short_unchanged_runs`] with a caller-chosen threshold.
/// Returns how many ops were rewritten. `max_run == 0` disables smoothing.
pub fn smooth_unchanged_runs(script: &mut [EditOp], max_run: usize) -> usize {
    let mut seen_change = false;
    let mut run = 0usize;
    let mut rewritten = 0usize;
    for i in 0..script.len() {
        if script[i] == EditOp::Unchanged {
            if seen_change {
                run += 1;
            }
            continue;
        }
        if run > 0 && run <= max_run {
            script[i - run..i].fill(EditOp::Replace);
            rewritten += run;
        }
        seen_change = true;
        run = 0;
    }
    rewritten
}

/// Two sequences with their shared prefix and suffix removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trimmed<'a, T> {
    pub first: &'a [T],
    pub second: &'a [T],
    /// Elements removed from the front of both inputs.
    pub prefix: usize,
    /// Elements removed from the back of both inputs.
    pub suffix: usize,
}

/// Strip the longest common prefix, then the longest common suffix of what
/// remains. The suffix search never reaches into the prefix, so a shared run
/// that could count as either is taken as prefix.
///
/// Panics if the amounts trimmed from each side differ, which would mean the
/// bounds above were violated.
pub fn trim_common_affixes<'a, T: PartialEq>(first: &'a [T], second: &'a [T]) -> Trimmed<'a, T> {
    let prefix = first
        .iter()
        .zip(second)
        .take_while(|(a, b)| a == b)
        .count();
    let (first_rest, second_rest) = (&first[prefix..], &second[prefix..]);
    let suffix = first_rest
        .iter()
        .rev()
        .zip(second_rest.iter().rev())
        .take_while(|(a, b)| a == b)
        .count();
    let first_trimmed = &first_rest[..first_rest.len() - suffix];
    let second_trimmed = &second_rest[..second_rest.len() - suffix];

    assert_eq!(
        first.len() - first_trimmed.len(),
        second.len() - second_trimmed.len(),
        "trimmed amounts must match on both sides"
    );
    Trimmed {
        first: first_trimmed,
        second: second_trimmed,
        prefix,
        suffix,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::EditOp::*;
    use crate::edit::{format_script, parse_script};
    use pretty_assertions::assert_eq;

    fn smoothed(codes: &str) -> String {
        let mut script = parse_script(codes).unwrap();
        smooth_short_unchanged_runs(&mut script);
        format_script(&script)
    }

    #[test]
    fn smoothing_empty() {
        let mut script: Vec<EditOp> = Vec::new();
        assert_eq!(smooth_short_unchanged_runs(&mut script), 0);
        assert!(script.is_empty());
    }

    #[test]
    fn smoothing_ignores_unchanged_prefix() {
        assert_eq!(smoothed("UD"), "UD");
    }

    #[test]
    fn smoothing_basic() {
        let mut script = vec![Insert, Unchanged, Unchanged, Unchanged, Replace];
        assert_eq!(smooth_short_unchanged_runs(&mut script), 3);
        assert_eq!(script, vec![Insert, Replace, Replace, Replace, Replace]);
    }

    #[test]
    fn smoothing_ignores_unchanged_suffix() {
        assert_eq!(smoothed("IU"), "IU");
    }

    #[test]
    fn smoothing_ignores_long_unchanged() {
        assert_eq!(smoothed("IUUUUR"), "IUUUUR");
    }

    #[test]
    fn smoothing_multiple_regions() {
        assert_eq!(smoothed("IUDUUR"), "IRDRRR");
    }

    #[test]
    fn smoothing_unrelated_words() {
        assert_eq!(smoothed("RRURRDURURRRDDUURRI"), "RRRRRDRRRRRRDDRRRRI");
    }

    #[test]
    fn smoothing_threshold_is_configurable() {
        let mut script = parse_script("IUUUUR").unwrap();
        assert_eq!(smooth_unchanged_runs(&mut script, 4), 4);
        assert_eq!(format_script(&script), "IRRRRR");
        let mut script = parse_script("IUR").unwrap();
        assert_eq!(smooth_unchanged_runs(&mut script, 0), 0);
        assert_eq!(format_script(&script), "IUR");
    }

    fn trim<'a>(first: &'a [&'a str], second: &'a [&'a str]) -> (Vec<&'a str>, Vec<&'a str>) {
        let t = trim_common_affixes(first, second);
        (t.first.to_vec(), t.second.to_vec())
    }

    #[test]
    fn trim_simple() {
        let first = ["foo", "bar", "ice", "cream", "sandwich"];
        let second = ["foo", "bar", "some", "other", "words", "sandwich"];
        let t = trim_common_affixes(&first, &second);
        assert_eq!(t.first, &["ice", "cream"]);
        assert_eq!(t.second, &["some", "other", "words"]);
        assert_eq!((t.prefix, t.suffix), (2, 1));
    }

    #[test]
    fn trim_empty() {
        let (a, b) = trim(&[], &[]);
        assert!(a.is_empty() && b.is_empty());
    }

    #[test]
    fn trim_first_only() {
        let first = ["foo", "bar", "ice", "cream", "sandwich"];
        let (a, b) = trim(&first, &[]);
        assert_eq!(a, first.to_vec());
        assert!(b.is_empty());
    }

    #[test]
    fn trim_second_only() {
        let second = ["foo", "bar", "some", "other", "words", "sandwich"];
        let (a, b) = trim(&[], &second);
        assert!(a.is_empty());
        assert_eq!(b, second.to_vec());
    }

    #[test]
    fn trim_both_single() {
        let (a, b) = trim(&["foo"], &["foo"]);
        assert!(a.is_empty() && b.is_empty());
    }

    #[test]
    fn trim_prefix() {
        let (a, b) = trim(&["foo", "bar", "ice", "cream", "sandwich"], &["foo", "bar"]);
        assert_eq!(a, vec!["ice", "cream", "sandwich"]);
        assert!(b.is_empty());
    }

    #[test]
    fn trim_suffix() {
        let (a, b) = trim(&["foo", "bar", "ice", "cream", "sandwich"], &["cream", "sandwich"]);
        assert_eq!(a, vec!["foo", "bar", "ice"]);
        assert!(b.is_empty());
    }

    #[test]
    fn trim_disjoint() {
        let (a, b) = trim(&["foo", "bar", "ice", "cream", "sandwich"], &["oops", "woah"]);
        assert_eq!(a, vec!["foo", "bar", "ice", "cream", "sandwich"]);
        assert_eq!(b, vec!["oops", "woah"]);
    }

    #[test]
    fn trim_prefers_prefix() {
        let first = ["foo", "bar", "foo", "bar", "testing", "foo", "bar"];
        let t = trim_common_affixes(&first, &["foo", "bar"]);
        assert_eq!(t.first, &["foo", "bar", "testing", "foo", "bar"]);
        assert!(t.second.is_empty());
        assert_eq!((t.prefix, t.suffix), (2, 0));
    }
}
