//! Natural character segmentation.
//!
//! Intraline alignment never works on raw bytes or code points: a line is
//! first split into user-perceived characters (extended grapheme clusters) so
//! that a base letter plus combining marks, or a ZWJ emoji sequence, is one
//! element on each side of the alignment.
//!
//! Segmentation is exposed as the [`Segmenter`] capability and injected into
//! the aligners, which keeps them independent of any locale.

pub mod segment;

pub use segment::{Segment, nfc_key, segment, segment_chars};

/// Splits a line into natural characters.
pub trait Segmenter {
    fn segment<'t>(&self, text: &'t str) -> Vec<Segment<'t>>;
}

impl<F> Segmenter for F
where
    F: for<'t> Fn(&'t str) -> Vec<Segment<'t>>,
{
    fn segment<'t>(&self, text: &'t str) -> Vec<Segment<'t>> {
        self(text)
    }
}

/// Default locale tag (CLDR root).
pub const ROOT_LOCALE: &str = "und";

/// UAX #29 extended grapheme cluster segmenter.
///
/// The default cluster rules carry no locale tailoring, so the locale tag does
/// not change boundaries today. It is kept on the segmenter so a tailored
/// implementation can be swapped in behind the same configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphemeSegmenter {
    locale: String,
}

impl GraphemeSegmenter {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }
}

impl Default for GraphemeSegmenter {
    fn default() -> Self {
        Self::new(ROOT_LOCALE)
    }
}

impl Segmenter for GraphemeSegmenter {
    fn segment<'t>(&self, text: &'t str) -> Vec<Segment<'t>> {
        segment::segment(text)
    }
}

/// Split `input` into natural characters for `locale`.
pub fn split_natural_characters<'t>(input: &'t str, locale: &str) -> Vec<&'t str> {
    GraphemeSegmenter::new(locale)
        .segment(input)
        .into_iter()
        .map(|s| s.cluster)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn split_empty() {
        assert!(split_natural_characters("", "en-US").is_empty());
    }

    #[test]
    fn split_single() {
        assert_eq!(split_natural_characters("a", "en-US"), vec!["a"]);
    }

    #[test]
    fn split_simple() {
        assert_eq!(split_natural_characters("abc", "en-US"), vec!["a", "b", "c"]);
    }

    #[test]
    fn split_accent() {
        assert_eq!(
            split_natural_characters("aa\u{0301}c", "en-US"),
            vec!["a", "a\u{0301}", "c"]
        );
    }

    #[test]
    fn functions_are_segmenters() {
        assert_eq!(Segmenter::segment(&segment_chars, "e\u{0301}").len(), 2);
        assert_eq!(Segmenter::segment(&segment, "e\u{0301}").len(), 1);
    }

    #[test]
    fn default_locale_is_root() {
        assert_eq!(GraphemeSegmenter::default().locale(), ROOT_LOCALE);
    }
}
