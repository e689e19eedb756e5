use std::fmt;

use crate::error::EmptyLineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::Left => "left",
            Side::Right => "right",
        })
    }
}

/// One side of a paired line: its 1-based number in that file and its text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineSide {
    pub number: usize,
    pub text: String,
}

impl LineSide {
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }
}

/// A row of the side-by-side view. At least one side is always present.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PairedLine {
    left: Option<LineSide>,
    right: Option<LineSide>,
}

impl PairedLine {
    pub fn new(left: Option<LineSide>, right: Option<LineSide>) -> Result<Self, EmptyLineError> {
        if left.is_none() && right.is_none() {
            return Err(EmptyLineError);
        }
        Ok(Self { left, right })
    }

    /// Callers guarantee at least one side is present.
    pub(crate) fn from_sides(left: Option<LineSide>, right: Option<LineSide>) -> Self {
        debug_assert!(left.is_some() || right.is_some());
        Self { left, right }
    }

    /// Same text on both sides.
    pub fn unchanged(left_number: usize, right_number: usize, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            left: Some(LineSide::new(left_number, text.clone())),
            right: Some(LineSide::new(right_number, text)),
        }
    }

    pub fn left_only(number: usize, text: impl Into<String>) -> Self {
        Self {
            left: Some(LineSide::new(number, text)),
            right: None,
        }
    }

    pub fn right_only(number: usize, text: impl Into<String>) -> Self {
        Self {
            left: None,
            right: Some(LineSide::new(number, text)),
        }
    }

    pub fn left(&self) -> Option<&LineSide> {
        self.left.as_ref()
    }

    pub fn right(&self) -> Option<&LineSide> {
        self.right.as_ref()
    }

    pub fn side(&self, side: Side) -> Option<&LineSide> {
        match side {
            Side::Left => self.left(),
            Side::Right => self.right(),
        }
    }

    pub fn left_number(&self) -> Option<usize> {
        self.left.as_ref().map(|s| s.number)
    }

    pub fn left_text(&self) -> Option<&str> {
        self.left.as_ref().map(|s| s.text.as_str())
    }

    pub fn right_number(&self) -> Option<usize> {
        self.right.as_ref().map(|s| s.number)
    }

    pub fn right_text(&self) -> Option<&str> {
        self.right.as_ref().map(|s| s.text.as_str())
    }

    /// True unless both sides are present with identical text.
    pub fn is_changed(&self) -> bool {
        match (&self.left, &self.right) {
            (Some(l), Some(r)) => l.text != r.text,
            _ => true,
        }
    }
}

impl fmt::Display for PairedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.left {
            Some(l) => write!(f, "{}:{}", l.number, l.text)?,
            None => f.write_str("-")?,
        }
        f.write_str("\t")?;
        match &self.right {
            Some(r) => write!(f, "{}:{}", r.number, r.text),
            None => f.write_str("-"),
        }
    }
}
