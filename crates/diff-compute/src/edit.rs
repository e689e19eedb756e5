use std::fmt;

/// One step of an edit script transforming a first sequence into a second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditOp {
    /// Element was inserted into the second sequence.
    Insert,
    /// Element was deleted from the first sequence.
    Delete,
    /// Element of the first sequence was replaced by an element of the second.
    Replace,
    /// Element of the first sequence matches the element of the second.
    Unchanged,
}

impl EditOp {
    /// Whether this step consumes an element of the first (left) sequence.
    pub fn consumes_left(self) -> bool {
        !matches!(self, EditOp::Insert)
    }

    /// Whether this step consumes an element of the second (right) sequence.
    pub fn consumes_right(self) -> bool {
        !matches!(self, EditOp::Delete)
    }

    pub fn is_change(self) -> bool {
        self != EditOp::Unchanged
    }

    /// Single-letter code (`I`, `D`, `R`, `U`).
    pub fn code(self) -> char {
        match self {
            EditOp::Insert => 'I',
            EditOp::Delete => 'D',
            EditOp::Replace => 'R',
            EditOp::Unchanged => 'U',
        }
    }

    pub fn from_code(c: char) -> Option<Self> {
        match c {
            'I' => Some(EditOp::Insert),
            'D' => Some(EditOp::Delete),
            'R' => Some(EditOp::Replace),
            'U' => Some(EditOp::Unchanged),
            _ => None,
        }
    }
}

impl fmt::Display for EditOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Compact textual form of a script, e.g. `RUUURUI`.
pub fn format_script(script: &[EditOp]) -> String {
    script.iter().map(|op| op.code()).collect()
}

/// Parse the compact form produced by [`format_script`]. Returns `None` on an
/// unknown letter.
pub fn parse_script(codes: &str) -> Option<Vec<EditOp>> {
    codes.chars().map(EditOp::from_code).collect()
}

/// Number of steps that are not `Unchanged`.
pub fn change_count(script: &[EditOp]) -> usize {
    script.iter().filter(|op| op.is_change()).count()
}
