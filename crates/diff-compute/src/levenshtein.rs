//! Minimum-cost edit script via the Levenshtein dynamic program.
//!
//! Cost table recurrence for cell `(i, j)` (1-indexed over both sequences):
//! * replace/unchanged: `cost[i-1][j-1] + (0 if equal else replace_cost)`
//! * insert:            `cost[i][j-1] + insert_cost`
//! * delete:            `cost[i-1][j] + delete_cost`
//!
//! Tie-break (load bearing for what a reader sees highlighted): prefer
//! replace/unchanged when it is `<=` both others, else insert when it is
//! `<=` delete, else delete. Row 0 is all inserts and column 0 all deletes.
//! The script is recovered by walking the op table from `(N, M)` back to
//! `(0, 0)` and reversing.

use std::fmt::{self, Display};

use tracing::trace;

use crate::edit::EditOp;
use crate::error::AlignmentStateError;

pub const DEFAULT_COST: f32 = 1.0;

/// Edit-distance aligner over two borrowed sequences.
///
/// ```
/// use diff_compute::{EditOp, LevenshteinDiff};
///
/// let a: Vec<char> = "kitten".chars().collect();
/// let b: Vec<char> = "sitting".chars().collect();
/// let script = LevenshteinDiff::new(&a, &b).compute().edit_script().unwrap();
/// assert_eq!(script[0], EditOp::Replace);
/// ```
pub struct LevenshteinDiff<'a, T> {
    first: &'a [T],
    second: &'a [T],
    insert_cost: f32,
    delete_cost: f32,
    replace_cost: f32,
    tables: Option<Tables>,
}

/// Row-major `(N+1) x (M+1)` cost and op tables.
struct Tables {
    width: usize,
    cost: Vec<f32>,
    ops: Vec<EditOp>,
}

impl Tables {
    fn idx(&self, i: usize, j: usize) -> usize {
        i * self.width + j
    }
}

impl<'a, T: PartialEq> LevenshteinDiff<'a, T> {
    pub fn new(first: &'a [T], second: &'a [T]) -> Self {
        Self {
            first,
            second,
            insert_cost: DEFAULT_COST,
            delete_cost: DEFAULT_COST,
            replace_cost: DEFAULT_COST,
            tables: None,
        }
    }

    /// Cost of inserting one element. Discards any previous computation.
    pub fn insert_cost(mut self, cost: f32) -> Self {
        self.insert_cost = cost;
        self.tables = None;
        self
    }

    /// Cost of deleting one element. Discards any previous computation.
    pub fn delete_cost(mut self, cost: f32) -> Self {
        self.delete_cost = cost;
        self.tables = None;
        self
    }

    /// Cost of replacing one element. Discards any previous computation.
    pub fn replace_cost(mut self, cost: f32) -> Self {
        self.replace_cost = cost;
        self.tables = None;
        self
    }

    pub fn is_computed(&self) -> bool {
        self.tables.is_some()
    }

    /// Fill the cost and op tables in O(N·M) time and space.
    pub fn compute(mut self) -> Self {
        self.tables = Some(self.fill());
        self
    }

    /// Compute and return the edit script in one step, without keeping the
    /// tables around.
    pub fn compute_script(self) -> Vec<EditOp> {
        let t = self.fill();
        self.backtrack(&t)
    }

    fn fill(&self) -> Tables {
        let n = self.first.len();
        let m = self.second.len();
        let width = m + 1;
        let cells = (n + 1) * width;
        let mut t = Tables {
            width,
            cost: vec![0.0; cells],
            ops: vec![EditOp::Unchanged; cells],
        };

        for i in 0..=n {
            let k = t.idx(i, 0);
            t.cost[k] = i as f32 * self.delete_cost;
            t.ops[k] = EditOp::Delete;
        }
        for j in 0..=m {
            let k = t.idx(0, j);
            t.cost[k] = j as f32 * self.insert_cost;
            t.ops[k] = EditOp::Insert;
        }

        for i in 1..=n {
            for j in 1..=m {
                let delete = t.cost[t.idx(i - 1, j)] + self.delete_cost;
                let insert = t.cost[t.idx(i, j - 1)] + self.insert_cost;
                let diagonal = t.cost[t.idx(i - 1, j - 1)];
                let (replace, replace_op) = if self.first[i - 1] == self.second[j - 1] {
                    (diagonal, EditOp::Unchanged)
                } else {
                    (diagonal + self.replace_cost, EditOp::Replace)
                };

                let (cost, op) = if replace <= delete && replace <= insert {
                    (replace, replace_op)
                } else if insert <= delete {
                    (insert, EditOp::Insert)
                } else {
                    (delete, EditOp::Delete)
                };
                let k = t.idx(i, j);
                t.cost[k] = cost;
                t.ops[k] = op;
            }
        }

        trace!(target: "diff.align", first = n, second = m, cells, "levenshtein_computed");
        t
    }

    fn tables(&self, requested: &'static str) -> Result<&Tables, AlignmentStateError> {
        self.tables
            .as_ref()
            .ok_or(AlignmentStateError { requested })
    }

    /// The minimal-cost edit script, ordered left to right.
    pub fn edit_script(&self) -> Result<Vec<EditOp>, AlignmentStateError> {
        let t = self.tables("edit script")?;
        Ok(self.backtrack(t))
    }

    fn backtrack(&self, t: &Tables) -> Vec<EditOp> {
        let mut out = Vec::with_capacity(self.first.len().max(self.second.len()));
        let (mut i, mut j) = (self.first.len(), self.second.len());
        while i > 0 || j > 0 {
            let op = t.ops[t.idx(i, j)];
            out.push(op);
            match op {
                EditOp::Insert => j -= 1,
                EditOp::Delete => i -= 1,
                EditOp::Replace | EditOp::Unchanged => {
                    i -= 1;
                    j -= 1;
                }
            }
        }
        out.reverse();
        out
    }

    /// Total cost of the optimal script.
    pub fn total_cost(&self) -> Result<f32, AlignmentStateError> {
        let t = self.tables("total cost")?;
        Ok(t.cost[t.idx(self.first.len(), self.second.len())])
    }
}

impl<T: PartialEq + Display> LevenshteinDiff<'_, T> {
    /// Printable cost table for debugging: first sequence across, second down.
    pub fn debug_cost_table(&self) -> Result<String, AlignmentStateError> {
        let col = 4;
        let t = self.tables("cost table")?;
        let mut sb = String::new();
        for j in -1..=self.second.len() as isize {
            for i in -1..=self.first.len() as isize {
                let cell = if i < 1 && j < 1 {
                    String::new()
                } else if i == -1 {
                    self.second[j as usize - 1].to_string()
                } else if j == -1 {
                    self.first[i as usize - 1].to_string()
                } else {
                    format!("{:.4}", t.cost[t.idx(i as usize, j as usize)])
                };
                sb.push_str(&format!("{cell:<col$.col$} "));
            }
            sb.push('\n');
        }
        Ok(sb)
    }
}

impl<T> fmt::Debug for LevenshteinDiff<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LevenshteinDiff")
            .field("first_len", &self.first.len())
            .field("second_len", &self.second.len())
            .field("insert_cost", &self.insert_cost)
            .field("delete_cost", &self.delete_cost)
            .field("replace_cost", &self.replace_cost)
            .field("computed", &self.tables.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::parse_script;
    use crate::edit::EditOp::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn simple_diff() {
        let (a, b) = (chars("kitten"), chars("sitting"));
        let c = LevenshteinDiff::new(&a, &b).compute();
        assert_eq!(
            c.edit_script().unwrap(),
            vec![Replace, Unchanged, Unchanged, Unchanged, Replace, Unchanged, Insert]
        );
        assert_eq!(c.total_cost().unwrap(), 3.0);
    }

    #[test]
    fn replace_matched_prefers_replace() {
        let (a, b) = (chars("kitten"), chars("sitting"));
        let c = LevenshteinDiff::new(&a, &b)
            .delete_cost(1.0)
            .insert_cost(1.0)
            .replace_cost(2.0) // same as a delete + insert
            .compute();
        assert_eq!(c.edit_script().unwrap(), parse_script("RUUURUI").unwrap());
    }

    #[test]
    fn expensive_replace_splits_into_delete_insert() {
        let (a, b) = (chars("kitten"), chars("sitting"));
        let c = LevenshteinDiff::new(&a, &b)
            .replace_cost(2.001) // slightly more than delete + insert
            .compute();
        assert_eq!(
            c.edit_script().unwrap(),
            vec![Delete, Insert, Unchanged, Unchanged, Unchanged, Delete, Insert, Unchanged, Insert]
        );
    }

    #[test]
    fn insert_delete_tie_prefers_insert() {
        // Replace priced out; (2,2) ties insert against delete.
        let (a, b) = (chars("ab"), chars("ba"));
        let c = LevenshteinDiff::new(&a, &b).replace_cost(10.0).compute();
        assert_eq!(c.edit_script().unwrap(), vec![Delete, Unchanged, Insert]);
    }

    #[test]
    fn compute_script_matches_edit_script() {
        let (a, b) = (chars("kitten"), chars("sitting"));
        let diff = LevenshteinDiff::new(&a, &b).replace_cost(2.0);
        let direct = LevenshteinDiff::new(&a, &b).replace_cost(2.0).compute_script();
        assert_eq!(direct, diff.compute().edit_script().unwrap());
        assert_eq!(direct, parse_script("RUUURUI").unwrap());
        let empty: Vec<char> = Vec::new();
        assert!(LevenshteinDiff::new(&empty, &empty).compute_script().is_empty());
    }

    #[test]
    fn both_empty() {
        let a: Vec<char> = Vec::new();
        let c = LevenshteinDiff::new(&a, &a).compute();
        assert!(c.edit_script().unwrap().is_empty());
        assert_eq!(c.total_cost().unwrap(), 0.0);
    }

    #[test]
    fn from_empty_is_all_inserts() {
        let (a, b) = (Vec::new(), chars("foobar"));
        let c = LevenshteinDiff::new(&a, &b).compute();
        assert_eq!(c.edit_script().unwrap(), vec![Insert; 6]);
    }

    #[test]
    fn to_empty_is_all_deletes() {
        let (a, b) = (chars("foobar"), Vec::new());
        let c = LevenshteinDiff::new(&a, &b).compute();
        assert_eq!(c.edit_script().unwrap(), vec![Delete; 6]);
    }

    #[test]
    fn requesting_before_compute_fails() {
        let (a, b) = (chars("a"), chars("b"));
        let c = LevenshteinDiff::new(&a, &b);
        assert_eq!(
            c.edit_script().unwrap_err(),
            AlignmentStateError {
                requested: "edit script"
            }
        );
        assert!(c.total_cost().is_err());
        assert!(c.debug_cost_table().is_err());
    }

    #[test]
    fn changing_cost_discards_computation() {
        let (a, b) = (chars("a"), chars("b"));
        let c = LevenshteinDiff::new(&a, &b).compute();
        assert!(c.is_computed());
        let c = c.replace_cost(3.0);
        assert!(!c.is_computed());
        assert!(c.edit_script().is_err());
    }

    #[test]
    fn debug_table_has_headers_and_costs() {
        let (a, b) = (chars("ab"), chars("b"));
        let c = LevenshteinDiff::new(&a, &b).compute();
        let table = c.debug_cost_table().unwrap();
        let rows: Vec<&str> = table.lines().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], "          a    b    ");
        assert_eq!(rows[1], "          1.00 2.00 ");
        assert_eq!(rows[2], "b    1.00 1.00 1.00 ");
    }
}
