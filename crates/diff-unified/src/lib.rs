//! Unified diff parsing and side-by-side replay.
//!
//! ```
//! use diff_unified::{LinesSource, parse_str};
//!
//! let diff = "--- a/greeting.txt\n+++ b/greeting.txt\n@@ -1,2 +1,2 @@\n hello\n-world\n+there\n";
//! let files = parse_str(diff).unwrap();
//! assert_eq!(files[0].display_filename(), "greeting.txt");
//!
//! let mut base = LinesSource::new(["hello", "world"]);
//! let rows = files[0].chunks()[0].apply_forward(&mut base).unwrap();
//! assert_eq!(rows[1].left_text(), Some("world"));
//! assert_eq!(rows[1].right_text(), Some("there"));
//! ```
//!
//! Everything produced here is an immutable value. The builders that
//! assemble chunks and file records are private to the parser.

pub mod chunk;
pub mod collapse;
pub mod error;
pub mod file;
pub mod line;
pub mod parser;
pub mod source;

pub use chunk::{Block, Chunk};
pub use collapse::Row;
pub use error::{DiffParseError, EmptyLineError, LineSourceError, ReplayError};
pub use file::{FileDiff, NULL_DEVICE};
pub use line::{LineSide, PairedLine, Side};
pub use parser::{parse, parse_str};
pub use source::{LineSource, LinesSource, ReaderLineSource};
