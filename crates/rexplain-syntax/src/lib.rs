//! Regex parser that annotates every syntactic unit of a pattern.
//!
//! Parsing yields an [`Ast`] whose nodes carry the track sets built by
//! `rexplain-core`; [`Ast::annotations`] flattens them into the list of
//! `(start, end, description)` entries that explain the pattern.
//!
//! ```
//! let ast = rexplain_syntax::parse("a+")?;
//! let top = &ast.annotations()[0];
//! assert_eq!(top.description, "literal 'a' repeated once or many times");
//! # Ok::<(), rexplain_syntax::Error>(())
//! ```

use thiserror::Error;

mod ast;
mod parser;


pub use ast::{Ast, Expr, ExprId};
pub use parser::{parse, parse_with_flags};
pub use rexplain_core::{Annotation, Flags, Op, Span};

/// Everything that can be wrong with a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("missing closing )")]
    MissingCloseParen,
    #[error("unexpected closing )")]
    UnexpectedCloseParen,
    #[error("missing closing ]")]
    MissingCloseBracket,
    #[error("missing argument to repetition operator")]
    MissingRepeatArgument,
    #[error("bad repetition operator")]
    NestedRepetition,
    #[error("invalid repeat count")]
    InvalidRepeatSize,
    #[error("invalid character class range")]
    InvalidCharRange,
    #[error("invalid POSIX class name {0:?}")]
    InvalidPosixClass(String),
    #[error("invalid escape sequence \\{0}")]
    InvalidEscape(char),
    #[error("trailing backslash at end of pattern")]
    TrailingBackslash,
    #[error("invalid named capture group")]
    InvalidNamedCapture,
    #[error("duplicate capture group name {0:?}")]
    DuplicateCaptureName(String),
    #[error("unsupported group syntax")]
    UnsupportedGroup,
    #[error("invalid group flag {0:?}")]
    InvalidFlag(char),
}

pub type Result<T> = std::result::Result<T, Error>;
