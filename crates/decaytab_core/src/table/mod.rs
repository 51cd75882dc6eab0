//! Decay-table parsers for the code-indexed and name-indexed dialects.
//!
//! # Responsibility
//! - Turn raw decay-table text into ordered decay blocks.
//! - Reject malformed input with an error naming line, parent and channel.
//!
//! # Invariants
//! - Parsers never skip a malformed line; the first grammar error aborts.
//! - Text after `#` is a comment; blank lines are ignored.
//! - Blocks and channels keep source order.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod code_table;
pub mod name_table;

pub use code_table::parse_code_table;
pub use name_table::parse_name_table;

pub type TableResult<T> = Result<T, TableError>;

/// Grammar error in a decay table.
///
/// `line` is 1-based; `channel` is the 1-based channel index inside the
/// parent's block; `parent` is the parent as written in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    InvalidParent {
        line: usize,
        token: String,
    },
    MissingChannelCount {
        line: usize,
        parent: String,
    },
    InvalidChannelCount {
        line: usize,
        parent: String,
        token: String,
    },
    ChannelCountMismatch {
        line: usize,
        parent: String,
        declared: usize,
        found: usize,
    },
    ChannelTooShort {
        line: usize,
        parent: String,
        channel: usize,
        min_tokens: usize,
    },
    InvalidBranchingRatio {
        line: usize,
        parent: String,
        channel: usize,
        token: String,
    },
    InvalidDaughter {
        line: usize,
        parent: String,
        channel: usize,
        token: String,
    },
    ChannelBeforeParent {
        line: usize,
    },
}

impl TableError {
    /// Source line the error points at.
    pub fn line(&self) -> usize {
        match self {
            Self::InvalidParent { line, .. }
            | Self::MissingChannelCount { line, .. }
            | Self::InvalidChannelCount { line, .. }
            | Self::ChannelCountMismatch { line, .. }
            | Self::ChannelTooShort { line, .. }
            | Self::InvalidBranchingRatio { line, .. }
            | Self::InvalidDaughter { line, .. }
            | Self::ChannelBeforeParent { line } => *line,
        }
    }
}

impl Display for TableError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidParent { line, token } => {
                write!(f, "line {line}: expected parent particle code, got `{token}`")
            }
            Self::MissingChannelCount { line, parent } => {
                write!(f, "line {line}: missing channel count after parent {parent}")
            }
            Self::InvalidChannelCount {
                line,
                parent,
                token,
            } => write!(
                f,
                "line {line}: expected integer channel count after parent {parent}, got `{token}`"
            ),
            Self::ChannelCountMismatch {
                line,
                parent,
                declared,
                found,
            } => write!(
                f,
                "line {line}: parent {parent} declares {declared} channels but {found} are present"
            ),
            Self::ChannelTooShort {
                line,
                parent,
                channel,
                min_tokens,
            } => write!(
                f,
                "line {line}: [{parent}] channel {channel}: expected at least {min_tokens} fields"
            ),
            Self::InvalidBranchingRatio {
                line,
                parent,
                channel,
                token,
            } => write!(
                f,
                "line {line}: [{parent}] channel {channel}: invalid branching ratio `{token}`"
            ),
            Self::InvalidDaughter {
                line,
                parent,
                channel,
                token,
            } => write!(
                f,
                "line {line}: [{parent}] channel {channel}: invalid daughter `{token}`"
            ),
            Self::ChannelBeforeParent { line } => {
                write!(f, "line {line}: channel line appears before any parent")
            }
        }
    }
}

impl Error for TableError {}

/// Yields `(line_number, content)` for every line that is non-empty after
/// stripping a `#` comment and surrounding whitespace.
pub(crate) fn content_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines().enumerate().filter_map(|(idx, raw)| {
        let content = raw.split('#').next().unwrap_or("").trim();
        (!content.is_empty()).then_some((idx + 1, content))
    })
}

/// Parses a finite real number; `nan` and `inf` spellings are rejected.
pub(crate) fn parse_real(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::{content_lines, parse_real, TableError};

    #[test]
    fn content_lines_strip_comments_and_blanks() {
        let text = "# header\n\n  211  # pion\n   \n2\n";
        let lines: Vec<(usize, &str)> = content_lines(text).collect();
        assert_eq!(lines, vec![(3, "211"), (5, "2")]);
    }

    #[test]
    fn parse_real_rejects_non_finite_spellings() {
        assert_eq!(parse_real("0.25"), Some(0.25));
        assert_eq!(parse_real("1"), Some(1.0));
        assert_eq!(parse_real("1e-3"), Some(1e-3));
        assert_eq!(parse_real("nan"), None);
        assert_eq!(parse_real("inf"), None);
        assert_eq!(parse_real("pi+"), None);
    }

    #[test]
    fn display_names_parent_and_channel() {
        let err = TableError::InvalidBranchingRatio {
            line: 7,
            parent: "2212".to_string(),
            channel: 2,
            token: "x".to_string(),
        };
        assert_eq!(err.line(), 7);
        assert_eq!(
            err.to_string(),
            "line 7: [2212] channel 2: invalid branching ratio `x`"
        );
    }
}
