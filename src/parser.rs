//! Edge-list parsing.
//!
//! ## Format
//!
//! ```text
//! 4            <- declared user count N; valid ids are 1..=N
//! 1 2          <- coach 1 coaches 2
//! 2 3,5        <- ids separated by spaces and/or commas
//! 4            <- a coach with no students
//! # notes      <- comment marker (see CommentPolicy)
//! ```
//!
//! Blank lines are skipped. Every id is validated against the declared range
//! while parsing, so a record that reaches the partition is always in range.

use std::fmt;
use std::io::{BufRead, Lines};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::CoachingRecord;

/// Error type for edge-list parsing.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// The stream had no header line.
    #[error("missing header: the first line must hold the number of users")]
    MissingHeader,
    /// The header was not a user count.
    #[error("invalid header {0:?}: expected the number of users")]
    InvalidHeader(String),
    /// The header declared more users than a graph may hold.
    #[error("header declares {declared} users, at most {max} are supported")]
    TooManyUsers {
        /// Declared user count.
        declared: u32,
        /// Largest accepted user count.
        max: u32,
    },
    /// A token that is not a user id.
    #[error("line {line}: invalid user id {token:?}")]
    InvalidId {
        /// 1-based line number.
        line: usize,
        /// The offending token.
        token: String,
    },
    /// A user id outside `1..=max`.
    #[error("line {line}: user id {id} is outside 1..={max}")]
    IdOutOfRange {
        /// 1-based line number.
        line: usize,
        /// The offending id.
        id: u32,
        /// Declared user count.
        max: u32,
    },
    /// The partition refused a record.
    #[error("record rejected: {0}")]
    Rejected(#[from] crate::store::VertexError),
    /// Reading the stream failed.
    #[error("read error: {0}")]
    Io(#[from] std::io::Error),
}

/// Largest user count a header may declare.
///
/// The vertex table is sized from the header, so this caps its allocation.
pub const MAX_USERS: u32 = 10_000_000;

/// What a comment line does to the rest of the stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentPolicy {
    /// Stop reading at the first comment; everything after it is ignored.
    #[default]
    Terminate,
    /// Ignore the comment line and keep reading.
    Skip,
}

impl CommentPolicy {
    /// Parse a policy name.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "terminate" | "stop" => Some(Self::Terminate),
            "skip" => Some(Self::Skip),
            _ => None,
        }
    }
}

impl fmt::Display for CommentPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terminate => write!(f, "terminate"),
            Self::Skip => write!(f, "skip"),
        }
    }
}

/// Edge-list parsing options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Character that starts a comment line.
    pub comment_marker: char,
    /// Behaviour on a comment line.
    pub on_comment: CommentPolicy,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            comment_marker: '#',
            on_comment: CommentPolicy::Terminate,
        }
    }
}

/// Streaming reader over an edge list.
///
/// The header is consumed by [`EdgeListReader::new`]; iteration yields one
/// [`CoachingRecord`] per record line.
pub struct EdgeListReader<R> {
    lines: Lines<R>,
    line: usize,
    declared: u32,
    options: ParseOptions,
    done: bool,
}

impl<R: BufRead> EdgeListReader<R> {
    /// Read the header and prepare to stream records.
    pub fn new(reader: R, options: ParseOptions) -> Result<Self, FormatError> {
        let mut lines = reader.lines();
        let header = lines.next().ok_or(FormatError::MissingHeader)??;
        let declared = parse_header(&header)?;
        Ok(Self {
            lines,
            line: 1,
            declared,
            options,
            done: false,
        })
    }

    /// Declared user count.
    pub fn declared(&self) -> u32 {
        self.declared
    }

    fn next_record(&mut self) -> Result<Option<CoachingRecord>, FormatError> {
        while !self.done {
            let Some(line) = self.lines.next() else {
                self.done = true;
                break;
            };
            let line = line?;
            self.line += 1;

            if line.trim_start().starts_with(self.options.comment_marker) {
                match self.options.on_comment {
                    CommentPolicy::Terminate => {
                        debug!(line = self.line, "comment reached, ignoring the rest of the input");
                        self.done = true;
                        break;
                    }
                    CommentPolicy::Skip => continue,
                }
            }

            if let Some(record) = parse_record(&line, self.line, self.declared)? {
                return Ok(Some(record));
            }
        }
        Ok(None)
    }
}

impl<R: BufRead> Iterator for EdgeListReader<R> {
    type Item = Result<CoachingRecord, FormatError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_record() {
            Ok(record) => record.map(Ok),
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

fn parse_header(header: &str) -> Result<u32, FormatError> {
    let trimmed = header.trim();
    let declared: u32 = trimmed
        .parse()
        .map_err(|_| FormatError::InvalidHeader(trimmed.to_string()))?;
    if declared > MAX_USERS {
        return Err(FormatError::TooManyUsers {
            declared,
            max: MAX_USERS,
        });
    }
    Ok(declared)
}

/// Parse one record line. Returns `None` for a line with no tokens.
pub fn parse_record(
    line: &str,
    line_no: usize,
    declared: u32,
) -> Result<Option<CoachingRecord>, FormatError> {
    let mut ids = Vec::new();
    for token in line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        let id: u32 = token.parse().map_err(|_| FormatError::InvalidId {
            line: line_no,
            token: token.to_string(),
        })?;
        if id == 0 || id > declared {
            return Err(FormatError::IdOutOfRange {
                line: line_no,
                id,
                max: declared,
            });
        }
        ids.push(id);
    }

    let mut ids = ids.into_iter();
    Ok(ids
        .next()
        .map(|coach| CoachingRecord::new(coach, ids.collect())))
}
