//! Error types for parsing core grid values.

use std::error::Error;
use std::fmt;

/// A region coordinate string was not in the canonical `"x z"` form.
///
/// Returned by [`RegionCoords::from_str`](crate::RegionCoords) and never
/// silently defaulted: callers decide whether a malformed string is fatal
/// (user input) or skippable (a stray file in the region store).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormatError {
    /// The string did not split into exactly two whitespace-separated fields.
    WrongFieldCount {
        /// How many fields were found.
        found: usize,
    },
    /// One of the two fields is not a decimal `i32`.
    InvalidInteger {
        /// Which axis failed to parse (`"x"` or `"z"`).
        field: &'static str,
        /// The offending text.
        value: String,
    },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongFieldCount { found } => {
                write!(f, "expected 2 coordinate fields \"x z\", found {found}")
            }
            Self::InvalidInteger { field, value } => {
                write!(f, "{field} coordinate '{value}' is not an integer")
            }
        }
    }
}

impl Error for FormatError {}
