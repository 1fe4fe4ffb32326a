//! Array-specific error types.

use std::error::Error;
use std::fmt;

/// Errors reported by checked array operations.
///
/// Only checked accessors produce these. Allocation failure is not
/// represented: it aborts through the global allocation error handler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArrayError {
    /// A bounds-checked access used an index at or past the live length.
    OutOfRange {
        /// The requested index.
        index: usize,
        /// Number of live elements at the time of the access.
        len: usize,
    },
}

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { index, len } => {
                write!(f, "index {index} out of range for length {len}")
            }
        }
    }
}

impl Error for ArrayError {}
