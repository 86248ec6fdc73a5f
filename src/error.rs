use std::error::Error;
use std::fmt;

/// An index or range argument fell outside the bounds of a snapshot.
///
/// This is the only way an operation can fail. A failed call leaves the
/// receiver and every other snapshot of its tree untouched and takes no
/// version id.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OutOfRange {
    /// A single position was requested.
    Index { index: usize, len: usize },
    /// A half-open `from..to` range was requested.
    Range { from: usize, to: usize, len: usize },
}

impl OutOfRange {
    /// Accepts `index` if it addresses an existing element.
    pub(crate) fn check_access(index: usize, len: usize) -> Result<(), Self> {
        if index < len {
            Ok(())
        } else {
            Err(OutOfRange::Index { index, len })
        }
    }

    /// Accepts `index` if an element can be inserted before it, which
    /// includes the position one past the end.
    pub(crate) fn check_insert(index: usize, len: usize) -> Result<(), Self> {
        if index <= len {
            Ok(())
        } else {
            Err(OutOfRange::Index { index, len })
        }
    }

    pub(crate) fn check_range(from: usize, to: usize, len: usize) -> Result<(), Self> {
        if from <= to && to <= len {
            Ok(())
        } else {
            Err(OutOfRange::Range { from, to, len })
        }
    }

    /// Length of the snapshot the failed call was made on.
    pub fn snapshot_len(&self) -> usize {
        match self {
            OutOfRange::Index { len, .. } | OutOfRange::Range { len, .. } => *len,
        }
    }
}

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutOfRange::Index { index, len } => {
                write!(f, "index {} out of range for length {}", index, len)
            }
            OutOfRange::Range { from, to, len } => {
                write!(f, "range {}..{} out of range for length {}", from, to, len)
            }
        }
    }
}

impl Error for OutOfRange {}
