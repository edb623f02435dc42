use std::fmt;

/// The ways an operation on a [`List`](crate::List) or a
/// [`Cursor`](crate::Cursor) can fail.
///
/// Every failure is local and recoverable: the list is left exactly as it
/// was before the failing call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ListError {
    /// An index argument lies outside its valid range. `bound` is the
    /// exclusive upper limit that was violated, i.e. `len + 1` for
    /// insertion-like operations and `len` for reads, replacements and
    /// removals.
    IndexOutOfRange { index: usize, bound: usize },
    /// The operation needs at least one element in the requested
    /// direction, but there is none.
    EmptyCollection,
    /// A value-based operation could not find its target.
    NotFound,
    /// `remove` or `set` was called on a cursor that has no element to act on.
    InvalidCursorState,
    /// The cursor was issued by a different list, or the list was modified
    /// behind the cursor's back.
    ConcurrentModification { expected: u64, actual: u64 },
}

impl ListError {
    #[inline]
    pub(crate) fn index_out_of_range(index: usize, bound: usize) -> Self {
        ListError::IndexOutOfRange { index, bound }
    }

    /// Returns `true` for [`ListError::ConcurrentModification`].
    #[inline]
    pub fn is_concurrent_modification(&self) -> bool {
        matches!(self, ListError::ConcurrentModification { .. })
    }
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListError::IndexOutOfRange { index, bound } => {
                write!(f, "index {} is out of range (must be below {})", index, bound)
            }
            ListError::EmptyCollection => write!(f, "no element in the requested direction"),
            ListError::NotFound => write!(f, "target element not found"),
            ListError::InvalidCursorState => {
                write!(f, "cursor has no element to act on (call next or previous first)")
            }
            ListError::ConcurrentModification { expected, actual } => write!(
                f,
                "list was modified outside this cursor (expected modification count {}, found {})",
                expected, actual
            ),
        }
    }
}

impl std::error::Error for ListError {}

/// Shorthand for results of list and cursor operations.
pub type Result<T> = std::result::Result<T, ListError>;

#[cfg(test)]
mod tests {
    use super::ListError;

    #[test]
    fn error_display() {
        assert_eq!(
            ListError::index_out_of_range(4, 3).to_string(),
            "index 4 is out of range (must be below 3)"
        );
        assert_eq!(
            ListError::EmptyCollection.to_string(),
            "no element in the requested direction"
        );
        let stale = ListError::ConcurrentModification {
            expected: 1,
            actual: 2,
        };
        assert!(stale.is_concurrent_modification());
        assert!(!ListError::NotFound.is_concurrent_modification());
        assert!(stale.to_string().contains("expected modification count 1, found 2"));
    }
}
