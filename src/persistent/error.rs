//! Error types for the persistent tree.

/// Represents the absence of a value equal to the one an operation targeted.
///
/// Returned by the `try_delete*` family of
/// [`PersistentAvlTree`](super::PersistentAvlTree) when nothing was removed.
///
/// # Examples
///
/// ```rust
/// use persistent_avl::persistent::{NotFoundError, PersistentAvlTree};
///
/// let tree = PersistentAvlTree::new().put(1);
/// let error = tree.try_delete(&2).unwrap_err();
///
/// assert_eq!(error, NotFoundError { operation: "try_delete" });
/// assert_eq!(
///     format!("{error}"),
///     "try_delete: no element equal to the given value"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotFoundError {
    /// The name of the operation that found no match.
    pub operation: &'static str,
}

impl std::fmt::Display for NotFoundError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{}: no element equal to the given value",
            self.operation
        )
    }
}

impl std::error::Error for NotFoundError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("try_delete")]
    #[case("try_delete_lower")]
    #[case("try_delete_upper")]
    fn test_not_found_error_display(#[case] operation: &'static str) {
        let error = NotFoundError { operation };
        assert_eq!(
            format!("{error}"),
            format!("{operation}: no element equal to the given value")
        );
    }

    #[rstest]
    fn test_not_found_error_is_std_error() {
        let error: Box<dyn std::error::Error> = Box::new(NotFoundError {
            operation: "try_delete",
        });
        assert!(error.source().is_none());
    }
}
