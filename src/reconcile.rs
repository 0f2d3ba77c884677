//! Post-fetch count reconciliation.
//!
//! After a paginated fetch drains its pages, the number of retrieved records
//! is compared against the server's authoritative total. A mismatch in either
//! direction means the server paginated inconsistently (records created or
//! deleted mid-fetch) and is surfaced as an error: silently dropping or
//! padding records would break the completeness contract callers depend on.

use crate::error::{GlueError, Result};

/// Outcome of comparing retrieved records against the reported total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Counts match exactly.
    Complete,
    /// More records retrieved than the server reported.
    Overrun { actual: usize, expected: u64 },
    /// Fewer records retrieved with no further page available.
    Undercount { actual: usize, expected: u64 },
}

/// Classify a finished fetch.
#[must_use]
pub fn reconcile(actual: usize, expected: u64) -> Outcome {
    match (actual as u64).cmp(&expected) {
        std::cmp::Ordering::Equal => Outcome::Complete,
        std::cmp::Ordering::Greater => Outcome::Overrun { actual, expected },
        std::cmp::Ordering::Less => Outcome::Undercount { actual, expected },
    }
}

impl Outcome {
    /// Convert to a result, treating anything but [`Outcome::Complete`] as a
    /// terminal [`GlueError::ReconciliationMismatch`].
    pub(crate) fn into_result(self) -> Result<()> {
        match self {
            Self::Complete => Ok(()),
            Self::Overrun { actual, expected } | Self::Undercount { actual, expected } => {
                tracing::error!(actual, expected, "pagination reconciliation mismatch");
                Err(GlueError::ReconciliationMismatch { actual, expected })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_is_complete() {
        assert_eq!(reconcile(5, 5), Outcome::Complete);
        assert_eq!(reconcile(0, 0), Outcome::Complete);
    }

    #[test]
    fn test_overrun() {
        assert_eq!(
            reconcile(6, 5),
            Outcome::Overrun {
                actual: 6,
                expected: 5
            }
        );
    }

    #[test]
    fn test_undercount() {
        assert_eq!(
            reconcile(4, 5),
            Outcome::Undercount {
                actual: 4,
                expected: 5
            }
        );
    }

    #[test]
    fn test_mismatch_converts_to_error() {
        let err = reconcile(6, 5).into_result().unwrap_err();
        match err {
            GlueError::ReconciliationMismatch { actual, expected } => {
                assert_eq!(actual, 6);
                assert_eq!(expected, 5);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
