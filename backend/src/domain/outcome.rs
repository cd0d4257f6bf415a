//! Uniform success/failure envelope returned by every use-case handler.
//!
//! A handler either produces a payload or one or more [`Error`] values, never
//! both. The payload is only reachable through [`OperationResult::into_result`],
//! so callers have to branch on failure before they can touch it.

use super::{Error, ErrorKind};

/// Ordered, non-empty sequence of errors carried by a failed
/// [`OperationResult`].
///
/// ## Invariants
/// - Always holds at least one error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorList(Vec<Error>);

impl ErrorList {
    /// Start a list with a single error.
    #[must_use]
    pub fn new(first: Error) -> Self {
        Self(vec![first])
    }

    /// Build a list from a vector, returning `None` when it is empty.
    #[must_use]
    pub fn from_vec(errors: Vec<Error>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self(errors))
        }
    }

    /// Append another error, keeping insertion order.
    pub fn push(&mut self, error: Error) {
        self.0.push(error);
    }

    /// Errors in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[Error] {
        self.0.as_slice()
    }

    /// Iterate the errors in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Error> {
        self.0.iter()
    }

    /// Number of errors; never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; present for API symmetry with collections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First error whose kind equals `kind`.
    #[must_use]
    pub fn first_of_kind(&self, kind: ErrorKind) -> Option<&Error> {
        self.0.iter().find(|error| error.kind() == kind)
    }

    /// Whether any error carries `kind`.
    #[must_use]
    pub fn contains_kind(&self, kind: ErrorKind) -> bool {
        self.first_of_kind(kind).is_some()
    }
}

impl From<Error> for ErrorList {
    fn from(error: Error) -> Self {
        Self::new(error)
    }
}

impl IntoIterator for ErrorList {
    type Item = Error;
    type IntoIter = std::vec::IntoIter<Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ErrorList {
    type Item = &'a Error;
    type IntoIter = std::slice::Iter<'a, Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Outcome<T> {
    Success(T),
    Failure(ErrorList),
}

/// Result of a single use-case invocation.
///
/// Created per call and consumed once by the transport adapter.
///
/// # Examples
/// ```
/// use taskboard::domain::{Error, ErrorKind, OperationResult};
///
/// let ok = OperationResult::success(7);
/// assert!(!ok.is_error());
/// assert_eq!(ok.into_result().ok(), Some(7));
///
/// let failed = OperationResult::success(7).with_error(Error::not_found("gone"));
/// assert!(failed.is_error());
/// let errors = failed.into_result().expect_err("payload was discarded");
/// assert_eq!(errors.as_slice()[0].kind(), ErrorKind::NotFound);
/// ```
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationResult<T> {
    outcome: Outcome<T>,
}

impl<T> OperationResult<T> {
    /// Successful result carrying `payload`.
    pub fn success(payload: T) -> Self {
        Self {
            outcome: Outcome::Success(payload),
        }
    }

    /// Failed result carrying a single error.
    pub fn failure(error: Error) -> Self {
        Self::from_errors(ErrorList::new(error))
    }

    /// Failed result carrying an existing error list.
    pub fn from_errors(errors: ErrorList) -> Self {
        Self {
            outcome: Outcome::Failure(errors),
        }
    }

    /// `true` exactly when at least one error is present.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.outcome, Outcome::Failure(_))
    }

    /// Errors recorded so far; empty for successful results.
    #[must_use]
    pub fn errors(&self) -> &[Error] {
        match &self.outcome {
            Outcome::Success(_) => &[],
            Outcome::Failure(errors) => errors.as_slice(),
        }
    }

    /// Append an error. A successful result drops its payload and becomes a
    /// failure.
    pub fn with_error(self, error: Error) -> Self {
        match self.outcome {
            Outcome::Success(_) => Self::failure(error),
            Outcome::Failure(mut errors) => {
                errors.push(error);
                Self::from_errors(errors)
            }
        }
    }

    /// Transform the payload, leaving failures untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> OperationResult<U> {
        match self.outcome {
            Outcome::Success(payload) => OperationResult::success(f(payload)),
            Outcome::Failure(errors) => OperationResult::from_errors(errors),
        }
    }

    /// Convert into a standard `Result`, the only way to reach the payload.
    ///
    /// # Errors
    /// Returns the error list when the result failed.
    pub fn into_result(self) -> Result<T, ErrorList> {
        match self.outcome {
            Outcome::Success(payload) => Ok(payload),
            Outcome::Failure(errors) => Err(errors),
        }
    }
}

impl<T> From<Result<T, Error>> for OperationResult<T> {
    fn from(result: Result<T, Error>) -> Self {
        match result {
            Ok(payload) => Self::success(payload),
            Err(error) => Self::failure(error),
        }
    }
}
