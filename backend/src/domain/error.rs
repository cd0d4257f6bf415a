//! Domain-level error kinds and the error carrier produced by use-case
//! handlers.
//!
//! These errors are transport agnostic. The HTTP adapter owns the single
//! mapping from [`ErrorKind`] to a status code, so nothing in the domain layer
//! knows about HTTP.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of failure categories a handler may report.
///
/// Adding a kind means adding a classification rule in the HTTP translator;
/// kinds without a rule fall through to the generic server error response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The addressed task or category does not exist.
    NotFound,
    /// Registration used a username that is already taken.
    IdentityUserAlreadyExists,
    /// The identity could not be created (password policy, hashing).
    IdentityCreationFailed,
    /// Login supplied the wrong password for an existing account.
    IncorrectPassword,
    /// The addressed account does not exist.
    IdentityUserNotFound,
    /// The caller tried to remove an account they do not own.
    UnauthorizedAccountRemoval,
    /// The caller's role does not permit the operation.
    UserNotAllowed,
    /// Any fault the handler could not classify.
    UnknownError,
}

impl ErrorKind {
    /// Stable snake_case name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::IdentityUserAlreadyExists => "identity_user_already_exists",
            Self::IdentityCreationFailed => "identity_creation_failed",
            Self::IncorrectPassword => "incorrect_password",
            Self::IdentityUserNotFound => "identity_user_not_found",
            Self::UnauthorizedAccountRemoval => "unauthorized_account_removal",
            Self::UserNotAllowed => "user_not_allowed",
            Self::UnknownError => "unknown_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message used whenever a role check rejects the caller.
pub const USER_NOT_ALLOWED_MESSAGE: &str = "User is not allowed to perform this action";

/// Domain error: a kind plus a human-readable message.
///
/// Values are immutable once built; equality is structural.
///
/// # Examples
/// ```
/// use taskboard::domain::{Error, ErrorKind};
///
/// let err = Error::not_found("No task found with id 42");
/// assert_eq!(err.kind(), ErrorKind::NotFound);
/// assert_eq!(err.message(), "No task found with id 42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Error {
    kind: ErrorKind,
    message: String,
}

impl Error {
    /// Build an error from a kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Failure category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Convenience constructor for [`ErrorKind::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Convenience constructor for [`ErrorKind::IdentityUserAlreadyExists`].
    pub fn identity_user_already_exists(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::IdentityUserAlreadyExists, message)
    }

    /// Convenience constructor for [`ErrorKind::IdentityCreationFailed`].
    pub fn identity_creation_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::IdentityCreationFailed, message)
    }

    /// Convenience constructor for [`ErrorKind::IncorrectPassword`].
    pub fn incorrect_password(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::IncorrectPassword, message)
    }

    /// Convenience constructor for [`ErrorKind::IdentityUserNotFound`].
    pub fn identity_user_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::IdentityUserNotFound, message)
    }

    /// Convenience constructor for [`ErrorKind::UnauthorizedAccountRemoval`].
    pub fn unauthorized_account_removal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnauthorizedAccountRemoval, message)
    }

    /// [`ErrorKind::UserNotAllowed`] with the standard denial message.
    #[must_use]
    pub fn user_not_allowed() -> Self {
        Self::new(ErrorKind::UserNotAllowed, USER_NOT_ALLOWED_MESSAGE)
    }

    /// Convenience constructor for [`ErrorKind::UnknownError`].
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownError, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for Error {}
