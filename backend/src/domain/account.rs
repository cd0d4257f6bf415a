//! Registered accounts and the credential primitives used to create them.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use chrono::{DateTime, Utc};
use zeroize::Zeroizing;

use super::{UserId, UserRole};

/// Minimum number of characters a new password must contain.
pub const MIN_PASSWORD_LENGTH: usize = 8;
/// Longest password bcrypt accepts without truncation (72 bytes including the
/// terminating NUL).
pub const MAX_PASSWORD_BYTES: usize = 71;
/// Maximum username length accepted at registration.
pub const MAX_USERNAME_LENGTH: usize = 64;

/// Validation failures for usernames and passwords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Username exceeds [`MAX_USERNAME_LENGTH`].
    UsernameTooLong { max: usize },
    /// Username contains characters outside `[A-Za-z0-9._-]`.
    UsernameInvalidCharacters,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
            Self::UsernameInvalidCharacters => write!(
                f,
                "username may only contain letters, numbers, dots, dashes, or underscores"
            ),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

/// Validated username.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Trim and validate a raw username.
    pub fn new(raw: &str) -> Result<Self, CredentialsValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CredentialsValidationError::EmptyUsername);
        }
        if trimmed.chars().count() > MAX_USERNAME_LENGTH {
            return Err(CredentialsValidationError::UsernameTooLong {
                max: MAX_USERNAME_LENGTH,
            });
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        {
            return Err(CredentialsValidationError::UsernameInvalidCharacters);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the username.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validated username/password pair.
///
/// ## Invariants
/// - `username` satisfies [`Username::new`].
/// - `password` is non-empty but retains caller-provided whitespace.
///
/// # Examples
/// ```
/// use taskboard::domain::Credentials;
///
/// let creds = Credentials::try_from_parts(" alice ", "hunter22").unwrap();
/// assert_eq!(creds.username().as_str(), "alice");
/// assert_eq!(creds.password(), "hunter22");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    username: Username,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(
        username: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let username = Username::new(username)?;
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self {
            username,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username suitable for account lookups.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Password as provided by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Stored password hash. Never serialised into responses.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded hash string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// Registered account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Stable identifier.
    pub id: UserId,
    /// Unique login name.
    pub username: Username,
    /// Encoded password hash.
    pub password_hash: PasswordHash,
    /// Granted role.
    pub role: UserRole,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Account projection returned to clients; never includes the hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountPayload {
    pub id: UserId,
    pub username: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountPayload {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username.0,
            role: account.role,
            created_at: account.created_at,
        }
    }
}
