//! Category aggregate used to group tasks.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::CategoryId;

/// Maximum category name length in characters.
pub const MAX_CATEGORY_NAME_LENGTH: usize = 100;

/// Validation failures for category names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryNameError {
    Empty,
    TooLong { max: usize },
}

impl fmt::Display for CategoryNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "category name must not be empty"),
            Self::TooLong { max } => write!(f, "category name must be at most {max} characters"),
        }
    }
}

impl std::error::Error for CategoryNameError {}

/// Trimmed, non-empty category name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CategoryName(String);

impl CategoryName {
    /// Validate a raw name.
    pub fn new(raw: &str) -> Result<Self, CategoryNameError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CategoryNameError::Empty);
        }
        if trimmed.chars().count() > MAX_CATEGORY_NAME_LENGTH {
            return Err(CategoryNameError::TooLong {
                max: MAX_CATEGORY_NAME_LENGTH,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shared grouping for tasks, managed by administrators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Category projection returned by the category handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryPayload {
    pub id: CategoryId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryPayload {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name.0,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}
