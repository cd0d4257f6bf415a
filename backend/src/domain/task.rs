//! Task aggregate, its patch type and the payload projection handed to
//! transport adapters.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CategoryId, TaskId, UserId};

/// Maximum task title length in characters.
pub const MAX_TITLE_LENGTH: usize = 200;
/// Maximum task description length in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 4000;

/// Urgency of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Can wait.
    Low,
    /// Default priority.
    #[default]
    Medium,
    /// Needs attention first.
    High,
}

impl TaskPriority {
    /// Stable lowercase name stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a priority name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPriority(pub String);

impl fmt::Display for UnknownPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "priority must be one of low, medium, high (got '{}')", self.0)
    }
}

impl std::error::Error for UnknownPriority {}

impl FromStr for TaskPriority {
    type Err = UnknownPriority;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(UnknownPriority(s.to_owned())),
        }
    }
}

/// Validation failures for task text fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Title was blank once trimmed.
    EmptyTitle,
    /// Title exceeds [`MAX_TITLE_LENGTH`].
    TitleTooLong { max: usize },
    /// Description exceeds [`MAX_DESCRIPTION_LENGTH`].
    DescriptionTooLong { max: usize },
}

impl fmt::Display for TaskValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::TitleTooLong { max } => write!(f, "title must be at most {max} characters"),
            Self::DescriptionTooLong { max } => {
                write!(f, "description must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for TaskValidationError {}

/// Trim and validate a task title.
pub fn validate_title(raw: &str) -> Result<String, TaskValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TaskValidationError::EmptyTitle);
    }
    if trimmed.chars().count() > MAX_TITLE_LENGTH {
        return Err(TaskValidationError::TitleTooLong {
            max: MAX_TITLE_LENGTH,
        });
    }
    Ok(trimmed.to_owned())
}

/// Validate a task description; surrounding whitespace is preserved.
pub fn validate_description(raw: &str) -> Result<String, TaskValidationError> {
    if raw.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(TaskValidationError::DescriptionTooLong {
            max: MAX_DESCRIPTION_LENGTH,
        });
    }
    Ok(raw.to_owned())
}

/// A unit of work owned by one account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Stable identifier.
    pub id: TaskId,
    /// Account that created the task.
    pub owner_id: UserId,
    /// Short summary.
    pub title: String,
    /// Free-form details.
    pub description: String,
    /// Urgency.
    pub priority: TaskPriority,
    /// Completion flag.
    pub is_completed: bool,
    /// Optional grouping.
    pub category_id: Option<CategoryId>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Time of the last modification.
    pub updated_at: DateTime<Utc>,
}

/// Partial update applied to a [`Task`].
///
/// `None` leaves a field untouched. For `category_id`, `Some(None)` clears the
/// category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement priority.
    pub priority: Option<TaskPriority>,
    /// Replacement completion flag.
    pub is_completed: Option<bool>,
    /// Replacement category; `Some(None)` detaches the task.
    pub category_id: Option<Option<CategoryId>>,
}

impl TaskPatch {
    /// Whether the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.is_completed.is_none()
            && self.category_id.is_none()
    }

    /// Category the patch attaches, if any.
    #[must_use]
    pub fn new_category(&self) -> Option<CategoryId> {
        self.category_id.flatten()
    }
}

impl Task {
    /// Apply `patch` and stamp the modification time.
    pub fn apply(&mut self, patch: TaskPatch, now: DateTime<Utc>) {
        let TaskPatch {
            title,
            description,
            priority,
            is_completed,
            category_id,
        } = patch;
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(priority) = priority {
            self.priority = priority;
        }
        if let Some(is_completed) = is_completed {
            self.is_completed = is_completed;
        }
        if let Some(category_id) = category_id {
            self.category_id = category_id;
        }
        self.updated_at = now;
    }
}

/// Task projection returned by the task handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskPayload {
    pub id: TaskId,
    pub owner_id: UserId,
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    pub is_completed: bool,
    pub category_id: Option<CategoryId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Task> for TaskPayload {
    fn from(task: Task) -> Self {
        let Task {
            id,
            owner_id,
            title,
            description,
            priority,
            is_completed,
            category_id,
            created_at,
            updated_at,
        } = task;
        Self {
            id,
            owner_id,
            title,
            description,
            priority,
            is_completed,
            category_id,
            created_at,
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn sample_task() -> Task {
        let at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).single().expect("valid time");
        Task {
            id: TaskId::random(),
            owner_id: UserId::random(),
            title: "Write report".to_owned(),
            description: String::new(),
            priority: TaskPriority::Medium,
            is_completed: false,
            category_id: Some(CategoryId::random()),
            created_at: at,
            updated_at: at,
        }
    }

    #[rstest]
    #[case("low", TaskPriority::Low)]
    #[case("MEDIUM", TaskPriority::Medium)]
    #[case(" high ", TaskPriority::High)]
    fn parses_priorities(#[case] raw: &str, #[case] expected: TaskPriority) {
        assert_eq!(raw.parse::<TaskPriority>(), Ok(expected));
    }

    #[test]
    fn rejects_unknown_priority() {
        assert!("urgent".parse::<TaskPriority>().is_err());
    }

    #[rstest]
    #[case("", TaskValidationError::EmptyTitle)]
    #[case("   ", TaskValidationError::EmptyTitle)]
    fn rejects_blank_titles(#[case] raw: &str, #[case] expected: TaskValidationError) {
        assert_eq!(validate_title(raw), Err(expected));
    }

    #[test]
    fn trims_titles() {
        assert_eq!(validate_title("  Ship it "), Ok("Ship it".to_owned()));
    }

    #[test]
    fn rejects_overlong_description() {
        let raw = "x".repeat(MAX_DESCRIPTION_LENGTH + 1);
        assert!(validate_description(&raw).is_err());
    }

    #[test]
    fn apply_updates_only_present_fields() {
        let mut task = sample_task();
        let original = task.clone();
        let later = original.updated_at + chrono::Duration::minutes(5);

        task.apply(
            TaskPatch {
                is_completed: Some(true),
                ..TaskPatch::default()
            },
            later,
        );

        assert!(task.is_completed);
        assert_eq!(task.title, original.title);
        assert_eq!(task.category_id, original.category_id);
        assert_eq!(task.created_at, original.created_at);
        assert_eq!(task.updated_at, later);
    }

    #[test]
    fn apply_can_clear_category() {
        let mut task = sample_task();
        let now = task.updated_at;
        task.apply(
            TaskPatch {
                category_id: Some(None),
                ..TaskPatch::default()
            },
            now,
        );
        assert!(task.category_id.is_none());
    }

    #[test]
    fn empty_patch_is_detected() {
        assert!(TaskPatch::default().is_empty());
        assert!(
            !TaskPatch {
                priority: Some(TaskPriority::High),
                ..TaskPatch::default()
            }
            .is_empty()
        );
    }

    #[test]
    fn payload_preserves_identity() {
        let task = sample_task();
        let payload = TaskPayload::from(task.clone());
        assert_eq!(payload.id, task.id);
        assert_eq!(payload.owner_id, task.owner_id);
    }
}
