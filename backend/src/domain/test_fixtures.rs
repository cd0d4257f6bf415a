//! Shared fixtures for domain unit tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{
    Account, CallerIdentity, Category, CategoryId, CategoryName, PasswordHash, Task,
    TaskPriority, TaskId, UserId, UserRole, Username,
};

pub(crate) struct FixtureClock {
    pub(crate) utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub(crate) fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53)
        .single()
        .expect("valid fixture timestamp")
}

pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

pub(crate) fn caller(role: UserRole) -> CallerIdentity {
    CallerIdentity::new(UserId::random(), role)
}

pub(crate) fn task_owned_by(owner: UserId) -> Task {
    let at = fixture_timestamp() - chrono::Duration::days(1);
    Task {
        id: TaskId::random(),
        owner_id: owner,
        title: "Prepare release notes".to_owned(),
        description: "Collect merged changes".to_owned(),
        priority: TaskPriority::High,
        is_completed: false,
        category_id: None,
        created_at: at,
        updated_at: at,
    }
}

pub(crate) fn category(name: &str) -> Category {
    let at = fixture_timestamp() - chrono::Duration::days(2);
    Category {
        id: CategoryId::random(),
        name: CategoryName::new(name).expect("valid category name"),
        created_at: at,
        updated_at: at,
    }
}

pub(crate) fn account(username: &str, role: UserRole) -> Account {
    Account {
        id: UserId::random(),
        username: Username::new(username).expect("valid username"),
        password_hash: PasswordHash::new("hashed:secret-password"),
        role,
        created_at: fixture_timestamp(),
    }
}
