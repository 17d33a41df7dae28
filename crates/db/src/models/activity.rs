//! Training activity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use sakap_core::types::{DbId, Timestamp};

/// A row from the `activities` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Activity {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub venue: Option<String>,
    pub starts_at: Timestamp,
    pub ends_at: Option<Timestamp>,
    /// Maximum number of registrants. `None` means unlimited.
    pub capacity: Option<i32>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Activity enriched with its current registration count.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActivityWithCount {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub venue: Option<String>,
    pub starts_at: Timestamp,
    pub ends_at: Option<Timestamp>,
    pub capacity: Option<i32>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub registration_count: i64,
}

/// DTO for creating an activity.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateActivity {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    pub venue: Option<String>,
    pub starts_at: Timestamp,
    pub ends_at: Option<Timestamp>,
    #[validate(range(min = 1))]
    pub capacity: Option<i32>,
}

/// DTO for updating an activity. All fields optional.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateActivity {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub venue: Option<String>,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
    pub capacity: Option<i32>,
}

/// A row from the `activity_registrations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActivityRegistration {
    pub id: DbId,
    pub activity_id: DbId,
    pub user_id: DbId,
    pub created_at: Timestamp,
}

/// Outcome of a registration attempt against an existing activity.
#[derive(Debug, Clone)]
pub enum RegistrationOutcome {
    /// A new registration row was created.
    Registered(ActivityRegistration),
    /// The user already holds a registration for this activity.
    AlreadyRegistered,
    /// The activity is at capacity.
    Full,
}
