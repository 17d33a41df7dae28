//! Repository for training activities and registrations.

use sqlx::PgPool;

use sakap_core::types::DbId;

use crate::models::activity::{
    Activity, ActivityRegistration, ActivityWithCount, CreateActivity, RegistrationOutcome,
    UpdateActivity,
};

/// Column list for `activities` queries.
const ACTIVITY_COLUMNS: &str = "\
    id, title, description, venue, starts_at, ends_at, capacity, \
    created_by, created_at, updated_at";

/// Column list for `activity_registrations` queries.
const REGISTRATION_COLUMNS: &str = "id, activity_id, user_id, created_at";

/// Provides CRUD and registration operations for training activities.
pub struct ActivityRepo;

impl ActivityRepo {
    /// Create a new activity.
    pub async fn create(
        pool: &PgPool,
        input: &CreateActivity,
        created_by: Option<DbId>,
    ) -> Result<Activity, sqlx::Error> {
        let query = format!(
            "INSERT INTO activities (title, description, venue, starts_at, ends_at, capacity, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {ACTIVITY_COLUMNS}"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(input.title.trim())
            .bind(input.description.as_deref())
            .bind(input.venue.as_deref())
            .bind(input.starts_at)
            .bind(input.ends_at)
            .bind(input.capacity)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Find an activity by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Activity>, sqlx::Error> {
        let query = format!("SELECT {ACTIVITY_COLUMNS} FROM activities WHERE id = $1");
        sqlx::query_as::<_, Activity>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List activities with registration counts, soonest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<ActivityWithCount>, sqlx::Error> {
        sqlx::query_as::<_, ActivityWithCount>(
            "SELECT a.id, a.title, a.description, a.venue, a.starts_at, a.ends_at, \
                    a.capacity, a.created_by, a.created_at, a.updated_at, \
                    COUNT(r.id) AS registration_count \
             FROM activities a \
             LEFT JOIN activity_registrations r ON r.activity_id = a.id \
             GROUP BY a.id \
             ORDER BY a.starts_at",
        )
        .fetch_all(pool)
        .await
    }

    /// Update an activity. Returns the updated row, or `None` if not found.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateActivity,
    ) -> Result<Option<Activity>, sqlx::Error> {
        let query = format!(
            "UPDATE activities SET \
                title = COALESCE($2, title), \
                description = COALESCE($3, description), \
                venue = COALESCE($4, venue), \
                starts_at = COALESCE($5, starts_at), \
                ends_at = COALESCE($6, ends_at), \
                capacity = COALESCE($7, capacity) \
             WHERE id = $1 \
             RETURNING {ACTIVITY_COLUMNS}"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(id)
            .bind(input.title.as_deref())
            .bind(input.description.as_deref())
            .bind(input.venue.as_deref())
            .bind(input.starts_at)
            .bind(input.ends_at)
            .bind(input.capacity)
            .fetch_optional(pool)
            .await
    }

    /// Delete an activity. Cascades to registrations.
    /// Returns true if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM activities WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Register a user for an activity.
    ///
    /// The activity row is locked for the duration of the transaction so the
    /// capacity check and the insert are atomic -- two racing registrants
    /// cannot both take the last slot. Duplicate registrations are absorbed
    /// by the unique constraint.
    ///
    /// Returns `None` if the activity does not exist.
    pub async fn register(
        pool: &PgPool,
        activity_id: DbId,
        user_id: DbId,
    ) -> Result<Option<RegistrationOutcome>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let activity: Option<(Option<i32>,)> =
            sqlx::query_as("SELECT capacity FROM activities WHERE id = $1 FOR UPDATE")
                .bind(activity_id)
                .fetch_optional(&mut *tx)
                .await?;

        let capacity = match activity {
            Some((capacity,)) => capacity,
            None => {
                tx.rollback().await?;
                return Ok(None);
            }
        };

        if let Some(capacity) = capacity {
            let (registered,): (i64,) = sqlx::query_as(
                "SELECT COUNT(*) FROM activity_registrations WHERE activity_id = $1",
            )
            .bind(activity_id)
            .fetch_one(&mut *tx)
            .await?;

            if registered >= i64::from(capacity) {
                tx.rollback().await?;
                return Ok(Some(RegistrationOutcome::Full));
            }
        }

        let query = format!(
            "INSERT INTO activity_registrations (activity_id, user_id) VALUES ($1, $2) \
             ON CONFLICT (activity_id, user_id) DO NOTHING \
             RETURNING {REGISTRATION_COLUMNS}"
        );
        let registration = sqlx::query_as::<_, ActivityRegistration>(&query)
            .bind(activity_id)
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Some(match registration {
            Some(registration) => RegistrationOutcome::Registered(registration),
            None => RegistrationOutcome::AlreadyRegistered,
        }))
    }

    /// Remove a user's registration. Returns true if a row was deleted.
    pub async fn unregister(
        pool: &PgPool,
        activity_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM activity_registrations WHERE activity_id = $1 AND user_id = $2",
        )
        .bind(activity_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List registrations for an activity, oldest first.
    pub async fn list_registrations(
        pool: &PgPool,
        activity_id: DbId,
    ) -> Result<Vec<ActivityRegistration>, sqlx::Error> {
        let query = format!(
            "SELECT {REGISTRATION_COLUMNS} FROM activity_registrations \
             WHERE activity_id = $1 ORDER BY created_at"
        );
        sqlx::query_as::<_, ActivityRegistration>(&query)
            .bind(activity_id)
            .fetch_all(pool)
            .await
    }

    /// Verify that an activity exists by ID.
    pub async fn verify_exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM activities WHERE id = $1")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(count.0 > 0)
    }
}
