//! Repository for user accounts.

use sqlx::PgPool;

use sakap_core::types::DbId;

use crate::models::user::{User, UserResponse};

/// Column list for `users` queries.
const USER_COLUMNS: &str = "\
    id, username, email, password_hash, role, full_name, \
    is_active, last_login_at, created_at, updated_at";

/// Column list for external-facing user queries (no password hash).
const USER_RESPONSE_COLUMNS: &str = "\
    id, username, email, role, full_name, \
    is_active, last_login_at, created_at";

/// Provides CRUD operations for user accounts.
pub struct UserRepo;

impl UserRepo {
    /// Create a user with an already-hashed password.
    pub async fn create(
        pool: &PgPool,
        username: &str,
        email: &str,
        password_hash: &str,
        role: &str,
        full_name: Option<&str>,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, email, password_hash, role, full_name) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .bind(email)
            .bind(password_hash)
            .bind(role)
            .bind(full_name)
            .fetch_one(pool)
            .await
    }

    /// Find a user by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username (for login).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// List all users without password hashes, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<UserResponse>, sqlx::Error> {
        let query =
            format!("SELECT {USER_RESPONSE_COLUMNS} FROM users ORDER BY created_at DESC");
        sqlx::query_as::<_, UserResponse>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update mutable account fields. Returns the updated row, or `None` if
    /// not found.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        email: Option<&str>,
        role: Option<&str>,
        full_name: Option<&str>,
        is_active: Option<bool>,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET \
                email = COALESCE($2, email), \
                role = COALESCE($3, role), \
                full_name = COALESCE($4, full_name), \
                is_active = COALESCE($5, is_active) \
             WHERE id = $1 \
             RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(email)
            .bind(role)
            .bind(full_name)
            .bind(is_active)
            .fetch_optional(pool)
            .await
    }

    /// Stamp a successful login.
    pub async fn record_successful_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET last_login_at = now() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
