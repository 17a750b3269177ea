//! # User Repository
//!
//! Database access for credential records and their skill lists.
//!
//! Every operation is a single read or a single write keyed by email or id;
//! nothing here spans requests or needs a transaction.
//!
//! ## Example
//!
//! ```rust,no_run
//! # use lib_core::model::store::{create_pool, UserForCreate, UserRepository};
//! # async fn example() -> anyhow::Result<()> {
//! let pool = create_pool("sqlite::memory:").await?;
//!
//! let user = UserRepository::create(
//!     &pool,
//!     UserForCreate::new("A".into(), "a@x.com".into(), "$argon2id$...".into()),
//! )
//! .await?;
//!
//! let found = UserRepository::find_by_email(&pool, "a@x.com").await?;
//! assert_eq!(found.map(|u| u.id), Some(user.id));
//! # Ok(())
//! # }
//! ```

use super::models::{User, UserForCreate, UserForUpdate};
use super::DbPool;
use lib_utils::now_utc;
use sqlx::{query_as, types::Json};
use uuid::Uuid;

/// User repository for database operations.
pub struct UserRepository;

impl UserRepository {
    /// Find a user by exact (case-sensitive) email.
    pub async fn find_by_email(pool: &DbPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by id.
    pub async fn find_by_id(pool: &DbPool, id: &str) -> Result<Option<User>, sqlx::Error> {
        query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Create a new user with a fresh id and an empty skill list.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if:
    /// - Email already exists (UNIQUE constraint violation)
    /// - Database connection fails
    pub async fn create(pool: &DbPool, user_data: UserForCreate) -> Result<User, sqlx::Error> {
        let id = Uuid::new_v4().to_string();
        let now = now_utc();

        sqlx::query(
            "INSERT INTO users (id, name, email, password_hash, skills, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&user_data.name)
        .bind(&user_data.email)
        .bind(&user_data.password_hash)
        .bind(Json(Vec::<String>::new()))
        .bind(now)
        .bind(now)
        .execute(pool)
        .await?;

        query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(&id)
            .fetch_one(pool)
            .await
    }

    /// Update an existing user using `UserForUpdate`.
    ///
    /// Only fields that are `Some` in `user_data` will be updated.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(User))` - The updated user
    /// * `Ok(None)` - No user with that id
    pub async fn update(
        pool: &DbPool,
        id: &str,
        user_data: UserForUpdate,
    ) -> Result<Option<User>, sqlx::Error> {
        if user_data.is_empty() {
            return Self::find_by_id(pool, id).await;
        }

        let mut updates = Vec::new();
        if user_data.name.is_some() {
            updates.push("name = ?");
        }
        if user_data.skills.is_some() {
            updates.push("skills = ?");
        }
        updates.push("updated_at = ?");
        let query_str = format!("UPDATE users SET {} WHERE id = ?", updates.join(", "));

        let mut query = sqlx::query(&query_str);
        if let Some(ref name) = user_data.name {
            query = query.bind(name);
        }
        if let Some(ref skills) = user_data.skills {
            query = query.bind(Json(skills));
        }

        let result = query.bind(now_utc()).bind(id).execute(pool).await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Self::find_by_id(pool, id).await
    }

    /// Replace a user's skill list.
    pub async fn set_skills(
        pool: &DbPool,
        id: &str,
        skills: &[String],
    ) -> Result<Option<User>, sqlx::Error> {
        Self::update(pool, id, UserForUpdate::new().skills(skills.to_vec())).await
    }

    /// All users in insertion order.
    pub async fn list_all(pool: &DbPool) -> Result<Vec<User>, sqlx::Error> {
        query_as::<_, User>("SELECT * FROM users ORDER BY rowid")
            .fetch_all(pool)
            .await
    }
}
