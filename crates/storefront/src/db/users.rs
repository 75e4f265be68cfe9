//! User repository for account storage.

use sqlx::PgPool;

use pixelport_core::{Email, UserId};

use super::RepositoryError;
use crate::models::User;

/// Raw row as stored in `users`, minus the password hash.
#[derive(sqlx::FromRow)]
struct UserRow {
    id: i32,
    name: String,
    email: String,
}

fn into_user(row: UserRow) -> Result<User, RepositoryError> {
    let email = Email::parse(&row.email)
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid email in users row: {e}")))?;
    Ok(User {
        id: UserId::new(row.id),
        name: row.name,
        email,
    })
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new user with an argon2 password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        name: &str,
        email: &Email,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let row: UserRow = sqlx::query_as(
            "INSERT INTO users (name, email, password_hash) VALUES ($1, $2, $3) \
             RETURNING id, name, email",
        )
        .bind(name)
        .bind(email.as_str())
        .bind(password_hash)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        into_user(row)
    }

    /// Get a user and their password hash by email.
    ///
    /// Returns `None` if no user has that email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_with_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let row: Option<(i32, String, String, String)> = sqlx::query_as(
            "SELECT id, name, email, password_hash FROM users WHERE email = $1",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        let Some((id, name, email, password_hash)) = row else {
            return Ok(None);
        };

        let user = into_user(UserRow { id, name, email })?;
        Ok(Some((user, password_hash)))
    }
}
