//! MySQL implementation of the UserRepository trait.
//!
//! The durable side of the verification subsystem: the authoritative
//! `verified` flag and the refresh-token reference live here.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use vf_core::domain::entities::User;
use vf_core::errors::DomainError;
use vf_core::repositories::UserRepository;

pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn db_err(context: &str, e: sqlx::Error) -> DomainError {
        DomainError::Unavailable {
            message: format!("{context}: {e}"),
        }
    }

    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| Self::db_err("failed to read id", e))?;

        Ok(User {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("invalid user id in database: {e}"),
            })?,
            email: row
                .try_get("email")
                .map_err(|e| Self::db_err("failed to read email", e))?,
            display_name: row
                .try_get("display_name")
                .map_err(|e| Self::db_err("failed to read display_name", e))?,
            verified: row
                .try_get("verified")
                .map_err(|e| Self::db_err("failed to read verified", e))?,
            verified_at: row
                .try_get::<Option<DateTime<Utc>>, _>("verified_at")
                .map_err(|e| Self::db_err("failed to read verified_at", e))?,
            birth_date: row
                .try_get::<Option<NaiveDate>, _>("birth_date")
                .map_err(|e| Self::db_err("failed to read birth_date", e))?,
            refresh_token_hash: row
                .try_get("refresh_token_hash")
                .map_err(|e| Self::db_err("failed to read refresh_token_hash", e))?,
            last_login_at: row
                .try_get::<Option<DateTime<Utc>>, _>("last_login_at")
                .map_err(|e| Self::db_err("failed to read last_login_at", e))?,
            last_logout_at: row
                .try_get::<Option<DateTime<Utc>>, _>("last_logout_at")
                .map_err(|e| Self::db_err("failed to read last_logout_at", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| Self::db_err("failed to read created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| Self::db_err("failed to read updated_at", e))?,
        })
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, email, display_name, verified, verified_at, birth_date,
           refresh_token_hash, last_login_at, last_logout_at,
           created_at, updated_at
    FROM users
"#;

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = format!("{SELECT_COLUMNS} WHERE email = ? LIMIT 1");
        let result = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::db_err("user lookup by email failed", e))?;

        result.map(|row| Self::row_to_user(&row)).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = format!("{SELECT_COLUMNS} WHERE id = ? LIMIT 1");
        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::db_err("user lookup by id failed", e))?;

        result.map(|row| Self::row_to_user(&row)).transpose()
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                id, email, display_name, verified, verified_at, birth_date,
                refresh_token_hash, last_login_at, last_logout_at,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.email)
            .bind(&user.display_name)
            .bind(user.verified)
            .bind(user.verified_at)
            .bind(user.birth_date)
            .bind(&user.refresh_token_hash)
            .bind(user.last_login_at)
            .bind(user.last_logout_at)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_unique_violation() => DomainError::Conflict {
                    message: "email already registered".to_string(),
                },
                _ => Self::db_err("failed to create user", e),
            })?;

        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            UPDATE users SET
                email = ?, display_name = ?, verified = ?, verified_at = ?,
                birth_date = ?, refresh_token_hash = ?, last_login_at = ?,
                last_logout_at = ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&user.email)
            .bind(&user.display_name)
            .bind(user.verified)
            .bind(user.verified_at)
            .bind(user.birth_date)
            .bind(&user.refresh_token_hash)
            .bind(user.last_login_at)
            .bind(user.last_logout_at)
            .bind(user.updated_at)
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| Self::db_err("failed to update user", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "user".to_string(),
            });
        }

        Ok(user)
    }
}
