use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::domain::user::models::DisplayName;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserStatus;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

const SELECT_USER: &str = r#"
    SELECT user_id, email, password_hash, name, is_admin, status, created_at, updated_at
    FROM users
"#;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Row shape of the `users` table.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    user_id: i64,
    email: String,
    password_hash: String,
    name: String,
    is_admin: bool,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = UserError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(row.user_id),
            email: EmailAddress::new(row.email).map_err(corrupt_row)?,
            password_hash: row.password_hash,
            display_name: DisplayName::new(row.name).map_err(corrupt_row)?,
            is_admin: row.is_admin,
            status: row.status.parse::<UserStatus>()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Stored data that no longer passes validation is a storage fault, not bad input.
fn corrupt_row(e: impl std::fmt::Display) -> UserError {
    UserError::DatabaseError(format!("Corrupt user row: {}", e))
}

fn database_error(e: sqlx::Error) -> UserError {
    UserError::DatabaseError(e.to_string())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (email, password_hash, name, is_admin, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING user_id, email, password_hash, name, is_admin, status, created_at, updated_at
            "#,
        )
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(user.display_name.as_str())
        .bind(user.is_admin)
        .bind(user.status.as_str())
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT)
                {
                    return UserError::EmailAlreadyExists(user.email.as_str().to_string());
                }
            }
            database_error(e)
        })?;

        User::try_from(row)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        sqlx::query_as::<_, UserRow>(&format!("{} WHERE user_id = $1", SELECT_USER))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?
            .map(User::try_from)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        sqlx::query_as::<_, UserRow>(&format!("{} WHERE email = $1", SELECT_USER))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?
            .map(User::try_from)
            .transpose()
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, UserError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(database_error)
    }
}
