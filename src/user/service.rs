use crate::user::model::User;
use crate::utils::error::ApiError;
use crate::utils::hashing;
use chrono::Utc;
use log::error;
use sqlx::SqlitePool;

const USER_COLUMNS: &str = "id, username, password, email, created_at, updated_at, deleted_at";

pub struct UserService {
    pool: SqlitePool,
}

impl UserService {
    pub fn new(pool: &SqlitePool) -> Self {
        UserService { pool: pool.clone() }
    }

    pub async fn create_user(
        &self,
        username: String,
        email: String,
        password: &str,
    ) -> Result<User, ApiError> {
        let hashed_password =
            hashing::hash_password(password).map_err(|e| ApiError::BadRequest(e.to_string()))?;

        if self
            .username_exists(&username)
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))?
        {
            return Err(ApiError::BadRequest("username already exists".to_string()));
        }

        let now = Utc::now();
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, password, email, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?) RETURNING {USER_COLUMNS}"
        ))
        .bind(username)
        .bind(hashed_password)
        .bind(email)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))
    }

    async fn username_exists(&self, username: &str) -> Result<bool, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM users WHERE username = ? AND deleted_at IS NULL",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await?;
        Ok(count > 0)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, ApiError> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ? AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to fetch user {}: {}", id, e);
            ApiError::InternalServerError(format!("Failed to fetch user: {}", e))
        })
    }

    /// Look the user up by name and check the password. Any mismatch is reported
    /// with the same message.
    pub async fn authenticate_user(&self, username: &str, password: &str) -> Result<User, ApiError> {
        let invalid = || ApiError::BadRequest("invalid username or password".to_string());

        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = ? AND deleted_at IS NULL \
             ORDER BY id LIMIT 1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
        .ok_or_else(invalid)?;

        match hashing::verify_password(password, &user.password) {
            Ok(true) => Ok(user),
            _ => Err(invalid()),
        }
    }
}
