use crate::comment::model::Comment;
use crate::user::model::User;
use crate::utils::error::ApiError;
use chrono::Utc;
use log::error;
use sqlx::SqlitePool;

const COMMENT_COLUMNS: &str = "id, content, user_id, post_id, created_at, updated_at, deleted_at";

pub struct CommentService {
    pool: SqlitePool,
}

impl CommentService {
    pub fn new(pool: &SqlitePool) -> Self {
        CommentService { pool: pool.clone() }
    }

    pub async fn create_comment(
        &self,
        author: &User,
        post_id: i64,
        content: String,
    ) -> Result<Comment, ApiError> {
        let now = Utc::now();
        sqlx::query_as::<_, Comment>(&format!(
            "INSERT INTO comments (content, user_id, post_id, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?) RETURNING {COMMENT_COLUMNS}"
        ))
        .bind(content)
        .bind(author.id)
        .bind(post_id)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to save comment on post {}: {}", post_id, e);
            ApiError::InternalServerError(format!("Failed to save comment: {}", e))
        })
    }

    pub async fn find_comment(&self, id: i64) -> Result<Option<Comment>, ApiError> {
        sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE id = ? AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ApiError::InternalServerError(format!("Failed to fetch comment: {}", e)))
    }

    pub async fn delete_comment(&self, id: i64) -> Result<(), ApiError> {
        sqlx::query("UPDATE comments SET deleted_at = ? WHERE id = ? AND deleted_at IS NULL")
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to delete comment {}: {}", id, e);
                ApiError::InternalServerError(format!("Failed to delete comment: {}", e))
            })?;
        Ok(())
    }
}
