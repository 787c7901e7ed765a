use crate::comment::model::Comment;
use crate::post::model::Post;
use crate::user::model::User;
use crate::utils::error::ApiError;
use chrono::Utc;
use log::error;
use sqlx::SqlitePool;
use std::collections::HashMap;

const POST_COLUMNS: &str = "id, title, content, author_id, created_at, updated_at, deleted_at";

fn db_error(context: &str, e: sqlx::Error) -> ApiError {
    error!("{}: {}", context, e);
    ApiError::InternalServerError(format!("{}: {}", context, e))
}

pub struct PostService {
    pool: SqlitePool,
}

impl PostService {
    pub fn new(pool: &SqlitePool) -> Self {
        PostService { pool: pool.clone() }
    }

    pub async fn create_post(
        &self,
        author: &User,
        title: String,
        content: String,
    ) -> Result<Post, ApiError> {
        let now = Utc::now();
        let mut post = sqlx::query_as::<_, Post>(&format!(
            "INSERT INTO posts (title, content, author_id, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?) RETURNING {POST_COLUMNS}"
        ))
        .bind(title)
        .bind(content)
        .bind(author.id)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create post", e))?;

        post.author = Some(author.clone());
        Ok(post)
    }

    /// A single live post, without relations.
    pub async fn find_post(&self, id: i64) -> Result<Option<Post>, ApiError> {
        sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = ? AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch post", e))
    }

    /// Every live post with its author and comments loaded.
    pub async fn list_posts(&self) -> Result<Vec<Post>, ApiError> {
        let mut posts = sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE deleted_at IS NULL ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list posts", e))?;

        let authors: HashMap<i64, User> = sqlx::query_as::<_, User>(
            "SELECT u.id, u.username, u.password, u.email, u.created_at, u.updated_at, u.deleted_at \
             FROM users u \
             WHERE u.deleted_at IS NULL \
               AND u.id IN (SELECT author_id FROM posts WHERE deleted_at IS NULL)",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to load post authors", e))?
        .into_iter()
        .map(|user| (user.id, user))
        .collect();

        let comments: Vec<Comment> = sqlx::query_as::<_, Comment>(
            "SELECT c.id, c.content, c.user_id, c.post_id, c.created_at, c.updated_at, c.deleted_at \
             FROM comments c \
             JOIN posts p ON p.id = c.post_id \
             WHERE c.deleted_at IS NULL AND p.deleted_at IS NULL \
             ORDER BY c.id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to load comments", e))?;

        let mut by_post: HashMap<i64, Vec<Comment>> = HashMap::new();
        for comment in comments {
            by_post.entry(comment.post_id).or_default().push(comment);
        }

        for post in &mut posts {
            post.author = authors.get(&post.author_id).cloned();
            post.comments = Some(by_post.remove(&post.id).unwrap_or_default());
        }

        Ok(posts)
    }

    /// One live post with its author, its comments, and each comment's author.
    pub async fn get_post(&self, id: i64) -> Result<Option<Post>, ApiError> {
        let Some(mut post) = self.find_post(id).await? else {
            return Ok(None);
        };

        post.author = sqlx::query_as::<_, User>(
            "SELECT id, username, password, email, created_at, updated_at, deleted_at \
             FROM users WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(post.author_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to load post author", e))?;

        let mut comments = sqlx::query_as::<_, Comment>(
            "SELECT id, content, user_id, post_id, created_at, updated_at, deleted_at \
             FROM comments WHERE post_id = ? AND deleted_at IS NULL ORDER BY id",
        )
        .bind(post.id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to load comments", e))?;

        let commenters: HashMap<i64, User> = sqlx::query_as::<_, User>(
            "SELECT DISTINCT u.id, u.username, u.password, u.email, u.created_at, u.updated_at, u.deleted_at \
             FROM users u \
             JOIN comments c ON c.user_id = u.id \
             WHERE c.post_id = ? AND c.deleted_at IS NULL AND u.deleted_at IS NULL",
        )
        .bind(post.id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to load comment authors", e))?
        .into_iter()
        .map(|user| (user.id, user))
        .collect();

        for comment in &mut comments {
            comment.user = commenters.get(&comment.user_id).cloned();
        }
        post.comments = Some(comments);

        Ok(Some(post))
    }

    pub async fn update_post(
        &self,
        post: &Post,
        title: String,
        content: String,
    ) -> Result<Post, ApiError> {
        sqlx::query_as::<_, Post>(&format!(
            "UPDATE posts SET title = ?, content = ?, updated_at = ? \
             WHERE id = ? AND deleted_at IS NULL RETURNING {POST_COLUMNS}"
        ))
        .bind(title)
        .bind(content)
        .bind(Utc::now())
        .bind(post.id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update post", e))
    }

    /// Soft delete: the row stays, stamped with `deleted_at`.
    pub async fn delete_post(&self, id: i64) -> Result<(), ApiError> {
        sqlx::query("UPDATE posts SET deleted_at = ? WHERE id = ? AND deleted_at IS NULL")
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete post", e))?;
        Ok(())
    }
}
