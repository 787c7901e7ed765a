use crate::config::JwtConfig;
use crate::database;
use crate::middleware::auth::issue_token;
use crate::user::model::User;
use crate::user::service::UserService;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

/// In-memory database with the schema applied. One connection, kept alive, so
/// every query sees the same database.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("open in-memory sqlite");
    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await
        .expect("enable foreign keys");
    database::migrate(&pool).await.expect("apply schema");
    pool
}

pub fn test_jwt() -> JwtConfig {
    JwtConfig {
        secret: "test-secret".to_string(),
        expire_hours: 1,
    }
}

/// Register a user directly and hand back a bearer token for it.
pub async fn seed_user(pool: &SqlitePool, username: &str) -> (User, String) {
    let user = UserService::new(pool)
        .create_user(
            username.to_string(),
            format!("{username}@example.com"),
            "password123",
        )
        .await
        .expect("seed user");
    let jwt = test_jwt();
    let ttl = jwt.ttl().expect("ttl in range");
    let token = issue_token(user.id, &jwt.secret, ttl).expect("issue token");
    (user, token)
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}
