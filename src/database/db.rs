use crate::config::DatabaseConfig;
use log::info;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("unsupported database driver: {0}")]
    UnsupportedDriver(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

const SCHEMA: [&str; 4] = [
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        username    TEXT NOT NULL,
        password    TEXT NOT NULL,
        email       TEXT NOT NULL,
        created_at  TEXT NOT NULL,
        updated_at  TEXT NOT NULL,
        deleted_at  TEXT NULL
    )
    "#,
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_users_email ON users (email)",
    r#"
    CREATE TABLE IF NOT EXISTS posts (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        title       TEXT NOT NULL,
        content     TEXT NOT NULL,
        author_id   INTEGER NOT NULL REFERENCES users (id),
        created_at  TEXT NOT NULL,
        updated_at  TEXT NOT NULL,
        deleted_at  TEXT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS comments (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        content     TEXT NOT NULL,
        user_id     INTEGER NOT NULL REFERENCES users (id),
        post_id     INTEGER NOT NULL REFERENCES posts (id),
        created_at  TEXT NOT NULL,
        updated_at  TEXT NOT NULL,
        deleted_at  TEXT NULL
    )
    "#,
];

/// Open the shared pool for the configured driver. Only `sqlite` is supported;
/// `name` is the database file, created when missing.
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, DatabaseError> {
    match config.driver.as_str() {
        "sqlite" => {
            let options = SqliteConnectOptions::from_str(&config.name)?
                .create_if_missing(true)
                .foreign_keys(true);

            let pool = SqlitePoolOptions::new()
                .max_connections(5)
                .connect_with(options)
                .await?;

            info!("Connected to sqlite database {}", config.name);
            Ok(pool)
        }
        other => Err(DatabaseError::UnsupportedDriver(other.to_string())),
    }
}

/// Create the tables for users, posts and comments if they do not exist yet.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    info!("Database schema is up to date");
    Ok(())
}
