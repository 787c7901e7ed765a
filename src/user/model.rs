use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Body of both `/auth/register` and `/auth/login`; `email` only matters on register.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AuthInput {
    pub username: String,
    pub password: String,
    pub email: String,
}

impl AuthInput {
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.username.trim().is_empty() {
            Some("username")
        } else if self.password.trim().is_empty() {
            Some("password")
        } else {
            None
        }
    }
}
