use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A user record as stored in the credential store.
///
/// Created once at registration and immutable thereafter; there is no update
/// or delete path. The `password_hash` field only ever holds a bcrypt digest
/// (never plaintext) and is excluded from serialization so it cannot leak
/// into a response body.
#[derive(Debug, Serialize, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub age: i32,
    pub created_at: DateTime<Utc>,
}
