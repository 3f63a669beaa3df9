pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::Validate;

// Re-export necessary items
pub use extractors::AuthenticatedUserId;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenError, TokenService};

lazy_static! {
    // Regex for username validation: alphanumeric, underscores, hyphens
    static ref USERNAME_REGEX: regex::Regex = regex::Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap();
}

/// Represents the payload for a user login request.
///
/// Field presence is enforced here; whether the credentials actually match a
/// user is decided by the login handler.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// User's email address.
    pub email: String,
    /// User's password.
    pub password: String,
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Desired username for the new account.
    /// Must be between 3 and 30 characters, alphanumeric, and can include underscores or hyphens.
    #[validate(
        length(min = 3, max = 30),
        regex(
            path = "USERNAME_REGEX",
            message = "Username must be alphanumeric, underscores, or hyphens"
        )
    )]
    pub username: String,
    /// Email address for the new account.
    /// Must be a valid email format.
    #[validate(email)]
    pub email: String,
    /// Password for the new account.
    /// Must be between 8 and 64 characters long.
    #[validate(length(min = 8, max = 64))]
    pub password: String,
    /// Age of the account holder. Registration is gated to adults.
    #[validate(range(min = 18))]
    pub age: i32,
}

/// Response structure after successful registration.
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// Human-readable confirmation.
    pub message: String,
    /// The unique identifier of the newly created user.
    pub id: i32,
}

/// Response structure after successful login.
/// Contains the bearer token used to authenticate subsequent requests.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Human-readable confirmation.
    pub message: String,
    /// The signed token for session authentication.
    pub token: String,
}
