use crate::error::AppError;
use bcrypt::{hash, verify};

// bcrypt silently truncates beyond 72 bytes, so oversized input is rejected
// up front instead.
const MAX_PASSWORD_BYTES: usize = 72;

/// Hashes a plaintext password with bcrypt (cost 12, random salt).
///
/// The same plaintext yields a different digest on every call because the
/// salt is fresh each time. Empty or oversized input is a validation error;
/// any other failure is internal.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    if password.is_empty() {
        return Err(AppError::Validation("password must not be empty".into()));
    }
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(AppError::Validation(format!(
            "password must not exceed {} bytes",
            MAX_PASSWORD_BYTES
        )));
    }
    hash(password, 12).map_err(|e| AppError::Store(format!("failed to hash password: {}", e)))
}

/// Checks a plaintext password against a stored bcrypt digest.
///
/// Returns false on any mismatch, including a corrupted or malformed digest.
/// No error escapes to the caller; a bad digest is just a failed match.
pub fn verify_password(password: &str, hashed_password: &str) -> bool {
    verify(password, hashed_password).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hashing_and_verification() {
        let password = "test_password123";
        let hashed = hash_password(password).unwrap();

        assert!(verify_password(password, &hashed));
        assert!(!verify_password("wrong_password", &hashed));
    }

    #[test]
    fn test_hashes_are_salted() {
        let password = "test_password123";
        let first = hash_password(password).unwrap();
        let second = hash_password(password).unwrap();
        assert_ne!(first, second);
        assert!(verify_password(password, &first));
        assert!(verify_password(password, &second));
    }

    #[test]
    fn test_hash_rejects_empty_password() {
        match hash_password("") {
            Err(AppError::Validation(_)) => {}
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_hash_rejects_oversized_password() {
        let oversized = "a".repeat(MAX_PASSWORD_BYTES + 1);
        match hash_password(&oversized) {
            Err(AppError::Validation(_)) => {}
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_verify_with_invalid_hash_returns_false() {
        // A malformed digest must read as a failed match, not an error.
        assert!(!verify_password("test_password123", "invalidhashformat"));
        assert!(!verify_password("test_password123", ""));
    }
}
