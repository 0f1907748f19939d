use crate::error::AppError;

/// Hash a password with bcrypt at the given cost. The salt is generated
/// internally and embedded in the returned hash string.
pub fn hash(plaintext: &str, cost: u32) -> Result<String, AppError> {
    bcrypt::hash(plaintext, cost)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

/// Verify a password against a stored bcrypt hash.
pub fn verify(plaintext: &str, hashed: &str) -> Result<bool, AppError> {
    bcrypt::verify(plaintext, hashed)
        .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum bcrypt cost; keeps tests fast.
    const COST: u32 = 4;

    #[test]
    fn test_hash_verify() {
        let password = "test_password_123";

        let hashed = hash(password, COST).unwrap();
        assert!(verify(password, &hashed).unwrap());
        assert!(!verify("wrong_password", &hashed).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let password = "test_password_123";

        let a = hash(password, COST).unwrap();
        let b = hash(password, COST).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_garbage_hash_is_an_error() {
        assert!(verify("anything", "not-a-bcrypt-hash").is_err());
    }
}
