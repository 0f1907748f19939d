use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Token payload. `username` is the only claim; no `exp` or other
/// registered claims are set, so a token stays valid for as long as the
/// signing secret does.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
}

/// Signs and verifies identity tokens with a process-wide HS256 secret.
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenSigner {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Tokens carry no expiry claim; validate the signature only.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn issue(&self, username: &str) -> Result<String, AppError> {
        let claims = Claims {
            username: username.to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("Token signing failed: {}", e)))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| AppError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_verify_roundtrip() {
        let signer = TokenSigner::new("test-secret");

        let token = signer.issue("alice").unwrap();
        let claims = signer.verify(&token).unwrap();
        assert_eq!(claims.username, "alice");
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let signer = TokenSigner::new("test-secret");
        let token = signer.issue("alice").unwrap();

        // Flip the last character of the signature segment.
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        assert!(matches!(
            signer.verify(&tampered),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let signer = TokenSigner::new("test-secret");
        let other = TokenSigner::new("another-secret");

        let token = signer.issue("alice").unwrap();
        assert!(matches!(other.verify(&token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let signer = TokenSigner::new("test-secret");
        assert!(matches!(
            signer.verify("not.a.token"),
            Err(AppError::InvalidToken)
        ));
    }
}
