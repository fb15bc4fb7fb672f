//! Argon2 password hashing.
//!
//! Hashes are salted PHC strings and never reproduce byte-for-byte across
//! calls; equality is only observable through [`verify_password`].

use argon2::password_hash::{PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Argon2, PasswordHash};
use rand::rngs::OsRng;

use crate::registration::errors::RegistrationError;

pub fn hash_password(plaintext: &str) -> Result<String, RegistrationError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|e| RegistrationError::Hash(e.to_string()))?
        .to_string();
    Ok(hash)
}

/// Malformed hash input signals a verification failure, not an error.
pub fn verify_password(plaintext: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::{hash_password, verify_password};

    #[test]
    fn hash_never_equals_plaintext_and_verifies() {
        let hash = hash_password("12345678").unwrap();
        assert_ne!(hash, "12345678");
        assert!(verify_password("12345678", &hash));
        assert!(!verify_password("87654321", &hash));
    }

    #[test]
    fn hashing_is_salted() {
        let a = hash_password("12345678").unwrap();
        let b = hash_password("12345678").unwrap();
        assert_ne!(a, b);
        assert!(verify_password("12345678", &a));
        assert!(verify_password("12345678", &b));
    }

    #[test]
    fn malformed_hash_fails_closed() {
        assert!(!verify_password("12345678", "not-a-phc-string"));
        assert!(!verify_password("12345678", ""));
    }
}
