//! Argon2 password hashing.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::server::error::AppError;

/// Hashes a password into a PHC string with a fresh salt.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Checks a password against a stored PHC string.
///
/// # Returns
/// - `Ok(true)` / `Ok(false)` - Whether the password matches
/// - `Err(AppError::PasswordHashErr)` - The stored hash cannot be parsed
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(hash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verifies_hashed_password() {
        let hash = hash_password("secret123").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("secret123", &hash).unwrap());
        assert!(!verify_password("secret124", &hash).unwrap());
    }

    #[test]
    fn rejects_malformed_hash() {
        assert!(verify_password("secret123", "not-a-hash").is_err());
    }
}
