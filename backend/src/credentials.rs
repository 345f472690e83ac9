//! The shared teacher password.
//!
//! Only an Argon2 hash of the password is configured; the plain value never
//! appears in configuration or source.

use argon2::password_hash::{PasswordHash, PasswordVerifier};
use argon2::Argon2;

#[derive(Debug, Clone)]
pub struct TeacherCredential {
    phc: String,
}

impl TeacherCredential {
    /// Wraps a PHC string, rejecting values that do not parse as one.
    pub fn from_phc(phc: &str) -> Result<Self, argon2::password_hash::Error> {
        PasswordHash::new(phc)?;
        Ok(Self {
            phc: phc.to_string(),
        })
    }

    pub fn verify(&self, password: &str) -> bool {
        match PasswordHash::new(&self.phc) {
            Ok(hash) => Argon2::default()
                .verify_password(password.as_bytes(), &hash)
                .is_ok(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
pub(crate) fn hash_for_tests(password: &str) -> String {
    use argon2::password_hash::{PasswordHasher, SaltString};

    let salt = SaltString::from_b64("c29tZXNhbHRzb21lc2FsdA").unwrap();
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .unwrap()
        .to_string()
}
