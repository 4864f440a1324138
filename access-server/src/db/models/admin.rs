//! Admin Model

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Administrator row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Admin {
    pub key: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub hash_pass: String,
    /// SHA-256 hex of the only refresh token currently accepted
    #[serde(default, skip_serializing)]
    pub refresh_token_hash: Option<String>,
    #[serde(default)]
    pub created_at: i64,
}

impl Admin {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.hash_pass)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }

    /// Digest stored in place of a refresh token
    pub fn hash_refresh_token(token: &str) -> String {
        hex::encode(Sha256::digest(token.as_bytes()))
    }
}
