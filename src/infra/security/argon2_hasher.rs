use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand::rngs::OsRng;
use tracing::error;

use crate::domain::{models::user::PasswordDigest, ports::CredentialHasher};
use crate::error::AppError;

/// Argon2id hasher producing PHC strings (`$argon2id$v=19$...`).
pub struct Argon2CredentialHasher {
    params: Params,
}

impl Argon2CredentialHasher {
    /// `time_cost` is the number of Argon2 passes; memory and lanes stay at
    /// the crate defaults.
    pub fn new(time_cost: u32) -> Result<Self, AppError> {
        let params = Params::new(
            Params::DEFAULT_M_COST,
            time_cost,
            Params::DEFAULT_P_COST,
            None,
        )
        .map_err(|e| AppError::Config(format!("Invalid password hash cost {}: {}", time_cost, e)))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl CredentialHasher for Argon2CredentialHasher {
    fn hash(&self, plaintext: &str) -> Result<PasswordDigest, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        let encoded = self
            .argon2()
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| {
                error!("Password hashing failed: {}", e);
                AppError::Internal
            })?
            .to_string();

        Ok(PasswordDigest::new(encoded))
    }

    fn verify(&self, plaintext: &str, digest: &PasswordDigest) -> bool {
        // Parameters are read back from the PHC string, so digests made with
        // an older cost still verify.
        match PasswordHash::new(digest.as_str()) {
            Ok(parsed) => self.argon2().verify_password(plaintext.as_bytes(), &parsed).is_ok(),
            Err(_) => false,
        }
    }
}
