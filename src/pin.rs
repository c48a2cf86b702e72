//! Transaction PIN credential handling.
//!
//! The PIN is a 4-digit credential distinct from the login password. It is
//! stored only as an argon2 hash and compared with constant-time
//! verification.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::LedgerError;

#[derive(Debug, Clone, Copy, Default)]
pub struct PinGuard;

impl PinGuard {
    pub fn validate_format(pin: &str) -> Result<(), LedgerError> {
        if pin.len() != 4 || !pin.chars().all(|c| c.is_ascii_digit()) {
            return Err(LedgerError::Validation(
                "PIN must be exactly 4 digits".to_string(),
            ));
        }
        Ok(())
    }

    pub fn hash(pin: &str) -> Result<String, LedgerError> {
        Self::validate_format(pin)?;
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(pin.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| LedgerError::Internal(format!("PIN hashing failed: {e}")))
    }

    /// A malformed stored hash verifies as false rather than erroring; the
    /// caller only ever needs match / no-match.
    pub fn verify(pin: &str, pin_hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(pin_hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(pin.as_bytes(), &parsed)
            .is_ok()
    }
}
